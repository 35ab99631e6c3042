// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::fluxion_error::FluxionError;

/// Item of the pull side: what [`to_stream`](crate::ObservableExt::to_stream) yields and
/// what `fluxion-runtime`'s `from_stream` consumes.
///
/// An `Error` is always the last item of a stream; completion is the end of the stream.
#[derive(Debug, Clone)]
pub enum StreamItem<T> {
    Value(T),
    Error(FluxionError),
}

// Two errors never compare equal, so a test cannot match an error by accident.
impl<T: PartialEq> PartialEq for StreamItem<T> {
    fn eq(&self, other: &Self) -> bool {
        matches!((self, other), (Self::Value(a), Self::Value(b)) if a == b)
    }
}

impl<T> StreamItem<T> {
    #[must_use]
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// The value, if this is one.
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Error(_) => None,
        }
    }

    /// Unwraps a value.
    ///
    /// # Panics
    ///
    /// Panics with the error's message on `Error`.
    pub fn unwrap(self) -> T {
        match self {
            Self::Value(value) => value,
            Self::Error(error) => panic!("expected a value, stream yielded error: {error}"),
        }
    }
}

impl<T> From<Result<T, FluxionError>> for StreamItem<T> {
    fn from(result: Result<T, FluxionError>) -> Self {
        result.map_or_else(Self::Error, Self::Value)
    }
}

impl<T> From<StreamItem<T>> for Result<T, FluxionError> {
    fn from(item: StreamItem<T>) -> Self {
        match item {
            StreamItem::Value(value) => Ok(value),
            StreamItem::Error(error) => Err(error),
        }
    }
}
