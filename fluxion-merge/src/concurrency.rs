// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;
use core::num::NonZeroUsize;
use fluxion_core::{FluxionError, Result};

/// Cap on the number of inner subscriptions a merge keeps open at once.
///
/// ```
/// use fluxion_merge::Concurrency;
///
/// assert_eq!(Concurrency::default(), Concurrency::Unbounded);
/// assert!(Concurrency::limited(0).is_err());
/// assert_eq!(Concurrency::limited(usize::MAX).unwrap(), Concurrency::Unbounded);
/// assert!(Concurrency::SERIAL.admits(0));
/// assert!(!Concurrency::SERIAL.admits(1));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Concurrency {
    /// Every inner sequence starts as soon as its outer value arrives.
    #[default]
    Unbounded,
    /// At most this many inner sequences run at once; the rest are buffered.
    Limited(NonZeroUsize),
}

impl Concurrency {
    /// One inner sequence at a time.
    pub const SERIAL: Self = Self::Limited(NonZeroUsize::MIN);

    /// A limit of `max` concurrent inner subscriptions. `usize::MAX` means unbounded.
    ///
    /// # Errors
    ///
    /// Returns `FluxionError::InvalidConfiguration` when `max` is zero.
    pub fn limited(max: usize) -> Result<Self> {
        Self::try_from(max)
    }

    /// Whether another inner subscription may start while `active` are open.
    #[must_use]
    pub const fn admits(&self, active: usize) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Limited(max) => active < max.get(),
        }
    }
}

impl TryFrom<usize> for Concurrency {
    type Error = FluxionError;

    fn try_from(max: usize) -> Result<Self> {
        match max {
            usize::MAX => Ok(Self::Unbounded),
            other => NonZeroUsize::new(other).map(Self::Limited).ok_or_else(|| {
                FluxionError::invalid_configuration("concurrency limit must be at least 1")
            }),
        }
    }
}

impl From<NonZeroUsize> for Concurrency {
    fn from(max: NonZeroUsize) -> Self {
        Self::Limited(max)
    }
}

impl fmt::Display for Concurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => write!(f, "unbounded"),
            Self::Limited(max) => write!(f, "{max}"),
        }
    }
}
