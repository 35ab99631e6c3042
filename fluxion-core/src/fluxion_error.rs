// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The one failure type carried by observables.
//!
//! An error is terminal: a subscriber sees at most one, and nothing after it. Merge
//! operators forward the first error they observe from any source unchanged.
//!
//! ```
//! use fluxion_core::{FluxionError, Result};
//!
//! fn parse_limit(raw: &str) -> Result<usize> {
//!     raw.parse()
//!         .map_err(|_| FluxionError::invalid_configuration(format!("not a limit: {raw}")))
//! }
//!
//! assert_eq!(parse_limit("4").unwrap(), 4);
//! assert!(parse_limit("four").is_err());
//! ```

use std::error::Error;
use std::sync::Arc;

type SharedError = Arc<dyn Error + Send + Sync>;

/// Clones share the wrapped source, so a cloned error keeps its variant and message.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FluxionError {
    /// A source or operator failed; `context` says where.
    #[error("Stream processing error: {context}")]
    StreamProcessingError { context: String },

    /// An error raised by caller code: a projection, an accumulator or a source body.
    #[error("User error: {0}")]
    UserError(#[source] SharedError),

    /// An operator was built with a value it cannot honour, or needs a runtime that is
    /// not there.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl FluxionError {
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    pub fn user_error(error: impl Error + Send + Sync + 'static) -> Self {
        Self::UserError(Arc::new(error))
    }
}

pub type Result<T> = std::result::Result<T, FluxionError>;
