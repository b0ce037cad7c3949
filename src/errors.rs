use std::result::Result as StdResult;

use thiserror::Error;

use crate::backend::BackendError;
use crate::compile::Rejection;

/// The type returned by engine methods.
pub type Result<T> = StdResult<T, Error>;

/// Engine Error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The backing engine refused the pattern and strict mode forbids falling back.
    #[error(transparent)]
    Strict(#[from] Rejection),

    /// The backing engine failed to recompile a pattern it accepted before.
    #[error("{0}")]
    Backend(#[from] BackendError),

    /// The host engine failed to compile a pattern handed over to it.
    #[error("{0}")]
    Host(String),

    /// A capture variable was assigned to.
    #[error("Modification of a read-only value attempted")]
    ReadOnly,

    /// Invalid flag
    #[error("invalid pattern flag: {0}")]
    InvalidFlag(char),
}
