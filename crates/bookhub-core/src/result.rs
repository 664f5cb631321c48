//! Result alias used across all BookHub crates.

use crate::error::AppError;

/// Shorthand for a fallible operation whose error has already been
/// mapped into [`AppError`].
pub type AppResult<T> = Result<T, AppError>;
