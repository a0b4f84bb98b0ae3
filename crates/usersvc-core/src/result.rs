//! Convenience result type alias for usersvc.

use crate::error::AppError;

/// A specialized `Result` type for usersvc operations.
pub type AppResult<T> = Result<T, AppError>;
