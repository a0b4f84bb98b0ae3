//! Boundary mapping for collaborator failures.

use tracing::error;

use usersvc_core::error::AppError;

/// Logs a store or lookup failure and replaces it with a detail-free
/// internal error. Client-facing kinds pass through unchanged.
pub(crate) fn surface(context: &'static str) -> impl FnOnce(AppError) -> AppError {
    move |err| {
        if err.kind.is_server_error() {
            error!(context, error = %err, "Collaborator failure");
            AppError::internal(context)
        } else {
            err
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use usersvc_core::error::ErrorKind;

    #[test]
    fn test_cache_error_becomes_internal() {
        let err = surface("Failed to load session")(AppError::cache("connection reset"));
        assert_eq!(err.kind, ErrorKind::Internal);
        assert!(!err.message.contains("connection reset"));
    }

    #[test]
    fn test_unauthorized_passes_through() {
        let err = surface("ctx")(AppError::unauthorized("Token has expired"));
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }
}
