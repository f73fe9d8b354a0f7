//! Error reporting helpers
//!
//! Errors fall into two camps: those the user can act on (a bad scenario
//! file, an unknown CLI value) and those that indicate something broke
//! internally. User-actionable errors surface their own message; internal
//! ones get the operation context, with full detail kept at debug level.

/// Trait for errors that know whether their message is user-actionable
pub trait ContextualError: std::error::Error {
    /// True when the error message is directly actionable by the user
    fn is_user_actionable(&self) -> bool;

    /// The message to show when the error is user-actionable
    fn user_message(&self) -> Option<String> {
        self.is_user_actionable().then(|| self.to_string())
    }
}

/// Log an error at the right level of detail for its kind
pub fn log_error_with_context<E>(error: &E, operation_context: &str)
where
    E: ContextualError,
{
    match error.user_message() {
        Some(message) => log::error!("FATAL: {}", message),
        None => log::error!("FATAL: {}: {}", operation_context, error),
    }
    log::debug!("DETAIL: {:?}", error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct UserFacingError {
        message: String,
    }

    impl fmt::Display for UserFacingError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.message)
        }
    }

    impl std::error::Error for UserFacingError {}

    impl ContextualError for UserFacingError {
        fn is_user_actionable(&self) -> bool {
            true
        }
    }

    #[derive(Debug)]
    struct InternalError {
        detail: String,
    }

    impl fmt::Display for InternalError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "internal failure: {}", self.detail)
        }
    }

    impl std::error::Error for InternalError {}

    impl ContextualError for InternalError {
        fn is_user_actionable(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_user_actionable_error_exposes_its_message() {
        let error = UserFacingError {
            message: "scenario file needs at least one consumer".to_string(),
        };

        assert!(error.is_user_actionable());
        assert_eq!(
            error.user_message(),
            Some("scenario file needs at least one consumer".to_string())
        );
    }

    #[test]
    fn test_internal_error_has_no_user_message() {
        let error = InternalError {
            detail: "lock poisoned".to_string(),
        };

        assert!(!error.is_user_actionable());
        assert_eq!(error.user_message(), None);
    }

    #[test]
    fn test_logging_either_kind_does_not_panic() {
        let user = UserFacingError {
            message: "bad input".to_string(),
        };
        let internal = InternalError {
            detail: "oops".to_string(),
        };

        log_error_with_context(&user, "Loading scenario");
        log_error_with_context(&internal, "Running simulation");
    }
}
