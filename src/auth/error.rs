/// Every way a register or login call can fail.
///
/// The `Display` text is what callers see; infrastructure detail is logged
/// where the error is produced and never carried in the variant.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing username or password")]
    Validation,

    #[error("Username already exists")]
    Conflict,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Service unavailable")]
    StoreUnavailable,
}

impl AuthError {
    /// Only infrastructure faults are worth retrying.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::StoreUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_store_unavailable_is_retryable() {
        assert!(AuthError::StoreUnavailable.is_retryable());
        assert!(!AuthError::Validation.is_retryable());
        assert!(!AuthError::Conflict.is_retryable());
        assert!(!AuthError::InvalidCredentials.is_retryable());
    }

    #[test]
    fn messages_are_fixed() {
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid credentials");
        assert_eq!(AuthError::StoreUnavailable.to_string(), "Service unavailable");
    }
}
