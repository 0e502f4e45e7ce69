use thiserror::Error;

/// Core error type for toolbelt operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A required argument was empty or absent.
    #[error("Missing required input: '{name}' cannot be null or empty")]
    MissingInput { name: &'static str },

    /// The input was present but could not be interpreted.
    #[error("Malformed {what}: {reason}")]
    Malformed { what: &'static str, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Operation was cancelled")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}

impl Error {
    #[must_use]
    pub fn missing(name: &'static str) -> Self {
        Self::MissingInput { name }
    }

    #[must_use]
    pub fn malformed(what: &'static str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            what,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Returns true for the "missing required input" class.
    #[must_use]
    pub fn is_missing_input(&self) -> bool {
        matches!(self, Self::MissingInput { .. })
    }

    /// Returns true for the "malformed input" class.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::missing("hex").to_string(),
            "Missing required input: 'hex' cannot be null or empty"
        );
        assert_eq!(
            Error::malformed("hex string", "odd length").to_string(),
            "Malformed hex string: odd length"
        );
        assert_eq!(Error::Cancelled.to_string(), "Operation was cancelled");
    }

    #[test]
    fn test_io_error_passes_through() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        match err {
            Error::Io(inner) => assert_eq!(inner.kind(), std::io::ErrorKind::PermissionDenied),
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn test_classification() {
        assert!(Error::missing("path").is_missing_input());
        assert!(Error::malformed("ip", "x").is_malformed());
        assert!(Error::Cancelled.is_cancelled());
        assert!(!Error::other("x").is_cancelled());
    }
}
