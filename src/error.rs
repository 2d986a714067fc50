//! Error types for path normalization, enumeration and timestamp mutation.

/// Filesystem error type with contextual variants.
///
/// Every variant that concerns a path carries the offending path, so callers
/// can tell "the path is nonsense" ([`InvalidPath`](FsError::InvalidPath),
/// [`NotSupported`](FsError::NotSupported)) apart from "the path is fine but
/// inaccessible" ([`PermissionDenied`](FsError::PermissionDenied)) and "the
/// target does not exist" ([`NotFound`](FsError::NotFound)).
///
/// # Examples
///
/// ```rust
/// use unifs::FsError;
///
/// let err = FsError::NotFound { path: r"C:\missing".into() };
/// assert_eq!(err.to_string(), r"not found: C:\missing");
/// assert!(err.is_not_found());
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    // Path errors
    /// Path is malformed, empty, or contains illegal characters.
    #[error("invalid path: {path:?} ({reason})")]
    InvalidPath {
        /// The path as supplied by the caller.
        path: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Path uses a form that cannot be represented (e.g. a UNC path without a share).
    #[error("path form not supported: {path:?} ({reason})")]
    NotSupported {
        /// The path as supplied by the caller.
        path: String,
        /// Why the form is unsupported.
        reason: &'static str,
    },

    /// Path does not exist.
    #[error("not found: {path}")]
    NotFound {
        /// The path that was not found.
        path: String,
    },

    /// Expected a directory but found something else.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The path that is not a directory.
        path: String,
    },

    // Access errors
    /// The operating system denied the operation.
    #[error("{operation}: permission denied: {path}")]
    PermissionDenied {
        /// The path where permission was denied.
        path: String,
        /// The operation that was denied.
        operation: &'static str,
    },

    /// The supplied transaction is no longer usable.
    #[error("transaction error: {reason}")]
    Transaction {
        /// Why the transaction was rejected.
        reason: String,
    },

    // Configuration errors
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// I/O error with context.
    #[error("{operation} failed for {path}: {source}")]
    Io {
        /// The operation that failed.
        operation: &'static str,
        /// The path involved in the operation.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    pub(crate) fn invalid_path(path: &str, reason: impl Into<String>) -> Self {
        FsError::InvalidPath {
            path: path.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) fn not_supported(path: &str, reason: &'static str) -> Self {
        FsError::NotSupported {
            path: path.to_owned(),
            reason,
        }
    }

    /// Returns `true` if the target (or one of its parents) does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound { .. })
    }

    /// Returns `true` if the path was valid but the operation was refused.
    pub fn is_access_error(&self) -> bool {
        matches!(self, FsError::PermissionDenied { .. })
    }

    /// Returns `true` if the error was raised while validating the path itself.
    pub fn is_path_error(&self) -> bool {
        matches!(
            self,
            FsError::InvalidPath { .. } | FsError::NotSupported { .. }
        )
    }
}

impl From<std::io::Error> for FsError {
    fn from(error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound {
                path: String::new(),
            },
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied {
                path: String::new(),
                operation: "io",
            },
            _ => FsError::Io {
                operation: "io",
                path: String::new(),
                source: error,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = FsError::NotFound {
            path: r"C:\missing".into(),
        };
        assert_eq!(err.to_string(), r"not found: C:\missing");
    }

    #[test]
    fn permission_denied_display() {
        let err = FsError::PermissionDenied {
            path: r"C:\secret".into(),
            operation: "open_search",
        };
        assert_eq!(err.to_string(), r"open_search: permission denied: C:\secret");
    }

    #[test]
    fn invalid_path_display_quotes_path() {
        let err = FsError::invalid_path("a|b", "illegal character '|'");
        assert_eq!(
            err.to_string(),
            "invalid path: \"a|b\" (illegal character '|')"
        );
    }

    #[test]
    fn categories_are_distinct() {
        let invalid = FsError::invalid_path("x", "bad");
        let unsupported = FsError::not_supported(r"\\host", "no share");
        let missing = FsError::NotFound { path: "x".into() };
        let denied = FsError::PermissionDenied {
            path: "x".into(),
            operation: "open_search",
        };

        assert!(invalid.is_path_error() && !invalid.is_not_found());
        assert!(unsupported.is_path_error() && !unsupported.is_access_error());
        assert!(missing.is_not_found() && !missing.is_path_error());
        assert!(denied.is_access_error() && !denied.is_not_found());
    }

    #[test]
    fn from_io_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        assert!(matches!(FsError::from(io_err), FsError::NotFound { .. }));
    }

    #[test]
    fn from_io_permission_denied() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test");
        assert!(matches!(
            FsError::from(io_err),
            FsError::PermissionDenied { .. }
        ));
    }

    #[test]
    fn from_io_other() {
        let io_err = std::io::Error::other("test");
        assert!(matches!(FsError::from(io_err), FsError::Io { .. }));
    }
}
