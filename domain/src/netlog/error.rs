//! Net-log argument errors

use thiserror::Error;

/// Argument errors raised by the net-log binding
///
/// Both variants surface synchronously to the calling script and neither
/// is fatal. Failures inside the logging service itself (such as an
/// unwritable capture file) are the service's responsibility and are not
/// represented here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetLogError {
    /// Start was requested with no arguments at all.
    #[error("file path required")]
    PathRequired,

    /// The first argument could not be converted to a file path.
    #[error("invalid file path")]
    InvalidPath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_required_display() {
        assert_eq!(NetLogError::PathRequired.to_string(), "file path required");
    }

    #[test]
    fn test_invalid_path_display() {
        assert_eq!(NetLogError::InvalidPath.to_string(), "invalid file path");
    }
}
