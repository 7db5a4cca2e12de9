//! Capture target value object

use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::error::NetLogError;

/// Destination path for a net-log capture file (Value Object)
///
/// Wraps the file-system path a capture is written to. Parsing validates
/// that the raw string is usable as a path; it never touches the file
/// system, and whether the file can actually be opened is the logging
/// service's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureTarget {
    path: PathBuf,
}

impl CaptureTarget {
    /// Borrow the target as a path.
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// Consume and return the inner path.
    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }
}

impl FromStr for CaptureTarget {
    type Err = NetLogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() || s.contains('\0') {
            return Err(NetLogError::InvalidPath);
        }
        Ok(Self {
            path: PathBuf::from(s),
        })
    }
}

impl std::fmt::Display for CaptureTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
