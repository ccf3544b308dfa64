//! Scan-level error types.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::finding::{Finding, Severity};

/// Rule id attached to findings created from scan errors.
pub const SCAN_UNREADABLE_RULE: &str = "scan.unreadable";

/// The kind of scan-level failure that prevented a file from being checked.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScanErrorKind {
    /// An I/O error occurred while reading the file.
    IoError,
    /// The file exceeded the configured maximum size limit.
    FileTooLarge,
    /// The content is neither UTF-8 nor BOM-marked UTF-16.
    InvalidEncoding,
    /// The resolved path is outside the project root (symlink escape).
    OutsideProject,
    /// A directory traversal error (permission denied, loop detected, etc.).
    WalkError,
    /// An exclude glob pattern could not be parsed.
    InvalidExcludePattern,
}

/// A source file (or exclude pattern) that could not be checked at all.
///
/// Distinct from a rule violation: the rules never saw the file. Each scan
/// error is reported as a `scan.unreadable` error finding so an incomplete
/// scan can never pass silently.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Error)]
#[error("{}: {message}", .file.display())]
#[non_exhaustive]
pub struct ScanError {
    pub file: PathBuf,
    pub kind: ScanErrorKind,
    pub message: String,
}

impl ScanError {
    #[must_use]
    pub fn new(file: PathBuf, kind: ScanErrorKind, message: impl Into<String>) -> Self {
        Self {
            file,
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn into_finding(self) -> Finding {
        Finding::new(
            SCAN_UNREADABLE_RULE,
            Severity::Error,
            self.file.display().to_string(),
            self.message,
        )
    }
}
