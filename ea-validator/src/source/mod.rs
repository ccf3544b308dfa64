//! Source artifacts and their discovery.
//!
//! Only the filesystem is supported as a source of artifacts; tests build
//! [`SourceArtifact`]s in memory directly.

pub mod fs;

use std::path::PathBuf;

use crate::catalog::SourceDomain;
use crate::error::ScanError;

/// One MQL source file, read for a single scan and then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceArtifact {
    pub path: PathBuf,
    pub domain: SourceDomain,
    pub content: String,
}

impl SourceArtifact {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, domain: SourceDomain, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            domain,
            content: content.into(),
        }
    }
}

/// A file found during discovery, not yet read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub domain: SourceDomain,
}

/// The source files of a project, in path order.
///
/// Contents are read lazily by [`ArtifactSet::iter`], which can be called any
/// number of times; each call re-reads the files.
#[derive(Debug, Clone, Default)]
pub struct ArtifactSet {
    files: Vec<DiscoveredFile>,
    discovery_errors: Vec<ScanError>,
    max_file_size: u64,
}

impl ArtifactSet {
    pub(crate) fn new(
        files: Vec<DiscoveredFile>,
        discovery_errors: Vec<ScanError>,
        max_file_size: u64,
    ) -> Self {
        Self {
            files,
            discovery_errors,
            max_file_size,
        }
    }

    #[must_use]
    pub fn files(&self) -> &[DiscoveredFile] {
        &self.files
    }

    /// Discovery errors first, then every file in path order, read on demand.
    pub fn iter(&self) -> impl Iterator<Item = Result<SourceArtifact, ScanError>> + '_ {
        self.discovery_errors
            .iter()
            .cloned()
            .map(Err)
            .chain(self.files.iter().map(|file| {
                fs::read_file_bounded(&file.path, self.max_file_size)
                    .map(|content| SourceArtifact::new(file.path.clone(), file.domain, content))
            }))
    }
}
