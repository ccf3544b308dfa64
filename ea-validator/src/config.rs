//! Settings of the source scanner itself (not the EA parameter file).

/// Filesystem options for source discovery.
///
/// The project root is passed separately; sources are looked up under
/// `<root>/src`, and files under `<root>/src/indicators` are treated as
/// indicators.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ScanConfig {
    /// Exclude patterns (glob format), matched against the full path and the file name.
    pub exclude: Vec<String>,
    /// Maximum file size in bytes (default: 10 MB).
    pub max_file_size: u64,
    /// Whether to follow symbolic links (default: `false`).
    ///
    /// Even when enabled, files resolving outside the project root are rejected.
    pub follow_links: bool,
    /// Maximum directory traversal depth (default: 64).
    pub max_depth: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            max_file_size: 10_485_760,
            follow_links: false,
            max_depth: 64,
        }
    }
}
