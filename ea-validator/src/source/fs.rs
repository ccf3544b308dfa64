//! Filesystem discovery of MQL sources.
//!
//! Security properties enforced here:
//! - Symlinks are not followed by default (`follow_links: false`)
//! - Resolved paths are checked to remain within the project root
//! - Device files, pipes, and sockets are skipped
//! - Maximum directory depth is enforced to prevent infinite recursion
//! - Bounded reads cap memory use per file

use std::io::Read;
use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use super::{ArtifactSet, DiscoveredFile};
use crate::catalog::SourceDomain;
use crate::config::ScanConfig;
use crate::error::{ScanError, ScanErrorKind};

/// Directory holding all sources, relative to the project root.
pub const SOURCE_DIR: &str = "src";

/// Directory holding indicators, relative to [`SOURCE_DIR`].
pub const INDICATOR_DIR: &str = "indicators";

/// Directories to skip
pub const SKIP_DIRS: &[&str] = &["target", "node_modules", ".git"];

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Check if a path matches any of the exclude patterns
fn matches_exclude(path: &Path, exclude_patterns: &[Pattern]) -> bool {
    let path_str = path.to_string_lossy();
    exclude_patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
    })
}

/// Returns `true` if the entry should be **included** (i.e., is NOT a skip dir).
fn is_not_skip_dir(entry: &walkdir::DirEntry) -> bool {
    if entry.file_type().is_dir()
        && let Some(name) = entry.file_name().to_str()
    {
        return !SKIP_DIRS.contains(&name);
    }
    true
}

/// MQL4/MQL5 program files.
fn is_mql_source(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("mq4" | "mq5")
    )
}

fn domain_for(path: &Path, indicator_root: &Path) -> SourceDomain {
    if path.starts_with(indicator_root) {
        SourceDomain::Indicator
    } else {
        SourceDomain::Strategy
    }
}

fn compile_excludes(patterns: &[String], scan_errors: &mut Vec<ScanError>) -> Vec<Pattern> {
    let mut compiled = Vec::with_capacity(patterns.len());
    for pat_str in patterns {
        match Pattern::new(pat_str) {
            Ok(pat) => compiled.push(pat),
            Err(e) => scan_errors.push(ScanError::new(
                PathBuf::from(pat_str),
                ScanErrorKind::InvalidExcludePattern,
                format!("Invalid exclude glob pattern '{pat_str}': {e}"),
            )),
        }
    }
    compiled
}

/// A symlinked file may point anywhere; only accept what resolves inside the project.
fn ensure_inside(file_path: &Path, canonical_root: &Path) -> Result<(), ScanError> {
    let canonical_path = file_path.canonicalize().map_err(|e| {
        ScanError::new(
            file_path.to_path_buf(),
            ScanErrorKind::IoError,
            format!("Failed to canonicalize path: {e}"),
        )
    })?;
    if canonical_path.starts_with(canonical_root) {
        return Ok(());
    }
    Err(ScanError::new(
        file_path.to_path_buf(),
        ScanErrorKind::OutsideProject,
        format!(
            "Path resolves outside project root: {} -> {}",
            file_path.display(),
            canonical_path.display()
        ),
    ))
}

/// Find the MQL sources of a project.
///
/// A project without a `src/` directory has nothing to check and yields an
/// empty set. Walk errors and boundary violations are kept in the set and
/// surface as scan errors when it is iterated.
#[must_use]
pub fn discover(project_root: &Path, config: &ScanConfig) -> ArtifactSet {
    let source_root = project_root.join(SOURCE_DIR);
    if !source_root.is_dir() {
        tracing::debug!(path = %source_root.display(), "source directory absent, nothing to scan");
        return ArtifactSet::new(Vec::new(), Vec::new(), config.max_file_size);
    }
    let indicator_root = source_root.join(INDICATOR_DIR);

    let mut files = Vec::new();
    let mut scan_errors = Vec::new();
    let exclude_patterns = compile_excludes(&config.exclude, &mut scan_errors);

    let canonical_root = match project_root.canonicalize() {
        Ok(r) => r,
        Err(e) => {
            scan_errors.push(ScanError::new(
                project_root.to_path_buf(),
                ScanErrorKind::IoError,
                format!("Failed to canonicalize project root: {e}"),
            ));
            return ArtifactSet::new(files, scan_errors, config.max_file_size);
        }
    };

    for entry_result in WalkDir::new(&source_root)
        .follow_links(config.follow_links)
        .max_depth(config.max_depth)
        .into_iter()
        .filter_entry(is_not_skip_dir)
    {
        let entry = match entry_result {
            Ok(e) => e,
            Err(walk_err) => {
                let path = walk_err
                    .path()
                    .map_or_else(|| source_root.clone(), Path::to_path_buf);
                scan_errors.push(ScanError::new(
                    path,
                    ScanErrorKind::WalkError,
                    format!("Directory traversal error: {walk_err}"),
                ));
                continue;
            }
        };

        let file_path = entry.path();
        if !file_path.is_file() || !is_mql_source(file_path) {
            continue;
        }

        if let Err(e) = ensure_inside(file_path, &canonical_root) {
            scan_errors.push(e);
            continue;
        }

        // Skip devices, pipes, sockets: only regular files
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileTypeExt;
            if let Ok(ft) = entry.metadata().map(|m| m.file_type())
                && (ft.is_block_device() || ft.is_char_device() || ft.is_fifo() || ft.is_socket())
            {
                continue;
            }
        }

        if matches_exclude(file_path, &exclude_patterns) {
            tracing::debug!(path = %file_path.display(), "excluded");
            continue;
        }

        files.push(DiscoveredFile {
            path: file_path.to_path_buf(),
            domain: domain_for(file_path, &indicator_root),
        });
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    files.dedup_by(|a, b| a.path == b.path);
    tracing::info!(
        files = files.len(),
        errors = scan_errors.len(),
        root = %source_root.display(),
        "discovered MQL sources"
    );
    ArtifactSet::new(files, scan_errors, config.max_file_size)
}

/// Decode MQL source bytes. MetaEditor saves either UTF-8 or BOM-marked UTF-16LE.
fn decode_source(bytes: &[u8]) -> Option<String> {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        return String::from_utf8(rest.to_vec()).ok();
    }
    if let Some(rest) = bytes.strip_prefix(UTF16_LE_BOM) {
        return decode_utf16(rest, u16::from_le_bytes);
    }
    if let Some(rest) = bytes.strip_prefix(UTF16_BE_BOM) {
        return decode_utf16(rest, u16::from_be_bytes);
    }
    String::from_utf8(bytes.to_vec()).ok()
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units = bytes.chunks_exact(2).map(|pair| to_unit([pair[0], pair[1]]));
    char::decode_utf16(units).collect::<Result<String, _>>().ok()
}

/// Read a file using a bounded streaming read, enforcing `max_file_size`.
///
/// # Errors
///
/// Returns a [`ScanError`] if the file exceeds `max_file_size`, an I/O
/// error occurs, or the content cannot be decoded as text.
pub fn read_file_bounded(path: &Path, max_file_size: u64) -> Result<String, ScanError> {
    let file = std::fs::File::open(path).map_err(|e| {
        ScanError::new(
            path.to_owned(),
            ScanErrorKind::IoError,
            format!("Failed to open file: {e}"),
        )
    })?;

    // Read at most max_file_size + 1 bytes to detect oversized files
    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|e| {
            ScanError::new(
                path.to_owned(),
                ScanErrorKind::IoError,
                format!("Failed to read file: {e}"),
            )
        })?;

    if buffer.len() as u64 > max_file_size {
        return Err(ScanError::new(
            path.to_owned(),
            ScanErrorKind::FileTooLarge,
            format!("File exceeds maximum size of {max_file_size} bytes"),
        ));
    }

    decode_source(&buffer).ok_or_else(|| {
        ScanError::new(
            path.to_owned(),
            ScanErrorKind::InvalidEncoding,
            "File is neither UTF-8 nor BOM-marked UTF-16",
        )
    })
}
