use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read directory: {0}")]
    Io(#[from] walkdir::Error),
}

/// A regular file found under the scan root.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Base name, including extension.
    pub name: String,
    /// Full path as walked from the root.
    pub path: PathBuf,
}

impl FileEntry {
    pub fn new(name: String, path: PathBuf) -> Self {
        Self { name, path }
    }
}

/// List the regular files under `root`, sorted by full path.
///
/// Non-recursive mode inspects only direct children. Symlinks are not
/// followed, so directories, symlinked directories, and special files never
/// appear in the result. Hidden entries are skipped, and in recursive mode
/// hidden directories are pruned from the walk entirely. An `extension`
/// filter matches the final extension exactly; a leading dot on the filter
/// is tolerated. Zero matches is a valid outcome, not an error.
pub fn scan_files(
    root: &Path,
    extension: Option<&str>,
    recursive: bool,
) -> Result<Vec<FileEntry>, ScannerError> {
    debug!(path = ?root, recursive, "Scanning for files");

    if !root.exists() {
        return Err(ScannerError::PathNotFound(root.to_path_buf()));
    }

    if !root.is_dir() {
        return Err(ScannerError::NotADirectory(root.to_path_buf()));
    }

    let wanted = extension.map(|e| e.trim_start_matches('.'));
    let max_depth = if recursive { usize::MAX } else { 1 };

    let mut entries = Vec::new();

    let walker = WalkDir::new(root)
        .max_depth(max_depth)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                if err.io_error().map(|e| e.kind())
                    == Some(std::io::ErrorKind::PermissionDenied)
                {
                    return Err(ScannerError::PermissionDenied(path));
                }
                return Err(ScannerError::Io(err));
            }
        };

        if !entry.file_type().is_file() {
            trace!(path = ?entry.path(), "Skipping non-file entry");
            continue;
        }

        if let Some(want) = wanted {
            let ext = entry.path().extension().and_then(|e| e.to_str());
            if ext != Some(want) {
                trace!(path = ?entry.path(), "Extension filtered out");
                continue;
            }
        }

        let name = entry.file_name().to_string_lossy().to_string();
        trace!(name = %name, "Found file");
        entries.push(FileEntry::new(name, entry.into_path()));
    }

    entries.sort_by(|a, b| a.path.as_os_str().cmp(b.path.as_os_str()));

    debug!(count = entries.len(), "Scan complete");

    Ok(entries)
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}
