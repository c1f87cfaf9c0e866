use std::path::PathBuf;
use tracing::trace;

use crate::scanner::FileEntry;
use crate::transform::Transformer;

/// A single proposed rename.
#[derive(Debug, Clone)]
pub struct RenameItem {
    /// Full path to the source file.
    pub source_path: PathBuf,
    /// Original base name.
    pub source_name: String,
    /// Full path to the destination, in the same directory as the source.
    pub destination_path: PathBuf,
    /// New base name.
    pub destination_name: String,
}

impl RenameItem {
    pub fn new(source_path: PathBuf, destination_name: String) -> Self {
        let source_name = source_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let destination_path = source_path
            .parent()
            .map(|p| p.join(&destination_name))
            .unwrap_or_else(|| PathBuf::from(&destination_name));

        Self {
            source_path,
            source_name,
            destination_path,
            destination_name,
        }
    }
}

/// Ordered list of proposed renames, in enumeration order.
#[derive(Debug, Clone, Default)]
pub struct RenamePlan {
    pub items: Vec<RenameItem>,
}

impl RenamePlan {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Pair every file with its transformed name, dropping no-ops.
///
/// Destination collisions are not resolved here: the filesystem is the only
/// authority on what exists once earlier renames in the same batch start
/// landing, so the executor checks each destination at execution time.
pub fn build_plan(files: &[FileEntry], transformer: &Transformer) -> RenamePlan {
    let mut plan = RenamePlan::default();

    for (ordinal, file) in files.iter().enumerate() {
        let destination = transformer.apply(&file.name, ordinal);

        if destination == file.name {
            trace!(name = %file.name, "Name unchanged, dropped from plan");
            continue;
        }

        plan.items.push(RenameItem::new(file.path.clone(), destination));
    }

    plan
}
