use std::path::PathBuf;
use thiserror::Error;

use crate::scanner::ScannerError;
use crate::transform::PatternError;

/// Fatal, run-level failures.
///
/// Everything here is detected before any filesystem mutation, except
/// `Aborted`, which stops the run at the user's request. Per-item collision
/// skips and rename failures never escalate to this type; the executor
/// counts them and moves on.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Directory does not exist: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("No pattern specified")]
    NoPattern,

    #[error("{0}")]
    PatternCompile(#[from] PatternError),

    #[error("Failed to scan directory: {0}")]
    Scan(ScannerError),

    #[error("Aborted by user")]
    Aborted,
}

impl AppError {
    /// Validation errors and user aborts share exit code 1; success paths
    /// and graceful no-ops exit 0.
    pub fn exit_code(&self) -> i32 {
        1
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::DirectoryNotFound { path } => {
                format!(
                    "The directory does not exist:\n  {}\n\n\
                     Please verify the path and try again.",
                    path.display()
                )
            }

            AppError::NotADirectory { path } => {
                format!(
                    "The path is not a directory:\n  {}\n\n\
                     Please provide a valid directory path.",
                    path.display()
                )
            }

            AppError::NoPattern => "No renaming mode selected.\n\
                 Provide <pattern> <replacement>, or one of the built-in mode flags.\n\
                 Use --help for usage information."
                .to_string(),

            AppError::PatternCompile(err) => {
                format!(
                    "The pattern failed to compile:\n  {err}\n\n\
                     Check the regular expression syntax and try again.\n\
                     No files were renamed."
                )
            }

            AppError::Scan(err) => {
                format!("Failed to scan the directory:\n  {err}")
            }

            AppError::Aborted => "Aborted by user".to_string(),
        }
    }
}

impl From<ScannerError> for AppError {
    fn from(err: ScannerError) -> Self {
        match err {
            ScannerError::PathNotFound(path) => AppError::DirectoryNotFound { path },
            ScannerError::NotADirectory(path) => AppError::NotADirectory { path },
            other => AppError::Scan(other),
        }
    }
}
