use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T, E = FlattenError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum FlattenError {
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Source directories overlap: {} contains {}", .outer.display(), .inner.display())]
    OverlappingSources { outer: PathBuf, inner: PathBuf },

    #[error("No files found, terminating.")]
    NoFilesFound,

    #[error("Invalid index zero padding {0}: must be between 1 and 6")]
    InvalidPadding(u8),

    #[error("Invalid rename strategy '{0}': expected 'guid' or 'index'")]
    InvalidStrategy(String),

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to move {} to {}: {source}", .from.display(), .to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
