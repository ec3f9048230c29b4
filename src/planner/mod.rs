//! In-memory planning of a flatten run.
//!
//! Planning never touches the filesystem: it takes the files discovered under
//! the source directories and decides where each one ends up.

mod collisions;
mod mapping;

use std::{
    ffi::{OsStr, OsString},
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use clap::ValueEnum;

use crate::errors::{FlattenError, Result};

pub use collisions::find_collisions;
pub use mapping::build_mappings;

/// A file found somewhere below one of the source directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Source directory the file was discovered under.
    pub parent_dir: PathBuf,
    pub full_path: PathBuf,
    /// Base file name including the extension.
    pub name: OsString,
}

impl DiscoveredFile {
    /// Builds a record for `full_path`, or `None` when the path has no file name.
    pub fn new(parent_dir: impl Into<PathBuf>, full_path: impl Into<PathBuf>) -> Option<Self> {
        let full_path = full_path.into();
        let name = full_path.file_name()?.to_os_string();
        Some(Self {
            parent_dir: parent_dir.into(),
            full_path,
            name,
        })
    }
}

/// A planned move from `old_path` to `new_path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMapping {
    pub old_path: PathBuf,
    pub new_path: PathBuf,
}

impl FileMapping {
    /// True when the file already sits at its destination.
    pub fn is_noop(&self) -> bool {
        self.old_path == self.new_path
    }
}

/// How colliding file names get a unique suffix.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenameStrategy {
    /// Append a random UUID
    #[value(name = "guid", alias = "random")]
    RandomUnique,
    /// Append a zero-padded index, counted per file name
    #[default]
    #[value(name = "index", alias = "sequential")]
    SequentialIndex,
}

impl FromStr for RenameStrategy {
    type Err = FlattenError;

    fn from_str(s: &str) -> Result<Self> {
        <Self as ValueEnum>::from_str(s.trim(), true)
            .map_err(|_| FlattenError::InvalidStrategy(s.to_string()))
    }
}

impl fmt::Display for RenameStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenameStrategy::RandomUnique => f.write_str("guid"),
            RenameStrategy::SequentialIndex => f.write_str("index"),
        }
    }
}

/// Number of digits a sequential index is left-padded to. Always within 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexPadding(u8);

impl IndexPadding {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    pub fn width(self) -> usize {
        self.0 as usize
    }
}

impl Default for IndexPadding {
    fn default() -> Self {
        Self(2)
    }
}

impl TryFrom<u8> for IndexPadding {
    type Error = FlattenError;

    fn try_from(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(FlattenError::InvalidPadding(value))
        }
    }
}

/// Detects collisions across the whole batch and builds one mapping per file.
pub fn plan(
    files: &[DiscoveredFile],
    strategy: RenameStrategy,
    padding: IndexPadding,
) -> Vec<FileMapping> {
    let collisions = find_collisions(files);
    log::debug!(
        "Found {} colliding file names among {} files",
        collisions.len(),
        files.len()
    );
    build_mappings(files, &collisions, strategy, padding)
}

/// Splits a file name into stem and extension the way `Path` does:
/// `report.tar.gz` gives `report.tar` and `gz`, `.env` has no extension.
fn split_name(name: &OsStr) -> (&OsStr, Option<&OsStr>) {
    let path = Path::new(name);
    (path.file_stem().unwrap_or(name), path.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_range() {
        assert!(IndexPadding::try_from(0u8).is_err());
        assert_eq!(IndexPadding::try_from(1u8).unwrap().width(), 1);
        assert_eq!(IndexPadding::try_from(6u8).unwrap().width(), 6);
        assert!(matches!(
            IndexPadding::try_from(7u8),
            Err(FlattenError::InvalidPadding(7))
        ));
        assert_eq!(IndexPadding::default().width(), 2);
    }

    #[test]
    fn test_strategy_tokens() {
        assert_eq!("GUID".parse::<RenameStrategy>().unwrap(), RenameStrategy::RandomUnique);
        assert_eq!("random".parse::<RenameStrategy>().unwrap(), RenameStrategy::RandomUnique);
        assert_eq!("Index".parse::<RenameStrategy>().unwrap(), RenameStrategy::SequentialIndex);
        assert_eq!(
            "sequential".parse::<RenameStrategy>().unwrap(),
            RenameStrategy::SequentialIndex
        );
        assert!(matches!(
            "hash".parse::<RenameStrategy>(),
            Err(FlattenError::InvalidStrategy(token)) if token == "hash"
        ));
    }

    #[test]
    fn test_split_name() {
        let cases = [
            ("x.txt", "x", Some("txt")),
            ("archive.tar.gz", "archive.tar", Some("gz")),
            ("README", "README", None),
            (".env", ".env", None),
        ];
        for (name, stem, ext) in cases {
            let (s, e) = split_name(OsStr::new(name));
            assert_eq!(s, OsStr::new(stem), "stem of {}", name);
            assert_eq!(e, ext.map(OsStr::new), "extension of {}", name);
        }
    }

    #[test]
    fn test_discovered_file_name() {
        let file = DiscoveredFile::new("/src", "/src/sub/photo.png").unwrap();
        assert_eq!(file.name, OsString::from("photo.png"));
        assert_eq!(file.parent_dir, PathBuf::from("/src"));
        assert!(DiscoveredFile::new("/src", "/").is_none());
    }
}
