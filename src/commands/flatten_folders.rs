use std::{
    fs, io,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::{
    cli::preview::{render_preview, PreviewSummary},
    errors::{FlattenError, Result},
    planner::{self, DiscoveredFile, FileMapping, IndexPadding, RenameStrategy},
};

/// Validated settings for one flatten run.
#[derive(Debug, Clone)]
pub struct FlattenOptions {
    pub directories: Vec<PathBuf>,
    pub rename_strategy: RenameStrategy,
    pub padding: IndexPadding,
    pub delete_subdirectories: bool,
    pub dry_run: bool,
}

impl FlattenOptions {
    pub fn new<I, P>(directories: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            directories: directories.into_iter().map(Into::into).collect(),
            rename_strategy: RenameStrategy::default(),
            padding: IndexPadding::default(),
            delete_subdirectories: false,
            dry_run: false,
        }
    }
}

/// Everything found below the source directories.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub source_dirs: Vec<PathBuf>,
    pub files: Vec<DiscoveredFile>,
    pub subdirectory_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlattenOutcome {
    /// Dry run: the rendered preview table, nothing was touched.
    Preview(String),
    Flattened {
        moved: usize,
        unchanged: usize,
        deleted_dirs: usize,
    },
}

/// Fails on the first path that is not an existing directory, or that lies
/// inside (or contains) another source directory.
///
/// The same directory given twice is allowed; discovery walks it once.
pub fn validate_source_dirs(directories: &[PathBuf]) -> Result<()> {
    let mut accepted: Vec<(&PathBuf, PathBuf)> = Vec::with_capacity(directories.len());

    for dir in directories {
        if !dir.is_dir() {
            return Err(FlattenError::DirectoryNotFound(dir.clone()));
        }
        let canonical = fs::canonicalize(dir)?;

        for (other, other_canonical) in &accepted {
            if canonical == *other_canonical {
                continue;
            }
            if canonical.starts_with(other_canonical) {
                return Err(FlattenError::OverlappingSources {
                    outer: (*other).clone(),
                    inner: dir.clone(),
                });
            }
            if other_canonical.starts_with(&canonical) {
                return Err(FlattenError::OverlappingSources {
                    outer: dir.clone(),
                    inner: (*other).clone(),
                });
            }
        }
        accepted.push((dir, canonical));
    }
    Ok(())
}

/// Walks every source directory and collects its files, at any depth.
pub fn discover_files(directories: &[PathBuf]) -> Result<Discovery> {
    let mut discovery = Discovery::default();
    let mut seen: Vec<PathBuf> = Vec::with_capacity(directories.len());

    for dir in directories {
        let canonical = fs::canonicalize(dir)?;
        if seen.contains(&canonical) {
            log::warn!("Skipping duplicate source directory {:?}", dir);
            continue;
        }
        seen.push(canonical);
        discovery.source_dirs.push(dir.clone());

        for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_dir() {
                discovery.subdirectory_count += 1;
            } else if entry.file_type().is_file() {
                match DiscoveredFile::new(dir, entry.path()) {
                    Some(file) => discovery.files.push(file),
                    None => log::warn!("Skipping {:?}: no file name", entry.path()),
                }
            } else {
                log::debug!("Skipping {:?}: not a regular file", entry.path());
            }
        }
    }

    log::info!(
        "Found {} files in {} subdirectories of {} source directories",
        discovery.files.len(),
        discovery.subdirectory_count,
        discovery.source_dirs.len()
    );

    if discovery.files.is_empty() {
        return Err(FlattenError::NoFilesFound);
    }
    Ok(discovery)
}

/// Moves every mapping in order, stopping at the first failure.
///
/// Returns how many files were moved and how many were already in place.
pub fn execute(mappings: &[FileMapping]) -> Result<(usize, usize)> {
    let mut moved = 0;
    let mut unchanged = 0;

    for mapping in mappings {
        if mapping.is_noop() {
            log::debug!("{:?} is already in place", mapping.old_path);
            unchanged += 1;
            continue;
        }
        move_file(&mapping.old_path, &mapping.new_path)?;
        moved += 1;
    }

    Ok((moved, unchanged))
}

fn move_file(from: &Path, to: &Path) -> Result<()> {
    let move_error = |source: io::Error| FlattenError::Move {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };

    // rename silently replaces an existing file on unix
    if to.exists() {
        return Err(move_error(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "destination already exists",
        )));
    }

    log::info!("Moving {:?} to {:?}", from, to);
    fs::rename(from, to).map_err(move_error)
}

/// Removes every immediate subdirectory of each source directory, with its contents.
pub fn delete_subdirectories(source_dirs: &[PathBuf]) -> Result<usize> {
    let mut deleted = 0;
    for dir in source_dirs {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                log::info!("Deleting subdirectory {:?}", entry.path());
                fs::remove_dir_all(entry.path())?;
                deleted += 1;
            }
        }
    }
    Ok(deleted)
}

/// Flattens every source directory in `options`.
///
/// Files from any depth end up directly in the source directory they were
/// found under. Colliding names are renamed with `options.rename_strategy`.
/// In dry-run mode the plan is rendered and the filesystem is left alone.
pub fn flatten_folders(options: &FlattenOptions) -> Result<FlattenOutcome> {
    log::info!("Starting to flatten {} directories", options.directories.len());

    validate_source_dirs(&options.directories)?;
    let discovery = discover_files(&options.directories)?;
    let mappings = planner::plan(&discovery.files, options.rename_strategy, options.padding);

    if options.dry_run {
        let summary = PreviewSummary {
            file_count: discovery.files.len(),
            subdirectory_count: discovery.subdirectory_count,
            delete_subdirectories: options.delete_subdirectories,
        };
        return Ok(FlattenOutcome::Preview(render_preview(
            &mappings,
            &discovery.source_dirs,
            &summary,
        )));
    }

    let (moved, unchanged) = execute(&mappings)?;
    let deleted_dirs = if options.delete_subdirectories {
        delete_subdirectories(&discovery.source_dirs)?
    } else {
        0
    };

    log::info!(
        "Moved {} files ({} already in place), deleted {} subdirectories",
        moved,
        unchanged,
        deleted_dirs
    );
    Ok(FlattenOutcome::Flattened {
        moved,
        unchanged,
        deleted_dirs,
    })
}
