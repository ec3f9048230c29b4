use std::{
    collections::{HashMap, HashSet},
    ffi::{OsStr, OsString},
};

use uuid::Uuid;

use super::{split_name, DiscoveredFile, FileMapping, IndexPadding, RenameStrategy};

/// Renames issued so far per original file name. Lives for one build call.
type DuplicateIndexTracker<'a> = HashMap<&'a OsStr, u32>;

/// Builds one mapping per file, in input order.
///
/// Files whose name is not in `collisions` keep their name. Colliding files
/// get a suffix chosen by `strategy`. Every destination sits directly in the
/// source directory the file was discovered under.
pub fn build_mappings(
    files: &[DiscoveredFile],
    collisions: &HashSet<&OsStr>,
    strategy: RenameStrategy,
    padding: IndexPadding,
) -> Vec<FileMapping> {
    let mut tracker = DuplicateIndexTracker::new();

    files
        .iter()
        .map(|file| {
            let name = file.name.as_os_str();
            let new_name = if collisions.contains(name) {
                match strategy {
                    RenameStrategy::RandomUnique => {
                        suffixed(name, &Uuid::new_v4().hyphenated().to_string())
                    }
                    RenameStrategy::SequentialIndex => {
                        let index = tracker.entry(name).and_modify(|i| *i += 1).or_insert(1);
                        suffixed(name, &format!("{:0width$}", index, width = padding.width()))
                    }
                }
            } else {
                name.to_os_string()
            };

            let mapping = FileMapping {
                old_path: file.full_path.clone(),
                new_path: file.parent_dir.join(&new_name),
            };
            log::debug!("Planned {:?} -> {:?}", mapping.old_path, mapping.new_path);
            mapping
        })
        .collect()
}

/// `{stem}_{suffix}{.ext}`
fn suffixed(name: &OsStr, suffix: &str) -> OsString {
    let (stem, extension) = split_name(name);
    let mut renamed = OsString::with_capacity(name.len() + suffix.len() + 1);
    renamed.push(stem);
    renamed.push("_");
    renamed.push(suffix);
    if let Some(extension) = extension {
        renamed.push(".");
        renamed.push(extension);
    }
    renamed
}
