use std::{
    collections::{HashMap, HashSet},
    ffi::OsStr,
};

use super::DiscoveredFile;

/// Returns every file name that occurs more than once in the batch.
///
/// Collisions are global: two `logo.png` files under different source
/// directories still collide.
pub fn find_collisions(files: &[DiscoveredFile]) -> HashSet<&OsStr> {
    let mut counts: HashMap<&OsStr, usize> = HashMap::with_capacity(files.len());
    for file in files {
        *counts.entry(file.name.as_os_str()).or_default() += 1;
    }

    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name)
        .collect()
}
