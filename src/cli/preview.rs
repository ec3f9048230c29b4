use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use crate::planner::FileMapping;

const OLD_HEADER: &str = "Old file";
const NEW_HEADER: &str = "New file";

/// Counts shown above the preview table.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewSummary {
    pub file_count: usize,
    pub subdirectory_count: usize,
    pub delete_subdirectories: bool,
}

/// Display form of `path`, with the first matching source directory
/// replaced by its `[Parent i]` label.
pub fn display_path(path: &Path, source_dirs: &[PathBuf]) -> String {
    source_dirs
        .iter()
        .enumerate()
        .find_map(|(ix, dir)| {
            let rest = path.strip_prefix(dir).ok()?;
            Some(if rest.as_os_str().is_empty() {
                format!("[Parent {}]", ix)
            } else {
                format!("[Parent {}]{}{}", ix, MAIN_SEPARATOR, rest.display())
            })
        })
        .unwrap_or_else(|| path.display().to_string())
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

/// Renders the dry-run report: a summary, the parent labels and a two-column
/// table of old and new locations. The mappings themselves are not modified.
pub fn render_preview(
    mappings: &[FileMapping],
    source_dirs: &[PathBuf],
    summary: &PreviewSummary,
) -> String {
    let rows: Vec<(String, String)> = mappings
        .iter()
        .map(|m| {
            (
                display_path(&m.old_path, source_dirs),
                display_path(&m.new_path, source_dirs),
            )
        })
        .collect();

    let old_width = rows
        .iter()
        .map(|(old, _)| old.chars().count())
        .fold(OLD_HEADER.len(), usize::max);
    let new_width = rows
        .iter()
        .map(|(_, new)| new.chars().count())
        .fold(NEW_HEADER.len(), usize::max);

    let dir_count = source_dirs.len();
    let deleted = if summary.delete_subdirectories {
        " and all sub-directories would be deleted."
    } else {
        ""
    };
    let labels: String = source_dirs
        .iter()
        .enumerate()
        .map(|(ix, dir)| format!("[Parent {}] = {}\n", ix, dir.display()))
        .collect();

    let mut out = format!(
        "\n{} {} would be moved from {} {} into {} {}{}\n\n\
         The following table shows file moves where:\n\n\
         {}\n",
        summary.file_count,
        plural(summary.file_count, "file", "files"),
        summary.subdirectory_count,
        plural(summary.subdirectory_count, "subdirectory", "subdirectories"),
        dir_count,
        plural(dir_count, "parent directory", "parent directories"),
        deleted,
        labels,
    );

    let border = format!("|={}==={}=|\n", "=".repeat(old_width), "=".repeat(new_width));
    out.push_str(&border);
    out.push_str(&format!("| {:<old_width$} | {:<new_width$} |\n", OLD_HEADER, NEW_HEADER));
    out.push_str(&format!("|-{}---{}-|\n", "-".repeat(old_width), "-".repeat(new_width)));
    for (old, new) in &rows {
        out.push_str(&format!("| {:<old_width$} | {:<new_width$} |\n", old, new));
    }
    out.push_str(&border);

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(old: &str, new: &str) -> FileMapping {
        FileMapping {
            old_path: PathBuf::from(old),
            new_path: PathBuf::from(new),
        }
    }

    #[test]
    fn test_display_path_labels_parents_in_order() {
        let dirs = vec![PathBuf::from("/data/videos"), PathBuf::from("/data/music/")];

        assert_eq!(
            display_path(Path::new("/data/videos/a/clip.mp4"), &dirs),
            format!("[Parent 0]{}a/clip.mp4", MAIN_SEPARATOR)
        );
        assert_eq!(
            display_path(Path::new("/data/music/song.mp3"), &dirs),
            format!("[Parent 1]{}song.mp3", MAIN_SEPARATOR)
        );
        assert_eq!(display_path(Path::new("/data/music"), &dirs), "[Parent 1]");
        assert_eq!(display_path(Path::new("/elsewhere/x"), &dirs), "/elsewhere/x");
    }

    #[test]
    fn test_render_preview_table() {
        let dirs = vec![PathBuf::from("/v"), PathBuf::from("/m")];
        let mappings = vec![
            mapping("/v/sub/x.txt", "/v/x_01.txt"),
            mapping("/m/deep/x.txt", "/m/x_02.txt"),
        ];
        let summary = PreviewSummary {
            file_count: 2,
            subdirectory_count: 1,
            delete_subdirectories: true,
        };

        let table = render_preview(&mappings, &dirs, &summary);

        assert!(table.contains(
            "2 files would be moved from 1 subdirectory into 2 parent directories and all sub-directories would be deleted."
        ));
        assert!(table.contains("[Parent 0] = /v\n"));
        assert!(table.contains("[Parent 1] = /m\n"));
        assert!(table.contains(&format!("| {:<21} | {:<19} |\n", "Old file", "New file")));
        assert!(table.contains("| [Parent 1]/deep/x.txt | [Parent 1]/x_02.txt |\n"));

        let lines: Vec<&str> = table.lines().filter(|l| l.starts_with('|')).collect();
        assert_eq!(lines.len(), 6);
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
    }

    #[test]
    fn test_render_preview_full_report() {
        let dirs = vec![PathBuf::from("/v")];
        let mappings = vec![mapping("/v/a/b.txt", "/v/b.txt")];
        let summary = PreviewSummary {
            file_count: 1,
            subdirectory_count: 1,
            delete_subdirectories: false,
        };

        let expected = [
            "",
            "1 file would be moved from 1 subdirectory into 1 parent directory",
            "",
            "The following table shows file moves where:",
            "",
            "[Parent 0] = /v",
            "",
            "|=======================================|",
            "| Old file           | New file         |",
            "|---------------------------------------|",
            "| [Parent 0]/a/b.txt | [Parent 0]/b.txt |",
            "|=======================================|",
        ];

        let table = render_preview(&mappings, &dirs, &summary);

        assert_eq!(table, expected.join("\n") + "\n");
    }

    #[test]
    fn test_render_preview_leaves_mappings_alone() {
        let dirs = vec![PathBuf::from("/v")];
        let mappings = vec![mapping("/v/a/b.txt", "/v/b.txt")];
        let before = mappings.clone();

        let table = render_preview(&mappings, &dirs, &PreviewSummary::default());

        assert_eq!(mappings, before);
        assert!(table.contains("0 files would be moved from 0 subdirectories into 1 parent directory\n"));
    }
}
