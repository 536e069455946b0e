//! Path utilities: expand ~, base file names, report locations.

use std::path::{Path, PathBuf};

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Base file name of `path` with every space removed.
/// This is the `Source_File` half of the dedupe key.
pub fn source_file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().replace(' ', ""))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_file_name_drops_directories_and_spaces() {
        let p = Path::new("/data/time cards/March Timecard 2024.xlsx");
        assert_eq!(source_file_name(p), "MarchTimecard2024.xlsx");
    }

    #[test]
    fn relative_paths_are_left_alone() {
        assert_eq!(expand_tilde("reports/a.pdf"), PathBuf::from("reports/a.pdf"));
    }
}
