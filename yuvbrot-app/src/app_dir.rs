//! Directory where the executable lives. Preferences and snapshots are kept
//! next to the app so a copied executable carries its own data.

use std::path::{Path, PathBuf};

/// Directory containing the running executable. Falls back to current directory if unavailable.
pub fn exe_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Directory for exported snapshots.
pub fn images_directory() -> PathBuf {
    exe_directory().join("images")
}

/// First `name_NNNN.ext` in `dir` that does not exist yet.
pub fn unique_path(dir: &Path, name: &str, ext: &str) -> PathBuf {
    for i in 1..10000 {
        let candidate = dir.join(format!("{name}_{i:04}.{ext}"));
        if !candidate.exists() {
            return candidate;
        }
    }
    dir.join(format!("{name}_latest.{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_path_skips_existing_files() {
        let dir = std::env::temp_dir().join(format!("yuvbrot_unique_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let first = unique_path(&dir, "snap", "png");
        assert_eq!(first.file_name().unwrap(), "snap_0001.png");
        std::fs::write(&first, b"x").unwrap();
        let second = unique_path(&dir, "snap", "png");
        assert_eq!(second.file_name().unwrap(), "snap_0002.png");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
