//! Temporary directories and scratch files for tests.

use std::path::{Path, PathBuf};

use heatmap_common::LatLonDeg;

/// Creates a temporary directory for test output.
///
/// The directory is automatically cleaned up when the returned `TempDir` is dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}

/// Creates a temporary directory with a specific prefix.
pub fn temp_test_dir_with_prefix(prefix: &str) -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("Failed to create temporary test directory")
}

/// Writes `points` as a JSON array of `[lat, lon]` pairs into `dir`.
///
/// Returns the path of the written file.
pub fn write_points_file(dir: &Path, name: &str, points: &[LatLonDeg]) -> PathBuf {
    let pairs: Vec<[f64; 2]> = points.iter().map(|p| [p.lat, p.lon]).collect();
    let path = dir.join(name);
    let body = serde_json::to_vec(&pairs).expect("Failed to serialize points");
    std::fs::write(&path, body).expect("Failed to write points file");
    path
}

/// Recursively counts regular files under `dir`.
pub fn count_files(dir: &Path) -> usize {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .flatten()
        .map(|e| {
            let path = e.path();
            if path.is_dir() {
                count_files(&path)
            } else {
                1
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_test_dir() {
        let dir = temp_test_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_temp_test_dir_with_prefix() {
        let dir = temp_test_dir_with_prefix("heatmap_test_");
        let path_str = dir.path().to_string_lossy();
        assert!(path_str.contains("heatmap_test_"));
    }

    #[test]
    fn test_write_points_file() {
        let dir = temp_test_dir();
        let path = write_points_file(dir.path(), "pts.json", &[LatLonDeg::new(1.5, -2.0)]);
        let body = std::fs::read_to_string(path).unwrap();
        assert_eq!(body, "[[1.5,-2.0]]");
    }

    #[test]
    fn test_count_files_nested() {
        let dir = temp_test_dir();
        std::fs::create_dir_all(dir.path().join("a/b")).unwrap();
        std::fs::write(dir.path().join("top.txt"), b"x").unwrap();
        std::fs::write(dir.path().join("a/b/inner.txt"), b"y").unwrap();
        assert_eq!(count_files(dir.path()), 2);
        assert_eq!(count_files(&dir.path().join("missing")), 0);
    }
}
