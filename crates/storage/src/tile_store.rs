//! Filesystem tile store with atomic writes.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use heatmap_common::{HeatmapError, HeatmapResult, TileCoord};

/// File extension of persisted tiles.
pub const TILE_EXTENSION: &str = "png";

/// Reference to a tile image on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileArtifact {
    /// A freshly rendered tile at its deterministic path.
    Rendered(PathBuf),
    /// The shared transparent placeholder (no point influences the tile).
    Placeholder(PathBuf),
}

impl TileArtifact {
    pub fn path(&self) -> &Path {
        match self {
            TileArtifact::Rendered(p) | TileArtifact::Placeholder(p) => p,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, TileArtifact::Placeholder(_))
    }
}

/// Tile storage rooted at a directory.
#[derive(Debug, Clone)]
pub struct TileStore {
    root: PathBuf,
    placeholder: PathBuf,
}

impl TileStore {
    /// Create a store rooted at `root` with the placeholder at `root/placeholder_name`.
    ///
    /// Nothing is touched on disk until [`TileStore::ensure_placeholder`] or a write.
    pub fn new(root: impl Into<PathBuf>, placeholder_name: &str) -> Self {
        let root = root.into();
        let placeholder = root.join(placeholder_name);
        Self { root, placeholder }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn placeholder_path(&self) -> &Path {
        &self.placeholder
    }

    /// Deterministic path for a tile: `{root}/{z}/{x}/{y}.png`.
    pub fn tile_path(&self, coord: &TileCoord) -> PathBuf {
        self.root
            .join(coord.z.to_string())
            .join(coord.x.to_string())
            .join(format!("{}.{}", coord.y, TILE_EXTENSION))
    }

    /// Write the placeholder image if it does not exist yet.
    ///
    /// Returns the placeholder bytes as they are on disk.
    pub fn ensure_placeholder(&self, png: &[u8]) -> HeatmapResult<Vec<u8>> {
        if self.placeholder.is_file() {
            debug!(path = %self.placeholder.display(), "Placeholder tile already present");
            return Ok(fs::read(&self.placeholder)?);
        }
        write_atomic(&self.placeholder, png)?;
        info!(path = %self.placeholder.display(), "Wrote placeholder tile");
        Ok(png.to_vec())
    }

    /// Persist an encoded tile, replacing any previous version.
    pub fn write_tile(&self, coord: &TileCoord, png: &[u8]) -> HeatmapResult<TileArtifact> {
        let path = self.tile_path(coord);
        write_atomic(&path, png)?;
        debug!(tile = %coord, path = %path.display(), bytes = png.len(), "Persisted tile");
        Ok(TileArtifact::Rendered(path))
    }

    /// Reference to the placeholder artifact.
    pub fn placeholder(&self) -> TileArtifact {
        TileArtifact::Placeholder(self.placeholder.clone())
    }
}

/// Write `bytes` to `path` via a sibling temp file and an atomic rename.
///
/// Missing parent directories are created. On failure the temp file is
/// removed and `path` is left as it was.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> HeatmapResult<()> {
    let dir = path.parent().ok_or_else(|| {
        HeatmapError::Persistence(format!("{} has no parent directory", path.display()))
    })?;

    fs::create_dir_all(dir).map_err(|e| {
        HeatmapError::Persistence(format!("Failed to create {}: {}", dir.display(), e))
    })?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| {
        HeatmapError::Persistence(format!("Failed to create temp file in {}: {}", dir.display(), e))
    })?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    tmp.persist(path).map_err(|e| {
        HeatmapError::Persistence(format!("Failed to rename into {}: {}", path.display(), e.error))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_path_layout() {
        let store = TileStore::new("files", "empty.png");
        let coord = TileCoord::new(12, 2476, 1280).unwrap();
        assert_eq!(
            store.tile_path(&coord),
            PathBuf::from("files").join("12").join("2476").join("1280.png")
        );
        assert_eq!(store.placeholder_path(), Path::new("files/empty.png"));
    }

    #[test]
    fn test_artifact_accessors() {
        let a = TileArtifact::Placeholder(PathBuf::from("files/empty.png"));
        assert!(a.is_placeholder());
        assert_eq!(a.path(), Path::new("files/empty.png"));

        let b = TileArtifact::Rendered(PathBuf::from("files/1/0/0.png"));
        assert!(!b.is_placeholder());
    }
}
