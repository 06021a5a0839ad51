//! Tile rendering pipeline.
//!
//! `render` turns a tile address plus a point snapshot into a PNG, persisted
//! to disk and returned to the caller:
//!
//! 1. validate the address
//! 2. convert the snapshot to radians (non-finite points dropped)
//! 3. project the tile's 256×256 sample grid
//! 4. filter points that cannot reach the tile
//! 5. accumulate density, map to RGBA, encode, persist
//!
//! A tile no point can influence short-circuits after step 4 and resolves
//! to the shared transparent placeholder.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument};

use heatmap_common::{HeatmapResult, LatLonRad, PointSnapshot, TileCoord, TILE_SIZE};
use projection::project_tile;
use storage::{TileArtifact, TileStore};

use crate::colormap::map_colors;
use crate::density::accumulate;
use crate::filter::filter_points;
use crate::png;

/// A finished render: where the tile lives on disk and the bytes encoded
/// for this request.
///
/// Callers serve `png` directly. Re-reading `artifact` could return a newer
/// render of the same address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTile {
    pub artifact: TileArtifact,
    pub png: Vec<u8>,
}

impl RenderedTile {
    pub fn path(&self) -> &Path {
        self.artifact.path()
    }

    pub fn is_placeholder(&self) -> bool {
        self.artifact.is_placeholder()
    }
}

/// Renders heatmap tiles into a [`TileStore`].
#[derive(Debug, Clone)]
pub struct TileRenderer {
    store: TileStore,
    placeholder_png: Arc<Vec<u8>>,
}

impl TileRenderer {
    /// Create a renderer and make sure the placeholder tile exists on disk.
    pub fn new(store: TileStore) -> HeatmapResult<Self> {
        let placeholder_png = store.ensure_placeholder(&png::transparent_tile()?)?;
        Ok(Self {
            store,
            placeholder_png: Arc::new(placeholder_png),
        })
    }

    pub fn store(&self) -> &TileStore {
        &self.store
    }

    /// Render tile `z/x/y` from `snapshot`.
    ///
    /// Fails with `InvalidTileAddress` before any work is done when the
    /// address is out of range.
    pub fn render(
        &self,
        z: u32,
        x: u32,
        y: u32,
        snapshot: &PointSnapshot,
    ) -> HeatmapResult<RenderedTile> {
        let coord = TileCoord::new(z, x, y)?;
        self.render_tile(&coord, snapshot)
    }

    /// Render an already validated tile address.
    #[instrument(skip(self, snapshot), fields(tile = %coord, generation = snapshot.generation))]
    pub fn render_tile(
        &self,
        coord: &TileCoord,
        snapshot: &PointSnapshot,
    ) -> HeatmapResult<RenderedTile> {
        let start = Instant::now();
        let (points, dropped) = snapshot.to_radians();

        let Some(pixels) = render_rgba(coord, &points) else {
            debug!(
                points = points.len(),
                dropped = dropped,
                "No points influence tile, using placeholder"
            );
            return Ok(RenderedTile {
                artifact: self.store.placeholder(),
                png: self.placeholder_png.as_ref().clone(),
            });
        };

        let encoded = png::create_png_auto(&pixels, TILE_SIZE, TILE_SIZE)?;
        let artifact = self.store.write_tile(coord, &encoded)?;

        info!(
            bytes = encoded.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Rendered tile"
        );
        Ok(RenderedTile {
            artifact,
            png: encoded,
        })
    }
}

/// Compute the RGBA pixels for a tile.
///
/// Returns `None` when no point survives the proximity filter.
pub fn render_rgba(coord: &TileCoord, points: &[LatLonRad]) -> Option<Vec<u8>> {
    let grid = project_tile(coord);
    let relevant = filter_points(&grid, points);
    if relevant.is_empty() {
        return None;
    }

    debug!(total = points.len(), relevant = relevant.len(), "Filtered points");
    let density = accumulate(&grid, &relevant);
    Some(map_colors(&density))
}
