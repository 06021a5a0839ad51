//! Heatmap tile rendering.
//!
//! Implements the per-tile pipeline:
//! - Proximity filtering of points against a projected tile
//! - Triangular-kernel density accumulation
//! - Density to RGBA color ramp
//! - PNG encoding (indexed or RGBA)

pub mod colormap;
pub mod density;
pub mod filter;
pub mod png;
pub mod tile_renderer;

pub use colormap::{heat_color, map_colors, Color};
pub use density::{accumulate, DensityGrid};
pub use filter::filter_points;
pub use tile_renderer::{render_rgba, RenderedTile, TileRenderer};
