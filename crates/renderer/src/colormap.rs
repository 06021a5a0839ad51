//! Density-to-color transfer function for heatmap tiles.
//!
//! A fixed blue → green → yellow → red palette built from clamped linear
//! ramps, with alpha proportional to density and capped at `MAX_ALPHA`:
//!
//! ```text
//! r = clamp(x < 0.7 ? 4x − 1.5 : −4x + 4.5, 0, 1)
//! g = clamp(x < 0.5 ? 4x − 0.5 : −4x + 3.5, 0, 1)
//! b = clamp(x < 0.3 ? 4x + 0.5 : −4x + 2.5, 0, 1)
//! a = clamp(2x, 0, MAX_ALPHA)
//! ```

use rayon::prelude::*;

use heatmap_common::{MAX_ALPHA, TILE_SIZE};

use crate::density::DensityGrid;

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Scale a unit-interval channel to 8 bits, rounding to nearest.
#[inline]
fn to_byte(v: f64) -> u8 {
    (v * 255.0).round() as u8
}

/// Map a normalized density to its heatmap color.
pub fn heat_color(x: f64) -> Color {
    let r = if x < 0.7 { 4.0 * x - 1.5 } else { -4.0 * x + 4.5 };
    let g = if x < 0.5 { 4.0 * x - 0.5 } else { -4.0 * x + 3.5 };
    let b = if x < 0.3 { 4.0 * x + 0.5 } else { -4.0 * x + 2.5 };
    let a = 2.0 * x;

    Color::new(
        to_byte(r.clamp(0.0, 1.0)),
        to_byte(g.clamp(0.0, 1.0)),
        to_byte(b.clamp(0.0, 1.0)),
        to_byte(a.clamp(0.0, MAX_ALPHA)),
    )
}

/// Color every cell of a density grid.
///
/// # Returns
/// RGBA pixel data (4 bytes per pixel), row-major
pub fn map_colors(density: &DensityGrid) -> Vec<u8> {
    let values = density.as_slice();
    let mut pixels = vec![0u8; values.len() * 4];

    pixels
        .par_chunks_mut(TILE_SIZE * 4)
        .zip(values.par_chunks(TILE_SIZE))
        .for_each(|(out_row, row)| {
            for (px, &x) in out_row.chunks_exact_mut(4).zip(row) {
                px.copy_from_slice(&heat_color(x).to_array());
            }
        });

    pixels
}
