//! Storage for rendered heatmap tiles.
//!
//! Tiles are persisted on the local filesystem at `{root}/{z}/{x}/{y}.png`.
//! Every write goes to a temporary file in the destination directory and is
//! renamed into place, so readers never see a partially written tile.

pub mod tile_store;

pub use tile_store::{TileArtifact, TileStore, TILE_EXTENSION};
