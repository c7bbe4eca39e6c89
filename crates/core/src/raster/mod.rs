//! Raster data structures and operations

mod element;
mod grid;
mod transform;

pub use element::RasterElement;
pub use grid::{Raster, RasterStatistics};
pub use transform::GridTransform;
