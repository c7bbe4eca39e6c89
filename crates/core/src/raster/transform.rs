//! Pixel/world mapping for rasters

use serde::{Deserialize, Serialize};

/// Maps between pixel coordinates (col, row) and world coordinates (x, y)
/// for an axis-aligned, north-up grid:
///
/// ```text
/// x = origin_x + col * cell_size_x
/// y = origin_y + row * cell_size_y
/// ```
///
/// `origin_x`/`origin_y` locate the upper-left corner; `cell_size_y` is
/// usually negative (rows grow downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridTransform {
    /// X coordinate of the upper-left corner
    pub origin_x: f64,
    /// Y coordinate of the upper-left corner
    pub origin_y: f64,
    /// Cell width in world units
    pub cell_size_x: f64,
    /// Cell height in world units (usually negative)
    pub cell_size_y: f64,
}

impl GridTransform {
    /// Create a new transform
    pub fn new(origin_x: f64, origin_y: f64, cell_size_x: f64, cell_size_y: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            cell_size_x,
            cell_size_y,
        }
    }

    /// Convert pixel coordinates to the world coordinates of the cell center
    pub fn pixel_to_world(&self, col: usize, row: usize) -> (f64, f64) {
        let x = self.origin_x + (col as f64 + 0.5) * self.cell_size_x;
        let y = self.origin_y + (row as f64 + 0.5) * self.cell_size_y;
        (x, y)
    }

    /// Convert world coordinates to fractional pixel coordinates.
    ///
    /// Use `.floor()` on the results to get integer cell indices.
    pub fn world_to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        let col = (x - self.origin_x) / self.cell_size_x;
        let row = (y - self.origin_y) / self.cell_size_y;
        (col, row)
    }

    /// Cell edge length in world units (assumes square cells)
    pub fn cell_size(&self) -> f64 {
        self.cell_size_x.abs()
    }

    /// Bounding box (min_x, min_y, max_x, max_y) for a raster of the given size
    pub fn bounds(&self, cols: usize, rows: usize) -> (f64, f64, f64, f64) {
        let x1 = self.origin_x + cols as f64 * self.cell_size_x;
        let y1 = self.origin_y + rows as f64 * self.cell_size_y;

        (
            self.origin_x.min(x1),
            self.origin_y.min(y1),
            self.origin_x.max(x1),
            self.origin_y.max(y1),
        )
    }
}

impl Default for GridTransform {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, -1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pixel_to_world_roundtrip() {
        let gt = GridTransform::new(100.0, 200.0, 10.0, -10.0);

        let (x, y) = gt.pixel_to_world(5, 10);
        let (col, row) = gt.world_to_pixel(x, y);

        assert_relative_eq!(col, 5.5, epsilon = 1e-10);
        assert_relative_eq!(row, 10.5, epsilon = 1e-10);
    }

    #[test]
    fn test_bounds() {
        let gt = GridTransform::new(0.0, 100.0, 1.0, -1.0);
        let (min_x, min_y, max_x, max_y) = gt.bounds(100, 100);

        assert_relative_eq!(min_x, 0.0, epsilon = 1e-10);
        assert_relative_eq!(min_y, 0.0, epsilon = 1e-10);
        assert_relative_eq!(max_x, 100.0, epsilon = 1e-10);
        assert_relative_eq!(max_y, 100.0, epsilon = 1e-10);
    }

    #[test]
    fn test_cell_size() {
        let gt = GridTransform::new(0.0, 0.0, 30.0, -30.0);
        assert_relative_eq!(gt.cell_size(), 30.0, epsilon = 1e-10);
    }
}
