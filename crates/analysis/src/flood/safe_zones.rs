//! Safe zone labeling
//!
//! Labels contiguous regions above a flood level via breadth-first
//! connected-component labeling (4-connectivity), filtering out regions too
//! small to shelter in.

use std::collections::VecDeque;

use ndarray::Array2;

use floodgrid_core::raster::Raster;
use floodgrid_core::{Algorithm, Error, Result};

/// 4-connected neighbor offsets
const CROSS_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Parameters for safe zone labeling
#[derive(Debug, Clone)]
pub struct SafeZoneParams {
    /// Minimum component size (in cells) for a zone to count as safe
    pub min_area_cells: usize,
}

impl Default for SafeZoneParams {
    fn default() -> Self {
        Self { min_area_cells: 100 }
    }
}

/// Safe zone labeling algorithm
#[derive(Debug, Clone, Default)]
pub struct SafeZones;

impl Algorithm for SafeZones {
    type Input = (Raster<f64>, f64);
    type Output = Raster<i32>;
    type Params = SafeZoneParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "SafeZones"
    }

    fn description(&self) -> &'static str {
        "Label contiguous zones above a flood level, filtering small components"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        label_safe_zones(&input.0, input.1, params)
    }
}

/// Label contiguous safe zones above a flood level.
///
/// A cell belongs to the safe mask when its elevation is valid and at least
/// `flood_level`. Connected components of the mask (4-connectivity) receive
/// ids 1, 2, ... in scan order; components smaller than
/// `params.min_area_cells` are relabeled to 0. Surviving components keep
/// their original ids, so the sequence may have gaps after filtering.
///
/// # Returns
/// `Raster<i32>` of zone labels; 0 marks unsafe, missing, or filtered cells
pub fn label_safe_zones(
    dem: &Raster<f64>,
    flood_level: f64,
    params: SafeZoneParams,
) -> Result<Raster<i32>> {
    if !flood_level.is_finite() {
        return Err(Error::invalid_parameter(
            "flood_level",
            flood_level,
            "must be finite",
        ));
    }

    let (rows, cols) = dem.shape();
    let mut labels = Array2::<i32>::zeros((rows, cols));
    let mut queue: VecDeque<(usize, usize)> = VecDeque::new();

    let is_safe = |row: usize, col: usize| {
        let e = unsafe { dem.get_unchecked(row, col) };
        !dem.is_nodata(e) && e >= flood_level
    };

    let mut next_label: i32 = 0;
    let mut zone_sizes: Vec<usize> = vec![0]; // index 0 = background

    for row in 0..rows {
        for col in 0..cols {
            if labels[(row, col)] != 0 || !is_safe(row, col) {
                continue;
            }

            next_label += 1;
            let mut size = 0usize;
            labels[(row, col)] = next_label;
            queue.push_back((row, col));

            while let Some((r, c)) = queue.pop_front() {
                size += 1;

                for (dr, dc) in CROSS_OFFSETS {
                    let nr = r as isize + dr;
                    let nc = c as isize + dc;
                    if nr < 0 || nr >= rows as isize || nc < 0 || nc >= cols as isize {
                        continue;
                    }
                    let (nr, nc) = (nr as usize, nc as usize);
                    if labels[(nr, nc)] == 0 && is_safe(nr, nc) {
                        labels[(nr, nc)] = next_label;
                        queue.push_back((nr, nc));
                    }
                }
            }

            zone_sizes.push(size);
        }
    }

    // Drop components below the area threshold
    if params.min_area_cells > 1 {
        labels.mapv_inplace(|label| {
            if label > 0 && zone_sizes[label as usize] < params.min_area_cells {
                0
            } else {
                label
            }
        });
    }

    let mut output = dem.with_same_meta::<i32>();
    *output.data_mut() = labels;

    Ok(output)
}
