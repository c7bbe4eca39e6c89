//! Flood depth from a DEM and a water-surface elevation
//!
//! The primitive the rest of the flood analyses build on: per-cell
//! inundation depth `max(water_level - elevation, 0)`, plus single-pass
//! extent statistics.

use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use floodgrid_core::raster::Raster;
use floodgrid_core::{Algorithm, Error, Result};

/// Parameters for flood depth calculation
#[derive(Debug, Clone)]
pub struct FloodDepthParams {
    /// Water-surface elevation in the DEM's vertical datum (meters)
    pub water_level: f64,
}

impl Default for FloodDepthParams {
    fn default() -> Self {
        Self { water_level: 0.0 }
    }
}

/// Flood depth algorithm
#[derive(Debug, Clone, Default)]
pub struct FloodDepth;

impl Algorithm for FloodDepth {
    type Input = Raster<f64>;
    type Output = Raster<f64>;
    type Params = FloodDepthParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "FloodDepth"
    }

    fn description(&self) -> &'static str {
        "Calculate per-cell flood depth for a given water-surface elevation"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        flood_depth(&input, params.water_level)
    }
}

/// Summary statistics for one flood level.
///
/// `mean_depth_m` is restricted to flooded cells; `percent_flooded` is
/// measured against valid (non-missing) cells so DEM holes don't skew it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloodStats {
    /// Water-surface elevation (meters)
    pub water_level_m: f64,
    /// Number of cells with depth > 0
    pub flooded_cells: usize,
    /// Flooded area in square meters (cells x resolution^2)
    pub flooded_area_m2: f64,
    /// Flooded area in square kilometers
    pub flooded_area_km2: f64,
    /// Maximum flood depth (meters); 0 when nothing is flooded
    pub max_depth_m: f64,
    /// Mean depth over flooded cells (meters); 0 when nothing is flooded
    pub mean_depth_m: f64,
    /// Flooded cells as a percentage of valid cells
    pub percent_flooded: f64,
}

fn check_water_level(water_level: f64) -> Result<()> {
    if !water_level.is_finite() {
        return Err(Error::invalid_parameter(
            "water_level",
            water_level,
            "must be finite",
        ));
    }
    Ok(())
}

/// Calculate per-cell flood depth for a water-surface elevation.
///
/// `depth = max(water_level - elevation, 0)`. Cells with missing elevation
/// (NaN or the DEM's no-data value) propagate as NaN rather than reading as
/// depth 0. Defined for any finite water level: below the minimum elevation
/// the result is all zeros, above the maximum every valid cell is flooded.
///
/// # Arguments
/// * `dem` - Input elevation raster (meters)
/// * `water_level` - Water-surface elevation (meters, same datum)
///
/// # Returns
/// Raster of flood depths in meters, NaN where elevation is missing
pub fn flood_depth(dem: &Raster<f64>, water_level: f64) -> Result<Raster<f64>> {
    check_water_level(water_level)?;

    let (rows, cols) = dem.shape();

    let output_data: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![f64::NAN; cols];

            for col in 0..cols {
                let e = unsafe { dem.get_unchecked(row, col) };
                if dem.is_nodata(e) {
                    continue;
                }
                row_data[col] = (water_level - e).max(0.0);
            }

            row_data
        })
        .collect();

    let mut output = dem.with_same_meta::<f64>();
    output.set_nodata(Some(f64::NAN));
    *output.data_mut() = Array2::from_shape_vec((rows, cols), output_data)
        .map_err(|e| Error::Other(e.to_string()))?;

    Ok(output)
}

/// Calculate flood extent statistics for a single water level.
///
/// A DEM with no valid cells yields an all-zero record rather than an error;
/// the flooded-cell mean never divides by zero.
///
/// # Arguments
/// * `dem` - Input elevation raster
/// * `water_level` - Water-surface elevation (meters)
/// * `resolution` - Cell edge length in meters (1.0 for unit cells)
pub fn flood_statistics(dem: &Raster<f64>, water_level: f64, resolution: f64) -> Result<FloodStats> {
    check_water_level(water_level)?;
    if !resolution.is_finite() || resolution <= 0.0 {
        return Err(Error::invalid_parameter(
            "resolution",
            resolution,
            "must be finite and positive",
        ));
    }

    let mut valid_cells = 0usize;
    let mut flooded_cells = 0usize;
    let mut depth_sum = 0.0f64;
    let mut max_depth = 0.0f64;

    for &e in dem.data().iter() {
        if dem.is_nodata(e) {
            continue;
        }
        valid_cells += 1;

        let depth = (water_level - e).max(0.0);
        if depth > 0.0 {
            flooded_cells += 1;
            depth_sum += depth;
            if depth > max_depth {
                max_depth = depth;
            }
        }
    }

    let pixel_area_m2 = resolution * resolution;
    let flooded_area_m2 = flooded_cells as f64 * pixel_area_m2;

    let mean_depth_m = if flooded_cells > 0 {
        depth_sum / flooded_cells as f64
    } else {
        0.0
    };

    let percent_flooded = if valid_cells > 0 {
        100.0 * flooded_cells as f64 / valid_cells as f64
    } else {
        0.0
    };

    Ok(FloodStats {
        water_level_m: water_level,
        flooded_cells,
        flooded_area_m2,
        flooded_area_km2: flooded_area_m2 / 1e6,
        max_depth_m: max_depth,
        mean_depth_m,
        percent_flooded,
    })
}
