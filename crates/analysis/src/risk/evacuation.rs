//! Evacuation priority zoning
//!
//! Derives safe/flooded masks from a DEM and water level, then bands
//! evacuation priority by flood membership and Euclidean distance between
//! the safe and unsafe parts of the grid.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use floodgrid_core::raster::Raster;
use floodgrid_core::{Algorithm, Error, Result};

use crate::risk::distance::distance_transform;
use crate::risk::zones::RISK_NODATA;

/// Parameters for evacuation zoning
#[derive(Debug, Clone)]
pub struct EvacuationParams {
    /// Vertical clearance above the water level for a cell to count as safe
    /// (meters)
    pub safety_buffer_m: f64,
    /// Cell edge length in meters
    pub resolution: f64,
    /// Distance band (in cells) for high evacuation priority
    pub near_band_cells: f64,
    /// Distance band (in cells) for moderate evacuation priority
    pub outer_band_cells: f64,
}

impl Default for EvacuationParams {
    fn default() -> Self {
        Self {
            safety_buffer_m: 2.0,
            resolution: 1.0,
            near_band_cells: 50.0,
            outer_band_cells: 100.0,
        }
    }
}

/// Area summary for evacuation zoning, all in square kilometers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvacuationSummary {
    pub flooded_area_km2: f64,
    pub safe_area_km2: f64,
    pub immediate_area_km2: f64,
    pub high_priority_area_km2: f64,
    pub moderate_priority_area_km2: f64,
}

/// Result of evacuation zoning: area summary plus the full priority raster
/// for visualization
#[derive(Debug, Clone)]
pub struct EvacuationZones {
    pub summary: EvacuationSummary,
    /// Priority codes: 0 = none, 1 = moderate, 2 = high, 3 = immediate,
    /// -1 = missing elevation
    pub priority: Raster<i8>,
}

/// Evacuation zoning algorithm
#[derive(Debug, Clone, Default)]
pub struct Evacuation;

impl Algorithm for Evacuation {
    type Input = (Raster<f64>, f64);
    type Output = EvacuationZones;
    type Params = EvacuationParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Evacuation"
    }

    fn description(&self) -> &'static str {
        "Band evacuation priority from flood membership and safe-zone distance"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        evacuation_zones(&input.0, input.1, params)
    }
}

/// Compute evacuation priority zones for a water level.
///
/// Masks: `safe` where valid elevation >= water_level + buffer, `flooded`
/// where valid elevation < water_level. The distance transform runs against
/// the complement of the safe mask, so every non-safe cell carries its
/// distance to the nearest safe cell (safe cells carry 0); priority bands
/// key off that distance:
///
/// - flooded -> 3 (immediate)
/// - non-flooded, distance in (0, near_band] -> 2 (high)
/// - non-flooded, distance in (near_band, outer_band] -> 1 (moderate)
/// - otherwise 0; missing elevation -> -1
///
/// With no safe cells anywhere the distances are infinite and everything
/// dry gets priority 0; with no flooded cells nothing gets priority 3.
pub fn evacuation_zones(
    dem: &Raster<f64>,
    water_level: f64,
    params: EvacuationParams,
) -> Result<EvacuationZones> {
    if !water_level.is_finite() {
        return Err(Error::invalid_parameter(
            "water_level",
            water_level,
            "must be finite",
        ));
    }
    if !params.safety_buffer_m.is_finite() || params.safety_buffer_m < 0.0 {
        return Err(Error::invalid_parameter(
            "safety_buffer_m",
            params.safety_buffer_m,
            "must be finite and non-negative",
        ));
    }
    if !params.resolution.is_finite() || params.resolution <= 0.0 {
        return Err(Error::invalid_parameter(
            "resolution",
            params.resolution,
            "must be finite and positive",
        ));
    }

    let (rows, cols) = dem.shape();
    let safe_threshold = water_level + params.safety_buffer_m;

    let mut safe = Array2::from_elem((rows, cols), false);
    let mut flooded = Array2::from_elem((rows, cols), false);
    let mut valid = Array2::from_elem((rows, cols), false);

    for row in 0..rows {
        for col in 0..cols {
            let e = unsafe { dem.get_unchecked(row, col) };
            if dem.is_nodata(e) {
                continue;
            }
            valid[(row, col)] = true;
            if e >= safe_threshold {
                safe[(row, col)] = true;
            }
            if e < water_level {
                flooded[(row, col)] = true;
            }
        }
    }

    let not_safe = safe.mapv(|s| !s);
    let distance_to_safe = distance_transform(&not_safe);

    let mut priority = Array2::from_elem((rows, cols), RISK_NODATA);
    let mut flooded_cells = 0usize;
    let mut safe_cells = 0usize;
    let mut counts = [0usize; 4]; // by priority code

    for row in 0..rows {
        for col in 0..cols {
            if !valid[(row, col)] {
                continue;
            }

            if safe[(row, col)] {
                safe_cells += 1;
            }

            let code = if flooded[(row, col)] {
                flooded_cells += 1;
                3
            } else {
                let d = distance_to_safe[(row, col)];
                if d > 0.0 && d <= params.near_band_cells {
                    2
                } else if d > params.near_band_cells && d <= params.outer_band_cells {
                    1
                } else {
                    0
                }
            };

            priority[(row, col)] = code;
            counts[code as usize] += 1;
        }
    }

    let pixel_area_km2 = params.resolution * params.resolution / 1e6;

    let summary = EvacuationSummary {
        flooded_area_km2: flooded_cells as f64 * pixel_area_km2,
        safe_area_km2: safe_cells as f64 * pixel_area_km2,
        immediate_area_km2: counts[3] as f64 * pixel_area_km2,
        high_priority_area_km2: counts[2] as f64 * pixel_area_km2,
        moderate_priority_area_km2: counts[1] as f64 * pixel_area_km2,
    };

    let mut out = dem.with_same_meta::<i8>();
    out.set_nodata(Some(RISK_NODATA));
    *out.data_mut() = priority;

    Ok(EvacuationZones {
        summary,
        priority: out,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// A 1x200 strip climbing 1m per cell: flooded on the left, safe on the
    /// right, with a dry band in between.
    fn strip_dem() -> Raster<f64> {
        let values: Vec<f64> = (0..200).map(|i| i as f64).collect();
        Raster::from_vec(values, 1, 200).unwrap()
    }

    #[test]
    fn test_flooded_cells_are_immediate() {
        let dem = strip_dem();
        let result = evacuation_zones(&dem, 100.0, EvacuationParams::default()).unwrap();

        // Cells 0..100 are below the water level
        for col in 0..100 {
            assert_eq!(result.priority.get(0, col).unwrap(), 3, "col {col}");
        }
    }

    #[test]
    fn test_priority_bands_by_distance() {
        let dem = strip_dem();
        let result = evacuation_zones(&dem, 100.0, EvacuationParams::default()).unwrap();

        // Safe cells start at elevation 102 (col 102). Dry cells at cols
        // 100..102 are 2 and 1 cells from safety.
        assert_eq!(result.priority.get(0, 100).unwrap(), 2);
        assert_eq!(result.priority.get(0, 101).unwrap(), 2);
        // Safe cells have distance 0: no band
        assert_eq!(result.priority.get(0, 102).unwrap(), 0);
        assert_eq!(result.priority.get(0, 199).unwrap(), 0);
    }

    #[test]
    fn test_area_summary() {
        let dem = strip_dem();
        let result = evacuation_zones(&dem, 100.0, EvacuationParams::default()).unwrap();

        // 100 flooded cells, 98 safe cells (elevations 102..199), 1 m cells
        assert_relative_eq!(result.summary.flooded_area_km2, 100.0 / 1e6);
        assert_relative_eq!(result.summary.safe_area_km2, 98.0 / 1e6);
        assert_relative_eq!(result.summary.immediate_area_km2, 100.0 / 1e6);
        assert_relative_eq!(result.summary.high_priority_area_km2, 2.0 / 1e6);
        assert_relative_eq!(result.summary.moderate_priority_area_km2, 0.0);
    }

    #[test]
    fn test_no_safe_cells_leaves_dry_land_unbanded() {
        // Everything below water_level + buffer: distances are infinite
        let dem: Raster<f64> = Raster::filled(5, 5, 100.5);
        let result = evacuation_zones(&dem, 100.0, EvacuationParams::default()).unwrap();

        for row in 0..5 {
            for col in 0..5 {
                assert_eq!(result.priority.get(row, col).unwrap(), 0);
            }
        }
        assert_relative_eq!(result.summary.safe_area_km2, 0.0);
        assert_relative_eq!(result.summary.flooded_area_km2, 0.0);
    }

    #[test]
    fn test_all_safe_no_priorities() {
        let dem: Raster<f64> = Raster::filled(5, 5, 500.0);
        let result = evacuation_zones(&dem, 100.0, EvacuationParams::default()).unwrap();

        assert!(result
            .priority
            .data()
            .iter()
            .all(|&p| p == 0));
        assert_relative_eq!(result.summary.safe_area_km2, 25.0 / 1e6);
    }

    #[test]
    fn test_nodata_cells_carry_sentinel() {
        let mut dem = strip_dem();
        dem.set(0, 50, f64::NAN).unwrap();

        let result = evacuation_zones(&dem, 100.0, EvacuationParams::default()).unwrap();
        assert_eq!(result.priority.get(0, 50).unwrap(), RISK_NODATA);
        // Missing cells don't count toward any area
        assert_relative_eq!(result.summary.flooded_area_km2, 99.0 / 1e6);
    }

    #[test]
    fn test_moderate_band() {
        // A tall buffer widens the dry strip between flood and safety so
        // every band shows up: flooded cols 0..9, safe from col 20 on.
        let dem = strip_dem();
        let params = EvacuationParams {
            safety_buffer_m: 10.0,
            near_band_cells: 2.0,
            outer_band_cells: 4.0,
            ..Default::default()
        };
        let result = evacuation_zones(&dem, 10.0, params).unwrap();

        assert_eq!(result.priority.get(0, 9).unwrap(), 3); // flooded
        assert_eq!(result.priority.get(0, 19).unwrap(), 2); // 1 cell from safety
        assert_eq!(result.priority.get(0, 18).unwrap(), 2); // 2 cells
        assert_eq!(result.priority.get(0, 17).unwrap(), 1); // 3 cells
        assert_eq!(result.priority.get(0, 16).unwrap(), 1); // 4 cells
        assert_eq!(result.priority.get(0, 15).unwrap(), 0); // 5 cells: outside bands
    }
}
