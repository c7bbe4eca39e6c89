//! Flood risk-zone classification
//!
//! Discretizes the margin between terrain and water surface into ordinal
//! risk categories, from safe (well above water) to critical (submerged).

use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use floodgrid_core::raster::Raster;
use floodgrid_core::{Algorithm, Error, Result};

/// No-data sentinel in risk and priority rasters (missing elevation).
pub const RISK_NODATA: i8 = -1;

/// Ordinal flood risk category.
///
/// Derived from margin = elevation - water_level, binned without overlap:
///
/// | margin (m)   | category |
/// |--------------|----------|
/// | < 0          | Critical |
/// | [0, 1)       | High     |
/// | [1, 2)       | Medium   |
/// | [2, 3)       | Low      |
/// | >= 3         | Safe     |
///
/// Missing elevation never classifies; it carries the out-of-band
/// [`RISK_NODATA`] sentinel in the output raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(i8)]
pub enum RiskZone {
    Safe = 0,
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl RiskZone {
    /// Classify a margin (elevation minus water level, meters)
    pub fn from_margin(margin: f64) -> Self {
        if margin < 0.0 {
            RiskZone::Critical
        } else if margin < 1.0 {
            RiskZone::High
        } else if margin < 2.0 {
            RiskZone::Medium
        } else if margin < 3.0 {
            RiskZone::Low
        } else {
            RiskZone::Safe
        }
    }

    /// Numeric category code
    pub fn code(self) -> i8 {
        self as i8
    }

    /// Decode a category code; `None` for the no-data sentinel or anything
    /// out of range
    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            0 => Some(RiskZone::Safe),
            1 => Some(RiskZone::Low),
            2 => Some(RiskZone::Medium),
            3 => Some(RiskZone::High),
            4 => Some(RiskZone::Critical),
            _ => None,
        }
    }
}

/// Parameters for risk zone classification
#[derive(Debug, Clone)]
pub struct RiskZoneParams {
    /// Water-surface elevation (meters)
    pub water_level: f64,
}

impl Default for RiskZoneParams {
    fn default() -> Self {
        Self { water_level: 0.0 }
    }
}

/// Risk zone classification algorithm
#[derive(Debug, Clone, Default)]
pub struct RiskZones;

impl Algorithm for RiskZones {
    type Input = Raster<f64>;
    type Output = Raster<i8>;
    type Params = RiskZoneParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "RiskZones"
    }

    fn description(&self) -> &'static str {
        "Classify per-cell flood risk from the margin above the water surface"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        classify_risk_zones(&input, params.water_level)
    }
}

/// Classify per-cell flood risk for a water level.
///
/// See [`RiskZone`] for the margin bins. Cells with missing elevation get
/// [`RISK_NODATA`] (set as the output's no-data value) instead of falling
/// through to "safe".
///
/// # Returns
/// `Raster<i8>` of category codes 0-4, -1 where elevation is missing
pub fn classify_risk_zones(dem: &Raster<f64>, water_level: f64) -> Result<Raster<i8>> {
    if !water_level.is_finite() {
        return Err(Error::invalid_parameter(
            "water_level",
            water_level,
            "must be finite",
        ));
    }

    let (rows, cols) = dem.shape();

    let output_data: Vec<i8> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![RISK_NODATA; cols];

            for col in 0..cols {
                let e = unsafe { dem.get_unchecked(row, col) };
                if dem.is_nodata(e) {
                    continue;
                }
                row_data[col] = RiskZone::from_margin(e - water_level).code();
            }

            row_data
        })
        .collect();

    let mut output = dem.with_same_meta::<i8>();
    output.set_nodata(Some(RISK_NODATA));
    *output.data_mut() = Array2::from_shape_vec((rows, cols), output_data)
        .map_err(|e| Error::Other(e.to_string()))?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_bins() {
        assert_eq!(RiskZone::from_margin(-0.5), RiskZone::Critical);
        assert_eq!(RiskZone::from_margin(0.0), RiskZone::High);
        assert_eq!(RiskZone::from_margin(0.99), RiskZone::High);
        assert_eq!(RiskZone::from_margin(1.0), RiskZone::Medium);
        assert_eq!(RiskZone::from_margin(2.0), RiskZone::Low);
        assert_eq!(RiskZone::from_margin(3.0), RiskZone::Safe);
        assert_eq!(RiskZone::from_margin(250.0), RiskZone::Safe);
    }

    #[test]
    fn test_risk_ordering_in_margin() {
        // Higher margin never yields a higher risk code
        let margins = [-2.0, -0.1, 0.0, 0.5, 1.0, 1.5, 2.0, 2.9, 3.0, 10.0];
        for pair in margins.windows(2) {
            let a = RiskZone::from_margin(pair[0]).code();
            let b = RiskZone::from_margin(pair[1]).code();
            assert!(a >= b, "margin {} -> {}, margin {} -> {}", pair[0], a, pair[1], b);
        }
    }

    #[test]
    fn test_classify_gradient() {
        // Column c has elevation c; water at 102 spans every category
        let mut dem: Raster<f64> = Raster::new(1, 6);
        for col in 0..6 {
            dem.set(0, col, 100.0 + col as f64).unwrap();
        }

        let zones = classify_risk_zones(&dem, 102.0).unwrap();
        assert_eq!(zones.get(0, 0).unwrap(), 4); // margin -2
        assert_eq!(zones.get(0, 1).unwrap(), 4); // margin -1
        assert_eq!(zones.get(0, 2).unwrap(), 3); // margin 0
        assert_eq!(zones.get(0, 3).unwrap(), 2); // margin 1
        assert_eq!(zones.get(0, 4).unwrap(), 1); // margin 2
        assert_eq!(zones.get(0, 5).unwrap(), 0); // margin 3
    }

    #[test]
    fn test_missing_elevation_is_nodata_not_safe() {
        let mut dem: Raster<f64> = Raster::filled(3, 3, 100.0);
        dem.set(1, 1, f64::NAN).unwrap();

        let zones = classify_risk_zones(&dem, 110.0).unwrap();
        assert_eq!(zones.get(1, 1).unwrap(), RISK_NODATA);
        assert_eq!(zones.nodata(), Some(RISK_NODATA));
        assert_eq!(zones.get(0, 0).unwrap(), 4);
    }

    #[test]
    fn test_roundtrip_codes() {
        for code in 0..=4i8 {
            assert_eq!(RiskZone::from_code(code).unwrap().code(), code);
        }
        assert!(RiskZone::from_code(RISK_NODATA).is_none());
        assert!(RiskZone::from_code(5).is_none());
    }
}
