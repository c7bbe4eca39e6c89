//! Terrain slope from a DEM
//!
//! Slope in degrees from finite-difference elevation gradients: central
//! differences in the interior, one-sided differences along the borders.

use ndarray::Array2;
use rayon::prelude::*;

use floodgrid_core::raster::Raster;
use floodgrid_core::{Algorithm, Error, Result};

/// Parameters for slope calculation
#[derive(Debug, Clone)]
pub struct SlopeParams {
    /// Cell edge length in meters
    pub resolution: f64,
}

impl Default for SlopeParams {
    fn default() -> Self {
        Self { resolution: 1.0 }
    }
}

/// Slope algorithm
#[derive(Debug, Clone, Default)]
pub struct Slope;

impl Algorithm for Slope {
    type Input = Raster<f64>;
    type Output = Raster<f64>;
    type Params = SlopeParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Slope"
    }

    fn description(&self) -> &'static str {
        "Calculate terrain slope in degrees from elevation gradients"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        slope(&input, params)
    }
}

/// Calculate terrain slope in degrees.
///
/// Gradients use central differences over the two axis neighbors; cells on
/// the raster border fall back to a one-sided difference. Missing cells are
/// NaN in the output, and a missing neighbor in the stencil propagates NaN.
///
/// ```text
/// slope = atan(sqrt((dz/dx)^2 + (dz/dy)^2))
/// ```
pub fn slope(dem: &Raster<f64>, params: SlopeParams) -> Result<Raster<f64>> {
    if !params.resolution.is_finite() || params.resolution <= 0.0 {
        return Err(Error::invalid_parameter(
            "resolution",
            params.resolution,
            "must be finite and positive",
        ));
    }

    let (rows, cols) = dem.shape();
    let res = params.resolution;

    let output_data: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![f64::NAN; cols];

            for col in 0..cols {
                let value = |r: usize, c: usize| {
                    let e = unsafe { dem.get_unchecked(r, c) };
                    if dem.is_nodata(e) {
                        f64::NAN
                    } else {
                        e
                    }
                };

                // Missing cells stay missing in the output
                if value(row, col).is_nan() {
                    continue;
                }

                let dz_dy = axis_gradient(row, rows, res, |r| value(r, col));
                let dz_dx = axis_gradient(col, cols, res, |c| value(row, c));

                // NaN in either gradient propagates through the hypotenuse
                row_data[col] = (dz_dx * dz_dx + dz_dy * dz_dy).sqrt().atan().to_degrees();
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

/// One-sided or central finite difference along one axis. NaN from the
/// sampler propagates through.
fn axis_gradient(center: usize, limit: usize, res: f64, at: impl Fn(usize) -> f64) -> f64 {
    if limit < 2 {
        return 0.0;
    }
    let (lo, hi, span) = if center == 0 {
        (0, 1, res)
    } else if center == limit - 1 {
        (limit - 2, limit - 1, res)
    } else {
        (center - 1, center + 1, 2.0 * res)
    };
    (at(hi) - at(lo)) / span
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_slope_flat() {
        let dem: Raster<f64> = Raster::filled(10, 10, 100.0);
        let result = slope(&dem, SlopeParams::default()).unwrap();

        for &s in result.data().iter() {
            assert_relative_eq!(s, 0.0);
        }
    }

    #[test]
    fn test_slope_unit_ramp() {
        // z = col: dz/dx = 1, dz/dy = 0 -> 45 degrees everywhere
        let mut dem: Raster<f64> = Raster::new(5, 5);
        for row in 0..5 {
            for col in 0..5 {
                dem.set(row, col, col as f64).unwrap();
            }
        }

        let result = slope(&dem, SlopeParams::default()).unwrap();
        for &s in result.data().iter() {
            assert_relative_eq!(s, 45.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_slope_resolution_scaling() {
        // Same ramp at 10m cells: gradient 0.1 -> atan(0.1)
        let mut dem: Raster<f64> = Raster::new(5, 5);
        for row in 0..5 {
            for col in 0..5 {
                dem.set(row, col, col as f64).unwrap();
            }
        }

        let result = slope(&dem, SlopeParams { resolution: 10.0 }).unwrap();
        let expected = 0.1f64.atan().to_degrees();
        assert_relative_eq!(result.get(2, 2).unwrap(), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_slope_nan_propagation() {
        let mut dem: Raster<f64> = Raster::filled(5, 5, 100.0);
        dem.set(2, 2, f64::NAN).unwrap();

        let result = slope(&dem, SlopeParams::default()).unwrap();
        // The missing cell and its stencil neighbors turn NaN
        assert!(result.get(2, 2).unwrap().is_nan());
        assert!(result.get(2, 1).unwrap().is_nan());
        assert!(result.get(1, 2).unwrap().is_nan());
        // Cells outside the stencil are unaffected
        assert_relative_eq!(result.get(0, 0).unwrap(), 0.0);
    }
}
