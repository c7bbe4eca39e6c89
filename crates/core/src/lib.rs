//! # Floodgrid Core
//!
//! Core types and error handling for the floodgrid flood-analysis library.
//!
//! This crate provides:
//! - `Raster<T>`: Generic raster grid type with no-data handling
//! - `GridTransform`: Pixel/world mapping for georeferenced grids
//! - `RasterElement`: Trait over usable cell types
//! - The `Algorithm` trait for a consistent analysis API

pub mod error;
pub mod raster;

pub use error::{Error, Result};
pub use raster::{GridTransform, Raster, RasterElement, RasterStatistics};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::raster::{GridTransform, Raster, RasterElement};
    pub use crate::Algorithm;
}

/// Core trait for all analyses in floodgrid.
///
/// Analyses are pure functions that transform input data according to
/// parameters; no state is retained between calls.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(
        &self,
        input: Self::Input,
        params: Self::Params,
    ) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
