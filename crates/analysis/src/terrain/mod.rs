//! Auxiliary terrain metrics

mod slope;

pub use slope::{slope, Slope, SlopeParams};
