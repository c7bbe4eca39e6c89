//! Flood inundation analysis
//!
//! Per-cell flood depth, extent statistics, multi-level scenario sweeps and
//! safe-zone labeling over an elevation raster.

mod depth;
mod safe_zones;
mod scenarios;

pub use depth::{flood_depth, flood_statistics, FloodDepth, FloodDepthParams, FloodStats};
pub use safe_zones::{label_safe_zones, SafeZoneParams, SafeZones};
pub use scenarios::{generate_scenarios, FloodScenarios, ScenarioParams};
