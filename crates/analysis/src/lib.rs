//! # Floodgrid Analysis
//!
//! Flood inundation and risk analysis over elevation rasters.
//!
//! ## Available Analysis Categories
//!
//! - **flood**: Flood depth, extent statistics, scenario sweeps, safe-zone labeling
//! - **risk**: Risk-zone classification, evacuation zoning, infrastructure and
//!   population impact
//! - **terrain**: Auxiliary terrain metrics (slope)
//!
//! All analyses are pure functions over in-memory rasters. Missing elevation
//! (NaN or the raster's no-data value) is excluded from every aggregate and
//! propagates as NaN in float outputs or `-1` in categorical outputs.

pub mod flood;
pub mod risk;
pub mod terrain;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::flood::{
        flood_depth, flood_statistics, generate_scenarios, label_safe_zones, FloodDepth,
        FloodStats, SafeZoneParams, ScenarioParams,
    };
    pub use crate::risk::{
        assess_infrastructure_impact, assess_site_risk, classify_risk_zones, distance_transform,
        estimate_affected_population, evacuation_zones, EvacuationParams, EvacuationZones,
        ImpactSummary, InfrastructurePoint, PopulationImpact, RiskZone, RiskZones, SiteRisk,
    };
    pub use crate::terrain::{slope, Slope, SlopeParams};
    pub use floodgrid_core::prelude::*;
}
