//! Flood risk classification and impact analysis
//!
//! Ordinal risk zoning, distance-transform-based evacuation priorities, and
//! infrastructure/population impact aggregation.

mod distance;
mod evacuation;
mod impact;
mod zones;

pub use distance::distance_transform;
pub use evacuation::{
    evacuation_zones, Evacuation, EvacuationParams, EvacuationSummary, EvacuationZones,
};
pub use impact::{
    assess_infrastructure_impact, assess_site_risk, estimate_affected_population, ImpactSummary,
    InfrastructurePoint, KindImpact, PopulationImpact, SiteRisk, SiteRiskLevel,
};
pub use zones::{classify_risk_zones, RiskZone, RiskZoneParams, RiskZones, RISK_NODATA};
