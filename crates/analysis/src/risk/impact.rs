//! Infrastructure and population impact estimation
//!
//! Aggregates risk-zone rasters against infrastructure point lists and
//! population density into scalar impact counts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use floodgrid_core::raster::Raster;
use floodgrid_core::{Error, Result};

/// A labeled asset location in raster pixel coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfrastructurePoint {
    pub row: usize,
    pub col: usize,
    /// Asset category tag, e.g. "hospital", "school", "substation"
    pub kind: String,
}

impl InfrastructurePoint {
    pub fn new(row: usize, col: usize, kind: impl Into<String>) -> Self {
        Self {
            row,
            col,
            kind: kind.into(),
        }
    }
}

/// Per-kind impact tally
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindImpact {
    pub total: usize,
    /// Points in category medium or worse
    pub at_risk: usize,
    /// Points in the critical category
    pub critical: usize,
}

/// Impact assessment over a risk-zone raster.
///
/// Counts partition the in-bounds points:
/// `critical_risk + high_risk + medium_risk + low_risk + safe + unknown
/// == in_bounds`. `unknown` counts points on cells with missing elevation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactSummary {
    /// All points supplied, in bounds or not
    pub total_structures: usize,
    /// Points whose coordinates fall inside the raster
    pub in_bounds: usize,
    pub critical_risk: usize,
    pub high_risk: usize,
    pub medium_risk: usize,
    pub low_risk: usize,
    pub safe: usize,
    /// Points on missing-elevation cells
    pub unknown: usize,
    pub by_kind: HashMap<String, KindImpact>,
}

/// Assess infrastructure impact against a risk-zone raster.
///
/// Out-of-bounds points are silently skipped (they still count in
/// `total_structures`); this mirrors the lenient policy of treating the
/// point list as best-effort demo data rather than failing the assessment.
/// A point is "at risk" from category medium (2) upward and "critical" only
/// in category 4.
pub fn assess_infrastructure_impact(
    risk_zones: &Raster<i8>,
    points: &[InfrastructurePoint],
) -> ImpactSummary {
    let (rows, cols) = risk_zones.shape();
    let mut impact = ImpactSummary {
        total_structures: points.len(),
        ..Default::default()
    };

    for point in points {
        if point.row >= rows || point.col >= cols {
            continue;
        }
        impact.in_bounds += 1;

        let category = unsafe { risk_zones.get_unchecked(point.row, point.col) };
        match category {
            4 => impact.critical_risk += 1,
            3 => impact.high_risk += 1,
            2 => impact.medium_risk += 1,
            1 => impact.low_risk += 1,
            0 => impact.safe += 1,
            _ => impact.unknown += 1,
        }

        let entry = impact.by_kind.entry(point.kind.clone()).or_default();
        entry.total += 1;
        if (2..=4).contains(&category) {
            entry.at_risk += 1;
        }
        if category == 4 {
            entry.critical += 1;
        }
    }

    impact
}

/// Population estimate by risk category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationImpact {
    pub critical_risk_population: u64,
    pub high_risk_population: u64,
    pub medium_risk_population: u64,
    /// Population in category medium or worse
    pub total_affected: u64,
}

/// Estimate affected population from risk-zone cell counts.
///
/// Converts per-category cell counts to people via cell area times average
/// density. A zero-area raster yields zeros.
///
/// # Arguments
/// * `risk_zones` - Risk category raster
/// * `density_per_km2` - Average population density (people per km²)
/// * `pixel_size_m` - Cell edge length in meters
pub fn estimate_affected_population(
    risk_zones: &Raster<i8>,
    density_per_km2: f64,
    pixel_size_m: f64,
) -> Result<PopulationImpact> {
    if !density_per_km2.is_finite() || density_per_km2 < 0.0 {
        return Err(Error::invalid_parameter(
            "density_per_km2",
            density_per_km2,
            "must be finite and non-negative",
        ));
    }
    if !pixel_size_m.is_finite() || pixel_size_m <= 0.0 {
        return Err(Error::invalid_parameter(
            "pixel_size_m",
            pixel_size_m,
            "must be finite and positive",
        ));
    }

    let mut counts = [0usize; 5];
    for &category in risk_zones.data().iter() {
        if (0..=4).contains(&category) {
            counts[category as usize] += 1;
        }
    }

    let pixel_area_km2 = pixel_size_m * pixel_size_m / 1e6;
    let people_per_pixel = density_per_km2 * pixel_area_km2;
    let people = |cells: usize| (cells as f64 * people_per_pixel) as u64;

    Ok(PopulationImpact {
        critical_risk_population: people(counts[4]),
        high_risk_population: people(counts[3]),
        medium_risk_population: people(counts[2]),
        total_affected: people(counts[2] + counts[3] + counts[4]),
    })
}

/// Qualitative per-site flood exposure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiteRiskLevel {
    Safe,
    Low,
    Medium,
    High,
}

impl SiteRiskLevel {
    /// Classify a flood depth at a site (meters)
    fn from_depth(depth: f64) -> Self {
        if depth <= 0.0 {
            SiteRiskLevel::Safe
        } else if depth < 0.5 {
            SiteRiskLevel::Low
        } else if depth < 2.0 {
            SiteRiskLevel::Medium
        } else {
            SiteRiskLevel::High
        }
    }
}

/// Depth-based exposure assessment for one site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRisk {
    /// Index of the point in the input list
    pub id: usize,
    pub row: usize,
    pub col: usize,
    pub elevation_m: f64,
    pub flood_depth_m: f64,
    pub risk: SiteRiskLevel,
}

/// Assess flood exposure at individual sites directly from the DEM.
///
/// For each in-bounds point with valid elevation, computes the local flood
/// depth at `flood_level` and a qualitative exposure level. Out-of-bounds
/// points and points on missing cells are skipped; the returned ids index
/// into the input list.
pub fn assess_site_risk(
    dem: &Raster<f64>,
    points: &[InfrastructurePoint],
    flood_level: f64,
) -> Result<Vec<SiteRisk>> {
    if !flood_level.is_finite() {
        return Err(Error::invalid_parameter(
            "flood_level",
            flood_level,
            "must be finite",
        ));
    }

    let (rows, cols) = dem.shape();
    let mut assessments = Vec::with_capacity(points.len());

    for (id, point) in points.iter().enumerate() {
        if point.row >= rows || point.col >= cols {
            continue;
        }
        let elevation = unsafe { dem.get_unchecked(point.row, point.col) };
        if dem.is_nodata(elevation) {
            continue;
        }

        let depth = (flood_level - elevation).max(0.0);
        assessments.push(SiteRisk {
            id,
            row: point.row,
            col: point.col,
            elevation_m: elevation,
            flood_depth_m: depth,
            risk: SiteRiskLevel::from_depth(depth),
        });
    }

    Ok(assessments)
}
