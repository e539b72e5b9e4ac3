//! Data models for aircraft, runways, fleet entries and results

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::hover::HoverCurve;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AircraftCategory {
    FixedWing,
    Rotary,
}

impl fmt::Display for AircraftCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AircraftCategory::FixedWing => write!(f, "Fixed-wing"),
            AircraftCategory::Rotary => write!(f, "Rotary-wing"),
        }
    }
}

/// How a helicopter's hover ceiling is estimated
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoverModel {
    /// Published ceilings at max gross weight, shifted for weight and DA
    CatalogOffset { ige_ft: f64, oge_ft: f64 },
    /// Empirical curve fit with carb-heat and high-DA penalties
    Polynomial(HoverCurve),
}

/// Baseline POH figures and limits for one catalog aircraft.
///
/// Distances are at max takeoff (or landing) weight, sea level, no wind and a
/// paved dry surface. Zero means "not applicable" for this category.
#[derive(Debug, Clone, PartialEq)]
pub struct AircraftProfile {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: AircraftCategory,
    pub takeoff_ground_roll_ft: f64,
    pub takeoff_to_50ft_ft: f64,
    pub landing_ground_roll_ft: f64,
    pub landing_from_50ft_ft: f64,
    pub climb_rate_fpm: f64,
    pub best_climb_speed_mph: f64,
    pub stall_flaps_down_mph: f64,
    pub empty_weight_lbs: f64,
    pub fuel_capacity_gal: f64,
    pub fuel_weight_per_gal: f64,
    pub hopper_capacity_gal: f64,
    pub hopper_weight_per_gal: f64,
    pub max_takeoff_weight_lbs: f64,
    pub max_landing_weight_lbs: f64,
    pub glide_ratio: f64, // Fixed-wing only
    pub hover: Option<HoverModel>, // Rotary only
}

impl AircraftProfile {
    pub fn is_rotary(&self) -> bool {
        self.category == AircraftCategory::Rotary
    }

    /// True if `key` names this aircraft by id or display name, ignoring case
    pub fn matches(&self, key: &str) -> bool {
        let key = key.trim();
        self.id.eq_ignore_ascii_case(key) || self.name.eq_ignore_ascii_case(key)
    }
}

/// Runway surface categories and their distance multipliers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum RunwaySurface {
    #[default]
    PavedDry,
    DryGrass,
    WetGrass,
    Soft,
}

impl RunwaySurface {
    pub const ALL: [RunwaySurface; 4] = [
        RunwaySurface::PavedDry,
        RunwaySurface::DryGrass,
        RunwaySurface::WetGrass,
        RunwaySurface::Soft,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RunwaySurface::PavedDry => "Paved / Dry Hard Surface",
            RunwaySurface::DryGrass => "Dry Grass / Firm Turf",
            RunwaySurface::WetGrass => "Wet Grass / Damp Turf",
            RunwaySurface::Soft => "Soft / Muddy / Rough",
        }
    }

    /// Short name accepted on the command line
    pub fn key(&self) -> &'static str {
        match self {
            RunwaySurface::PavedDry => "paved",
            RunwaySurface::DryGrass => "dry-grass",
            RunwaySurface::WetGrass => "wet-grass",
            RunwaySurface::Soft => "soft",
        }
    }

    /// Ground-roll multiplier relative to a paved dry runway
    pub fn multiplier(&self) -> f64 {
        match self {
            RunwaySurface::PavedDry => 1.00,
            RunwaySurface::DryGrass => 1.15,
            RunwaySurface::WetGrass => 1.45,
            RunwaySurface::Soft => 1.80,
        }
    }

    /// Points this surface adds to the risk score
    pub fn risk_points(&self) -> u32 {
        match self {
            RunwaySurface::PavedDry => 0,
            RunwaySurface::DryGrass => 3,
            RunwaySurface::WetGrass => 8,
            RunwaySurface::Soft => 15,
        }
    }
}

impl fmt::Display for RunwaySurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for RunwaySurface {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        RunwaySurface::ALL
            .into_iter()
            .find(|surface| surface.key().eq_ignore_ascii_case(s) || surface.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let keys: Vec<_> = RunwaySurface::ALL.iter().map(|r| r.key()).collect();
                Error::InvalidArgument(format!(
                    "unknown runway surface '{}' (expected one of: {})",
                    s,
                    keys.join(", ")
                ))
            })
    }
}

/// Inputs for one performance calculation
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceQuery {
    pub aircraft_id: String,
    pub pressure_altitude_ft: f64,
    pub oat_c: f64,
    pub weight_lbs: f64,
    pub wind_kts: f64, // Positive = headwind
    pub surface: RunwaySurface,
}

impl PerformanceQuery {
    pub fn new(
        aircraft_id: impl Into<String>,
        pressure_altitude_ft: f64,
        oat_c: f64,
        weight_lbs: f64,
        wind_kts: f64,
        surface: RunwaySurface,
    ) -> Self {
        Self {
            aircraft_id: aircraft_id.into(),
            pressure_altitude_ft,
            oat_c,
            weight_lbs,
            wind_kts,
            surface,
        }
    }
}

/// A user-named aircraft in the session fleet
#[derive(Debug, Clone, PartialEq)]
pub struct FleetEntry {
    pub nickname: String,
    pub aircraft_id: String,
    pub custom_empty_weight_lbs: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TakeoffPerformance {
    pub ground_roll_ft: f64,
    pub over_50ft_ft: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingPerformance {
    pub ground_roll_ft: f64,
    pub over_50ft_ft: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverCeiling {
    pub ige_ft: f64,
    pub oge_ft: f64,
}
