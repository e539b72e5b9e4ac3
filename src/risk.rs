//! Flight risk scoring
//!
//! Manual factor scores, fixed-point flags and contributions derived from the
//! performance numbers are summed, normalized to a percentage and bucketed
//! into Low / Medium / High.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::atmosphere::density_altitude;
use crate::calculator::{takeoff_for, validate_query};
use crate::catalog::Catalog;
use crate::config::{Coefficients, RiskModel};
use crate::error::{ensure_positive, Error, Result};
use crate::hover::hover_ceiling_for;
use crate::models::PerformanceQuery;

/// Highest score a manual factor may take
pub const MAX_FACTOR_SCORE: u8 = 10;
pub const MAX_PERCENTAGE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskCategory {
    PilotFitness,
    Aircraft,
    Environment,
    Operations,
    ExternalPressure,
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskCategory::PilotFitness => "Pilot (IMSAFE)",
            RiskCategory::Aircraft => "Aircraft",
            RiskCategory::Environment => "Environment",
            RiskCategory::Operations => "Operations",
            RiskCategory::ExternalPressure => "External pressure",
        };
        write!(f, "{}", label)
    }
}

/// A manually scored factor (0–10, higher is riskier)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskFactor {
    Illness,
    Medication,
    Stress,
    Alcohol,
    Fatigue,
    Emotion,
    Maintenance,
    Equipment,
    Loading,
    Weather,
    Terrain,
    Obstacles,
    FieldFamiliarity,
    DutyTime,
    Communications,
    CustomerPressure,
    SchedulePressure,
}

impl RiskFactor {
    pub const ALL: [RiskFactor; 17] = [
        RiskFactor::Illness,
        RiskFactor::Medication,
        RiskFactor::Stress,
        RiskFactor::Alcohol,
        RiskFactor::Fatigue,
        RiskFactor::Emotion,
        RiskFactor::Maintenance,
        RiskFactor::Equipment,
        RiskFactor::Loading,
        RiskFactor::Weather,
        RiskFactor::Terrain,
        RiskFactor::Obstacles,
        RiskFactor::FieldFamiliarity,
        RiskFactor::DutyTime,
        RiskFactor::Communications,
        RiskFactor::CustomerPressure,
        RiskFactor::SchedulePressure,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            RiskFactor::Illness => "illness",
            RiskFactor::Medication => "medication",
            RiskFactor::Stress => "stress",
            RiskFactor::Alcohol => "alcohol",
            RiskFactor::Fatigue => "fatigue",
            RiskFactor::Emotion => "emotion",
            RiskFactor::Maintenance => "maintenance",
            RiskFactor::Equipment => "equipment",
            RiskFactor::Loading => "loading",
            RiskFactor::Weather => "weather",
            RiskFactor::Terrain => "terrain",
            RiskFactor::Obstacles => "obstacles",
            RiskFactor::FieldFamiliarity => "field-familiarity",
            RiskFactor::DutyTime => "duty-time",
            RiskFactor::Communications => "communications",
            RiskFactor::CustomerPressure => "customer-pressure",
            RiskFactor::SchedulePressure => "schedule-pressure",
        }
    }

    pub fn category(&self) -> RiskCategory {
        match self {
            RiskFactor::Illness
            | RiskFactor::Medication
            | RiskFactor::Stress
            | RiskFactor::Alcohol
            | RiskFactor::Fatigue
            | RiskFactor::Emotion => RiskCategory::PilotFitness,
            RiskFactor::Maintenance | RiskFactor::Equipment | RiskFactor::Loading => RiskCategory::Aircraft,
            RiskFactor::Weather | RiskFactor::Terrain | RiskFactor::Obstacles => RiskCategory::Environment,
            RiskFactor::FieldFamiliarity | RiskFactor::DutyTime | RiskFactor::Communications => {
                RiskCategory::Operations
            }
            RiskFactor::CustomerPressure | RiskFactor::SchedulePressure => RiskCategory::ExternalPressure,
        }
    }
}

impl FromStr for RiskFactor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        RiskFactor::ALL
            .into_iter()
            .find(|factor| factor.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidArgument(format!("unknown risk factor '{}'", s)))
    }
}

/// A yes/no condition worth a fixed number of points
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskFlag {
    NightOperation,
    UnfamiliarField,
    NewChemical,
    NoGroundCrew,
}

impl RiskFlag {
    pub const ALL: [RiskFlag; 4] = [
        RiskFlag::NightOperation,
        RiskFlag::UnfamiliarField,
        RiskFlag::NewChemical,
        RiskFlag::NoGroundCrew,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            RiskFlag::NightOperation => "night-operation",
            RiskFlag::UnfamiliarField => "unfamiliar-field",
            RiskFlag::NewChemical => "new-chemical",
            RiskFlag::NoGroundCrew => "no-ground-crew",
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            RiskFlag::NightOperation => 10,
            RiskFlag::UnfamiliarField => 8,
            RiskFlag::NewChemical => 5,
            RiskFlag::NoGroundCrew => 5,
        }
    }
}

impl FromStr for RiskFlag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        RiskFlag::ALL
            .into_iter()
            .find(|flag| flag.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidArgument(format!("unknown risk flag '{}'", s)))
    }
}

/// What an automatically computed contribution came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DerivedSource {
    DensityAltitude,
    WeightFraction,
    RunwayMargin,
    RunwaySurface,
    HoverCeiling,
}

impl fmt::Display for DerivedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DerivedSource::DensityAltitude => "Density altitude",
            DerivedSource::WeightFraction => "Gross weight",
            DerivedSource::RunwayMargin => "Runway margin",
            DerivedSource::RunwaySurface => "Runway surface",
            DerivedSource::HoverCeiling => "Hover ceiling",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedRisk {
    pub source: DerivedSource,
    pub points: u32,
}

/// 5 points per full 1000 ft above the threshold, capped at 20
pub fn density_altitude_risk(density_altitude_ft: f64, threshold_ft: f64) -> u32 {
    let steps = ((density_altitude_ft - threshold_ft) / 1000.0).floor();
    (steps * 5.0).clamp(0.0, 20.0) as u32
}

/// One point per percent above 75% of max takeoff weight, capped at 15
pub fn weight_fraction_risk(weight_fraction: f64) -> u32 {
    if weight_fraction > 0.75 {
        ((weight_fraction - 0.75) * 100.0).floor().min(15.0) as u32
    } else {
        0
    }
}

/// Points for the share of runway left over after the ground roll
pub fn runway_margin_risk(available_ft: f64, required_ft: f64) -> u32 {
    if available_ft <= 0.0 {
        return 18;
    }
    let margin = (available_ft - required_ft) / available_ft;
    if margin >= 0.5 {
        0
    } else if margin >= 0.25 {
        8
    } else {
        18
    }
}

pub fn hover_ceiling_risk(ceiling_ft: f64) -> u32 {
    if ceiling_ft < 2000.0 {
        20
    } else if ceiling_ft < 5000.0 {
        12
    } else {
        0
    }
}

/// Everything that goes into one risk assessment
#[derive(Debug, Clone, Default)]
pub struct RiskFactors {
    scores: BTreeMap<RiskFactor, u8>,
    flags: BTreeSet<RiskFlag>,
    derived: Vec<DerivedRisk>,
}

impl RiskFactors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `name -> score` pairs. Flags take 0 (clear) or 1 (set).
    pub fn from_named_scores<I, K>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, u32)>,
        K: AsRef<str>,
    {
        let mut factors = RiskFactors::new();
        for (name, score) in pairs {
            let name = name.as_ref();
            if let Ok(flag) = name.parse::<RiskFlag>() {
                let on = match score {
                    0 => false,
                    1 => true,
                    _ => {
                        return Err(Error::InvalidArgument(format!(
                            "{} is a flag and takes 0 or 1, got {}",
                            flag.key(),
                            score
                        )));
                    }
                };
                factors.set_flag(flag, on);
                continue;
            }
            let factor: RiskFactor = name.parse()?;
            let score = u8::try_from(score).unwrap_or(u8::MAX);
            factors.set_score(factor, score)?;
        }
        Ok(factors)
    }

    pub fn set_score(&mut self, factor: RiskFactor, score: u8) -> Result<()> {
        if score > MAX_FACTOR_SCORE {
            return Err(Error::InvalidArgument(format!(
                "{} score must be between 0 and {}, got {}",
                factor.key(),
                MAX_FACTOR_SCORE,
                score
            )));
        }
        self.scores.insert(factor, score);
        Ok(())
    }

    pub fn score(&self, factor: RiskFactor) -> u8 {
        self.scores.get(&factor).copied().unwrap_or(0)
    }

    pub fn set_flag(&mut self, flag: RiskFlag, on: bool) {
        if on {
            self.flags.insert(flag);
        } else {
            self.flags.remove(&flag);
        }
    }

    pub fn has_flag(&self, flag: RiskFlag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn add_derived(&mut self, derived: DerivedRisk) {
        self.derived.push(derived);
    }

    pub fn extend_derived(&mut self, derived: impl IntoIterator<Item = DerivedRisk>) {
        self.derived.extend(derived);
    }

    pub fn derived(&self) -> &[DerivedRisk] {
        &self.derived
    }

    pub fn category_points(&self, category: RiskCategory) -> u32 {
        self.scores
            .iter()
            .filter(|(factor, _)| factor.category() == category)
            .map(|(_, score)| u32::from(*score))
            .sum()
    }

    pub fn flag_points(&self) -> u32 {
        self.flags.iter().map(|flag| flag.points()).sum()
    }

    pub fn derived_points(&self) -> u32 {
        self.derived.iter().map(|d| d.points).sum()
    }

    pub fn total_points(&self) -> u32 {
        let manual: u32 = self.scores.values().map(|s| u32::from(*s)).sum();
        manual + self.flag_points() + self.derived_points()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

pub fn risk_level(percentage: f64, model: &RiskModel) -> RiskLevel {
    if percentage <= model.low_max_percent {
        RiskLevel::Low
    } else if percentage <= model.medium_max_percent {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Result of a risk assessment
#[derive(Debug, Clone)]
pub struct RiskScore {
    pub total_points: u32,
    pub percentage: f64,
    pub level: RiskLevel,
    pub category_points: Vec<(RiskCategory, u32)>,
    pub flag_points: u32,
    pub derived: Vec<DerivedRisk>,
}

/// Sum, normalize and bucket the factors
pub fn score_risk(factors: &RiskFactors, model: &RiskModel) -> Result<RiskScore> {
    model.validate()?;
    let total = factors.total_points();
    let percentage = (f64::from(total) / model.normalizer).clamp(0.0, MAX_PERCENTAGE);
    let level = risk_level(percentage, model);

    let categories = [
        RiskCategory::PilotFitness,
        RiskCategory::Aircraft,
        RiskCategory::Environment,
        RiskCategory::Operations,
        RiskCategory::ExternalPressure,
    ];

    debug!("risk: {} points → {:.0}% ({})", total, percentage, level);
    Ok(RiskScore {
        total_points: total,
        percentage,
        level,
        category_points: categories.iter().map(|c| (*c, factors.category_points(*c))).collect(),
        flag_points: factors.flag_points(),
        derived: factors.derived().to_vec(),
    })
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Risk Assessment ===")?;
        for (category, points) in &self.category_points {
            writeln!(f, "  {:<20} {:>3}", category.to_string(), points)?;
        }
        writeln!(f, "  {:<20} {:>3}", "Flags", self.flag_points)?;
        for derived in &self.derived {
            writeln!(f, "  {:<20} {:>3}", derived.source.to_string(), derived.points)?;
        }
        writeln!(f, "Total points: {}", self.total_points)?;
        writeln!(f, "Risk: {:.0}% ({})", self.percentage, self.level)
    }
}

/// Performance inputs for the automatic risk contributions
#[derive(Debug, Clone)]
pub struct RiskContext {
    pub query: PerformanceQuery,
    /// Usable runway length; the runway margin is skipped when absent
    pub runway_available_ft: Option<f64>,
    pub carb_heat: bool,
}

/// Contributions computed from the aircraft, conditions and runway.
///
/// Runway margin and surface apply to fixed-wing aircraft, the hover ceiling
/// (IGE) to rotary-wing ones.
pub fn derive_risks(
    catalog: &Catalog,
    coeffs: &Coefficients,
    model: &RiskModel,
    context: &RiskContext,
) -> Result<Vec<DerivedRisk>> {
    model.validate()?;
    let query = &context.query;
    let aircraft = catalog.get(&query.aircraft_id)?;
    validate_query(query)?;
    let da = density_altitude(query.pressure_altitude_ft, query.oat_c);

    let mut derived = vec![
        DerivedRisk {
            source: DerivedSource::DensityAltitude,
            points: density_altitude_risk(da, model.density_altitude_threshold_ft),
        },
        DerivedRisk {
            source: DerivedSource::WeightFraction,
            points: weight_fraction_risk(query.weight_lbs / aircraft.max_takeoff_weight_lbs),
        },
    ];

    if aircraft.is_rotary() {
        let ceiling = hover_ceiling_for(aircraft, da, query.weight_lbs, context.carb_heat)?;
        derived.push(DerivedRisk {
            source: DerivedSource::HoverCeiling,
            points: hover_ceiling_risk(ceiling.ige_ft),
        });
    } else {
        if let Some(available) = context.runway_available_ft {
            ensure_positive("available runway", available)?;
            let takeoff = takeoff_for(aircraft, coeffs, query)?;
            derived.push(DerivedRisk {
                source: DerivedSource::RunwayMargin,
                points: runway_margin_risk(available, takeoff.ground_roll_ft),
            });
        }
        derived.push(DerivedRisk {
            source: DerivedSource::RunwaySurface,
            points: query.surface.risk_points(),
        });
    }

    Ok(derived)
}
