//! Performance adjustment pipeline
//!
//! Baseline POH figures are corrected in a fixed order: weight, density
//! altitude, wind, then runway surface. Climb rate skips wind and surface.

use log::debug;

use crate::atmosphere::density_altitude;
use crate::catalog::Catalog;
use crate::config::Coefficients;
use crate::error::{ensure_finite, ensure_positive, Error, Result};
use crate::hover::hover_ceiling_for;
use crate::models::{
    AircraftCategory, AircraftProfile, HoverCeiling, LandingPerformance, PerformanceQuery, RunwaySurface,
    TakeoffPerformance,
};

/// Feet per nautical mile
pub const FT_PER_NM: f64 = 6076.0;

/// Default top of the climb profile (ft pressure altitude)
pub const CLIMB_PROFILE_MAX_ALT_FT: f64 = 12000.0;
/// Default number of climb profile samples
pub const CLIMB_PROFILE_SAMPLES: usize = 60;

/// Scale by `(current / reference) ^ exponent`
pub fn adjust_for_weight(value: f64, current_weight: f64, reference_weight: f64, exponent: f64) -> f64 {
    value * (current_weight / reference_weight).powf(exponent)
}

/// Distances grow with density altitude
pub fn adjust_distance_for_density_altitude(value: f64, density_altitude_ft: f64, coeffs: &Coefficients) -> f64 {
    value * (1.0 + coeffs.distance_per_1000ft_da * density_altitude_ft / 1000.0)
}

/// Climb rate shrinks with density altitude, never below zero
pub fn adjust_climb_for_density_altitude(value: f64, density_altitude_ft: f64, coeffs: &Coefficients) -> f64 {
    (value * (1.0 - coeffs.climb_per_1000ft_da * density_altitude_ft / 1000.0)).max(0.0)
}

/// Wind multiplier; headwind is positive and the factor never drops below the floor
pub fn wind_factor(wind_kts: f64, coeffs: &Coefficients) -> f64 {
    (1.0 - coeffs.wind_reduction_per_9kt * wind_kts / 9.0).max(coeffs.wind_factor_floor)
}

pub fn adjust_for_wind(value: f64, wind_kts: f64, coeffs: &Coefficients) -> f64 {
    value * wind_factor(wind_kts, coeffs)
}

pub fn adjust_for_surface(value: f64, surface: RunwaySurface) -> f64 {
    value * surface.multiplier()
}

/// Run one baseline distance through the full pipeline
fn adjusted_distance(
    base: f64,
    reference_weight: f64,
    exponent: f64,
    query: &PerformanceQuery,
    density_altitude_ft: f64,
    coeffs: &Coefficients,
) -> f64 {
    let value = adjust_for_weight(base, query.weight_lbs, reference_weight, exponent);
    let value = adjust_distance_for_density_altitude(value, density_altitude_ft, coeffs);
    let value = adjust_for_wind(value, query.wind_kts, coeffs);
    adjust_for_surface(value, query.surface)
}

pub(crate) fn validate_query(query: &PerformanceQuery) -> Result<()> {
    ensure_finite("pressure altitude", query.pressure_altitude_ft)?;
    ensure_finite("outside air temperature", query.oat_c)?;
    ensure_finite("wind", query.wind_kts)?;
    ensure_positive("weight", query.weight_lbs)?;
    Ok(())
}

pub fn takeoff_for(aircraft: &AircraftProfile, coeffs: &Coefficients, query: &PerformanceQuery) -> Result<TakeoffPerformance> {
    validate_query(query)?;
    let da = density_altitude(query.pressure_altitude_ft, query.oat_c);
    let reference = aircraft.max_takeoff_weight_lbs;
    let exponent = coeffs.takeoff_weight_exponent;

    let ground_roll = adjusted_distance(aircraft.takeoff_ground_roll_ft, reference, exponent, query, da, coeffs);
    let over_50ft = adjusted_distance(aircraft.takeoff_to_50ft_ft, reference, exponent, query, da, coeffs)
        * coeffs.takeoff_50ft_margin;

    debug!(
        "{}: takeoff at DA {:.0} ft, {:.0} lbs, wind {} kt, {}: roll {:.0} ft, 50 ft {:.0} ft",
        aircraft.id, da, query.weight_lbs, query.wind_kts, query.surface, ground_roll, over_50ft
    );
    Ok(TakeoffPerformance {
        ground_roll_ft: ground_roll,
        over_50ft_ft: over_50ft,
    })
}

/// Takeoff ground roll and distance to clear 50 ft
pub fn compute_takeoff(catalog: &Catalog, coeffs: &Coefficients, query: &PerformanceQuery) -> Result<TakeoffPerformance> {
    let aircraft = catalog.get(&query.aircraft_id)?;
    takeoff_for(aircraft, coeffs, query)
}

pub fn landing_for(aircraft: &AircraftProfile, coeffs: &Coefficients, query: &PerformanceQuery) -> Result<LandingPerformance> {
    validate_query(query)?;
    let da = density_altitude(query.pressure_altitude_ft, query.oat_c);
    let reference = aircraft.max_landing_weight_lbs;
    let exponent = coeffs.landing_weight_exponent;

    let ground_roll = adjusted_distance(aircraft.landing_ground_roll_ft, reference, exponent, query, da, coeffs);
    let over_50ft = adjusted_distance(aircraft.landing_from_50ft_ft, reference, exponent, query, da, coeffs)
        * coeffs.landing_50ft_margin;

    debug!(
        "{}: landing at DA {:.0} ft, {:.0} lbs: roll {:.0} ft, from 50 ft {:.0} ft",
        aircraft.id, da, query.weight_lbs, ground_roll, over_50ft
    );
    Ok(LandingPerformance {
        ground_roll_ft: ground_roll,
        over_50ft_ft: over_50ft,
    })
}

/// Landing ground roll and distance from 50 ft
pub fn compute_landing(catalog: &Catalog, coeffs: &Coefficients, query: &PerformanceQuery) -> Result<LandingPerformance> {
    let aircraft = catalog.get(&query.aircraft_id)?;
    landing_for(aircraft, coeffs, query)
}

pub fn climb_rate_for(
    aircraft: &AircraftProfile,
    coeffs: &Coefficients,
    pressure_altitude_ft: f64,
    oat_c: f64,
    weight_lbs: f64,
) -> Result<f64> {
    ensure_finite("pressure altitude", pressure_altitude_ft)?;
    ensure_finite("outside air temperature", oat_c)?;
    ensure_positive("weight", weight_lbs)?;

    let da = density_altitude(pressure_altitude_ft, oat_c);
    let rate = adjust_for_weight(
        aircraft.climb_rate_fpm,
        weight_lbs,
        aircraft.max_takeoff_weight_lbs,
        coeffs.climb_weight_exponent,
    );
    Ok(adjust_climb_for_density_altitude(rate, da, coeffs))
}

/// Rate of climb (fpm)
pub fn compute_climb_rate(
    catalog: &Catalog,
    coeffs: &Coefficients,
    pressure_altitude_ft: f64,
    oat_c: f64,
    weight_lbs: f64,
    aircraft_id: &str,
) -> Result<f64> {
    let aircraft = catalog.get(aircraft_id)?;
    climb_rate_for(aircraft, coeffs, pressure_altitude_ft, oat_c, weight_lbs)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimbPoint {
    pub pressure_altitude_ft: f64,
    pub climb_rate_fpm: f64,
}

/// Rate of climb sampled evenly from sea level to `max_altitude_ft`
pub fn climb_profile(
    catalog: &Catalog,
    coeffs: &Coefficients,
    oat_c: f64,
    weight_lbs: f64,
    aircraft_id: &str,
    max_altitude_ft: f64,
    samples: usize,
) -> Result<Vec<ClimbPoint>> {
    let aircraft = catalog.get(aircraft_id)?;
    ensure_positive("profile ceiling", max_altitude_ft)?;
    if samples < 2 {
        return Err(Error::InvalidArgument(format!(
            "climb profile needs at least 2 samples, got {}",
            samples
        )));
    }

    let step = max_altitude_ft / (samples - 1) as f64;
    (0..samples)
        .map(|i| {
            let altitude = step * i as f64;
            Ok(ClimbPoint {
                pressure_altitude_ft: altitude,
                climb_rate_fpm: climb_rate_for(aircraft, coeffs, altitude, oat_c, weight_lbs)?,
            })
        })
        .collect()
}

/// Stall speed scales with the square root of the weight ratio
pub fn stall_speed_for(aircraft: &AircraftProfile, weight_lbs: f64) -> Result<f64> {
    ensure_positive("weight", weight_lbs)?;
    Ok(aircraft.stall_flaps_down_mph * (weight_lbs / aircraft.max_landing_weight_lbs).sqrt())
}

/// Flaps-down stall speed (mph); zero for helicopters
pub fn compute_stall_speed(catalog: &Catalog, weight_lbs: f64, aircraft_id: &str) -> Result<f64> {
    let aircraft = catalog.get(aircraft_id)?;
    stall_speed_for(aircraft, weight_lbs)
}

pub fn glide_distance_for(aircraft: &AircraftProfile, coeffs: &Coefficients, height_ft: f64, wind_kts: f64) -> Result<f64> {
    ensure_finite("height", height_ft)?;
    ensure_finite("wind", wind_kts)?;
    if height_ft < 0.0 {
        return Err(Error::InvalidArgument(format!("height must not be negative, got {}", height_ft)));
    }

    let distance = match aircraft.category {
        AircraftCategory::FixedWing => {
            (height_ft / FT_PER_NM) * aircraft.glide_ratio * ((coeffs.glide_ground_speed_kts + wind_kts) / 60.0)
        }
        // Autorotation, roughly 4.5:1
        AircraftCategory::Rotary => {
            (height_ft / coeffs.autorotation_ft_per_nm) * (1.0 + wind_kts / coeffs.autorotation_wind_kts)
        }
    };
    // Extreme tailwinds drive both formulas negative
    Ok(distance.max(0.0))
}

/// Still-air glide (or autorotation) distance in nautical miles
pub fn compute_glide_distance(
    catalog: &Catalog,
    coeffs: &Coefficients,
    height_ft: f64,
    wind_kts: f64,
    aircraft_id: &str,
) -> Result<f64> {
    let aircraft = catalog.get(aircraft_id)?;
    glide_distance_for(aircraft, coeffs, height_ft, wind_kts)
}

/// Everything the calculator knows about one query
#[derive(Debug, Clone)]
pub struct PerformanceSummary {
    pub aircraft_name: String,
    pub category: AircraftCategory,
    pub query: PerformanceQuery,
    pub density_altitude_ft: f64,
    pub takeoff: Option<TakeoffPerformance>, // Fixed-wing only
    pub landing: Option<LandingPerformance>, // Fixed-wing only
    pub climb_rate_fpm: f64,
    pub best_climb_speed_mph: f64,
    pub stall_speed_mph: Option<f64>, // Fixed-wing only
    pub hover: Option<HoverCeiling>,  // Rotary only
}

/// Run every applicable calculation for a query
pub fn summarize(
    catalog: &Catalog,
    coeffs: &Coefficients,
    query: &PerformanceQuery,
    carb_heat: bool,
) -> Result<PerformanceSummary> {
    let aircraft = catalog.get(&query.aircraft_id)?;
    validate_query(query)?;
    let da = density_altitude(query.pressure_altitude_ft, query.oat_c);

    let (takeoff, landing, stall, hover) = match aircraft.category {
        AircraftCategory::FixedWing => (
            Some(takeoff_for(aircraft, coeffs, query)?),
            Some(landing_for(aircraft, coeffs, query)?),
            Some(stall_speed_for(aircraft, query.weight_lbs)?),
            None,
        ),
        AircraftCategory::Rotary => (
            None,
            None,
            None,
            Some(hover_ceiling_for(aircraft, da, query.weight_lbs, carb_heat)?),
        ),
    };

    Ok(PerformanceSummary {
        aircraft_name: aircraft.name.clone(),
        category: aircraft.category,
        query: query.clone(),
        density_altitude_ft: da,
        takeoff,
        landing,
        climb_rate_fpm: climb_rate_for(aircraft, coeffs, query.pressure_altitude_ft, query.oat_c, query.weight_lbs)?,
        best_climb_speed_mph: aircraft.best_climb_speed_mph,
        stall_speed_mph: stall,
        hover,
    })
}

impl std::fmt::Display for PerformanceSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Performance: {} ({}) ===", self.aircraft_name, self.category)?;
        writeln!(
            f,
            "Conditions: PA {:.0} ft, OAT {:.1}°C, {:.0} lbs, wind {:.0} kt, {}",
            self.query.pressure_altitude_ft,
            self.query.oat_c,
            self.query.weight_lbs,
            self.query.wind_kts,
            self.query.surface
        )?;
        writeln!(f, "Density altitude: {:.0} ft", self.density_altitude_ft)?;
        writeln!(f)?;

        if let Some(takeoff) = &self.takeoff {
            writeln!(f, "Takeoff:")?;
            writeln!(f, "  Ground roll:   {:.0} ft", takeoff.ground_roll_ft)?;
            writeln!(f, "  Over 50 ft:    {:.0} ft", takeoff.over_50ft_ft)?;
        }
        if let Some(landing) = &self.landing {
            writeln!(f, "Landing:")?;
            writeln!(f, "  Ground roll:   {:.0} ft", landing.ground_roll_ft)?;
            writeln!(f, "  From 50 ft:    {:.0} ft", landing.over_50ft_ft)?;
        }
        if let Some(hover) = &self.hover {
            writeln!(f, "Hover ceiling:")?;
            writeln!(f, "  IGE:           {:.0} ft", hover.ige_ft)?;
            writeln!(f, "  OGE:           {:.0} ft", hover.oge_ft)?;
        }

        writeln!(f, "Climb:")?;
        writeln!(f, "  Rate:          {:.0} fpm", self.climb_rate_fpm)?;
        writeln!(f, "  Best rate at:  {:.0} mph", self.best_climb_speed_mph)?;
        if let Some(stall) = self.stall_speed_mph {
            writeln!(f, "Stall (flaps down): {:.0} mph", stall)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn at502b_query(weight: f64) -> PerformanceQuery {
        PerformanceQuery::new("at-502b", 0.0, 15.0, weight, 0.0, RunwaySurface::PavedDry)
    }

    #[test]
    fn baseline_conditions_return_catalog_figures() {
        let catalog = Catalog::builtin();
        let coeffs = Coefficients::STANDARD;
        let takeoff = compute_takeoff(&catalog, &coeffs, &at502b_query(9400.0)).unwrap();
        assert_eq!(takeoff.ground_roll_ft, 1140.0);
        assert_relative_eq!(takeoff.over_50ft_ft, 2600.0 * 1.10);
    }

    #[test]
    fn half_weight_takeoff() {
        let catalog = Catalog::builtin();
        let takeoff = compute_takeoff(&catalog, &Coefficients::STANDARD, &at502b_query(4700.0)).unwrap();
        assert_relative_eq!(takeoff.ground_roll_ft, 1140.0 * 0.5_f64.powf(1.5));
        assert_abs_diff_eq!(takeoff.ground_roll_ft, 403.0, epsilon = 0.5);
    }

    #[test]
    fn landing_is_linear_in_weight() {
        let catalog = Catalog::builtin();
        let coeffs = Coefficients::STANDARD;
        let full = compute_landing(&catalog, &coeffs, &at502b_query(8000.0)).unwrap();
        assert_relative_eq!(full.ground_roll_ft, 600.0);
        assert_relative_eq!(full.over_50ft_ft, 1350.0 * 1.15);
        let half = compute_landing(&catalog, &coeffs, &at502b_query(4000.0)).unwrap();
        assert_relative_eq!(half.ground_roll_ft, 300.0);
    }

    #[test]
    fn takeoff_grows_with_weight() {
        let catalog = Catalog::builtin();
        let coeffs = Coefficients::STANDARD;
        let mut last = 0.0;
        for weight in [5000.0, 6000.0, 7000.0, 8000.0, 9000.0, 9400.0, 10000.0] {
            let roll = compute_takeoff(&catalog, &coeffs, &at502b_query(weight)).unwrap().ground_roll_ft;
            assert!(roll > last);
            last = roll;
        }
    }

    #[test]
    fn climb_falls_with_weight() {
        let catalog = Catalog::builtin();
        let coeffs = Coefficients::STANDARD;
        let mut last = f64::MAX;
        for weight in [5000.0, 6000.0, 7000.0, 8000.0, 9400.0] {
            let rate = compute_climb_rate(&catalog, &coeffs, 0.0, 15.0, weight, "at-502b").unwrap();
            assert!(rate < last);
            last = rate;
        }
        let at_max = compute_climb_rate(&catalog, &coeffs, 0.0, 15.0, 9400.0, "at-502b").unwrap();
        assert_relative_eq!(at_max, 870.0);
    }

    #[test]
    fn climb_is_floored_at_zero() {
        let coeffs = Coefficients::STANDARD;
        // 5% per 1000 ft reaches zero at 20 000 ft DA
        assert_eq!(adjust_climb_for_density_altitude(870.0, 25000.0, &coeffs), 0.0);
        let catalog = Catalog::builtin();
        let rate = compute_climb_rate(&catalog, &coeffs, 18000.0, 40.0, 9400.0, "at-502b").unwrap();
        assert_eq!(rate, 0.0);
    }

    #[test]
    fn density_altitude_lengthens_distances() {
        let coeffs = Coefficients::STANDARD;
        assert_relative_eq!(adjust_distance_for_density_altitude(1000.0, 5000.0, &coeffs), 1350.0);
    }

    #[test]
    fn wind_floor_is_reached_at_45_knots() {
        let coeffs = Coefficients::STANDARD;
        assert_eq!(wind_factor(45.0, &coeffs), 0.5);
        assert_eq!(wind_factor(60.0, &coeffs), 0.5);
        assert_eq!(wind_factor(200.0, &coeffs), 0.5);
        assert!(wind_factor(44.0, &coeffs) > 0.5);
        assert_eq!(adjust_for_wind(1000.0, 90.0, &coeffs), adjust_for_wind(1000.0, 45.0, &coeffs));
    }

    #[test]
    fn tailwind_lengthens_distances() {
        let coeffs = Coefficients::STANDARD;
        assert_relative_eq!(wind_factor(-9.0, &coeffs), 1.1);
    }

    #[test]
    fn paved_dry_surface_changes_nothing() {
        assert_eq!(adjust_for_surface(1234.5, RunwaySurface::PavedDry), 1234.5);
        assert_relative_eq!(adjust_for_surface(1000.0, RunwaySurface::Soft), 1800.0);
    }

    #[test]
    fn surface_scales_takeoff_but_not_climb() {
        let catalog = Catalog::builtin();
        let coeffs = Coefficients::STANDARD;
        let mut query = at502b_query(9400.0);
        query.surface = RunwaySurface::WetGrass;
        let takeoff = compute_takeoff(&catalog, &coeffs, &query).unwrap();
        assert_relative_eq!(takeoff.ground_roll_ft, 1140.0 * 1.45);

        let paved = compute_climb_rate(&catalog, &coeffs, 0.0, 15.0, 9400.0, "at-502b").unwrap();
        let summary = summarize(&catalog, &coeffs, &query, false).unwrap();
        assert_eq!(summary.climb_rate_fpm, paved);
    }

    #[test]
    fn stall_speed_follows_square_root_of_weight() {
        let catalog = Catalog::builtin();
        assert_relative_eq!(compute_stall_speed(&catalog, 8000.0, "at-502b").unwrap(), 68.0);
        assert_relative_eq!(compute_stall_speed(&catalog, 2000.0, "at-502b").unwrap(), 34.0);
    }

    #[test]
    fn glide_distances() {
        let catalog = Catalog::builtin();
        let coeffs = Coefficients::STANDARD;
        let fixed = compute_glide_distance(&catalog, &coeffs, 6076.0, 20.0, "at-502b").unwrap();
        assert_relative_eq!(fixed, 8.0 * 120.0 / 60.0);
        let rotary = compute_glide_distance(&catalog, &coeffs, 1300.0, 20.0, "bell-206b3").unwrap();
        assert_relative_eq!(rotary, 2.0);
        assert_eq!(compute_glide_distance(&catalog, &coeffs, 1000.0, -150.0, "at-502b").unwrap(), 0.0);
        assert!(compute_glide_distance(&catalog, &coeffs, -10.0, 0.0, "at-502b").is_err());
    }

    #[test]
    fn unknown_aircraft_is_not_found() {
        let catalog = Catalog::builtin();
        let query = PerformanceQuery::new("Cessna 172", 0.0, 15.0, 2000.0, 0.0, RunwaySurface::PavedDry);
        assert!(matches!(
            compute_takeoff(&catalog, &Coefficients::STANDARD, &query),
            Err(Error::AircraftNotFound(_))
        ));
    }

    #[test]
    fn non_positive_weight_is_rejected() {
        let catalog = Catalog::builtin();
        let coeffs = Coefficients::STANDARD;
        assert!(matches!(
            compute_takeoff(&catalog, &coeffs, &at502b_query(0.0)),
            Err(Error::InvalidArgument(_))
        ));
        assert!(compute_stall_speed(&catalog, -5.0, "at-502b").is_err());
    }

    #[test]
    fn climb_profile_spans_range() {
        let catalog = Catalog::builtin();
        let coeffs = Coefficients::STANDARD;
        let profile = climb_profile(
            &catalog,
            &coeffs,
            15.0,
            9400.0,
            "at-502b",
            CLIMB_PROFILE_MAX_ALT_FT,
            CLIMB_PROFILE_SAMPLES,
        )
        .unwrap();
        assert_eq!(profile.len(), 60);
        assert_eq!(profile[0].pressure_altitude_ft, 0.0);
        assert_relative_eq!(profile[59].pressure_altitude_ft, 12000.0);
        assert!(profile.windows(2).all(|w| w[1].climb_rate_fpm <= w[0].climb_rate_fpm));
        assert!(climb_profile(&catalog, &coeffs, 15.0, 9400.0, "at-502b", 12000.0, 1).is_err());
    }

    #[test]
    fn summary_matches_category() {
        let catalog = Catalog::builtin();
        let coeffs = Coefficients::STANDARD;
        let fixed = summarize(&catalog, &coeffs, &at502b_query(9400.0), false).unwrap();
        assert!(fixed.takeoff.is_some() && fixed.hover.is_none());
        assert!(fixed.to_string().contains("Ground roll:   1140 ft"));

        let query = PerformanceQuery::new("r44-raven", 2000.0, 25.0, 2300.0, 5.0, RunwaySurface::PavedDry);
        let rotary = summarize(&catalog, &coeffs, &query, true).unwrap();
        assert!(rotary.takeoff.is_none() && rotary.stall_speed_mph.is_none());
        assert!(rotary.hover.is_some());
        assert!(rotary.to_string().contains("Hover ceiling:"));
    }
}
