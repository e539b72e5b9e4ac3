//! Gross weight build-up and limit checks

use std::fmt;

use crate::catalog::Catalog;
use crate::error::{ensure_positive, ensure_within, Result};
use crate::models::AircraftProfile;

pub const WITHIN_LIMITS: &str = "Within limits";
pub const OVERWEIGHT: &str = "Overweight!";
pub const EXCEEDS_LANDING: &str = "exceeds max landing weight";

/// Gross weight against the aircraft's takeoff and landing limits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightBalance {
    pub empty_weight_lbs: f64,
    pub fuel_weight_lbs: f64,
    pub hopper_weight_lbs: f64,
    pub pilot_weight_lbs: f64,
    pub total_weight_lbs: f64,
    pub max_takeoff_weight_lbs: f64,
    pub max_landing_weight_lbs: f64,
}

impl WeightBalance {
    pub fn exceeds_takeoff_limit(&self) -> bool {
        self.total_weight_lbs > self.max_takeoff_weight_lbs
    }

    pub fn exceeds_landing_limit(&self) -> bool {
        self.total_weight_lbs > self.max_landing_weight_lbs
    }

    /// Takeoff verdict, with the landing qualifier appended when it applies
    pub fn status_label(&self) -> String {
        let verdict = if self.exceeds_takeoff_limit() { OVERWEIGHT } else { WITHIN_LIMITS };
        if self.exceeds_landing_limit() {
            format!("{} ({})", verdict, EXCEEDS_LANDING)
        } else {
            verdict.to_string()
        }
    }

    /// Fraction of max takeoff weight
    pub fn weight_fraction(&self) -> f64 {
        self.total_weight_lbs / self.max_takeoff_weight_lbs
    }
}

impl fmt::Display for WeightBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Weight & Balance ===")?;
        writeln!(f, "  Empty:   {:>8.0} lbs", self.empty_weight_lbs)?;
        writeln!(f, "  Fuel:    {:>8.0} lbs", self.fuel_weight_lbs)?;
        writeln!(f, "  Hopper:  {:>8.0} lbs", self.hopper_weight_lbs)?;
        writeln!(f, "  Pilot:   {:>8.0} lbs", self.pilot_weight_lbs)?;
        writeln!(f, "  Total:   {:>8.0} lbs", self.total_weight_lbs)?;
        writeln!(
            f,
            "  Limits:  {:.0} lbs takeoff, {:.0} lbs landing",
            self.max_takeoff_weight_lbs, self.max_landing_weight_lbs
        )?;
        writeln!(f, "Status: {}", self.status_label())
    }
}

/// Weight & balance for a resolved aircraft.
///
/// `custom_empty_weight_lbs` replaces the catalog empty weight, e.g. for a
/// fleet aircraft with extra equipment.
pub fn weight_and_balance(
    aircraft: &AircraftProfile,
    fuel_gal: f64,
    hopper_gal: f64,
    pilot_weight_lbs: f64,
    custom_empty_weight_lbs: Option<f64>,
) -> Result<WeightBalance> {
    ensure_within("fuel", fuel_gal, 0.0, aircraft.fuel_capacity_gal)?;
    ensure_within("hopper load", hopper_gal, 0.0, aircraft.hopper_capacity_gal)?;
    ensure_positive("pilot weight", pilot_weight_lbs)?;
    let empty = match custom_empty_weight_lbs {
        Some(weight) => ensure_positive("custom empty weight", weight)?,
        None => aircraft.empty_weight_lbs,
    };

    let fuel = fuel_gal * aircraft.fuel_weight_per_gal;
    let hopper = hopper_gal * aircraft.hopper_weight_per_gal;

    Ok(WeightBalance {
        empty_weight_lbs: empty,
        fuel_weight_lbs: fuel,
        hopper_weight_lbs: hopper,
        pilot_weight_lbs,
        total_weight_lbs: empty + fuel + hopper + pilot_weight_lbs,
        max_takeoff_weight_lbs: aircraft.max_takeoff_weight_lbs,
        max_landing_weight_lbs: aircraft.max_landing_weight_lbs,
    })
}

/// Weight & balance for a catalog aircraft
pub fn compute_weight_balance(
    catalog: &Catalog,
    fuel_gal: f64,
    hopper_gal: f64,
    pilot_weight_lbs: f64,
    aircraft_id: &str,
    custom_empty_weight_lbs: Option<f64>,
) -> Result<WeightBalance> {
    let aircraft = catalog.get(aircraft_id)?;
    weight_and_balance(aircraft, fuel_gal, hopper_gal, pilot_weight_lbs, custom_empty_weight_lbs)
}
