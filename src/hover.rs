//! Helicopter hover ceiling models
//!
//! Two empirical models are supported. Each rotary catalog entry names the one
//! that applies to it.

use log::debug;

use crate::catalog::Catalog;
use crate::error::{ensure_finite, ensure_positive, Error, Result};
use crate::models::{AircraftProfile, HoverCeiling, HoverModel};

/// Weight (lbs) that each unit of the catalog-offset weight factor represents
const OFFSET_WEIGHT_STEP_LBS: f64 = 500.0;
const OFFSET_IGE_FT_PER_STEP: f64 = 1000.0;
const OFFSET_OGE_FT_PER_STEP: f64 = 800.0;

/// Coefficients of the polynomial hover-ceiling curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverCurve {
    /// Ceiling with no weight or DA penalty; also the upper clamp
    pub max_ceiling_ft: f64,
    /// Gross weight above which the weight penalty starts
    pub reference_weight_lbs: f64,
    pub weight_coeff: f64,
    pub weight_exponent: f64,
    pub weight_linear: f64,
    pub da_coeff: f64,
    pub da_exponent: f64,
    pub da_linear: f64,
    /// Ceiling lost with carburetor heat on
    pub carb_heat_penalty_ft: f64,
    /// Density altitude above which the high-DA factor is applied
    pub high_da_threshold_ft: f64,
    pub high_da_factor: f64,
    /// OGE ceiling as a fraction of the IGE ceiling
    pub oge_fraction: f64,
}

impl HoverCurve {
    pub const STANDARD: HoverCurve = HoverCurve {
        max_ceiling_ft: 11600.0,
        reference_weight_lbs: 1800.0,
        weight_coeff: 0.00012,
        weight_exponent: 1.8,
        weight_linear: 3.5,
        da_coeff: 0.00008,
        da_exponent: 1.9,
        da_linear: 0.07,
        carb_heat_penalty_ft: 2400.0,
        high_da_threshold_ft: 9600.0,
        high_da_factor: 0.75,
        oge_fraction: 0.72,
    };

    /// IGE ceiling (ft) at a density altitude and gross weight, clamped to
    /// `[0, max_ceiling_ft]`
    pub fn ige_ceiling(&self, density_altitude_ft: f64, weight_lbs: f64, carb_heat: bool) -> f64 {
        let excess = (weight_lbs - self.reference_weight_lbs).max(0.0);
        // powf of a negative base is NaN; below sea-level DA costs nothing
        let da = density_altitude_ft.max(0.0);

        let weight_penalty = self.weight_coeff * excess.powf(self.weight_exponent) + self.weight_linear * excess;
        let da_penalty = self.da_coeff * da.powf(self.da_exponent) + self.da_linear * da;

        let mut ceiling = self.max_ceiling_ft - weight_penalty - da_penalty;
        if carb_heat {
            ceiling -= self.carb_heat_penalty_ft;
        }
        if density_altitude_ft > self.high_da_threshold_ft {
            ceiling *= self.high_da_factor;
        }
        ceiling.clamp(0.0, self.max_ceiling_ft)
    }

    pub fn ceilings(&self, density_altitude_ft: f64, weight_lbs: f64, carb_heat: bool) -> HoverCeiling {
        let ige = self.ige_ceiling(density_altitude_ft, weight_lbs, carb_heat);
        HoverCeiling {
            ige_ft: ige,
            oge_ft: (ige * self.oge_fraction).clamp(0.0, self.max_ceiling_ft),
        }
    }
}

impl Default for HoverCurve {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Shift published max-gross ceilings for weight below max gross and for DA
pub fn offset_ceilings(
    base_ige_ft: f64,
    base_oge_ft: f64,
    max_takeoff_weight_lbs: f64,
    density_altitude_ft: f64,
    weight_lbs: f64,
) -> HoverCeiling {
    let weight_factor = (max_takeoff_weight_lbs - weight_lbs) / OFFSET_WEIGHT_STEP_LBS;
    // A foot of ceiling lost per foot of density altitude
    let da_loss = density_altitude_ft;

    HoverCeiling {
        ige_ft: (base_ige_ft + weight_factor * OFFSET_IGE_FT_PER_STEP - da_loss).max(0.0),
        oge_ft: (base_oge_ft + weight_factor * OFFSET_OGE_FT_PER_STEP - da_loss).max(0.0),
    }
}

/// Hover ceilings for an already resolved aircraft
pub fn hover_ceiling_for(
    aircraft: &AircraftProfile,
    density_altitude_ft: f64,
    weight_lbs: f64,
    carb_heat: bool,
) -> Result<HoverCeiling> {
    ensure_finite("density altitude", density_altitude_ft)?;
    ensure_positive("weight", weight_lbs)?;

    let model = match (aircraft.is_rotary(), aircraft.hover) {
        (true, Some(model)) => model,
        _ => {
            return Err(Error::InvalidArgument(format!(
                "hover ceiling is only defined for rotary-wing aircraft with a hover model ({})",
                aircraft.name
            )));
        }
    };

    let ceiling = match model {
        HoverModel::CatalogOffset { ige_ft, oge_ft } => offset_ceilings(
            ige_ft,
            oge_ft,
            aircraft.max_takeoff_weight_lbs,
            density_altitude_ft,
            weight_lbs,
        ),
        HoverModel::Polynomial(curve) => curve.ceilings(density_altitude_ft, weight_lbs, carb_heat),
    };

    debug!(
        "{}: hover IGE {:.0} ft, OGE {:.0} ft at DA {:.0} ft, {:.0} lbs",
        aircraft.id, ceiling.ige_ft, ceiling.oge_ft, density_altitude_ft, weight_lbs
    );
    Ok(ceiling)
}

/// Hover ceilings for a catalog aircraft
pub fn compute_hover_ceiling(
    catalog: &Catalog,
    density_altitude_ft: f64,
    weight_lbs: f64,
    aircraft_id: &str,
    carb_heat: bool,
) -> Result<HoverCeiling> {
    let aircraft = catalog.get(aircraft_id)?;
    hover_ceiling_for(aircraft, density_altitude_ft, weight_lbs, carb_heat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn light_helicopter_at_sea_level_hits_cap() {
        let curve = HoverCurve::STANDARD;
        assert_eq!(curve.ige_ceiling(0.0, 1500.0, false), 11600.0);
        assert_eq!(curve.ige_ceiling(-3000.0, 1500.0, false), 11600.0);
    }

    #[test]
    fn weight_penalty_matches_curve() {
        let curve = HoverCurve::STANDARD;
        let excess: f64 = 600.0;
        let expected = 11600.0 - (0.00012 * excess.powf(1.8) + 3.5 * excess);
        assert_abs_diff_eq!(curve.ige_ceiling(0.0, 2400.0, false), expected, epsilon = 1e-9);
    }

    #[test]
    fn carb_heat_subtracts_before_high_da_factor() {
        let curve = HoverCurve::STANDARD;
        let da: f64 = 10000.0;
        let raw = 11600.0 - (0.00008 * da.powf(1.9) + 0.07 * da);
        let expected = ((raw - 2400.0) * 0.75).clamp(0.0, 11600.0);
        assert_abs_diff_eq!(curve.ige_ceiling(da, 1700.0, true), expected, epsilon = 1e-9);
    }

    #[test]
    fn polynomial_never_leaves_bounds() {
        let curve = HoverCurve::STANDARD;
        for da in [0.0, 2000.0, 6000.0, 9600.0, 9601.0, 14000.0, 30000.0] {
            for weight in [1000.0, 1800.0, 2200.0, 2500.0, 4000.0] {
                for carb in [false, true] {
                    let c = curve.ceilings(da, weight, carb);
                    assert!((0.0..=11600.0).contains(&c.ige_ft), "ige {} at {} / {}", c.ige_ft, da, weight);
                    assert!((0.0..=11600.0).contains(&c.oge_ft));
                    assert!(c.oge_ft <= c.ige_ft);
                }
            }
        }
    }

    #[test]
    fn offset_model_floors_at_zero() {
        let c = offset_ceilings(12800.0, 8800.0, 3200.0, 20000.0, 3200.0);
        assert_eq!(c.ige_ft, 0.0);
        assert_eq!(c.oge_ft, 0.0);
    }

    #[test]
    fn offset_model_credits_lighter_weight() {
        // 1000 lbs under max gross: two steps
        let c = offset_ceilings(12800.0, 8800.0, 3200.0, 4000.0, 2200.0);
        assert_abs_diff_eq!(c.ige_ft, 12800.0 + 2000.0 - 4000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.oge_ft, 8800.0 + 1600.0 - 4000.0, epsilon = 1e-9);
    }

    #[test]
    fn fixed_wing_has_no_hover_ceiling() {
        let catalog = Catalog::builtin();
        let err = compute_hover_ceiling(&catalog, 0.0, 9000.0, "at-502b", false).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn every_rotary_entry_stays_non_negative() {
        let catalog = Catalog::builtin();
        for aircraft in catalog.list().iter().filter(|a| a.is_rotary()) {
            for da in [-2000.0, 0.0, 5000.0, 10000.0, 25000.0] {
                let c = hover_ceiling_for(aircraft, da, aircraft.max_takeoff_weight_lbs, true).unwrap();
                assert!(c.ige_ft >= 0.0 && c.oge_ft >= 0.0);
            }
        }
    }
}
