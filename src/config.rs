//! Tunable coefficients for the performance pipeline and the risk model
//!
//! Every constant the calculations use is a named field here so a caller can
//! override one without touching the formulas.

use crate::error::{ensure_finite, Error, Result};

/// Coefficients of the performance adjustment pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// Weight exponent for takeoff distances (reference: max takeoff weight)
    pub takeoff_weight_exponent: f64,
    /// Weight exponent for landing distances (reference: max landing weight)
    pub landing_weight_exponent: f64,
    /// Weight exponent for climb rate (reference: max takeoff weight)
    pub climb_weight_exponent: f64,
    /// Fractional distance increase per 1000 ft of density altitude
    pub distance_per_1000ft_da: f64,
    /// Fractional climb-rate decrease per 1000 ft of density altitude
    pub climb_per_1000ft_da: f64,
    /// Fractional distance reduction per 9 kt of headwind
    pub wind_reduction_per_9kt: f64,
    /// Lowest wind multiplier the pipeline will apply
    pub wind_factor_floor: f64,
    /// Extra factor on the takeoff distance over a 50 ft obstacle
    pub takeoff_50ft_margin: f64,
    /// Extra factor on the landing distance from a 50 ft obstacle
    pub landing_50ft_margin: f64,
    /// Assumed ground speed (kt) for the fixed-wing glide estimate
    pub glide_ground_speed_kts: f64,
    /// Feet of height per nautical mile of autorotative glide
    pub autorotation_ft_per_nm: f64,
    /// Wind (kt) that doubles the autorotation glide distance
    pub autorotation_wind_kts: f64,
}

impl Coefficients {
    pub const STANDARD: Coefficients = Coefficients {
        takeoff_weight_exponent: 1.5,
        landing_weight_exponent: 1.0,
        climb_weight_exponent: -1.0,
        distance_per_1000ft_da: 0.07,
        climb_per_1000ft_da: 0.05,
        wind_reduction_per_9kt: 0.1,
        wind_factor_floor: 0.5,
        takeoff_50ft_margin: 1.10,
        landing_50ft_margin: 1.15,
        glide_ground_speed_kts: 100.0,
        autorotation_ft_per_nm: 1300.0,
        autorotation_wind_kts: 20.0,
    };
}

impl Default for Coefficients {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Thresholds and scaling of the risk score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskModel {
    /// Highest percentage still rated Low
    pub low_max_percent: f64,
    /// Highest percentage still rated Medium
    pub medium_max_percent: f64,
    /// Divisor applied to the summed points before clamping to 100
    pub normalizer: f64,
    /// Density altitude (ft) above which the automatic DA contribution starts
    pub density_altitude_threshold_ft: f64,
}

impl RiskModel {
    pub const STANDARD: RiskModel = RiskModel {
        low_max_percent: 35.0,
        medium_max_percent: 65.0,
        normalizer: 1.8,
        density_altitude_threshold_ft: 3000.0,
    };
}

impl Default for RiskModel {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl RiskModel {
    /// Thresholds must be ordered within 0–100 and the normalizer positive
    pub fn validate(&self) -> Result<()> {
        if !(self.normalizer.is_finite() && self.normalizer > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "risk normalizer must be positive, got {}",
                self.normalizer
            )));
        }
        let ordered = 0.0 <= self.low_max_percent
            && self.low_max_percent <= self.medium_max_percent
            && self.medium_max_percent <= 100.0;
        if !ordered {
            return Err(Error::InvalidArgument(format!(
                "risk thresholds must satisfy 0 <= low ({}) <= medium ({}) <= 100",
                self.low_max_percent, self.medium_max_percent
            )));
        }
        ensure_finite("density altitude threshold", self.density_altitude_threshold_ft)?;
        Ok(())
    }
}
