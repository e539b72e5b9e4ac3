//! Static catalog of agricultural aircraft and helicopters

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::hover::HoverCurve;
use crate::models::{AircraftCategory, AircraftProfile, HoverModel};

/// The aircraft catalog, in display order. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct Catalog {
    aircraft: Vec<AircraftProfile>,
}

impl Catalog {
    /// Build a catalog from profiles, rejecting any that break the invariants
    pub fn from_profiles(aircraft: Vec<AircraftProfile>) -> Result<Catalog> {
        let catalog = Catalog { aircraft };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The built-in fleet of ag aircraft
    pub fn builtin() -> Catalog {
        Catalog {
            aircraft: builtin_profiles(),
        }
    }

    /// All aircraft, in insertion order
    pub fn list(&self) -> &[AircraftProfile] {
        &self.aircraft
    }

    /// The aircraft selected when the user has not picked one
    pub fn default_aircraft(&self) -> Option<&AircraftProfile> {
        self.aircraft.first()
    }

    /// Look up an aircraft by id or display name (case-insensitive)
    pub fn get(&self, key: &str) -> Result<&AircraftProfile> {
        self.aircraft
            .iter()
            .find(|a| a.matches(key))
            .ok_or_else(|| Error::AircraftNotFound(key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.aircraft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }

    /// Check every profile against the catalog invariants
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();

        for a in &self.aircraft {
            let invalid = |reason: String| Error::InvalidArgument(format!("{}: {}", a.id, reason));

            if !ids.insert(a.id.to_ascii_lowercase()) {
                return Err(invalid("duplicate aircraft id".to_string()));
            }

            let figures = [
                ("takeoff ground roll", a.takeoff_ground_roll_ft),
                ("takeoff to 50 ft", a.takeoff_to_50ft_ft),
                ("landing ground roll", a.landing_ground_roll_ft),
                ("landing from 50 ft", a.landing_from_50ft_ft),
                ("climb rate", a.climb_rate_fpm),
                ("best climb speed", a.best_climb_speed_mph),
                ("stall speed", a.stall_flaps_down_mph),
                ("empty weight", a.empty_weight_lbs),
                ("fuel capacity", a.fuel_capacity_gal),
                ("fuel weight per gallon", a.fuel_weight_per_gal),
                ("hopper capacity", a.hopper_capacity_gal),
                ("hopper weight per gallon", a.hopper_weight_per_gal),
                ("glide ratio", a.glide_ratio),
            ];
            for (name, value) in figures {
                if !value.is_finite() || value < 0.0 {
                    return Err(invalid(format!("{} must be non-negative, got {}", name, value)));
                }
            }

            if !(a.max_takeoff_weight_lbs > 0.0 && a.max_landing_weight_lbs > 0.0) {
                return Err(invalid("weight limits must be positive".to_string()));
            }
            if a.max_landing_weight_lbs > a.max_takeoff_weight_lbs {
                return Err(invalid(format!(
                    "max landing weight {} exceeds max takeoff weight {}",
                    a.max_landing_weight_lbs, a.max_takeoff_weight_lbs
                )));
            }

            match (a.category, a.hover) {
                (AircraftCategory::Rotary, None) => {
                    return Err(invalid("rotary-wing aircraft needs a hover model".to_string()));
                }
                (AircraftCategory::FixedWing, Some(_)) => {
                    return Err(invalid("fixed-wing aircraft cannot have a hover model".to_string()));
                }
                _ => {}
            }
        }

        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_profiles() -> Vec<AircraftProfile> {
    vec![
        AircraftProfile {
            id: "at-502b".to_string(),
            name: "Air Tractor AT-502B".to_string(),
            description: "Single-engine piston ag aircraft".to_string(),
            category: AircraftCategory::FixedWing,
            takeoff_ground_roll_ft: 1140.0,
            takeoff_to_50ft_ft: 2600.0,
            landing_ground_roll_ft: 600.0,
            landing_from_50ft_ft: 1350.0,
            climb_rate_fpm: 870.0,
            best_climb_speed_mph: 111.0,
            stall_flaps_down_mph: 68.0,
            empty_weight_lbs: 4546.0,
            fuel_capacity_gal: 170.0,
            fuel_weight_per_gal: 6.0,
            hopper_capacity_gal: 500.0,
            hopper_weight_per_gal: 8.3,
            max_takeoff_weight_lbs: 9400.0,
            max_landing_weight_lbs: 8000.0,
            glide_ratio: 8.0,
            hover: None,
        },
        AircraftProfile {
            id: "at-602".to_string(),
            name: "Air Tractor AT-602".to_string(),
            description: "Turbine ag aircraft, balanced payload & performance".to_string(),
            category: AircraftCategory::FixedWing,
            takeoff_ground_roll_ft: 1400.0,
            takeoff_to_50ft_ft: 2800.0,
            landing_ground_roll_ft: 850.0,
            landing_from_50ft_ft: 1850.0,
            climb_rate_fpm: 1050.0,
            best_climb_speed_mph: 118.0,
            stall_flaps_down_mph: 74.0,
            empty_weight_lbs: 6200.0,
            fuel_capacity_gal: 380.0,
            fuel_weight_per_gal: 6.7,
            hopper_capacity_gal: 600.0,
            hopper_weight_per_gal: 8.3,
            max_takeoff_weight_lbs: 12500.0,
            max_landing_weight_lbs: 11000.0,
            glide_ratio: 7.2,
            hover: None,
        },
        AircraftProfile {
            id: "at-802a".to_string(),
            name: "Air Tractor AT-802A".to_string(),
            description: "Large turbine ag aircraft, 800 gal hopper".to_string(),
            category: AircraftCategory::FixedWing,
            takeoff_ground_roll_ft: 1800.0,
            takeoff_to_50ft_ft: 3100.0,
            landing_ground_roll_ft: 900.0,
            landing_from_50ft_ft: 1950.0,
            climb_rate_fpm: 1000.0,
            best_climb_speed_mph: 125.0,
            stall_flaps_down_mph: 78.0,
            empty_weight_lbs: 6400.0,
            fuel_capacity_gal: 254.0,
            fuel_weight_per_gal: 6.7,
            hopper_capacity_gal: 800.0,
            hopper_weight_per_gal: 8.3,
            max_takeoff_weight_lbs: 16000.0,
            max_landing_weight_lbs: 14000.0,
            glide_ratio: 7.0,
            hover: None,
        },
        AircraftProfile {
            id: "thrush-510g".to_string(),
            name: "Thrush 510G".to_string(),
            description: "Turbine ag aircraft, GE H80 engine".to_string(),
            category: AircraftCategory::FixedWing,
            takeoff_ground_roll_ft: 1350.0,
            takeoff_to_50ft_ft: 2700.0,
            landing_ground_roll_ft: 800.0,
            landing_from_50ft_ft: 1750.0,
            climb_rate_fpm: 1150.0,
            best_climb_speed_mph: 115.0,
            stall_flaps_down_mph: 70.0,
            empty_weight_lbs: 5500.0,
            fuel_capacity_gal: 228.0,
            fuel_weight_per_gal: 6.7,
            hopper_capacity_gal: 510.0,
            hopper_weight_per_gal: 8.3,
            max_takeoff_weight_lbs: 10500.0,
            max_landing_weight_lbs: 9000.0,
            glide_ratio: 7.5,
            hover: None,
        },
        AircraftProfile {
            id: "ag-cat-g164b".to_string(),
            name: "Grumman G-164B Ag Cat".to_string(),
            description: "Radial-engine biplane sprayer".to_string(),
            category: AircraftCategory::FixedWing,
            takeoff_ground_roll_ft: 1000.0,
            takeoff_to_50ft_ft: 2200.0,
            landing_ground_roll_ft: 600.0,
            landing_from_50ft_ft: 1300.0,
            climb_rate_fpm: 800.0,
            best_climb_speed_mph: 100.0,
            stall_flaps_down_mph: 65.0,
            empty_weight_lbs: 3800.0,
            fuel_capacity_gal: 80.0,
            fuel_weight_per_gal: 6.0,
            hopper_capacity_gal: 300.0,
            hopper_weight_per_gal: 8.3,
            max_takeoff_weight_lbs: 7020.0,
            max_landing_weight_lbs: 6000.0,
            glide_ratio: 6.5,
            hover: None,
        },
        AircraftProfile {
            id: "cessna-188".to_string(),
            name: "Cessna 188 AgTruck".to_string(),
            description: "Light piston ag aircraft".to_string(),
            category: AircraftCategory::FixedWing,
            takeoff_ground_roll_ft: 1100.0,
            takeoff_to_50ft_ft: 2300.0,
            landing_ground_roll_ft: 550.0,
            landing_from_50ft_ft: 1250.0,
            climb_rate_fpm: 690.0,
            best_climb_speed_mph: 98.0,
            stall_flaps_down_mph: 61.0,
            empty_weight_lbs: 2250.0,
            fuel_capacity_gal: 54.0,
            fuel_weight_per_gal: 6.0,
            hopper_capacity_gal: 280.0,
            hopper_weight_per_gal: 8.3,
            max_takeoff_weight_lbs: 4200.0,
            max_landing_weight_lbs: 4000.0,
            glide_ratio: 8.5,
            hover: None,
        },
        AircraftProfile {
            id: "r44-raven".to_string(),
            name: "Robinson R44 Raven I".to_string(),
            description: "Carbureted piston helicopter with spray kit".to_string(),
            category: AircraftCategory::Rotary,
            takeoff_ground_roll_ft: 0.0,
            takeoff_to_50ft_ft: 0.0,
            landing_ground_roll_ft: 0.0,
            landing_from_50ft_ft: 0.0,
            climb_rate_fpm: 1000.0,
            best_climb_speed_mph: 63.0,
            stall_flaps_down_mph: 0.0,
            empty_weight_lbs: 1445.0,
            fuel_capacity_gal: 49.0,
            fuel_weight_per_gal: 6.0,
            hopper_capacity_gal: 40.0,
            hopper_weight_per_gal: 8.3,
            max_takeoff_weight_lbs: 2400.0,
            max_landing_weight_lbs: 2400.0,
            glide_ratio: 0.0,
            hover: Some(HoverModel::Polynomial(HoverCurve::STANDARD)),
        },
        AircraftProfile {
            id: "bell-206b3".to_string(),
            name: "Bell 206B-3 JetRanger".to_string(),
            description: "Light turbine helicopter".to_string(),
            category: AircraftCategory::Rotary,
            takeoff_ground_roll_ft: 0.0,
            takeoff_to_50ft_ft: 0.0,
            landing_ground_roll_ft: 0.0,
            landing_from_50ft_ft: 0.0,
            climb_rate_fpm: 1280.0,
            best_climb_speed_mph: 69.0,
            stall_flaps_down_mph: 0.0,
            empty_weight_lbs: 1700.0,
            fuel_capacity_gal: 91.0,
            fuel_weight_per_gal: 6.7,
            hopper_capacity_gal: 100.0,
            hopper_weight_per_gal: 8.3,
            max_takeoff_weight_lbs: 3200.0,
            max_landing_weight_lbs: 3200.0,
            glide_ratio: 0.0,
            hover: Some(HoverModel::CatalogOffset {
                ige_ft: 12800.0,
                oge_ft: 8800.0,
            }),
        },
        AircraftProfile {
            id: "enstrom-480b".to_string(),
            name: "Enstrom 480B".to_string(),
            description: "Turbine helicopter, wide cabin".to_string(),
            category: AircraftCategory::Rotary,
            takeoff_ground_roll_ft: 0.0,
            takeoff_to_50ft_ft: 0.0,
            landing_ground_roll_ft: 0.0,
            landing_from_50ft_ft: 0.0,
            climb_rate_fpm: 1500.0,
            best_climb_speed_mph: 67.0,
            stall_flaps_down_mph: 0.0,
            empty_weight_lbs: 1850.0,
            fuel_capacity_gal: 91.0,
            fuel_weight_per_gal: 6.7,
            hopper_capacity_gal: 60.0,
            hopper_weight_per_gal: 8.3,
            max_takeoff_weight_lbs: 3000.0,
            max_landing_weight_lbs: 3000.0,
            glide_ratio: 0.0,
            hover: Some(HoverModel::CatalogOffset {
                ige_ft: 11200.0,
                oge_ft: 6500.0,
            }),
        },
        AircraftProfile {
            id: "bell-407".to_string(),
            name: "Bell 407".to_string(),
            description: "Medium turbine helicopter, high payload".to_string(),
            category: AircraftCategory::Rotary,
            takeoff_ground_roll_ft: 0.0,
            takeoff_to_50ft_ft: 0.0,
            landing_ground_roll_ft: 0.0,
            landing_from_50ft_ft: 0.0,
            climb_rate_fpm: 1600.0,
            best_climb_speed_mph: 69.0,
            stall_flaps_down_mph: 0.0,
            empty_weight_lbs: 2690.0,
            fuel_capacity_gal: 128.0,
            fuel_weight_per_gal: 6.7,
            hopper_capacity_gal: 150.0,
            hopper_weight_per_gal: 8.3,
            max_takeoff_weight_lbs: 5000.0,
            max_landing_weight_lbs: 5000.0,
            glide_ratio: 0.0,
            hover: Some(HoverModel::CatalogOffset {
                ige_ft: 10300.0,
                oge_ft: 7000.0,
            }),
        },
    ]
}
