//! Agricultural aircraft performance calculator
//!
//! Corrects POH baseline figures for weight, density altitude, wind and runway
//! surface, estimates helicopter hover ceilings, builds up gross weight, and
//! scores flight risk.

pub mod atmosphere;
pub mod calculator;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod hover;
pub mod models;
pub mod risk;
pub mod session;
pub mod weather;
pub mod weight_balance;

pub use atmosphere::density_altitude;
pub use calculator::{
    climb_profile, compute_climb_rate, compute_glide_distance, compute_landing, compute_stall_speed, compute_takeoff,
    summarize, ClimbPoint, PerformanceSummary,
};
pub use catalog::Catalog;
pub use config::{Coefficients, RiskModel};
pub use error::{Error, Result};
pub use hover::{compute_hover_ceiling, HoverCurve};
pub use models::{
    AircraftCategory, AircraftProfile, FleetEntry, HoverCeiling, HoverModel, LandingPerformance, PerformanceQuery,
    RunwaySurface, TakeoffPerformance,
};
pub use risk::{derive_risks, score_risk, RiskContext, RiskFactor, RiskFactors, RiskFlag, RiskLevel, RiskScore};
pub use session::{Selection, Session};
pub use weight_balance::{compute_weight_balance, WeightBalance};
