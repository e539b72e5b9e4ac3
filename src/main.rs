//! agpilot
//!
//! Command-line performance and risk calculator for agricultural aircraft.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use regex::Regex;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use agpilot::calculator::{self, CLIMB_PROFILE_MAX_ALT_FT, CLIMB_PROFILE_SAMPLES};
use agpilot::risk::{self, RiskContext, RiskFactors, RiskFlag};
use agpilot::{
    atmosphere, hover, weight_balance, AircraftProfile, Coefficients, PerformanceQuery, RiskModel, RunwaySurface,
    Selection, Session,
};

#[derive(Parser)]
#[command(name = "agpilot")]
#[command(about = "Takeoff, landing, climb, hover and risk calculator for agricultural aircraft")]
struct Cli {
    /// SQLite file for the fleet (in-memory when omitted)
    #[arg(long, global = true)]
    fleet_db: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Highest risk percentage rated Low
    #[arg(long, global = true)]
    risk_low_max: Option<f64>,

    /// Highest risk percentage rated Medium
    #[arg(long, global = true)]
    risk_medium_max: Option<f64>,

    /// Divisor applied to summed risk points
    #[arg(long, global = true)]
    risk_normalizer: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

/// Aircraft and conditions shared by the performance commands
#[derive(Args, Debug)]
struct Conditions {
    /// Fleet nickname, catalog id or name (defaults to the first catalog aircraft)
    #[arg(short, long)]
    aircraft: Option<String>,

    /// Pressure altitude in feet
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pa: f64,

    /// Outside air temperature in °C
    #[arg(long, default_value = "15", allow_negative_numbers = true)]
    oat: f64,

    /// Gross weight in lbs (defaults to max takeoff weight)
    #[arg(short, long)]
    weight: Option<f64>,

    /// Wind in knots, headwind positive
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    wind: f64,

    /// Runway surface: paved, dry-grass, wet-grass or soft
    #[arg(long, default_value = "paved", value_parser = parse_surface)]
    surface: RunwaySurface,
}

#[derive(Subcommand)]
enum Commands {
    /// List the aircraft catalog
    List,

    /// Show the baseline figures for one aircraft
    Show {
        /// Fleet nickname, catalog id or name
        aircraft: String,
    },

    /// Density altitude from pressure altitude and temperature
    DensityAltitude {
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        pa: f64,
        #[arg(long, default_value = "15", allow_negative_numbers = true)]
        oat: f64,
    },

    /// Takeoff ground roll and distance over a 50 ft obstacle
    Takeoff(Conditions),

    /// Landing ground roll and distance from a 50 ft obstacle
    Landing(Conditions),

    /// Rate of climb, optionally as a profile up to a ceiling
    Climb {
        #[command(flatten)]
        conditions: Conditions,

        /// Print climb rate against altitude instead of a single value
        #[arg(long)]
        profile: bool,

        #[arg(long, default_value_t = CLIMB_PROFILE_MAX_ALT_FT)]
        max_alt: f64,

        #[arg(long, default_value_t = CLIMB_PROFILE_SAMPLES)]
        samples: usize,
    },

    /// Flaps-down stall speed at a gross weight
    Stall {
        #[arg(short, long)]
        aircraft: Option<String>,
        #[arg(short, long)]
        weight: Option<f64>,
    },

    /// Glide (or autorotation) distance from a height above ground
    Glide {
        #[arg(short, long)]
        aircraft: Option<String>,

        /// Height above ground in feet
        #[arg(long)]
        height: f64,

        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        wind: f64,
    },

    /// Gross weight build-up against the takeoff and landing limits
    WeightBalance {
        #[arg(short, long)]
        aircraft: Option<String>,

        /// Fuel on board in gallons
        #[arg(long, default_value = "0")]
        fuel: f64,

        /// Hopper load in gallons
        #[arg(long, default_value = "0")]
        hopper: f64,

        /// Pilot weight in lbs
        #[arg(long, default_value = "180")]
        pilot: f64,
    },

    /// Helicopter hover ceilings in and out of ground effect
    Hover {
        #[command(flatten)]
        conditions: Conditions,

        #[arg(long)]
        carb_heat: bool,
    },

    /// Score flight risk from manual factors and the current conditions
    Risk {
        #[command(flatten)]
        conditions: Conditions,

        /// Manual factor as name=score (0-10), e.g. fatigue=4; repeatable
        #[arg(short, long = "factor", value_parser = parse_factor)]
        factors: Vec<(String, u32)>,

        /// Usable runway length in feet
        #[arg(long)]
        runway: Option<f64>,

        #[arg(long)]
        carb_heat: bool,

        #[arg(long)]
        night: bool,

        #[arg(long)]
        unfamiliar_field: bool,

        #[arg(long)]
        new_chemical: bool,

        #[arg(long)]
        no_ground_crew: bool,
    },

    /// Every applicable calculation for one set of conditions
    Calc {
        #[command(flatten)]
        conditions: Conditions,

        #[arg(long)]
        carb_heat: bool,
    },

    /// Manage named fleet aircraft
    Fleet {
        #[command(subcommand)]
        command: FleetCommands,
    },
}

#[derive(Subcommand)]
enum FleetCommands {
    /// Add or replace a fleet aircraft
    Add {
        nickname: String,

        /// Catalog id or name
        aircraft: String,

        /// Empty weight of this airframe in lbs, if it differs from the catalog
        #[arg(long)]
        empty_weight: Option<f64>,
    },

    /// List the fleet
    List,

    /// Remove a fleet aircraft
    Remove { nickname: String },

    /// Remove every fleet aircraft
    Clear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let session = match &cli.fleet_db {
        Some(path) => Session::open(path).with_context(|| format!("opening fleet database {}", path.display()))?,
        None => Session::in_memory().context("creating in-memory fleet")?,
    };
    let coeffs = Coefficients::default();
    let model = risk_model(&cli)?;

    match cli.command {
        Commands::List => {
            println!("{:<16} {:<28} {:<12} {:>8}", "ID", "Aircraft", "Category", "MTOW");
            println!("{}", "-".repeat(67));
            for a in session.catalog().list() {
                println!(
                    "{:<16} {:<28} {:<12} {:>8.0}",
                    a.id,
                    a.name,
                    a.category.to_string(),
                    a.max_takeoff_weight_lbs
                );
            }
        }

        Commands::Show { aircraft } => {
            let (profile, selection) = session.resolve_profile(&aircraft)?;
            print_profile(profile, &selection);
        }

        Commands::DensityAltitude { pa, oat } => {
            println!("ISA temperature:  {:.1}°C", atmosphere::isa_temperature_c(pa));
            println!("Density altitude: {:.0} ft", atmosphere::density_altitude(pa, oat));
        }

        Commands::Takeoff(conditions) => {
            let (query, _) = build_query(&session, &conditions)?;
            let takeoff = calculator::compute_takeoff(session.catalog(), &coeffs, &query)?;
            let da = atmosphere::density_altitude(query.pressure_altitude_ft, query.oat_c);
            println!("Density altitude: {:.0} ft", da);
            println!("Ground roll:   {:.0} ft", takeoff.ground_roll_ft);
            println!("Over 50 ft:    {:.0} ft", takeoff.over_50ft_ft);
        }

        Commands::Landing(conditions) => {
            let (query, _) = build_query(&session, &conditions)?;
            let landing = calculator::compute_landing(session.catalog(), &coeffs, &query)?;
            let da = atmosphere::density_altitude(query.pressure_altitude_ft, query.oat_c);
            println!("Density altitude: {:.0} ft", da);
            println!("Ground roll:   {:.0} ft", landing.ground_roll_ft);
            println!("From 50 ft:    {:.0} ft", landing.over_50ft_ft);
        }

        Commands::Climb {
            conditions,
            profile,
            max_alt,
            samples,
        } => {
            let (query, _) = build_query(&session, &conditions)?;
            if profile {
                let points = calculator::climb_profile(
                    session.catalog(),
                    &coeffs,
                    query.oat_c,
                    query.weight_lbs,
                    &query.aircraft_id,
                    max_alt,
                    samples,
                )?;
                println!("{:>10} {:>10}", "PA (ft)", "ROC (fpm)");
                for p in points {
                    println!("{:>10.0} {:>10.0}", p.pressure_altitude_ft, p.climb_rate_fpm);
                }
            } else {
                let rate = calculator::compute_climb_rate(
                    session.catalog(),
                    &coeffs,
                    query.pressure_altitude_ft,
                    query.oat_c,
                    query.weight_lbs,
                    &query.aircraft_id,
                )?;
                println!("Rate of climb: {:.0} fpm", rate);
            }
        }

        Commands::Stall { aircraft, weight } => {
            let (profile, _) = resolve(&session, aircraft.as_deref())?;
            if profile.is_rotary() {
                bail!("{} is a helicopter; stall speed does not apply", profile.name);
            }
            let weight = weight.unwrap_or(profile.max_landing_weight_lbs);
            let stall = calculator::compute_stall_speed(session.catalog(), weight, &profile.id)?;
            println!("Stall speed (flaps down) at {:.0} lbs: {:.0} mph", weight, stall);
        }

        Commands::Glide { aircraft, height, wind } => {
            let (profile, _) = resolve(&session, aircraft.as_deref())?;
            let distance = calculator::compute_glide_distance(session.catalog(), &coeffs, height, wind, &profile.id)?;
            let what = if profile.is_rotary() { "Autorotation" } else { "Glide" };
            println!("{} distance from {:.0} ft: {:.1} nm", what, height, distance);
        }

        Commands::WeightBalance {
            aircraft,
            fuel,
            hopper,
            pilot,
        } => {
            let (profile, selection) = resolve(&session, aircraft.as_deref())?;
            let wb = weight_balance::weight_and_balance(
                profile,
                fuel,
                hopper,
                pilot,
                selection.custom_empty_weight_lbs,
            )?;
            print!("{}", wb);
        }

        Commands::Hover { conditions, carb_heat } => {
            let (query, _) = build_query(&session, &conditions)?;
            let da = atmosphere::density_altitude(query.pressure_altitude_ft, query.oat_c);
            let ceiling =
                hover::compute_hover_ceiling(session.catalog(), da, query.weight_lbs, &query.aircraft_id, carb_heat)?;
            println!("Density altitude: {:.0} ft", da);
            println!("Hover IGE: {:.0} ft", ceiling.ige_ft);
            println!("Hover OGE: {:.0} ft", ceiling.oge_ft);
        }

        Commands::Risk {
            conditions,
            factors,
            runway,
            carb_heat,
            night,
            unfamiliar_field,
            new_chemical,
            no_ground_crew,
        } => {
            let (query, _) = build_query(&session, &conditions)?;
            let mut manual = RiskFactors::from_named_scores(factors)?;
            manual.set_flag(RiskFlag::NightOperation, night);
            manual.set_flag(RiskFlag::UnfamiliarField, unfamiliar_field);
            manual.set_flag(RiskFlag::NewChemical, new_chemical);
            manual.set_flag(RiskFlag::NoGroundCrew, no_ground_crew);

            let context = RiskContext {
                query,
                runway_available_ft: runway,
                carb_heat,
            };
            manual.extend_derived(risk::derive_risks(session.catalog(), &coeffs, &model, &context)?);
            print!("{}", risk::score_risk(&manual, &model)?);
        }

        Commands::Calc { conditions, carb_heat } => {
            let (query, _) = build_query(&session, &conditions)?;
            let summary = calculator::summarize(session.catalog(), &coeffs, &query, carb_heat)?;
            print!("{}", summary);
        }

        Commands::Fleet { command } => match command {
            FleetCommands::Add {
                nickname,
                aircraft,
                empty_weight,
            } => {
                let entry = session.save_fleet_entry(&nickname, &aircraft, empty_weight)?;
                println!("Saved '{}' ({})", entry.nickname, entry.aircraft_id);
                if cli.fleet_db.is_none() {
                    println!("Note: no --fleet-db given, the fleet is not persisted.");
                }
            }
            FleetCommands::List => {
                let fleet = session.list_fleet()?;
                if fleet.is_empty() {
                    println!("No fleet aircraft. Add one with 'fleet add'.");
                } else {
                    println!("{:<20} {:<16} {:>12}", "Nickname", "Aircraft", "Empty (lbs)");
                    println!("{}", "-".repeat(50));
                    for e in fleet {
                        let empty = match e.custom_empty_weight_lbs {
                            Some(w) => format!("{:.0}", w),
                            None => "catalog".to_string(),
                        };
                        println!("{:<20} {:<16} {:>12}", e.nickname, e.aircraft_id, empty);
                    }
                }
            }
            FleetCommands::Remove { nickname } => {
                if session.remove_fleet_entry(&nickname)? {
                    println!("Removed '{}'", nickname);
                } else {
                    println!("Fleet aircraft '{}' not found", nickname);
                }
            }
            FleetCommands::Clear => {
                session.clear_fleet()?;
                println!("Fleet cleared");
            }
        },
    }

    Ok(())
}

/// Terminal logging on stderr; each -v raises the level one step from Warn
fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)
        .unwrap_or_else(|e| eprintln!("Unable to initiate logger: {}", e));
}

fn risk_model(cli: &Cli) -> Result<RiskModel> {
    let mut model = RiskModel::default();
    if let Some(v) = cli.risk_low_max {
        model.low_max_percent = v;
    }
    if let Some(v) = cli.risk_medium_max {
        model.medium_max_percent = v;
    }
    if let Some(v) = cli.risk_normalizer {
        model.normalizer = v;
    }
    model.validate().context("risk model overrides")?;
    Ok(model)
}

/// Nickname, id or name; the catalog default when nothing is given
fn resolve<'a>(session: &'a Session, key: Option<&str>) -> Result<(&'a AircraftProfile, Selection)> {
    match key {
        Some(key) => Ok(session.resolve_profile(key)?),
        None => {
            let profile = session
                .catalog()
                .default_aircraft()
                .context("aircraft catalog is empty")?;
            let selection = Selection {
                aircraft_id: profile.id.clone(),
                custom_empty_weight_lbs: None,
                nickname: None,
            };
            Ok((profile, selection))
        }
    }
}

fn build_query(session: &Session, conditions: &Conditions) -> Result<(PerformanceQuery, Selection)> {
    let (profile, selection) = resolve(session, conditions.aircraft.as_deref())?;
    let weight = conditions.weight.unwrap_or(profile.max_takeoff_weight_lbs);
    let query = PerformanceQuery::new(
        profile.id.clone(),
        conditions.pa,
        conditions.oat,
        weight,
        conditions.wind,
        conditions.surface,
    );
    Ok((query, selection))
}

fn parse_surface(s: &str) -> std::result::Result<RunwaySurface, String> {
    s.parse().map_err(|e: agpilot::Error| e.to_string())
}

/// Parse `name=score`
fn parse_factor(s: &str) -> std::result::Result<(String, u32), String> {
    let re = Regex::new(r"^\s*([A-Za-z][A-Za-z_-]*)\s*=\s*(\d+)\s*$").map_err(|e| e.to_string())?;
    let caps = re
        .captures(s)
        .ok_or_else(|| format!("expected name=score, got '{}'", s))?;
    let score = caps[2].parse::<u32>().map_err(|e| e.to_string())?;
    Ok((caps[1].replace('_', "-"), score))
}

fn print_profile(a: &AircraftProfile, selection: &Selection) {
    if let Some(nickname) = &selection.nickname {
        println!("Fleet aircraft: {}", nickname);
    }
    println!("{} ({})", a.name, a.id);
    println!("  {}", a.description);
    println!("  Category: {}", a.category);
    let empty = selection.custom_empty_weight_lbs.unwrap_or(a.empty_weight_lbs);
    println!("  Empty weight: {:.0} lbs", empty);
    println!(
        "  Max weight: {:.0} lbs takeoff, {:.0} lbs landing",
        a.max_takeoff_weight_lbs, a.max_landing_weight_lbs
    );
    println!(
        "  Fuel: {:.0} gal @ {:.1} lbs/gal   Hopper: {:.0} gal @ {:.1} lbs/gal",
        a.fuel_capacity_gal, a.fuel_weight_per_gal, a.hopper_capacity_gal, a.hopper_weight_per_gal
    );
    if a.is_rotary() {
        println!("  Climb: {:.0} fpm", a.climb_rate_fpm);
    } else {
        println!(
            "  Takeoff: {:.0} ft roll, {:.0} ft over 50 ft",
            a.takeoff_ground_roll_ft, a.takeoff_to_50ft_ft
        );
        println!(
            "  Landing: {:.0} ft roll, {:.0} ft from 50 ft",
            a.landing_ground_roll_ft, a.landing_from_50ft_ft
        );
        println!(
            "  Climb: {:.0} fpm at {:.0} mph, stall {:.0} mph, glide {:.0}:1",
            a.climb_rate_fpm, a.best_climb_speed_mph, a.stall_flaps_down_mph, a.glide_ratio
        );
    }
}
