//! End-to-end scenarios against the library

use agpilot::calculator::{climb_profile, compute_climb_rate, compute_takeoff, summarize};
use agpilot::risk::{derive_risks, score_risk, RiskContext, RiskFactor, RiskFactors, RiskFlag, RiskLevel};
use agpilot::weather::{fetch_report, ReportKind, StationCode, WeatherError, WeatherSource};
use agpilot::{
    compute_hover_ceiling, compute_weight_balance, density_altitude, Catalog, Coefficients, Error, PerformanceQuery,
    RiskModel, RunwaySurface, Session,
};
use approx::{assert_abs_diff_eq, assert_relative_eq};

#[test]
fn catalog_is_consistent() {
    let catalog = Catalog::builtin();
    catalog.validate().unwrap();
    assert_eq!(catalog.len(), 10);
    assert_eq!(catalog.default_aircraft().map(|a| a.id.as_str()), Some("at-502b"));
    for a in catalog.list() {
        assert!(a.max_landing_weight_lbs <= a.max_takeoff_weight_lbs, "{}", a.id);
    }
    assert_eq!(catalog.list().iter().filter(|a| a.is_rotary()).count(), 4);
}

#[test]
fn density_altitude_reference_points() {
    assert_eq!(density_altitude(0.0, 15.0), 0.0);
    assert_eq!(density_altitude(5000.0, 5.0), 5000.0);
    assert_eq!(density_altitude(5000.0, 25.0), 7400.0);
}

#[test]
fn at502b_takeoff_from_standard_day_to_hot_and_high() {
    let catalog = Catalog::builtin();
    let coeffs = Coefficients::default();

    let standard = PerformanceQuery::new("at-502b", 0.0, 15.0, 9400.0, 0.0, RunwaySurface::PavedDry);
    assert_eq!(compute_takeoff(&catalog, &coeffs, &standard).unwrap().ground_roll_ft, 1140.0);

    let half = PerformanceQuery {
        weight_lbs: 4700.0,
        ..standard.clone()
    };
    assert_abs_diff_eq!(
        compute_takeoff(&catalog, &coeffs, &half).unwrap().ground_roll_ft,
        403.0,
        epsilon = 0.5
    );

    // PA 5000, 25°C: DA 7400 ft → ×1.518, wet grass ×1.45
    let hot = PerformanceQuery::new("at-502b", 5000.0, 25.0, 9400.0, 0.0, RunwaySurface::WetGrass);
    let takeoff = compute_takeoff(&catalog, &coeffs, &hot).unwrap();
    assert_relative_eq!(takeoff.ground_roll_ft, 1140.0 * 1.518 * 1.45, max_relative = 1e-9);

    // 18 kt headwind takes 20% back off
    let windy = PerformanceQuery { wind_kts: 18.0, ..hot };
    let with_wind = compute_takeoff(&catalog, &coeffs, &windy).unwrap();
    assert_relative_eq!(with_wind.ground_roll_ft, takeoff.ground_roll_ft * 0.8, max_relative = 1e-9);
}

#[test]
fn climb_degrades_with_altitude_and_weight() {
    let catalog = Catalog::builtin();
    let coeffs = Coefficients::default();
    let light = compute_climb_rate(&catalog, &coeffs, 0.0, 15.0, 7000.0, "at-502b").unwrap();
    let heavy = compute_climb_rate(&catalog, &coeffs, 0.0, 15.0, 9400.0, "at-502b").unwrap();
    assert!(light > heavy);
    assert_relative_eq!(heavy, 870.0);

    let profile = climb_profile(&catalog, &coeffs, 15.0, 9400.0, "at-502b", 12000.0, 13).unwrap();
    assert_eq!(profile.len(), 13);
    assert_eq!(profile[0].pressure_altitude_ft, 0.0);
    assert_relative_eq!(profile[12].pressure_altitude_ft, 12000.0);
    assert!(profile.windows(2).all(|w| w[1].climb_rate_fpm <= w[0].climb_rate_fpm));
    assert!(climb_profile(&catalog, &coeffs, 15.0, 9400.0, "at-502b", 12000.0, 1).is_err());
}

#[test]
fn weight_and_balance_feeds_performance() {
    let catalog = Catalog::builtin();
    let coeffs = Coefficients::default();
    let wb = compute_weight_balance(&catalog, 100.0, 300.0, 190.0, "at-502b", None).unwrap();
    assert!(!wb.exceeds_takeoff_limit());

    let query = PerformanceQuery::new("at-502b", 0.0, 15.0, wb.total_weight_lbs, 0.0, RunwaySurface::PavedDry);
    let roll = compute_takeoff(&catalog, &coeffs, &query).unwrap().ground_roll_ft;
    assert!(roll < 1140.0);
}

#[test]
fn hover_ceilings_stay_in_range() {
    let catalog = Catalog::builtin();
    for id in ["r44-raven", "bell-206b3", "enstrom-480b", "bell-407"] {
        for da in [-2000.0, 0.0, 5000.0, 10000.0, 16000.0] {
            for carb_heat in [false, true] {
                let c = compute_hover_ceiling(&catalog, da, 2400.0, id, carb_heat).unwrap();
                assert!(c.ige_ft >= 0.0 && c.oge_ft >= 0.0, "{} at {}", id, da);
            }
        }
    }
    let r44 = compute_hover_ceiling(&catalog, 0.0, 1500.0, "r44-raven", false).unwrap();
    assert_eq!(r44.ige_ft, 11600.0);
    assert!(matches!(
        compute_hover_ceiling(&catalog, 0.0, 6000.0, "at-502b", false),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn summary_lists_category_specific_results() {
    let catalog = Catalog::builtin();
    let coeffs = Coefficients::default();

    let fixed = PerformanceQuery::new("cessna-188", 2000.0, 20.0, 3800.0, 5.0, RunwaySurface::DryGrass);
    let summary = summarize(&catalog, &coeffs, &fixed, false).unwrap();
    assert!(summary.takeoff.is_some() && summary.landing.is_some());
    assert!(summary.hover.is_none());
    assert!(summary.to_string().contains("Ground roll:"));

    let rotary = PerformanceQuery::new("r44-raven", 2000.0, 20.0, 2200.0, 0.0, RunwaySurface::PavedDry);
    let summary = summarize(&catalog, &coeffs, &rotary, true).unwrap();
    assert!(summary.takeoff.is_none());
    assert!(summary.hover.is_some());
    assert!(summary.to_string().contains("IGE:"));
}

#[test]
fn risk_assessment_for_a_hot_day_off_a_short_wet_strip() {
    let catalog = Catalog::builtin();
    let coeffs = Coefficients::default();
    let model = RiskModel::default();

    let mut factors = RiskFactors::new();
    factors.set_score(RiskFactor::Fatigue, 6).unwrap();
    factors.set_score(RiskFactor::Obstacles, 8).unwrap();
    factors.set_flag(RiskFlag::NoGroundCrew, true);

    let context = RiskContext {
        query: PerformanceQuery::new("at-502b", 5000.0, 30.0, 9400.0, 0.0, RunwaySurface::WetGrass),
        runway_available_ft: Some(2000.0),
        carb_heat: false,
    };
    factors.extend_derived(derive_risks(&catalog, &coeffs, &model, &context).unwrap());

    // 14 manual + 5 flag + (20 DA + 15 weight + 18 margin + 8 surface)
    let score = score_risk(&factors, &model).unwrap();
    assert_eq!(score.total_points, 80);
    assert_relative_eq!(score.percentage, 80.0 / 1.8);
    assert_eq!(score.level, RiskLevel::Medium);
    assert!(score.to_string().contains("Risk: 44% (Medium)"));
}

#[test]
fn fleet_session_round_trip() {
    let session = Session::in_memory().unwrap();
    session.save_fleet_entry("Red Tail", "at-502b", Some(4700.0)).unwrap();
    session.save_fleet_entry("Chopper", "Robinson R44 Raven I", None).unwrap();

    let names: Vec<_> = session.list_fleet().unwrap().into_iter().map(|e| e.nickname).collect();
    assert_eq!(names, ["Chopper", "Red Tail"]);

    let selection = session.resolve("red tail").unwrap();
    let wb = compute_weight_balance(
        session.catalog(),
        0.0,
        0.0,
        180.0,
        &selection.aircraft_id,
        selection.custom_empty_weight_lbs,
    )
    .unwrap();
    assert_relative_eq!(wb.total_weight_lbs, 4880.0);

    assert!(session.remove_fleet_entry("Chopper").unwrap());
    assert_eq!(session.list_fleet().unwrap().len(), 1);
}

#[test]
fn fleet_persists_in_a_file() {
    let path = std::env::temp_dir().join(format!("agpilot-fleet-{}.db", std::process::id()));
    let _ = std::fs::remove_file(&path);
    {
        let session = Session::open(&path).unwrap();
        session.save_fleet_entry("Old Yeller", "ag-cat-g164b", None).unwrap();
    }
    let reopened = Session::open(&path).unwrap();
    assert_eq!(reopened.fleet_entry("Old Yeller").unwrap().aircraft_id, "ag-cat-g164b");
    drop(reopened);
    let _ = std::fs::remove_file(&path);
}

struct OfflineSource;

impl WeatherSource for OfflineSource {
    fn fetch(&self, _station: &StationCode, _kind: ReportKind) -> Result<String, WeatherError> {
        Err(WeatherError::Source("network unreachable".to_string()))
    }
}

#[test]
fn weather_outage_does_not_block_calculation() {
    let station: StationCode = "kgxy".parse().unwrap();
    let report = fetch_report(&OfflineSource, &station, ReportKind::Metar);
    assert!(!report.is_available());
    assert_eq!(
        report.to_string(),
        "METAR KGXY: unavailable (weather source failed: network unreachable)"
    );

    let catalog = Catalog::builtin();
    let query = PerformanceQuery::new("at-602", 4700.0, 28.0, 12500.0, 0.0, RunwaySurface::DryGrass);
    assert!(compute_takeoff(&catalog, &Coefficients::default(), &query).is_ok());
}
