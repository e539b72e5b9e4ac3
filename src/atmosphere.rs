//! Density altitude from pressure altitude and outside air temperature

/// ISA sea-level temperature (°C)
pub const ISA_SEA_LEVEL_C: f64 = 15.0;
/// ISA lapse rate (°C per 1000 ft)
pub const ISA_LAPSE_C_PER_1000FT: f64 = 2.0;
/// Density altitude change per °C of deviation from ISA (ft)
pub const DA_FT_PER_DEGREE_C: f64 = 120.0;

/// Standard temperature at a pressure altitude
pub fn isa_temperature_c(pressure_altitude_ft: f64) -> f64 {
    ISA_SEA_LEVEL_C - ISA_LAPSE_C_PER_1000FT * (pressure_altitude_ft / 1000.0)
}

/// Density altitude in whole feet.
///
/// Not clamped: very hot or very cold inputs give large or negative results,
/// and downstream calculations accept them as they are.
pub fn density_altitude(pressure_altitude_ft: f64, oat_c: f64) -> f64 {
    let deviation = oat_c - isa_temperature_c(pressure_altitude_ft);
    (pressure_altitude_ft + DA_FT_PER_DEGREE_C * deviation).round()
}
