//! Weather collaborator contract
//!
//! Retrieval of METAR/TAF text is left to an implementation of
//! [`WeatherSource`]. A failed fetch never aborts a calculation: it degrades to
//! a placeholder report.

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("invalid station code '{0}' (expected four letters or digits, e.g. KDEN)")]
    InvalidStation(String),

    #[error("station pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("no {kind} available for {station}")]
    NotAvailable { station: String, kind: ReportKind },

    #[error("weather source failed: {0}")]
    Source(String),
}

/// A four character ICAO station identifier, upper case
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StationCode(String);

impl StationCode {
    pub fn parse(code: &str) -> Result<StationCode, WeatherError> {
        let re = Regex::new(r"^[A-Za-z0-9]{4}$")?;
        let code = code.trim();
        if re.is_match(code) {
            Ok(StationCode(code.to_ascii_uppercase()))
        } else {
            Err(WeatherError::InvalidStation(code.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for StationCode {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StationCode::parse(s)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Metar,
    Taf,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Metar => write!(f, "METAR"),
            ReportKind::Taf => write!(f, "TAF"),
        }
    }
}

/// Anything that can produce raw report text for a station
pub trait WeatherSource {
    fn fetch(&self, station: &StationCode, kind: ReportKind) -> Result<String, WeatherError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherReport {
    Available {
        station: StationCode,
        kind: ReportKind,
        text: String,
    },
    Unavailable {
        station: StationCode,
        kind: ReportKind,
        reason: String,
    },
}

impl WeatherReport {
    pub fn is_available(&self) -> bool {
        matches!(self, WeatherReport::Available { .. })
    }
}

impl fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherReport::Available { station, kind, text } => write!(f, "{} {}: {}", kind, station, text.trim()),
            WeatherReport::Unavailable { station, kind, reason } => {
                write!(f, "{} {}: unavailable ({})", kind, station, reason)
            }
        }
    }
}

/// Fetch a report, turning any source failure into a placeholder
pub fn fetch_report(source: &dyn WeatherSource, station: &StationCode, kind: ReportKind) -> WeatherReport {
    match source.fetch(station, kind) {
        Ok(text) if !text.trim().is_empty() => {
            debug!("{} {}: {} bytes", kind, station, text.len());
            WeatherReport::Available {
                station: station.clone(),
                kind,
                text,
            }
        }
        Ok(_) => {
            warn!("{} {}: empty report", kind, station);
            WeatherReport::Unavailable {
                station: station.clone(),
                kind,
                reason: "empty report".to_string(),
            }
        }
        Err(e) => {
            warn!("{} {}: {}", kind, station, e);
            WeatherReport::Unavailable {
                station: station.clone(),
                kind,
                reason: e.to_string(),
            }
        }
    }
}
