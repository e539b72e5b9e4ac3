//! Caller-owned session state: the catalog plus a named fleet
//!
//! The fleet lives in SQLite. An in-memory database is used unless the caller
//! opens a file, in which case entries persist across runs.

use std::path::Path;

use log::info;
use rusqlite::Connection;

use crate::catalog::Catalog;
use crate::db;
use crate::error::{ensure_positive, Error, Result};
use crate::models::{AircraftProfile, FleetEntry};

/// An aircraft picked by nickname or catalog key
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub aircraft_id: String,
    /// Set when the selection came from a fleet entry with its own empty weight
    pub custom_empty_weight_lbs: Option<f64>,
    pub nickname: Option<String>,
}

pub struct Session {
    catalog: Catalog,
    conn: Connection,
}

impl Session {
    /// A session with the built-in catalog and a throwaway fleet
    pub fn in_memory() -> Result<Session> {
        Session::with_connection(Catalog::builtin(), Connection::open_in_memory()?)
    }

    /// A session whose fleet is stored in the SQLite file at `path`
    pub fn open(path: &Path) -> Result<Session> {
        info!("opening fleet database {}", path.display());
        Session::with_connection(Catalog::builtin(), Connection::open(path)?)
    }

    pub fn with_connection(catalog: Catalog, conn: Connection) -> Result<Session> {
        db::init_schema(&conn)?;
        Ok(Session { catalog, conn })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Add or replace a fleet entry. The aircraft must exist in the catalog;
    /// its canonical id is stored.
    pub fn save_fleet_entry(
        &self,
        nickname: &str,
        aircraft_key: &str,
        custom_empty_weight_lbs: Option<f64>,
    ) -> Result<FleetEntry> {
        let nickname = nickname.trim();
        if nickname.is_empty() {
            return Err(Error::InvalidArgument("fleet nickname must not be empty".to_string()));
        }
        let aircraft = self.catalog.get(aircraft_key)?;
        if let Some(weight) = custom_empty_weight_lbs {
            ensure_positive("custom empty weight", weight)?;
        }

        let entry = FleetEntry {
            nickname: nickname.to_string(),
            aircraft_id: aircraft.id.clone(),
            custom_empty_weight_lbs,
        };
        db::upsert_fleet_entry(&self.conn, &entry)?;
        info!("fleet: saved '{}' as {}", entry.nickname, aircraft.name);
        Ok(entry)
    }

    pub fn fleet_entry(&self, nickname: &str) -> Result<FleetEntry> {
        db::get_fleet_entry(&self.conn, nickname.trim())?
            .ok_or_else(|| Error::FleetEntryNotFound(nickname.to_string()))
    }

    pub fn list_fleet(&self) -> Result<Vec<FleetEntry>> {
        db::list_fleet(&self.conn)
    }

    pub fn remove_fleet_entry(&self, nickname: &str) -> Result<bool> {
        let removed = db::delete_fleet_entry(&self.conn, nickname.trim())?;
        if removed {
            info!("fleet: removed '{}'", nickname);
        }
        Ok(removed)
    }

    pub fn clear_fleet(&self) -> Result<()> {
        db::clear_fleet(&self.conn)?;
        info!("fleet: cleared");
        Ok(())
    }

    /// Resolve a user-supplied key. Fleet nicknames win over catalog ids and names.
    pub fn resolve(&self, key: &str) -> Result<Selection> {
        if let Some(entry) = db::get_fleet_entry(&self.conn, key.trim())? {
            return Ok(Selection {
                aircraft_id: entry.aircraft_id,
                custom_empty_weight_lbs: entry.custom_empty_weight_lbs,
                nickname: Some(entry.nickname),
            });
        }
        let aircraft = self.catalog.get(key.trim())?;
        Ok(Selection {
            aircraft_id: aircraft.id.clone(),
            custom_empty_weight_lbs: None,
            nickname: None,
        })
    }

    /// Resolve a key straight to its catalog profile
    pub fn resolve_profile(&self, key: &str) -> Result<(&AircraftProfile, Selection)> {
        let selection = self.resolve(key)?;
        let aircraft = self.catalog.get(&selection.aircraft_id)?;
        Ok((aircraft, selection))
    }
}
