//! Fleet storage schema and operations

use rusqlite::{Connection, OptionalExtension};

use crate::error::Result;
use crate::models::FleetEntry;

/// Initialize the fleet schema
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Named aircraft in the operator's fleet
        CREATE TABLE IF NOT EXISTS fleet (
            nickname TEXT PRIMARY KEY,
            aircraft_id TEXT NOT NULL,
            custom_empty_weight_lbs REAL
        );

        CREATE INDEX IF NOT EXISTS idx_fleet_aircraft ON fleet(aircraft_id);
        "#,
    )?;
    Ok(())
}

/// Insert or replace a fleet entry keyed by nickname
pub fn upsert_fleet_entry(conn: &Connection, entry: &FleetEntry) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO fleet (nickname, aircraft_id, custom_empty_weight_lbs)
         VALUES (?1, ?2, ?3)",
        (&entry.nickname, &entry.aircraft_id, entry.custom_empty_weight_lbs),
    )?;
    Ok(())
}

/// Look up one entry by nickname (case-insensitive)
pub fn get_fleet_entry(conn: &Connection, nickname: &str) -> Result<Option<FleetEntry>> {
    let entry = conn
        .query_row(
            "SELECT nickname, aircraft_id, custom_empty_weight_lbs
             FROM fleet
             WHERE nickname = ?1 COLLATE NOCASE",
            [nickname],
            |row| {
                Ok(FleetEntry {
                    nickname: row.get(0)?,
                    aircraft_id: row.get(1)?,
                    custom_empty_weight_lbs: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(entry)
}

/// List the fleet ordered by nickname
pub fn list_fleet(conn: &Connection) -> Result<Vec<FleetEntry>> {
    let mut stmt = conn.prepare(
        "SELECT nickname, aircraft_id, custom_empty_weight_lbs FROM fleet ORDER BY nickname COLLATE NOCASE",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(FleetEntry {
            nickname: row.get(0)?,
            aircraft_id: row.get(1)?,
            custom_empty_weight_lbs: row.get(2)?,
        })
    })?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// Delete an entry; returns whether a row was removed
pub fn delete_fleet_entry(conn: &Connection, nickname: &str) -> Result<bool> {
    let removed = conn.execute("DELETE FROM fleet WHERE nickname = ?1 COLLATE NOCASE", [nickname])?;
    Ok(removed > 0)
}

/// Remove every fleet entry
pub fn clear_fleet(conn: &Connection) -> Result<()> {
    conn.execute_batch("DELETE FROM fleet;")?;
    Ok(())
}
