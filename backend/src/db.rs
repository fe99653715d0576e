//! SQLite access for the hosted backend.
//!
//! Connections are opened per operation against a fixed database file; the
//! schema is created at startup. Column names match the wire records from
//! the `common` crate, so rows map one-to-one onto the payloads the SPA
//! exchanges with the API.
//!
//! The at-most-one-manager-per-zone rule is enforced here with a partial
//! unique index. The SPA checks it too, but only this index holds when two
//! sessions race.

use common::model::request::RequestStatus;
use common::model::zonal::Zonal;
use rusqlite::types::Type;
use rusqlite::Connection;

pub const DB_FILE: &str = "sgr_vias.sqlite";

pub fn open() -> Result<Connection, rusqlite::Error> {
    Connection::open(DB_FILE)
}

pub fn init(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS repair_requests (
            id TEXT PRIMARY KEY,
            protocol TEXT NOT NULL,
            sei_number TEXT NOT NULL,
            contract TEXT NOT NULL,
            description TEXT NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            address TEXT NOT NULL,
            visit_date TEXT NOT NULL,
            status TEXT NOT NULL,
            technician_id TEXT NOT NULL,
            zonal TEXT NOT NULL,
            photo_before TEXT,
            photo_after TEXT,
            created_at TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            role TEXT NOT NULL,
            zonal TEXT NOT NULL,
            registration_number TEXT,
            email TEXT
        );
        CREATE UNIQUE INDEX IF NOT EXISTS idx_users_zonal_manager
            ON users (zonal) WHERE role = 'Manager';
        CREATE TABLE IF NOT EXISTS zonals (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            manager_id TEXT,
            assistant_id TEXT,
            description TEXT
        );",
    )?;

    // Seed the four fixed zones on first run; later edits are preserved.
    let mut stmt = conn.prepare("INSERT OR IGNORE INTO zonals (id, name) VALUES (?1, ?2)")?;
    for zonal in Zonal::ALL {
        stmt.execute(rusqlite::params![zonal.id(), zonal.id()])?;
    }
    Ok(())
}

pub(crate) fn parse_status(idx: usize, value: String) -> rusqlite::Result<RequestStatus> {
    RequestStatus::from_label(&value).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("status desconhecido: {value}").into(),
        )
    })
}

pub(crate) fn parse_zonal(idx: usize, value: String) -> rusqlite::Result<Zonal> {
    Zonal::from_id(&value).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("zonal desconhecida: {value}").into(),
        )
    })
}

#[cfg(test)]
pub(crate) fn open_in_memory() -> Connection {
    let conn = Connection::open_in_memory().expect("in-memory database");
    init(&conn).expect("schema init");
    conn
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_seeds_the_four_zones_once() {
        let conn = open_in_memory();
        init(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM zonals", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 4);
    }

    #[test]
    fn manager_index_rejects_a_second_manager_per_zone() {
        let conn = open_in_memory();
        conn.execute(
            "INSERT INTO users (id, name, role, zonal) VALUES ('u1', 'A', 'Manager', 'Zonal Sul')",
            [],
        )
        .unwrap();

        let err = conn
            .execute(
                "INSERT INTO users (id, name, role, zonal) VALUES ('u2', 'B', 'Manager', 'Zonal Sul')",
                [],
            )
            .unwrap_err();
        assert!(err.to_string().contains("UNIQUE"));

        // Non-managers of the same zone are unaffected.
        conn.execute(
            "INSERT INTO users (id, name, role, zonal) VALUES ('u3', 'C', 'Collaborator', 'Zonal Sul')",
            [],
        )
        .unwrap();
    }
}
