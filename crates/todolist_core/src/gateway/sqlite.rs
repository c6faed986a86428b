//! SQLite-backed gateway implementation.
//!
//! # Responsibility
//! - Open and configure SQLite connections for durable slots.
//! - Apply schema migrations before any slot access.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Returned gateways have `foreign_keys=ON` and migrations fully applied.
//! - Saving a slot replaces its payload atomically in one statement.

use super::{decode_payload, encode_payload, GatewayError, GatewayResult, TodoGateway, TODOS_SLOT};
use crate::model::todo::Todo;
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::Instant;

const LATEST_SCHEMA_VERSION: u32 = 1;

const INIT_SQL: &str = "CREATE TABLE IF NOT EXISTS slots (
    name TEXT PRIMARY KEY,
    payload TEXT NOT NULL
) WITHOUT ROWID;";

/// Gateway persisting the collection as a JSON payload in a SQLite slot row.
pub struct SqliteGateway {
    conn: Connection,
}

impl SqliteGateway {
    /// Opens a database file and prepares it for slot access.
    ///
    /// # Side effects
    /// - Applies pending migrations.
    /// - Emits `db_open` logging events with duration and status.
    pub fn open(path: impl AsRef<Path>) -> GatewayResult<Self> {
        let started_at = Instant::now();
        match Connection::open(path).map_err(GatewayError::from).and_then(Self::bootstrap) {
            Ok(gateway) => {
                info!(
                    "event=db_open module=gateway status=ok mode=file duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(gateway)
            }
            Err(err) => {
                error!(
                    "event=db_open module=gateway status=error mode=file duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Opens a private in-memory database. Used by tests and previews.
    pub fn open_in_memory() -> GatewayResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::bootstrap(conn)
    }

    fn bootstrap(mut conn: Connection) -> GatewayResult<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }
}

impl TodoGateway for SqliteGateway {
    fn load(&self) -> GatewayResult<Vec<Todo>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM slots WHERE name = ?1;",
                [TODOS_SLOT],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            Some(text) => Ok(decode_payload(TODOS_SLOT, &text)),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, todos: &[Todo]) -> GatewayResult<()> {
        let payload = encode_payload(todos)?;
        self.conn.execute(
            "INSERT INTO slots (name, payload) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET payload = excluded.payload;",
            params![TODOS_SLOT, payload],
        )?;
        Ok(())
    }

    fn clear(&mut self) -> GatewayResult<()> {
        self.conn
            .execute("DELETE FROM slots WHERE name = ?1;", [TODOS_SLOT])?;
        Ok(())
    }
}

fn apply_migrations(conn: &mut Connection) -> GatewayResult<()> {
    let current: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;

    if current > LATEST_SCHEMA_VERSION {
        return Err(GatewayError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: LATEST_SCHEMA_VERSION,
        });
    }
    if current == LATEST_SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(INIT_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {LATEST_SCHEMA_VERSION};"))?;
    tx.commit()?;
    Ok(())
}
