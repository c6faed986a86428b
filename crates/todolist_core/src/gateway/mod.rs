//! Persistence gateway contracts and payload codec.
//!
//! # Responsibility
//! - Define the durable-slot contract the store persists through.
//! - Keep payload (de)serialization in one place shared by all backends.
//!
//! # Invariants
//! - The whole collection lives under a single named slot.
//! - A missing slot reads as an empty collection.
//! - An unparseable payload reads as an empty collection and is logged,
//!   never surfaced as an error.

use crate::model::todo::Todo;
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryGateway;
pub use sqlite::SqliteGateway;

/// Fixed slot name holding the serialized todo collection.
pub const TODOS_SLOT: &str = "todos";

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failure while reading or writing durable state.
#[derive(Debug)]
pub enum GatewayError {
    Sqlite(rusqlite::Error),
    Payload(serde_json::Error),
    /// Backend-specific failure from a gateway outside this crate.
    Backend(String),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Payload(err) => write!(f, "payload serialization failed: {err}"),
            Self::Backend(message) => write!(f, "{message}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "storage schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for GatewayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Payload(err) => Some(err),
            Self::Backend(_) => None,
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for GatewayError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(value: serde_json::Error) -> Self {
        Self::Payload(value)
    }
}

/// Durable storage contract for the todo collection.
///
/// Implementations own exactly one named slot per collection and store the
/// full serialized sequence on every save.
pub trait TodoGateway {
    /// Reads the stored collection.
    ///
    /// Returns an empty collection when the slot is absent or its payload
    /// fails to parse; only backend I/O failures surface as errors.
    fn load(&self) -> GatewayResult<Vec<Todo>>;

    /// Serializes and writes the full collection.
    fn save(&mut self, todos: &[Todo]) -> GatewayResult<()>;

    /// Removes the stored slot entirely. Used for resets and tests.
    fn clear(&mut self) -> GatewayResult<()>;
}

pub(crate) fn encode_payload(todos: &[Todo]) -> GatewayResult<String> {
    Ok(serde_json::to_string(todos)?)
}

/// Decodes a stored payload, degrading to empty on corrupt data.
pub(crate) fn decode_payload(slot: &str, payload: &str) -> Vec<Todo> {
    match serde_json::from_str(payload) {
        Ok(todos) => todos,
        Err(err) => {
            error!(
                "event=gateway_load module=gateway status=error slot={slot} \
                 error_code=payload_corrupt error={err}"
            );
            Vec::new()
        }
    }
}
