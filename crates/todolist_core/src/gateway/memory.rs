//! In-memory gateway implementation.
//!
//! # Responsibility
//! - Provide a zero-dependency gateway for tests and ephemeral embedders.
//! - Store payloads in the exact serialized form the SQLite backend uses.
//!
//! # Invariants
//! - Payload format is byte-identical with other backends, so a slot can be
//!   copied between gateways without re-encoding.

use super::{decode_payload, encode_payload, GatewayResult, TodoGateway, TODOS_SLOT};
use crate::model::todo::Todo;
use std::collections::HashMap;

/// Gateway keeping slots in a process-local map. Nothing is durable.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    slots: HashMap<String, String>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw stored payload, if any.
    pub fn raw_payload(&self) -> Option<&str> {
        self.slots.get(TODOS_SLOT).map(String::as_str)
    }

    /// Overwrites the stored payload verbatim.
    ///
    /// Import seam; also lets tests plant corrupt payloads.
    pub fn set_raw_payload(&mut self, payload: impl Into<String>) {
        self.slots.insert(TODOS_SLOT.to_string(), payload.into());
    }
}

impl TodoGateway for MemoryGateway {
    fn load(&self) -> GatewayResult<Vec<Todo>> {
        match self.slots.get(TODOS_SLOT) {
            Some(payload) => Ok(decode_payload(TODOS_SLOT, payload)),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, todos: &[Todo]) -> GatewayResult<()> {
        let payload = encode_payload(todos)?;
        self.slots.insert(TODOS_SLOT.to_string(), payload);
        Ok(())
    }

    fn clear(&mut self) -> GatewayResult<()> {
        self.slots.remove(TODOS_SLOT);
        Ok(())
    }
}
