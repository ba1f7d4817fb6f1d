//! Protocol modules (robusto + plain WIM).
//!
//! This module hosts the two JSON conventions spoken by the backend:
//! - Robusto: `{"params": ...}` requests, `status.code` + `results` responses.
//! - WIM: `response.statusCode` + `response.data` responses.
//!
//! All decoders are panic-free: malformed input is reported as `PacketError`
//! so a bad reply never takes the caller down.

pub mod robusto;
pub mod status;
pub mod wim;

use serde::de::DeserializeOwned;
use serde_json::value::RawValue;

use crate::error::{PacketError, Result};

/// Decode a call-specific body. Shape mismatches are result failures, not
/// envelope failures.
pub fn decode_body<T: DeserializeOwned>(raw: &RawValue) -> Result<T> {
    serde_json::from_str(raw.get())
        .map_err(|e| PacketError::ResultParse(format!("unexpected body shape: {e}")))
}
