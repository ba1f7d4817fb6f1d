//! Robusto envelope (JSON).
//!
//! Requests wrap the call body as `{"params": ...}`. Responses carry a mandatory
//! `status.code` and an optional `results` object kept as `RawValue` so each
//! call decodes its own body lazily.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::{PacketError, Result};

/// Oldest API version the robusto endpoints still serve.
pub const MIN_SUPPORTED_API_VERSION: u32 = 61;

/// Request envelope.
#[derive(Debug, Serialize)]
pub struct RequestEnvelope<P> {
    pub params: P,
}

impl<P: Serialize> RequestEnvelope<P> {
    pub fn new(params: P) -> Self {
        Self { params }
    }

    /// Serialize to the request body.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| PacketError::BadRequest(format!("encode params failed: {e}")))
    }
}

/// Response envelope.
#[derive(Debug, Deserialize)]
pub struct ResponseEnvelope {
    pub status: Status,
    /// Call body, stored as raw JSON.
    #[serde(default)]
    pub results: Option<Box<RawValue>>,
}

/// `status` object of a robusto response.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Status {
    pub code: u32,
}

/// Decode the envelope. Invalid JSON or a missing/non-numeric `status.code`
/// is an envelope failure regardless of the call.
pub fn decode_response(bytes: &[u8]) -> Result<ResponseEnvelope> {
    serde_json::from_slice(bytes)
        .map_err(|e| PacketError::EnvelopeParse(format!("invalid robusto envelope: {e}")))
}
