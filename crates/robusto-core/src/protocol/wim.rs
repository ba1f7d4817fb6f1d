//! Plain WIM envelope (JSON).
//!
//! `{"response": {"statusCode": 200, "statusText": "OK", "data": {...}}}`

use serde::Deserialize;
use serde_json::value::RawValue;

use crate::error::{PacketError, Result};

#[derive(Debug, Deserialize)]
pub struct WimEnvelope {
    pub response: WimResponse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WimResponse {
    pub status_code: u32,
    #[serde(default)]
    pub status_text: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    /// Call body, stored as raw JSON.
    #[serde(default)]
    pub data: Option<Box<RawValue>>,
}

pub fn decode_response(bytes: &[u8]) -> Result<WimResponse> {
    let env: WimEnvelope = serde_json::from_slice(bytes)
        .map_err(|e| PacketError::EnvelopeParse(format!("invalid wim envelope: {e}")))?;
    Ok(env.response)
}
