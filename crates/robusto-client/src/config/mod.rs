//! Client config loader (strict parsing).
//!
//! Reads the `session` (host, API version, log redaction) and `context`
//! (core worker name, stall threshold, backtrace capture) sections; unknown
//! keys and out-of-range values are rejected as `PacketError::Config`.

pub mod schema;

use std::fs;

use robusto_core::error::{PacketError, Result};

pub use schema::{BacktraceMode, ClientConfig, ContextSection, SessionSection};

pub fn load_from_file(path: &str) -> Result<ClientConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| PacketError::Config(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ClientConfig> {
    let cfg: ClientConfig = serde_yaml::from_str(s)
        .map_err(|e| PacketError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
