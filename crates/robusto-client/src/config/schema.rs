use serde::Deserialize;
use url::Url;

use robusto_core::error::{PacketError, Result};
use robusto_core::packet::params::{DEFAULT_API_VERSION, DEFAULT_HOST};
use robusto_core::protocol::robusto::MIN_SUPPORTED_API_VERSION;
use robusto_core::PacketParams;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub session: SessionSection,

    #[serde(default)]
    pub context: ContextSection,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PacketError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.session.validate()?;
        self.context.validate()?;

        Ok(())
    }

    /// Session context for packets, combining this config with login material.
    pub fn packet_params(
        &self,
        aimsid: impl Into<String>,
        session_key: impl Into<Vec<u8>>,
        dev_id: impl Into<String>,
    ) -> PacketParams {
        PacketParams::new(aimsid, session_key, dev_id)
            .with_host(self.session.host.clone())
            .with_api_version(self.session.api_version)
            .with_full_log(self.session.full_log)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: 1,
            session: SessionSection::default(),
            context: ContextSection::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionSection {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_api_version")]
    pub api_version: u32,

    /// Disable log redaction of session identifiers.
    #[serde(default)]
    pub full_log: bool,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            api_version: default_api_version(),
            full_log: false,
        }
    }
}

impl SessionSection {
    pub fn validate(&self) -> Result<()> {
        let host = Url::parse(&self.host)
            .map_err(|e| PacketError::Config(format!("session.host is not a url: {e}")))?;
        if !matches!(host.scheme(), "http" | "https") || host.cannot_be_a_base() {
            return Err(PacketError::Config(
                "session.host must be an http:// or https:// base url".into(),
            ));
        }
        if host.query().is_some() || host.fragment().is_some() {
            return Err(PacketError::Config(
                "session.host must not carry a query or fragment".into(),
            ));
        }
        if self.api_version < MIN_SUPPORTED_API_VERSION {
            return Err(PacketError::Config(format!(
                "session.api_version must be at least {MIN_SUPPORTED_API_VERSION}"
            )));
        }
        Ok(())
    }
}

fn default_host() -> String {
    DEFAULT_HOST.into()
}
fn default_api_version() -> u32 {
    DEFAULT_API_VERSION
}

/// When to capture a backtrace for each posted task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BacktraceMode {
    Off,
    /// Follow `RUST_BACKTRACE` / `RUST_LIB_BACKTRACE`.
    #[default]
    Env,
    Always,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContextSection {
    #[serde(default = "default_thread_name")]
    pub thread_name: String,

    #[serde(default = "default_stall_threshold_ms")]
    pub stall_threshold_ms: u64,

    #[serde(default)]
    pub backtraces: BacktraceMode,
}

impl Default for ContextSection {
    fn default() -> Self {
        Self {
            thread_name: default_thread_name(),
            stall_threshold_ms: default_stall_threshold_ms(),
            backtraces: BacktraceMode::default(),
        }
    }
}

impl ContextSection {
    pub fn validate(&self) -> Result<()> {
        if self.thread_name.trim().is_empty() {
            return Err(PacketError::Config("context.thread_name must not be empty".into()));
        }
        if !(1..=60000).contains(&self.stall_threshold_ms) {
            return Err(PacketError::Config(
                "context.stall_threshold_ms must be between 1 and 60000".into(),
            ));
        }
        Ok(())
    }
}

fn default_thread_name() -> String {
    "core main".into()
}
fn default_stall_threshold_ms() -> u64 {
    200
}
