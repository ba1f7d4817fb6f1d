//! Per-session request context shared by every packet.

use std::fmt;

/// Default backend host.
pub const DEFAULT_HOST: &str = "https://u.icq.net";
/// Default robusto API version.
pub const DEFAULT_API_VERSION: u32 = 92;

/// Immutable session context. Built once per logical session and shared
/// read-only by all packets (typically behind an `Arc`).
#[derive(Clone, PartialEq, Eq)]
pub struct PacketParams {
    aimsid: String,
    session_key: Vec<u8>,
    dev_id: String,
    host: String,
    api_version: u32,
    full_log: bool,
}

impl PacketParams {
    pub fn new(
        aimsid: impl Into<String>,
        session_key: impl Into<Vec<u8>>,
        dev_id: impl Into<String>,
    ) -> Self {
        Self {
            aimsid: aimsid.into(),
            session_key: session_key.into(),
            dev_id: dev_id.into(),
            host: DEFAULT_HOST.to_string(),
            api_version: DEFAULT_API_VERSION,
            full_log: false,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        let host: String = host.into();
        self.host = host.trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_version(mut self, api_version: u32) -> Self {
        self.api_version = api_version;
        self
    }

    /// `true` disables log redaction.
    pub fn with_full_log(mut self, full_log: bool) -> Self {
        self.full_log = full_log;
        self
    }

    pub fn aimsid(&self) -> &str {
        &self.aimsid
    }

    pub fn session_key(&self) -> &[u8] {
        &self.session_key
    }

    pub fn dev_id(&self) -> &str {
        &self.dev_id
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn api_version(&self) -> u32 {
        self.api_version
    }

    pub fn full_log(&self) -> bool {
        self.full_log
    }
}

// Session id and key stay out of debug output.
impl fmt::Debug for PacketParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PacketParams")
            .field("aimsid", &"***")
            .field("session_key", &format_args!("<{} bytes>", self.session_key.len()))
            .field("dev_id", &self.dev_id)
            .field("host", &self.host)
            .field("api_version", &self.api_version)
            .field("full_log", &self.full_log)
            .finish()
    }
}
