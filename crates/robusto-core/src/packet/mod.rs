//! Packet lifecycle contract.
//!
//! A packet is one outstanding call: it builds its request from the shared
//! `PacketParams`, is handed to a transport, and turns the raw reply into a
//! typed result. Envelope handling lives in two reusable wrappers:
//!
//! - [`RobustoPacket`] for robusto calls (`status.code` + `results`),
//! - [`WimPacket`] for plain WIM calls (`response.statusCode` + `data`).
//!
//! Concrete calls only describe their body shapes and status overrides through
//! [`RobustoCall`] / [`WimCall`]. Calls with no envelope at all implement
//! [`Packet`] directly.

pub mod params;
pub mod persons;
pub mod redact;
pub mod request;
pub mod robusto;
pub mod wim;

use std::fmt;

use bytes::Bytes;

use crate::error::{Result, TransportError};

pub use params::PacketParams;
pub use persons::{HasPersons, Person, PersonsMap};
pub use redact::LogRedactor;
pub use request::{setup_common_and_sign, RequestParts, Route};
pub use robusto::{RobustoCall, RobustoPacket, RobustoReply};
pub use wim::{WimCall, WimPacket};

/// HTTP verb of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpVerb {
    #[default]
    Get,
    Post,
}

impl HttpVerb {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheduling hint for the transport. Ordered from most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    /// Preempts everything queued behind it.
    Top,
    High,
    #[default]
    Normal,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Top => "top",
            Priority::High => "high",
            Priority::Normal => "normal",
            Priority::Low => "low",
        }
    }
}

/// How the transport hand-off runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    /// Non-blocking; completion is delivered later.
    #[default]
    Async,
    /// The calling thread waits for the transport.
    Blocking,
}

/// A fully prepared request, owned by the transport once sent.
#[derive(Debug, Clone)]
pub struct PacketRequest {
    pub method: &'static str,
    pub verb: HttpVerb,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
    pub priority: Priority,
    /// Scrubs sensitive values from log lines for this request only.
    pub redactor: Option<LogRedactor>,
}

impl PacketRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            Some(h) => h.1 = value,
            None => self.headers.push((name.to_string(), value)),
        }
    }

    /// Apply the request's redactor (if any) to an arbitrary line.
    pub fn redact(&self, text: &str) -> String {
        match &self.redactor {
            Some(r) => r.redact(text),
            None => text.to_string(),
        }
    }

    /// One-line description safe to log.
    pub fn log_line(&self) -> String {
        let line = format!(
            "{} {} {}",
            self.verb,
            self.url,
            String::from_utf8_lossy(&self.body)
        );
        self.redact(&line)
    }
}

/// Request/response lifecycle of a single call.
///
/// A packet is owned by its caller until its completion is delivered.
pub trait Packet: Send + 'static {
    type Output: Send + 'static;

    /// Stable method name used for routing, signing, logs and metrics.
    fn method(&self) -> &'static str;

    fn verb(&self) -> HttpVerb {
        HttpVerb::Get
    }

    fn priority(&self) -> Priority {
        Priority::Normal
    }

    fn execution(&self) -> Execution {
        Execution::Async
    }

    /// Build the request. Must be a pure function of the packet arguments and
    /// `params`.
    fn build_request(&self, params: &PacketParams) -> Result<PacketRequest>;

    /// Decode a non-empty reply.
    fn parse_response(&mut self, body: &[u8]) -> Result<Self::Output>;

    /// Called instead of `parse_response` when the transport delivered zero bytes.
    fn on_empty_response(&mut self) -> Result<Self::Output> {
        Err(TransportError::EmptyResponse.into())
    }

    /// Last decoded status code, if any reply was parsed.
    fn status_code(&self) -> Option<u32>;

    /// Whether the terminal state is success-like, without looking at the payload.
    fn is_status_code_ok(&self) -> bool;
}
