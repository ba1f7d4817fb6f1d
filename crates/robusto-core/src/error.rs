//! Shared error type across robusto crates.

use thiserror::Error;

/// Stable error classification, independent of the payload carried by a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Transport produced no usable bytes.
    Transport,
    /// Response is not JSON or lacks a numeric status code.
    EnvelopeParse,
    /// Envelope was fine but the call-specific body was not understood.
    ResultParse,
    /// Server answered with a status code outside the success family.
    Protocol,
    /// Request could not be built from the call arguments.
    BadRequest,
    /// Invalid configuration.
    Config,
    /// Core context no longer accepts work.
    Shutdown,
    /// Internal invariant broken.
    Internal,
}

impl ErrorKind {
    /// String representation used in logs, metrics and test vectors.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Transport => "TRANSPORT",
            ErrorKind::EnvelopeParse => "ENVELOPE_PARSE",
            ErrorKind::ResultParse => "RESULT_PARSE",
            ErrorKind::Protocol => "PROTOCOL",
            ErrorKind::BadRequest => "BAD_REQUEST",
            ErrorKind::Config => "CONFIG",
            ErrorKind::Shutdown => "SHUTDOWN",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Failures surfaced unchanged from the transport layer. Never retried here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("empty response")]
    EmptyResponse,
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("request timed out")]
    Timeout,
    #[error("http status {0}")]
    HttpStatus(u16),
}

/// Status codes outside the success family, refined per call where possible.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("you are not a member of this chat")]
    NotChatMember,
    #[error("you are blocked in this chat")]
    Blocked,
    #[error("invalid request (status {0})")]
    InvalidRequest(u32),
    #[error("authentication required")]
    AuthRequired,
    #[error("rate limited (status {0})")]
    RateLimited(u32),
    #[error("rejected with status {code}: {reason}")]
    Rejected { code: u32, reason: String },
    #[error("unhandled status code {0}")]
    Unhandled(u32),
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PacketError>;

/// Unified error type used by core and client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacketError {
    #[error("transport: {0}")]
    Transport(#[from] TransportError),
    #[error("envelope parse: {0}")]
    EnvelopeParse(String),
    #[error("result parse: {0}")]
    ResultParse(String),
    #[error("protocol: {0}")]
    Protocol(#[from] ProtocolError),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("config: {0}")]
    Config(String),
    #[error("core context is shut down")]
    Shutdown,
    #[error("internal: {0}")]
    Internal(String),
}

impl PacketError {
    /// Map to the stable classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PacketError::Transport(_) => ErrorKind::Transport,
            PacketError::EnvelopeParse(_) => ErrorKind::EnvelopeParse,
            PacketError::ResultParse(_) => ErrorKind::ResultParse,
            PacketError::Protocol(_) => ErrorKind::Protocol,
            PacketError::BadRequest(_) => ErrorKind::BadRequest,
            PacketError::Config(_) => ErrorKind::Config,
            PacketError::Shutdown => ErrorKind::Shutdown,
            PacketError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// The protocol refinement, if this is a status-code failure.
    pub fn protocol(&self) -> Option<&ProtocolError> {
        match self {
            PacketError::Protocol(p) => Some(p),
            _ => None,
        }
    }
}
