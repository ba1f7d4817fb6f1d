//! Transport seam.
//!
//! The HTTP stack that actually moves bytes lives outside this crate; it plugs
//! in through [`Transport`]. A request is handed over by value together with
//! its redactor, so log scrubbing rules never outlive the request.

pub mod mock;

use async_trait::async_trait;
use bytes::Bytes;

use robusto_core::{PacketRequest, TransportError};

pub use mock::{MockReply, MockTransport, SentRequest};

pub type TransportResult<T> = std::result::Result<T, TransportError>;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the request without blocking the caller; resolves with the raw
    /// reply body.
    async fn send(&self, request: PacketRequest) -> TransportResult<Bytes>;

    /// Perform the request on the calling thread.
    fn send_blocking(&self, request: PacketRequest) -> TransportResult<Bytes>;
}
