//! robusto core: transport-agnostic packet primitives, envelopes and error types.
//!
//! This crate defines the wire-level contracts every backend call is built
//! from: the `Packet` lifecycle, the robusto and WIM envelopes, status-code
//! tables, request signing and log redaction. It carries no async runtime so
//! it can be reused by any transport.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `PacketError`/`Result` so a malformed
//! reply never crashes the caller.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod packet;
pub mod protocol;

/// Shared result type.
pub use error::{ErrorKind, PacketError, ProtocolError, Result, TransportError};
pub use packet::{
    Execution, HttpVerb, Packet, PacketParams, PacketRequest, Priority, RobustoCall,
    RobustoPacket, RobustoReply, WimCall, WimPacket,
};
