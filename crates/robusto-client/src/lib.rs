//! robusto client: runtime side of the packet framework.
//!
//! This crate wires the core context, the dispatcher, a pluggable transport,
//! strict config loading, metrics, and the concrete call catalog into a
//! client stack. It is intended to be embedded by an application and
//! exercised by integration tests through `MockTransport`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod client;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod obs;
pub mod packets;
pub mod transport;

pub use client::{Client, Credentials};
