//! Dispatcher module exports.
//!
//! Re-exports the dispatcher and completion type so downstream consumers can
//! depend on this module directly.

pub mod dispatcher;

pub use dispatcher::{Completion, Dispatcher};
