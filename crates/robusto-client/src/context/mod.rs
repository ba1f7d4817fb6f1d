//! Execution context shared across layers.
//!
//! Every packet completion is funnelled onto the single worker of
//! [`CoreContext`], so application state touched by completions is never
//! mutated concurrently.

pub mod core_context;

pub use core_context::{CoreContext, Task};
