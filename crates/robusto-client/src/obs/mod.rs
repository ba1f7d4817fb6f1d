//! Observability: in-process metrics and tracing setup.
//!
//! Metrics are stored as atomics and rendered on demand in Prometheus text
//! format; there is no exporter here, the host application decides where the
//! text goes.

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
pub use metrics::ClientMetrics;
