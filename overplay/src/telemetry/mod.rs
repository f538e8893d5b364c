//! Control telemetry for observability and diagnostics.
//!
//! Counts what the gesture core actually asked the transport to do, and how
//! much work it avoided. Counters are lock-free atomics so the motion worker
//! and the main context can record without contention.
//!
//! # Architecture
//!
//! ```text
//! Sessions / Controller ─────► ControlMetrics ─────► ControlSnapshot ─────► Views
//!                              (atomic counters)     (point-in-time copy)     (CLI, etc.)
//! ```
//!
//! # Example
//!
//! ```
//! use overplay::telemetry::ControlMetrics;
//!
//! let metrics = ControlMetrics::new();
//! metrics.seek_issued();
//! metrics.seek_coalesced();
//!
//! let snapshot = metrics.snapshot();
//! assert_eq!(snapshot.seeks_issued, 1);
//! assert_eq!(snapshot.seeks_coalesced, 1);
//! ```

mod metrics;
mod snapshot;

pub use metrics::ControlMetrics;
pub use snapshot::ControlSnapshot;
