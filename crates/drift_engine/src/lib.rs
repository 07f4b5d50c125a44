//! # Drift Engine
//!
//! Sync-mark extraction and drift analysis over two decoded packet streams.
//!
//! Responsibilities:
//! - Locate sync markers and reconstruct sample-accurate event times
//! - Count measurement samples between consecutive markers, across packet
//!   boundaries
//! - Match markers across the two streams by sequence number
//! - Produce a `DriftReport` (statistics, regression trend, rate fidelity)
//!
//! The engine is synchronous and pure over immutable inputs: re-running it on
//! the same packet lists (or any growing prefix of them) always yields the
//! same report. Packets must arrive in strict acquisition order; the engine
//! never sorts them.
//!
//! ## Usage Example
//!
//! ```ignore
//! use drift_engine::DriftEngine;
//!
//! let engine = DriftEngine::new(config.analyzer.clone());
//! let report = engine.analyze(&packets_a, &packets_b)?;
//! if !report.success {
//!     // max drift exceeded the threshold, or no common markers
//! }
//! ```

mod analyzer;
mod counter;
mod engine;
mod extractor;
mod matcher;
mod stats;

// Re-exports
pub use contracts::{AnalyzerConfig, DriftReport, IntervalCounts, Packet, SyncMarkEvent};
pub use counter::count_samples_between;
pub use engine::DriftEngine;
pub use extractor::extract_markers;
pub use matcher::{match_markers, MatchedPair};
pub use stats::{least_squares_slope, summarize, Summary};
