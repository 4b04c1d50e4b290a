//! Hybrid line and character diffs
//!
//! A line oriented edit script in which every line that was edited, rather
//! than replaced, carries a character level diff of its own:
//!
//! - `diff`: Myers' diff and its span/segment views
//! - `matching`: scoring and pairing of lines inside changed blocks
//! - `change`: the per-line result entries
//! - `config`: calibration of the pairing heuristic
//! - `hybrid`: the entry point tying the above together
//!
//! ```
//! use linediff::{Change, hybrid_diff};
//!
//! let changes = hybrid_diff("one\ntwo\n", "one\ntoo\n");
//! assert!(matches!(changes[1], Change::Changed { .. }));
//! ```

pub mod change;
pub mod config;
pub mod diff;
pub mod hybrid;
pub mod matching;

pub use change::{Change, DiffSummary, Side, reconstruct};
pub use config::MatchConfig;
pub use diff::segment::Segment;
pub use hybrid::{HybridDiff, hybrid_diff};
