//! Line pairing inside changed blocks
//!
//! - `score`: similarity of two candidate lines and the accept/reject rule
//! - `touched`: per-round record of which lines shared characters
//! - `queue`: the lines of a block still awaiting a decision
//! - `matcher`: picks the partner, if any, of one pending line
//! - `reconcile`: drives the character level rounds over a whole block

pub mod matcher;
pub mod queue;
pub mod reconcile;
pub mod score;
pub mod touched;
