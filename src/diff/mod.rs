//! Sequence diffing primitives
//!
//! - `myers`: Myers' O(ND) shortest edit script over any slice of atoms
//! - `span`: character and line granularity diffs coalesced into spans
//! - `segment`: the four-way (unchanged/removed/added/changed) view of spans
//!
//! Everything above this module treats these as a black box: the
//! concatenation of a span list's left (right) values always reproduces the
//! left (right) input.

pub mod myers;
pub mod segment;
pub mod span;
