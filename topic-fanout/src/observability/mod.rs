//! Structured-logging vocabulary: canonical event names and field keys.
//!
//! Library modules emit `tracing` records tagged with these constants and
//! never install a global subscriber; processes at the boundary (tests,
//! benches) perform one-time subscriber initialization.

pub mod events;
pub mod fields;
