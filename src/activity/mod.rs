//! Repository discovery and activity snapshot assembly.

pub mod aggregator;
pub mod discovery;
pub mod normalize;
pub mod types;
