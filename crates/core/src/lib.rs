//! Domain types and pure reporting logic for the feedback dashboard.
//!
//! Everything in this crate is synchronous and side-effect-free: the
//! reporting functions are deterministic transformations of an in-memory
//! record collection, with no database or HTTP awareness.

pub mod error;
pub mod report;
pub mod sample;
pub mod status;
pub mod types;
