//! # Actor Module
//!
//! Object lifecycle on the authority: spawning, seeding and destruction.

pub mod spawn;

pub use spawn::{SpawnInfo, Spawnable};
