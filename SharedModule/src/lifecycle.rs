//! # Object Lifecycle Types
//!
//! State enum tracking the lifecycle stages of an authoritative object.

use serde::{Deserialize, Serialize};

/// The current state of an object in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectLifecycleState {
    /// Object is registered but its attributes have not been seeded
    Initializing,

    /// Object has been spawned and is live
    Active,

    /// Object has been destroyed
    Destroyed,
}
