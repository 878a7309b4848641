//! # Connection Types
//!
//! Shared connection-related types used by both client and server.

use serde::{Deserialize, Serialize};

/// Identifier the authority assigns to each connected observer
pub type ObserverId = u64;

/// State of an observer's link to the authority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionState {
    /// Receiving replication traffic
    Connected,

    /// The authority dropped the link or was shut down
    Disconnected,
}
