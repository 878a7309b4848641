//! # RPC Types
//!
//! The examine round trip: an observer asks the authority about an object,
//! the authority answers with text for that observer.

use serde::{Deserialize, Serialize};

use crate::connection::ObserverId;
use crate::object::ObjectId;

/// Fire-and-forget request for an object's examine text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamineRequest {
    /// Network identity of the examined object
    pub object_id: ObjectId,

    /// Observer that asked and receives the answer
    pub requester: ObserverId,
}

/// Examine text sent back to an observer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamineMessage {
    pub object_id: ObjectId,
    pub text: String,
}
