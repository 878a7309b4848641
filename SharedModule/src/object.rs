//! # Shared Object System
//!
//! Object identity shared by the authority and its observers.

use serde::Serialize;

/// Network identity of an object. Stable for the object's whole life and
/// used to route requests to the authority.
pub type ObjectId = u64;

/// Borrowed view of an object handed to external collaborators such as the
/// fallback namer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ObjectHandle<'a> {
    /// Object ID
    pub id: ObjectId,

    /// Class (prefab) name the object was spawned from
    pub class_name: &'a str,
}

impl<'a> ObjectHandle<'a> {
    pub fn new(id: ObjectId, class_name: &'a str) -> Self {
        Self { id, class_name }
    }
}
