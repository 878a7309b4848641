//! # Replication Messages
//!
//! What travels from the authority to each observer. Messages for one
//! observer are delivered in the order the authority produced them.

use serde::{Deserialize, Serialize};

use crate::field::{FieldVersion, ReplicatedField};
use crate::object::ObjectId;
use crate::property::{AttributeConfig, AttributeField};
use crate::rpc::ExamineMessage;

/// A field's committed value together with its version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldState {
    pub version: FieldVersion,
    pub value: String,
}

impl FieldState {
    pub fn of(field: &ReplicatedField<String>) -> Self {
        Self {
            version: field.version(),
            value: field.get().clone(),
        }
    }
}

/// One commit of one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldUpdate {
    pub field: AttributeField,
    pub version: FieldVersion,
    pub value: String,
}

/// Everything an observer needs to mirror an object it has not seen yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSnapshot {
    pub object_id: ObjectId,

    /// Class (prefab) name, input to the fallback namer
    pub class_name: String,

    /// Static configuration, including the initial description used by examine
    pub config: AttributeConfig,

    pub name: FieldState,
    pub description: FieldState,
}

impl ObjectSnapshot {
    pub fn field(&self, field: AttributeField) -> &FieldState {
        match field {
            AttributeField::Name => &self.name,
            AttributeField::Description => &self.description,
        }
    }
}

/// Authority to observer traffic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplicationMessage {
    /// An object became visible: newly spawned, or replayed on connect
    Spawn(ObjectSnapshot),

    /// A field was committed
    Field { object_id: ObjectId, update: FieldUpdate },

    /// Examine text answering one of this observer's requests
    Examine(ExamineMessage),

    /// The object was destroyed
    Destroy(ObjectId),
}

impl ReplicationMessage {
    /// The object this message is about
    pub fn object_id(&self) -> ObjectId {
        match self {
            Self::Spawn(snapshot) => snapshot.object_id,
            Self::Field { object_id, .. } => *object_id,
            Self::Examine(message) => message.object_id,
            Self::Destroy(object_id) => *object_id,
        }
    }
}
