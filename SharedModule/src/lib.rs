//! # SharedModule
//!
//! Shared types and utilities used by both the authoritative server and the
//! observing clients. This module holds the replicated field primitive, the
//! attribute configuration, the replication messages and the pure
//! presentation formatters, so that both sides of the connection agree on
//! every value and every rendered string.

// Export module structure
pub mod types;
pub mod constants;
pub mod object;
pub mod field;
pub mod property;
pub mod connection;
pub mod lifecycle;
pub mod rpc;
pub mod replication;
pub mod naming;
pub mod presentation;

// Re-export commonly used items for convenience
pub use types::{AttrResult, ReplicationError};
pub use object::{ObjectHandle, ObjectId};
pub use field::{FieldHook, FieldVersion, ReplicatedField};
pub use property::{AttributeConfig, AttributeField, StackQuantity};
pub use connection::{ConnectionState, ObserverId};
pub use lifecycle::ObjectLifecycleState;
pub use rpc::{ExamineMessage, ExamineRequest};
pub use replication::{FieldState, FieldUpdate, ObjectSnapshot, ReplicationMessage};
pub use naming::{FallbackNamer, PrefabNamer};
