//! # Common Types
//!
//! Error and result types used across both client and server modules.

use thiserror::Error;

use crate::connection::ObserverId;
use crate::object::ObjectId;

/// Errors surfaced by registry lookups and channel operations.
///
/// Formatting and the authoritative setters never fail; only operations that
/// address an object or an observer by id can.
#[derive(Error, Debug)]
pub enum ReplicationError {
    #[error("Object not found: {0}")]
    ObjectNotFound(ObjectId),

    #[error("Observer not found: {0}")]
    ObserverNotFound(ObserverId),

    #[error("Channel closed: {0}")]
    ChannelClosed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Result type used throughout the attribute modules
pub type AttrResult<T> = Result<T, ReplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_missing_id() {
        assert_eq!(
            ReplicationError::ObjectNotFound(1042).to_string(),
            "Object not found: 1042"
        );
        assert_eq!(
            ReplicationError::ObserverNotFound(3).to_string(),
            "Observer not found: 3"
        );
    }

    #[test]
    fn test_serde_errors_convert() {
        let err: ReplicationError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ReplicationError::SerdeError(_)));
    }
}
