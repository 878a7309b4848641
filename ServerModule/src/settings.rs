//! # Server Settings
//!
//! Tunables of the authority, loadable from JSON.

use attr_shared::constants::object::{FIRST_OBJECT_ID, RESERVED_OBJECT_ID_MAX};
use attr_shared::object::ObjectId;
use attr_shared::types::{AttrResult, ReplicationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// First id handed to a spawned object. Ids up to 999 are reserved.
    pub first_object_id: ObjectId,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            first_object_id: FIRST_OBJECT_ID,
        }
    }
}

impl ServerSettings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> AttrResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> AttrResult<()> {
        if self.first_object_id <= RESERVED_OBJECT_ID_MAX {
            return Err(ReplicationError::InvalidConfig(format!(
                "first_object_id ({}) falls in the reserved range 0-{}",
                self.first_object_id, RESERVED_OBJECT_ID_MAX
            )));
        }
        Ok(())
    }
}
