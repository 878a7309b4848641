//! # Attribute Properties
//!
//! The configuration of an item's identity, fixed when the object is
//! created, and the keys of the two fields replicated from it.

use serde::{Deserialize, Serialize};

use crate::types::AttrResult;

/// The replicated attribute fields of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttributeField {
    /// Current display name
    Name,

    /// Current description
    Description,
}

impl AttributeField {
    /// Both fields, in the order they are seeded and replayed
    pub const ALL: [AttributeField; 2] = [AttributeField::Name, AttributeField::Description];
}

/// Something that reports how many items a single object stands for
pub trait StackQuantity {
    fn amount(&self) -> i32;
}

/// Static attribute configuration. Immutable once the object exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeConfig {
    /// Display name of this item when spawned
    pub initial_name: String,

    /// Description of this item when spawned
    pub initial_description: String,

    /// Will this item highlight on mouseover?
    pub will_highlight: bool,

    /// How much does one of these sell for when shipped on the cargo shuttle?
    pub export_cost: i32,

    /// Alternate name used when displaying this in the cargo console report
    pub export_name: Option<String>,

    /// Additional message to display in the cargo console report
    pub export_message: Option<String>,
}

impl Default for AttributeConfig {
    fn default() -> Self {
        Self {
            initial_name: String::new(),
            initial_description: String::new(),
            will_highlight: true,
            export_cost: 0,
            export_name: None,
            export_message: None,
        }
    }
}

impl AttributeConfig {
    pub fn new(initial_name: impl Into<String>, initial_description: impl Into<String>) -> Self {
        Self {
            initial_name: initial_name.into(),
            initial_description: initial_description.into(),
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> AttrResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The configured starting value of a replicated field
    pub fn initial_value(&self, field: AttributeField) -> &str {
        match field {
            AttributeField::Name => &self.initial_name,
            AttributeField::Description => &self.initial_description,
        }
    }

    /// Export cost, multiplied by the stack amount when the object is a stack
    pub fn export_cost_for(&self, stack: Option<&dyn StackQuantity>) -> i32 {
        match stack {
            Some(stack) => self.export_cost.saturating_mul(stack.amount()),
            None => self.export_cost,
        }
    }
}
