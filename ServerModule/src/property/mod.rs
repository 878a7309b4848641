//! # Attribute State
//!
//! The authoritative copy of an item's identity: two replicated fields (name
//! and description) plus the configuration they are seeded from. Every
//! mutation goes through [`ReplicatedField::set`] and yields the
//! [`FieldUpdate`] the replication channel forwards to observers.

use attr_shared::field::ReplicatedField;
use attr_shared::naming::FallbackNamer;
use attr_shared::object::{ObjectHandle, ObjectId};
use attr_shared::presentation::examine_text;
use attr_shared::property::{AttributeConfig, AttributeField, StackQuantity};
use attr_shared::replication::{FieldState, FieldUpdate, ObjectSnapshot};
use log::debug;

use crate::rpc::{Examinable, ExamineContext};

// Submodules
pub mod replication;

pub use replication::ReplicationChannel;

/// Authoritative attribute state of one object
#[derive(Debug)]
pub struct AttributeState {
    config: AttributeConfig,
    article_name: ReplicatedField<String>,
    article_description: ReplicatedField<String>,
}

impl AttributeState {
    /// Create the state for a freshly instantiated object. The replicated
    /// fields stay blank until the object is spawned.
    pub fn new(config: AttributeConfig) -> Self {
        Self {
            config,
            article_name: ReplicatedField::default(),
            article_description: ReplicatedField::default(),
        }
    }

    pub fn config(&self) -> &AttributeConfig {
        &self.config
    }

    /// Current name
    pub fn article_name(&self) -> &str {
        self.article_name.get()
    }

    /// Current description
    pub fn article_description(&self) -> &str {
        self.article_description.get()
    }

    pub fn initial_name(&self) -> &str {
        &self.config.initial_name
    }

    pub fn initial_description(&self) -> &str {
        &self.config.initial_description
    }

    pub fn will_highlight(&self) -> bool {
        self.config.will_highlight
    }

    pub fn export_name(&self) -> Option<&str> {
        self.config.export_name.as_deref()
    }

    pub fn export_message(&self) -> Option<&str> {
        self.config.export_message.as_deref()
    }

    /// Export cost, multiplied by the stack amount when a stack is present
    pub fn export_cost(&self, stack: Option<&dyn StackQuantity>) -> i32 {
        self.config.export_cost_for(stack)
    }

    pub fn field(&self, field: AttributeField) -> &ReplicatedField<String> {
        match field {
            AttributeField::Name => &self.article_name,
            AttributeField::Description => &self.article_description,
        }
    }

    fn field_mut(&mut self, field: AttributeField) -> &mut ReplicatedField<String> {
        match field {
            AttributeField::Name => &mut self.article_name,
            AttributeField::Description => &mut self.article_description,
        }
    }

    /// Install the authority-side hook of a field
    pub fn set_hook(
        &mut self,
        field: AttributeField,
        hook: impl FnMut(&String, &String) + Send + 'static,
    ) {
        self.field_mut(field).set_hook(hook);
    }

    /// Commit a new value to a field
    pub fn set_field(&mut self, field: AttributeField, value: String) -> FieldUpdate {
        let replicated = self.field_mut(field);
        let version = replicated.set(value);
        debug!("Committed {:?} v{}: {:?}", field, version, replicated.get());
        FieldUpdate {
            field,
            version,
            value: replicated.get().clone(),
        }
    }

    pub fn set_article_name(&mut self, name: impl Into<String>) -> FieldUpdate {
        self.set_field(AttributeField::Name, name.into())
    }

    pub fn set_article_description(&mut self, description: impl Into<String>) -> FieldUpdate {
        self.set_field(AttributeField::Description, description.into())
    }

    /// Everything an observer needs to mirror this state
    pub fn snapshot(&self, object_id: ObjectId, class_name: &str) -> ObjectSnapshot {
        ObjectSnapshot {
            object_id,
            class_name: class_name.to_string(),
            config: self.config.clone(),
            name: FieldState::of(&self.article_name),
            description: FieldState::of(&self.article_description),
        }
    }

    /// Examine sentence for this object, built from the current name and the
    /// initial description
    pub fn examine_text(&self, object: ObjectHandle<'_>, namer: &dyn FallbackNamer) -> String {
        examine_text(self.article_name(), self.initial_description(), || {
            namer.fallback_name(object)
        })
    }
}

impl Examinable for AttributeState {
    fn examine(&self, ctx: &ExamineContext<'_>) -> Option<String> {
        Some(self.examine_text(ctx.object, ctx.namer))
    }
}
