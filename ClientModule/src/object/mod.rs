//! # Client-side Object System
//!
//! Read-only mirrors of authoritative objects. A mirror is built from the
//! snapshot the authority sends when the object becomes visible and is only
//! ever changed by replicated commits, each of which runs the field hooks
//! with the mirror's own previous value.

use attr_shared::field::ReplicatedField;
use attr_shared::lifecycle::ObjectLifecycleState;
use attr_shared::naming::FallbackNamer;
use attr_shared::object::{ObjectHandle, ObjectId};
use attr_shared::presentation::{examine_text, tooltip_text};
use attr_shared::property::{AttributeConfig, AttributeField};
use attr_shared::replication::{FieldUpdate, ObjectSnapshot};
use log::trace;
use once_cell::unsync::OnceCell;
use std::sync::Arc;

/// Client-wide hook, called as `(object, field, previous, new)` for every
/// value a mirrored field takes, including connect-time replays
pub type FieldObserver = Arc<dyn Fn(ObjectId, AttributeField, &str, &str) + Send + Sync + 'static>;

/// Mirror of one authoritative object
#[derive(Debug)]
pub struct ClientObject {
    /// Network identity
    pub id: ObjectId,

    /// Class name, input to the fallback namer
    pub class_name: String,

    /// Current lifecycle state
    pub state: ObjectLifecycleState,

    config: AttributeConfig,
    article_name: ReplicatedField<String>,
    article_description: ReplicatedField<String>,

    /// Generated once, on first use
    fallback_name: OnceCell<String>,
}

impl ClientObject {
    /// Build a mirror from a snapshot. No hook runs here.
    pub fn from_snapshot(snapshot: ObjectSnapshot) -> Self {
        Self {
            id: snapshot.object_id,
            class_name: snapshot.class_name,
            state: ObjectLifecycleState::Active,
            config: snapshot.config,
            article_name: ReplicatedField::from_snapshot(snapshot.name.version, snapshot.name.value),
            article_description: ReplicatedField::from_snapshot(
                snapshot.description.version,
                snapshot.description.value,
            ),
            fallback_name: OnceCell::new(),
        }
    }

    pub fn handle(&self) -> ObjectHandle<'_> {
        ObjectHandle::new(self.id, &self.class_name)
    }

    pub fn config(&self) -> &AttributeConfig {
        &self.config
    }

    pub fn article_name(&self) -> &str {
        self.article_name.get()
    }

    pub fn article_description(&self) -> &str {
        self.article_description.get()
    }

    pub fn will_highlight(&self) -> bool {
        self.config.will_highlight
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

    /// Route both fields' hooks to `observer`
    pub fn install_observer(&mut self, observer: &FieldObserver) {
        for field in AttributeField::ALL {
            let id = self.id;
            let observer = Arc::clone(observer);
            self.field_mut(field)
                .set_hook(move |old: &String, new: &String| {
                    observer(id, field, old.as_str(), new.as_str())
                });
        }
    }

    /// Run both hooks with the current values, as on (re)connection
    pub fn replay(&mut self) {
        for field in AttributeField::ALL {
            self.field_mut(field).on_observer_connect();
        }
    }

    /// Apply a replicated commit. Returns `false` for stale or duplicate
    /// versions.
    pub fn apply(&mut self, update: FieldUpdate) -> bool {
        let id = self.id;
        let replicated = self.field_mut(update.field);
        let applied = replicated.apply(update.version, update.value);
        if !applied {
            trace!(
                "Dropped stale {:?} v{} for object {} (have v{})",
                update.field,
                update.version,
                id,
                replicated.version()
            );
        }
        applied
    }

    /// Catch up with a newer snapshot of an object already mirrored
    pub fn apply_snapshot(&mut self, snapshot: ObjectSnapshot) {
        self.apply(FieldUpdate {
            field: AttributeField::Name,
            version: snapshot.name.version,
            value: snapshot.name.value,
        });
        self.apply(FieldUpdate {
            field: AttributeField::Description,
            version: snapshot.description.version,
            value: snapshot.description.value,
        });
    }

    /// Generated display name, computed at most once per mirror
    pub fn fallback_name(&self, namer: &dyn FallbackNamer) -> &str {
        self.fallback_name
            .get_or_init(|| namer.fallback_name(self.handle()))
    }

    pub fn tooltip_text(&self, namer: &dyn FallbackNamer) -> String {
        tooltip_text(self.article_name(), self.article_description(), || {
            self.fallback_name(namer).to_string()
        })
    }

    /// Local rendering of the examine sentence, same policy as the authority
    pub fn examine_text(&self, namer: &dyn FallbackNamer) -> String {
        examine_text(self.article_name(), &self.config.initial_description, || {
            self.fallback_name(namer).to_string()
        })
    }
}
