//! # Attribute Client Module
//!
//! The observer side of replicated item attributes. An observer mirrors
//! every object the authority makes visible, runs field hooks for each value
//! it receives, and renders the hover tooltip and right-click menu from its
//! mirrors. It never writes a replicated value itself.
//!
//! The system is organized into several sub-modules:
//! - `object`: Mirrored objects and their field hooks
//! - `net`: The link to the authority
//! - `presentation`: Tooltip slot, highlight overlay and hover focus
//! - `rpc`: Right-click actions

use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use attr_shared::connection::{ConnectionState, ObserverId};
use attr_shared::constants::client::MAX_EXAMINE_LOG_ENTRIES;
use attr_shared::naming::{FallbackNamer, PrefabNamer};
use attr_shared::object::ObjectId;
use attr_shared::property::AttributeField;
use attr_shared::replication::ReplicationMessage;
use attr_shared::rpc::ExamineMessage;
use attr_shared::types::{AttrResult, ReplicationError};
use log::{debug, info, warn};

// Module declarations
pub mod object;        // Mirrored objects
pub mod net;           // Link to the authority
pub mod presentation;  // Hover UI
pub mod rpc;           // Right-click actions

// Re-export commonly used items
pub use object::{ClientObject, FieldObserver};
pub use net::{ExamineTransport, ServerLink};
pub use presentation::{HoverGuard, UiContext};
pub use rpc::{ClientAction, RightClickElement, RightClickable, RightClickableResult};

/// One observer: its link, its mirrors and its UI surface
pub struct ObserverClient {
    link: ServerLink,
    objects: HashMap<ObjectId, ClientObject>,
    ui: UiContext,
    namer: Box<dyn FallbackNamer + Send>,
    field_observer: Option<FieldObserver>,
    examine_log: VecDeque<ExamineMessage>,
}

impl ObserverClient {
    pub fn new(link: ServerLink) -> Self {
        Self {
            link,
            objects: HashMap::new(),
            ui: UiContext::new(),
            namer: Box::new(PrefabNamer),
            field_observer: None,
            examine_log: VecDeque::new(),
        }
    }

    /// Replace the fallback namer used for tooltips
    pub fn with_namer(mut self, namer: impl FallbackNamer + Send + 'static) -> Self {
        self.namer = Box::new(namer);
        self
    }

    /// Install the hook every mirrored field reports to, on objects already
    /// mirrored and on those that arrive later
    pub fn set_field_observer(
        &mut self,
        observer: impl Fn(ObjectId, AttributeField, &str, &str) + Send + Sync + 'static,
    ) {
        let observer: FieldObserver = Arc::new(observer);
        for object in self.objects.values_mut() {
            object.install_observer(&observer);
        }
        self.field_observer = Some(observer);
    }

    pub fn observer_id(&self) -> ObserverId {
        self.link.observer_id()
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.link.state()
    }

    pub fn object(&self, object_id: ObjectId) -> Option<&ClientObject> {
        self.objects.get(&object_id)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn ui(&self) -> &UiContext {
        &self.ui
    }

    /// Most recent examine answers, oldest first
    pub fn examine_log(&self) -> &VecDeque<ExamineMessage> {
        &self.examine_log
    }

    /// Apply every message already queued on the link. Returns how many were
    /// applied.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Some(message) = self.link.try_next() {
            self.apply_message(message);
            applied += 1;
        }
        applied
    }

    /// Wait for the next message and apply it. Returns `false` once the
    /// authority has closed the link.
    pub async fn recv(&mut self) -> bool {
        match self.link.next().await {
            Some(message) => {
                self.apply_message(message);
                true
            }
            None => false,
        }
    }

    /// Apply one message from the authority
    pub fn apply_message(&mut self, message: ReplicationMessage) {
        match message {
            ReplicationMessage::Spawn(snapshot) => {
                let object_id = snapshot.object_id;
                let object = match self.objects.entry(object_id) {
                    // Announced again: catch up through the hooks, then replay
                    Entry::Occupied(entry) => {
                        let object = entry.into_mut();
                        object.apply_snapshot(snapshot);
                        object
                    }
                    Entry::Vacant(entry) => {
                        info!("Mirroring object {} ({})", object_id, snapshot.class_name);
                        let mut object = ClientObject::from_snapshot(snapshot);
                        if let Some(observer) = &self.field_observer {
                            object.install_observer(observer);
                        }
                        entry.insert(object)
                    }
                };
                object.replay();
            }
            ReplicationMessage::Field { object_id, update } => match self.objects.get_mut(&object_id) {
                Some(object) => {
                    if object.apply(update) {
                        debug!("Object {} updated", object_id);
                    }
                }
                None => warn!("Update for unknown object {}", object_id),
            },
            ReplicationMessage::Examine(message) => {
                info!("Examine {}: {}", message.object_id, message.text);
                self.examine_log.push_back(message);
                while self.examine_log.len() > MAX_EXAMINE_LOG_ENTRIES {
                    self.examine_log.pop_front();
                }
            }
            ReplicationMessage::Destroy(object_id) => {
                if self.objects.remove(&object_id).is_none() {
                    warn!("Destroy for unknown object {}", object_id);
                }
                if self.ui.focus() == Some(object_id) {
                    self.ui.clear();
                }
            }
        }
    }

    fn mirror(&self, object_id: ObjectId) -> AttrResult<&ClientObject> {
        self.objects
            .get(&object_id)
            .ok_or(ReplicationError::ObjectNotFound(object_id))
    }

    /// Tooltip text of a mirrored object
    pub fn tooltip_text(&self, object_id: ObjectId) -> AttrResult<String> {
        Ok(self.mirror(object_id)?.tooltip_text(self.namer.as_ref()))
    }

    /// Give hover focus to an object: highlight it if it wants to be, and
    /// show its tooltip. Stays until [`ObserverClient::hover_end`].
    pub fn hover_start(&mut self, object_id: ObjectId) -> AttrResult<()> {
        let mut guard = HoverGuard::acquire(&mut self.ui, object_id);
        let object = self
            .objects
            .get(&object_id)
            .ok_or(ReplicationError::ObjectNotFound(object_id))?;
        guard.show(object.tooltip_text(self.namer.as_ref()), object.will_highlight());
        guard.persist();
        Ok(())
    }

    /// Drop hover focus. Always clears tooltip and highlight.
    pub fn hover_end(&mut self) {
        self.ui.clear();
    }

    /// Hover an object for the duration of `f`
    pub fn with_hover<R>(&mut self, object_id: ObjectId, f: impl FnOnce(&UiContext) -> R) -> AttrResult<R> {
        let mut guard = HoverGuard::acquire(&mut self.ui, object_id);
        let object = self
            .objects
            .get(&object_id)
            .ok_or(ReplicationError::ObjectNotFound(object_id))?;
        guard.show(object.tooltip_text(self.namer.as_ref()), object.will_highlight());
        Ok(f(guard.ui()))
    }

    /// Collect the right-click menu of a mirrored object
    pub fn right_click_options(&self, object_id: ObjectId) -> AttrResult<RightClickableResult> {
        let mut result = RightClickableResult::new();
        self.mirror(object_id)?.generate_right_click_options(&mut result);
        Ok(result)
    }

    /// Run a right-click action against the authority
    pub fn invoke_action(&self, action: &ClientAction) -> AttrResult<()> {
        action.invoke(&self.link)
    }
}
