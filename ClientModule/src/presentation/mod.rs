//! # Presentation Layer
//!
//! The observer's UI surface for hovering: one tooltip slot and one
//! highlight overlay, both owned by whichever object holds hover focus.
//! Focus is taken through a [`HoverGuard`], which releases everything when
//! dropped unless the hover is made persistent.

use attr_shared::object::ObjectId;
use log::trace;

/// Tooltip slot and highlight overlay
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UiContext {
    focus: Option<ObjectId>,
    tooltip: Option<String>,
    highlighted: Option<ObjectId>,
}

impl UiContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Object holding hover focus
    pub fn focus(&self) -> Option<ObjectId> {
        self.focus
    }

    /// Text currently in the tooltip slot
    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Object currently highlighted
    pub fn highlighted(&self) -> Option<ObjectId> {
        self.highlighted
    }

    pub fn set_tooltip(&mut self, text: impl Into<String>) {
        self.tooltip = Some(text.into());
    }

    pub fn clear_tooltip(&mut self) {
        self.tooltip = None;
    }

    pub fn activate_highlight(&mut self, object_id: ObjectId) {
        self.highlighted = Some(object_id);
    }

    pub fn clear_highlight(&mut self) {
        self.highlighted = None;
    }

    /// Release focus, tooltip and highlight
    pub fn clear(&mut self) {
        if let Some(object_id) = self.focus.take() {
            trace!("Hover focus released by {}", object_id);
        }
        self.clear_tooltip();
        self.clear_highlight();
    }
}

/// Scoped hover focus. Dropping the guard clears the UI context.
pub struct HoverGuard<'a> {
    ui: &'a mut UiContext,
    armed: bool,
}

impl<'a> HoverGuard<'a> {
    /// Take hover focus for `object_id`, dropping whatever was shown before
    pub fn acquire(ui: &'a mut UiContext, object_id: ObjectId) -> Self {
        ui.clear();
        ui.focus = Some(object_id);
        Self { ui, armed: true }
    }

    /// Publish the tooltip, and the highlight when the object wants one
    pub fn show(&mut self, text: String, highlight: bool) {
        if highlight {
            if let Some(object_id) = self.ui.focus {
                self.ui.activate_highlight(object_id);
            }
        }
        self.ui.set_tooltip(text);
    }

    pub fn ui(&self) -> &UiContext {
        self.ui
    }

    /// Keep the hover after the guard goes away; a later hover end clears it
    pub fn persist(mut self) {
        self.armed = false;
    }
}

impl Drop for HoverGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.ui.clear();
        }
    }
}
