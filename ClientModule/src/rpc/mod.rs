//! # RPC Module
//!
//! Right-click actions. Objects contribute labelled actions to a collector;
//! invoking an action sends the matching request to the authority.

use attr_shared::constants::actions::EXAMINE;
use attr_shared::object::ObjectId;
use attr_shared::types::AttrResult;
use log::debug;

use crate::net::ExamineTransport;
use crate::object::ClientObject;

/// Something the player can do from the right-click menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientAction {
    /// Ask the authority for the object's examine text
    Examine(ObjectId),
}

impl ClientAction {
    pub fn invoke(&self, transport: &dyn ExamineTransport) -> AttrResult<()> {
        match *self {
            ClientAction::Examine(object_id) => {
                debug!("Invoking examine on {}", object_id);
                transport.send_examine(object_id)
            }
        }
    }
}

/// One labelled entry of the right-click menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RightClickElement {
    pub label: String,
    pub action: ClientAction,
}

/// Collector for the right-click menu of one object
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RightClickableResult {
    elements: Vec<RightClickElement>,
}

impl RightClickableResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_element(&mut self, label: impl Into<String>, action: ClientAction) -> &mut Self {
        self.elements.push(RightClickElement {
            label: label.into(),
            action,
        });
        self
    }

    pub fn elements(&self) -> &[RightClickElement] {
        &self.elements
    }

    /// Action registered under `label`
    pub fn find(&self, label: &str) -> Option<ClientAction> {
        self.elements
            .iter()
            .find(|element| element.label == label)
            .map(|element| element.action)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Capability: contributes entries to the right-click menu
pub trait RightClickable {
    fn generate_right_click_options(&self, result: &mut RightClickableResult);
}

impl RightClickable for ClientObject {
    fn generate_right_click_options(&self, result: &mut RightClickableResult) {
        result.add_element(EXAMINE, ClientAction::Examine(self.id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<ObjectId>>);

    impl ExamineTransport for Recorder {
        fn send_examine(&self, object_id: ObjectId) -> AttrResult<()> {
            self.0.borrow_mut().push(object_id);
            Ok(())
        }
    }

    #[test]
    fn test_collector_keeps_insertion_order() {
        let mut result = RightClickableResult::new();
        result
            .add_element("Examine", ClientAction::Examine(1))
            .add_element("Examine again", ClientAction::Examine(2));

        assert_eq!(result.len(), 2);
        assert_eq!(result.elements()[1].label, "Examine again");
        assert_eq!(result.find("Examine"), Some(ClientAction::Examine(1)));
        assert_eq!(result.find("Pick up"), None);
    }

    #[test]
    fn test_examine_action_sends_object_id() {
        let transport = Recorder::default();
        ClientAction::Examine(1004).invoke(&transport).unwrap();
        assert_eq!(*transport.0.borrow(), vec![1004]);
    }
}
