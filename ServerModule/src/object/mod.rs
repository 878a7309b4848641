//! # Object Module
//!
//! Authoritative objects and the arena that owns them. Objects live in slots
//! of a vector; a map from network id to slot index serves lookups, and
//! freed slots are reused. Network ids themselves are never reused.

use std::collections::HashMap;

use attr_shared::lifecycle::ObjectLifecycleState;
use attr_shared::object::{ObjectHandle, ObjectId};
use attr_shared::property::{AttributeConfig, StackQuantity};
use attr_shared::replication::ObjectSnapshot;

use crate::property::AttributeState;
use crate::rpc::{Examinable, ExamineHandler};

/// Stack-quantity component: one object standing for `amount` items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stackable {
    pub amount: i32,
}

impl StackQuantity for Stackable {
    fn amount(&self) -> i32 {
        self.amount
    }
}

/// An object owned by the authority
pub struct ServerObject {
    /// Network identity
    pub id: ObjectId,

    /// Class (prefab) name the object was instantiated from
    pub class_name: String,

    /// Current lifecycle state
    pub state: ObjectLifecycleState,

    /// Name, description and export configuration
    pub attributes: AttributeState,

    /// Optional stack component
    pub stack: Option<Stackable>,

    /// Further examine handlers, consulted after the attributes
    examine_handlers: Vec<ExamineHandler>,
}

impl ServerObject {
    pub fn new(id: ObjectId, class_name: impl Into<String>, config: AttributeConfig) -> Self {
        Self {
            id,
            class_name: class_name.into(),
            state: ObjectLifecycleState::Initializing,
            attributes: AttributeState::new(config),
            stack: None,
            examine_handlers: Vec::new(),
        }
    }

    pub fn handle(&self) -> ObjectHandle<'_> {
        ObjectHandle::new(self.id, &self.class_name)
    }

    pub fn is_active(&self) -> bool {
        self.state == ObjectLifecycleState::Active
    }

    /// Export cost of the whole object, stack included
    pub fn export_cost(&self) -> i32 {
        self.attributes
            .export_cost(self.stack.as_ref().map(|stack| stack as &dyn StackQuantity))
    }

    pub fn snapshot(&self) -> ObjectSnapshot {
        self.attributes.snapshot(self.id, &self.class_name)
    }

    pub fn add_examine_handler(&mut self, handler: ExamineHandler) {
        self.examine_handlers.push(handler);
    }

    /// Every examine capability of the object, attributes first
    pub fn examinables(&self) -> impl Iterator<Item = &dyn Examinable> + '_ {
        std::iter::once(&self.attributes as &dyn Examinable).chain(
            self.examine_handlers
                .iter()
                .map(|handler| handler.as_ref() as &dyn Examinable),
        )
    }
}

/// Arena of authoritative objects indexed by network id
pub struct ObjectRegistry {
    slots: Vec<Option<ServerObject>>,
    index: HashMap<ObjectId, usize>,
    free: Vec<usize>,
    next_id: ObjectId,
}

impl ObjectRegistry {
    /// Create an empty registry handing out ids from `first_id`
    pub fn new(first_id: ObjectId) -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
            free: Vec::new(),
            next_id: first_id,
        }
    }

    /// Instantiate an object and return its id
    pub fn create(&mut self, class_name: &str, config: AttributeConfig) -> ObjectId {
        let id = self.next_id;
        self.next_id += 1;

        let object = ServerObject::new(id, class_name, config);
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(object);
                slot
            }
            None => {
                self.slots.push(Some(object));
                self.slots.len() - 1
            }
        };
        self.index.insert(id, slot);
        id
    }

    pub fn get(&self, id: ObjectId) -> Option<&ServerObject> {
        let slot = *self.index.get(&id)?;
        self.slots[slot].as_ref()
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut ServerObject> {
        let slot = *self.index.get(&id)?;
        self.slots[slot].as_mut()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.index.contains_key(&id)
    }

    /// Remove an object, freeing its slot
    pub fn remove(&mut self, id: ObjectId) -> Option<ServerObject> {
        let slot = self.index.remove(&id)?;
        self.free.push(slot);
        self.slots[slot].take()
    }

    /// Live objects in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &ServerObject> + '_ {
        let mut ids: Vec<_> = self.index.iter().collect();
        ids.sort_unstable();
        ids.into_iter()
            .filter_map(move |(_, &slot)| self.slots[slot].as_ref())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
