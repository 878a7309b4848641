//! # Property Replication
//!
//! Pushes committed attribute values to every connected observer. For each
//! subscriber the channel remembers the last version it sent per field, so
//! a commit goes out at most once and never behind a newer one. A new
//! subscriber first receives a snapshot of every live object, which its
//! mirror replays through the field hooks.

use std::collections::{BTreeMap, HashMap};

use attr_shared::connection::ObserverId;
use attr_shared::field::FieldVersion;
use attr_shared::object::ObjectId;
use attr_shared::property::AttributeField;
use attr_shared::replication::{FieldUpdate, ObjectSnapshot, ReplicationMessage};
use attr_shared::types::{AttrResult, ReplicationError};
use log::{debug, info, trace, warn};
use tokio::sync::mpsc::UnboundedSender;

/// Per-observer delivery state
#[derive(Debug)]
struct Subscriber {
    sender: UnboundedSender<ReplicationMessage>,

    /// Last version pushed for each (object, field)
    sent: HashMap<(ObjectId, AttributeField), FieldVersion>,
}

impl Subscriber {
    fn new(sender: UnboundedSender<ReplicationMessage>) -> Self {
        Self {
            sender,
            sent: HashMap::new(),
        }
    }

    fn deliver(&self, message: ReplicationMessage) -> bool {
        self.sender.send(message).is_ok()
    }

    fn push_snapshot(&mut self, snapshot: &ObjectSnapshot) -> bool {
        for field in AttributeField::ALL {
            self.sent
                .insert((snapshot.object_id, field), snapshot.field(field).version);
        }
        self.deliver(ReplicationMessage::Spawn(snapshot.clone()))
    }

    fn push_update(&mut self, object_id: ObjectId, update: &FieldUpdate) -> bool {
        let last = self.sent.entry((object_id, update.field)).or_insert(0);
        if update.version <= *last {
            trace!(
                "Skipping {:?} v{} of object {}, already sent v{}",
                update.field, update.version, object_id, last
            );
            return true;
        }
        *last = update.version;
        self.deliver(ReplicationMessage::Field {
            object_id,
            update: update.clone(),
        })
    }

    fn forget(&mut self, object_id: ObjectId) {
        for field in AttributeField::ALL {
            self.sent.remove(&(object_id, field));
        }
    }
}

/// Fan-out of committed attribute values to subscribed observers
#[derive(Debug, Default)]
pub struct ReplicationChannel {
    subscribers: BTreeMap<ObserverId, Subscriber>,
}

impl ReplicationChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of subscribed observers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_subscribed(&self, observer: ObserverId) -> bool {
        self.subscribers.contains_key(&observer)
    }

    /// Subscribe an observer and replay the current state of `live` objects
    pub fn subscribe(
        &mut self,
        observer: ObserverId,
        sender: UnboundedSender<ReplicationMessage>,
        live: impl IntoIterator<Item = ObjectSnapshot>,
    ) {
        let mut subscriber = Subscriber::new(sender);
        let mut replayed = 0;
        for snapshot in live {
            if !subscriber.push_snapshot(&snapshot) {
                warn!("Observer {} closed its link during replay", observer);
                return;
            }
            replayed += 1;
        }
        info!("Observer {} subscribed, replayed {} objects", observer, replayed);
        self.subscribers.insert(observer, subscriber);
    }

    /// Remove an observer. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, observer: ObserverId) -> bool {
        self.subscribers.remove(&observer).is_some()
    }

    /// Announce a newly spawned object to every subscriber
    pub fn announce(&mut self, snapshot: &ObjectSnapshot) {
        debug!("Announcing object {} ({})", snapshot.object_id, snapshot.class_name);
        self.retain_live(|subscriber| subscriber.push_snapshot(snapshot));
    }

    /// Forward a field commit to every subscriber that has not seen it
    pub fn publish(&mut self, object_id: ObjectId, update: &FieldUpdate) {
        self.retain_live(|subscriber| subscriber.push_update(object_id, update));
    }

    /// Tell every subscriber the object is gone and drop its bookkeeping
    pub fn forget(&mut self, object_id: ObjectId) {
        self.retain_live(|subscriber| {
            subscriber.forget(object_id);
            subscriber.deliver(ReplicationMessage::Destroy(object_id))
        });
    }

    /// Send a message to a single observer
    pub fn send_to(&mut self, observer: ObserverId, message: ReplicationMessage) -> AttrResult<()> {
        let subscriber = self
            .subscribers
            .get(&observer)
            .ok_or(ReplicationError::ObserverNotFound(observer))?;
        if subscriber.deliver(message) {
            Ok(())
        } else {
            self.subscribers.remove(&observer);
            Err(ReplicationError::ChannelClosed(format!("observer {}", observer)))
        }
    }

    /// Run `push` for every subscriber, dropping those whose link is closed
    fn retain_live(&mut self, mut push: impl FnMut(&mut Subscriber) -> bool) {
        self.subscribers.retain(|observer, subscriber| {
            let alive = push(subscriber);
            if !alive {
                warn!("Dropping observer {}: link closed", observer);
            }
            alive
        });
    }
}
