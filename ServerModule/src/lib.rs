//! # Attribute Server Module
//!
//! The authoritative side of replicated item attributes. The server owns
//! every object's name and description, is the only place they are ever
//! written, and pushes each commit to the connected observers.
//!
//! The system is organized into several sub-modules:
//! - `object`: Object arena and the per-object components
//! - `property`: Attribute state and its replication channel
//! - `actor`: Spawn lifecycle and destruction
//! - `connection`: Observer connect / disconnect
//! - `rpc`: Examine capability and request dispatch
//! - `settings`: Server tunables

use attr_shared::connection::ObserverId;
use attr_shared::naming::{FallbackNamer, PrefabNamer};
use attr_shared::object::ObjectId;
use attr_shared::property::AttributeField;
use attr_shared::rpc::ExamineRequest;
use attr_shared::types::{AttrResult, ReplicationError};
use log::{debug, info};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

// Module declarations
pub mod object;      // Object arena
pub mod property;    // Attribute state and replication
pub mod actor;       // Spawn lifecycle
pub mod connection;  // Observer connections
pub mod rpc;         // Examine requests
pub mod settings;    // Server tunables

// Re-export commonly used items
pub use object::{ObjectRegistry, ServerObject, Stackable};
pub use property::{AttributeState, ReplicationChannel};
pub use actor::{SpawnInfo, Spawnable};
pub use connection::ObserverLink;
pub use rpc::{Examinable, ExamineContext, ExamineHandler};
pub use settings::ServerSettings;

/// The authority: owns all objects and replicates their attributes
pub struct AuthorityServer {
    settings: ServerSettings,
    objects: ObjectRegistry,
    channel: ReplicationChannel,
    namer: Box<dyn FallbackNamer + Send>,
    requests_tx: UnboundedSender<ExamineRequest>,
    requests_rx: UnboundedReceiver<ExamineRequest>,
    next_observer_id: ObserverId,
}

impl AuthorityServer {
    /// Create an empty world using the prefab namer for unnamed objects.
    /// Fails when the settings would hand out reserved ids.
    pub fn new(settings: ServerSettings) -> AttrResult<Self> {
        settings.validate()?;
        let (requests_tx, requests_rx) = unbounded_channel();
        info!(
            "Attribute server initialized, object ids start at {}",
            settings.first_object_id
        );
        Ok(Self {
            objects: ObjectRegistry::new(settings.first_object_id),
            settings,
            channel: ReplicationChannel::new(),
            namer: Box::new(PrefabNamer),
            requests_tx,
            requests_rx,
            next_observer_id: 1,
        })
    }

    /// Replace the fallback namer used for examine text
    pub fn with_namer(mut self, namer: impl FallbackNamer + Send + 'static) -> Self {
        self.namer = Box::new(namer);
        self
    }

    pub fn settings(&self) -> &ServerSettings {
        &self.settings
    }

    pub fn object(&self, object_id: ObjectId) -> Option<&ServerObject> {
        self.objects.get(object_id)
    }

    pub fn object_mut(&mut self, object_id: ObjectId) -> Option<&mut ServerObject> {
        self.objects.get_mut(object_id)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    fn object_or_err(&mut self, object_id: ObjectId) -> AttrResult<&mut ServerObject> {
        self.objects
            .get_mut(object_id)
            .ok_or(ReplicationError::ObjectNotFound(object_id))
    }

    /// Commit a field and replicate it. Objects that were created but not
    /// spawned commit locally only.
    fn commit(&mut self, object_id: ObjectId, field: AttributeField, value: String) -> AttrResult<()> {
        let object = self.object_or_err(object_id)?;
        let update = object.attributes.set_field(field, value);
        if object.is_active() {
            self.channel.publish(object_id, &update);
        }
        Ok(())
    }

    /// Set the current name of an object and replicate it
    pub fn set_article_name(&mut self, object_id: ObjectId, name: impl Into<String>) -> AttrResult<()> {
        self.commit(object_id, AttributeField::Name, name.into())
    }

    /// Set the current description of an object and replicate it
    pub fn set_article_description(
        &mut self,
        object_id: ObjectId,
        description: impl Into<String>,
    ) -> AttrResult<()> {
        self.commit(object_id, AttributeField::Description, description.into())
    }

    /// Turn an object into a stack of `amount` items, or back into a
    /// single item with `None`
    pub fn set_stack_amount(&mut self, object_id: ObjectId, amount: Option<i32>) -> AttrResult<()> {
        let object = self.object_or_err(object_id)?;
        object.stack = amount.map(|amount| Stackable { amount });
        debug!("Object {} stack is now {:?}", object_id, object.stack);
        Ok(())
    }

    /// Export cost of an object, stack included
    pub fn export_cost(&self, object_id: ObjectId) -> AttrResult<i32> {
        self.objects
            .get(object_id)
            .map(ServerObject::export_cost)
            .ok_or(ReplicationError::ObjectNotFound(object_id))
    }

    /// Attach a further examine handler to an object
    pub fn add_examine_handler(&mut self, object_id: ObjectId, handler: ExamineHandler) -> AttrResult<()> {
        self.object_or_err(object_id)?.add_examine_handler(handler);
        Ok(())
    }
}
