//! # Actor Spawning
//!
//! Spawning seeds an object's replicated fields from its configuration,
//! exactly once, through the same setters every later mutation uses. An
//! observer connected at spawn time therefore sees the object appear blank
//! and then receives the seed values as ordinary changes.

use attr_shared::lifecycle::ObjectLifecycleState;
use attr_shared::object::ObjectId;
use attr_shared::property::AttributeConfig;
use attr_shared::replication::FieldUpdate;
use attr_shared::types::{AttrResult, ReplicationError};
use log::{info, warn};

use crate::property::AttributeState;
use crate::AuthorityServer;

/// Spawn details handed to [`Spawnable`] components
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnInfo {
    pub object_id: ObjectId,
    pub class_name: String,
}

/// Capability: reacts to the authoritative spawn of its object
pub trait Spawnable {
    /// Runs once per object. Returns the commits to replicate.
    fn on_spawn_server(&mut self, info: &SpawnInfo) -> Vec<FieldUpdate>;
}

impl Spawnable for AttributeState {
    fn on_spawn_server(&mut self, _info: &SpawnInfo) -> Vec<FieldUpdate> {
        let name = self.initial_name().to_string();
        let description = self.initial_description().to_string();
        vec![
            self.set_article_name(name),
            self.set_article_description(description),
        ]
    }
}

impl AuthorityServer {
    /// Instantiate and spawn an object in one step
    pub fn spawn(&mut self, class_name: &str, config: AttributeConfig) -> ObjectId {
        let object_id = self.objects.create(class_name, config);
        // Freshly created, so it is present and still initializing
        if let Err(err) = self.spawn_object(object_id) {
            warn!("Spawning object {} failed: {}", object_id, err);
        }
        object_id
    }

    /// Spawn an object whose configuration is given as JSON
    pub fn spawn_from_json(&mut self, class_name: &str, config_json: &str) -> AttrResult<ObjectId> {
        let config = AttributeConfig::from_json(config_json)?;
        Ok(self.spawn(class_name, config))
    }

    /// Instantiate an object without spawning it. It stays invisible to
    /// observers until [`AuthorityServer::spawn_object`] is called.
    pub fn create_object(&mut self, class_name: &str, config: AttributeConfig) -> ObjectId {
        self.objects.create(class_name, config)
    }

    /// Spawn a created object: announce it, then seed its attributes.
    /// Spawning an already spawned object does nothing.
    pub fn spawn_object(&mut self, object_id: ObjectId) -> AttrResult<()> {
        let object = self
            .objects
            .get_mut(object_id)
            .ok_or(ReplicationError::ObjectNotFound(object_id))?;
        if object.state != ObjectLifecycleState::Initializing {
            warn!("Object {} is already spawned", object_id);
            return Ok(());
        }

        let announced = object.snapshot();
        let info = SpawnInfo {
            object_id,
            class_name: object.class_name.clone(),
        };
        let seeds = object.attributes.on_spawn_server(&info);
        object.state = ObjectLifecycleState::Active;
        info!("Spawned object {} ({})", object_id, info.class_name);

        self.channel.announce(&announced);
        for update in &seeds {
            self.channel.publish(object_id, update);
        }
        Ok(())
    }

    /// Destroy an object. Observers hear about it only if it was spawned.
    pub fn destroy(&mut self, object_id: ObjectId) -> AttrResult<()> {
        let mut object = self
            .objects
            .remove(object_id)
            .ok_or(ReplicationError::ObjectNotFound(object_id))?;
        let was_visible = object.is_active();
        object.state = ObjectLifecycleState::Destroyed;
        info!("Destroyed object {} ({})", object_id, object.class_name);
        if was_visible {
            self.channel.forget(object_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ServerSettings;
    use attr_shared::property::AttributeField;
    use attr_shared::replication::ReplicationMessage;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_spawn_seeds_from_configuration() {
        let mut state = AttributeState::new(AttributeConfig::new("spanner", "shiny"));
        let info = SpawnInfo {
            object_id: 1000,
            class_name: "Spanner".to_string(),
        };
        let seeds = state.on_spawn_server(&info);

        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].field, AttributeField::Name);
        assert_eq!(seeds[0].value, "spanner");
        assert_eq!(seeds[1].field, AttributeField::Description);
        assert_eq!(seeds[1].value, "shiny");
        assert_eq!(state.article_name(), "spanner");
    }

    #[test]
    fn test_spawn_goes_through_authority_hook() {
        let mut server = AuthorityServer::new(ServerSettings::default()).unwrap();
        let id = server.create_object("Spanner", AttributeConfig::new("spanner", ""));
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = calls.clone();
        server
            .object_mut(id)
            .unwrap()
            .attributes
            .set_hook(AttributeField::Name, move |old: &String, new: &String| {
                sink.lock().unwrap().push((old.clone(), new.clone()));
            });

        server.spawn_object(id).unwrap();
        server.spawn_object(id).unwrap();

        assert_eq!(
            *calls.lock().unwrap(),
            vec![(String::new(), "spanner".to_string())]
        );
        assert!(server.object(id).unwrap().is_active());
    }

    #[test]
    fn test_connected_observer_sees_spawn_as_change() {
        let mut server = AuthorityServer::new(ServerSettings::default()).unwrap();
        let mut link = server.client_connected();
        let id = server.spawn("Spanner", AttributeConfig::new("spanner", ""));

        let mut messages = Vec::new();
        while let Ok(message) = link.updates.try_recv() {
            messages.push(message);
        }
        assert_eq!(messages.len(), 3);
        assert!(matches!(&messages[0], ReplicationMessage::Spawn(s) if s.name.version == 0));
        assert!(matches!(
            &messages[1],
            ReplicationMessage::Field { object_id, update } if *object_id == id && update.value == "spanner"
        ));
    }

    #[test]
    fn test_spawn_from_json() {
        let mut server = AuthorityServer::new(ServerSettings::default()).unwrap();
        let id = server
            .spawn_from_json("Sheet", r#"{"initial_name": "metal sheet", "export_cost": 5}"#)
            .unwrap();
        assert_eq!(server.object(id).unwrap().attributes.article_name(), "metal sheet");
        assert!(server.spawn_from_json("Sheet", "[").is_err());
    }

    #[test]
    fn test_destroy_removes_and_notifies() {
        let mut server = AuthorityServer::new(ServerSettings::default()).unwrap();
        let id = server.spawn("Spanner", AttributeConfig::default());
        let mut link = server.client_connected();
        server.destroy(id).unwrap();

        let mut last = None;
        while let Ok(message) = link.updates.try_recv() {
            last = Some(message);
        }
        assert_eq!(last, Some(ReplicationMessage::Destroy(id)));
        assert!(server.object(id).is_none());
        assert!(matches!(server.destroy(id), Err(ReplicationError::ObjectNotFound(_))));
    }

    #[test]
    fn test_unspawned_objects_stay_invisible() {
        let mut server = AuthorityServer::new(ServerSettings::default()).unwrap();
        let mut link = server.client_connected();
        let id = server.create_object("Ghost", AttributeConfig::default());

        server.set_article_name(id, "secret").unwrap();
        server.set_article_description(id, "hidden").unwrap();
        assert_eq!(server.object(id).unwrap().attributes.article_name(), "secret");

        server.destroy(id).unwrap();
        assert!(link.updates.try_recv().is_err());
        assert!(server.object(id).is_none());
    }
}
