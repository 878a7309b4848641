//! # Connection Management
//!
//! Observers connecting to and disconnecting from the authority. A new
//! observer is handed the two ends of its link and immediately receives a
//! snapshot of every spawned object.

use attr_shared::connection::ObserverId;
use attr_shared::replication::ReplicationMessage;
use attr_shared::rpc::ExamineRequest;
use attr_shared::types::{AttrResult, ReplicationError};
use log::info;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::AuthorityServer;

/// The observer's ends of its link to the authority
#[derive(Debug)]
pub struct ObserverLink {
    /// Id the authority assigned to this observer
    pub observer_id: ObserverId,

    /// Replication traffic, in commit order
    pub updates: UnboundedReceiver<ReplicationMessage>,

    /// Where examine requests go
    pub requests: UnboundedSender<ExamineRequest>,
}

impl AuthorityServer {
    /// Register a new observer and replay the current world to it
    pub fn client_connected(&mut self) -> ObserverLink {
        let observer_id = self.next_observer_id;
        self.next_observer_id += 1;

        let (sender, updates) = unbounded_channel();
        let live: Vec<_> = self
            .objects
            .iter()
            .filter(|object| object.is_active())
            .map(|object| object.snapshot())
            .collect();
        info!("Observer {} connected", observer_id);
        self.channel.subscribe(observer_id, sender, live);

        ObserverLink {
            observer_id,
            updates,
            requests: self.requests_tx.clone(),
        }
    }

    /// Forget an observer. Its receiver sees the link close.
    pub fn client_disconnected(&mut self, observer_id: ObserverId) -> AttrResult<()> {
        if self.channel.unsubscribe(observer_id) {
            info!("Observer {} disconnected", observer_id);
            Ok(())
        } else {
            Err(ReplicationError::ObserverNotFound(observer_id))
        }
    }

    pub fn observer_count(&self) -> usize {
        self.channel.subscriber_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ServerSettings;
    use attr_shared::property::AttributeConfig;

    #[test]
    fn test_observer_ids_are_distinct() {
        let mut server = AuthorityServer::new(ServerSettings::default()).unwrap();
        let a = server.client_connected();
        let b = server.client_connected();
        assert_ne!(a.observer_id, b.observer_id);
        assert_eq!(server.observer_count(), 2);
    }

    #[test]
    fn test_late_joiner_gets_current_values_only() {
        let mut server = AuthorityServer::new(ServerSettings::default()).unwrap();
        let id = server.spawn("Spanner", AttributeConfig::new("spanner", ""));
        server.set_article_name(id, "wrench").unwrap();
        // Created but never spawned: not replayed
        server.create_object("Ghost", AttributeConfig::default());

        let mut link = server.client_connected();
        match link.updates.try_recv().unwrap() {
            ReplicationMessage::Spawn(snapshot) => {
                assert_eq!(snapshot.object_id, id);
                assert_eq!(snapshot.name.value, "wrench");
                assert_eq!(snapshot.name.version, 2);
            }
            other => panic!("unexpected message {:?}", other),
        }
        assert!(link.updates.try_recv().is_err());
    }

    #[test]
    fn test_disconnect_closes_the_link() {
        let mut server = AuthorityServer::new(ServerSettings::default()).unwrap();
        let mut link = server.client_connected();
        server.client_disconnected(link.observer_id).unwrap();

        assert!(link.updates.blocking_recv().is_none());
        assert!(matches!(
            server.client_disconnected(link.observer_id),
            Err(ReplicationError::ObserverNotFound(_))
        ));
    }
}
