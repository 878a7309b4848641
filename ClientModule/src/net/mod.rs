//! # Network Module
//!
//! The observer's link to the authority: an ordered stream of replication
//! messages in, fire-and-forget examine requests out.

use attr_shared::connection::{ConnectionState, ObserverId};
use attr_shared::object::ObjectId;
use attr_shared::replication::ReplicationMessage;
use attr_shared::rpc::ExamineRequest;
use attr_shared::types::{AttrResult, ReplicationError};
use log::{debug, info};
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Carries examine requests to the authority
pub trait ExamineTransport {
    /// Ask the authority to examine an object. The answer arrives later as a
    /// replication message.
    fn send_examine(&self, object_id: ObjectId) -> AttrResult<()>;
}

/// Both directions of an observer's connection
#[derive(Debug)]
pub struct ServerLink {
    observer_id: ObserverId,
    updates: UnboundedReceiver<ReplicationMessage>,
    requests: UnboundedSender<ExamineRequest>,
    state: ConnectionState,
}

impl ServerLink {
    pub fn new(
        observer_id: ObserverId,
        updates: UnboundedReceiver<ReplicationMessage>,
        requests: UnboundedSender<ExamineRequest>,
    ) -> Self {
        info!("Observer {} linked to the authority", observer_id);
        Self {
            observer_id,
            updates,
            requests,
            state: ConnectionState::Connected,
        }
    }

    pub fn observer_id(&self) -> ObserverId {
        self.observer_id
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    /// Next queued message without waiting
    pub fn try_next(&mut self) -> Option<ReplicationMessage> {
        match self.updates.try_recv() {
            Ok(message) => Some(message),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.mark_disconnected();
                None
            }
        }
    }

    /// Wait for the next message. `None` once the authority closed the link.
    pub async fn next(&mut self) -> Option<ReplicationMessage> {
        let message = self.updates.recv().await;
        if message.is_none() {
            self.mark_disconnected();
        }
        message
    }

    fn mark_disconnected(&mut self) {
        if self.state == ConnectionState::Connected {
            info!("Observer {} lost its link to the authority", self.observer_id);
            self.state = ConnectionState::Disconnected;
        }
    }
}

impl ExamineTransport for ServerLink {
    fn send_examine(&self, object_id: ObjectId) -> AttrResult<()> {
        debug!("Observer {} requests examine of {}", self.observer_id, object_id);
        self.requests
            .send(ExamineRequest {
                object_id,
                requester: self.observer_id,
            })
            .map_err(|_| ReplicationError::ChannelClosed(format!("examine request for object {}", object_id)))
    }
}
