//! # RPC Dispatch
//!
//! Handles examine requests arriving from observers and routes the answer to
//! the requesting observer.

use attr_shared::constants::presentation::EXAMINE_SEPARATOR;
use attr_shared::object::ObjectId;
use attr_shared::replication::ReplicationMessage;
use attr_shared::rpc::{ExamineMessage, ExamineRequest};
use attr_shared::types::{AttrResult, ReplicationError};
use log::{debug, warn};

use super::ExamineContext;
use crate::AuthorityServer;

impl AuthorityServer {
    /// Compose the examine text of an object from all its handlers
    pub fn examine(&self, object_id: ObjectId) -> AttrResult<String> {
        let object = self
            .objects
            .get(object_id)
            .ok_or(ReplicationError::ObjectNotFound(object_id))?;
        let ctx = ExamineContext {
            object: object.handle(),
            namer: self.namer.as_ref(),
        };
        let lines: Vec<String> = object
            .examinables()
            .filter_map(|examinable| examinable.examine(&ctx))
            .collect();
        Ok(lines.join(EXAMINE_SEPARATOR))
    }

    /// Answer one examine request
    pub fn handle_examine_request(&mut self, request: ExamineRequest) -> AttrResult<()> {
        debug!(
            "Observer {} examines object {}",
            request.requester, request.object_id
        );
        let text = self.examine(request.object_id)?;
        self.channel.send_to(
            request.requester,
            ReplicationMessage::Examine(ExamineMessage {
                object_id: request.object_id,
                text,
            }),
        )
    }

    /// Drain and answer every queued examine request. Returns how many were
    /// answered.
    pub fn process_requests(&mut self) -> usize {
        let mut answered = 0;
        while let Ok(request) = self.requests_rx.try_recv() {
            match self.handle_examine_request(request) {
                Ok(()) => answered += 1,
                Err(err) => warn!(
                    "Dropping examine request for object {} from observer {}: {}",
                    request.object_id, request.requester, err
                ),
            }
        }
        answered
    }
}
