//! Dispatch effect: builds the payload and hands it to the messenger.
//!
//! Sending runs on a detached task. Its outcome is logged and nothing else;
//! the caller has already stamped the room and moves on.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::domains::notifications::actions::build_payload;
use crate::domains::notifications::commands::NotificationCommand;
use crate::domains::notifications::errors::NotificationError;
use crate::domains::rooms::Room;
use crate::kernel::BaseMessenger;

#[derive(Clone)]
pub struct Dispatcher {
    messenger: Arc<dyn BaseMessenger>,
}

impl Dispatcher {
    pub fn new(messenger: Arc<dyn BaseMessenger>) -> Self {
        Self { messenger }
    }

    /// Send the announcement for `command`. The returned handle resolves once
    /// the send attempt has finished, successful or not.
    pub fn dispatch(&self, command: NotificationCommand, room: &Room) -> JoinHandle<()> {
        let blocks = build_payload(&command, room);
        let messenger = Arc::clone(&self.messenger);

        tokio::spawn(async move {
            let room_id = command.room_id();
            let channel_id = command.channel_id();

            match messenger.send(channel_id, &blocks).await {
                Ok(receipt) => {
                    info!(
                        room_id = %room_id,
                        channel = %receipt.channel_id,
                        ts = %receipt.id,
                        "Room notification sent"
                    );
                }
                Err(source) => {
                    let err = NotificationError::SendFailure {
                        room_id: room_id.clone(),
                        channel_id: channel_id.to_string(),
                        source,
                    };
                    error!(room_id = %room_id, error = %err, "Room notification not delivered");
                }
            }
        })
    }
}
