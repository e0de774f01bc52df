//! Per-user message queues in front of the handler chain.
//!
//! Each user gets one worker task fed by an unbounded channel, so messages from the same user
//! reach the chain one at a time in the order they were dispatched. Different users run
//! concurrently. A worker with nothing to do for `idle_timeout` retires and drops its queue.

use chatgate_core::Message;
use handler_chain::HandlerChain;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc::{self, error::SendError, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info};

const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

pub struct UserQueues {
    chain: HandlerChain,
    idle_timeout: Duration,
    senders: Mutex<HashMap<i64, UnboundedSender<Message>>>,
}

impl UserQueues {
    pub fn new(chain: HandlerChain) -> Self {
        Self {
            chain,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            senders: Mutex::new(HashMap::new()),
        }
    }

    /// How long a worker waits for the next message before retiring.
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Number of users with a live worker.
    pub fn active_users(&self) -> usize {
        self.lock_senders().len()
    }

    /// Enqueues `message` behind earlier messages from the same user. Never waits, so the
    /// caller's arrival order is the processing order. Must be called inside a tokio runtime.
    pub fn dispatch(self: &Arc<Self>, message: Message) {
        let user_id = message.user.id;
        let mut senders = self.lock_senders();

        let message = match senders.get(&user_id) {
            Some(tx) => match tx.send(message) {
                Ok(()) => return,
                // Worker died without retiring (handler panic); start a fresh one.
                Err(SendError(message)) => message,
            },
            None => message,
        };

        let (tx, rx) = mpsc::unbounded_channel();
        if tx.send(message).is_err() {
            return;
        }
        senders.insert(user_id, tx);
        drop(senders);

        debug!(user_id, "step: user queue worker started");
        tokio::spawn(Arc::clone(self).drain(user_id, rx));
    }

    async fn drain(self: Arc<Self>, user_id: i64, mut rx: UnboundedReceiver<Message>) {
        loop {
            let message = match tokio::time::timeout(self.idle_timeout, rx.recv()).await {
                Ok(Some(message)) => message,
                Ok(None) => break,
                Err(_) => match self.retire(user_id, &mut rx) {
                    Some(message) => message,
                    None => break,
                },
            };

            info!(
                user_id,
                chat_id = message.chat.id,
                message_id = %message.id,
                "step: processing message (handler chain started)"
            );
            if let Err(e) = self.chain.handle(&message).await {
                error!(error = %e, user_id, "Handler chain failed");
            }
        }
        debug!(user_id, "step: user queue worker stopped");
    }

    /// Removes the user's queue unless a message slipped in. Sends happen under the same lock,
    /// so nothing can be enqueued after the queue is found empty here.
    fn retire(&self, user_id: i64, rx: &mut UnboundedReceiver<Message>) -> Option<Message> {
        let mut senders = self.lock_senders();
        match rx.try_recv() {
            Ok(message) => Some(message),
            Err(_) => {
                senders.remove(&user_id);
                None
            }
        }
    }

    fn lock_senders(&self) -> MutexGuard<'_, HashMap<i64, UnboundedSender<Message>>> {
        self.senders.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
