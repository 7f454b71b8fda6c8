//! Fans out a webhook batch and answers each event.
//!
//! Every event runs as its own task and the batch settles only once all of
//! them have finished. A failure is logged and contained to its event; it
//! never aborts siblings or the request. Each reply token is used for at most
//! one send.

use futures::future::join_all;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::domain::models::{DispatchConfig, Event, EventType};
use crate::domain::ports::{ReplySender, TextMessage};
use crate::services::command_executor::CommandExecutor;
use crate::services::command_parser;
use crate::services::redelivery_guard::RedeliveryGuard;
use crate::services::reply_text;

/// What happened to one event of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOutcome {
    /// A reply was delivered.
    Replied,
    /// Noted in the log; the event type allows no reply.
    Recorded,
    /// Not an event this service handles.
    Ignored,
    /// Handled, but no usable reply token was left for it.
    Skipped,
    /// Already processed under the same webhook event id.
    Duplicate,
    /// Processing failed; a generic notice was attempted.
    Failed,
    /// Processing succeeded but the reply could not be sent.
    ReplyFailed,
    /// Exceeded the per-event time budget; no reply.
    TimedOut,
}

enum Plan {
    Duplicate,
    Process { reply_token: Option<String> },
}

#[derive(Clone)]
pub struct EventDispatcher {
    executor: CommandExecutor,
    sender: Arc<dyn ReplySender>,
    redelivery: Arc<RedeliveryGuard>,
    event_timeout: Duration,
}

impl EventDispatcher {
    pub fn new(executor: CommandExecutor, sender: Arc<dyn ReplySender>, config: &DispatchConfig) -> Self {
        Self {
            executor,
            sender,
            redelivery: Arc::new(RedeliveryGuard::new(config.redelivery_window)),
            event_timeout: Duration::from_millis(config.event_timeout_ms),
        }
    }

    /// Process a batch; the returned outcomes are in event order.
    pub async fn dispatch(&self, events: Vec<Event>) -> Vec<EventOutcome> {
        let mut used_tokens = HashSet::new();

        let tasks: Vec<_> = events
            .into_iter()
            .enumerate()
            .map(|(index, event)| {
                let plan = self.plan(index, &event, &mut used_tokens);
                let span = info_span!("event", index, kind = ?event.event_type);
                let dispatcher = self.clone();
                tokio::spawn(async move { dispatcher.run(event, plan).await }.instrument(span))
            })
            .collect();

        join_all(tasks)
            .await
            .into_iter()
            .enumerate()
            .map(|(index, joined)| {
                joined.unwrap_or_else(|e| {
                    error!(event_index = index, error = %e, "Event task aborted");
                    EventOutcome::Failed
                })
            })
            .collect()
    }

    /// Decided up front, in batch order, so token and id bookkeeping does not
    /// depend on task scheduling.
    fn plan(&self, index: usize, event: &Event, used_tokens: &mut HashSet<String>) -> Plan {
        if let Some(id) = event.webhook_event_id.as_deref() {
            if !self.redelivery.first_sighting(id) {
                info!(event_index = index, webhook_event_id = id, redelivery = event.is_redelivery(), "Skipping already processed event");
                return Plan::Duplicate;
            }
        }

        let reply_token = event.usable_reply_token().and_then(|token| {
            if used_tokens.insert(token.to_string()) {
                Some(token.to_string())
            } else {
                warn!(event_index = index, "Reply token already used in this batch");
                None
            }
        });
        Plan::Process { reply_token }
    }

    async fn run(self, event: Event, plan: Plan) -> EventOutcome {
        let reply_token = match plan {
            Plan::Duplicate => return EventOutcome::Duplicate,
            Plan::Process { reply_token } => reply_token,
        };

        match tokio::time::timeout(self.event_timeout, self.process(&event, reply_token.as_deref())).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(
                    timeout_ms = u64::try_from(self.event_timeout.as_millis()).unwrap_or(u64::MAX),
                    "Event processing timed out, reply skipped"
                );
                EventOutcome::TimedOut
            }
        }
    }

    async fn process(&self, event: &Event, reply_token: Option<&str>) -> EventOutcome {
        let partition = event.partition_key();
        match event.event_type {
            EventType::Message => match event.text_message() {
                Some(text) => self.process_text(partition, text, reply_token).await,
                None => {
                    debug!("Ignoring non-text message");
                    EventOutcome::Ignored
                }
            },
            EventType::Follow => {
                info!(partition, "Follow received");
                self.reply(reply_token, reply_text::welcome()).await
            }
            EventType::Unfollow => {
                info!(partition, "Unfollow received");
                EventOutcome::Recorded
            }
            EventType::Other => EventOutcome::Ignored,
        }
    }

    async fn process_text(&self, partition: &str, text: &str, reply_token: Option<&str>) -> EventOutcome {
        let command = command_parser::parse(text);
        info!(partition, command = command.as_str(), "Command received");

        match self.executor.execute(&command, partition).await {
            Ok(reply) => self.reply(reply_token, reply.text).await,
            Err(e) => {
                error!(partition, command = command.as_str(), error = %e, "Command failed");
                if let Some(token) = reply_token {
                    let notice = TextMessage::new(reply_text::GENERIC_FAILURE_TEXT);
                    if let Err(send_err) = self.sender.send(token, notice).await {
                        warn!(error = %send_err, "Failed to send failure notice");
                    }
                }
                EventOutcome::Failed
            }
        }
    }

    async fn reply(&self, reply_token: Option<&str>, text: String) -> EventOutcome {
        let Some(token) = reply_token else {
            warn!("No usable reply token, reply skipped");
            return EventOutcome::Skipped;
        };

        match self.sender.send(token, TextMessage::new(text)).await {
            Ok(()) => EventOutcome::Replied,
            Err(e) => {
                error!(error = %e, "Failed to send reply");
                EventOutcome::ReplyFailed
            }
        }
    }
}
