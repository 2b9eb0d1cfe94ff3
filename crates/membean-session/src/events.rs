// Copyright 2026 Membean Session Contributors
// SPDX-License-Identifier: Apache-2.0

//! Training event bus: one event per resolved training state.
//!
//! Handlers registered with [`EventBus::on`] (one state tag) or
//! [`EventBus::on_any`] are called synchronously, in registration order, on
//! the task that resolved the state. Async consumers can instead take a
//! `tokio::sync::broadcast` receiver from [`EventBus::subscribe`]; it sees
//! the same events after the handlers have run. When nobody listens, events
//! are dropped.

use crate::state::{StateTag, TrainingState};
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;

/// A resolved state, tagged with the session it came from.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrainingEvent {
    pub session_id: String,
    pub state: TrainingState,
}

impl TrainingEvent {
    /// Event name: the state tag (`new_word`, `quiz`, `redirect`, ...).
    pub fn tag(&self) -> StateTag {
        self.state.tag()
    }
}

type Handler = Arc<dyn Fn(&TrainingEvent) + Send + Sync>;

/// Dispatches [`TrainingEvent`]s to handlers and broadcast subscribers.
pub struct EventBus {
    handlers: RwLock<Vec<(Option<StateTag>, Handler)>>,
    sender: broadcast::Sender<TrainingEvent>,
}

impl EventBus {
    /// Create a bus whose broadcast channel buffers `capacity` events.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            handlers: RwLock::new(Vec::new()),
            sender,
        }
    }

    /// Call `handler` for every event tagged `tag`.
    ///
    /// A handler registered while an event is being delivered first sees the
    /// next event.
    pub fn on<F>(&self, tag: StateTag, handler: F)
    where
        F: Fn(&TrainingEvent) + Send + Sync + 'static,
    {
        self.register(Some(tag), Arc::new(handler));
    }

    /// Call `handler` for every event.
    pub fn on_any<F>(&self, handler: F)
    where
        F: Fn(&TrainingEvent) + Send + Sync + 'static,
    {
        self.register(None, Arc::new(handler));
    }

    fn register(&self, tag: Option<StateTag>, handler: Handler) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((tag, handler));
    }

    /// Receive all future events asynchronously.
    pub fn subscribe(&self) -> broadcast::Receiver<TrainingEvent> {
        self.sender.subscribe()
    }

    /// Deliver `event` to the matching handlers, then to broadcast subscribers.
    pub fn emit(&self, event: TrainingEvent) {
        let tag = event.tag();
        // Snapshot under the lock so handlers may register more handlers.
        let matching: Vec<Handler> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(filter, _)| filter.map_or(true, |t| t == tag))
            .map(|(_, handler)| Arc::clone(handler))
            .collect();
        for handler in &matching {
            handler(&event);
        }
        let _ = self.sender.send(event);
    }

    /// Number of registered synchronous handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
