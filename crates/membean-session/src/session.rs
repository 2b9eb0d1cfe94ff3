// Copyright 2026 Membean Session Contributors
// SPDX-License-Identifier: Apache-2.0

//! Training session controller.
//!
//! A session is idle until the caller asks for a round-trip:
//!
//! - [`TrainingSession::advance`] posts the caller's decision to the advance
//!   endpoint, then resolves the next state;
//! - [`TrainingSession::refresh_state`] only resolves the current state.
//!
//! Resolving fetches the user-state endpoint, classifies the body, emits one
//! [`TrainingEvent`] and returns the state. A break screen is closed (event
//! `close!` with the screen's barrier) before it resolves. Only one
//! round-trip may run per session at a time; a second concurrent call fails
//! with [`TrainerError::AdvanceInProgress`] instead of racing the server's
//! navigation state.

use crate::config::SessionConfig;
use crate::error::{TrainerError, TrainerResult};
use crate::events::{EventBus, TrainingEvent};
use crate::extract::FormFields;
use crate::state::{classify_response, Classified, StateTag, TrainingState, CLOSE_EVENT};
use crate::transport::{HttpTransport, Transport, TransportResponse};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, MutexGuard};
use tracing::info;

/// Seconds reported as time-on-page when the caller gives none.
pub const DEFAULT_TIME_ON_PAGE_SECS: u64 = 5;

const TIME_ON_PAGE: &str = "time-on-page";

/// A caller's decision: the event and barrier to submit plus any other
/// fields the chosen navigator carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Advancement {
    pub event: String,
    pub barrier: String,
    pub fields: FormFields,
}

impl Advancement {
    pub fn new(event: impl Into<String>, barrier: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            barrier: barrier.into(),
            fields: FormFields::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name, value);
        self
    }

    /// Build from a navigator's field map, lifting `event` and `barrier` out.
    pub fn from_fields(fields: &FormFields) -> TrainerResult<Self> {
        let mut fields = fields.clone();
        let event = fields
            .remove("event")
            .ok_or(TrainerError::MissingField("event"))?;
        let barrier = fields
            .remove("barrier")
            .ok_or(TrainerError::MissingField("barrier"))?;
        Ok(Self {
            event,
            barrier,
            fields,
        })
    }
}

impl TryFrom<&FormFields> for Advancement {
    type Error = TrainerError;

    fn try_from(fields: &FormFields) -> TrainerResult<Self> {
        Advancement::from_fields(fields)
    }
}

/// Ordered advance body: `event`, `barrier`, `id`, the extra fields, then
/// the fixed `it` / `more_ts` pair. Later keys overwrite earlier ones.
pub fn advance_body(session_id: &str, event: &str, barrier: &str, extra: FormFields) -> FormFields {
    let mut body = FormFields::new();
    body.insert("event", event);
    body.insert("barrier", barrier);
    body.insert("id", session_id);
    body.extend(extra);
    body.insert("it", "0");
    body.insert("more_ts", "ostentatious");
    body
}

/// Compact JSON time-on-page marker, e.g. `{"time":5}`.
pub fn time_on_page(secs: u64) -> String {
    serde_json::json!({ "time": secs }).to_string()
}

/// One live training session.
pub struct TrainingSession {
    config: SessionConfig,
    transport: Arc<dyn Transport>,
    events: EventBus,
    in_flight: Mutex<()>,
}

impl TrainingSession {
    /// Open a session over its own cookie-bearing HTTP transport.
    pub fn new(config: SessionConfig) -> TrainerResult<Self> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Open a session over a caller-provided transport.
    pub fn with_transport(config: SessionConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            events: EventBus::default(),
            in_flight: Mutex::new(()),
        }
    }

    pub fn id(&self) -> &str {
        &self.config.session_id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Call `handler` whenever a state tagged `tag` resolves.
    pub fn on<F>(&self, tag: StateTag, handler: F)
    where
        F: Fn(&TrainingEvent) + Send + Sync + 'static,
    {
        self.events.on(tag, handler);
    }

    /// Call `handler` whenever any state resolves.
    pub fn on_any<F>(&self, handler: F)
    where
        F: Fn(&TrainingEvent) + Send + Sync + 'static,
    {
        self.events.on_any(handler);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TrainingEvent> {
        self.events.subscribe()
    }

    /// Submit `advancement` with the default time-on-page, then resolve the
    /// next state.
    pub async fn advance(&self, advancement: &Advancement) -> TrainerResult<TrainingState> {
        self.advance_with(advancement, DEFAULT_TIME_ON_PAGE_SECS)
            .await
    }

    /// Submit `advancement` reporting `time_on_page_secs`, then resolve the
    /// next state. A failed submission is returned without resolving.
    pub async fn advance_with(
        &self,
        advancement: &Advancement,
        time_on_page_secs: u64,
    ) -> TrainerResult<TrainingState> {
        let _guard = self.begin()?;
        let mut extra = advancement.fields.clone();
        extra.insert(TIME_ON_PAGE, time_on_page(time_on_page_secs));
        self.submit(&advancement.event, &advancement.barrier, extra)
            .await?;
        self.resolve_state().await
    }

    /// Fetch, classify and emit the current state.
    pub async fn refresh_state(&self) -> TrainerResult<TrainingState> {
        let _guard = self.begin()?;
        self.resolve_state().await
    }

    fn begin(&self) -> TrainerResult<MutexGuard<'_, ()>> {
        self.in_flight
            .try_lock()
            .map_err(|_| TrainerError::AdvanceInProgress(self.id().to_string()))
    }

    async fn submit(
        &self,
        event: &str,
        barrier: &str,
        extra: FormFields,
    ) -> TrainerResult<TransportResponse> {
        let body = advance_body(self.id(), event, barrier, extra);
        let url = self.config.advance_url()?;
        self.transport.post_form(&url, body.as_pairs()).await
    }

    async fn resolve_state(&self) -> TrainerResult<TrainingState> {
        let url = self.config.user_state_url()?;
        let body = self.transport.get_text(&url).await?;

        let state = match classify_response(&body)? {
            Classified::Resolved(state) => state,
            Classified::Break(screen) => {
                info!(session = %self.id(), "break screen reached, closing session");
                self.submit(CLOSE_EVENT, &screen.barrier, FormFields::new())
                    .await?;
                TrainingState::TakeABreak
            }
        };

        info!(session = %self.id(), state = %state.tag(), "training state resolved");
        self.events.emit(TrainingEvent {
            session_id: self.id().to_string(),
            state: state.clone(),
        });
        Ok(state)
    }
}
