// Copyright 2026 Membean Session Contributors
// SPDX-License-Identifier: Apache-2.0

//! Membean session library: drives one vocabulary-training session over
//! HTTP and parses every training state the service returns into typed
//! records.
//!
//! ```no_run
//! use membean_session::{Advancement, SessionConfig, StateTag, TrainingSession};
//!
//! # async fn run() -> membean_session::TrainerResult<()> {
//! let session = TrainingSession::new(SessionConfig::new("123456", "token"))?;
//! session.on(StateTag::Quiz, |event| println!("quiz in {}", event.session_id));
//!
//! let state = session.refresh_state().await?;
//! if let Some(pass) = state.answer().map(|a| &a.pass) {
//!     session.advance(&Advancement::from_fields(pass)?).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dom;
pub mod error;
pub mod events;
pub mod extract;
pub mod session;
pub mod state;
pub mod text;
pub mod transport;

pub use config::{ConfigOverrides, SessionConfig};
pub use error::{TrainerError, TrainerResult};
pub use events::{EventBus, TrainingEvent};
pub use extract::{FormFields, NavigationMap, Navigator};
pub use session::{Advancement, TrainingSession, DEFAULT_TIME_ON_PAGE_SECS};
pub use state::{Classified, StateTag, TrainingState};
pub use transport::{HttpTransport, Transport, TransportResponse};
