// Copyright 2026 Membean Session Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for training-session round-trips.

/// All errors that can occur while driving a training session.
#[derive(thiserror::Error, Debug)]
pub enum TrainerError {
    /// Network-level failure talking to the service.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a 4xx/5xx status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The response's state marker is missing or not one of the known states.
    #[error("Unknown training state: {}", .0.as_deref().unwrap_or("<missing>"))]
    UnknownState(Option<String>),

    /// A navigator form carries no usable `name` attribute.
    #[error("Navigator <{tag}> has no name attribute")]
    MissingNavigatorName { tag: String },

    /// A navigator the state requires is not in the markup.
    #[error("Navigator not found: {selector}")]
    MissingNavigator { selector: String },

    /// A form field the state requires is not in the markup.
    #[error("Missing form field: {0}")]
    MissingField(&'static str),

    /// A round-trip is already running on this session.
    #[error("Session {0} already has an advancement in flight")]
    AdvanceInProgress(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl TrainerError {
    /// Whether the failure came from the transport rather than from the
    /// content of a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, TrainerError::Http(_) | TrainerError::Status { .. })
    }
}

pub type TrainerResult<T> = Result<T, TrainerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_state_message() {
        let err = TrainerError::UnknownState(Some("vacation".into()));
        assert_eq!(err.to_string(), "Unknown training state: vacation");
        let err = TrainerError::UnknownState(None);
        assert_eq!(err.to_string(), "Unknown training state: <missing>");
    }

    #[test]
    fn test_transport_classification() {
        let err = TrainerError::Status {
            status: 502,
            url: "https://membean.com/x".into(),
        };
        assert!(err.is_transport());
        assert!(!TrainerError::MissingField("barrier").is_transport());
    }
}
