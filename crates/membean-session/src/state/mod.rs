// Copyright 2026 Membean Session Contributors
// SPDX-License-Identifier: Apache-2.0

//! Training states: records, per-state parsers, and classification of a raw
//! user-state response.
//!
//! A response is either a JSON document (a redirect out of the trainer) or
//! an HTML fragment whose `#session-state` element names the state in its
//! `data-state` attribute. Classification picks the parser for that state;
//! an unknown or missing marker is an error, never a fallback.

pub mod quiz;
pub mod spelltest;
pub mod take_a_break;
pub mod types;
pub mod word;

pub use quiz::parse_quiz;
pub use spelltest::parse_spell_test;
pub use take_a_break::{parse_take_a_break, BreakScreen, CLOSE_EVENT};
pub use types::*;
pub use word::parse_word_learn;

use crate::dom::{Document, DomNode, HtmlDocument};
use crate::error::{TrainerError, TrainerResult};
use serde_json::Value;

/// Element carrying the state marker.
pub const STATE_MARKER: &str = "#session-state";

/// Result of classifying one response.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    /// The response resolved to a state on its own.
    Resolved(TrainingState),
    /// Break screen. Resolves to [`TrainingState::TakeABreak`] once the close
    /// event has been submitted.
    Break(BreakScreen),
}

/// Classify a raw user-state body and parse it into its state record.
pub fn classify_response(body: &str) -> TrainerResult<Classified> {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        return Ok(Classified::Resolved(TrainingState::Redirect(parse_redirect(
            &json,
        ))));
    }
    let doc = HtmlDocument::parse(body);
    classify_document(&doc.root())
}

/// Read `redirect_url` from a JSON body. The body is not validated further.
pub fn parse_redirect(json: &Value) -> RedirectState {
    RedirectState {
        redirect_url: json
            .get("redirect_url")
            .and_then(Value::as_str)
            .map(String::from),
    }
}

/// Dispatch a parsed markup document to the parser named by its marker.
pub fn classify_document<'a, N: DomNode<'a>>(root: &N) -> TrainerResult<Classified> {
    let marker = root.attr_of(STATE_MARKER, "data-state");
    let Some(tag) = marker.as_deref().and_then(StateTag::from_marker) else {
        tracing::warn!(marker = ?marker, "unrecognized training state marker");
        return Err(TrainerError::UnknownState(marker));
    };

    let state = match tag {
        StateTag::NewWord => TrainingState::NewWord(parse_word_learn(root, tag)?),
        StateTag::Restudy => TrainingState::Restudy(parse_word_learn(root, tag)?),
        StateTag::Quiz => TrainingState::Quiz(parse_quiz(root)?),
        StateTag::SpellTest => TrainingState::SpellTest(parse_spell_test(root)?),
        StateTag::TakeABreak => return Ok(Classified::Break(parse_take_a_break(root)?)),
        StateTag::Redirect => return Err(TrainerError::UnknownState(marker)),
    };
    Ok(Classified::Resolved(state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_body_is_a_redirect() {
        let classified = classify_response(r#"{"redirect_url":"https://x/y"}"#).unwrap();
        assert_eq!(
            classified,
            Classified::Resolved(TrainingState::Redirect(RedirectState {
                redirect_url: Some("https://x/y".into())
            }))
        );
    }

    #[test]
    fn test_any_valid_json_is_trusted_as_redirect() {
        for body in ["[1, 2]", " 42 ", r#"{"redirect_url": 7}"#] {
            let classified = classify_response(body).unwrap();
            assert_eq!(
                classified,
                Classified::Resolved(TrainingState::Redirect(RedirectState { redirect_url: None }))
            );
        }
    }

    #[test]
    fn test_unknown_and_missing_markers() {
        let err = classify_response(r#"<div id="session-state" data-state="vacation"></div>"#)
            .unwrap_err();
        assert!(matches!(err, TrainerError::UnknownState(Some(ref s)) if s == "vacation"));

        let err = classify_response("<p>no marker</p>").unwrap_err();
        assert!(matches!(err, TrainerError::UnknownState(None)));

        let err = classify_response("").unwrap_err();
        assert!(matches!(err, TrainerError::UnknownState(None)));

        let err = classify_response(r#"<div id="session-state" data-state="redirect"></div>"#)
            .unwrap_err();
        assert!(matches!(err, TrainerError::UnknownState(Some(_))));
    }

    #[test]
    fn test_dispatches_on_marker() {
        let body = r#"
            <div id="session-state" data-state="spelltest"></div>
            <form name="Pass"><input name="barrier" value="p"></form>
            <form name="Fail"><input name="barrier" value="f"></form>"#;
        match classify_response(body).unwrap() {
            Classified::Resolved(state) => assert_eq!(state.tag(), StateTag::SpellTest),
            other => panic!("unexpected {other:?}"),
        }

        let body = r#"
            <div id="session-state" data-state="restudy"></div>
            <h1 class="wordform">laconic</h1>"#;
        match classify_response(body).unwrap() {
            Classified::Resolved(TrainingState::Restudy(word)) => assert_eq!(word.word, "laconic"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_break_screen_defers_resolution() {
        let body = r#"
            <div id="session-state" data-state="take_a_break"></div>
            <form><input type="hidden" name="barrier" value="abc123"></form>"#;
        assert_eq!(
            classify_response(body).unwrap(),
            Classified::Break(BreakScreen {
                barrier: "abc123".into()
            })
        );
    }
}
