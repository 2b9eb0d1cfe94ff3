// Copyright 2026 Membean Session Contributors
// SPDX-License-Identifier: Apache-2.0

//! Training state records produced by the state parsers.
//!
//! Field names serialize in camelCase so the JSON shape lines up with what
//! existing payload consumers read.

use crate::extract::{FormFields, NavigationMap};
use serde::Serialize;
use std::fmt;

/// Identifies which kind of training state a response represents. Also the
/// name of the event emitted for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StateTag {
    #[serde(rename = "new_word")]
    NewWord,
    #[serde(rename = "restudy")]
    Restudy,
    #[serde(rename = "quiz")]
    Quiz,
    #[serde(rename = "spelltest")]
    SpellTest,
    #[serde(rename = "take_a_break")]
    TakeABreak,
    #[serde(rename = "redirect")]
    Redirect,
}

impl StateTag {
    pub const ALL: [StateTag; 6] = [
        StateTag::NewWord,
        StateTag::Restudy,
        StateTag::Quiz,
        StateTag::SpellTest,
        StateTag::TakeABreak,
        StateTag::Redirect,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StateTag::NewWord => "new_word",
            StateTag::Restudy => "restudy",
            StateTag::Quiz => "quiz",
            StateTag::SpellTest => "spelltest",
            StateTag::TakeABreak => "take_a_break",
            StateTag::Redirect => "redirect",
        }
    }

    /// Map a markup state marker onto its tag. `redirect` never appears as a
    /// marker (redirects arrive as JSON), so it is not accepted here.
    pub fn from_marker(marker: &str) -> Option<StateTag> {
        match marker {
            "new_word" => Some(StateTag::NewWord),
            "restudy" => Some(StateTag::Restudy),
            "quiz" => Some(StateTag::Quiz),
            "spelltest" => Some(StateTag::SpellTest),
            "take_a_break" => Some(StateTag::TakeABreak),
            _ => None,
        }
    }
}

impl fmt::Display for StateTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One resolved training state. Exactly one is produced per response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum TrainingState {
    #[serde(rename = "new_word")]
    NewWord(WordLearnState),
    #[serde(rename = "restudy")]
    Restudy(WordLearnState),
    #[serde(rename = "quiz")]
    Quiz(QuizState),
    #[serde(rename = "spelltest")]
    SpellTest(SpellTestState),
    /// Terminal: the session has been closed. The record is `done`; the
    /// event tag stays `take_a_break`.
    #[serde(rename = "done")]
    TakeABreak,
    #[serde(rename = "redirect")]
    Redirect(RedirectState),
}

impl TrainingState {
    pub fn tag(&self) -> StateTag {
        match self {
            TrainingState::NewWord(_) => StateTag::NewWord,
            TrainingState::Restudy(_) => StateTag::Restudy,
            TrainingState::Quiz(_) => StateTag::Quiz,
            TrainingState::SpellTest(_) => StateTag::SpellTest,
            TrainingState::TakeABreak => StateTag::TakeABreak,
            TrainingState::Redirect(_) => StateTag::Redirect,
        }
    }

    /// Navigators offered by this state, when it has any.
    pub fn nav(&self) -> Option<&NavigationMap> {
        match self {
            TrainingState::NewWord(w) | TrainingState::Restudy(w) => Some(&w.nav),
            TrainingState::Quiz(q) => Some(&q.nav),
            TrainingState::SpellTest(s) => Some(&s.nav),
            TrainingState::TakeABreak | TrainingState::Redirect(_) => None,
        }
    }

    /// Pass/fail navigators of a quiz or spell test.
    pub fn answer(&self) -> Option<&AnswerNavigators> {
        match self {
            TrainingState::Quiz(q) => Some(&q.answer),
            TrainingState::SpellTest(s) => Some(&s.answer),
            _ => None,
        }
    }

    /// No further advancement is possible after this state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TrainingState::TakeABreak | TrainingState::Redirect(_))
    }
}

/// Word presentation shared by the `new_word` and `restudy` states.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordLearnState {
    pub nav: NavigationMap,
    pub part_of_speech: String,
    pub level: String,
    pub word: String,
    /// Pronunciation guide text.
    pub orthoepy: String,
    /// Audio clip path.
    pub pronunciation: Option<String>,
    pub image: Option<String>,
    pub context: WordContext,
    pub examples: Vec<WordExample>,
    pub word_structure: WordStructure,
    pub related: RelatedWords,
    /// Flag/acknowledge control fields; only present on `new_word`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ikt: Option<FormFields>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordContext {
    pub example_sentence: String,
    pub quiz: ContextQuiz,
    pub definition: String,
    pub quick_look: String,
}

/// The cloze question embedded in the context block.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContextQuiz {
    pub question: Option<String>,
    pub answer: String,
    pub choices: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WordExample {
    pub text: String,
    pub attribution: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WordStructure {
    pub definition: String,
    pub parts: Vec<WordPart>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WordPart {
    pub part: String,
    pub meaning: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RelatedWords {
    pub synonyms: Vec<RelatedWord>,
    pub antonyms: Vec<RelatedWord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RelatedWord {
    pub word: String,
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizState {
    pub nav: NavigationMap,
    pub clock: Clock,
    pub answer: AnswerNavigators,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Clock {
    pub elapsed: String,
    pub total: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpellTestState {
    pub nav: NavigationMap,
    pub answer: AnswerNavigators,
}

/// Field maps of the `Pass` and `Fail` navigators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerNavigators {
    pub pass: FormFields,
    pub fail: FormFields,
}

/// The service asked the client to leave the trainer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RedirectState {
    pub redirect_url: Option<String>,
}
