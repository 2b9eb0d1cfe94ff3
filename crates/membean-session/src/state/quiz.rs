// Copyright 2026 Membean Session Contributors
// SPDX-License-Identifier: Apache-2.0

//! Parser for the quiz screen.
//!
//! Only the clock and the pass/fail navigators are read; question content
//! differs per question type (multiple choice from text or image, fill in
//! the blank) and is left to the caller.

use super::types::{AnswerNavigators, Clock, QuizState};
use crate::dom::DomNode;
use crate::error::TrainerResult;
use crate::extract::{extract_navigation, find_navigator};
use crate::text::trim;

const CLOCK_STATS: &str = "#training-clock-stats";
pub(crate) const PASS_FORM: &str = "form[name='Pass']";
pub(crate) const FAIL_FORM: &str = "form[name='Fail']";

pub fn parse_quiz<'a, N: DomNode<'a>>(root: &N) -> TrainerResult<QuizState> {
    let nav = extract_navigation(root)?;

    let readings: Vec<String> = root
        .select(CLOCK_STATS)
        .iter()
        .flat_map(|c| c.children_matching(".large"))
        .map(|n| trim(&n.text()).to_string())
        .collect();
    let mut readings = readings.into_iter();
    let clock = Clock {
        elapsed: readings.next().unwrap_or_default(),
        total: readings.next().unwrap_or_default(),
    };

    Ok(QuizState {
        nav,
        clock,
        answer: parse_answer(root)?,
    })
}

pub(crate) fn parse_answer<'a, N: DomNode<'a>>(root: &N) -> TrainerResult<AnswerNavigators> {
    Ok(AnswerNavigators {
        pass: find_navigator(root, PASS_FORM)?.fields,
        fail: find_navigator(root, FAIL_FORM)?.fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, HtmlDocument};
    use crate::error::TrainerError;

    const QUIZ_PAGE: &str = r#"
    <div id="session-state" data-state="quiz"></div>
    <div id="training-clock-stats">
      <span class="large"> 01:23 </span>
      <span class="small">of</span>
      <span class="large">05:00</span>
    </div>
    <form name="Pass"><input type="hidden" name="event" value="answer!"><input type="hidden" name="barrier" value="p1"><input type="hidden" name="correct" value="1"></form>
    <form name="Fail"><input type="hidden" name="event" value="answer!"><input type="hidden" name="barrier" value="f1"><input type="hidden" name="correct" value="0"></form>
    "#;

    #[test]
    fn test_clock_and_answers() {
        let doc = HtmlDocument::parse(QUIZ_PAGE);
        let quiz = parse_quiz(&doc.root()).unwrap();
        assert_eq!(quiz.clock.elapsed, "01:23");
        assert_eq!(quiz.clock.total, "05:00");
        assert_eq!(quiz.answer.pass.get("barrier"), Some("p1"));
        assert_eq!(quiz.answer.fail.get("correct"), Some("0"));
        assert!(quiz.nav.is_empty());
    }

    #[test]
    fn test_missing_clock_reads_empty() {
        let html = QUIZ_PAGE.replace("training-clock-stats", "elsewhere");
        let doc = HtmlDocument::parse(&html);
        let quiz = parse_quiz(&doc.root()).unwrap();
        assert_eq!(quiz.clock, Clock::default());
    }

    #[test]
    fn test_missing_fail_form_is_an_error() {
        let html = QUIZ_PAGE.replace("name=\"Fail\"", "name=\"Other\"");
        let doc = HtmlDocument::parse(&html);
        let err = parse_quiz(&doc.root()).unwrap_err();
        assert!(
            matches!(err, TrainerError::MissingNavigator { ref selector } if selector == FAIL_FORM)
        );
    }
}
