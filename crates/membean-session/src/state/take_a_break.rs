// Copyright 2026 Membean Session Contributors
// SPDX-License-Identifier: Apache-2.0

//! Parser for the take-a-break screen.
//!
//! The break screen ends the session: the session controller submits
//! [`CLOSE_EVENT`] with the screen's barrier token before reporting the
//! terminal state.

use crate::dom::DomNode;
use crate::error::{TrainerError, TrainerResult};
use crate::extract::extract_forms;

/// Event submitted to close the session.
pub const CLOSE_EVENT: &str = "close!";

/// What the break screen carries: the barrier for the close submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakScreen {
    pub barrier: String,
}

pub fn parse_take_a_break<'a, N: DomNode<'a>>(root: &N) -> TrainerResult<BreakScreen> {
    let fields = extract_forms(&root.select("form"));
    let barrier = fields
        .get("barrier")
        .ok_or(TrainerError::MissingField("barrier"))?;
    Ok(BreakScreen {
        barrier: barrier.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, HtmlDocument};

    #[test]
    fn test_reads_barrier_without_nav_container() {
        let doc = HtmlDocument::parse(
            r#"<div id="session-state" data-state="take_a_break"></div>
               <p>Time for a break!</p>
               <form action="/close"><input type="hidden" name="barrier" value="abc123"></form>"#,
        );
        let screen = parse_take_a_break(&doc.root()).unwrap();
        assert_eq!(screen.barrier, "abc123");
    }

    #[test]
    fn test_missing_barrier() {
        let doc = HtmlDocument::parse("<form><input name=\"other\" value=\"1\"></form>");
        let err = parse_take_a_break(&doc.root()).unwrap_err();
        assert!(matches!(err, TrainerError::MissingField("barrier")));
    }
}
