// Copyright 2026 Membean Session Contributors
// SPDX-License-Identifier: Apache-2.0

//! Parser for the spell-test screen.

use super::quiz::parse_answer;
use super::types::SpellTestState;
use crate::dom::DomNode;
use crate::error::TrainerResult;
use crate::extract::extract_navigation;

pub fn parse_spell_test<'a, N: DomNode<'a>>(root: &N) -> TrainerResult<SpellTestState> {
    Ok(SpellTestState {
        nav: extract_navigation(root)?,
        answer: parse_answer(root)?,
    })
}
