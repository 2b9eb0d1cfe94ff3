// Copyright 2026 Membean Session Contributors
// SPDX-License-Identifier: Apache-2.0

//! Form and navigation extraction from training markup.

pub mod form;
pub mod navigation;

pub use form::{extract_form, extract_forms, extract_navigator, find_navigator, FormFields, Navigator};
pub use navigation::{extract_navigation, NavigationMap};
