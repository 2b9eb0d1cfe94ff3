// Copyright 2026 Membean Session Contributors
// SPDX-License-Identifier: Apache-2.0

//! Serializes HTML forms into flat field maps and named navigators.
//!
//! Every action the trainer offers (next word, pass, fail, flag) is a small
//! `<form name="...">` whose hidden inputs carry the event and barrier token
//! the server expects back. This module walks those forms the way a browser
//! serializes them on submit:
//!
//! - controls are `input`, `select`, `textarea` and `keygen` descendants;
//! - nameless and `disabled` controls are skipped, as are submit-type inputs
//!   (`submit`, `button`, `image`, `reset`, `file`);
//! - checkboxes and radios only count when `checked` (value defaults to `on`);
//! - a later control with the same name replaces the earlier value in place.

use crate::dom::DomNode;
use crate::error::{TrainerError, TrainerResult};
use crate::text::{collapse_whitespace, sanitize};
use serde::ser::{Serialize, SerializeMap, Serializer};

const SUBMITTABLE: &str = "input, select, textarea, keygen";

/// Insertion-ordered field map with last-write-wins updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    entries: Vec<(String, String)>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `name`. An existing key keeps its position.
    /// Returns the replaced value, if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(k, _)| k == name)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Ordered `(name, value)` pairs, ready for form encoding.
    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.entries
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for FormFields {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = FormFields::new();
        fields.extend(iter);
        fields
    }
}

impl IntoIterator for FormFields {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for FormFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// A named, submittable action discovered in a response.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Navigator {
    /// The form's `name` attribute, passed through [`sanitize`].
    pub name: String,
    /// Raw field name → value pairs.
    pub fields: FormFields,
}

/// Serialize the successful controls of a form (or of a single control) into
/// a [`FormFields`] map.
pub fn extract_form<'a, N: DomNode<'a>>(element: &N) -> FormFields {
    let controls = if element.tag_name() == "form" {
        element.select(SUBMITTABLE)
    } else if element.matches(SUBMITTABLE) {
        vec![element.clone()]
    } else {
        Vec::new()
    };

    let mut fields = FormFields::new();
    for control in &controls {
        let Some(name) = control.attr("name").filter(|n| !n.is_empty()) else {
            continue;
        };
        if control.attr("disabled").is_some() {
            continue;
        }
        for value in control_values(control) {
            fields.insert(name, normalize_newlines(&value));
        }
    }
    fields
}

/// Merge the fields of several forms, later forms overwriting earlier ones.
pub fn extract_forms<'a, N: DomNode<'a>>(elements: &[N]) -> FormFields {
    let mut fields = FormFields::new();
    for element in elements {
        fields.extend(extract_form(element));
    }
    fields
}

/// Pair a form's sanitized `name` with its fields.
///
/// A form without a usable name is a data-quality defect in the response and
/// is reported rather than dropped.
pub fn extract_navigator<'a, N: DomNode<'a>>(element: &N) -> TrainerResult<Navigator> {
    let name = element
        .attr("name")
        .map(sanitize)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| TrainerError::MissingNavigatorName {
            tag: element.tag_name().to_string(),
        })?;
    Ok(Navigator {
        name,
        fields: extract_form(element),
    })
}

/// Extract the navigator at the first element matching `selector`.
pub fn find_navigator<'a, N: DomNode<'a>>(root: &N, selector: &str) -> TrainerResult<Navigator> {
    let element = root
        .select_first(selector)
        .ok_or_else(|| TrainerError::MissingNavigator {
            selector: selector.to_string(),
        })?;
    extract_navigator(&element)
}

fn control_values<'a, N: DomNode<'a>>(control: &N) -> Vec<String> {
    match control.tag_name() {
        "textarea" => vec![control.text()],
        "select" => selected_options(control),
        _ => {
            let kind = control.attr("type").unwrap_or("text").to_ascii_lowercase();
            match kind.as_str() {
                "submit" | "button" | "image" | "reset" | "file" => Vec::new(),
                "checkbox" | "radio" => {
                    if control.attr("checked").is_some() {
                        vec![control.attr("value").unwrap_or("on").to_string()]
                    } else {
                        Vec::new()
                    }
                }
                _ => vec![control.attr("value").unwrap_or_default().to_string()],
            }
        }
    }
}

fn selected_options<'a, N: DomNode<'a>>(select: &N) -> Vec<String> {
    let options = select.select("option");
    let option_value = |o: &N| {
        o.attr("value")
            .map(String::from)
            .unwrap_or_else(|| collapse_whitespace(&o.text()))
    };
    let selected: Vec<&N> = options
        .iter()
        .filter(|o| o.attr("selected").is_some() && o.attr("disabled").is_none())
        .collect();

    if select.attr("multiple").is_some() {
        return selected.into_iter().map(option_value).collect();
    }
    selected
        .first()
        .copied()
        .or_else(|| options.first())
        .map(option_value)
        .into_iter()
        .collect()
}

fn normalize_newlines(value: &str) -> String {
    if value.contains(['\r', '\n']) {
        value.replace("\r\n", "\n").replace('\r', "\n").replace('\n', "\r\n")
    } else {
        value.to_string()
    }
}
