// Copyright 2026 Membean Session Contributors
// SPDX-License-Identifier: Apache-2.0

//! Collects the navigators in the trainer's navigation bar.

use super::form::{extract_navigator, FormFields, Navigator};
use crate::dom::DomNode;
use crate::error::TrainerResult;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Container whose direct children are the navigator forms.
pub const NAV_CONTAINER: &str = "#trainer-nav";

/// Every navigator available in one response, keyed by name in document
/// order. A later navigator with an existing name replaces the earlier
/// one's fields in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationMap {
    navigators: Vec<Navigator>,
}

impl NavigationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, navigator: Navigator) {
        match self.navigators.iter_mut().find(|n| n.name == navigator.name) {
            Some(existing) => existing.fields = navigator.fields,
            None => self.navigators.push(navigator),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FormFields> {
        self.navigators
            .iter()
            .find(|n| n.name == name)
            .map(|n| &n.fields)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.navigators.iter().map(|n| n.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Navigator> {
        self.navigators.iter()
    }

    pub fn len(&self) -> usize {
        self.navigators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.navigators.is_empty()
    }
}

impl FromIterator<Navigator> for NavigationMap {
    fn from_iter<I: IntoIterator<Item = Navigator>>(iter: I) -> Self {
        let mut map = NavigationMap::new();
        for navigator in iter {
            map.insert(navigator);
        }
        map
    }
}

impl Serialize for NavigationMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.navigators.len()))?;
        for n in &self.navigators {
            map.serialize_entry(&n.name, &n.fields)?;
        }
        map.end()
    }
}

/// Build the [`NavigationMap`] from the navigation container.
///
/// An absent or empty container yields an empty map. A child without a name
/// attribute is reported as an error.
pub fn extract_navigation<'a, N: DomNode<'a>>(root: &N) -> TrainerResult<NavigationMap> {
    let Some(container) = root.select_first(NAV_CONTAINER) else {
        return Ok(NavigationMap::new());
    };
    container
        .children()
        .iter()
        .map(extract_navigator)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, HtmlDocument};
    use crate::error::TrainerError;

    fn nav(html: &str) -> TrainerResult<NavigationMap> {
        let doc = HtmlDocument::parse(html);
        extract_navigation(&doc.root())
    }

    #[test]
    fn test_missing_or_empty_container() {
        assert!(nav("<div>nothing here</div>").unwrap().is_empty());
        assert!(nav(r#"<div id="trainer-nav"></div>"#).unwrap().is_empty());
    }

    #[test]
    fn test_document_order_and_duplicates() {
        let map = nav(
            r#"<div id="trainer-nav">
                <form name="Next"><input name="event" value="next!"><input name="barrier" value="1"></form>
                <form name="Skip"><input name="event" value="skip!"></form>
                <form name="Next"><input name="event" value="next!"><input name="barrier" value="2"></form>
            </div>"#,
        )
        .unwrap();
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["Next", "Skip"]);
        assert_eq!(map.get("Next").and_then(|f| f.get("barrier")), Some("2"));
    }

    #[test]
    fn test_names_are_sanitized_fields_are_not() {
        let map = nav(
            "<div id=\"trainer-nav\"><form name=\"I\u{2019}m sure\"><input name=\"note\" value=\"it\u{2019}s\"></form></div>",
        )
        .unwrap();
        let fields = map.get("I'm sure").expect("sanitized name");
        assert_eq!(fields.get("note"), Some("it\u{2019}s"));
    }

    #[test]
    fn test_nameless_child_is_reported() {
        let err = nav(r#"<div id="trainer-nav"><form><input name="a" value="1"></form></div>"#)
            .unwrap_err();
        assert!(matches!(err, TrainerError::MissingNavigatorName { .. }));
    }

    #[test]
    fn test_serializes_as_name_keyed_object() {
        let map = nav(
            r#"<div id="trainer-nav"><form name="Next"><input name="event" value="next!"></form></div>"#,
        )
        .unwrap();
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json, serde_json::json!({ "Next": { "event": "next!" } }));
    }
}
