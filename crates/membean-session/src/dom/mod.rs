// Copyright 2026 Membean Session Contributors
// SPDX-License-Identifier: Apache-2.0

//! Markup query abstraction.
//!
//! Defines the `Document` and `DomNode` traits that the extractors and state
//! parsers are written against, so the HTML parser underneath can be swapped
//! (currently `scraper`, see [`html`]). All lookups take CSS selectors; a
//! selector that fails to parse matches nothing.

pub mod html;

pub use html::{HtmlDocument, HtmlNode};

/// A parsed document that hands out its root element.
pub trait Document {
    /// Element handle borrowed from the document.
    type Node<'a>: DomNode<'a>
    where
        Self: 'a;

    /// The document's root element.
    fn root(&self) -> Self::Node<'_>;
}

/// An element inside a parsed document.
pub trait DomNode<'a>: Sized + Clone {
    /// All descendants matching `selector`, in document order.
    fn select(&self, selector: &str) -> Vec<Self>;

    /// Direct element children, in document order.
    fn children(&self) -> Vec<Self>;

    /// Direct element children matching `selector`.
    fn children_matching(&self, selector: &str) -> Vec<Self>;

    /// Whether this element itself matches `selector`.
    fn matches(&self, selector: &str) -> bool;

    /// Lower-case tag name.
    fn tag_name(&self) -> &'a str;

    /// Attribute value, if present.
    fn attr(&self, name: &str) -> Option<&'a str>;

    /// Concatenated text of every descendant text node.
    fn text(&self) -> String;

    /// Text of this element with the direct children matching
    /// `child_selector` (and everything under them) left out.
    fn text_excluding(&self, child_selector: &str) -> String;

    /// First descendant matching `selector`.
    fn select_first(&self, selector: &str) -> Option<Self> {
        self.select(selector).into_iter().next()
    }

    /// Concatenated text of every descendant matching `selector`; empty when
    /// nothing matches.
    fn text_of(&self, selector: &str) -> String {
        self.select(selector).iter().map(|n| n.text()).collect()
    }

    /// Attribute of the first descendant matching `selector`.
    fn attr_of(&self, selector: &str, name: &str) -> Option<String> {
        self.select_first(selector)
            .and_then(|n| n.attr(name).map(String::from))
    }

    /// `data-*` attribute shorthand.
    fn data(&self, key: &str) -> Option<&'a str> {
        self.attr(&format!("data-{key}"))
    }
}
