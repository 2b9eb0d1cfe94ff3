// Copyright 2026 Membean Session Contributors
// SPDX-License-Identifier: Apache-2.0

//! `scraper`-backed implementation of the [`Document`] / [`DomNode`] traits.

use super::{Document, DomNode};
use scraper::{ElementRef, Html, Selector};

/// A parsed HTML document.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parse a full HTML document. Parsing is lenient and never fails.
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }
}

impl Document for HtmlDocument {
    type Node<'a> = HtmlNode<'a>;

    fn root(&self) -> HtmlNode<'_> {
        HtmlNode {
            el: self.html.root_element(),
        }
    }
}

/// An element of an [`HtmlDocument`].
#[derive(Clone, Copy)]
pub struct HtmlNode<'a> {
    el: ElementRef<'a>,
}

fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(s) => Some(s),
        Err(e) => {
            tracing::warn!("ignoring unparseable selector {selector:?}: {e:?}");
            None
        }
    }
}

impl<'a> DomNode<'a> for HtmlNode<'a> {
    fn select(&self, selector: &str) -> Vec<Self> {
        let Some(selector) = parse_selector(selector) else {
            return Vec::new();
        };
        self.el
            .select(&selector)
            .filter(|el| el.id() != self.el.id())
            .map(|el| HtmlNode { el })
            .collect()
    }

    fn children(&self) -> Vec<Self> {
        self.el
            .children()
            .filter_map(ElementRef::wrap)
            .map(|el| HtmlNode { el })
            .collect()
    }

    fn children_matching(&self, selector: &str) -> Vec<Self> {
        let Some(selector) = parse_selector(selector) else {
            return Vec::new();
        };
        self.el
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|el| selector.matches(el))
            .map(|el| HtmlNode { el })
            .collect()
    }

    fn matches(&self, selector: &str) -> bool {
        parse_selector(selector).is_some_and(|s| s.matches(&self.el))
    }

    fn tag_name(&self) -> &'a str {
        self.el.value().name()
    }

    fn attr(&self, name: &str) -> Option<&'a str> {
        self.el.value().attr(name)
    }

    fn text(&self) -> String {
        self.el.text().collect()
    }

    fn text_excluding(&self, child_selector: &str) -> String {
        let Some(selector) = parse_selector(child_selector) else {
            return self.text();
        };
        let mut out = String::new();
        for child in self.el.children() {
            match ElementRef::wrap(child) {
                Some(el) if selector.matches(&el) => {}
                Some(el) => out.extend(el.text()),
                None => {
                    if let Some(text) = child.value().as_text() {
                        out.push_str(text);
                    }
                }
            }
        }
        out
    }
}
