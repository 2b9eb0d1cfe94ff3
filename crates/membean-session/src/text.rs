// Copyright 2026 Membean Session Contributors
// SPDX-License-Identifier: Apache-2.0

//! Text normalization for strings read out of training markup.
//!
//! Navigator names and most text fields are scraped from HTML that mixes
//! typographic punctuation with plain ASCII. [`sanitize`] folds the known
//! dash and quote variants onto their ASCII forms and [`collapse_whitespace`]
//! flattens the indentation the server leaves inside text nodes.

/// Punctuation variants and the ASCII character each one is folded onto.
///
/// No target character appears as a source, so a single pass is enough and
/// the order of the table does not matter.
pub const SPECIAL_CHARS: &[(char, char)] = &[
    // Dashes / hyphens
    ('\u{1806}', '-'),
    ('\u{2010}', '-'),
    ('\u{2011}', '-'),
    ('\u{2012}', '-'),
    ('\u{2013}', '-'),
    ('\u{FE58}', '-'),
    ('\u{FE63}', '-'),
    ('\u{FF0D}', '-'),
    // Single quotes
    ('<', '\''),
    ('>', '\''),
    ('\u{2018}', '\''),
    ('\u{2019}', '\''),
    ('\u{201A}', '\''),
    ('\u{201B}', '\''),
    ('\u{2039}', '\''),
    ('\u{203A}', '\''),
    ('\u{275B}', '\''),
    ('\u{275C}', '\''),
    ('\u{276E}', '\''),
    ('\u{276F}', '\''),
    ('\u{FF07}', '\''),
    ('\u{300C}', '\''),
    ('\u{300D}', '\''),
    // Double quotes
    ('\u{00AB}', '"'),
    ('\u{00BB}', '"'),
    ('\u{201C}', '"'),
    ('\u{201D}', '"'),
    ('\u{201E}', '"'),
    ('\u{201F}', '"'),
    ('\u{275D}', '"'),
    ('\u{275E}', '"'),
    ('\u{2E42}', '"'),
    ('\u{301D}', '"'),
    ('\u{301E}', '"'),
    ('\u{301F}', '"'),
    ('\u{FF02}', '"'),
    ('\u{300E}', '"'),
    ('\u{300F}', '"'),
];

fn fold_char(c: char) -> char {
    SPECIAL_CHARS
        .iter()
        .find(|(from, _)| *from == c)
        .map_or(c, |(_, to)| *to)
}

/// Replace every dash/quote variant in [`SPECIAL_CHARS`] with its ASCII form.
pub fn sanitize(text: &str) -> String {
    text.chars().map(fold_char).collect()
}

/// Unicode white space plus U+FEFF, which markup sometimes carries as a
/// stray byte-order mark.
pub fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Trim [`is_space`] characters from both ends.
pub fn trim(text: &str) -> &str {
    text.trim_matches(is_space)
}

/// Replace each run of whitespace (newlines included) with a single space
/// and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split(is_space)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
