// Copyright 2026 Membean Session Contributors
// SPDX-License-Identifier: Apache-2.0

//! Parser for the word-learning screens (`new_word` and `restudy`).

use super::types::{
    ContextQuiz, RelatedWord, RelatedWords, StateTag, WordContext, WordExample, WordLearnState,
    WordPart, WordStructure,
};
use crate::dom::DomNode;
use crate::error::TrainerResult;
use crate::extract::{extract_navigation, find_navigator};
use crate::text::{collapse_whitespace, trim};
use regex::Regex;
use std::sync::OnceLock;

const WORD_INFO: &str = "#misc-word-info";
const EXAMPLES: &str = "#examples > .content > ul > li";
const STRUCTURE_DEFINITION: &str = "#word-structure > .content > p";
const STRUCTURE_PARTS: &str = "#word-structure > .content > table > tbody > tr";
const SYNONYMS: &str = "#related-words > .content > .related-syns";
const ANTONYMS: &str = "#related-words > .content > .related-ants";
const FLAG_FORM: &str = "#word-flags > span > form";

fn level_break() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n+\s+").expect("level regex is valid"))
}

/// Parse a word-learning screen. The `ikt` flag form is read only for
/// [`StateTag::NewWord`].
pub fn parse_word_learn<'a, N: DomNode<'a>>(
    root: &N,
    tag: StateTag,
) -> TrainerResult<WordLearnState> {
    let nav = extract_navigation(root)?;

    let info = root
        .select_first(WORD_INFO)
        .map(|c| c.children())
        .unwrap_or_default();
    let part_of_speech = info.first().map(|n| trim(&n.text()).to_string()).unwrap_or_default();
    let level = info
        .get(1)
        .map(|n| trim(&level_break().replace_all(trim(&n.text()), " - ")).to_string())
        .unwrap_or_default();

    let ikt = if tag == StateTag::NewWord {
        Some(find_navigator(root, FLAG_FORM)?.fields)
    } else {
        None
    };

    Ok(WordLearnState {
        nav,
        part_of_speech,
        level,
        word: trim(&root.text_of(".wordform")).to_string(),
        orthoepy: trim(&root.text_of("#orthoepy")).to_string(),
        pronunciation: root.attr_of("#pronounce-sound", "path"),
        image: root.attr_of("#bk-img", "src"),
        context: parse_context(root),
        examples: parse_examples(root),
        word_structure: parse_structure(root),
        related: RelatedWords {
            // Matches an `idxN` element nested under `.rw-defn`, unlike the antonym lookup.
            synonyms: parse_related(root, SYNONYMS, |idx| format!(".rw-defn idx{idx}")),
            antonyms: parse_related(root, ANTONYMS, |idx| format!(".rw-defn.idx{idx}")),
        },
        ikt,
    })
}

fn parse_context<'a, N: DomNode<'a>>(root: &N) -> WordContext {
    let question_text: String = root
        .select(".question")
        .iter()
        .map(|q| q.text_excluding("span"))
        .collect();

    WordContext {
        example_sentence: collapse_whitespace(&root.text_of("#context-paragraph")),
        quiz: ContextQuiz {
            question: cloze_question(&question_text),
            answer: trim(&root.text_of(".answer")).to_string(),
            choices: root
                .select(".choice")
                .iter()
                .map(|c| trim(&c.text()).to_string())
                .collect(),
        },
        definition: collapse_whitespace(&root.text_of(".def-text")),
        quick_look: collapse_whitespace(&root.text_of(".one-word-tab-right")),
    }
}

/// The question is the segment after the leading `label: ` prefix, up to any
/// further `": "`. Absent when there is no separator.
fn cloze_question(raw: &str) -> Option<String> {
    collapse_whitespace(raw).split(": ").nth(1).map(String::from)
}

fn parse_examples<'a, N: DomNode<'a>>(root: &N) -> Vec<WordExample> {
    root.select(EXAMPLES)
        .iter()
        .map(|li| {
            let attribution: String = li
                .children_matching(".attribution")
                .iter()
                .map(|a| a.text())
                .collect();
            WordExample {
                text: collapse_whitespace(&li.text_excluding(".attribution")),
                attribution: trim(&trim(&attribution).replace('\u{2014}', "")).to_string(),
            }
        })
        .collect()
}

fn parse_structure<'a, N: DomNode<'a>>(root: &N) -> WordStructure {
    WordStructure {
        definition: collapse_whitespace(&root.text_of(STRUCTURE_DEFINITION)),
        parts: root
            .select(STRUCTURE_PARTS)
            .iter()
            .map(|row| WordPart {
                part: row
                    .children_matching("td")
                    .first()
                    .map(|td| trim(&td.text()).to_string())
                    .unwrap_or_default(),
                meaning: trim(&row.text_of("td.meaning")).to_string(),
            })
            .collect(),
    }
}

fn parse_related<'a, N, F>(root: &N, group: &str, definition_selector: F) -> Vec<RelatedWord>
where
    N: DomNode<'a>,
    F: Fn(&str) -> String,
{
    root.select(group)
        .iter()
        .flat_map(|g| g.children())
        .map(|item| {
            let definition = item
                .data("idx")
                .map(|idx| collapse_whitespace(&root.text_of(&definition_selector(idx))))
                .unwrap_or_default();
            RelatedWord {
                word: trim(&item.text_of("span")).to_string(),
                definition,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, HtmlDocument};
    use crate::error::TrainerError;

    const NEW_WORD_PAGE: &str = r#"
    <html><body>
      <div id="session-state" data-state="new_word"></div>
      <div id="trainer-nav">
        <form name="Next"><input type="hidden" name="event" value="next!"><input type="hidden" name="barrier" value="b-next"></form>
      </div>
      <h1 class="wordform"> garrulous </h1>
      <div id="misc-word-info">
        <span>adjective</span>
        <span>Level 3
            Advanced</span>
      </div>
      <div id="orthoepy"> GAR-uh-luhs </div>
      <div id="pronounce-sound" path="/audio/garrulous.mp3"></div>
      <img id="bk-img" src="/images/garrulous.jpg">
      <p id="context-paragraph">My   aunt is
         <b>garrulous</b>.</p>
      <div class="question"><span>Q1</span>Quiz:   Which word
          fits?</div>
      <div class="answer"> talkative </div>
      <ul><li class="choice"> talkative </li><li class="choice">quiet</li></ul>
      <div class="def-text"> given to   excessive talk </div>
      <div class="one-word-tab-right"> chatty </div>
      <div id="examples"><div class="content"><ul>
        <li>The   garrulous host talked all night. <span class="attribution">&#8212; The Times</span></li>
        <li>Second example.</li>
      </ul></div></div>
      <div id="word-structure"><div class="content">
        <p>garrul   talk</p>
        <table>
          <tr><td> garrul </td><td class="meaning"> chatter </td></tr>
          <tr><td>ous</td><td>x</td><td class="meaning">full of</td></tr>
        </table>
      </div></div>
      <div id="related-words"><div class="content">
        <div class="related-syns"><a data-idx="1"><span>loquacious</span></a></div>
        <div class="related-ants"><a data-idx="2"><span>taciturn</span></a></div>
      </div></div>
      <div class="rw-defn idx1">talks a lot</div>
      <div class="rw-defn idx2"> says   little </div>
      <div id="word-flags"><span><form name="I know this"><input type="hidden" name="event" value="ikt!"><input type="hidden" name="barrier" value="b-ikt"></form></span></div>
    </body></html>
    "#;

    fn parse(html: &str, tag: StateTag) -> TrainerResult<WordLearnState> {
        let doc = HtmlDocument::parse(html);
        parse_word_learn(&doc.root(), tag)
    }

    #[test]
    fn test_headline_fields() {
        let state = parse(NEW_WORD_PAGE, StateTag::NewWord).unwrap();
        assert_eq!(state.word, "garrulous");
        assert_eq!(state.part_of_speech, "adjective");
        assert_eq!(state.level, "Level 3 - Advanced");
        assert_eq!(state.orthoepy, "GAR-uh-luhs");
        assert_eq!(state.pronunciation.as_deref(), Some("/audio/garrulous.mp3"));
        assert_eq!(state.image.as_deref(), Some("/images/garrulous.jpg"));
        assert_eq!(state.nav.get("Next").and_then(|f| f.get("barrier")), Some("b-next"));
    }

    #[test]
    fn test_context_block() {
        let ctx = parse(NEW_WORD_PAGE, StateTag::NewWord).unwrap().context;
        assert_eq!(ctx.example_sentence, "My aunt is garrulous.");
        assert_eq!(ctx.quiz.question.as_deref(), Some("Which word fits?"));
        assert_eq!(ctx.quiz.answer, "talkative");
        assert_eq!(ctx.quiz.choices, vec!["talkative", "quiet"]);
        assert_eq!(ctx.definition, "given to excessive talk");
        assert_eq!(ctx.quick_look, "chatty");
    }

    #[test]
    fn test_examples_and_structure() {
        let state = parse(NEW_WORD_PAGE, StateTag::NewWord).unwrap();
        assert_eq!(state.examples.len(), 2);
        assert_eq!(state.examples[0].text, "The garrulous host talked all night.");
        assert_eq!(state.examples[0].attribution, "The Times");
        assert_eq!(state.examples[1].attribution, "");

        assert_eq!(state.word_structure.definition, "garrul talk");
        assert_eq!(
            state.word_structure.parts,
            vec![
                WordPart { part: "garrul".into(), meaning: "chatter".into() },
                WordPart { part: "ous".into(), meaning: "full of".into() },
            ]
        );
    }

    #[test]
    fn test_related_words() {
        let related = parse(NEW_WORD_PAGE, StateTag::NewWord).unwrap().related;
        assert_eq!(related.synonyms.len(), 1);
        assert_eq!(related.synonyms[0].word, "loquacious");
        // `.rw-defn idx1` looks for a nested <idx1> element, which this markup lacks.
        assert_eq!(related.synonyms[0].definition, "");
        assert_eq!(related.antonyms[0].word, "taciturn");
        assert_eq!(related.antonyms[0].definition, "says little");
    }

    #[test]
    fn test_ikt_only_for_new_word() {
        let state = parse(NEW_WORD_PAGE, StateTag::NewWord).unwrap();
        let ikt = state.ikt.expect("new_word carries ikt");
        assert_eq!(ikt.get("event"), Some("ikt!"));

        let state = parse(NEW_WORD_PAGE, StateTag::Restudy).unwrap();
        assert!(state.ikt.is_none());
    }

    #[test]
    fn test_new_word_without_flag_form_is_an_error() {
        let html = NEW_WORD_PAGE.replace("word-flags", "no-flags");
        let err = parse(&html, StateTag::NewWord).unwrap_err();
        assert!(matches!(err, TrainerError::MissingNavigator { .. }));
        assert!(parse(&html, StateTag::Restudy).is_ok());
    }

    #[test]
    fn test_sparse_page_yields_empty_fields() {
        let state = parse("<html><body></body></html>", StateTag::Restudy).unwrap();
        assert_eq!(state.word, "");
        assert_eq!(state.part_of_speech, "");
        assert_eq!(state.level, "");
        assert!(state.pronunciation.is_none());
        assert!(state.context.quiz.question.is_none());
        assert!(state.examples.is_empty());
        assert!(state.related.synonyms.is_empty());
    }

    #[test]
    fn test_byte_order_mark_is_trimmed_from_fields() {
        let html = "<h1 class=\"wordform\">\u{FEFF}laconic\u{FEFF}</h1>\
                    <p id=\"context-paragraph\">\u{FEFF}Brief \u{FEFF} reply</p>";
        let state = parse(html, StateTag::Restudy).unwrap();
        assert_eq!(state.word, "laconic");
        assert_eq!(state.context.example_sentence, "Brief reply");
    }

    #[test]
    fn test_cloze_question_split() {
        assert_eq!(cloze_question("Quiz: pick one").as_deref(), Some("pick one"));
        assert_eq!(cloze_question("no separator here"), None);
        assert_eq!(cloze_question("a: b: c").as_deref(), Some("b"));
    }
}
