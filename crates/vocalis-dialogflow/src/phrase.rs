//! Phrase tokenizer
//!
//! Neutral phrases mark slots with braces: `"book a flight to {city}"`.
//! Dialogflow stores the same phrase as a list of spans where slot spans carry
//! an alias and a type. [`encode`] and [`decode`] convert between the two.

use crate::native::{IntentParameter, UserSays, UserSaysData};
use regex::Regex;
use serde_json::Map;
use std::sync::LazyLock;
use vocalis_core::Input;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(.*?)\}").expect("placeholder regex is valid"));

/// Piece of a tokenized phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhraseToken {
    /// Literal text between slots
    Text(String),
    /// Slot reference by name
    Slot(String),
}

/// Split a phrase into literal spans and slot references.
///
/// Empty literal spans are never produced, except that a phrase without any
/// content at all yields a single empty text token.
pub fn tokenize(phrase: &str) -> Vec<PhraseToken> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    for caps in PLACEHOLDER_RE.captures_iter(phrase) {
        let (Some(whole), Some(slot)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        if whole.start() > pos {
            tokens.push(PhraseToken::Text(phrase[pos..whole.start()].to_string()));
        }
        tokens.push(PhraseToken::Slot(slot.as_str().to_string()));
        pos = whole.end();
    }

    if pos < phrase.len() {
        tokens.push(PhraseToken::Text(phrase[pos..].to_string()));
    }

    if tokens.is_empty() {
        tokens.push(PhraseToken::Text(phrase.to_string()));
    }

    tokens
}

/// Convert a neutral phrase into a Dialogflow sample record.
///
/// Slot spans get their alias and type from the matching entry in
/// `parameters`, and their display text from the matching input's recorded
/// sample text when there is one.
pub fn encode(phrase: &str, inputs: &[Input], parameters: &[IntentParameter]) -> UserSays {
    let data = tokenize(phrase)
        .into_iter()
        .map(|token| match token {
            PhraseToken::Text(text) => UserSaysData {
                text,
                user_defined: false,
                ..Default::default()
            },
            PhraseToken::Slot(slot) => {
                let text = inputs
                    .iter()
                    .filter(|input| input.name == slot)
                    .filter_map(|input| input.text.clone())
                    .last()
                    .unwrap_or_else(|| slot.clone());

                let parameter = parameters.iter().filter(|p| p.name == slot).last();

                UserSaysData {
                    text,
                    user_defined: true,
                    alias: parameter.map(|p| p.name.clone()),
                    meta: parameter.and_then(|p| p.data_type.clone()),
                    extra: Map::new(),
                }
            }
        })
        .collect();

    UserSays {
        data,
        is_template: false,
        count: 0,
        extra: Map::new(),
    }
}

/// A decoded sample record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedPhrase {
    /// Neutral phrase with `{alias}` placeholders
    pub phrase: String,
    /// `(slot, display text)` for every slot span whose text is not its alias
    pub sample_texts: Vec<(String, String)>,
}

/// Convert a Dialogflow sample record back into a neutral phrase
pub fn decode(user_says: &UserSays) -> DecodedPhrase {
    let mut decoded = DecodedPhrase::default();

    for data in &user_says.data {
        match data.alias.as_deref() {
            Some(alias) if !alias.is_empty() => {
                decoded.phrase.push('{');
                decoded.phrase.push_str(alias);
                decoded.phrase.push('}');

                if data.text != alias {
                    decoded
                        .sample_texts
                        .push((alias.to_string(), data.text.clone()));
                }
            }
            _ => decoded.phrase.push_str(&data.text),
        }
    }

    decoded
}
