//! Corpus data model
//!
//! An annotated corpus is an ordered collection of item groups, one group
//! per originating source file. Each item carries feed metadata plus an
//! optional linguistic analysis: a flat token sequence where every token
//! records its own form/lemma/POS and a denormalized copy of its governor's
//! lemma and POS. Governors are referenced by surface form, not by index;
//! resolution happens at match time (see the `pattern` module).

use serde::{Deserialize, Serialize};

/// One annotated word occurrence.
///
/// `gov_lemma` is the governor reference: it is resolved by scanning the
/// same token sequence for tokens whose `form` equals it. When several
/// tokens share that surface form the reference is ambiguous, and every
/// candidate counts as a governor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "Form")]
    pub form: String,
    #[serde(rename = "Lemma")]
    pub lemma: String,
    #[serde(rename = "POS")]
    pub pos: String,
    #[serde(rename = "Gouv_lemme")]
    pub gov_lemma: String,
    #[serde(rename = "Gouv_pos")]
    pub gov_pos: String,
    #[serde(rename = "Rel")]
    pub deprel: String,
}

impl Token {
    /// Create a new token with the given annotations
    pub fn new(form: &str, lemma: &str, pos: &str, gov_lemma: &str, gov_pos: &str, deprel: &str) -> Self {
        Self {
            form: form.to_string(),
            lemma: lemma.to_string(),
            pos: pos.to_string(),
            gov_lemma: gov_lemma.to_string(),
            gov_pos: gov_pos.to_string(),
            deprel: deprel.to_string(),
        }
    }
}

/// One feed entry with metadata and an ordered token sequence.
///
/// `analysis` is empty until an annotation pass has run; annotation is
/// all-or-nothing per item. On the wire an empty analysis is written as
/// null (JSON, binary) or omitted entirely (XML), and reads back as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub source: String,
    pub title: String,
    pub description: String,
    pub category: Vec<String>,
    #[serde(rename = "pubDate")]
    pub pub_date: String,
    #[serde(with = "nullable_analysis")]
    pub analysis: Vec<Token>,
}

impl Item {
    /// The concatenated text the annotation pass ran over
    pub fn text(&self) -> String {
        format!("{}. {}", self.title, self.description)
    }

    pub fn is_annotated(&self) -> bool {
        !self.analysis.is_empty()
    }
}

/// Grouped collection of items, one group per source file.
///
/// Group order and within-group order are preserved across every
/// serialization round-trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    pub items: Vec<Vec<Item>>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of items across all groups
    pub fn len(&self) -> usize {
        self.items.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.iter().all(Vec::is_empty)
    }
}

/// Empty analysis serializes as null and null deserializes as empty, so the
/// absent-vs-empty distinction never survives past this boundary.
mod nullable_analysis {
    use super::Token;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(tokens: &[Token], serializer: S) -> Result<S::Ok, S::Error> {
        if tokens.is_empty() {
            serializer.serialize_none()
        } else {
            Some(tokens).serialize(serializer)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Token>, D::Error> {
        Ok(Option::<Vec<Token>>::deserialize(deserializer)?.unwrap_or_default())
    }
}
