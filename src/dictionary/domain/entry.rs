//! Dictionary entries as returned by the jisho.org word search API.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Ordered, immutable list of search results shared between a menu and its
/// cached interaction state.
pub type ResultList = Arc<[DictionaryEntry]>;

/// One written/read form of a word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JapaneseForm {
    /// Kanji spelling, absent for kana-only words.
    #[serde(default)]
    pub word: Option<String>,
    /// Kana reading, absent for some proper nouns.
    #[serde(default)]
    pub reading: Option<String>,
}

impl JapaneseForm {
    /// Creates a form from optional spelling and reading.
    #[must_use]
    pub fn new(word: Option<&str>, reading: Option<&str>) -> Self {
        Self {
            word: word.map(str::to_owned),
            reading: reading.map(str::to_owned),
        }
    }

    /// Returns the form as `word（reading）`, or whichever half exists.
    ///
    /// Returns an empty string when neither half is present.
    #[must_use]
    pub fn readable(&self) -> String {
        match (self.word.as_deref(), self.reading.as_deref()) {
            (Some(word), Some(reading)) => format!("{word}（{reading}）"),
            (Some(word), None) => word.to_owned(),
            (None, Some(reading)) => reading.to_owned(),
            (None, None) => String::new(),
        }
    }
}

/// One meaning of a dictionary entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sense {
    /// English glosses for this meaning.
    #[serde(default)]
    pub english_definitions: Vec<String>,
    /// Parts of speech, e.g. `Noun` or `Godan verb with 'ku' ending`.
    #[serde(default)]
    pub parts_of_speech: Vec<String>,
    /// Usage tags such as `Usually written using kana alone`.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Free-form notes.
    #[serde(default)]
    pub info: Vec<String>,
}

/// `DBpedia` attribution is either a boolean flag or a source URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DbpediaAttribution {
    /// Whether the entry draws on `DBpedia`.
    Flag(bool),
    /// Link to the `DBpedia` resource the entry draws on.
    Url(String),
}

impl Default for DbpediaAttribution {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl DbpediaAttribution {
    /// Returns `true` when the entry draws on `DBpedia`.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Url(_) => true,
        }
    }
}

/// Data sources credited for an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    /// Entry comes from `JMdict`.
    #[serde(default)]
    pub jmdict: bool,
    /// Entry comes from `JMnedict`.
    #[serde(default)]
    pub jmnedict: bool,
    /// Entry draws on `DBpedia`.
    #[serde(default)]
    pub dbpedia: DbpediaAttribution,
}

impl Attribution {
    /// Returns the display names of every credited source, in a stable
    /// order.
    #[must_use]
    pub fn sources(&self) -> Vec<&'static str> {
        [
            (self.jmdict, "JMdict"),
            (self.jmnedict, "JMnedict"),
            (self.dbpedia.is_present(), "DBpedia"),
        ]
        .into_iter()
        .filter_map(|(present, name)| present.then_some(name))
        .collect()
    }
}

/// A single dictionary search result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// URL slug identifying the entry on jisho.org.
    pub slug: String,
    /// Whether the word is marked as common.
    #[serde(default)]
    pub is_common: Option<bool>,
    /// Raw tags such as `wanikani12`.
    #[serde(default)]
    pub tags: Vec<String>,
    /// JLPT levels such as `jlpt-n3`.
    #[serde(default)]
    pub jlpt: Vec<String>,
    /// Written forms; the first one is the headword.
    #[serde(default)]
    pub japanese: Vec<JapaneseForm>,
    /// Meanings in dictionary order.
    #[serde(default)]
    pub senses: Vec<Sense>,
    /// Data source attribution.
    #[serde(default)]
    pub attribution: Attribution,
}

impl DictionaryEntry {
    /// Creates an entry with a slug and headword form.
    #[must_use]
    pub fn new(slug: impl Into<String>, headword: JapaneseForm) -> Self {
        Self {
            slug: slug.into(),
            japanese: vec![headword],
            ..Self::default()
        }
    }

    /// Adds a meaning.
    #[must_use]
    pub fn with_sense(mut self, sense: Sense) -> Self {
        self.senses.push(sense);
        self
    }

    /// Returns the readable headword, falling back to the slug when the
    /// entry has no forms.
    #[must_use]
    pub fn headword(&self) -> String {
        self.japanese
            .first()
            .map(JapaneseForm::readable)
            .filter(|readable| !readable.is_empty())
            .unwrap_or_else(|| self.slug.clone())
    }

    /// Returns every form after the headword.
    #[must_use]
    pub fn other_forms(&self) -> &[JapaneseForm] {
        self.japanese.get(1..).unwrap_or_default()
    }

    /// Returns the lowest (easiest) JLPT level number, e.g. `5` for N5.
    #[must_use]
    pub fn jlpt_level(&self) -> Option<u8> {
        self.jlpt
            .iter()
            .filter_map(|tag| tag.strip_prefix("jlpt-n")?.parse::<u8>().ok())
            .max()
    }

    /// Returns the lowest WaniKani level tagged on the entry.
    #[must_use]
    pub fn wanikani_level(&self) -> Option<u8> {
        self.tags
            .iter()
            .filter_map(|tag| tag.strip_prefix("wanikani")?.parse::<u8>().ok())
            .min()
    }
}
