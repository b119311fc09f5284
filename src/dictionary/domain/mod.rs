//! Domain model for dictionary search results.

mod entry;

pub use entry::{
    Attribution, DbpediaAttribution, DictionaryEntry, JapaneseForm, ResultList, Sense,
};
