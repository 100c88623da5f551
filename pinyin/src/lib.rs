//! hanlex-pinyin
//!
//! Tone-numbered Pinyin checking, diacritic rendering, and sort-key
//! generation over the hanlex-core data layer.
//!
//! The crate is organized leaf-first:
//! - `tokenizer` - Tone-numbered syllable tokenization
//! - `punct` - Shared punctuation tables
//! - `diacritic` - Tone-number to diacritic Pinyin rendering
//! - `checker` - Pinyin consistency checking via bidirectional segmentation
//! - `sortkey` - Pronunciation/stroke sort-key generation
//! - `engine` - Batch driver over lexical entries
//! - `config` - `EngineConfig` flattening the core `Config`

pub mod punct;
pub mod tokenizer;

pub mod diacritic;
pub use diacritic::tonenum_to_pinyin;

pub mod checker;

pub mod sortkey;
pub use sortkey::{calculate_sort_string, sort_string};

pub mod config;
pub use config::EngineConfig;

pub mod engine;
pub use engine::{BatchSummary, Engine, EntryChanges};
