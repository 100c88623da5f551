//! hanlex-core
//!
//! Segmentation index, reference dictionaries, report plumbing, and the
//! lexical field-store seam shared by the language-specific crates.
//!
//! This crate provides the data layer for tone-numbered Pinyin processing:
//! a tagged prefix trie, a bidirectional maximal-match segmenter over a word
//! dictionary, and a character sort table with dual text/binary storage.
//!
//! Public API:
//! - `PrefixTrie` / `TrieValue` - Prefix tree with boundary/prefix tagging
//! - `SegmentIndex` - Bidirectional maximal-match word segmentation
//! - `WordDict` - Hanzi → tone-numbered pronunciation dictionary
//! - `CharTable` / `CharRecord` - Per-character sort data (dual format)
//! - `FieldCursor` / `MemoryEntry` - Lexical entry field access
//! - `ReportSink` / `Report` - Info/Warning/Error reporting
//! - `Config` - Configuration and feature flags
use serde::{Deserialize, Serialize};

pub mod report;
pub use report::{Level, LogSink, MemorySink, Report, ReportSink};

pub mod fields;
pub use fields::{FieldCursor, MemoryEntry};

pub mod trie;
pub use trie::{PrefixTrie, TrieValue};

pub mod segmenter;
pub use segmenter::SegmentIndex;

pub mod worddict;
pub use worddict::WordDict;

pub mod chartable;
pub use chartable::{CharRecord, CharTable};

/// Generic configuration for the processing core.
///
/// This config contains only language-agnostic fields. Language-specific
/// options (writing-system tags, field update toggles, data file names)
/// belong in `EngineConfig` in the language crate.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Skip unrecognized characters silently during tokenization.
    /// When false, callers should use the strict tokenizer variant and
    /// report the skipped spans.
    pub lossy_tokens: bool,

    /// Expand dictionary headwords written with a parenthesized 儿 into
    /// both the erhua and the plain form.
    pub erhua_expansion: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lossy_tokens: true,
            erhua_expansion: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Utility helpers.
pub mod utils {
    /// Normalize input strings (NFC) and trim whitespace.
    pub fn normalize(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        s.nfc().collect::<String>().trim().to_string()
    }

    /// Case-fold a tone-numbered pronunciation for ordering purposes.
    ///
    /// Pronunciations compare case-insensitively when sorting the
    /// alternatives of a character; the stored form keeps its case.
    pub fn tone_fold(s: &str) -> String {
        s.to_lowercase()
    }
}
