//! Word dictionary loader.
//!
//! The word list is a UTF-8 text file with one `<Hanzi>\t<Tonenum>` pair per
//! line. Headwords may carry a trailing `*` or digit to tell homographs
//! apart, an optional erhua marker `（儿）`, and pronunciations may contain
//! spacing, `(r)` markers, and `|`-separated alternatives. The loader
//! normalizes all of that away and yields plain (word, pronunciations)
//! pairs for the segmentation index.

use crate::utils;
use crate::Config;
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

/// Final erhua syllable fused into the preceding one, e.g. `huar1`.
/// A bare `er` syllable keeps its `r`, so at least two letters must
/// precede it.
static FUSED_ERHUA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-zA-Z:]{2,})r([1-5])$").unwrap());

/// Hanzi → tone-numbered pronunciations, deduplicated across homograph
/// lines.
#[derive(Debug, Default)]
pub struct WordDict {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl WordDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a word list from a text file.
    pub fn load<P: AsRef<std::path::Path>>(path: P, config: &Config) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read word list {}", path.display()))?;
        Ok(Self::from_text(&content, config))
    }

    /// Parse word list text. Malformed lines are skipped.
    pub fn from_text(content: &str, config: &Config) -> Self {
        let mut dict = Self::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '\t');
            let (Some(hanzi), Some(pron)) = (parts.next(), parts.next()) else {
                continue;
            };
            dict.add_line(hanzi, pron, config.erhua_expansion);
        }
        dict
    }

    fn add_line(&mut self, hanzi: &str, pron: &str, erhua_expansion: bool) {
        let mut hanzi = utils::normalize(hanzi);
        // Trailing * or digit marks a homograph; the reading itself does
        // not change.
        if let Some(last) = hanzi.chars().last() {
            if last == '*' || last.is_ascii_digit() {
                hanzi.pop();
            }
        }
        if hanzi.is_empty() {
            return;
        }

        // Pronunciations come spaced or unspaced and may mark an optional
        // retroflex with (r); stored values are unspaced without markers.
        let pron: String = utils::normalize(pron)
            .replace("(r)", "")
            .split_whitespace()
            .collect();

        if hanzi.contains("（儿）") {
            let erhua = hanzi.replace("（儿）", "儿");
            let plain = hanzi.replace("（儿）", "");
            for alt in pron.split('|').filter(|p| !p.is_empty()) {
                if erhua_expansion {
                    self.insert(&erhua, alt);
                }
                let stripped = FUSED_ERHUA.replace(alt, "$1$2");
                self.insert(&plain, &stripped);
            }
        } else {
            for alt in pron.split('|').filter(|p| !p.is_empty()) {
                self.insert(&hanzi, alt);
            }
        }
    }

    /// Register a single (word, pronunciation) pair.
    pub fn insert(&mut self, word: &str, pron: &str) {
        if word.is_empty() || pron.is_empty() {
            return;
        }
        self.entries
            .entry(word.to_string())
            .or_default()
            .insert(pron.to_string());
    }

    /// Number of distinct headwords.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pronunciation set of a headword.
    pub fn pronunciations(&self, word: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(word)
    }

    /// All (word, pronunciations) pairs in codepoint order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.entries.iter().map(|(w, p)| (w.as_str(), p))
    }
}
