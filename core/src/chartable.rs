//! Character sort table with dual text/binary storage.
//!
//! Each record carries a character's tone-numbered pronunciations plus its
//! stroke count and stroke-order key. From these the table builds sort
//! strings that collate by pronunciation first (with `:` mapped above the
//! tone digits), then stroke count, then stroke order.
//!
//! Two on-disk forms exist: the legacy UTF-8 text table and a bincode
//! binary. Both readers produce the same in-memory table; the text form is
//! regenerated one-way from the binary by `tools/chardb`.

use crate::utils;
use anyhow::{Context, Result};
use bincode::Options;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Digits of the stroke-count alphabet: `@` is zero, `I` is nine.
const STROKE_DIGITS: [char; 10] = ['@', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I'];

/// Upper bound on a serialized character table. A wrong-format or corrupt
/// file must come back as an error, not as a giant allocation from a
/// garbage length prefix; real tables are a few megabytes.
const BINARY_TABLE_LIMIT: u64 = 256 * 1024 * 1024;

/// Encode a stroke count as two symbols from the `@ABCDEFGHI` alphabet.
///
/// The alphabet sits below lowercase letters in codepoint order, so the
/// count sorts after the pronunciation part of a key without colliding
/// with it. Counts above 99 clamp.
///
/// # Example
/// ```
/// use hanlex_core::chartable::encode_stroke_count;
///
/// assert_eq!(encode_stroke_count(0), "@@");
/// assert_eq!(encode_stroke_count(6), "@F");
/// assert_eq!(encode_stroke_count(40), "D@");
/// ```
pub fn encode_stroke_count(n: u32) -> String {
    let n = n.min(99) as usize;
    let mut s = String::with_capacity(2);
    s.push(STROKE_DIGITS[n / 10]);
    s.push(STROKE_DIGITS[n % 10]);
    s
}

/// Decode two stroke-count symbols back to a number.
pub fn decode_stroke_count(s: &str) -> Option<u32> {
    let mut chars = s.chars();
    let hi = stroke_digit(chars.next()?)?;
    let lo = stroke_digit(chars.next()?)?;
    Some(hi * 10 + lo)
}

fn stroke_digit(ch: char) -> Option<u32> {
    STROKE_DIGITS.iter().position(|&d| d == ch).map(|p| p as u32)
}

/// Pronunciation part of a sort key: case-folded, with the `ü` colon
/// mapped to `9` so it orders after the tone digits but before any letter.
pub fn pron_key(pron: &str) -> String {
    utils::tone_fold(pron).replace(':', "9")
}

/// Assemble a sort key from its three components.
pub fn make_sort_string(pron: &str, stroke_count: u32, stroke_order: &str) -> String {
    format!(
        "{}{}{}",
        pron_key(pron),
        encode_stroke_count(stroke_count),
        stroke_order
    )
}

/// Sort data for one character (or one composed-ideograph sequence).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharRecord {
    pub hanzi: String,
    /// Tone-numbered pronunciations, kept sorted by their case-folded form.
    pub pronunciations: Vec<String>,
    pub stroke_count: u32,
    /// Opaque tail of the sort key; carried verbatim from the source data.
    pub stroke_order: String,
}

impl CharRecord {
    pub fn new<H: Into<String>, O: Into<String>>(hanzi: H, stroke_count: u32, stroke_order: O) -> Self {
        Self {
            hanzi: hanzi.into(),
            pronunciations: Vec::new(),
            stroke_count,
            stroke_order: stroke_order.into(),
        }
    }

    /// Add a pronunciation, keeping the list deduplicated and sorted.
    pub fn add_pronunciation(&mut self, pron: &str) {
        if self.pronunciations.iter().any(|p| p == pron) {
            return;
        }
        self.pronunciations.push(pron.to_string());
        self.pronunciations.sort_by_key(|p| utils::tone_fold(p));
    }

    /// Whether `pron` is one of this character's readings, compared
    /// case-insensitively.
    pub fn has_pronunciation(&self, pron: &str) -> bool {
        let folded = utils::tone_fold(pron);
        self.pronunciations
            .iter()
            .any(|p| utils::tone_fold(p) == folded)
    }

    /// Sort key for this character read as `pron`, or `None` when the
    /// reading does not belong to it.
    pub fn sort_key(&self, pron: &str) -> Option<String> {
        if !self.has_pronunciation(pron) {
            return None;
        }
        Some(make_sort_string(pron, self.stroke_count, &self.stroke_order))
    }
}

/// Character records keyed by their text, in codepoint order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharTable {
    records: BTreeMap<String, CharRecord>,
}

impl CharTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, hanzi: &str) -> Option<&CharRecord> {
        self.records.get(hanzi)
    }

    pub fn insert(&mut self, record: CharRecord) {
        self.records.insert(record.hanzi.clone(), record);
    }

    pub fn iter(&self) -> impl Iterator<Item = &CharRecord> {
        self.records.values()
    }

    /// Load a table, choosing the reader by file extension: `u8`, `txt`
    /// and `tsv` are the legacy text form, anything else is bincode.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        match ext {
            "u8" | "txt" | "tsv" => Self::load_text(path),
            _ => Self::load_binary(path),
        }
    }

    /// Load the legacy text table. A missing file is not an error: the
    /// tool historically ran without one, so this degrades to an empty
    /// table with a warning.
    pub fn load_text<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!("character table {} not found, using empty table", path.display());
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read character table {}", path.display()))?;
        Ok(Self::from_text(&content))
    }

    /// Parse the legacy text form: one record per line, the character
    /// followed by tab-separated (pronunciation, sort key) pairs. Stroke
    /// count and order are recovered from the first decodable key.
    pub fn from_text(content: &str) -> Self {
        let mut table = Self::new();
        for line in content.lines() {
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split('\t');
            let Some(hanzi) = fields.next() else { continue };
            let hanzi = utils::normalize(hanzi);
            if hanzi.is_empty() {
                continue;
            }

            let mut prons: Vec<String> = Vec::new();
            let mut stroke: Option<(u32, String)> = None;
            loop {
                let (Some(pron), Some(key)) = (fields.next(), fields.next()) else {
                    break;
                };
                let pron = pron.trim();
                if pron.is_empty() {
                    continue;
                }
                prons.push(pron.to_string());
                if stroke.is_none() {
                    stroke = decode_key_tail(pron, key);
                }
            }

            if prons.is_empty() {
                tracing::warn!("character table line for {} has no pronunciations, skipped", hanzi);
                continue;
            }
            let (stroke_count, stroke_order) = stroke.unwrap_or_else(|| {
                tracing::warn!("no decodable sort key for {}, stroke data zeroed", hanzi);
                (0, String::new())
            });

            let mut record = CharRecord::new(hanzi, stroke_count, stroke_order);
            for pron in &prons {
                record.add_pronunciation(pron);
            }
            table.insert(record);
        }
        table
    }

    /// Load the bincode binary form.
    pub fn load_binary<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("open character table {}", path.display()))?;
        let reader = BufReader::new(file);
        // Same wire format as `serialize_into` (fixint, trailing bytes
        // tolerated), with a size bound.
        let table = bincode::options()
            .with_fixint_encoding()
            .allow_trailing_bytes()
            .with_limit(BINARY_TABLE_LIMIT)
            .deserialize_from(reader)
            .with_context(|| format!("decode character table {}", path.display()))?;
        Ok(table)
    }

    /// Write the bincode binary form.
    pub fn save_binary<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("create character table {}", path.display()))?;
        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, self)
            .with_context(|| format!("encode character table {}", path.display()))?;
        Ok(())
    }

    /// Render the legacy text form. Deterministic: records in codepoint
    /// order, pronunciations in their stored order.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for record in self.records.values() {
            out.push_str(&record.hanzi);
            for pron in &record.pronunciations {
                out.push('\t');
                out.push_str(pron);
                out.push('\t');
                out.push_str(&make_sort_string(
                    pron,
                    record.stroke_count,
                    &record.stroke_order,
                ));
            }
            out.push('\n');
        }
        out
    }

    /// Regenerate the legacy text file. This direction only; the binary
    /// stays authoritative.
    pub fn export_text<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_text())
            .with_context(|| format!("write character table {}", path.display()))?;
        Ok(())
    }
}

/// Split a sort key into stroke count and order tail, given the
/// pronunciation it was built from.
fn decode_key_tail(pron: &str, key: &str) -> Option<(u32, String)> {
    let tail = match key.strip_prefix(pron_key(pron).as_str()) {
        Some(tail) => tail,
        // Older files occasionally carry keys built from a variant
        // spelling; fall back to scanning for the count alphabet.
        None => {
            let at = key.find(|c: char| stroke_digit(c).is_some())?;
            &key[at..]
        }
    };
    let count = decode_stroke_count(tail)?;
    let order = tail.chars().skip(2).collect();
    Some((count, order))
}
