//! Engine configuration extending the base `Config` from core.
//!
//! The base config carries the generic toggles (lossy tokenization, erhua
//! expansion); this adds the writing-system tags the checks read and write,
//! the per-field update switches, and the data file names.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Base configuration fields (flattened via serde).
    #[serde(flatten)]
    pub base: hanlex_core::Config,

    /// Writing-system tag of the Hanzi field.
    pub ws_hanzi: String,
    /// Writing-system tag of the tone-numbered field.
    pub ws_tonenum: String,
    /// Writing-system tag of the diacritic Pinyin display field.
    pub ws_pinyin: String,
    /// Writing-system tag of the sort-key field.
    pub ws_sort: String,

    // Per-field update switches; a disabled field is still checked and
    // reported on, just never written.
    pub update_tonenum: bool,
    pub update_pinyin: bool,
    pub update_sort: bool,

    /// Word dictionary file name inside the data directory.
    pub wordlist_file: String,
    /// Character table file name (binary form, authoritative).
    pub chartable_file: String,
    /// Legacy text character table, used when the binary is absent.
    pub chartable_text_file: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base: hanlex_core::Config::default(),
            ws_hanzi: "cmn-Hani".to_string(),
            ws_tonenum: "cmn-Latn-x-tn".to_string(),
            ws_pinyin: "cmn-Latn-x-py".to_string(),
            ws_sort: "cmn-x-sort".to_string(),
            update_tonenum: true,
            update_pinyin: true,
            update_sort: true,
            wordlist_file: "wordlist.u8".to_string(),
            chartable_file: "chardb.bin".to_string(),
            chartable_text_file: "chardb.u8".to_string(),
        }
    }
}

impl EngineConfig {
    /// Get a reference to the base config.
    pub fn base(&self) -> &hanlex_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config.
    pub fn base_mut(&mut self) -> &mut hanlex_core::Config {
        &mut self.base
    }

    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&content)?;
        Ok(config)
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
