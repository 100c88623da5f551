//! Batch check engine.
//!
//! `Engine` owns the read-only indices and drives the three checks over
//! lexical entries one at a time: tone-number consistency, diacritic Pinyin
//! display, and the sort key. Fields are read and written through the
//! `FieldCursor` seam; problems go to the `ReportSink`; what changed comes
//! back in explicit result structs instead of running counters.

use crate::checker;
use crate::diacritic;
use crate::sortkey;
use crate::EngineConfig;
use anyhow::Result;
use hanlex_core::{CharTable, FieldCursor, MemoryEntry, Report, ReportSink, SegmentIndex, WordDict};
use std::fmt;

/// Per-entry outcome of `check_entry`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EntryChanges {
    pub tonenum: bool,
    pub pinyin: bool,
    pub sort: bool,
    pub warnings: usize,
}

impl EntryChanges {
    pub fn any(&self) -> bool {
        self.tonenum || self.pinyin || self.sort
    }
}

/// Accumulated outcome of a batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub entries: usize,
    pub tonenum_updates: usize,
    pub pinyin_updates: usize,
    pub sort_updates: usize,
    pub warnings: usize,
}

impl BatchSummary {
    pub fn record(&mut self, changes: &EntryChanges) {
        self.entries += 1;
        self.tonenum_updates += changes.tonenum as usize;
        self.pinyin_updates += changes.pinyin as usize;
        self.sort_updates += changes.sort as usize;
        self.warnings += changes.warnings;
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entries: {} tonenum, {} pinyin, {} sort updates, {} warnings",
            self.entries, self.tonenum_updates, self.pinyin_updates, self.sort_updates, self.warnings
        )
    }
}

/// Checking engine over a word dictionary and a character table.
pub struct Engine {
    index: SegmentIndex,
    table: CharTable,
    config: EngineConfig,
}

impl Engine {
    /// Construct an engine from pre-built indices.
    pub fn new(index: SegmentIndex, table: CharTable, config: EngineConfig) -> Self {
        Self {
            index,
            table,
            config,
        }
    }

    /// Load an engine from a data directory.
    ///
    /// Expected layout:
    ///  - `wordlist.u8`             (word dictionary, text)
    ///  - `chardb.bin`              (character table, binary, authoritative)
    ///  - `chardb.u8`               (legacy text fallback)
    ///
    /// Missing files degrade to empty indices with a warning; the checks
    /// then report rather than update, which is still useful on partial
    /// data sets.
    pub fn from_data_dir<P: AsRef<std::path::Path>>(data_dir: P, config: EngineConfig) -> Result<Self> {
        let data_dir = data_dir.as_ref();

        let wordlist = data_dir.join(&config.wordlist_file);
        let dict = if wordlist.exists() {
            WordDict::load(&wordlist, config.base())?
        } else {
            tracing::warn!("word list {} not found, using empty dictionary", wordlist.display());
            WordDict::new()
        };
        let index = SegmentIndex::from_dict(&dict);
        tracing::info!("segmentation index: {} words", index.len());

        let binary = data_dir.join(&config.chartable_file);
        let table = if binary.exists() {
            CharTable::load(&binary)?
        } else {
            CharTable::load_text(data_dir.join(&config.chartable_text_file))?
        };
        tracing::info!("character table: {} records", table.len());

        Ok(Self::new(index, table, config))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn index(&self) -> &SegmentIndex {
        &self.index
    }

    pub fn table(&self) -> &CharTable {
        &self.table
    }

    /// Run the three checks over one entry.
    ///
    /// Writes go through the cursor only when the computed value differs
    /// from the stored one and the field's update switch is on; every
    /// warning goes to the sink tagged with the entry's reference.
    pub fn check_entry(&self, entry: &mut dyn FieldCursor, sink: &mut dyn ReportSink) -> EntryChanges {
        let mut changes = EntryChanges::default();
        let reference = entry.reference();

        let hanzi = entry.get(&self.config.ws_hanzi).unwrap_or_default();
        let stored_tonenum = entry.get(&self.config.ws_tonenum).unwrap_or_default();

        let (new_tonenum, warning) = checker::tonenum(&hanzi, &stored_tonenum, &self.index);
        if let Some(message) = warning {
            changes.warnings += 1;
            sink.report(Report::warning(message).with_reference(&reference));
        }
        let tonenum = match new_tonenum {
            Some(value) if value != stored_tonenum => {
                if self.config.update_tonenum {
                    entry.set(&self.config.ws_tonenum, &value);
                    changes.tonenum = true;
                    value
                } else {
                    // The write was withheld, so the display and sort
                    // fields keep deriving from what the store still says.
                    sink.report(
                        Report::info(format!("tonenum would become '{}'", value))
                            .with_reference(&reference),
                    );
                    stored_tonenum
                }
            }
            Some(value) => value,
            None => stored_tonenum,
        };

        // The display and sort fields derive from whatever tonenum now
        // stands, stored or freshly written.
        if !tonenum.contains('|') && !tonenum.contains('[') {
            let rendered = if tonenum.is_empty() {
                String::new()
            } else {
                diacritic::tonenum_to_pinyin(&tonenum)
            };
            let stored_pinyin = entry.get(&self.config.ws_pinyin).unwrap_or_default();
            if rendered != stored_pinyin && self.config.update_pinyin {
                entry.set(&self.config.ws_pinyin, &rendered);
                changes.pinyin = true;
            }
        }

        let stored_sort = entry.get(&self.config.ws_sort).unwrap_or_default();
        let (new_sort, warning) =
            sortkey::calculate_sort_string(&hanzi, &tonenum, &stored_sort, &self.table);
        if let Some(message) = warning {
            changes.warnings += 1;
            sink.report(Report::warning(message).with_reference(&reference));
        }
        if let Some(value) = new_sort {
            if value != stored_sort && self.config.update_sort {
                entry.set(&self.config.ws_sort, &value);
                changes.sort = true;
            }
        }

        changes
    }

    /// Check every entry of a tree in document order.
    pub fn run(&self, root: &mut MemoryEntry, sink: &mut dyn ReportSink) -> BatchSummary {
        let mut summary = BatchSummary::default();
        root.for_each_mut(&mut |entry| {
            let changes = self.check_entry(entry, sink);
            summary.record(&changes);
        });
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanlex_core::{CharRecord, Level, MemorySink};

    fn engine() -> Engine {
        let index = SegmentIndex::from_pairs([
            ("你好", "ni3hao3"),
            ("吗", "ma5"),
            ("枣", "zao3"),
            ("红", "hong2"),
            ("枣红", "zao3hong2"),
            ("红色", "hong2se4"),
            ("色", "se4"),
            ("色", "shai3"),
        ]);

        let mut table = CharTable::new();
        for (hz, pron, strokes, order) in [
            ("你", "ni3", 7, "JB"),
            ("好", "hao3", 6, "KA"),
            ("吗", "ma5", 6, "MC"),
        ] {
            let mut record = CharRecord::new(hz, strokes, order);
            record.add_pronunciation(pron);
            table.insert(record);
        }

        Engine::new(index, table, EngineConfig::default())
    }

    #[test]
    fn test_check_entry_fills_all_fields() {
        let engine = engine();
        let mut entry = MemoryEntry::new("e1").with_field("cmn-Hani", "你好吗");
        let mut sink = MemorySink::new();

        let changes = engine.check_entry(&mut entry, &mut sink);
        assert!(changes.tonenum && changes.pinyin && changes.sort);
        assert_eq!(entry.field("cmn-Latn-x-tn"), Some("ni3hao3 ma5"));
        assert_eq!(entry.field("cmn-Latn-x-py"), Some("nǐhǎo ma"));
        assert_eq!(
            entry.field("cmn-x-sort"),
            Some("ni3@GJB;hao3@FKA;ma5@FMC")
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_check_entry_idempotent() {
        let engine = engine();
        let mut entry = MemoryEntry::new("e1").with_field("cmn-Hani", "你好吗");
        let mut sink = MemorySink::new();

        engine.check_entry(&mut entry, &mut sink);
        let second = engine.check_entry(&mut entry, &mut sink);
        assert!(!second.any());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_ambiguity_reported_with_reference() {
        let engine = engine();
        let mut entry = MemoryEntry::new("e9").with_field("cmn-Hani", "枣红色");
        let mut sink = MemorySink::new();

        let changes = engine.check_entry(&mut entry, &mut sink);
        assert!(!changes.tonenum);
        assert_eq!(entry.field("cmn-Latn-x-tn"), None);
        assert_eq!(sink.count(Level::Warning), 1);
        assert_eq!(sink.reports()[0].reference.as_deref(), Some("e9"));
    }

    #[test]
    fn test_update_switches_hold_writes() {
        let mut config = EngineConfig::default();
        config.update_tonenum = false;
        config.update_pinyin = false;
        config.update_sort = false;
        let base = engine();
        let engine = Engine::new(
            SegmentIndex::from_pairs([("你好", "ni3hao3")]),
            base.table().clone(),
            config,
        );

        let mut entry = MemoryEntry::new("e1").with_field("cmn-Hani", "你好");
        let mut sink = MemorySink::new();
        let changes = engine.check_entry(&mut entry, &mut sink);

        assert!(!changes.any());
        assert_eq!(entry.field("cmn-Latn-x-tn"), None);
        assert_eq!(sink.count(Level::Info), 1);
    }

    #[test]
    fn test_withheld_tonenum_keeps_derived_fields_in_step() {
        let mut config = EngineConfig::default();
        config.update_tonenum = false;
        let base = engine();
        let engine = Engine::new(
            SegmentIndex::from_pairs([("你好", "ni3hao3")]),
            base.table().clone(),
            config,
        );

        // The stored tonenum is wrong, but with its update switched off the
        // display field must follow the stored value, not the computed one.
        let mut entry = MemoryEntry::new("e1")
            .with_field("cmn-Hani", "你好")
            .with_field("cmn-Latn-x-tn", "ni2hao2");
        let mut sink = MemorySink::new();
        let changes = engine.check_entry(&mut entry, &mut sink);

        assert!(!changes.tonenum);
        assert_eq!(entry.field("cmn-Latn-x-tn"), Some("ni2hao2"));
        assert_eq!(entry.field("cmn-Latn-x-py"), Some("níháo"));
        assert_eq!(sink.count(Level::Info), 1);
        // ni2/hao2 are not readings of 你/好, so the sort key reports and
        // stays clear instead of encoding the computed tonenum.
        assert_eq!(sink.count(Level::Warning), 1);
        assert_eq!(entry.field("cmn-x-sort"), None);
    }

    #[test]
    fn test_run_accumulates_summary() {
        let engine = engine();
        let mut root = MemoryEntry::new("root").with_field("cmn-Hani", "你好");
        root.add_child(MemoryEntry::new("c1").with_field("cmn-Hani", "吗"));
        root.add_child(MemoryEntry::new("c2").with_field("cmn-Hani", "枣红色"));
        let mut sink = MemorySink::new();

        let summary = engine.run(&mut root, &mut sink);
        assert_eq!(summary.entries, 3);
        assert_eq!(summary.tonenum_updates, 2);
        assert_eq!(summary.warnings, 1);
        assert_eq!(
            summary.to_string(),
            "3 entries: 2 tonenum, 2 pinyin, 2 sort updates, 1 warnings"
        );
    }
}
