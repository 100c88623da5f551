//! Full batch runs over in-memory entry trees.

#[cfg(test)]
mod tests {
    use hanlex_core::{
        CharRecord, CharTable, Config, Level, MemoryEntry, MemorySink, SegmentIndex, WordDict,
    };
    use hanlex_pinyin::{Engine, EngineConfig};

    const WORD_LIST: &str = "\
你\tni3
你好\tni3hao3
吗\tma5
枣\tzao3
红\thong2
色\tse4|shai3
枣红\tzao3hong2
红色\thong2se4
";

    fn engine() -> Engine {
        let dict = WordDict::from_text(WORD_LIST, &Config::default());
        let index = SegmentIndex::from_dict(&dict);

        let mut table = CharTable::new();
        for (hz, prons, strokes, order) in [
            ("你", &["ni3"][..], 7, "JB"),
            ("好", &["hao3"][..], 6, "KA"),
            ("吗", &["ma5"][..], 6, "MC"),
            ("枣", &["zao3"][..], 8, "PA"),
            ("红", &["hong2"][..], 6, "RB"),
            ("色", &["se4", "shai3"][..], 6, "QC"),
        ] {
            let mut record = CharRecord::new(hz, strokes, order);
            for pron in prons {
                record.add_pronunciation(pron);
            }
            table.insert(record);
        }

        Engine::new(index, table, EngineConfig::default())
    }

    fn tree() -> MemoryEntry {
        let mut root = MemoryEntry::new("root").with_field("cmn-Hani", "你好");
        let mut sub = MemoryEntry::new("sub").with_field("cmn-Hani", "吗");
        sub.add_child(
            MemoryEntry::new("sub-1")
                .with_field("cmn-Hani", "你好吗")
                .with_field("cmn-Latn-x-tn", "ni3hao3 ma5"),
        );
        root.add_child(sub);
        root.add_child(MemoryEntry::new("amb").with_field("cmn-Hani", "枣红色"));
        root
    }

    #[test]
    fn test_batch_fills_and_counts() {
        let engine = engine();
        let mut root = tree();
        let mut sink = MemorySink::new();

        let summary = engine.run(&mut root, &mut sink);
        assert_eq!(summary.entries, 4);
        // root and sub get a fresh tonenum; sub-1 already had the right one;
        // amb is ambiguous and stays untouched.
        assert_eq!(summary.tonenum_updates, 2);
        assert_eq!(summary.pinyin_updates, 3);
        assert_eq!(summary.sort_updates, 3);
        assert_eq!(summary.warnings, 1);
        assert_eq!(sink.count(Level::Warning), 1);
    }

    #[test]
    fn test_batch_writes_through_the_tree() {
        let engine = engine();
        let mut root = tree();
        let mut sink = MemorySink::new();
        engine.run(&mut root, &mut sink);

        assert_eq!(root.field("cmn-Latn-x-tn"), Some("ni3hao3"));
        assert_eq!(root.field("cmn-Latn-x-py"), Some("nǐhǎo"));
        assert_eq!(root.field("cmn-x-sort"), Some("ni3@GJB;hao3@FKA"));

        let sub = &root.children()[0];
        assert_eq!(sub.field("cmn-Latn-x-tn"), Some("ma5"));
        let sub1 = &sub.children()[0];
        assert_eq!(sub1.field("cmn-Latn-x-tn"), Some("ni3hao3 ma5"));
        assert_eq!(sub1.field("cmn-x-sort"), Some("ni3@GJB;hao3@FKA;ma5@FMC"));

        let amb = &root.children()[1];
        assert_eq!(amb.field("cmn-Latn-x-tn"), None);
        assert_eq!(amb.field("cmn-x-sort"), None);
    }

    #[test]
    fn test_second_run_is_a_no_op() {
        let engine = engine();
        let mut root = tree();
        let mut sink = MemorySink::new();
        engine.run(&mut root, &mut sink);

        let mut sink = MemorySink::new();
        let summary = engine.run(&mut root, &mut sink);
        assert_eq!(summary.entries, 4);
        assert_eq!(summary.tonenum_updates, 0);
        assert_eq!(summary.pinyin_updates, 0);
        assert_eq!(summary.sort_updates, 0);
        // The ambiguity is still worth a warning on every run.
        assert_eq!(summary.warnings, 1);
    }

    #[test]
    fn test_deleted_hanzi_clears_derived_fields() {
        let engine = engine();
        let mut entry = MemoryEntry::new("gone")
            .with_field("cmn-Hani", "")
            .with_field("cmn-Latn-x-tn", "ni3hao3")
            .with_field("cmn-x-sort", "ni3@GJB;hao3@FKA");
        let mut sink = MemorySink::new();

        let changes = engine.check_entry(&mut entry, &mut sink);
        assert!(changes.tonenum && changes.sort);
        assert_eq!(entry.field("cmn-Latn-x-tn"), Some(""));
        assert_eq!(entry.field("cmn-x-sort"), Some(""));
        assert!(sink.is_empty());
    }
}
