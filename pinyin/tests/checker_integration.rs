//! Checker behavior over a realistic word list.

#[cfg(test)]
mod tests {
    use hanlex_core::{Config, SegmentIndex, WordDict};
    use hanlex_pinyin::checker::tonenum;

    const WORD_LIST: &str = "\
你\tni3
你好\tni3hao3
好\thao3|hao4
吗\tma5
中\tzhong1
中国\tZhong1guo2
国\tguo2
人\tren2
中国人\tZhong1guo2ren2
枣\tzao3
红\thong2
色\tse4|shai3
枣红\tzao3hong2
红色\thong2se4
这里\tzhe4li3(r)
花（儿）\thuar1
";

    fn index() -> SegmentIndex {
        let dict = WordDict::from_text(WORD_LIST, &Config::default());
        SegmentIndex::from_dict(&dict)
    }

    #[test]
    fn test_fresh_entry_gets_computed_tonenum() {
        let index = index();
        assert_eq!(
            tonenum("你好吗", "", &index),
            (Some("ni3hao3 ma5".to_string()), None)
        );
    }

    #[test]
    fn test_multi_reading_segment_joined_with_bar() {
        let index = index();
        let (value, warning) = tonenum("好", "", &index);
        assert_eq!(value.as_deref(), Some("hao3|hao4"));
        assert_eq!(warning, None);
    }

    #[test]
    fn test_stored_choice_among_alternatives_is_accepted() {
        let index = index();
        assert_eq!(tonenum("好", "hao4", &index), (None, None));
        assert_eq!(tonenum("好吗", "hao3 ma5", &index), (None, None));
        assert_eq!(tonenum("好吗", "hao4 ma5", &index), (None, None));
        // A unit may also keep the whole alternation, case aside.
        assert_eq!(tonenum("好吗", "Hao3|Hao4 ma5", &index), (None, None));
    }

    #[test]
    fn test_inconsistent_stored_value_is_replaced() {
        let index = index();
        let (value, warning) = tonenum("好吗", "hao2 ma5", &index);
        assert_eq!(value.as_deref(), Some("hao3|hao4 ma5"));
        assert_eq!(warning, None);
    }

    /// 枣红色 parses as 枣红+色 forward and 枣+红色 backward; the checker
    /// must present both, never pick one.
    #[test]
    fn test_ambiguity_surfaced_with_both_parses() {
        let index = index();
        let (value, warning) = tonenum("枣红色", "", &index);
        assert_eq!(value, None);
        let warning = warning.expect("ambiguity message");
        assert!(warning.contains("zao3hong2 se4|shai3"));
        assert!(warning.contains("zao3 hong2se4"));
        assert!(warning.contains(" or "));
    }

    #[test]
    fn test_ambiguity_with_matching_stored_value_is_quiet() {
        let index = index();
        assert_eq!(tonenum("枣红色", "zao3hong2 shai3", &index), (None, None));
        assert_eq!(tonenum("枣红色", "zao3 hong2se4", &index), (None, None));
    }

    #[test]
    fn test_erhua_entries_usable_for_segmentation() {
        let index = index();
        assert_eq!(tonenum("花儿", "", &index), (Some("huar1".to_string()), None));
        assert_eq!(tonenum("花", "", &index), (Some("hua1".to_string()), None));
    }

    #[test]
    fn test_never_panics_on_junk() {
        let index = index();
        for input in ["\u{0}", "𠀀𠀁", "a b c", "１２３", "（）"] {
            let (_, _) = tonenum(input, "whatever", &index);
        }
    }

    #[test]
    fn test_narrow_punctuation_prompts_fullwidth() {
        let index = index();
        let (value, warning) = tonenum("中国.", "", &index);
        assert_eq!(value, None);
        let warning = warning.expect("problem fragment");
        assert!(warning.contains("'。'"));
    }
}
