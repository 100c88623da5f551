//! Punctuation tables shared by the tokenizer, checker, and sort-key
//! generator.

/// Tokenizer canonicalization: ASCII punctuation recognized inside
/// tone-numbered strings maps to its fullwidth glyph; fullwidth input maps
/// to itself.
pub static CANONICAL: phf::Map<char, &'static str> = phf::phf_map! {
    ',' => "，",
    ';' => "；",
    '?' => "？",
    '，' => "，",
    '；' => "；",
    '？' => "？",
};

/// Fullwidth/Chinese punctuation accepted as one-character segments.
/// These pass through the checker unchanged and map to themselves as sort
/// entries.
pub static WIDE_PUNCT: phf::Set<char> = phf::phf_set! {
    '。', '，', '、', '；', '：', '？', '！',
    '（', '）', '《', '》', '〈', '〉',
    '「', '」', '『', '』', '【', '】',
    '“', '”', '‘', '’', '·', '—', '～', '…', '　',
};

/// Narrow characters that show up in Hanzi fields by mistake, with the
/// replacement to suggest. Checked before the wide set, so a lone ellipsis
/// is flagged rather than passed through.
pub static PROBLEM_SUGGESTIONS: phf::Map<char, &'static str> = phf::phf_map! {
    '…' => "……",
    '(' => "（",
    ')' => "）",
    '[' => "［",
    ']' => "］",
    ';' => "；",
    '.' => "。",
    ' ' => "　",
    '-' => "－",
};

/// Whether `ch` is accepted as a one-character punctuation segment.
pub fn is_wide_punct(ch: char) -> bool {
    WIDE_PUNCT.contains(&ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_targets_are_wide() {
        for wide in CANONICAL.values() {
            let ch = wide.chars().next().unwrap();
            assert!(is_wide_punct(ch), "{} missing from wide set", ch);
        }
    }

    #[test]
    fn test_problem_set_matches_known_offenders() {
        for ch in ['…', '(', ')', '[', ']', ';', '.', ' ', '-'] {
            assert!(PROBLEM_SUGGESTIONS.contains_key(&ch));
        }
        assert!(!PROBLEM_SUGGESTIONS.contains_key(&'，'));
    }
}
