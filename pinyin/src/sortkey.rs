//! Pronunciation-based sort-key generation.
//!
//! Each (character, syllable) pair looks up its key in the character table;
//! the per-character keys join with `;` into the entry's sort string. Bad
//! lookups become bracketed inline fragments so the result stays printable,
//! and `calculate_sort_string` refuses to persist any string carrying one.

use crate::punct;
use crate::tokenizer;
use hanlex_core::CharTable;

/// Ideographic Description Characters that head a composed-ideograph
/// sequence. ⿲ and ⿳ take three components, the rest two.
fn idc_arity(ch: char) -> Option<usize> {
    match ch {
        '⿲' | '⿳' => Some(3),
        '⿰' | '⿱' | '⿴' | '⿵' | '⿶' | '⿷' | '⿸' | '⿹' | '⿺' | '⿻' => Some(2),
        _ => None,
    }
}

/// Split a Hanzi string into logical characters.
///
/// A leading description character consumes its components (which may
/// themselves be description sequences) as one logical character.
///
/// # Example
/// ```
/// use hanlex_pinyin::sortkey::split_logical_chars;
///
/// assert_eq!(split_logical_chars("你好"), vec!["你", "好"]);
/// assert_eq!(split_logical_chars("⿰亻革好"), vec!["⿰亻革", "好"]);
/// ```
pub fn split_logical_chars(hanzi: &str) -> Vec<String> {
    let chars: Vec<char> = hanzi.chars().collect();
    let mut out = Vec::new();
    let mut pos = 0;
    while pos < chars.len() {
        let end = logical_end(&chars, pos);
        out.push(chars[pos..end].iter().collect());
        pos = end;
    }
    out
}

/// Exclusive end of the logical character starting at `pos`. A truncated
/// description sequence extends to the end of the input.
fn logical_end(chars: &[char], pos: usize) -> usize {
    match idc_arity(chars[pos]) {
        Some(arity) => {
            let mut end = pos + 1;
            for _ in 0..arity {
                if end >= chars.len() {
                    break;
                }
                end = logical_end(chars, end);
            }
            end
        }
        None => pos + 1,
    }
}

/// Build the sort string for a Hanzi field and its tone-numbered reading.
///
/// The Hanzi side splits into logical characters, the tonenum side into
/// syllable tokens; the counts must agree. Recognized wide punctuation
/// sorts as itself. Lookup failures come back as bracketed fragments in
/// place of the key; the caller decides whether such a string is usable.
pub fn sort_string(hanzi: &str, tonenum: &str, table: &CharTable) -> String {
    let chars = split_logical_chars(hanzi);
    let tokens = tokenizer::tokenize(tonenum);
    if chars.len() != tokens.len() {
        return "[PY different length]".to_string();
    }

    let mut keys = Vec::with_capacity(chars.len());
    for (hz, token) in chars.iter().zip(tokens.iter()) {
        keys.push(pair_key(hz, token, table));
    }
    keys.join(";")
}

fn pair_key(hz: &str, token: &str, table: &CharTable) -> String {
    let mut glyphs = hz.chars();
    if let (Some(ch), None) = (glyphs.next(), glyphs.next()) {
        if punct::is_wide_punct(ch) {
            return ch.to_string();
        }
    }
    let Some(record) = table.get(hz) else {
        if hz.chars().count() > 1 {
            return format!("[Composed HZ not in DB: {}]", hz);
        }
        return format!("[HZ not in DB: {}]", hz);
    };
    match record.sort_key(token) {
        Some(key) => key,
        None => format!("[PY mismatch: {} not a reading of {}]", token, hz),
    }
}

/// Decide what to store for an entry's sort field.
///
/// Returns `(new_value, warning)`: `Some("")` clears the field when the
/// source data is missing, ambiguous, or broken; `Some(key)` is a fresh
/// value to write; `None` means the stored value is already correct.
pub fn calculate_sort_string(
    hanzi: &str,
    tonenum: &str,
    existing: &str,
    table: &CharTable,
) -> (Option<String>, Option<String>) {
    if hanzi.is_empty() || tonenum.is_empty() {
        return (Some(String::new()), None);
    }
    if tonenum.contains('|') {
        return (
            Some(String::new()),
            Some(format!("[Ambiguous tonenum: {}]", tonenum)),
        );
    }
    let computed = sort_string(hanzi, tonenum, table);
    if computed.contains('[') {
        return (Some(String::new()), Some(computed));
    }
    if computed == existing {
        return (None, None);
    }
    (Some(computed), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanlex_core::CharRecord;

    fn table() -> CharTable {
        let mut table = CharTable::new();

        let mut ni = CharRecord::new("你", 7, "JB");
        ni.add_pronunciation("ni3");
        table.insert(ni);

        let mut hao = CharRecord::new("好", 6, "KA");
        hao.add_pronunciation("hao3");
        hao.add_pronunciation("hao4");
        table.insert(hao);

        let mut composed = CharRecord::new("⿰亻革", 11, "Q");
        composed.add_pronunciation("jie4");
        table.insert(composed);

        table
    }

    #[test]
    fn test_split_logical_chars() {
        assert_eq!(split_logical_chars("你好"), vec!["你", "好"]);
        assert_eq!(split_logical_chars("⿰亻革好"), vec!["⿰亻革", "好"]);
        assert_eq!(split_logical_chars("⿳亠口小"), vec!["⿳亠口小"]);
        // Nested sequence: the outer ⿰ consumes 氵 and the inner ⿱ pair.
        assert_eq!(split_logical_chars("⿰氵⿱艹日好"), vec!["⿰氵⿱艹日", "好"]);
        // Truncated sequence swallows what is there.
        assert_eq!(split_logical_chars("⿰亻"), vec!["⿰亻"]);
    }

    #[test]
    fn test_sort_string_joins_keys() {
        let table = table();
        assert_eq!(sort_string("你好", "ni3hao3", &table), "ni3@GJB;hao3@FKA");
        assert_eq!(sort_string("你好", "ni3 hao3", &table), "ni3@GJB;hao3@FKA");
    }

    #[test]
    fn test_length_mismatch() {
        let table = table();
        let result = sort_string("你好", "ni3", &table);
        assert!(result.contains("[PY different length]"));
    }

    #[test]
    fn test_missing_character_fragments() {
        let table = table();
        assert!(sort_string("猫", "mao1", &table).contains("[HZ not in DB: 猫]"));
        assert!(
            sort_string("⿰山今", "qin1", &table).contains("[Composed HZ not in DB: ⿰山今]")
        );
    }

    #[test]
    fn test_pronunciation_mismatch_fragment() {
        let table = table();
        let result = sort_string("好", "hao1", &table);
        assert!(result.contains("[PY mismatch: hao1"));
    }

    #[test]
    fn test_composed_lookup() {
        let table = table();
        assert_eq!(sort_string("⿰亻革", "jie4", &table), "jie4AAQ");
    }

    #[test]
    fn test_punctuation_sorts_as_itself() {
        let table = table();
        assert_eq!(
            sort_string("你好，好", "ni3hao3，hao3", &table),
            "ni3@GJB;hao3@FKA;，;hao3@FKA"
        );
    }

    #[test]
    fn test_calculate_clears_on_empty_and_ambiguity() {
        let table = table();
        assert_eq!(
            calculate_sort_string("", "hao3", "x", &table),
            (Some(String::new()), None)
        );
        assert_eq!(
            calculate_sort_string("好", "", "x", &table),
            (Some(String::new()), None)
        );

        let (value, warning) = calculate_sort_string("好", "hao3|hao4", "x", &table);
        assert_eq!(value, Some(String::new()));
        assert!(warning.expect("warning").contains("hao3|hao4"));
    }

    #[test]
    fn test_calculate_clears_on_error_fragment() {
        let table = table();
        let (value, warning) = calculate_sort_string("猫", "mao1", "x", &table);
        assert_eq!(value, Some(String::new()));
        assert!(warning.expect("warning").contains("[HZ not in DB"));
    }

    #[test]
    fn test_calculate_no_op_when_current() {
        let table = table();
        let current = sort_string("你好", "ni3hao3", &table);
        assert_eq!(
            calculate_sort_string("你好", "ni3hao3", &current, &table),
            (None, None)
        );

        let (value, _) = calculate_sort_string("你好", "ni3hao3", "stale", &table);
        assert_eq!(value.as_deref(), Some(current.as_str()));
    }
}
