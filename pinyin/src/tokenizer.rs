//! Tone-numbered syllable tokenizer.
//!
//! Splits a tone-numbered Pinyin string into syllable and punctuation
//! tokens. The alternation order matters: ellipsis first, then recognized
//! punctuation, then the structural `//` marker, then letter-run syllables,
//! then bare person-marking digits. Anything else is skipped; free text is
//! allowed to contain characters outside the grammar.

use crate::punct;
use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"…|\.\.\.|[,;?，；？]|//|[a-zA-Z:]+[1-5]|[1-3]").unwrap());

/// Tokenize a tone-numbered string, silently skipping unrecognized
/// characters.
///
/// `(r)` optional-retroflex markers are removed before matching, and a
/// fused retroflex syllable is split into its base plus a synthesized
/// `er2`.
///
/// # Example
/// ```
/// use hanlex_pinyin::tokenizer::tokenize;
///
/// assert_eq!(tokenize("nar3"), vec!["na3", "er2"]);
/// assert_eq!(tokenize("er4tong1"), vec!["er4", "tong1"]);
/// assert_eq!(tokenize("ni3,hao3"), vec!["ni3", "，", "hao3"]);
/// ```
pub fn tokenize(s: &str) -> Vec<String> {
    let cleaned = s.replace("(r)", "");
    let mut tokens = Vec::new();
    for m in TOKEN_RE.find_iter(&cleaned) {
        push_token(m.as_str(), &mut tokens);
    }
    tokens
}

/// Strict tokenizer variant: returns the tokens plus every non-whitespace
/// span the grammar skipped, so callers can surface them instead of losing
/// them.
pub fn tokenize_strict(s: &str) -> (Vec<String>, Vec<String>) {
    let cleaned = s.replace("(r)", "");
    let mut tokens = Vec::new();
    let mut skipped = Vec::new();
    let mut last = 0;
    for m in TOKEN_RE.find_iter(&cleaned) {
        record_skip(&cleaned[last..m.start()], &mut skipped);
        push_token(m.as_str(), &mut tokens);
        last = m.end();
    }
    record_skip(&cleaned[last..], &mut skipped);
    (tokens, skipped)
}

fn record_skip(gap: &str, skipped: &mut Vec<String>) {
    for piece in gap.split_whitespace() {
        skipped.push(piece.to_string());
    }
}

fn push_token(tok: &str, out: &mut Vec<String>) {
    if tok == "…" || tok == "..." {
        out.push("…".to_string());
        return;
    }
    if tok == "//" {
        // Structural morpheme boundary, not a syllable.
        return;
    }
    let mut chars = tok.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        match punct::CANONICAL.get(&ch) {
            Some(wide) => out.push((*wide).to_string()),
            // Bare digit: person marking in glosses.
            None => out.push(tok.to_string()),
        }
        return;
    }
    push_syllable(tok, out);
}

/// Split a fused retroflex syllable into base + `er2`.
///
/// The split applies when the letter body ends in `r` preceded by at least
/// two letters; a bare `er` syllable is left alone. The variant with the
/// ü-colon written after the `r` (`nur:3`) restores the colon to the base.
fn push_syllable(tok: &str, out: &mut Vec<String>) {
    if tok.len() > 3 {
        let (body, tone) = tok.split_at(tok.len() - 1);
        if let Some(stem) = body.strip_suffix("r:") {
            if stem.len() >= 2 {
                out.push(format!("{}:{}", stem, tone));
                out.push("er2".to_string());
                return;
            }
        } else if let Some(stem) = body.strip_suffix('r') {
            if stem.len() >= 2 {
                out.push(format!("{}{}", stem, tone));
                out.push("er2".to_string());
                return;
            }
        }
    }
    out.push(tok.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_syllables() {
        assert_eq!(tokenize("zhong1guo2"), vec!["zhong1", "guo2"]);
        assert_eq!(tokenize("ni3 hao3"), vec!["ni3", "hao3"]);
        assert_eq!(tokenize("Zhong1guo2"), vec!["Zhong1", "guo2"]);
    }

    #[test]
    fn test_retroflex_split() {
        assert_eq!(tokenize("nar3"), vec!["na3", "er2"]);
        assert_eq!(tokenize("hair2"), vec!["hai2", "er2"]);
        assert_eq!(tokenize("wanr2"), vec!["wan2", "er2"]);
    }

    #[test]
    fn test_er_syllable_not_split() {
        assert_eq!(tokenize("er4tong1"), vec!["er4", "tong1"]);
        assert_eq!(tokenize("er2"), vec!["er2"]);
    }

    #[test]
    fn test_retroflex_with_umlaut_colon() {
        assert_eq!(tokenize("nur:3"), vec!["nu:3", "er2"]);
        // Colon before the r needs no special casing.
        assert_eq!(tokenize("nu:r3"), vec!["nu:3", "er2"]);
    }

    #[test]
    fn test_optional_retroflex_marker_removed() {
        assert_eq!(tokenize("zhe4(r)"), vec!["zhe4"]);
        assert_eq!(tokenize("wan2(r)le5"), vec!["wan2", "le5"]);
    }

    #[test]
    fn test_punctuation_canonicalized() {
        assert_eq!(tokenize("ni3,hao3"), vec!["ni3", "，", "hao3"]);
        assert_eq!(tokenize("hao3;le5?"), vec!["hao3", "；", "le5", "？"]);
        assert_eq!(tokenize("hao3，le5"), vec!["hao3", "，", "le5"]);
    }

    #[test]
    fn test_ellipsis_forms() {
        assert_eq!(tokenize("deng3..."), vec!["deng3", "…"]);
        assert_eq!(tokenize("deng3…"), vec!["deng3", "…"]);
    }

    #[test]
    fn test_double_slash_discarded() {
        assert_eq!(tokenize("wo3//men5"), vec!["wo3", "men5"]);
    }

    #[test]
    fn test_bare_person_digits() {
        assert_eq!(tokenize("1dan1"), vec!["1", "dan1"]);
        // 4 and 5 are tone digits only, never standalone tokens.
        assert_eq!(tokenize("4"), Vec::<String>::new());
    }

    #[test]
    fn test_lossy_skip_and_strict_report() {
        assert_eq!(tokenize("x@y zhong1"), vec!["zhong1"]);

        let (tokens, skipped) = tokenize_strict("x@y zhong1");
        assert_eq!(tokens, vec!["zhong1"]);
        assert_eq!(skipped, vec!["x@y"]);

        let (tokens, skipped) = tokenize_strict("ni3 hao3");
        assert_eq!(tokens, vec!["ni3", "hao3"]);
        assert!(skipped.is_empty());
    }
}
