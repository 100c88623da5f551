//! Pinyin consistency checking against the segmentation index.
//!
//! Given a Hanzi field and the tone-numbered field stored next to it, the
//! checker segments the Hanzi in both directions, renders the pronunciation
//! each partition implies, and decides whether the stored value needs an
//! update. All failure modes come back as strings; nothing here panics on
//! data.

use crate::punct;
use hanlex_core::utils;
use hanlex_core::SegmentIndex;

/// One unit of a rendered partition.
#[derive(Debug, Clone)]
enum Unit {
    /// A dictionary segment with its known pronunciations, sorted.
    Segment(Vec<String>),
    /// A recognized punctuation glyph, passed through without spacing.
    Punct(char),
    /// A bracketed inline problem fragment.
    Problem(String),
}

/// Check a Hanzi string against its stored tone-numbered field.
///
/// Returns `(new_value, warning)`:
/// - `(Some(value), None)` — the stored field should become `value`;
/// - `(None, None)` — the stored field is already acceptable;
/// - `(None, Some(message))` — a problem to report, nothing written.
///
/// An empty `hanzi` clears a leftover tonenum and is otherwise a no-op.
///
/// # Example
/// ```
/// use hanlex_core::SegmentIndex;
/// use hanlex_pinyin::checker::tonenum;
///
/// let mut index = SegmentIndex::new();
/// index.insert("你好", "ni3hao3");
/// index.insert("吗", "ma5");
///
/// let (value, warning) = tonenum("你好吗", "", &index);
/// assert_eq!(value.as_deref(), Some("ni3hao3 ma5"));
/// assert_eq!(warning, None);
/// ```
pub fn tonenum(
    hanzi: &str,
    existing: &str,
    index: &SegmentIndex,
) -> (Option<String>, Option<String>) {
    if hanzi.is_empty() {
        if existing.is_empty() {
            return (None, None);
        }
        return (Some(String::new()), None);
    }

    let chars: Vec<char> = hanzi.chars().collect();
    let forward = index.match_all_ends(hanzi);
    let backward = index.match_all_starts(hanzi);

    if forward == backward {
        let units = render_units(&chars, &forward, index);
        let joined = join_units(&units);
        if joined.contains('[') {
            return (None, Some(joined));
        }
        if consistent(existing, &joined, &units) {
            return (None, None);
        }
        return (Some(joined), None);
    }

    // The two scan directions disagree. Render both partitions and let the
    // user choose; an existing value matching either one stands.
    let fwd_units = render_units(&chars, &forward, index);
    let bwd_units = render_units(&chars, &backward, index);
    let fwd = join_units(&fwd_units);
    let bwd = join_units(&bwd_units);
    if !fwd.contains('[') && consistent(existing, &fwd, &fwd_units) {
        return (None, None);
    }
    if !bwd.contains('[') && consistent(existing, &bwd, &bwd_units) {
        return (None, None);
    }
    (
        None,
        Some(format!("[Ambiguous segmentation: {} or {}]", fwd, bwd)),
    )
}

/// Turn one partition into its unit list.
fn render_units(chars: &[char], cuts: &[usize], index: &SegmentIndex) -> Vec<Unit> {
    let mut units = Vec::new();
    for pair in cuts.windows(2) {
        let segment: String = chars[pair[0]..pair[1]].iter().collect();
        if let Some(prons) = index.values(&segment) {
            units.push(Unit::Segment(prons.iter().cloned().collect()));
            continue;
        }
        // `cover` advances one character at a time past anything the
        // dictionary misses, so a non-word segment is exactly one char and
        // inspecting its first character covers it.
        debug_assert_eq!(pair[1] - pair[0], 1, "non-word segment longer than one char");
        let ch = chars[pair[0]];
        if let Some(wide) = punct::PROBLEM_SUGGESTIONS.get(&ch) {
            units.push(Unit::Problem(format!(
                "[Unsupported character '{}'; use Chinese punctuation '{}']",
                ch, wide
            )));
        } else if punct::is_wide_punct(ch) {
            units.push(Unit::Punct(ch));
        } else {
            units.push(Unit::Problem(format!("[Unsupported character '{}']", ch)));
        }
    }
    units
}

/// Join units with spaces, except that punctuation glues to both sides.
fn join_units(units: &[Unit]) -> String {
    let mut out = String::new();
    let mut prev_punct = true; // no leading space
    for unit in units {
        let (text, is_punct) = match unit {
            Unit::Segment(prons) => (prons.join("|"), false),
            Unit::Punct(ch) => (ch.to_string(), true),
            Unit::Problem(msg) => (msg.clone(), false),
        };
        if !out.is_empty() && !prev_punct && !is_punct {
            out.push(' ');
        }
        out.push_str(&text);
        prev_punct = is_punct;
    }
    out
}

/// Whether the stored value is an acceptable reading of the partition.
///
/// Either it equals the rendered alternation outright, or it carries one
/// unit per segment and each unit is among that segment's known
/// pronunciations, compared case-insensitively. A stored value that
/// respells a multi-syllable segment as separate units changes the segment
/// count and is not accepted.
fn consistent(existing: &str, joined: &str, units: &[Unit]) -> bool {
    if existing.is_empty() {
        return false;
    }
    if existing == joined {
        return true;
    }
    let stored = split_stored_units(existing);
    if stored.len() != units.len() {
        return false;
    }
    stored.iter().zip(units).all(|(unit, expected)| match expected {
        Unit::Segment(prons) => {
            let folded = utils::tone_fold(unit);
            prons.iter().any(|p| utils::tone_fold(p) == folded)
                || folded == fold_alternation(prons)
        }
        Unit::Punct(ch) => *unit == ch.to_string(),
        Unit::Problem(_) => false,
    })
}

/// Case-folded `|`-join of a segment's pronunciation set, so a stored unit
/// may also keep the full alternation verbatim.
fn fold_alternation(prons: &[String]) -> String {
    prons
        .iter()
        .map(|p| utils::tone_fold(p))
        .collect::<Vec<_>>()
        .join("|")
}

/// Split a stored tonenum into units: whitespace separates, and a wide
/// punctuation glyph is its own unit even when glued to a syllable.
fn split_stored_units(existing: &str) -> Vec<String> {
    let mut units = Vec::new();
    let mut current = String::new();
    for ch in existing.chars() {
        if ch.is_whitespace() {
            if !current.is_empty() {
                units.push(std::mem::take(&mut current));
            }
        } else if punct::is_wide_punct(ch) {
            if !current.is_empty() {
                units.push(std::mem::take(&mut current));
            }
            units.push(ch.to_string());
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        units.push(current);
    }
    units
}
