//! Tone-number to diacritic Pinyin rendering.
//!
//! `zhong1` becomes `zhōng`: a fixed table maps (vowel, tone) to the
//! marked letter, and a single nucleus regex decides which letter of each
//! syllable carries the mark. Total function; callers must reject strings
//! still carrying ambiguity (`|`) or inline error fragments (`[`).

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

/// Tone marks for every letter that can head a syllable nucleus, tones 1-4.
/// Tone 5 is the neutral tone and stays unmarked.
static TONE_MARKS: Lazy<HashMap<(char, u32), &'static str>> = Lazy::new(|| {
    let rows: &[(char, [&'static str; 4])] = &[
        ('a', ["ā", "á", "ǎ", "à"]),
        ('A', ["Ā", "Á", "Ǎ", "À"]),
        ('e', ["ē", "é", "ě", "è"]),
        ('E', ["Ē", "É", "Ě", "È"]),
        ('i', ["ī", "í", "ǐ", "ì"]),
        ('I', ["Ī", "Í", "Ǐ", "Ì"]),
        ('o', ["ō", "ó", "ǒ", "ò"]),
        ('O', ["Ō", "Ó", "Ǒ", "Ò"]),
        ('u', ["ū", "ú", "ǔ", "ù"]),
        ('U', ["Ū", "Ú", "Ǔ", "Ù"]),
        ('ü', ["ǖ", "ǘ", "ǚ", "ǜ"]),
        ('Ü', ["Ǖ", "Ǘ", "Ǚ", "Ǜ"]),
        // ê has precomposed forms for tones 2 and 4 only.
        ('ê', ["ê\u{304}", "ế", "ê\u{30C}", "ề"]),
        ('Ê', ["Ê\u{304}", "Ế", "Ê\u{30C}", "Ề"]),
        // Syllabic m and n.
        ('m', ["m\u{304}", "\u{1E3F}", "m\u{30C}", "m\u{300}"]),
        ('M', ["M\u{304}", "\u{1E3E}", "M\u{30C}", "M\u{300}"]),
        ('n', ["n\u{304}", "ń", "ň", "ǹ"]),
        ('N', ["N\u{304}", "Ń", "Ň", "Ǹ"]),
    ];
    let mut m = HashMap::new();
    for (letter, marks) in rows {
        for (i, mark) in marks.iter().enumerate() {
            m.insert((*letter, i as u32 + 1), *mark);
        }
    }
    m
});

/// Apostrophe before a vowel-initial syllable that follows a tone digit,
/// so `xi1an1` renders as `xī'ān` rather than `xīān`.
static SYLLABLE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"([1-5])([aeoAEO])").unwrap());

/// Syllable nucleus followed by its tone digit. Each alternative starts at
/// the letter that carries the mark, so the head of the match is always
/// the one to replace: `a` and `e` outrank everything, `o` wins in `ou`,
/// and otherwise the last vowel of the cluster carries the tone.
static NUCLEUS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"([aA][iIoOuU]?[nNgGrR]*|[eE][iI]?[nNgGrR]*|[oO][uU]?[nNgGrR]*|[êÊ]|[iIuUüÜ][nNgGrR]*|[mM]|[nN][gG]?)([1-5])",
    )
    .unwrap()
});

/// Render a tone-numbered string as diacritic Pinyin.
///
/// # Example
/// ```
/// use hanlex_pinyin::diacritic::tonenum_to_pinyin;
///
/// assert_eq!(tonenum_to_pinyin("zhong1guo2"), "zhōngguó");
/// assert_eq!(tonenum_to_pinyin("lu:4"), "lǜ");
/// assert_eq!(tonenum_to_pinyin("xi1an1"), "xī'ān");
/// ```
pub fn tonenum_to_pinyin(s: &str) -> String {
    let mut text = SYLLABLE_BREAK.replace_all(s, "$1'$2").into_owned();
    // ü written with the colon convention; ue: carries the colon after
    // the e.
    text = text.replace("ue:", "üe").replace("Ue:", "Üe");
    text = text.replace("u:", "ü").replace("U:", "Ü");
    text = text.replace("e^", "ê").replace("E^", "Ê");

    NUCLEUS
        .replace_all(&text, |caps: &Captures| {
            let cluster = &caps[1];
            let tone: u32 = caps[2].parse().unwrap_or(5);
            if tone == 5 {
                return cluster.to_string();
            }
            let mut chars = cluster.chars();
            match chars.next().and_then(|head| TONE_MARKS.get(&(head, tone))) {
                Some(mark) => format!("{}{}", mark, chars.as_str()),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
