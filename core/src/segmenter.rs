//! Bidirectional maximal-match word segmentation.
//!
//! `SegmentIndex` holds two tagged tries over the same word list: one keyed
//! by the words as written, one by the words reversed. Scanning greedily
//! left-to-right and right-to-left gives two partitions of the input; when
//! they agree the segmentation is unambiguous, and when they differ the
//! caller must surface the ambiguity rather than pick a side.

use crate::trie::PrefixTrie;
use crate::worddict::WordDict;
use std::collections::BTreeSet;

/// Maximal-match segmentation index over a word dictionary.
///
/// Positions are character indices, never byte offsets; callers index into
/// a `Vec<char>` of the input.
///
/// # Example
/// ```
/// use hanlex_core::SegmentIndex;
///
/// let mut index = SegmentIndex::new();
/// index.insert("你好", "ni3hao3");
/// index.insert("吗", "ma5");
///
/// assert_eq!(index.match_all_ends("你好吗"), vec![0, 2, 3]);
/// assert_eq!(index.match_all_starts("你好吗"), vec![0, 2, 3]);
/// ```
#[derive(Debug, Default)]
pub struct SegmentIndex {
    forward: PrefixTrie,
    backward: PrefixTrie,
}

impl SegmentIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            forward: PrefixTrie::new(),
            backward: PrefixTrie::new(),
        }
    }

    /// Build an index from (word, pronunciation) pairs.
    pub fn from_pairs<I, W, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (W, P)>,
        W: AsRef<str>,
        P: AsRef<str>,
    {
        let mut index = Self::new();
        for (word, pron) in pairs {
            index.insert(word.as_ref(), pron.as_ref());
        }
        index
    }

    /// Build an index over every (word, pronunciation) pair of a loaded
    /// word dictionary.
    pub fn from_dict(dict: &WordDict) -> Self {
        let mut index = Self::new();
        for (word, prons) in dict.entries() {
            for pron in prons {
                index.insert(word, pron);
            }
        }
        index
    }

    /// Register one word with one of its pronunciations.
    pub fn insert(&mut self, word: &str, pron: &str) {
        self.forward.insert(word, pron);
        let reversed: String = word.chars().rev().collect();
        self.backward.insert(&reversed, pron);
    }

    /// Number of distinct words in the index.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// End position of the longest dictionary word starting at `start`,
    /// or `None` when no word starts there.
    pub fn match_end(&self, chars: &[char], start: usize) -> Option<usize> {
        self.forward.longest_boundary(chars, start)
    }

    /// Start position of the longest dictionary word ending exactly at
    /// `end`, or `None` when no word ends there.
    pub fn match_start(&self, chars: &[char], end: usize) -> Option<usize> {
        let reversed: Vec<char> = chars[..end].iter().rev().copied().collect();
        self.backward
            .longest_boundary(&reversed, 0)
            .map(|n| end - n)
    }

    /// Left-to-right greedy partition of `input`.
    ///
    /// Returns a strictly increasing list of cut positions from 0 to the
    /// character length of `input`. Characters no dictionary word covers
    /// advance the scan by one, so the partition is total for any input.
    pub fn match_all_ends(&self, input: &str) -> Vec<usize> {
        let chars: Vec<char> = input.chars().collect();
        cover(&self.forward, &chars)
    }

    /// Right-to-left greedy partition of `input`, reported as ascending cut
    /// positions like `match_all_ends`.
    pub fn match_all_starts(&self, input: &str) -> Vec<usize> {
        let chars: Vec<char> = input.chars().collect();
        let reversed: Vec<char> = chars.iter().rev().copied().collect();
        let mut cuts: Vec<usize> = cover(&self.backward, &reversed)
            .into_iter()
            .map(|p| chars.len() - p)
            .collect();
        cuts.reverse();
        cuts
    }

    /// Pronunciation set of a dictionary word, or `None` when the segment
    /// is not a word.
    pub fn values(&self, segment: &str) -> Option<&BTreeSet<String>> {
        self.forward.pronunciations(segment)
    }
}

/// Greedy cover of `chars` by longest boundary matches, one position at a
/// time when nothing matches.
fn cover(trie: &PrefixTrie, chars: &[char]) -> Vec<usize> {
    let mut cuts = vec![0];
    let mut pos = 0;
    while pos < chars.len() {
        let next = trie.longest_boundary(chars, pos).unwrap_or(pos + 1);
        cuts.push(next);
        pos = next;
    }
    cuts
}
