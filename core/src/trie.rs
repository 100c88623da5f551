//! Prefix trie with boundary/prefix tagging for word segmentation.
use ahash::AHashMap;
use std::collections::BTreeSet;

/// Tag carried by every reachable trie position.
///
/// `Boundary` marks the end of a complete dictionary word and holds its
/// tone-numbered pronunciations. `PrefixOnly` marks positions that some
/// longer word merely passes through. The distinction is what lets the
/// segmenter back off from an overlong greedy match without consulting a
/// sentinel value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrieValue {
    Boundary(BTreeSet<String>),
    PrefixOnly,
}

impl TrieValue {
    /// Pronunciation set when this position ends a word.
    pub fn pronunciations(&self) -> Option<&BTreeSet<String>> {
        match self {
            TrieValue::Boundary(prons) => Some(prons),
            TrieValue::PrefixOnly => None,
        }
    }

    pub fn is_boundary(&self) -> bool {
        matches!(self, TrieValue::Boundary(_))
    }
}

#[derive(Debug)]
struct Node {
    children: AHashMap<char, Box<Node>>,
    value: TrieValue,
}

impl Node {
    fn new() -> Self {
        Self {
            children: AHashMap::new(),
            value: TrieValue::PrefixOnly,
        }
    }
}

/// A prefix tree over dictionary words with tagged positions.
///
/// Used by `SegmentIndex` for maximal-match segmentation: from a given
/// position, walk as far as the trie allows and remember the last position
/// tagged `Boundary`.
///
/// # Example
/// ```
/// use hanlex_core::trie::PrefixTrie;
///
/// let mut trie = PrefixTrie::new();
/// trie.insert("你好", "ni3hao3");
///
/// assert!(trie.is_boundary("你好"));
/// assert!(!trie.is_boundary("你"));      // prefix of 你好, not a word
///
/// let input: Vec<char> = "你好吗".chars().collect();
/// assert_eq!(trie.longest_boundary(&input, 0), Some(2));
/// ```
#[derive(Debug)]
pub struct PrefixTrie {
    root: Node,
    words: usize,
}

impl Default for PrefixTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixTrie {
    /// Create a new empty trie.
    pub fn new() -> Self {
        Self {
            root: Node::new(),
            words: 0,
        }
    }

    /// Number of distinct boundary words inserted.
    pub fn len(&self) -> usize {
        self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Insert a word with one of its pronunciations.
    ///
    /// Every strict prefix of the word becomes reachable as `PrefixOnly`
    /// unless it is already a boundary; inserting the same word again merges
    /// the pronunciation into its set.
    pub fn insert(&mut self, word: &str, pron: &str) {
        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node
                .children
                .entry(ch)
                .or_insert_with(|| Box::new(Node::new()));
        }
        match &mut node.value {
            TrieValue::Boundary(prons) => {
                prons.insert(pron.to_string());
            }
            TrieValue::PrefixOnly => {
                let mut prons = BTreeSet::new();
                prons.insert(pron.to_string());
                node.value = TrieValue::Boundary(prons);
                self.words += 1;
            }
        }
    }

    /// Tag at the position reached by walking `key`, if the position exists.
    ///
    /// The empty key names the root, which carries no tag.
    pub fn value(&self, key: &str) -> Option<&TrieValue> {
        if key.is_empty() {
            return None;
        }
        let mut node = &self.root;
        for ch in key.chars() {
            node = node.children.get(&ch)?;
        }
        Some(&node.value)
    }

    /// Whether `key` is a complete dictionary word.
    pub fn is_boundary(&self, key: &str) -> bool {
        self.value(key).map(|v| v.is_boundary()).unwrap_or(false)
    }

    /// Pronunciation set of a complete dictionary word.
    pub fn pronunciations(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.value(key).and_then(|v| v.pronunciations())
    }

    /// Walk the trie from a position in `input` and return every reachable
    /// step with its tag.
    ///
    /// # Arguments
    /// * `input` - The full input as a character slice
    /// * `start` - The character index to start walking from
    ///
    /// # Returns
    /// Vector of `(end_index, tag)` tuples where `end_index` is the
    /// exclusive character index after the step. Results are in order of
    /// increasing length.
    ///
    /// # Example
    /// ```
    /// use hanlex_core::trie::PrefixTrie;
    ///
    /// let mut trie = PrefixTrie::new();
    /// trie.insert("中国", "zhong1guo2");
    ///
    /// let input: Vec<char> = "中国人".chars().collect();
    /// let steps = trie.walk(&input, 0);
    /// assert_eq!(steps.len(), 2);                // 中 then 中国; 人 is unreachable
    /// assert!(!steps[0].1.is_boundary());
    /// assert!(steps[1].1.is_boundary());
    /// ```
    pub fn walk(&self, input: &[char], start: usize) -> Vec<(usize, &TrieValue)> {
        let mut res = Vec::new();
        let mut node = &self.root;
        let mut idx = start;
        while idx < input.len() {
            let ch = input[idx];
            if let Some(child) = node.children.get(&ch) {
                node = child;
                idx += 1;
                res.push((idx, &node.value));
            } else {
                break;
            }
        }
        res
    }

    /// End position of the longest boundary word starting at `start`, or
    /// `None` when no dictionary word starts there.
    pub fn longest_boundary(&self, input: &[char], start: usize) -> Option<usize> {
        let mut best = None;
        for (end, value) in self.walk(input, start) {
            if value.is_boundary() {
                best = Some(end);
            }
        }
        best
    }
}
