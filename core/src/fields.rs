//! Lexical entry field access.
//!
//! The surrounding application stores lexical entries with one string field
//! per writing system. `FieldCursor` is the narrow seam the checks work
//! through; hosts adapt their own entry objects to it. `MemoryEntry` is the
//! in-memory implementation used by the CLI and by tests.

use ahash::AHashMap;

/// Read/write access to one lexical entry, keyed by writing-system tag
/// (for example `cmn-Hani` or `cmn-Latn-x-tn`).
pub trait FieldCursor {
    /// Field value for the given writing system, if the entry has one.
    fn get(&self, ws: &str) -> Option<String>;

    /// Overwrite the field for the given writing system.
    fn set(&mut self, ws: &str, value: &str);

    /// Opaque locator for reports about this entry.
    fn reference(&self) -> String;
}

/// In-memory lexical entry with optional subentries.
#[derive(Debug, Clone, Default)]
pub struct MemoryEntry {
    id: String,
    fields: AHashMap<String, String>,
    children: Vec<MemoryEntry>,
}

impl MemoryEntry {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
            fields: AHashMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style field assignment.
    ///
    /// # Example
    /// ```
    /// use hanlex_core::MemoryEntry;
    ///
    /// let entry = MemoryEntry::new("e1").with_field("cmn-Hani", "你好");
    /// assert_eq!(entry.field("cmn-Hani"), Some("你好"));
    /// ```
    pub fn with_field<W: Into<String>, V: Into<String>>(mut self, ws: W, value: V) -> Self {
        self.fields.insert(ws.into(), value.into());
        self
    }

    pub fn field(&self, ws: &str) -> Option<&str> {
        self.fields.get(ws).map(|s| s.as_str())
    }

    pub fn add_child(&mut self, child: MemoryEntry) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[MemoryEntry] {
        &self.children
    }

    /// Depth-first iterator over this entry and all subentries, in document
    /// order. Lazy: entries are yielded as the caller advances, off an
    /// explicit stack rather than the call stack.
    ///
    /// # Example
    /// ```
    /// use hanlex_core::MemoryEntry;
    ///
    /// let mut root = MemoryEntry::new("root");
    /// root.add_child(MemoryEntry::new("a"));
    /// root.add_child(MemoryEntry::new("b"));
    ///
    /// let ids: Vec<_> = root.iter_depth_first().map(|e| e.id().to_string()).collect();
    /// assert_eq!(ids, vec!["root", "a", "b"]);
    /// ```
    pub fn iter_depth_first(&self) -> EntryIter<'_> {
        EntryIter { stack: vec![self] }
    }

    /// Visit this entry and all subentries mutably, in document order.
    pub fn for_each_mut<F: FnMut(&mut MemoryEntry)>(&mut self, f: &mut F) {
        f(self);
        for child in self.children.iter_mut() {
            child.for_each_mut(f);
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl FieldCursor for MemoryEntry {
    fn get(&self, ws: &str) -> Option<String> {
        self.fields.get(ws).cloned()
    }

    fn set(&mut self, ws: &str, value: &str) {
        self.fields.insert(ws.to_string(), value.to_string());
    }

    fn reference(&self) -> String {
        self.id.clone()
    }
}

/// Lazy depth-first traversal over an entry tree.
pub struct EntryIter<'a> {
    stack: Vec<&'a MemoryEntry>,
}

impl<'a> Iterator for EntryIter<'a> {
    type Item = &'a MemoryEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.stack.pop()?;
        // Children go on the stack in reverse so the first child is yielded
        // next, preserving document order.
        for child in entry.children.iter().rev() {
            self.stack.push(child);
        }
        Some(entry)
    }
}
