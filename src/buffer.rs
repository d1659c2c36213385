//! Ordered insertion buffer used by partition sort workers.

/// Sorted container that accepts words one at a time.
///
/// Each insertion finds its slot with a binary search over the words already
/// held and shifts the tail, so the contents stay ascending after every call.
/// Equal words land after the existing copies; counts are always preserved.
#[derive(Debug, Default)]
pub struct OrderedInsertionBuffer {
    words: Vec<String>,
}

impl OrderedInsertionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer with room for `capacity` words
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            words: Vec::with_capacity(capacity),
        }
    }

    /// Insert a word, keeping the buffer in ascending byte order
    pub fn insert(&mut self, word: String) {
        let position = self
            .words
            .partition_point(|existing| existing.as_str() <= word.as_str());
        self.words.insert(position, word);
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Consume the buffer and hand out its sorted contents
    pub fn into_sorted(self) -> Vec<String> {
        self.words
    }
}

impl Extend<String> for OrderedInsertionBuffer {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for word in iter {
            self.insert(word);
        }
    }
}
