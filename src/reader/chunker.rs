//! Splits text into fixed-size word chunks.
//!
//! ```
//! use vestal::reader::chunk_text;
//!
//! let chunks = chunk_text("one two three four five", 2);
//! let texts: Vec<&str> = chunks.iter().map(|c| c.text()).collect();
//! assert_eq!(texts, ["one two", "three four", "five"]);
//! ```

// ---------------------------------------------------------------------------
// Chunk
// ---------------------------------------------------------------------------

/// One reading unit: one or more whole words joined by single spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    text: String,
    words: usize,
}

impl Chunk {
    fn from_words(words: &[&str]) -> Self {
        Self {
            text: words.join(" "),
            words: words.len(),
        }
    }

    /// Display text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of words in this chunk.
    pub fn word_count(&self) -> usize {
        self.words
    }

    /// Last character of the display text, used for punctuation pauses.
    pub fn last_char(&self) -> Option<char> {
        self.text.chars().next_back()
    }
}

// ---------------------------------------------------------------------------
// ChunkSequence
// ---------------------------------------------------------------------------

/// Ordered, zero-indexed list of chunks produced by [`chunk_text`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkSequence {
    chunks: Vec<Chunk>,
}

impl ChunkSequence {
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Chunk> {
        self.chunks.get(index)
    }

    /// Index of the final chunk, `None` when the sequence is empty.
    pub fn last_index(&self) -> Option<usize> {
        self.chunks.len().checked_sub(1)
    }

    /// Clamp `index` into `0..len`.  Returns 0 for an empty sequence.
    pub fn clamp_index(&self, index: usize) -> usize {
        self.last_index().map_or(0, |last| index.min(last))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chunk> {
        self.chunks.iter()
    }

    /// Total number of words across all chunks.
    pub fn word_count(&self) -> usize {
        self.chunks.iter().map(Chunk::word_count).sum()
    }
}

impl<'a> IntoIterator for &'a ChunkSequence {
    type Item = &'a Chunk;
    type IntoIter = std::slice::Iter<'a, Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}

// ---------------------------------------------------------------------------
// Chunking
// ---------------------------------------------------------------------------

/// Split `text` on runs of whitespace and group the words `chunk_size` at a
/// time.  The final chunk holds the remainder.
///
/// A `chunk_size` of 0 is treated as 1.  Empty or whitespace-only text yields
/// an empty sequence.
pub fn chunk_text(text: &str, chunk_size: usize) -> ChunkSequence {
    let size = chunk_size.max(1);
    let words: Vec<&str> = text.split_whitespace().collect();

    let chunks = words
        .chunks(size)
        .map(Chunk::from_words)
        .filter(|chunk| !chunk.text.is_empty())
        .collect();

    ChunkSequence { chunks }
}

/// Absolute word offset of the first word of chunk `index`.
pub fn word_offset(index: usize, chunk_size: usize) -> usize {
    index.saturating_mul(chunk_size.max(1))
}

/// Index of the chunk containing word `offset` when chunking by `chunk_size`.
pub fn index_for_word(offset: usize, chunk_size: usize) -> usize {
    offset / chunk_size.max(1)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
