use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Immutable chunk of tokens referencing a shared buffer.
///
/// The buffer is never mutated after construction, so splitting a chunk
/// only creates new views; chunks returned earlier stay valid no matter
/// how many more takes happen. It implements `Deref<Target = [T]>` for
/// slice access.
#[derive(Clone)]
pub struct ArrayChunk<T> {
    buffer: Arc<[T]>,
    start: usize,
    end: usize,
}

impl<T> ArrayChunk<T> {
    /// Creates a new chunk from the given shared buffer and index range.
    pub fn new(buffer: Arc<[T]>, start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        debug_assert!(end <= buffer.len());
        Self { buffer, start, end }
    }

    /// Creates a chunk that covers the entire buffer.
    pub fn from_arc(buffer: Arc<[T]>) -> Self {
        let end = buffer.len();
        Self {
            buffer,
            start: 0,
            end,
        }
    }

    /// Creates an empty chunk.
    pub fn empty() -> Self {
        Self::from_arc(Arc::from(Vec::new()))
    }

    /// Returns the number of tokens.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the chunk is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the tokens as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.buffer[self.start..self.end]
    }

    /// Splits into `[0, mid)` and `[mid, len)`. `mid` is clamped to the length.
    pub fn split_at(&self, mid: usize) -> (Self, Self) {
        let mid = self.start + mid.min(self.len());
        (
            Self::new(Arc::clone(&self.buffer), self.start, mid),
            Self::new(Arc::clone(&self.buffer), mid, self.end),
        )
    }
}

impl<T> Deref for ArrayChunk<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> AsRef<[T]> for ArrayChunk<T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T> Default for ArrayChunk<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayChunk<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for ArrayChunk<char> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.iter() {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

impl<T> From<Vec<T>> for ArrayChunk<T> {
    fn from(tokens: Vec<T>) -> Self {
        Self::from_arc(Arc::from(tokens))
    }
}

impl<T: Clone> From<&[T]> for ArrayChunk<T> {
    fn from(tokens: &[T]) -> Self {
        Self::from_arc(Arc::from(tokens))
    }
}

impl From<&str> for ArrayChunk<char> {
    fn from(text: &str) -> Self {
        text.chars().collect()
    }
}

impl<T> FromIterator<T> for ArrayChunk<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_arc(iter.into_iter().collect())
    }
}

impl<T: PartialEq> PartialEq for ArrayChunk<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for ArrayChunk<T> {}

impl<T: PartialEq> PartialEq<[T]> for ArrayChunk<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for ArrayChunk<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}
