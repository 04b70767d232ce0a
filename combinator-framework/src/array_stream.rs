use crate::chunk::ArrayChunk;
use crate::stream::Stream;
use combinator_common::{compare_slices, Comparator, Natural};
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

/// In-memory stream of `T` tokens over [`ArrayChunk`]s.
///
/// The token ordering is injected as a [`Comparator`], so any token type
/// works, including ones without an `Ord` impl. Chunks are compared
/// lexicographically with the same comparator.
pub struct ArrayStream<T, C = Natural> {
    comparator: C,
    _token: PhantomData<fn() -> T>,
}

impl<T: Ord> ArrayStream<T, Natural> {
    /// A stream ordering tokens by their `Ord` impl.
    pub fn natural() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<T, C> ArrayStream<T, C>
where
    C: Comparator<T>,
{
    /// A stream ordering tokens with `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            comparator,
            _token: PhantomData,
        }
    }

    /// Returns the injected comparator.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }
}

impl<T, C: Clone> Clone for ArrayStream<T, C> {
    fn clone(&self) -> Self {
        Self {
            comparator: self.comparator.clone(),
            _token: PhantomData,
        }
    }
}

impl<T, C: fmt::Debug> fmt::Debug for ArrayStream<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayStream")
            .field("comparator", &self.comparator)
            .finish()
    }
}

impl<T: Ord> Default for ArrayStream<T, Natural> {
    fn default() -> Self {
        Self::natural()
    }
}

impl<T, C> Stream for ArrayStream<T, C>
where
    T: Clone,
    C: Comparator<T>,
{
    type Token = T;
    type Chunk = ArrayChunk<T>;

    fn tokens_to_chunk(&self, tokens: &[T]) -> ArrayChunk<T> {
        ArrayChunk::from(tokens)
    }

    fn chunk_to_tokens(&self, chunk: &ArrayChunk<T>) -> Vec<T> {
        chunk.to_vec()
    }

    fn chunk_length(&self, chunk: &ArrayChunk<T>) -> usize {
        chunk.len()
    }

    fn take1(&self, input: &ArrayChunk<T>) -> Option<(T, ArrayChunk<T>)> {
        let first = input.first()?.clone();
        let (_, rest) = input.split_at(1);
        Some((first, rest))
    }

    fn take_n(&self, n: usize, input: &ArrayChunk<T>) -> Option<(ArrayChunk<T>, ArrayChunk<T>)> {
        if n == 0 {
            return Some((ArrayChunk::empty(), input.clone()));
        }
        if input.is_empty() {
            return None;
        }
        Some(input.split_at(n))
    }

    fn take_while<P>(&self, mut predicate: P, input: &ArrayChunk<T>) -> (ArrayChunk<T>, ArrayChunk<T>)
    where
        P: FnMut(&T) -> bool,
    {
        let matched = input.iter().take_while(|token| predicate(token)).count();
        input.split_at(matched)
    }

    fn compare_tokens(&self, a: &T, b: &T) -> Ordering {
        self.comparator.compare(a, b)
    }

    fn compare_chunks(&self, a: &ArrayChunk<T>, b: &ArrayChunk<T>) -> Ordering {
        compare_slices(a, b, &self.comparator)
    }
}
