use std::cmp::Ordering;

/// The operations a parser needs from its input.
///
/// A stream is a set of functions over a `Chunk` type rather than a value
/// holding the input: the remaining input is a `Chunk`, and every operation
/// takes a chunk and returns new ones without mutating it. Backends supply
/// their own token and chunk ordering through `compare_tokens` and
/// `compare_chunks`, so tokens need not implement any ordering trait.
pub trait Stream {
    type Token: Clone;
    type Chunk: Clone;

    fn tokens_to_chunk(&self, tokens: &[Self::Token]) -> Self::Chunk;

    fn chunk_to_tokens(&self, chunk: &Self::Chunk) -> Vec<Self::Token>;

    fn chunk_length(&self, chunk: &Self::Chunk) -> usize;

    /// Splits off the first token. Returns `None` iff `input` is empty.
    fn take1(&self, input: &Self::Chunk) -> Option<(Self::Token, Self::Chunk)>;

    /// Splits off up to `n` tokens.
    ///
    /// `n == 0` always yields an empty chunk and `input` unchanged. Otherwise
    /// `None` means nothing at all was available; a shorter input yields
    /// every remaining token instead of `None`.
    fn take_n(&self, n: usize, input: &Self::Chunk) -> Option<(Self::Chunk, Self::Chunk)>;

    /// Splits off the longest prefix whose tokens all satisfy `predicate`.
    fn take_while<P>(&self, predicate: P, input: &Self::Chunk) -> (Self::Chunk, Self::Chunk)
    where
        P: FnMut(&Self::Token) -> bool;

    fn compare_tokens(&self, a: &Self::Token, b: &Self::Token) -> Ordering;

    fn compare_chunks(&self, a: &Self::Chunk, b: &Self::Chunk) -> Ordering;

    fn chunk_empty(&self, chunk: &Self::Chunk) -> bool {
        self.chunk_length(chunk) == 0
    }

    fn token_to_chunk(&self, token: Self::Token) -> Self::Chunk {
        self.tokens_to_chunk(std::slice::from_ref(&token))
    }
}

/// Tokens that can be read as text for line/column tracking.
pub trait TextToken {
    fn as_char(&self) -> char;

    fn is_newline(&self) -> bool {
        self.as_char() == '\n'
    }

    fn is_tab(&self) -> bool {
        self.as_char() == '\t'
    }
}

impl TextToken for char {
    fn as_char(&self) -> char {
        *self
    }
}

impl TextToken for u8 {
    fn as_char(&self) -> char {
        char::from(*self)
    }
}
