use crate::error::{merge_errors, ErrorItem, ParseError};
use crate::position::Position;
use crate::stream::{Stream, TextToken};
use combinator_common::{PositionConfig, SourcePosition, TabWidth};
use rpds::List;
use std::fmt;

/// Parser state threaded through every primitive step.
///
/// A `State` is never mutated: each step returns a new one, so holding on
/// to an older value is all a backtracking combinator needs to do.
///
/// Deferred errors are kept newest-first. [`State::defer_error`] prepends
/// onto a persistent list, so cloning a state (for example before trying an
/// alternative) shares the error history instead of copying it.
///
/// The cached [`Position`] is not moved on every step; it is brought up to
/// date lazily when a source position is actually needed. The position at
/// the start of the input is kept as well, so offsets behind the cache are
/// replayed from there.
pub struct State<S: Stream, E> {
    input: S::Chunk,
    offset: usize,
    start: Position<S::Chunk>,
    position: Position<S::Chunk>,
    errors: List<ParseError<S::Token, E>>,
}

impl<S: Stream, E> State<S, E> {
    /// Creates the state at the start of `input`.
    pub fn new(input: S::Chunk, config: &PositionConfig) -> Self {
        let start = Position::new(input.clone(), config);
        Self {
            position: start.clone(),
            start,
            input,
            offset: 0,
            errors: List::new(),
        }
    }

    /// Returns the remaining input.
    pub fn input(&self) -> &S::Chunk {
        &self.input
    }

    /// Returns the number of tokens consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the cached position, which may lag behind [`State::offset`].
    pub fn position(&self) -> &Position<S::Chunk> {
        &self.position
    }

    /// Iterates over deferred errors, most recent first.
    pub fn errors(&self) -> impl Iterator<Item = &ParseError<S::Token, E>> {
        self.errors.iter()
    }

    /// Returns the number of deferred errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Records a non-fatal error without touching input or offset.
    pub fn defer_error(&self, error: ParseError<S::Token, E>) -> Self {
        tracing::debug!(
            offset = error.offset(),
            deferred = self.errors.len() + 1,
            "deferring parse error"
        );
        Self {
            errors: self.errors.push_front(error),
            ..self.clone()
        }
    }

    /// Returns the state after `consumed` tokens were taken off the input,
    /// leaving `rest`.
    ///
    /// This is the success path for engines that split the input through
    /// the [`Stream`] themselves. `rest` must be what remains of
    /// [`State::input`] after those `consumed` tokens.
    pub fn advance_by(&self, consumed: usize, rest: S::Chunk) -> Self {
        Self {
            input: rest,
            offset: self.offset + consumed,
            ..self.clone()
        }
    }

    /// Consumes one token. `None` at end of input.
    pub fn take1(&self, stream: &S) -> Option<(S::Token, Self)> {
        let (token, rest) = stream.take1(&self.input)?;
        Some((token, self.advance_by(1, rest)))
    }

    /// Consumes up to `n` tokens, following [`Stream::take_n`].
    pub fn take_n(&self, stream: &S, n: usize) -> Option<(S::Chunk, Self)> {
        let (taken, rest) = stream.take_n(n, &self.input)?;
        let consumed = stream.chunk_length(&taken);
        Some((taken, self.advance_by(consumed, rest)))
    }

    /// Consumes the longest prefix satisfying `predicate`; may consume nothing.
    pub fn take_while<P>(&self, stream: &S, predicate: P) -> (S::Chunk, Self)
    where
        P: FnMut(&S::Token) -> bool,
    {
        let (taken, rest) = stream.take_while(predicate, &self.input);
        let consumed = stream.chunk_length(&taken);
        (taken, self.advance_by(consumed, rest))
    }
}

impl<S, E> State<S, E>
where
    S: Stream,
    S::Token: PartialEq,
    E: PartialEq,
{
    /// Consumes one token if it satisfies `predicate`.
    ///
    /// On failure the state is left as is and a trivial error at the current
    /// offset is returned, naming the offending token (or end of input) and
    /// the `expected` items.
    pub fn satisfy<P, I>(
        &self,
        stream: &S,
        predicate: P,
        expected: I,
    ) -> Result<(S::Token, Self), ParseError<S::Token, E>>
    where
        P: FnOnce(&S::Token) -> bool,
        I: IntoIterator<Item = ErrorItem<S::Token>>,
    {
        let Some((token, rest)) = stream.take1(&self.input) else {
            return Err(ParseError::trivial(
                self.offset,
                Some(ErrorItem::EndOfInput),
                expected,
            ));
        };
        if predicate(&token) {
            Ok((token, self.advance_by(1, rest)))
        } else {
            Err(ParseError::trivial(
                self.offset,
                Some(ErrorItem::token(token)),
                expected,
            ))
        }
    }

    /// Merges every deferred error into one. `None` if nothing was deferred.
    pub fn merged_errors(&self) -> Option<ParseError<S::Token, E>>
    where
        E: Clone,
    {
        merge_errors(self.errors.iter().cloned())
    }
}

impl<S, E> State<S, E>
where
    S: Stream,
    S::Token: TextToken,
{
    /// Brings the cached position up to the current offset.
    pub fn sync_position(&self, stream: &S) -> Self {
        Self {
            position: self.position_at(stream, self.offset),
            ..self.clone()
        }
    }

    /// Returns the source position of `offset`.
    pub fn source_position(&self, stream: &S, offset: usize) -> SourcePosition {
        self.position_at(stream, offset).source_pos
    }

    // Replays from the cache when it is not past `offset`, else from the start.
    fn position_at(&self, stream: &S, offset: usize) -> Position<S::Chunk> {
        let base = if offset >= self.position.offset {
            &self.position
        } else {
            &self.start
        };
        base.reach_offset(stream, offset)
    }

    /// Renders `error` with its location and the offending line:
    ///
    /// ```text
    /// input:1:1:
    ///   |
    /// 1 | 0x
    ///   | ^
    /// unexpected '0'
    /// expecting letter
    /// ```
    pub fn render_error(&self, stream: &S, error: &ParseError<S::Token, E>) -> String
    where
        S::Token: fmt::Display,
        E: fmt::Display,
    {
        let pos = self.position_at(stream, error.offset());
        self.render_at(stream, &pos, error)
    }

    /// Renders every deferred error ordered by offset.
    ///
    /// Errors at the same offset keep the order they were deferred in. The
    /// position is folded forward from the start of the input, so the input
    /// is scanned once no matter how many errors there are.
    pub fn render_errors(&self, stream: &S) -> Vec<String>
    where
        S::Token: fmt::Display,
        E: fmt::Display,
    {
        let mut errors: Vec<&ParseError<S::Token, E>> = self.errors.iter().collect();
        errors.reverse();
        errors.sort_by_key(|error| error.offset());

        let mut pos = self.start.clone();
        errors
            .into_iter()
            .map(|error| {
                pos = pos.reach_offset(stream, error.offset());
                self.render_at(stream, &pos, error)
            })
            .collect()
    }

    fn render_at(
        &self,
        stream: &S,
        pos: &Position<S::Chunk>,
        error: &ParseError<S::Token, E>,
    ) -> String
    where
        S::Token: fmt::Display,
        E: fmt::Display,
    {
        // The configured prefix is not input: it sits outside column counting
        // and only appears until the first newline.
        let seed = if pos.source_pos.line == self.start.source_pos.line {
            self.start.line_prefix.as_str()
        } else {
            ""
        };
        let text = pos.line_text(stream);
        let body = text.strip_prefix(seed).unwrap_or(&text);
        let line = format!("{seed}{}", expand_tabs(body, pos.tab_width));

        let line_no = pos.source_pos.line.to_string();
        let gutter = " ".repeat(line_no.len());
        let caret = " ".repeat(seed.chars().count() + pos.source_pos.column - 1);
        format!(
            "{}:\n{gutter} |\n{line_no} | {line}\n{gutter} | {caret}^\n{error}",
            pos.source_pos
        )
    }
}

fn expand_tabs(line: &str, tab_width: TabWidth) -> String {
    let width = tab_width.get();
    let mut out = String::with_capacity(line.len());
    let mut column = 1;
    for ch in line.chars() {
        if ch == '\t' {
            let next = ((column - 1) / width + 1) * width + 1;
            out.extend(std::iter::repeat(' ').take(next - column));
            column = next;
        } else {
            out.push(ch);
            column += 1;
        }
    }
    out
}

impl<S: Stream, E> Clone for State<S, E> {
    fn clone(&self) -> Self {
        Self {
            input: self.input.clone(),
            offset: self.offset,
            start: self.start.clone(),
            position: self.position.clone(),
            errors: self.errors.clone(),
        }
    }
}

impl<S, E> fmt::Debug for State<S, E>
where
    S: Stream,
    S::Chunk: fmt::Debug,
    S::Token: fmt::Debug,
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("input", &self.input)
            .field("offset", &self.offset)
            .field("position", &self.position)
            .field("errors", &self.errors.iter().collect::<Vec<_>>())
            .finish()
    }
}

impl<S, E> PartialEq for State<S, E>
where
    S: Stream,
    S::Chunk: PartialEq,
    S::Token: PartialEq,
    E: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
            && self.input == other.input
            && self.start == other.start
            && self.position == other.position
            && self.errors.iter().eq(other.errors.iter())
    }
}
