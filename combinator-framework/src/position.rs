use crate::stream::{Stream, TextToken};
use combinator_common::{PositionConfig, SourcePosition, TabWidth};

/// Line/column tracking state for a stream.
///
/// A `Position` pairs the remaining input `src` with the offset where it
/// begins and the source position at that offset. It only moves forward:
/// [`Position::advance`] and [`Position::reach_offset`] return a new value
/// and leave `self` untouched, so older positions stay usable after
/// backtracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position<C> {
    /// Remaining input
    pub src: C,
    /// Offset corresponding to the beginning of `src`
    pub offset: usize,
    /// Source position corresponding to the beginning of `src`
    pub source_pos: SourcePosition,
    /// Tab width used for column calculation
    pub tab_width: TabWidth,
    /// Text of the current line consumed so far, prepended when rendering
    pub line_prefix: String,
}

impl<C: Clone> Position<C> {
    /// Creates the position at the start of `src`.
    pub fn new(src: C, config: &PositionConfig) -> Self {
        Self {
            src,
            offset: 0,
            source_pos: config.start_position(),
            tab_width: config.tab_width,
            line_prefix: config.line_prefix.clone(),
        }
    }

    /// Consumes up to `n` tokens of `src`.
    ///
    /// Newlines move to column 1 of the next line, tabs move to the next tab
    /// stop, anything else moves one column right.
    pub fn advance<S>(&self, stream: &S, n: usize) -> Self
    where
        S: Stream<Chunk = C>,
        S::Token: TextToken,
    {
        let Some((consumed, rest)) = stream.take_n(n, &self.src) else {
            return self.clone();
        };

        let mut source_pos = self.source_pos.clone();
        let mut crossed_newline = false;
        let mut current_line = String::new();
        for token in stream.chunk_to_tokens(&consumed) {
            if token.is_newline() {
                source_pos.newline();
                crossed_newline = true;
                current_line.clear();
                continue;
            }
            if token.is_tab() {
                source_pos.tab(self.tab_width);
            } else {
                source_pos.step();
            }
            current_line.push(token.as_char());
        }

        let line_prefix = if crossed_newline {
            current_line
        } else {
            let mut prefix = self.line_prefix.clone();
            prefix.push_str(&current_line);
            prefix
        };
        let offset = self.offset + stream.chunk_length(&consumed);

        tracing::trace!(
            from = self.offset,
            to = offset,
            line = source_pos.line,
            column = source_pos.column,
            "advanced position"
        );

        Self {
            src: rest,
            offset,
            source_pos,
            tab_width: self.tab_width,
            line_prefix,
        }
    }

    /// Advances to the absolute `offset`.
    ///
    /// Offsets at or before `self.offset` return an unchanged copy; a
    /// position cannot move backwards.
    pub fn reach_offset<S>(&self, stream: &S, offset: usize) -> Self
    where
        S: Stream<Chunk = C>,
        S::Token: TextToken,
    {
        self.advance(stream, offset.saturating_sub(self.offset))
    }

    /// Returns the full text of the current line: the consumed prefix plus
    /// everything in `src` up to the next newline.
    pub fn line_text<S>(&self, stream: &S) -> String
    where
        S: Stream<Chunk = C>,
        S::Token: TextToken,
    {
        let (rest_of_line, _) = stream.take_while(|token| !token.is_newline(), &self.src);
        let mut text = self.line_prefix.clone();
        text.extend(
            stream
                .chunk_to_tokens(&rest_of_line)
                .iter()
                .map(TextToken::as_char),
        );
        text
    }
}
