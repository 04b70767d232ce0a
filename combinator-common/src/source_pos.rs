use crate::error::ConfigError;
use std::fmt;

/// A human-readable location in the source: name, line and column.
///
/// Both `line` and `column` are 1-indexed. The rendered form
/// `name:line:column` is the diagnostic text downstream tools rely on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    /// Name of the source (usually a file path)
    pub name: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourcePosition {
    /// Creates a position at the start of the named source.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            line: 1,
            column: 1,
        }
    }

    /// Creates a position with the given values.
    ///
    /// Zero line or column values are raised to 1.
    pub fn at(name: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            name: name.into(),
            line: line.max(1),
            column: column.max(1),
        }
    }

    /// Moves to the start of the next line.
    pub fn newline(&mut self) {
        self.line += 1;
        self.column = 1;
    }

    /// Moves to the next tab stop.
    pub fn tab(&mut self, width: TabWidth) {
        let w = width.get();
        self.column = ((self.column - 1) / w + 1) * w + 1;
    }

    /// Moves one column to the right.
    pub fn step(&mut self) {
        self.column += 1;
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.name, self.line, self.column)
    }
}

/// Tab width used for column accounting. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabWidth(usize);

impl TabWidth {
    /// The default width of 8 columns.
    pub const DEFAULT: TabWidth = TabWidth(8);

    /// Creates a tab width, rejecting zero.
    pub fn new(width: usize) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::ZeroTabWidth(width));
        }
        Ok(Self(width))
    }

    /// Returns the width in columns.
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for TabWidth {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<usize> for TabWidth {
    type Error = ConfigError;

    fn try_from(width: usize) -> Result<Self, Self::Error> {
        Self::new(width)
    }
}
