use crate::error::ConfigError;
use crate::source_pos::{SourcePosition, TabWidth};

/// Settings used to build the initial position of a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionConfig {
    /// Name reported in rendered positions
    pub source_name: String,
    /// Tab width for column accounting
    pub tab_width: TabWidth,
    /// Text prepended to the offending line when rendering
    pub line_prefix: String,
}

impl PositionConfig {
    /// Creates the default configuration for the named source.
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            ..Self::default()
        }
    }

    /// Sets the tab width. Fails on zero.
    pub fn with_tab_width(mut self, width: usize) -> Result<Self, ConfigError> {
        self.tab_width = TabWidth::new(width)?;
        Ok(self)
    }

    /// Sets the text shown before the first line when rendering.
    pub fn with_line_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.line_prefix = prefix.into();
        self
    }

    /// Returns the source position at the very start of the input.
    pub fn start_position(&self) -> SourcePosition {
        SourcePosition::new(self.source_name.clone())
    }
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self {
            source_name: String::new(),
            tab_width: TabWidth::DEFAULT,
            line_prefix: String::new(),
        }
    }
}
