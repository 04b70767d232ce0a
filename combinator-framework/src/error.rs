use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Raised when an [`ErrorItem`] would be built from empty input.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ItemError {
    #[error("token error items need at least one token")]
    EmptyTokens,
    #[error("label error items need a non-empty label")]
    EmptyLabel,
}

/// A set of error components.
///
/// Keeps insertion order for rendering but ignores order for equality, so
/// two sets holding the same items compare equal. Duplicates are dropped on
/// insertion.
#[derive(Debug, Clone)]
pub struct ErrorSet<T> {
    items: Vec<T>,
}

impl<T> ErrorSet<T> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the set holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: PartialEq> ErrorSet<T> {
    /// Inserts `item` unless an equal item is already present.
    /// Returns `true` if the set grew.
    pub fn insert(&mut self, item: T) -> bool {
        if self.contains(&item) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Returns `true` if an equal item is present.
    pub fn contains(&self, item: &T) -> bool {
        self.items.iter().any(|existing| existing == item)
    }

    /// Adds every item of `other` not already in `self`.
    pub fn union(mut self, other: Self) -> Self {
        for item in other.items {
            self.insert(item);
        }
        self
    }
}

impl<T> Default for ErrorSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for ErrorSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|item| other.contains(item))
    }
}

impl<T: Eq> Eq for ErrorSet<T> {}

impl<T: PartialEq> FromIterator<T> for ErrorSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for item in iter {
            set.insert(item);
        }
        set
    }
}

impl<T: PartialEq> Extend<T> for ErrorSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T> IntoIterator for ErrorSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ErrorSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// One "unexpected" or "expected" fragment of a diagnostic.
///
/// `Tokens` is never empty and `Label` is never the empty string; use the
/// constructors below to uphold that.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorItem<T> {
    Tokens(Vec<T>),
    Label(String),
    EndOfInput,
}

impl<T> ErrorItem<T> {
    /// Creates an item for a single token.
    pub fn token(token: T) -> Self {
        ErrorItem::Tokens(vec![token])
    }

    /// Creates an item for a run of tokens. Fails if `tokens` is empty.
    pub fn tokens<I: IntoIterator<Item = T>>(tokens: I) -> Result<Self, ItemError> {
        let tokens: Vec<T> = tokens.into_iter().collect();
        if tokens.is_empty() {
            return Err(ItemError::EmptyTokens);
        }
        Ok(ErrorItem::Tokens(tokens))
    }

    /// Creates a named item. Fails if `label` is empty.
    pub fn label(label: impl Into<String>) -> Result<Self, ItemError> {
        let label = label.into();
        if label.is_empty() {
            return Err(ItemError::EmptyLabel);
        }
        Ok(ErrorItem::Label(label))
    }
}

impl<T: fmt::Display> fmt::Display for ErrorItem<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorItem::Tokens(tokens) if tokens.len() == 1 => write!(f, "'{}'", tokens[0]),
            ErrorItem::Tokens(tokens) => {
                f.write_str("\"")?;
                for token in tokens {
                    write!(f, "{token}")?;
                }
                f.write_str("\"")
            }
            ErrorItem::Label(label) => f.write_str(label),
            ErrorItem::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// A failure richer than an expectation mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorFancy<E> {
    /// An explicit failure with a message.
    Fail(String),
    /// The indentation level `actual` did not stand in relation `ordering`
    /// to the `reference` level.
    Indentation {
        ordering: Ordering,
        actual: usize,
        reference: usize,
    },
    /// User-defined payload.
    Custom(E),
}

impl<E: fmt::Display> fmt::Display for ErrorFancy<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorFancy::Fail(message) => f.write_str(message),
            ErrorFancy::Indentation {
                ordering,
                actual,
                reference,
            } => {
                let relation = match ordering {
                    Ordering::Less => "less than",
                    Ordering::Equal => "equal to",
                    Ordering::Greater => "greater than",
                };
                write!(
                    f,
                    "incorrect indentation (got {actual}, should be {relation} {reference})"
                )
            }
            ErrorFancy::Custom(error) => write!(f, "{error}"),
        }
    }
}

/// A parse error located at a stream offset.
///
/// Errors from different branches are combined with [`ParseError::merge`]:
/// the error further into the input wins, fancy beats trivial at the same
/// offset, and errors of the same shape at the same offset are unioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError<T, E> {
    Trivial {
        offset: usize,
        unexpected: Option<ErrorItem<T>>,
        expected: ErrorSet<ErrorItem<T>>,
    },
    Fancy {
        offset: usize,
        errors: ErrorSet<ErrorFancy<E>>,
    },
}

impl<T, E> ParseError<T, E> {
    /// Returns the offset the error was detected at.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Trivial { offset, .. } | ParseError::Fancy { offset, .. } => *offset,
        }
    }

    /// Returns the same error relocated to `offset`.
    pub fn with_offset(self, offset: usize) -> Self {
        match self {
            ParseError::Trivial {
                unexpected,
                expected,
                ..
            } => ParseError::Trivial {
                offset,
                unexpected,
                expected,
            },
            ParseError::Fancy { errors, .. } => ParseError::Fancy { offset, errors },
        }
    }
}

impl<T: PartialEq, E: PartialEq> ParseError<T, E> {
    /// Creates a trivial error; duplicate `expected` items collapse.
    pub fn trivial<I>(offset: usize, unexpected: Option<ErrorItem<T>>, expected: I) -> Self
    where
        I: IntoIterator<Item = ErrorItem<T>>,
    {
        ParseError::Trivial {
            offset,
            unexpected,
            expected: expected.into_iter().collect(),
        }
    }

    /// Creates a fancy error; duplicate entries collapse.
    pub fn fancy<I>(offset: usize, errors: I) -> Self
    where
        I: IntoIterator<Item = ErrorFancy<E>>,
    {
        ParseError::Fancy {
            offset,
            errors: errors.into_iter().collect(),
        }
    }

    /// Creates a fancy error carrying a failure message.
    pub fn fail(offset: usize, message: impl Into<String>) -> Self {
        Self::fancy(offset, [ErrorFancy::Fail(message.into())])
    }

    /// Creates a fancy error for an indentation level out of relation.
    pub fn indentation(offset: usize, ordering: Ordering, actual: usize, reference: usize) -> Self {
        Self::fancy(
            offset,
            [ErrorFancy::Indentation {
                ordering,
                actual,
                reference,
            }],
        )
    }

    /// Creates a fancy error carrying a user payload.
    pub fn custom(offset: usize, error: E) -> Self {
        Self::fancy(offset, [ErrorFancy::Custom(error)])
    }

    /// Merges two errors into the one a user should see.
    ///
    /// At equal offsets two trivial errors keep the left `unexpected` item
    /// when both carry one.
    pub fn merge(self, other: Self) -> Self {
        match self.offset().cmp(&other.offset()) {
            Ordering::Greater => {
                tracing::trace!(kept = self.offset(), dropped = other.offset(), "merge: left is further");
                self
            }
            Ordering::Less => {
                tracing::trace!(kept = other.offset(), dropped = self.offset(), "merge: right is further");
                other
            }
            Ordering::Equal => match (self, other) {
                (
                    ParseError::Trivial {
                        offset,
                        unexpected: u1,
                        expected: e1,
                    },
                    ParseError::Trivial {
                        unexpected: u2,
                        expected: e2,
                        ..
                    },
                ) => ParseError::Trivial {
                    offset,
                    unexpected: u1.or(u2),
                    expected: e1.union(e2),
                },
                (ParseError::Fancy { offset, errors: x }, ParseError::Fancy { errors: y, .. }) => {
                    ParseError::Fancy {
                        offset,
                        errors: x.union(y),
                    }
                }
                (fancy @ ParseError::Fancy { .. }, ParseError::Trivial { .. })
                | (ParseError::Trivial { .. }, fancy @ ParseError::Fancy { .. }) => {
                    tracing::trace!(offset = fancy.offset(), "merge: fancy error shadows trivial");
                    fancy
                }
            },
        }
    }
}

/// Merges two possibly absent errors; `None` is the identity.
pub fn merge_optional<T: PartialEq, E: PartialEq>(
    left: Option<ParseError<T, E>>,
    right: Option<ParseError<T, E>>,
) -> Option<ParseError<T, E>> {
    match (left, right) {
        (Some(l), Some(r)) => Some(l.merge(r)),
        (l, r) => l.or(r),
    }
}

/// Folds any number of errors with [`ParseError::merge`].
/// Returns `None` when there were no errors at all.
pub fn merge_errors<T, E, I>(errors: I) -> Option<ParseError<T, E>>
where
    T: PartialEq,
    E: PartialEq,
    I: IntoIterator<Item = ParseError<T, E>>,
{
    errors.into_iter().fold(None, |acc, err| merge_optional(acc, Some(err)))
}

fn write_or_list<I, D>(f: &mut fmt::Formatter<'_>, items: I) -> fmt::Result
where
    I: ExactSizeIterator<Item = D>,
    D: fmt::Display,
{
    let len = items.len();
    for (i, item) in items.enumerate() {
        if i > 0 {
            match (len, i == len - 1) {
                (2, _) => f.write_str(" or ")?,
                (_, true) => f.write_str(", or ")?,
                _ => f.write_str(", ")?,
            }
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl<T: fmt::Display, E: fmt::Display> fmt::Display for ParseError<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Trivial {
                unexpected,
                expected,
                ..
            } => {
                if unexpected.is_none() && expected.is_empty() {
                    return f.write_str("unknown parse error");
                }
                if let Some(item) = unexpected {
                    write!(f, "unexpected {item}")?;
                    if !expected.is_empty() {
                        f.write_str("\n")?;
                    }
                }
                if !expected.is_empty() {
                    f.write_str("expecting ")?;
                    write_or_list(f, expected.iter())?;
                }
                Ok(())
            }
            ParseError::Fancy { errors, .. } => {
                if errors.is_empty() {
                    return f.write_str("unknown fancy parse error");
                }
                for (i, error) in errors.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n")?;
                    }
                    write!(f, "{error}")?;
                }
                Ok(())
            }
        }
    }
}
