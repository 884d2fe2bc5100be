//! Error types for the filter parser.

use thiserror::Error;

/// A specialized Result type for filter parsing operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while parsing a filter expression.
///
/// Each variant that concerns a specific part of the input carries the
/// offending fragment so hand-written filters can be debugged from the
/// message alone. Evaluation never produces errors; only malformed filter
/// syntax does.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The filter expression is empty.
    #[error("filter expression is empty")]
    EmptyExpression,

    /// A parenthesized group was expected but not found.
    #[error("expected '(' at '{fragment}'")]
    ExpectedGroup {
        /// The input from the position where a group was expected.
        fragment: String,
    },

    /// A group was opened but never closed.
    #[error("unclosed parenthesis in '{fragment}'")]
    UnclosedParenthesis {
        /// The unterminated group text.
        fragment: String,
    },

    /// A boolean group (`(&)`, `(|)`, `()`) has no operands.
    #[error("empty group in '{fragment}'")]
    EmptyGroup {
        /// The offending group text.
        fragment: String,
    },

    /// A filter item has no attribute name before its operator.
    #[error("missing attribute in '{fragment}'")]
    MissingAttribute {
        /// The offending item text.
        fragment: String,
    },

    /// A filter item has no comparison operator.
    #[error("missing comparison operator in '{fragment}'")]
    MissingOperator {
        /// The offending item text.
        fragment: String,
    },

    /// Input remained after a complete filter expression.
    #[error("unexpected trailing input: '{fragment}'")]
    TrailingInput {
        /// The leftover input.
        fragment: String,
    },

    /// The expression ended in the middle of a filter.
    #[error("unexpected end of filter expression")]
    UnexpectedEnd,
}

impl FilterError {
    /// Creates an expected-group error.
    pub fn expected_group(fragment: impl Into<String>) -> Self {
        FilterError::ExpectedGroup {
            fragment: fragment.into(),
        }
    }

    /// Creates an unclosed-parenthesis error.
    pub fn unclosed(fragment: impl Into<String>) -> Self {
        FilterError::UnclosedParenthesis {
            fragment: fragment.into(),
        }
    }

    /// Creates an empty-group error.
    pub fn empty_group(fragment: impl Into<String>) -> Self {
        FilterError::EmptyGroup {
            fragment: fragment.into(),
        }
    }

    /// Creates a missing-attribute error.
    pub fn missing_attribute(fragment: impl Into<String>) -> Self {
        FilterError::MissingAttribute {
            fragment: fragment.into(),
        }
    }

    /// Creates a missing-operator error.
    pub fn missing_operator(fragment: impl Into<String>) -> Self {
        FilterError::MissingOperator {
            fragment: fragment.into(),
        }
    }

    /// Creates a trailing-input error.
    pub fn trailing_input(fragment: impl Into<String>) -> Self {
        FilterError::TrailingInput {
            fragment: fragment.into(),
        }
    }
}
