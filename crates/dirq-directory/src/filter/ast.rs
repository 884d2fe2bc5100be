//! Abstract Syntax Tree (AST) for filter expressions.

use std::fmt;

use serde::Serialize;

/// Comparison operator in a filter item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareOp {
    /// Equality (`=`).
    Eq,
    /// Greater than or equal (`>=`).
    Ge,
    /// Greater than (`>`).
    Gt,
    /// Less than or equal (`<=`).
    Le,
    /// Less than (`<`).
    Lt,
}

impl CompareOp {
    /// The operator as it appears in filter text.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ge => ">=",
            CompareOp::Gt => ">",
            CompareOp::Le => "<=",
            CompareOp::Lt => "<",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a parsed filter expression.
///
/// The `Filter` enum is the AST for directory filter expressions. Every node
/// is pure: evaluation never mutates the record or the tree, so a parsed
/// filter can be shared freely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// True iff all children are true; an empty list is vacuously true.
    And(Vec<Filter>),

    /// True iff any child is true; an empty list is vacuously false.
    Or(Vec<Filter>),

    /// True iff the child is false.
    Not(Box<Filter>),

    /// Compares an attribute against a literal value.
    ///
    /// The value is kept as the literal string from the filter text; numeric
    /// coercion is deferred to evaluation.
    Compare {
        /// Attribute name (matched case-insensitively against records).
        attribute: String,
        /// Comparison operator.
        op: CompareOp,
        /// Literal comparison value.
        value: String,
    },

    /// True iff the attribute exists and is non-empty (`attr=*`).
    Present(String),

    /// Wildcard match (`attr=jo*n*`); `*` matches any run of characters.
    Substring {
        /// Attribute name (matched case-insensitively against records).
        attribute: String,
        /// Pattern with literal `*` wildcards.
        pattern: String,
    },
}

impl Filter {
    /// Creates an AND filter over the given children.
    ///
    /// # Example
    ///
    /// ```
    /// use dirq_directory::filter::Filter;
    ///
    /// let filter = Filter::and(vec![Filter::Present("cn".into())]);
    /// assert!(matches!(filter, Filter::And(_)));
    /// ```
    pub fn and(children: Vec<Filter>) -> Self {
        Filter::And(children)
    }

    /// Creates an OR filter over the given children.
    pub fn or(children: Vec<Filter>) -> Self {
        Filter::Or(children)
    }

    /// Creates a NOT filter from another filter.
    ///
    /// # Example
    ///
    /// ```
    /// use dirq_directory::filter::Filter;
    ///
    /// let filter = Filter::negate(Filter::Present("lockoutTime".into()));
    /// assert!(matches!(filter, Filter::Not(_)));
    /// ```
    pub fn negate(inner: Filter) -> Self {
        Filter::Not(Box::new(inner))
    }

    /// Creates an equality comparison.
    pub fn equals(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Compare {
            attribute: attribute.into(),
            op: CompareOp::Eq,
            value: value.into(),
        }
    }

    /// Creates a comparison with an explicit operator.
    pub fn compare(
        attribute: impl Into<String>,
        op: CompareOp,
        value: impl Into<String>,
    ) -> Self {
        Filter::Compare {
            attribute: attribute.into(),
            op,
            value: value.into(),
        }
    }
}

impl fmt::Display for Filter {
    /// Renders the canonical parenthesized form of the filter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::And(children) => {
                write!(f, "(&")?;
                for child in children {
                    write!(f, "{}", child)?;
                }
                write!(f, ")")
            }
            Filter::Or(children) => {
                write!(f, "(|")?;
                for child in children {
                    write!(f, "{}", child)?;
                }
                write!(f, ")")
            }
            Filter::Not(inner) => write!(f, "(!{})", inner),
            Filter::Compare {
                attribute,
                op,
                value,
            } => write!(f, "({}{}{})", attribute, op, value),
            Filter::Present(attribute) => write!(f, "({}=*)", attribute),
            Filter::Substring { attribute, pattern } => {
                write!(f, "({}={})", attribute, pattern)
            }
        }
    }
}
