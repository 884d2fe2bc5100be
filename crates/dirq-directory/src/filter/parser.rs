//! Recursive descent parser for filter expressions.

use super::ast::{CompareOp, Filter};
use super::error::{FilterError, FilterResult};

/// Parser for directory filter expressions.
///
/// Two input shapes are accepted: a bare `key=value` pair (implicit
/// equality), and the fully parenthesized LDAP-style form.
///
/// # Grammar
///
/// ```text
/// filter        ::= '(' filtercontent ')'
/// filtercontent ::= and | or | not | item
/// and           ::= '&' filter+
/// or            ::= '|' filter+
/// not           ::= '!' filter
/// item          ::= attribute operator value
/// operator      ::= '=' | '>=' | '>' | '<=' | '<'
/// ```
///
/// Multi-character operators are matched before their single-character
/// prefixes, so `>=` never parses as `>` followed by a value starting with
/// `=`. Within an item, a value of exactly `*` is a presence test, a value
/// containing `*` elsewhere is a wildcard pattern, and anything else is a
/// literal comparison value (numeric coercion happens at evaluation time).
///
/// # Example
///
/// ```
/// use dirq_directory::filter::{Filter, FilterParser};
///
/// // Simple form
/// let filter = FilterParser::parse("mail=jsmith@example.com").unwrap();
/// assert!(matches!(filter, Filter::Compare { .. }));
///
/// // LDAP form
/// let filter = FilterParser::parse("(&(objectClass=user)(uidNumber>=1000))").unwrap();
/// assert!(matches!(filter, Filter::And(_)));
/// ```
pub struct FilterParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> FilterParser<'a> {
    /// Parses a filter expression string into a [`Filter`] AST.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::EmptyExpression`] for empty input and a
    /// fragment-carrying variant for any grammar violation; see
    /// [`FilterError`] for the taxonomy.
    pub fn parse(input: &'a str) -> FilterResult<Filter> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(FilterError::EmptyExpression);
        }

        if !trimmed.starts_with('(') {
            return Self::parse_simple(trimmed);
        }

        let mut parser = Self {
            input: trimmed,
            pos: 0,
        };
        let filter = parser.parse_group()?;
        parser.skip_whitespace();
        if !parser.rest().is_empty() {
            return Err(FilterError::trailing_input(parser.rest()));
        }
        Ok(filter)
    }

    /// Parses the simple `key=value` form.
    ///
    /// A value of exactly `*` is a presence test; everything else is a
    /// literal equality (wildcards require the parenthesized form).
    fn parse_simple(input: &str) -> FilterResult<Filter> {
        let Some((attribute, value)) = input.split_once('=') else {
            return Err(FilterError::missing_operator(input));
        };
        let attribute = attribute.trim();
        let value = value.trim();
        if attribute.is_empty() {
            return Err(FilterError::missing_attribute(input));
        }
        if value == "*" {
            return Ok(Filter::Present(attribute.to_string()));
        }
        Ok(Filter::equals(attribute, value))
    }

    /// Returns the next character without consuming it.
    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consumes and returns the next character.
    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consumes the next character if it matches `expected`.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// The unconsumed remainder of the input.
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Parses one parenthesized filter: `'(' filtercontent ')'`.
    fn parse_group(&mut self) -> FilterResult<Filter> {
        self.skip_whitespace();
        let start = self.pos;
        if !self.eat('(') {
            return Err(FilterError::expected_group(self.rest()));
        }
        self.skip_whitespace();

        match self.peek() {
            None => Err(FilterError::unclosed(&self.input[start..])),

            Some('&') => {
                self.bump();
                let children = self.parse_operands()?;
                self.expect_close(start)?;
                if children.is_empty() {
                    return Err(FilterError::empty_group(&self.input[start..self.pos]));
                }
                Ok(Filter::And(children))
            }

            Some('|') => {
                self.bump();
                let children = self.parse_operands()?;
                self.expect_close(start)?;
                if children.is_empty() {
                    return Err(FilterError::empty_group(&self.input[start..self.pos]));
                }
                Ok(Filter::Or(children))
            }

            Some('!') => {
                self.bump();
                self.skip_whitespace();
                let inner = self.parse_group()?;
                self.expect_close(start)?;
                Ok(Filter::negate(inner))
            }

            Some(')') => {
                self.bump();
                Err(FilterError::empty_group(&self.input[start..self.pos]))
            }

            Some(_) => self.parse_item(start),
        }
    }

    /// Parses the `filter+` operand list of an AND/OR group.
    fn parse_operands(&mut self) -> FilterResult<Vec<Filter>> {
        let mut children = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some('(') {
                children.push(self.parse_group()?);
            } else {
                return Ok(children);
            }
        }
    }

    /// Consumes the closing parenthesis of the group opened at `start`.
    fn expect_close(&mut self, start: usize) -> FilterResult<()> {
        self.skip_whitespace();
        match self.peek() {
            Some(')') => {
                self.bump();
                Ok(())
            }
            Some(_) => Err(FilterError::expected_group(self.rest())),
            None => Err(FilterError::unclosed(&self.input[start..])),
        }
    }

    /// Parses an `attribute operator value` item; `start` is the byte offset
    /// of the item's opening parenthesis, used for error fragments.
    fn parse_item(&mut self, start: usize) -> FilterResult<Filter> {
        let attr_start = self.pos;
        while let Some(c) = self.peek() {
            if matches!(c, '=' | '>' | '<' | '(' | ')') {
                break;
            }
            self.bump();
        }
        let attribute = self.input[attr_start..self.pos].trim().to_string();

        let op = match self.peek() {
            None => return Err(FilterError::unclosed(&self.input[start..])),
            Some('(') | Some(')') => {
                return Err(FilterError::missing_operator(self.item_fragment(start)))
            }
            Some('=') => {
                self.bump();
                CompareOp::Eq
            }
            Some('>') => {
                self.bump();
                if self.eat('=') {
                    CompareOp::Ge
                } else {
                    CompareOp::Gt
                }
            }
            Some('<') => {
                self.bump();
                if self.eat('=') {
                    CompareOp::Le
                } else {
                    CompareOp::Lt
                }
            }
            // The scan above only stops on the characters handled here.
            Some(_) => unreachable!("attribute scan stopped on unexpected character"),
        };

        if attribute.is_empty() {
            return Err(FilterError::missing_attribute(self.item_fragment(start)));
        }

        let value_start = self.pos;
        while let Some(c) = self.peek() {
            if c == ')' {
                break;
            }
            self.bump();
        }
        if self.peek().is_none() {
            return Err(FilterError::unclosed(&self.input[start..]));
        }
        let value = self.input[value_start..self.pos].trim().to_string();
        self.bump(); // consume ')'

        if op == CompareOp::Eq {
            if value == "*" {
                return Ok(Filter::Present(attribute));
            }
            if value.contains('*') {
                return Ok(Filter::Substring {
                    attribute,
                    pattern: value,
                });
            }
        }

        Ok(Filter::Compare {
            attribute,
            op,
            value,
        })
    }

    /// The item text from `start` through its closing parenthesis (or the
    /// end of input), for error messages.
    fn item_fragment(&self, start: usize) -> &'a str {
        match self.rest().find(')') {
            Some(offset) => &self.input[start..self.pos + offset + ')'.len_utf8()],
            None => &self.input[start..],
        }
    }
}
