//! Filter evaluation against directory records.
//!
//! This module provides the [`FilterEvaluator`] for evaluating parsed filter
//! expressions against [`Record`]s.
//!
//! Evaluation is a total function: a missing attribute, a type mismatch, or
//! a value that cannot be coerced to a number all resolve to `false` (or to
//! the documented lexicographic fallback), never to an error. Malformed
//! *data* can therefore never abort a scan; only malformed filter *syntax*
//! fails, and that happens at parse time.
//!
//! # Example
//!
//! ```
//! use dirq_directory::filter::{FilterEvaluator, FilterParser};
//! use dirq_directory::Record;
//!
//! let filter = FilterParser::parse("(&(objectClass=user)(uidNumber>=1000))").unwrap();
//! let evaluator = FilterEvaluator::new(&filter);
//!
//! let mut record = Record::new();
//! record.set("objectClass", "user");
//! record.set("uidNumber", 1204i64);
//!
//! assert!(evaluator.matches(&record));
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;

use regex::Regex;

use super::ast::{CompareOp, Filter};
use crate::record::{AttrValue, Record};

/// Evaluates a parsed filter against records.
///
/// The evaluator borrows the [`Filter`] and precompiles the matchers for any
/// wildcard patterns it contains, so evaluating a whole collection compiles
/// each pattern once.
#[derive(Debug)]
pub struct FilterEvaluator<'a> {
    filter: &'a Filter,
    matchers: HashMap<String, Regex>,
}

impl<'a> FilterEvaluator<'a> {
    /// Creates a new evaluator for the given filter.
    pub fn new(filter: &'a Filter) -> Self {
        let mut matchers = HashMap::new();
        collect_matchers(filter, &mut matchers);
        Self { filter, matchers }
    }

    /// Returns true if the record matches the filter.
    pub fn matches(&self, record: &Record) -> bool {
        self.evaluate(self.filter, record)
    }

    /// Filters a slice of records, returning the matching subsequence in
    /// input order.
    pub fn filter_records<'b>(&self, records: &'b [Record]) -> Vec<&'b Record> {
        records.iter().filter(|record| self.matches(record)).collect()
    }

    /// Evaluates a filter expression against a record.
    fn evaluate(&self, filter: &Filter, record: &Record) -> bool {
        match filter {
            Filter::And(children) => children.iter().all(|child| self.evaluate(child, record)),
            Filter::Or(children) => children.iter().any(|child| self.evaluate(child, record)),
            Filter::Not(inner) => !self.evaluate(inner, record),
            Filter::Present(attribute) => record
                .get(attribute)
                .is_some_and(|value| !value.is_empty()),
            Filter::Compare {
                attribute,
                op,
                value,
            } => self.compare(record, attribute, *op, value),
            Filter::Substring { attribute, pattern } => {
                self.substring_matches(record, attribute, pattern)
            }
        }
    }

    /// Evaluates a comparison item; absent attributes never match.
    fn compare(&self, record: &Record, attribute: &str, op: CompareOp, target: &str) -> bool {
        let Some(value) = record.get(attribute) else {
            return false;
        };
        match op {
            CompareOp::Eq => equals(value, target),
            _ => ordered(value, op, target),
        }
    }

    /// Evaluates a wildcard item against scalar values or any list element.
    fn substring_matches(&self, record: &Record, attribute: &str, pattern: &str) -> bool {
        let Some(value) = record.get(attribute) else {
            return false;
        };
        let Some(matcher) = self.matchers.get(pattern) else {
            return false;
        };
        match value {
            AttrValue::Text(s) => matcher.is_match(s),
            AttrValue::Number(n) => matcher.is_match(&n.to_string()),
            AttrValue::List(values) => values.iter().any(|s| matcher.is_match(s)),
        }
    }
}

/// Case-insensitive equality; lists match when any element matches.
fn equals(value: &AttrValue, target: &str) -> bool {
    let target_lower = target.to_lowercase();
    match value {
        AttrValue::Text(s) => s.to_lowercase() == target_lower,
        AttrValue::Number(n) => n.to_string() == target_lower,
        AttrValue::List(values) => values.iter().any(|s| s.to_lowercase() == target_lower),
    }
}

/// Ordering comparison; lists match when any element satisfies it.
fn ordered(value: &AttrValue, op: CompareOp, target: &str) -> bool {
    match value {
        AttrValue::Text(s) => ordered_scalar(s, op, target),
        AttrValue::Number(n) => ordered_scalar(&n.to_string(), op, target),
        AttrValue::List(values) => values.iter().any(|s| ordered_scalar(s, op, target)),
    }
}

/// Compares one scalar against the filter value.
///
/// Both sides are first coerced to `i64`; when both coerce the numeric
/// ordering applies. Otherwise both sides are lowercased and compared
/// lexicographically with the same operator. The fallback is deterministic
/// and intentionally matches no particular LDAP server.
fn ordered_scalar(value: &str, op: CompareOp, target: &str) -> bool {
    let ordering = match (value.trim().parse::<i64>(), target.trim().parse::<i64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => value.to_lowercase().cmp(&target.to_lowercase()),
    };
    match op {
        CompareOp::Eq => ordering == Ordering::Equal,
        CompareOp::Ge => ordering != Ordering::Less,
        CompareOp::Gt => ordering == Ordering::Greater,
        CompareOp::Le => ordering != Ordering::Greater,
        CompareOp::Lt => ordering == Ordering::Less,
    }
}

/// Walks the filter and compiles a matcher for every distinct wildcard
/// pattern.
fn collect_matchers(filter: &Filter, matchers: &mut HashMap<String, Regex>) {
    match filter {
        Filter::And(children) | Filter::Or(children) => {
            for child in children {
                collect_matchers(child, matchers);
            }
        }
        Filter::Not(inner) => collect_matchers(inner, matchers),
        Filter::Substring { pattern, .. } => {
            if !matchers.contains_key(pattern) {
                if let Some(matcher) = compile_pattern(pattern) {
                    matchers.insert(pattern.clone(), matcher);
                }
            }
        }
        Filter::Compare { .. } | Filter::Present(_) => {}
    }
}

/// Translates a `*` wildcard pattern into an anchored, case-insensitive
/// regex. Non-wildcard characters match literally; `*` matches any run of
/// zero or more characters.
fn compile_pattern(pattern: &str) -> Option<Regex> {
    let mut source = String::with_capacity(pattern.len() + 8);
    source.push_str("(?i)^");
    for (i, segment) in pattern.split('*').enumerate() {
        if i > 0 {
            source.push_str(".*");
        }
        source.push_str(&regex::escape(segment));
    }
    source.push('$');
    Regex::new(&source).ok()
}
