//! Directory records and LDAP-style filter engine for dirq.
//!
//! This crate provides the in-memory directory model the `dirq` CLI queries:
//! typed attribute-value records, a read-only store that loads snapshots
//! from CSV or JSON files, and the filter parser/evaluator in [`filter`].

use chrono::{DateTime, Utc};
use std::path::PathBuf;

pub mod filter;
mod record;
mod store;

pub use record::{AttrValue, Record};
pub use store::{DirectoryStore, DirectoryStoreError};

/// The attribute used to identify a record for point lookups.
pub const ACCOUNT_ATTRIBUTE: &str = "sAMAccountName";

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// An in-memory directory snapshot.
///
/// The directory owns the record collection handed to the filter evaluator's
/// driving loop. It is read-only from the evaluator's perspective; mutation
/// discipline (if any) belongs to whoever builds it.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    /// All records, in load order.
    pub records: Vec<Record>,

    /// Path the snapshot was loaded from, when it came from a file.
    pub source: Option<PathBuf>,

    /// UTC timestamp of the load.
    pub loaded_at: Option<DateTime<Utc>>,
}

impl Directory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory from a record collection.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            records,
            source: None,
            loaded_at: None,
        }
    }

    /// Number of records in the directory.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when the directory holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finds a record by account name (case-insensitive match on
    /// `sAMAccountName`).
    pub fn find_by_account(&self, account: &str) -> Option<&Record> {
        let account_lower = account.to_lowercase();
        self.records.iter().find(|record| {
            record
                .get(ACCOUNT_ATTRIBUTE)
                .is_some_and(|value| value.to_string().to_lowercase() == account_lower)
        })
    }

    /// Suggests the closest existing account name for a failed lookup,
    /// when one is similar enough to be worth mentioning.
    pub fn suggest_account(&self, account: &str) -> Option<&str> {
        let account_lower = account.to_lowercase();
        self.records
            .iter()
            .filter_map(|record| record.get(ACCOUNT_ATTRIBUTE))
            .filter_map(|value| match value {
                AttrValue::Text(name) => Some(name.as_str()),
                _ => None,
            })
            .map(|name| {
                let score = strsim::jaro_winkler(&name.to_lowercase(), &account_lower);
                (name, score)
            })
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(name, _)| name)
    }

    /// Union of all attribute names across records, in first-seen order.
    pub fn attribute_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for record in &self.records {
            for (name, _) in record.attributes() {
                if !names.iter().any(|n| n.to_lowercase() == name.to_lowercase()) {
                    names.push(name.to_string());
                }
            }
        }
        names
    }
}
