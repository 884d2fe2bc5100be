//! Directory snapshot loading.
//!
//! This module loads a directory snapshot from a data file into a
//! [`Directory`]. Two formats are supported, selected by file extension:
//!
//! - `.csv` - one record per row, headers as attribute names
//! - `.json` - an array of objects
//!
//! The store is read-only: records are materialized once per load and the
//! file is never written back.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;

use crate::record::{AttrValue, Record};
use crate::Directory;

/// Attributes that are conventionally multi-valued and always split on `;`,
/// even when a cell holds a single value.
const MULTI_VALUED_ATTRIBUTES: &[&str] = &["memberOf"];

/// Errors that can occur while loading a directory snapshot.
#[derive(Debug, Error)]
pub enum DirectoryStoreError {
    /// I/O error during file read.
    #[error("failed to read data file '{path}': {source}")]
    ReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file extension does not map to a known format.
    #[error("unsupported data format '{path}': expected a .csv or .json file")]
    UnsupportedFormat {
        /// The offending path.
        path: PathBuf,
    },

    /// Malformed CSV content.
    #[error("failed to parse CSV data in '{path}': {source}")]
    Csv {
        /// The file being parsed.
        path: PathBuf,
        /// The underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Malformed JSON content.
    #[error("failed to parse JSON data in '{path}': {source}")]
    Json {
        /// The file being parsed.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, DirectoryStoreError>;

/// Loads directory snapshots from a data file.
///
/// # Example
///
/// ```no_run
/// use std::path::PathBuf;
/// use dirq_directory::DirectoryStore;
///
/// let store = DirectoryStore::new(PathBuf::from("users.csv"));
/// let directory = store.load()?;
/// println!("{} records", directory.len());
/// # Ok::<(), dirq_directory::DirectoryStoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    /// Path to the data file.
    path: PathBuf,
}

impl DirectoryStore {
    /// Creates a store for the given data file.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the path to the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the directory snapshot, picking the format from the file
    /// extension.
    ///
    /// # Errors
    ///
    /// - [`DirectoryStoreError::ReadError`] if the file cannot be read.
    /// - [`DirectoryStoreError::UnsupportedFormat`] for unknown extensions.
    /// - [`DirectoryStoreError::Csv`] / [`DirectoryStoreError::Json`] for
    ///   malformed content.
    pub fn load(&self) -> Result<Directory> {
        let extension = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        let records = match extension.as_deref() {
            Some("csv") => self.load_csv()?,
            Some("json") => self.load_json()?,
            _ => {
                return Err(DirectoryStoreError::UnsupportedFormat {
                    path: self.path.clone(),
                })
            }
        };

        Ok(Directory {
            records,
            source: Some(self.path.clone()),
            loaded_at: Some(Utc::now()),
        })
    }

    /// Loads records from a CSV file; headers become attribute names.
    fn load_csv(&self) -> Result<Vec<Record>> {
        let contents = self.read_contents()?;
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(contents.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| self.csv_error(e))?
            .clone();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| self.csv_error(e))?;
            let mut record = Record::new();
            for (header, cell) in headers.iter().zip(row.iter()) {
                record.set(header, parse_cell(header, cell));
            }
            records.push(record);
        }
        Ok(records)
    }

    /// Loads records from a JSON array of objects.
    fn load_json(&self) -> Result<Vec<Record>> {
        let contents = self.read_contents()?;
        serde_json::from_str(&contents).map_err(|source| DirectoryStoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    fn read_contents(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|source| DirectoryStoreError::ReadError {
            path: self.path.clone(),
            source,
        })
    }

    fn csv_error(&self, source: csv::Error) -> DirectoryStoreError {
        DirectoryStoreError::Csv {
            path: self.path.clone(),
            source,
        }
    }
}

/// Types a CSV cell.
///
/// Cells under conventionally multi-valued headers, and any cell containing
/// `;`, split into a list (trimmed, empties dropped). A cell that parses as
/// an `i64` and round-trips exactly becomes a number, so zero-padded strings
/// keep their text form. Everything else stays text.
fn parse_cell(header: &str, cell: &str) -> AttrValue {
    let multi_valued = cell.contains(';')
        || MULTI_VALUED_ATTRIBUTES
            .iter()
            .any(|name| name.to_lowercase() == header.to_lowercase());

    if multi_valued {
        let values: Vec<String> = cell
            .split(';')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();
        return AttrValue::List(values);
    }

    if let Ok(number) = cell.parse::<i64>() {
        if number.to_string() == cell {
            return AttrValue::Number(number);
        }
    }

    AttrValue::Text(cell.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).expect("failed to create test file");
        file.write_all(contents.as_bytes())
            .expect("failed to write test file");
        path
    }

    const USERS_CSV: &str = "\
dn,cn,sAMAccountName,uidNumber,memberOf,mail,telephoneNumber,userAccountControl
\"cn=jsmith,dc=example,dc=com\",John Smith,jsmith,1204,Admins;Users,jsmith@example.com,0734,512
\"cn=jdoe,dc=example,dc=com\",Jane Doe,jdoe,1205,Users,jdoe@example.com,5551234,514
";

    #[test]
    fn test_load_csv_types_cells() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "users.csv", USERS_CSV);

        let directory = DirectoryStore::new(path).load().unwrap();
        assert_eq!(directory.len(), 2);

        let jsmith = directory.find_by_account("jsmith").unwrap();
        assert_eq!(jsmith.get("cn"), Some(&AttrValue::text("John Smith")));
        assert_eq!(jsmith.get("uidNumber"), Some(&AttrValue::Number(1204)));
        assert_eq!(
            jsmith.get("memberOf"),
            Some(&AttrValue::List(vec![
                "Admins".to_string(),
                "Users".to_string()
            ]))
        );
        // Leading zero does not round-trip as i64, so the text form stays.
        assert_eq!(
            jsmith.get("telephoneNumber"),
            Some(&AttrValue::text("0734"))
        );
        assert_eq!(
            jsmith.get("userAccountControl"),
            Some(&AttrValue::Number(512))
        );
    }

    #[test]
    fn test_load_csv_single_membership_is_still_a_list() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "users.csv", USERS_CSV);

        let directory = DirectoryStore::new(path).load().unwrap();
        let jdoe = directory.find_by_account("jdoe").unwrap();
        assert_eq!(
            jdoe.get("memberOf"),
            Some(&AttrValue::List(vec!["Users".to_string()]))
        );
    }

    #[test]
    fn test_load_csv_sets_provenance() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "users.csv", USERS_CSV);

        let directory = DirectoryStore::new(path.clone()).load().unwrap();
        assert_eq!(directory.source, Some(path));
        assert!(directory.loaded_at.is_some());
    }

    #[test]
    fn test_load_json_array_of_objects() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "users.json",
            r#"[
                {"sAMAccountName": "alice", "uidNumber": 1001, "memberOf": ["Admins"]},
                {"sAMAccountName": "bob", "mail": "bob@example.com"}
            ]"#,
        );

        let directory = DirectoryStore::new(path).load().unwrap();
        assert_eq!(directory.len(), 2);

        let alice = directory.find_by_account("alice").unwrap();
        assert_eq!(alice.get("uidNumber"), Some(&AttrValue::Number(1001)));
        assert_eq!(
            alice.get("memberOf"),
            Some(&AttrValue::List(vec!["Admins".to_string()]))
        );
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let store = DirectoryStore::new(PathBuf::from("/nonexistent/users.csv"));
        let err = store.load().unwrap_err();

        assert!(matches!(err, DirectoryStoreError::ReadError { .. }));
        assert!(err.to_string().contains("/nonexistent/users.csv"));
    }

    #[test]
    fn test_load_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "users.xml", "<users/>");

        let err = DirectoryStore::new(path).load().unwrap_err();
        assert!(matches!(err, DirectoryStoreError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_load_malformed_json_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "users.json", "{not json");

        let err = DirectoryStore::new(path).load().unwrap_err();
        assert!(matches!(err, DirectoryStoreError::Json { .. }));
        assert!(err.to_string().contains("users.json"));
    }

    #[test]
    fn test_parse_cell_rules() {
        assert_eq!(parse_cell("cn", "John"), AttrValue::text("John"));
        assert_eq!(parse_cell("uidNumber", "1204"), AttrValue::Number(1204));
        assert_eq!(parse_cell("ext", "0042"), AttrValue::text("0042"));
        assert_eq!(
            parse_cell("memberOf", "Admins"),
            AttrValue::List(vec!["Admins".to_string()])
        );
        assert_eq!(
            parse_cell("groups", "a; b ;;c"),
            AttrValue::List(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
        assert_eq!(parse_cell("memberOf", ""), AttrValue::List(vec![]));
    }
}
