//! Search command implementation.
//!
//! Filters directory records with an optional filter expression, then sorts,
//! limits, and projects them for display. Filtering preserves record order;
//! sorting and projection are display concerns applied afterwards.

use std::cmp::Ordering;

use dirq_directory::filter::{FilterEvaluator, FilterParser};
use dirq_directory::{Directory, Record};

use super::{CommandContext, Result};
use crate::output::{format_records_json, format_records_table};

/// Columns shown when the user does not project explicitly, in preference
/// order; only those that occur in the directory are used.
const PREFERRED_COLUMNS: &[&str] = &["sAMAccountName", "cn", "uidNumber", "mail", "memberOf"];

/// Number of fallback columns when none of the preferred ones exist.
const FALLBACK_COLUMN_COUNT: usize = 5;

/// Options for the search command.
#[derive(Debug)]
pub struct SearchOptions {
    /// Filter expression; matches everything when absent.
    pub filter: Option<String>,
    /// Comma-separated projection attributes.
    pub attrs: Option<String>,
    /// Limit results.
    pub limit: u32,
    /// Show all matches (no limit).
    pub all: bool,
    /// Sort attribute.
    pub sort: Option<String>,
    /// Reverse sort order.
    pub reverse: bool,
    /// Print only the number of matches.
    pub count: bool,
}

/// Executes the search command.
///
/// # Errors
///
/// Returns an error if the filter expression is invalid.
pub fn execute(ctx: &CommandContext, opts: &SearchOptions, directory: &Directory) -> Result<()> {
    let records = matching_records(directory, opts)?;
    let records = sort_records(records, opts);

    let total = records.len();
    let records = apply_limit(records, opts);

    if opts.count {
        if ctx.json_output {
            println!("{}", serde_json::json!({ "count": total }));
        } else if !ctx.quiet {
            println!("{total}");
        }
        return Ok(());
    }

    let projection = parse_projection(opts.attrs.as_deref());

    if ctx.json_output {
        let output = format_records_json(&records, projection.as_deref(), total)?;
        println!("{output}");
    } else if !ctx.quiet {
        let columns = projection.unwrap_or_else(|| default_columns(directory));
        let output = format_records_table(&records, &columns, total, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}

/// Applies the filter expression, preserving record order.
fn matching_records<'a>(
    directory: &'a Directory,
    opts: &SearchOptions,
) -> Result<Vec<&'a Record>> {
    match &opts.filter {
        Some(expression) => {
            let filter = FilterParser::parse(expression)?;
            let evaluator = FilterEvaluator::new(&filter);
            Ok(evaluator.filter_records(&directory.records))
        }
        None => Ok(directory.records.iter().collect()),
    }
}

/// Sorts records by the requested attribute (stable; records without the
/// attribute sort last), then applies the reverse flag.
fn sort_records<'a>(mut records: Vec<&'a Record>, opts: &SearchOptions) -> Vec<&'a Record> {
    if let Some(attribute) = &opts.sort {
        records.sort_by(|a, b| compare_by_attribute(a, b, attribute));
    }

    if opts.reverse {
        records.reverse();
    }

    records
}

/// Compares two records by one attribute, numerically when both values
/// coerce and case-insensitively otherwise.
fn compare_by_attribute(a: &Record, b: &Record, attribute: &str) -> Ordering {
    match (a.get(attribute), b.get(attribute)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match (a.as_number(), b.as_number()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => a
                .to_string()
                .to_lowercase()
                .cmp(&b.to_string().to_lowercase()),
        },
    }
}

/// Applies the limit to the records.
fn apply_limit<'a>(records: Vec<&'a Record>, opts: &SearchOptions) -> Vec<&'a Record> {
    if opts.all {
        return records;
    }
    records.into_iter().take(opts.limit as usize).collect()
}

/// Splits a `--attrs a,b,c` projection into attribute names.
fn parse_projection(attrs: Option<&str>) -> Option<Vec<String>> {
    let attrs = attrs?;
    let names: Vec<String> = attrs
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}

/// Picks table columns when the user did not project: the preferred columns
/// that occur in the directory, or the first few attribute names otherwise.
fn default_columns(directory: &Directory) -> Vec<String> {
    let names = directory.attribute_names();
    let preferred: Vec<String> = PREFERRED_COLUMNS
        .iter()
        .filter(|preferred| {
            names
                .iter()
                .any(|name| name.to_lowercase() == preferred.to_lowercase())
        })
        .map(|name| name.to_string())
        .collect();

    if preferred.is_empty() {
        names.into_iter().take(FALLBACK_COLUMN_COUNT).collect()
    } else {
        preferred
    }
}
