//! Output formatting utilities for the dirq CLI.
//!
//! This module provides functions for formatting data as tables or JSON:
//!
//! - [`records`] - Record output formatting (search results, show details)
//! - [`helpers`] - Common formatting utilities (truncation, values, datetimes)

pub mod helpers;
mod records;

pub use records::{
    format_record_details_json, format_record_details_table, format_records_json,
    format_records_table,
};
