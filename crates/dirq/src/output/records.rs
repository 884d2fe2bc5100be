//! Record output formatting.

use owo_colors::OwoColorize;
use serde::Serialize;

use dirq_directory::Record;

use super::helpers::{format_detail_value, format_record_count, format_value};

/// Widest a table cell gets before truncation.
const MAX_CELL_WIDTH: usize = 40;

/// JSON output structure for the search command.
#[derive(Serialize)]
struct SearchOutput {
    /// Total number of matches (before any limit).
    count: usize,
    /// The returned records, possibly projected.
    records: Vec<Record>,
}

/// Formats search results as JSON, applying the projection when present.
pub fn format_records_json(
    records: &[&Record],
    projection: Option<&[String]>,
    total: usize,
) -> Result<String, serde_json::Error> {
    let records: Vec<Record> = records
        .iter()
        .map(|record| project_record(record, projection))
        .collect();

    let output = SearchOutput {
        count: total,
        records,
    };

    serde_json::to_string_pretty(&output)
}

/// Projects a record down to the requested attributes (in projection order,
/// keeping the record's stored key spelling); without a projection the whole
/// record is kept.
fn project_record(record: &Record, projection: Option<&[String]>) -> Record {
    let Some(projection) = projection else {
        return record.clone();
    };

    let mut projected = Record::new();
    for name in projection {
        let name_lower = name.to_lowercase();
        if let Some((key, value)) = record
            .attributes()
            .find(|(key, _)| key.to_lowercase() == name_lower)
        {
            projected.set(key.to_string(), value.clone());
        }
    }
    projected
}

/// Formats search results as a table.
pub fn format_records_table(
    records: &[&Record],
    columns: &[String],
    total: usize,
    use_colors: bool,
) -> String {
    if records.is_empty() {
        return "No records found.\n".to_string();
    }

    // Render cells up front so column widths can fit the data
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| {
                    record
                        .get(column)
                        .map(|value| format_value(value, MAX_CELL_WIDTH))
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = columns.iter().map(|column| column.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut output = String::new();

    let header = format_row(columns.iter().map(String::as_str), &widths);
    if use_colors {
        output.push_str(&format!("{}\n", header.bold()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for row in &rows {
        output.push_str(&format_row(row.iter().map(String::as_str), &widths));
        output.push('\n');
    }

    let summary = if records.len() < total {
        format!(
            "\nShowing {} of {}\n",
            records.len(),
            format_record_count(total)
        )
    } else {
        format!("\n{}\n", format_record_count(total))
    };
    if use_colors {
        output.push_str(&summary.dimmed().to_string());
    } else {
        output.push_str(&summary);
    }

    output
}

/// Joins cells into one row with two-space gutters.
fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Formats a single record as JSON (show command).
pub fn format_record_details_json(record: &Record) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(record)
}

/// Formats a single record as a human-readable detail view (show command).
pub fn format_record_details_table(record: &Record, use_colors: bool) -> String {
    let label_width = record
        .attributes()
        .map(|(name, _)| name.len() + 1)
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for (name, value) in record.attributes() {
        let label = format!("{:<label_width$}", format!("{}:", name));
        let rendered = format_detail_value(value);
        if use_colors {
            output.push_str(&format!("{} {}\n", label.cyan(), rendered));
        } else {
            output.push_str(&format!("{} {}\n", label, rendered));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirq_directory::AttrValue;

    fn make_record() -> Record {
        let mut record = Record::new();
        record.set("sAMAccountName", "jsmith");
        record.set("cn", "John Smith");
        record.set("uidNumber", 1204i64);
        record.set(
            "memberOf",
            vec!["Admins".to_string(), "Users".to_string()],
        );
        record
    }

    #[test]
    fn test_table_lists_columns_and_summary() {
        let record = make_record();
        let records = vec![&record];
        let columns = vec!["sAMAccountName".to_string(), "uidNumber".to_string()];

        let table = format_records_table(&records, &columns, 1, false);
        let mut lines = table.lines();

        assert_eq!(lines.next(), Some("sAMAccountName  uidNumber"));
        assert_eq!(lines.next(), Some("jsmith          1204"));
        assert_eq!(lines.next(), Some(""));
        assert_eq!(lines.next(), Some("1 record"));
    }

    #[test]
    fn test_table_empty_results() {
        let columns = vec!["cn".to_string()];
        assert_eq!(
            format_records_table(&[], &columns, 0, false),
            "No records found.\n"
        );
    }

    #[test]
    fn test_table_truncation_note() {
        let record = make_record();
        let records = vec![&record];
        let columns = vec!["sAMAccountName".to_string()];

        let table = format_records_table(&records, &columns, 5, false);
        assert!(table.contains("Showing 1 of 5 records"));
    }

    #[test]
    fn test_table_missing_attribute_is_blank() {
        let record = make_record();
        let records = vec![&record];
        let columns = vec!["sAMAccountName".to_string(), "missing".to_string()];

        let table = format_records_table(&records, &columns, 1, false);
        assert!(table.lines().nth(1).unwrap().starts_with("jsmith"));
    }

    #[test]
    fn test_json_projection_keeps_spelling_and_order() {
        let record = make_record();
        let records = vec![&record];
        let projection = vec!["uidnumber".to_string(), "samaccountname".to_string()];

        let json = format_records_json(&records, Some(&projection), 1).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["count"], 1);
        let first = value["records"][0].as_object().unwrap();
        assert_eq!(first.len(), 2);
        // Stored spelling wins over the projection's casing, and the
        // projection order is kept in the rendered text
        assert!(json.contains("\"uidNumber\""));
        assert!(json.contains("\"sAMAccountName\""));
        assert!(json.find("uidNumber").unwrap() < json.find("sAMAccountName").unwrap());
    }

    #[test]
    fn test_json_without_projection_keeps_all_attributes() {
        let record = make_record();
        let records = vec![&record];

        let json = format_records_json(&records, None, 1).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let first = value["records"][0].as_object().unwrap();
        assert_eq!(first.len(), 4);
        assert_eq!(first["memberOf"], serde_json::json!(["Admins", "Users"]));
    }

    #[test]
    fn test_details_table_aligns_labels() {
        let record = make_record();
        let details = format_record_details_table(&record, false);

        assert!(details.contains("sAMAccountName: jsmith"));
        assert!(details.contains("uidNumber:"));
        // Labels are padded so every value starts in the same column
        let label_width = "sAMAccountName:".len();
        for line in details.lines() {
            assert_eq!(line.as_bytes()[label_width], b' ', "misaligned: {line}");
        }
    }

    #[test]
    fn test_details_json_is_full_record() {
        let record = make_record();
        let json = format_record_details_json(&record).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["sAMAccountName"], "jsmith");
        assert_eq!(value["uidNumber"], 1204);
    }

    #[test]
    fn test_list_value_renders_joined() {
        let value = AttrValue::List(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(format_value(&value, 40), "a; b");
    }
}
