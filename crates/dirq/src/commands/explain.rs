//! Explain command implementation.
//!
//! Parses a filter expression and prints its canonical form and node tree,
//! or the parse error. Useful for debugging hand-written filters.

use std::fmt::Write as _;

use dirq_directory::filter::{Filter, FilterParser};
use owo_colors::OwoColorize;

use super::{CommandContext, Result};

/// Executes the explain command.
///
/// # Errors
///
/// Returns the filter error when the expression does not parse; the error
/// message names the offending fragment.
pub fn execute(ctx: &CommandContext, expression: &str) -> Result<()> {
    let filter = FilterParser::parse(expression)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "input": expression,
            "canonical": filter.to_string(),
            "tree": filter,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        if ctx.use_colors {
            println!("{}", filter.to_string().bold());
        } else {
            println!("{filter}");
        }
        print!("{}", render_tree(&filter));
    }

    Ok(())
}

/// Renders the filter as an indented node tree.
fn render_tree(filter: &Filter) -> String {
    let mut output = String::new();
    render_node(filter, 0, &mut output);
    output
}

fn render_node(filter: &Filter, depth: usize, output: &mut String) {
    let indent = "  ".repeat(depth);
    match filter {
        Filter::And(children) => {
            let _ = writeln!(output, "{indent}AND");
            for child in children {
                render_node(child, depth + 1, output);
            }
        }
        Filter::Or(children) => {
            let _ = writeln!(output, "{indent}OR");
            for child in children {
                render_node(child, depth + 1, output);
            }
        }
        Filter::Not(inner) => {
            let _ = writeln!(output, "{indent}NOT");
            render_node(inner, depth + 1, output);
        }
        Filter::Compare {
            attribute,
            op,
            value,
        } => {
            let _ = writeln!(output, "{indent}{attribute} {op} {value}");
        }
        Filter::Present(attribute) => {
            let _ = writeln!(output, "{indent}{attribute} present");
        }
        Filter::Substring { attribute, pattern } => {
            let _ = writeln!(output, "{indent}{attribute} matches {pattern}");
        }
    }
}
