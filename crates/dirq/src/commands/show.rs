//! Show command implementation.
//!
//! Looks up a single record by account name and prints its attributes.

use dirq_directory::Directory;

use super::{CommandContext, CommandError, Result};
use crate::output::{format_record_details_json, format_record_details_table};

/// Executes the show command.
///
/// # Errors
///
/// Returns [`CommandError::NotFound`] when no record carries the account
/// name; a close-enough existing name is suggested on stderr first.
pub fn execute(ctx: &CommandContext, account: &str, directory: &Directory) -> Result<()> {
    let Some(record) = directory.find_by_account(account) else {
        if !ctx.quiet && !ctx.json_output {
            if let Some(suggestion) = directory.suggest_account(account) {
                eprintln!("Did you mean '{suggestion}'?");
            }
        }
        return Err(CommandError::NotFound {
            account: account.to_string(),
        });
    };

    if ctx.json_output {
        println!("{}", format_record_details_json(record)?);
    } else if !ctx.quiet {
        print!("{}", format_record_details_table(record, ctx.use_colors));
    }

    Ok(())
}
