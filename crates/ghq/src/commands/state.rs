//! Has-state command implementation.

use gh_query_rs::query_has_state_clause;
use serde::Serialize;

use super::{CommandContext, Result};

#[derive(Debug, Serialize)]
struct HasStateOutput<'a> {
    query: &'a str,
    has_state: bool,
}

/// Prints whether `query` already carries an open/closed/merged qualifier.
pub fn execute(ctx: &CommandContext, query: &str) -> Result<()> {
    let output = HasStateOutput {
        query,
        has_state: query_has_state_clause(query),
    };

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("{}", output.has_state);
    }

    Ok(())
}
