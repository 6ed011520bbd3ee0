//! Analyze command implementation.

use anyhow::Result;
use console::style;
use radqec_core::analyze;

use super::common::{OutputFormat, load_counts, print_classification, print_outcomes};

/// Execute the analyze command.
pub fn execute(input: &str, format: OutputFormat) -> Result<()> {
    let outcomes = load_counts(input)?;
    let summary = analyze(&outcomes);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Table => {
            println!(
                "{} Analyzing {} ({} distinct outcomes)",
                style("→").cyan().bold(),
                style(input).green(),
                outcomes.len()
            );
            print_classification("Syndrome distribution (post-selected)", &summary);
            print_outcomes(&outcomes);
        }
    }
    Ok(())
}
