//! # Schemas Subcommand
//!
//! Catalog inspection: list schema names, or export one schema as a JSON
//! Schema document for API docs and contract tests.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use tenang_schema::{catalog, to_json_schema, Schema};

/// Arguments for the `tenang schemas` subcommand.
#[derive(Args, Debug)]
pub struct SchemasArgs {
    #[command(subcommand)]
    pub command: SchemasCommand,
}

#[derive(Subcommand, Debug)]
pub enum SchemasCommand {
    /// List every schema with its field count.
    List {
        /// Print a JSON array instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Print one schema as a JSON Schema (draft 2020-12) document.
    Export {
        /// Schema name, e.g. `createArticle`.
        name: String,
    },
}

/// One row of `tenang schemas list`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SchemaSummary {
    pub name: String,
    pub fields: usize,
    pub required: usize,
    pub rules: usize,
    pub partial: bool,
}

impl From<&Schema> for SchemaSummary {
    fn from(schema: &Schema) -> Self {
        Self {
            name: schema.name().to_string(),
            fields: schema.fields().len(),
            required: schema.fields().iter().filter(|f| f.is_required()).count(),
            rules: schema.rules().len(),
            partial: schema.is_partial(),
        }
    }
}

/// Execute the schemas subcommand.
pub fn run_schemas(args: &SchemasArgs) -> Result<u8> {
    match &args.command {
        SchemasCommand::List { json } => {
            let rows = summaries();
            if *json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in &rows {
                    println!("{}", format_row(row));
                }
            }
            Ok(0)
        }
        SchemasCommand::Export { name } => {
            let schema = catalog()
                .get(name)
                .with_context(|| format!("cannot export '{name}'"))?;
            println!("{}", serde_json::to_string_pretty(&to_json_schema(schema))?);
            Ok(0)
        }
    }
}

/// Summaries of every catalog schema, in name order.
pub fn summaries() -> Vec<SchemaSummary> {
    catalog().iter().map(SchemaSummary::from).collect()
}

fn format_row(row: &SchemaSummary) -> String {
    let mut line = format!(
        "{:<18} {:>2} fields ({} required)",
        row.name, row.fields, row.required
    );
    if row.rules > 0 {
        line.push_str(&format!(", {} rules", row.rules));
    }
    if row.partial {
        line.push_str(", partial");
    }
    line
}
