//! # Validate Subcommand
//!
//! Validates one document against a named catalog schema and prints the
//! outcome in its wire form (`{ success, data }` or `{ success, issues }`).
//!
//! Documents are JSON or YAML, chosen by file extension. Standard input
//! is read when no path (or `-`) is given; it is parsed as JSON first and
//! as YAML if that fails.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use tenang_schema::{catalog, ValidationOutcome};

/// Arguments for the `tenang validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Catalog schema to validate against (see `tenang schemas list`).
    #[arg(long, short)]
    pub schema: String,

    /// JSON or YAML document. Reads stdin when omitted or `-`.
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when the document is valid, 1 when it is not.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let document = load_document(args.path.as_deref())?;
    let outcome = validate_document(&args.schema, &document)?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(if outcome.is_success() { 0 } else { 1 })
}

/// Validate a parsed document against the named schema.
pub fn validate_document(schema_name: &str, document: &Value) -> Result<ValidationOutcome> {
    let schema = catalog()
        .get(schema_name)
        .with_context(|| format!("cannot validate against '{schema_name}'"))?;
    let outcome = schema.validate(document);
    tracing::info!(
        schema = schema.name(),
        valid = outcome.is_success(),
        issues = outcome.issues().len(),
        "validated document"
    );
    Ok(outcome)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentFormat {
    Json,
    Yaml,
    /// JSON, falling back to YAML.
    Sniff,
}

impl DocumentFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => DocumentFormat::Yaml,
            Some("json") => DocumentFormat::Json,
            _ => DocumentFormat::Sniff,
        }
    }
}

/// Load a document from `path`, or from stdin when `path` is `None` or `-`.
pub fn load_document(path: Option<&Path>) -> Result<Value> {
    match path {
        Some(p) if p != Path::new("-") => {
            let content = fs::read_to_string(p)
                .with_context(|| format!("failed to read {}", p.display()))?;
            parse_document(&content, DocumentFormat::from_path(p))
                .with_context(|| format!("failed to parse {}", p.display()))
        }
        _ => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("failed to read standard input")?;
            parse_document(&content, DocumentFormat::Sniff)
                .context("failed to parse standard input")
        }
    }
}

fn parse_document(content: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => Ok(serde_json::from_str(content)?),
        DocumentFormat::Yaml => parse_yaml(content),
        DocumentFormat::Sniff => match serde_json::from_str(content) {
            Ok(value) => Ok(value),
            Err(_) => parse_yaml(content),
        },
    }
}

fn parse_yaml(content: &str) -> Result<Value> {
    let mut yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
    yaml.apply_merge()?;
    yaml_to_json(yaml)
}

/// Convert a YAML document into JSON. Tags are dropped and scalar map keys
/// stringified; composite keys are rejected.
fn yaml_to_json(yaml: serde_yaml::Value) -> Result<Value> {
    use serde_yaml::Value as Yaml;

    Ok(match yaml {
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<_>>()?,
        ),
        Yaml::Mapping(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| Ok((yaml_key(k)?, yaml_to_json(v)?)))
                .collect::<Result<_>>()?,
        ),
        scalar => serde_json::to_value(scalar)?,
    })
}

fn yaml_key(key: serde_yaml::Value) -> Result<String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        other => anyhow::bail!("unsupported YAML map key: {other:?}"),
    }
}
