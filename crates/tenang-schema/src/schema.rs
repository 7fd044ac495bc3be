//! # Schemas and Validation
//!
//! A [`Schema`] is an ordered list of [`Field`]s plus a list of
//! [`CrossFieldRule`]s. [`validate`] evaluates it in two phases:
//!
//! 1. Every field, in declaration order. No short-circuit across fields:
//!    each failing field contributes its first failing message.
//! 2. Every cross-field rule whose dependencies validated, against the
//!    output object built in phase 1.
//!
//! The input is valid iff both phases produced zero issues. Evaluating
//! everything before deciding lets a form show every problem at once.
//!
//! ## Failure Semantics
//!
//! Malformed input is an expected outcome, not an error: `validate` never
//! panics and always returns a [`ValidationOutcome`]. An input that is not
//! an object at all (`null`, an array, a string) yields one root issue.
//!
//! ## Thread Safety
//!
//! `Schema` is immutable after construction and `Send + Sync`; one instance
//! serves any number of concurrent callers.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tenang_core::SchemaError;
use thiserror::Error;

use crate::field::{Field, FieldOutcome};
use crate::issue::{Issue, ValidationIssues, ValidationOutcome};
use crate::rule::CrossFieldRule;

/// Message for inputs that are not JSON objects.
pub const NOT_AN_OBJECT: &str = "Input harus berupa objek";

/// Error from decoding a validated input into a typed request.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The input failed validation.
    #[error("validation failed against schema '{schema_name}':\n{issues}")]
    Invalid {
        /// Name of the schema that was validated against.
        schema_name: String,
        /// Structured list of individual issues.
        issues: ValidationIssues,
    },

    /// The validated output does not fit the target type. This is a
    /// mismatch between a schema and its request struct, not bad input.
    #[error("schema '{schema_name}' output does not decode into the request type: {source}")]
    Decode {
        /// Name of the schema whose output failed to decode.
        schema_name: String,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// The schema name is not in the catalog.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl ParseError {
    /// The validation issues, if this is an `Invalid` error.
    pub fn issues(&self) -> Option<&ValidationIssues> {
        match self {
            ParseError::Invalid { issues, .. } => Some(issues),
            _ => None,
        }
    }
}

/// A named, immutable set of validation rules for one input shape.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    fields: Vec<Field>,
    rules: Vec<CrossFieldRule>,
    partial: bool,
}

impl Schema {
    /// An empty schema. Add fields and rules with [`field`](Self::field)
    /// and [`rule`](Self::rule).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            rules: Vec::new(),
            partial: false,
        }
    }

    /// Append a field. Field names must be unique within a schema.
    pub fn field(mut self, field: Field) -> Self {
        debug_assert!(
            self.fields.iter().all(|f| f.name() != field.name()),
            "duplicate field '{}' in schema '{}'",
            field.name(),
            self.name
        );
        self.fields.push(field);
        self
    }

    /// Append a cross-field rule.
    pub fn rule(mut self, rule: CrossFieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// A relaxed copy for update payloads: every field optional, defaults
    /// dropped, all checks and cross-field rules kept.
    pub fn partial(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: self.fields.iter().map(Field::relaxed).collect(),
            rules: self.rules.clone(),
            partial: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn rules(&self) -> &[CrossFieldRule] {
        &self.rules
    }

    /// True for schemas built with [`partial`](Self::partial).
    pub fn is_partial(&self) -> bool {
        self.partial
    }

    /// Look up a field by name.
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Validate `input` against this schema.
    pub fn validate(&self, input: &Value) -> ValidationOutcome {
        let Some(object) = input.as_object() else {
            tracing::debug!(schema = %self.name, "rejected non-object input");
            return ValidationOutcome::Invalid(ValidationIssues::new(vec![Issue::root(
                NOT_AN_OBJECT,
            )]));
        };

        let mut issues = Vec::new();
        let mut data = Map::new();
        let mut failed: HashSet<&str> = HashSet::new();

        for field in &self.fields {
            match field.evaluate(object.get(field.name())) {
                FieldOutcome::Valid(value) => {
                    data.insert(field.name().to_string(), value);
                }
                FieldOutcome::Missing => {}
                FieldOutcome::Invalid(message) => {
                    tracing::trace!(schema = %self.name, field = field.name(), %message, "field rejected");
                    failed.insert(field.name());
                    issues.push(Issue::at(field.name(), message));
                }
            }
        }

        for rule in &self.rules {
            if rule.applies(&data, &failed) && !rule.holds(&data) {
                tracing::trace!(schema = %self.name, target = rule.target(), "cross-field rule failed");
                issues.push(Issue::at(rule.target(), rule.message()));
            }
        }

        tracing::debug!(schema = %self.name, issues = issues.len(), "validated input");

        if issues.is_empty() {
            ValidationOutcome::Valid(Value::Object(data))
        } else {
            ValidationOutcome::Invalid(ValidationIssues::new(issues))
        }
    }

    /// Validate `input`, then decode the output into `T`.
    pub fn parse<T: DeserializeOwned>(&self, input: &Value) -> Result<T, ParseError> {
        match self.validate(input) {
            ValidationOutcome::Valid(data) => {
                serde_json::from_value(data).map_err(|source| ParseError::Decode {
                    schema_name: self.name.clone(),
                    source,
                })
            }
            ValidationOutcome::Invalid(issues) => Err(ParseError::Invalid {
                schema_name: self.name.clone(),
                issues,
            }),
        }
    }
}

/// Validate `input` against `schema`. Never panics.
pub fn validate(schema: &Schema, input: &Value) -> ValidationOutcome {
    schema.validate(input)
}
