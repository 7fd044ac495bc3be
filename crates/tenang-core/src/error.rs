//! # Error Hierarchy
//!
//! Structured error types shared across Tenang, built with `thiserror`.
//!
//! Malformed user input is *not* an error anywhere in this workspace: the
//! validation layer models it as data (a list of issues). The types here
//! cover the remaining failure classes: programmer misuse of the schema
//! catalog, bad environment configuration, and parsing closed value sets
//! from strings.

use thiserror::Error;

/// Misuse of the schema catalog.
///
/// Asking for a schema that was never defined is a bug in the caller,
/// not a property of the input being validated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// No schema is registered under the requested name.
    #[error("unknown schema \"{name}\"")]
    UnknownSchema {
        /// The name that was looked up.
        name: String,
    },
}

/// Errors while loading configuration from the environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A URL-valued variable could not be parsed.
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}

/// Errors while parsing a domain enum from its wire name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The string is not one of the enum's wire names.
    #[error("unknown {kind}: \"{value}\"")]
    UnknownVariant {
        /// Human-readable name of the value set (e.g. "report reason").
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
}
