//! # tenang-schema
//!
//! Declarative validation for every payload the Tenang front-end sends:
//! sign-in and registration, articles and their moderation, mood and
//! journal entries, forum posts, chat messages, reports, playlists, and
//! query parameters.
//!
//! A [`Schema`] is built from [`Field`]s and [`CrossFieldRule`]s and
//! evaluated with [`validate`]. Validation never fails with an error:
//! malformed input produces a [`ValidationOutcome::Invalid`] carrying one
//! [`Issue`] per failing field, each with an Indonesian message ready to
//! show next to the form control.
//!
//! ```
//! use serde_json::json;
//! use tenang_schema::{catalog, names};
//!
//! let outcome = catalog()
//!     .validate(names::RECORD_MOOD, &json!({ "mood_level": 4 }))
//!     .unwrap();
//! assert!(outcome.is_success());
//! ```
//!
//! ## Crate Policy
//!
//! - Validation is synchronous and pure. No I/O, no shared mutable state.
//! - Unknown input keys are stripped from the output, never rejected.
//! - Free text is rejected, not sanitized, when it carries script markup.

pub mod catalog;
pub mod export;
pub mod field;
pub mod issue;
pub mod requests;
pub mod rule;
pub mod safety;
pub mod schema;

pub use catalog::{catalog, is_strong_password, names, SchemaCatalog};
pub use export::to_json_schema;
pub use field::{Check, Field, FieldKind};
pub use issue::{Issue, ValidationIssues, ValidationOutcome};
pub use requests::ValidatedRequest;
pub use rule::CrossFieldRule;
pub use safety::is_safe_text;
pub use schema::{validate, ParseError, Schema};
