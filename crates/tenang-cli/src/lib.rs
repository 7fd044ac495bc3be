//! # tenang-cli
//!
//! The `tenang` command-line tool. It exposes the validation catalog to
//! scripts and CI jobs so that fixture payloads, API examples, and
//! seeded data can be checked against the same rules the forms enforce.
//!
//! ## Subcommands
//!
//! - `tenang validate --schema <name> [PATH]` checks a JSON or YAML
//!   document and prints the outcome.
//! - `tenang schemas list` and `tenang schemas export <name>` inspect the
//!   catalog.
//! - `tenang upload-url <PATH>` resolves a stored upload path against the
//!   configured storage URL.
//!
//! ```bash
//! tenang validate --schema register payloads/register.yaml
//! echo '{"mood_level": 4}' | tenang validate --schema recordMood
//! tenang schemas export createArticle > createArticle.schema.json
//! ```
//!
//! Exit codes: 0 success, 1 validation failure or refused input,
//! 2 operational error.

pub mod schemas;
pub mod upload;
pub mod validate;
