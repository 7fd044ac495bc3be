//! # tenang-core: Foundational Types for Tenang
//!
//! Leaf crate of the workspace. Everything the validation layer and the
//! CLI share lives here: the error hierarchy, the closed sets of values
//! the platform accepts for moderation and reporting, environment
//! configuration, and the helper that turns a stored upload path into a
//! displayable URL.
//!
//! ## Key Design Principles
//!
//! 1. **One enum per closed value set.** Moderation decisions, report
//!    reasons, reportable content types, report statuses and article
//!    categories are each defined exactly once. Schemas derive their
//!    allowed-value lists from these enums, so a new variant cannot be
//!    accepted by a typed request while being rejected by its schema.
//!
//! 2. **Upload paths never leave the storage origin by accident.** Only
//!    `http`/`https` URLs pass through unchanged; every other scheme is
//!    refused.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `tenang-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod domain;
pub mod error;
pub mod upload;

pub use config::TenangConfig;
pub use domain::{
    ArticleCategory, ModerationDecision, ReportReason, ReportStatus, ReportableType,
    MOOD_LEVEL_MAX, MOOD_LEVEL_MIN,
};
pub use error::{ConfigError, DomainError, SchemaError};
pub use upload::resolve_upload_url;
