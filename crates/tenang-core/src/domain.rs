//! # Closed Value Sets
//!
//! Every enumerated value the platform accepts from a client is defined
//! here exactly once. Each enum exposes its wire names as a `NAMES` slice
//! (consumed by the schema catalog for enum-membership checks), implements
//! `Display`/`FromStr` over those names, and serializes with the same
//! names through serde.
//!
//! The `NAMES` slices and the `as_str()` matches must agree; the tests at
//! the bottom of this file enforce that for every variant.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Lowest accepted mood rating.
pub const MOOD_LEVEL_MIN: i64 = 1;

/// Highest accepted mood rating.
pub const MOOD_LEVEL_MAX: i64 = 5;

// ---------------------------------------------------------------------------
// Moderation
// ---------------------------------------------------------------------------

/// Decision a moderator records on a submitted article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationDecision {
    /// Publish the article.
    Approve,
    /// Send the article back to its author. Requires a reason.
    Reject,
}

impl ModerationDecision {
    /// Wire names, in declaration order.
    pub const NAMES: &'static [&'static str] = &["approve", "reject"];

    /// All variants, in declaration order.
    pub fn all() -> &'static [ModerationDecision] {
        &[Self::Approve, Self::Reject]
    }

    /// The wire name of this decision.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

/// Why a user flagged a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportReason {
    /// Unsolicited promotion or repeated junk.
    Spam,
    /// Targeted abuse of another member.
    Harassment,
    /// Attacks on a protected group.
    HateSpeech,
    /// Content encouraging self-harm. Routed to the crisis queue.
    SelfHarm,
    /// Health claims that are false or dangerous.
    Misinformation,
    /// Anything unsuitable for the community that fits no other reason.
    Inappropriate,
    /// Free-form reason; the report must carry a description.
    Other,
}

impl ReportReason {
    /// Wire names, in declaration order.
    pub const NAMES: &'static [&'static str] = &[
        "spam",
        "harassment",
        "hate_speech",
        "self_harm",
        "misinformation",
        "inappropriate",
        "other",
    ];

    /// All variants, in declaration order.
    pub fn all() -> &'static [ReportReason] {
        &[
            Self::Spam,
            Self::Harassment,
            Self::HateSpeech,
            Self::SelfHarm,
            Self::Misinformation,
            Self::Inappropriate,
            Self::Other,
        ]
    }

    /// The wire name of this reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spam => "spam",
            Self::Harassment => "harassment",
            Self::HateSpeech => "hate_speech",
            Self::SelfHarm => "self_harm",
            Self::Misinformation => "misinformation",
            Self::Inappropriate => "inappropriate",
            Self::Other => "other",
        }
    }
}

/// Kind of content a report points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportableType {
    Article,
    ForumPost,
    ForumComment,
    ChatMessage,
}

impl ReportableType {
    /// Wire names, in declaration order.
    pub const NAMES: &'static [&'static str] =
        &["article", "forum_post", "forum_comment", "chat_message"];

    /// All variants, in declaration order.
    pub fn all() -> &'static [ReportableType] {
        &[
            Self::Article,
            Self::ForumPost,
            Self::ForumComment,
            Self::ChatMessage,
        ]
    }

    /// The wire name of this content type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::ForumPost => "forum_post",
            Self::ForumComment => "forum_comment",
            Self::ChatMessage => "chat_message",
        }
    }
}

/// Review state of a report in the moderation queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Filed, not yet looked at.
    Pending,
    /// A moderator has looked at it.
    Reviewed,
    /// Action was taken on the reported content.
    Resolved,
    /// No action needed.
    Dismissed,
}

impl ReportStatus {
    /// Wire names, in declaration order.
    pub const NAMES: &'static [&'static str] = &["pending", "reviewed", "resolved", "dismissed"];

    /// All variants, in declaration order.
    pub fn all() -> &'static [ReportStatus] {
        &[
            Self::Pending,
            Self::Reviewed,
            Self::Resolved,
            Self::Dismissed,
        ]
    }

    /// The wire name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::Resolved => "resolved",
            Self::Dismissed => "dismissed",
        }
    }
}

// ---------------------------------------------------------------------------
// Articles
// ---------------------------------------------------------------------------

/// Topic an article is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleCategory {
    Anxiety,
    Depression,
    Stress,
    Relationships,
    SelfCare,
    Mindfulness,
    General,
}

impl ArticleCategory {
    /// Wire names, in declaration order.
    pub const NAMES: &'static [&'static str] = &[
        "anxiety",
        "depression",
        "stress",
        "relationships",
        "self_care",
        "mindfulness",
        "general",
    ];

    /// All variants, in declaration order.
    pub fn all() -> &'static [ArticleCategory] {
        &[
            Self::Anxiety,
            Self::Depression,
            Self::Stress,
            Self::Relationships,
            Self::SelfCare,
            Self::Mindfulness,
            Self::General,
        ]
    }

    /// The wire name of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anxiety => "anxiety",
            Self::Depression => "depression",
            Self::Stress => "stress",
            Self::Relationships => "relationships",
            Self::SelfCare => "self_care",
            Self::Mindfulness => "mindfulness",
            Self::General => "general",
        }
    }
}

// ---------------------------------------------------------------------------
// Display / FromStr over wire names
// ---------------------------------------------------------------------------

macro_rules! wire_name_impls {
    ($ty:ident, $kind:literal) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::all()
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| DomainError::UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

wire_name_impls!(ModerationDecision, "moderation decision");
wire_name_impls!(ReportReason, "report reason");
wire_name_impls!(ReportableType, "reportable type");
wire_name_impls!(ReportStatus, "report status");
wire_name_impls!(ArticleCategory, "article category");

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_names_match<T: std::fmt::Display>(all: &[T], names: &[&str]) {
        assert_eq!(all.len(), names.len());
        for (variant, name) in all.iter().zip(names) {
            assert_eq!(variant.to_string(), *name);
        }
    }

    #[test]
    fn names_match_variants() {
        assert_names_match(ModerationDecision::all(), ModerationDecision::NAMES);
        assert_names_match(ReportReason::all(), ReportReason::NAMES);
        assert_names_match(ReportableType::all(), ReportableType::NAMES);
        assert_names_match(ReportStatus::all(), ReportStatus::NAMES);
        assert_names_match(ArticleCategory::all(), ArticleCategory::NAMES);
    }

    #[test]
    fn serde_uses_wire_names() {
        for reason in ReportReason::all() {
            let json = serde_json::to_value(reason).unwrap();
            assert_eq!(json, serde_json::Value::String(reason.as_str().into()));
            let back: ReportReason = serde_json::from_value(json).unwrap();
            assert_eq!(back, *reason);
        }
    }

    #[test]
    fn from_str_round_trips_every_category() {
        for category in ArticleCategory::all() {
            assert_eq!(category.as_str().parse::<ArticleCategory>().unwrap(), *category);
        }
    }

    #[test]
    fn from_str_rejects_unknown() {
        let err = "approved".parse::<ModerationDecision>().unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownVariant {
                kind: "moderation decision",
                value: "approved".into(),
            }
        );
    }

    #[test]
    fn from_str_is_case_sensitive() {
        assert!("Spam".parse::<ReportReason>().is_err());
        assert!("spam".parse::<ReportReason>().is_ok());
    }

    #[test]
    fn mood_bounds() {
        assert!(MOOD_LEVEL_MIN < MOOD_LEVEL_MAX);
        assert_eq!(MOOD_LEVEL_MAX - MOOD_LEVEL_MIN + 1, 5);
    }
}
