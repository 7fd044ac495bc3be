//! # Typed Requests
//!
//! Request structs for the payloads the backend handlers consume. Each one
//! names its catalog schema through [`ValidatedRequest::SCHEMA`], so the
//! only way to build one from raw JSON is through validation:
//!
//! ```
//! use serde_json::json;
//! use tenang_schema::requests::RecordMoodRequest;
//! use tenang_schema::ValidatedRequest;
//!
//! let req = RecordMoodRequest::from_input(&json!({ "mood_level": 2 })).unwrap();
//! assert_eq!(req.mood_level, 2);
//! assert!(RecordMoodRequest::from_input(&json!({ "mood_level": 9 })).is_err());
//! ```

use std::fmt;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tenang_core::{ArticleCategory, ModerationDecision, ReportReason, ReportStatus, ReportableType};
use uuid::Uuid;

use crate::catalog::{catalog, names};
use crate::schema::ParseError;

/// A request type backed by a catalog schema.
pub trait ValidatedRequest: DeserializeOwned {
    /// Name of the catalog schema the input must satisfy.
    const SCHEMA: &'static str;

    /// Validate `input` against [`SCHEMA`](Self::SCHEMA) and decode it.
    fn from_input(input: &Value) -> Result<Self, ParseError> {
        catalog().parse(Self::SCHEMA, input)
    }
}

#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ValidatedRequest for LoginRequest {
    const SCHEMA: &'static str = names::LOGIN;
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Registration payload. The confirmation is checked by the schema and
/// not carried further.
#[derive(Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl ValidatedRequest for RegisterRequest {
    const SCHEMA: &'static str = names::REGISTER;
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateArticleRequest {
    pub title: String,
    pub content: String,
    pub category: ArticleCategory,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl ValidatedRequest for CreateArticleRequest {
    const SCHEMA: &'static str = names::CREATE_ARTICLE;
}

/// Partial article update. `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<ArticleCategory>,
    pub thumbnail: Option<String>,
}

impl ValidatedRequest for UpdateArticleRequest {
    const SCHEMA: &'static str = names::UPDATE_ARTICLE;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModerateArticleRequest {
    pub status: ModerationDecision,
    #[serde(default)]
    pub reason: Option<String>,
}

impl ValidatedRequest for ModerateArticleRequest {
    const SCHEMA: &'static str = names::MODERATE_ARTICLE;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecordMoodRequest {
    pub mood_level: u8,
    #[serde(default)]
    pub note: Option<String>,
}

impl ValidatedRequest for RecordMoodRequest {
    const SCHEMA: &'static str = names::RECORD_MOOD;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateJournalRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub mood_level: Option<u8>,
    #[serde(default)]
    pub entry_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_private: Option<bool>,
}

impl ValidatedRequest for CreateJournalRequest {
    const SCHEMA: &'static str = names::CREATE_JOURNAL;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendChatMessageRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<Uuid>,
}

impl ValidatedRequest for SendChatMessageRequest {
    const SCHEMA: &'static str = names::SEND_CHAT_MESSAGE;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateReportRequest {
    pub reportable_type: ReportableType,
    pub reportable_id: Uuid,
    pub reason: ReportReason,
    #[serde(default)]
    pub description: Option<String>,
}

impl ValidatedRequest for CreateReportRequest {
    const SCHEMA: &'static str = names::CREATE_REPORT;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReviewReportRequest {
    pub status: ReportStatus,
    #[serde(default)]
    pub admin_note: Option<String>,
}

impl ValidatedRequest for ReviewReportRequest {
    const SCHEMA: &'static str = names::REVIEW_REPORT;
}

/// List query parameters, defaults applied. `page` has no upper bound in
/// the schema, so it takes any positive `i64`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaginationQuery {
    pub page: u64,
    pub limit: u32,
    #[serde(default)]
    pub search: Option<String>,
}

impl PaginationQuery {
    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(u64::from(self.limit))
    }
}

impl ValidatedRequest for PaginationQuery {
    const SCHEMA: &'static str = names::PAGINATION;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_debug_hides_password() {
        let req = LoginRequest::from_input(&json!({
            "email": "rina@example.com",
            "password": "Rahasia123"
        }))
        .unwrap();
        let debug = format!("{req:?}");
        assert!(!debug.contains("Rahasia123"));
        assert!(debug.contains("rina@example.com"));
    }

    #[test]
    fn register_drops_confirmation() {
        let req = RegisterRequest::from_input(&json!({
            "name": "Rina",
            "email": "rina@example.com",
            "password": "Password123",
            "password_confirmation": "Password123"
        }))
        .unwrap();
        assert_eq!(req.name, "Rina");
        assert!(!format!("{req:?}").contains("Password123"));
    }

    #[test]
    fn register_mismatch_is_invalid() {
        let err = RegisterRequest::from_input(&json!({
            "name": "Rina",
            "email": "rina@example.com",
            "password": "Password123",
            "password_confirmation": "Password321"
        }))
        .unwrap_err();
        let issues = err.issues().unwrap();
        assert_eq!(issues.message_for("password_confirmation"), Some("Password tidak cocok"));
    }

    #[test]
    fn report_decodes_enums_and_uuid() {
        let req = CreateReportRequest::from_input(&json!({
            "reportable_type": "chat_message",
            "reportable_id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "reason": "self_harm"
        }))
        .unwrap();
        assert_eq!(req.reportable_type, ReportableType::ChatMessage);
        assert_eq!(req.reason, ReportReason::SelfHarm);
        assert_eq!(
            req.reportable_id.to_string(),
            "67e55044-10b1-426f-9247-bb680e5fe0c8"
        );
    }

    #[test]
    fn journal_decodes_date() {
        let req = CreateJournalRequest::from_input(&json!({
            "title": "Pagi",
            "content": "Bangun lebih awal.",
            "entry_date": "2024-02-29"
        }))
        .unwrap();
        assert_eq!(req.entry_date, NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(req.mood_level, None);
    }

    #[test]
    fn pagination_applies_defaults() {
        let query = PaginationQuery::from_input(&json!({})).unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
        assert_eq!(query.offset(), 0);

        let query = PaginationQuery::from_input(&json!({"page": "3", "limit": "20"})).unwrap();
        assert_eq!(query.offset(), 40);
    }

    #[test]
    fn pagination_decodes_every_accepted_page() {
        let input = json!({"page": "5000000000"});
        assert!(catalog().validate(names::PAGINATION, &input).unwrap().is_success());
        let query = PaginationQuery::from_input(&input).unwrap();
        assert_eq!(query.page, 5_000_000_000);
        assert_eq!(query.offset(), 49_999_999_990);

        let query = PaginationQuery::from_input(&json!({"page": i64::MAX, "limit": 100})).unwrap();
        assert_eq!(query.page, i64::MAX as u64);
        assert_eq!(query.offset(), u64::MAX);
    }

    #[test]
    fn update_article_accepts_subset() {
        let req = UpdateArticleRequest::from_input(&json!({"title": "Judul baru"})).unwrap();
        assert_eq!(
            req,
            UpdateArticleRequest {
                title: Some("Judul baru".into()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn moderation_decision_decodes() {
        let req = ModerateArticleRequest::from_input(&json!({"status": "approve"})).unwrap();
        assert_eq!(req.status, ModerationDecision::Approve);
        assert_eq!(req.reason, None);
    }
}
