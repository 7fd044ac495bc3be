//! # Schema Catalog
//!
//! The process-wide registry of named request schemas. Forms and API call
//! sites refer to schemas by name (`"login"`, `"createArticle"`, ...); the
//! [`names`] module lists every name as a constant.
//!
//! The catalog is built once, on first access, and is read-only afterwards.
//! Looking up a name that was never defined is programmer misuse and
//! yields [`SchemaError::UnknownSchema`].
//!
//! ## Conventions
//!
//! - Every free-text field a person types into is screened with
//!   [`Field::safe`]. Passwords and tokens are not: they are never
//!   rendered, and restricting their alphabet weakens them.
//! - Update schemas are the partial form of their create schema, so the
//!   two can never disagree on a present field.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tenang_core::{
    ArticleCategory, ModerationDecision, ReportReason, ReportStatus, ReportableType,
    SchemaError, MOOD_LEVEL_MAX, MOOD_LEVEL_MIN,
};

use crate::field::Field;
use crate::issue::ValidationOutcome;
use crate::rule::CrossFieldRule;
use crate::schema::{ParseError, Schema};

/// Names of every schema in the catalog.
pub mod names {
    pub const LOGIN: &str = "login";
    pub const REGISTER: &str = "register";
    pub const FORGOT_PASSWORD: &str = "forgotPassword";
    pub const RESET_PASSWORD: &str = "resetPassword";
    pub const CHANGE_PASSWORD: &str = "changePassword";
    pub const UPDATE_PROFILE: &str = "updateProfile";
    pub const CREATE_ARTICLE: &str = "createArticle";
    pub const UPDATE_ARTICLE: &str = "updateArticle";
    pub const MODERATE_ARTICLE: &str = "moderateArticle";
    pub const RECORD_MOOD: &str = "recordMood";
    pub const CREATE_JOURNAL: &str = "createJournal";
    pub const UPDATE_JOURNAL: &str = "updateJournal";
    pub const CREATE_FORUM_POST: &str = "createForumPost";
    pub const CREATE_COMMENT: &str = "createComment";
    pub const SEND_CHAT_MESSAGE: &str = "sendChatMessage";
    pub const CREATE_REPORT: &str = "createReport";
    pub const REVIEW_REPORT: &str = "reviewReport";
    pub const CREATE_PLAYLIST: &str = "createPlaylist";
    pub const PAGINATION: &str = "pagination";
    pub const UUID_PARAM: &str = "uuidParam";
}

/// Message reported when a password and its confirmation differ.
pub const PASSWORD_MISMATCH: &str = "Password tidak cocok";

const PASSWORD_MIN_LEN: usize = 8;
const PASSWORD_MAX_LEN: usize = 128;
const PASSWORD_STRENGTH: &str = "Password harus mengandung huruf besar, huruf kecil, dan angka";

/// At least one lowercase letter, one uppercase letter, and one digit.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().any(char::is_lowercase)
        && password.chars().any(char::is_uppercase)
        && password.chars().any(|c| c.is_ascii_digit())
}

static CATALOG: Lazy<SchemaCatalog> = Lazy::new(SchemaCatalog::build);

/// The process-wide schema catalog.
pub fn catalog() -> &'static SchemaCatalog {
    &CATALOG
}

/// Immutable map from schema name to schema.
#[derive(Debug)]
pub struct SchemaCatalog {
    schemas: BTreeMap<String, Schema>,
}

impl SchemaCatalog {
    /// Build a catalog from explicit schemas. Later duplicates replace
    /// earlier ones.
    pub fn from_schemas(schemas: impl IntoIterator<Item = Schema>) -> Self {
        Self {
            schemas: schemas
                .into_iter()
                .map(|s| (s.name().to_string(), s))
                .collect(),
        }
    }

    fn build() -> Self {
        let create_article = create_article();
        let create_journal = create_journal();
        let catalog = Self::from_schemas([
            login(),
            register(),
            forgot_password(),
            reset_password(),
            change_password(),
            update_profile(),
            create_article.partial(names::UPDATE_ARTICLE),
            create_article,
            moderate_article(),
            record_mood(),
            create_journal.partial(names::UPDATE_JOURNAL),
            create_journal,
            create_forum_post(),
            create_comment(),
            send_chat_message(),
            create_report(),
            review_report(),
            create_playlist(),
            pagination(),
            uuid_param(),
        ]);
        tracing::debug!(schema_count = catalog.len(), "built schema catalog");
        catalog
    }

    /// Look up a schema by name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownSchema`] if no schema has that name.
    pub fn get(&self, name: &str) -> Result<&Schema, SchemaError> {
        self.schemas.get(name).ok_or_else(|| SchemaError::UnknownSchema {
            name: name.to_string(),
        })
    }

    /// Returns the number of schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true if the catalog holds no schemas.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Returns all schema names, sorted alphabetically.
    pub fn names(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }

    /// Iterate schemas in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values()
    }

    /// Validate `input` against the named schema.
    pub fn validate(&self, name: &str, input: &Value) -> Result<ValidationOutcome, SchemaError> {
        Ok(self.get(name)?.validate(input))
    }

    /// Validate `input` against the named schema and decode the output.
    pub fn parse<T: DeserializeOwned>(&self, name: &str, input: &Value) -> Result<T, ParseError> {
        self.get(name)?.parse(input)
    }
}

// ---------------------------------------------------------------------------
// Shared field shapes
// ---------------------------------------------------------------------------

fn email() -> Field {
    Field::email("email", "Email")
        .required_message("Email wajib diisi")
        .invalid_message("Format email tidak valid")
}

fn new_password(name: &'static str, label: &'static str) -> Field {
    Field::text(name, label)
        .min_len(PASSWORD_MIN_LEN)
        .max_len(PASSWORD_MAX_LEN)
        .must(is_strong_password, PASSWORD_STRENGTH)
}

fn mood_level() -> Field {
    Field::integer("mood_level", "Tingkat mood")
        .range(MOOD_LEVEL_MIN, MOOD_LEVEL_MAX)
        .message(format!(
            "Tingkat mood harus antara {MOOD_LEVEL_MIN} dan {MOOD_LEVEL_MAX}"
        ))
}

fn person_name() -> Field {
    Field::text("name", "Nama").min_len(2).max_len(100).safe()
}

// ---------------------------------------------------------------------------
// Authentication & account
// ---------------------------------------------------------------------------

fn login() -> Schema {
    Schema::new(names::LOGIN)
        .field(email())
        .field(
            Field::text("password", "Password")
                .required_message("Password wajib diisi")
                .min_len(1)
                .message("Password wajib diisi"),
        )
}

fn register() -> Schema {
    Schema::new(names::REGISTER)
        .field(person_name())
        .field(email())
        .field(new_password("password", "Password"))
        .field(Field::text("password_confirmation", "Konfirmasi password"))
        .rule(CrossFieldRule::equals(
            "password_confirmation",
            "password",
            PASSWORD_MISMATCH,
        ))
}

fn forgot_password() -> Schema {
    Schema::new(names::FORGOT_PASSWORD).field(email())
}

fn reset_password() -> Schema {
    Schema::new(names::RESET_PASSWORD)
        .field(Field::text("token", "Token").min_len(1))
        .field(email())
        .field(new_password("password", "Password"))
        .field(Field::text("password_confirmation", "Konfirmasi password"))
        .rule(CrossFieldRule::equals(
            "password_confirmation",
            "password",
            PASSWORD_MISMATCH,
        ))
}

fn change_password() -> Schema {
    Schema::new(names::CHANGE_PASSWORD)
        .field(Field::text("current_password", "Password lama").min_len(1))
        .field(new_password("new_password", "Password baru"))
        .field(Field::text("new_password_confirmation", "Konfirmasi password baru"))
        .rule(CrossFieldRule::equals(
            "new_password_confirmation",
            "new_password",
            PASSWORD_MISMATCH,
        ))
        .rule(CrossFieldRule::differs(
            "new_password",
            "current_password",
            "Password baru harus berbeda dari password lama",
        ))
}

fn update_profile() -> Schema {
    Schema::new(names::UPDATE_PROFILE)
        .field(person_name())
        .field(Field::text("bio", "Bio").max_len(500).safe())
        .field(Field::url("avatar", "Foto profil"))
        .partial(names::UPDATE_PROFILE)
}

// ---------------------------------------------------------------------------
// Articles & moderation
// ---------------------------------------------------------------------------

fn create_article() -> Schema {
    Schema::new(names::CREATE_ARTICLE)
        .field(Field::text("title", "Judul").min_len(5).max_len(200).safe())
        .field(Field::text("content", "Konten").min_len(50).max_len(50_000).safe())
        .field(
            Field::one_of("category", "Kategori", ArticleCategory::NAMES)
                .invalid_message("Kategori artikel tidak valid"),
        )
        .field(Field::url("thumbnail", "Thumbnail").optional())
}

fn moderate_article() -> Schema {
    Schema::new(names::MODERATE_ARTICLE)
        .field(
            Field::one_of("status", "Status", ModerationDecision::NAMES)
                .invalid_message("Status moderasi tidak valid"),
        )
        .field(Field::text("reason", "Alasan").max_len(500).safe().optional())
        .rule(CrossFieldRule::required_when(
            "reason",
            "status",
            ModerationDecision::Reject.as_str(),
            "Alasan penolakan wajib diisi",
        ))
}

// ---------------------------------------------------------------------------
// Mood & journal
// ---------------------------------------------------------------------------

fn record_mood() -> Schema {
    Schema::new(names::RECORD_MOOD)
        .field(mood_level())
        .field(Field::text("note", "Catatan").max_len(500).safe().optional())
}

fn create_journal() -> Schema {
    Schema::new(names::CREATE_JOURNAL)
        .field(Field::text("title", "Judul").min_len(1).max_len(200).safe())
        .field(Field::text("content", "Isi jurnal").min_len(1).max_len(10_000).safe())
        .field(mood_level().optional())
        .field(Field::date("entry_date", "Tanggal").optional())
        .field(Field::boolean("is_private", "Privat").optional())
}

// ---------------------------------------------------------------------------
// Community
// ---------------------------------------------------------------------------

fn create_forum_post() -> Schema {
    Schema::new(names::CREATE_FORUM_POST)
        .field(Field::text("title", "Judul").min_len(5).max_len(200).safe())
        .field(Field::text("content", "Konten").min_len(10).max_len(5_000).safe())
        .field(Field::boolean("is_anonymous", "Anonim").optional())
}

fn create_comment() -> Schema {
    Schema::new(names::CREATE_COMMENT)
        .field(Field::text("content", "Komentar").min_len(1).max_len(2_000).safe())
        .field(Field::uuid("parent_id", "Komentar induk").optional())
}

fn send_chat_message() -> Schema {
    Schema::new(names::SEND_CHAT_MESSAGE)
        .field(
            Field::text("message", "Pesan")
                .min_len(1)
                .message("Pesan tidak boleh kosong")
                .max_len(2_000)
                .safe(),
        )
        .field(Field::uuid("session_id", "Sesi").optional())
}

fn create_report() -> Schema {
    Schema::new(names::CREATE_REPORT)
        .field(
            Field::one_of("reportable_type", "Jenis konten", ReportableType::NAMES)
                .invalid_message("Jenis konten tidak valid"),
        )
        .field(Field::uuid("reportable_id", "Konten"))
        .field(
            Field::one_of("reason", "Alasan laporan", ReportReason::NAMES)
                .invalid_message("Alasan laporan tidak valid"),
        )
        .field(Field::text("description", "Deskripsi").max_len(1_000).safe().optional())
        .rule(CrossFieldRule::required_when(
            "description",
            "reason",
            ReportReason::Other.as_str(),
            "Deskripsi wajib diisi jika alasan laporan adalah lainnya",
        ))
}

fn review_report() -> Schema {
    Schema::new(names::REVIEW_REPORT)
        .field(
            Field::one_of("status", "Status", ReportStatus::NAMES)
                .invalid_message("Status laporan tidak valid"),
        )
        .field(Field::text("admin_note", "Catatan admin").max_len(1_000).safe().optional())
}

// ---------------------------------------------------------------------------
// Music
// ---------------------------------------------------------------------------

fn create_playlist() -> Schema {
    Schema::new(names::CREATE_PLAYLIST)
        .field(Field::text("title", "Judul playlist").min_len(1).max_len(100).safe())
        .field(Field::text("description", "Deskripsi").max_len(500).safe().optional())
        .field(Field::boolean("is_public", "Publik").optional())
}

// ---------------------------------------------------------------------------
// Query & path parameters
// ---------------------------------------------------------------------------

fn pagination() -> Schema {
    Schema::new(names::PAGINATION)
        .field(Field::coerced_integer("page", "Halaman").min(1).default(1))
        .field(Field::coerced_integer("limit", "Batas").range(1, 100).default(10))
        .field(Field::text("search", "Pencarian").max_len(100).safe().optional())
}

fn uuid_param() -> Schema {
    Schema::new(names::UUID_PARAM).field(Field::uuid("id", "ID"))
}
