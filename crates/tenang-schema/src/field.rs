//! # Field Definitions
//!
//! A [`Field`] binds one input key to a [`FieldKind`] (the type/shape the
//! raw JSON must have), an ordered list of [`Check`]s on the coerced value,
//! and the messages reported when either fails.
//!
//! Fields are built with chained calls, the same way every schema in the
//! catalog is declared:
//!
//! ```
//! use tenang_schema::Field;
//!
//! let title = Field::text("title", "Judul").min_len(5).max_len(200).safe();
//! let mood = Field::integer("mood_level", "Tingkat mood")
//!     .range(1, 5)
//!     .message("Tingkat mood harus antara 1 dan 5");
//! # let _ = (title, mood);
//! ```
//!
//! ## Evaluation
//!
//! 1. An absent key and an explicit `null` are both "missing". For coerced
//!    integers a blank string is missing too (`?page=` in a query string).
//!    A missing field takes its default if it has one, fails with the
//!    required-message if it is required, and is skipped otherwise.
//! 2. The raw value is checked (and for coerced integers, converted)
//!    against the kind. Failure reports the invalid-message.
//! 3. Checks run in declaration order. The first failing check's message
//!    is the field's only issue.

use std::fmt;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use url::Url;
use uuid::Uuid;

use crate::safety::is_safe_text;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@.]{2,}$").expect("email regex"));

/// Largest integer a JSON number can carry without losing precision in
/// the browser clients that produce these payloads.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// The type/shape a field's raw value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any string.
    Text,
    /// An integral JSON number (`3` or `3.0`).
    Integer,
    /// An integral JSON number, or a string holding one. Output is always
    /// a number.
    CoercedInteger,
    /// `true` or `false`.
    Boolean,
    /// A string of the form `local@domain.tld`.
    Email,
    /// A hyphenated UUID string.
    Uuid,
    /// A calendar date string, `YYYY-MM-DD`.
    Date,
    /// An absolute `http`/`https` URL string.
    Url,
    /// A string from an explicit allowed set.
    OneOf(&'static [&'static str]),
}

impl FieldKind {
    /// Returns the type name for diagnostics and schema export.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::CoercedInteger => "coerced_integer",
            FieldKind::Boolean => "boolean",
            FieldKind::Email => "email",
            FieldKind::Uuid => "uuid",
            FieldKind::Date => "date",
            FieldKind::Url => "url",
            FieldKind::OneOf(_) => "one_of",
        }
    }

    /// Check `raw` against this kind, returning the output value.
    fn coerce(&self, raw: &Value) -> Option<Value> {
        match self {
            FieldKind::Text => raw.as_str().map(|s| Value::String(s.to_string())),
            FieldKind::Integer => as_integer(raw).map(Value::from),
            FieldKind::CoercedInteger => match raw {
                Value::String(s) => s.trim().parse::<i64>().ok().map(Value::from),
                other => as_integer(other).map(Value::from),
            },
            FieldKind::Boolean => raw.as_bool().map(Value::Bool),
            FieldKind::Email => raw
                .as_str()
                .filter(|s| EMAIL_RE.is_match(s))
                .map(|s| Value::String(s.to_string())),
            FieldKind::Uuid => raw
                .as_str()
                .filter(|s| s.len() == 36 && Uuid::try_parse(s).is_ok())
                .map(|s| Value::String(s.to_string())),
            FieldKind::Date => raw
                .as_str()
                .filter(|s| s.len() == 10 && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok())
                .map(|s| Value::String(s.to_string())),
            FieldKind::Url => raw
                .as_str()
                .filter(|s| {
                    Url::parse(s)
                        .map(|u| matches!(u.scheme(), "http" | "https"))
                        .unwrap_or(false)
                })
                .map(|s| Value::String(s.to_string())),
            FieldKind::OneOf(allowed) => raw
                .as_str()
                .filter(|s| allowed.contains(s))
                .map(|s| Value::String(s.to_string())),
        }
    }

    fn default_invalid_message(&self, label: &str) -> String {
        match self {
            FieldKind::Text => format!("{label} harus berupa teks"),
            FieldKind::Integer => format!("{label} harus berupa bilangan bulat"),
            FieldKind::CoercedInteger => format!("{label} harus berupa angka"),
            FieldKind::Boolean => format!("{label} harus bernilai true atau false"),
            FieldKind::Email => format!("{label} harus berupa alamat email yang valid"),
            FieldKind::Uuid => format!("{label} harus berupa UUID yang valid"),
            FieldKind::Date => format!("{label} harus berupa tanggal dengan format YYYY-MM-DD"),
            FieldKind::Url => format!("{label} harus berupa URL yang valid"),
            FieldKind::OneOf(allowed) => {
                format!("{label} harus salah satu dari: {}", allowed.join(", "))
            }
        }
    }
}

/// Integral numbers only; `2.0` counts, `2.5` does not.
fn as_integer(raw: &Value) -> Option<i64> {
    if let Some(i) = raw.as_i64() {
        return Some(i);
    }
    let f = raw.as_f64()?;
    (f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER).then_some(f as i64)
}

/// A constraint on a field's coerced value.
///
/// Length checks apply to strings and count Unicode scalar values. Range
/// checks apply to integers. A check that does not apply to the value's
/// type passes.
#[derive(Clone)]
pub enum Check {
    /// At least `min` characters.
    MinLength { min: usize, message: Option<String> },
    /// At most `max` characters.
    MaxLength { max: usize, message: Option<String> },
    /// Inclusive integer bounds. At least one bound is set.
    Range {
        min: Option<i64>,
        max: Option<i64>,
        message: Option<String>,
    },
    /// No script-injection markup (see [`crate::safety`]).
    SafeContent { message: Option<String> },
    /// A pure predicate over the string value.
    Predicate {
        test: fn(&str) -> bool,
        message: String,
    },
}

impl Check {
    /// The message reported when `value` fails this check, or `None`.
    fn violation(&self, value: &Value, label: &str) -> Option<String> {
        match self {
            Check::MinLength { min, message } => {
                let len = value.as_str()?.chars().count();
                (len < *min).then(|| {
                    message
                        .clone()
                        .unwrap_or_else(|| format!("{label} minimal {min} karakter"))
                })
            }
            Check::MaxLength { max, message } => {
                let len = value.as_str()?.chars().count();
                (len > *max).then(|| {
                    message
                        .clone()
                        .unwrap_or_else(|| format!("{label} maksimal {max} karakter"))
                })
            }
            Check::Range { min, max, message } => {
                let n = value.as_i64()?;
                let below = min.is_some_and(|m| n < m);
                let above = max.is_some_and(|m| n > m);
                (below || above).then(|| {
                    message
                        .clone()
                        .unwrap_or_else(|| range_message(label, *min, *max))
                })
            }
            Check::SafeContent { message } => {
                let text = value.as_str()?;
                (!is_safe_text(text)).then(|| {
                    message.clone().unwrap_or_else(|| {
                        format!("{label} mengandung konten yang tidak diizinkan")
                    })
                })
            }
            Check::Predicate { test, message } => {
                let text = value.as_str()?;
                (!test(text)).then(|| message.clone())
            }
        }
    }

    fn set_message(&mut self, new: String) {
        match self {
            Check::MinLength { message, .. }
            | Check::MaxLength { message, .. }
            | Check::Range { message, .. }
            | Check::SafeContent { message } => *message = Some(new),
            Check::Predicate { message, .. } => *message = new,
        }
    }
}

fn range_message(label: &str, min: Option<i64>, max: Option<i64>) -> String {
    match (min, max) {
        (Some(lo), Some(hi)) => format!("{label} harus antara {lo} dan {hi}"),
        (Some(lo), None) => format!("{label} minimal {lo}"),
        (None, Some(hi)) => format!("{label} maksimal {hi}"),
        (None, None) => format!("{label} tidak valid"),
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::MinLength { min, .. } => write!(f, "MinLength({min})"),
            Check::MaxLength { max, .. } => write!(f, "MaxLength({max})"),
            Check::Range { min, max, .. } => write!(f, "Range({min:?}..={max:?})"),
            Check::SafeContent { .. } => f.write_str("SafeContent"),
            Check::Predicate { message, .. } => write!(f, "Predicate({message:?})"),
        }
    }
}

/// Result of evaluating one field against its raw input.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FieldOutcome {
    /// Optional and not supplied. Omitted from the output.
    Missing,
    /// Passed every check. Carries the coerced value.
    Valid(Value),
    /// Failed. Carries the first failing message.
    Invalid(String),
}

/// One input key with its kind, checks, and messages.
#[derive(Debug, Clone)]
pub struct Field {
    name: &'static str,
    label: &'static str,
    kind: FieldKind,
    required: bool,
    default: Option<Value>,
    required_message: Option<String>,
    invalid_message: Option<String>,
    checks: Vec<Check>,
}

impl Field {
    /// A required field of the given kind.
    ///
    /// `label` is the human-readable name used in default messages.
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
            default: None,
            required_message: None,
            invalid_message: None,
            checks: Vec::new(),
        }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn integer(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Integer)
    }

    pub fn coerced_integer(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::CoercedInteger)
    }

    pub fn boolean(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Boolean)
    }

    pub fn email(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Email)
    }

    pub fn uuid(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Uuid)
    }

    pub fn date(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Date)
    }

    pub fn url(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Url)
    }

    pub fn one_of(
        name: &'static str,
        label: &'static str,
        allowed: &'static [&'static str],
    ) -> Self {
        Self::new(name, label, FieldKind::OneOf(allowed))
    }

    /// Make the field optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Value used when the key is missing. Implies optional.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self.required = false;
        self
    }

    /// Message reported when a required field is missing.
    pub fn required_message(mut self, message: impl Into<String>) -> Self {
        self.required_message = Some(message.into());
        self
    }

    /// Message reported when the raw value does not match the kind.
    pub fn invalid_message(mut self, message: impl Into<String>) -> Self {
        self.invalid_message = Some(message.into());
        self
    }

    pub fn min_len(mut self, min: usize) -> Self {
        self.checks.push(Check::MinLength { min, message: None });
        self
    }

    pub fn max_len(mut self, max: usize) -> Self {
        self.checks.push(Check::MaxLength { max, message: None });
        self
    }

    /// Inclusive bounds.
    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.checks.push(Check::Range {
            min: Some(min),
            max: Some(max),
            message: None,
        });
        self
    }

    pub fn min(mut self, min: i64) -> Self {
        self.checks.push(Check::Range {
            min: Some(min),
            max: None,
            message: None,
        });
        self
    }

    /// Reject script-injection markup.
    pub fn safe(mut self) -> Self {
        self.checks.push(Check::SafeContent { message: None });
        self
    }

    /// Require `test` to hold for the string value.
    pub fn must(mut self, test: fn(&str) -> bool, message: impl Into<String>) -> Self {
        self.checks.push(Check::Predicate {
            test,
            message: message.into(),
        });
        self
    }

    /// Override the message of the most recently added check. With no
    /// checks yet, overrides the invalid-message instead.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        match self.checks.last_mut() {
            Some(check) => check.set_message(message.into()),
            None => self.invalid_message = Some(message.into()),
        }
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// Whether free text in this field is screened for unsafe markup.
    pub fn is_content_checked(&self) -> bool {
        self.checks
            .iter()
            .any(|c| matches!(c, Check::SafeContent { .. }))
    }

    /// Copy of this field with the requirement and default dropped.
    pub(crate) fn relaxed(&self) -> Self {
        Self {
            required: false,
            default: None,
            ..self.clone()
        }
    }

    /// Evaluate the field against the raw value found under its key.
    pub(crate) fn evaluate(&self, raw: Option<&Value>) -> FieldOutcome {
        let present = raw.filter(|v| !self.is_missing(v));

        let Some(raw) = present else {
            if let Some(default) = &self.default {
                return FieldOutcome::Valid(default.clone());
            }
            if self.required {
                return FieldOutcome::Invalid(
                    self.required_message
                        .clone()
                        .unwrap_or_else(|| format!("{} wajib diisi", self.label)),
                );
            }
            return FieldOutcome::Missing;
        };

        let Some(value) = self.kind.coerce(raw) else {
            return FieldOutcome::Invalid(
                self.invalid_message
                    .clone()
                    .unwrap_or_else(|| self.kind.default_invalid_message(self.label)),
            );
        };

        for check in &self.checks {
            if let Some(message) = check.violation(&value, self.label) {
                return FieldOutcome::Invalid(message);
            }
        }

        FieldOutcome::Valid(value)
    }

    fn is_missing(&self, raw: &Value) -> bool {
        match raw {
            Value::Null => true,
            Value::String(s) if self.kind == FieldKind::CoercedInteger => s.trim().is_empty(),
            _ => false,
        }
    }
}
