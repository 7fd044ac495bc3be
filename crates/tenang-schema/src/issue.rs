//! # Issues and Outcomes
//!
//! A validation call always produces a [`ValidationOutcome`]: either the
//! coerced output object or an ordered list of [`Issue`]s. Issues carry the
//! path of the offending field and a message meant to be shown to the end
//! user as-is.
//!
//! ## Wire Format
//!
//! Outcomes serialize to the shape form handlers consume:
//!
//! ```json
//! { "success": true,  "data":   { "page": 2, "limit": 20 } }
//! { "success": false, "issues": [ { "path": ["password_confirmation"], "message": "Password tidak cocok" } ] }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Field-name segments leading to the offending value.
    /// Empty when the input as a whole is rejected.
    pub path: Vec<String>,
    /// Human-readable message, ready for display.
    pub message: String,
}

impl Issue {
    /// Issue attached to a top-level field.
    pub fn at(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: vec![field.into()],
            message: message.into(),
        }
    }

    /// Issue attached to the input as a whole.
    pub fn root(message: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            message: message.into(),
        }
    }

    /// The path joined with `.`, or `(root)` for root issues.
    pub fn dotted_path(&self) -> String {
        if self.path.is_empty() {
            "(root)".to_string()
        } else {
            self.path.join(".")
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {}: {}", self.dotted_path(), self.message)
    }
}

/// Ordered collection of issues from one validation call.
///
/// Order is the order in which rules were evaluated. Issues are never
/// deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationIssues {
    issues: Vec<Issue>,
}

impl ValidationIssues {
    pub(crate) fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    /// Returns the number of issues.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Returns true if there are no issues.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns a slice of all issues.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// First message reported for `field`, if any.
    ///
    /// Form handlers render one message per input; this is that message.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.issues
            .iter()
            .find(|i| i.path.first().map(String::as_str) == Some(field))
            .map(|i| i.message.as_str())
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Issue> {
        self.issues
    }
}

impl fmt::Display for ValidationIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

/// Result of validating one input against one schema.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// The input is well-formed. Holds the coerced output object, which
    /// contains only the fields the schema declares.
    Valid(Value),
    /// The input is malformed.
    Invalid(ValidationIssues),
}

impl ValidationOutcome {
    /// True for [`ValidationOutcome::Valid`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The coerced output, if valid.
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Valid(data) => Some(data),
            Self::Invalid(_) => None,
        }
    }

    /// The issue list. Empty when valid.
    pub fn issues(&self) -> &[Issue] {
        match self {
            Self::Valid(_) => &[],
            Self::Invalid(issues) => issues.issues(),
        }
    }

    /// Convert into a `Result` for `?`-style handling.
    pub fn into_result(self) -> Result<Value, ValidationIssues> {
        match self {
            Self::Valid(data) => Ok(data),
            Self::Invalid(issues) => Err(issues),
        }
    }
}

#[derive(Serialize)]
struct OutcomeWire<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    issues: Option<&'a [Issue]>,
}

impl Serialize for ValidationOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = match self {
            Self::Valid(data) => OutcomeWire {
                success: true,
                data: Some(data),
                issues: None,
            },
            Self::Invalid(issues) => OutcomeWire {
                success: false,
                data: None,
                issues: Some(issues.issues()),
            },
        };
        wire.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn issue_display_format() {
        let issue = Issue::at("email", "Email wajib diisi");
        assert_eq!(issue.to_string(), "  email: Email wajib diisi");
    }

    #[test]
    fn issue_display_root() {
        let issue = Issue::root("Input harus berupa objek");
        assert!(issue.to_string().contains("(root)"));
    }

    #[test]
    fn valid_outcome_wire_shape() {
        let outcome = ValidationOutcome::Valid(json!({"page": 2}));
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"success": true, "data": {"page": 2}})
        );
    }

    #[test]
    fn invalid_outcome_wire_shape() {
        let outcome = ValidationOutcome::Invalid(ValidationIssues::new(vec![Issue::at(
            "password_confirmation",
            "Password tidak cocok",
        )]));
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({
                "success": false,
                "issues": [{"path": ["password_confirmation"], "message": "Password tidak cocok"}]
            })
        );
    }

    #[test]
    fn message_for_returns_first_match() {
        let issues = ValidationIssues::new(vec![
            Issue::at("title", "first"),
            Issue::at("content", "other"),
            Issue::at("title", "second"),
        ]);
        assert_eq!(issues.message_for("title"), Some("first"));
        assert_eq!(issues.message_for("category"), None);
    }

    #[test]
    fn issues_display_one_per_line() {
        let issues = ValidationIssues::new(vec![Issue::at("a", "x"), Issue::at("b", "y")]);
        assert_eq!(issues.to_string(), "  a: x\n  b: y");
    }

    #[test]
    fn outcome_accessors() {
        let valid = ValidationOutcome::Valid(json!({}));
        assert!(valid.is_success());
        assert!(valid.issues().is_empty());
        assert!(valid.into_result().is_ok());

        let invalid = ValidationOutcome::Invalid(ValidationIssues::new(vec![Issue::root("x")]));
        assert!(!invalid.is_success());
        assert!(invalid.data().is_none());
        assert_eq!(invalid.issues().len(), 1);
    }
}
