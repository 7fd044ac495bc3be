//! # Cross-Field Rules
//!
//! A [`CrossFieldRule`] is a constraint whose truth depends on more than one
//! field. Rules run after every field has been evaluated, against the
//! validated output object, and report at a single target path.
//!
//! A rule is skipped when any field it depends on did not validate, or when
//! its target already carries an issue. The root cause is then reported
//! once, by the field that failed.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

type Predicate = Arc<dyn Fn(&Map<String, Value>) -> bool + Send + Sync>;

/// A constraint over several fields of one validated object.
#[derive(Clone)]
pub struct CrossFieldRule {
    target: &'static str,
    depends_on: Vec<&'static str>,
    message: String,
    description: String,
    holds: Predicate,
}

impl CrossFieldRule {
    /// A rule from an arbitrary predicate over the validated object.
    ///
    /// `depends_on` lists the fields that must have validated for the rule
    /// to run. `description` is a short statement of the rule for schema
    /// export.
    pub fn new(
        target: &'static str,
        depends_on: &[&'static str],
        message: impl Into<String>,
        description: impl Into<String>,
        holds: impl Fn(&Map<String, Value>) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            target,
            depends_on: depends_on.to_vec(),
            message: message.into(),
            description: description.into(),
            holds: Arc::new(holds),
        }
    }

    /// `target` must equal `other` (password confirmation).
    pub fn equals(target: &'static str, other: &'static str, message: impl Into<String>) -> Self {
        Self::new(
            target,
            &[target, other],
            message,
            format!("{target} must equal {other}"),
            move |data| data.get(target) == data.get(other),
        )
    }

    /// `target` must differ from `other` (new password vs current one).
    pub fn differs(target: &'static str, other: &'static str, message: impl Into<String>) -> Self {
        Self::new(
            target,
            &[target, other],
            message,
            format!("{target} must differ from {other}"),
            move |data| data.get(target) != data.get(other),
        )
    }

    /// `target` must be present and non-blank whenever `field == value`.
    pub fn required_when(
        target: &'static str,
        field: &'static str,
        value: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::new(
            target,
            &[field],
            message,
            format!("{target} is required when {field} is \"{value}\""),
            move |data| {
                if data.get(field).and_then(Value::as_str) != Some(value) {
                    return true;
                }
                match data.get(target) {
                    Some(Value::String(s)) => !s.trim().is_empty(),
                    Some(_) => true,
                    None => false,
                }
            },
        )
    }

    /// Path the rule reports at.
    pub fn target(&self) -> &'static str {
        self.target
    }

    /// Fields that must validate before the rule runs.
    pub fn depends_on(&self) -> &[&'static str] {
        &self.depends_on
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the rule runs, given the validated output and the set of
    /// fields that already have issues.
    pub(crate) fn applies(&self, data: &Map<String, Value>, failed: &HashSet<&str>) -> bool {
        !failed.contains(self.target)
            && self
                .depends_on
                .iter()
                .all(|dep| data.contains_key(*dep) && !failed.contains(dep))
    }

    pub(crate) fn holds(&self, data: &Map<String, Value>) -> bool {
        (self.holds)(data)
    }
}

impl fmt::Debug for CrossFieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrossFieldRule")
            .field("target", &self.target)
            .field("depends_on", &self.depends_on)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn equals_compares_values() {
        let rule = CrossFieldRule::equals("password_confirmation", "password", "Password tidak cocok");
        assert!(rule.holds(&object(json!({"password": "a", "password_confirmation": "a"}))));
        assert!(!rule.holds(&object(json!({"password": "a", "password_confirmation": "b"}))));
    }

    #[test]
    fn differs_compares_values() {
        let rule = CrossFieldRule::differs("new_password", "current_password", "beda");
        assert!(!rule.holds(&object(json!({"new_password": "x", "current_password": "x"}))));
        assert!(rule.holds(&object(json!({"new_password": "y", "current_password": "x"}))));
    }

    #[test]
    fn required_when_only_triggers_on_value() {
        let rule = CrossFieldRule::required_when("reason", "status", "reject", "Alasan wajib diisi");
        assert!(rule.holds(&object(json!({"status": "approve"}))));
        assert!(!rule.holds(&object(json!({"status": "reject"}))));
        assert!(!rule.holds(&object(json!({"status": "reject", "reason": "  "}))));
        assert!(rule.holds(&object(json!({"status": "reject", "reason": "Sumber tidak jelas"}))));
    }

    #[test]
    fn applies_requires_dependencies_and_clean_target() {
        let rule = CrossFieldRule::equals("password_confirmation", "password", "x");
        let data = object(json!({"password": "a", "password_confirmation": "b"}));
        assert!(rule.applies(&data, &HashSet::new()));

        let partial = object(json!({"password_confirmation": "b"}));
        assert!(!rule.applies(&partial, &HashSet::new()));

        let failed: HashSet<&str> = ["password_confirmation"].into_iter().collect();
        assert!(!rule.applies(&data, &failed));
    }

    #[test]
    fn description_is_readable() {
        let rule = CrossFieldRule::required_when("description", "reason", "other", "x");
        assert_eq!(rule.description(), "description is required when reason is \"other\"");
    }
}
