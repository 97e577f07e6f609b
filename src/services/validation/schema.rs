/*
 * Responsibility
 * - 入力 payload の宣言的スキーマ (field → required / max length / format)
 * - スキーマを解釈する唯一の validate 関数
 * - 違反はすべて列挙して返す (最初の 1 件で止めない)
 * - 未知の field は黙って捨てずに違反として返す
 */
use serde::Serialize;
use serde_json::{Map, Value};

/// A single violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    // absolute URL with scheme and host, no reachability check
    Url,
}

/// Constraints for one string field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub required: bool,
    // explicit `null` is accepted (and kept) instead of being a type error
    pub nullable: bool,
    // reject ""; whitespace-only values are still values
    pub non_empty: bool,
    // in characters
    pub max_length: usize,
    pub format: Option<FieldFormat>,
}

/// Pseudo field name used when the payload itself has the wrong shape.
pub const ROOT_FIELD: &str = "$";

#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub fields: &'static [FieldRule],
}

impl Schema {
    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|r| r.name == name)
    }

    /// Check `payload` against every rule.
    ///
    /// On success the returned map holds only recognized fields that were
    /// present in the payload (values untouched, `null` kept for nullable
    /// fields).
    pub fn validate(&self, payload: &Value) -> Result<Map<String, Value>, Vec<FieldViolation>> {
        let Value::Object(object) = payload else {
            return Err(vec![FieldViolation::new(
                ROOT_FIELD,
                "payload must be a JSON object",
            )]);
        };

        let mut violations = Vec::new();
        let mut accepted = Map::new();

        for rule in self.fields {
            match object.get(rule.name) {
                None => {
                    if rule.required {
                        violations.push(FieldViolation::new(
                            rule.name,
                            format!("{} is required", rule.name),
                        ));
                    }
                }
                Some(Value::Null) if rule.nullable => {
                    accepted.insert(rule.name.to_string(), Value::Null);
                }
                Some(Value::Null) if rule.required => {
                    violations.push(FieldViolation::new(
                        rule.name,
                        format!("{} is required", rule.name),
                    ));
                }
                Some(Value::String(s)) => {
                    let before = violations.len();
                    check_string(rule, s, &mut violations);
                    if violations.len() == before {
                        accepted.insert(rule.name.to_string(), Value::String(s.clone()));
                    }
                }
                Some(_) => {
                    violations.push(FieldViolation::new(
                        rule.name,
                        format!("{} must be a string", rule.name),
                    ));
                }
            }
        }

        for key in object.keys() {
            if self.rule(key).is_none() {
                violations.push(FieldViolation::new(
                    key.as_str(),
                    format!("property {key} should not exist"),
                ));
            }
        }

        if violations.is_empty() {
            Ok(accepted)
        } else {
            Err(violations)
        }
    }
}

fn check_string(rule: &FieldRule, value: &str, violations: &mut Vec<FieldViolation>) {
    if rule.non_empty && value.is_empty() {
        violations.push(FieldViolation::new(
            rule.name,
            format!("{} should not be empty", rule.name),
        ));
    }

    if value.chars().count() > rule.max_length {
        violations.push(FieldViolation::new(
            rule.name,
            format!(
                "{} must be shorter than or equal to {} characters",
                rule.name, rule.max_length
            ),
        ));
    }

    if let Some(FieldFormat::Url) = rule.format
        && !is_absolute_url(value)
    {
        violations.push(FieldViolation::new(
            rule.name,
            format!("{} must be a URL address", rule.name),
        ));
    }
}

/// `true` when `value` parses as an absolute URL that has a scheme and a host.
pub fn is_absolute_url(value: &str) -> bool {
    // url::Url::parse silently trims surrounding spaces; we store verbatim, so reject them
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return false;
    }

    match url::Url::parse(value) {
        Ok(url) => url.host_str().is_some_and(|h| !h.is_empty()),
        Err(_) => false,
    }
}
