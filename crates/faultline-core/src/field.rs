use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validate::{Rule, Violation};

/// One violated constraint as reported to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrorItem {
    /// Leaf name of the offending field
    pub field: String,
    /// Normalized rule tag (`REQUIRED`, `MIN`, ...)
    pub code: String,
    /// Rule-specific message
    pub message: String,
}

impl FieldErrorItem {
    pub fn from_violation(violation: &Violation) -> Self {
        Self {
            field: leaf_field(&violation.path).to_owned(),
            code: rule_code(violation.rule.as_ref()).into_owned(),
            message: violation.message.clone(),
        }
    }
}

impl fmt::Display for FieldErrorItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.field, self.code, self.message)
    }
}

/// Last component of a dotted property path
pub fn leaf_field(path: &str) -> &str {
    path.rsplit_once('.').map_or(path, |(_, leaf)| leaf)
}

/// Normalize a rule to its client-facing code
pub fn rule_code(rule: Option<&Rule>) -> Cow<'static, str> {
    let Some(rule) = rule else {
        return Cow::Borrowed("INVALID");
    };

    match rule {
        Rule::NotNull | Rule::NotBlank => Cow::Borrowed("REQUIRED"),
        Rule::Min => Cow::Borrowed("MIN"),
        Rule::Max => Cow::Borrowed("MAX"),
        Rule::Size => Cow::Borrowed("SIZE"),
        Rule::Pattern => Cow::Borrowed("PATTERN"),
        Rule::Other(name) if name.trim().is_empty() => Cow::Borrowed("INVALID"),
        Rule::Other(name) => Cow::Owned(name.to_uppercase()),
    }
}

/// Render items as `[field (CODE): message, ...]`
pub fn render_items(items: &[FieldErrorItem]) -> String {
    let rendered: Vec<String> = items.iter().map(ToString::to_string).collect();
    format!("[{}]", rendered.join(", "))
}
