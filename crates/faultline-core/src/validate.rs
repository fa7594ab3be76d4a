use std::fmt::Display;

use regex::Regex;
use strum::EnumString;

/// Constraint rule that a field or parameter can violate
///
/// Parsing is total: identifiers that match no known rule land in
/// [`Rule::Other`] with the original text preserved.
#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
pub enum Rule {
    /// Value must be present
    #[strum(to_string = "NotNull", serialize = "not_null", serialize = "required")]
    NotNull,
    /// Value must be present and contain a non-whitespace character
    #[strum(to_string = "NotBlank", serialize = "not_blank")]
    NotBlank,
    /// Numeric lower bound
    #[strum(to_string = "Min", serialize = "min")]
    Min,
    /// Numeric upper bound
    #[strum(to_string = "Max", serialize = "max")]
    Max,
    /// Length or element-count bounds
    #[strum(to_string = "Size", serialize = "size", serialize = "length")]
    Size,
    /// Regular-expression match
    #[strum(to_string = "Pattern", serialize = "pattern", serialize = "regex")]
    Pattern,
    /// Any rule without a dedicated variant
    #[strum(default)]
    Other(String),
}

impl Rule {
    /// Parse a rule identifier, never failing
    pub fn parse(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| Self::Other(name.to_owned()))
    }

    /// Rule identifier as reported by the validation source
    pub fn name(&self) -> &str {
        match self {
            Self::NotNull => "NotNull",
            Self::NotBlank => "NotBlank",
            Self::Min => "Min",
            Self::Max => "Max",
            Self::Size => "Size",
            Self::Pattern => "Pattern",
            Self::Other(name) => name,
        }
    }

    /// Whether this is a "value must be present" rule
    pub const fn is_required(&self) -> bool {
        matches!(self, Self::NotNull | Self::NotBlank)
    }
}

/// A single violated constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Property path, possibly dotted (`user.address.zip`)
    pub path: String,
    /// Violated rule, if the source reported one
    pub rule: Option<Rule>,
    /// Rule-specific message
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, rule: Option<Rule>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            rule,
            message: message.into(),
        }
    }

    /// Whether the violated rule is a required-value rule
    pub fn is_required(&self) -> bool {
        self.rule.as_ref().is_some_and(Rule::is_required)
    }
}

/// Ordered collector of violations
///
/// Checks are recorded in call order, which is the order clients see them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an arbitrary violation
    #[must_use]
    pub fn push(mut self, violation: Violation) -> Self {
        self.0.push(violation);
        self
    }

    /// Value must be present
    #[must_use]
    pub fn not_null<T>(self, path: &str, value: Option<&T>) -> Self {
        if value.is_some() {
            return self;
        }
        self.push(Violation::new(path, Some(Rule::NotNull), "must not be null"))
    }

    /// Value must be present and not only whitespace
    #[must_use]
    pub fn not_blank(self, path: &str, value: Option<&str>) -> Self {
        if value.is_some_and(|v| !v.trim().is_empty()) {
            return self;
        }
        self.push(Violation::new(path, Some(Rule::NotBlank), "must not be blank"))
    }

    /// Value, when present, must be at least `min`
    #[must_use]
    pub fn min<T: PartialOrd + Display>(self, path: &str, value: Option<T>, min: T) -> Self {
        match value {
            Some(v) if v < min => self.push(Violation::new(
                path,
                Some(Rule::Min),
                format!("must be greater than or equal to {min}"),
            )),
            _ => self,
        }
    }

    /// Value, when present, must be at most `max`
    #[must_use]
    pub fn max<T: PartialOrd + Display>(self, path: &str, value: Option<T>, max: T) -> Self {
        match value {
            Some(v) if v > max => self.push(Violation::new(
                path,
                Some(Rule::Max),
                format!("must be less than or equal to {max}"),
            )),
            _ => self,
        }
    }

    /// Length, when present, must fall within `min..=max`
    #[must_use]
    pub fn size(self, path: &str, len: Option<usize>, min: usize, max: usize) -> Self {
        match len {
            Some(n) if n < min || n > max => self.push(Violation::new(
                path,
                Some(Rule::Size),
                format!("size must be between {min} and {max}"),
            )),
            _ => self,
        }
    }

    /// Value, when present, must match `pattern`
    #[must_use]
    pub fn pattern(self, path: &str, value: Option<&str>, pattern: &Regex) -> Self {
        match value {
            Some(v) if !pattern.is_match(v) => self.push(Violation::new(
                path,
                Some(Rule::Pattern),
                format!("must match \"{}\"", pattern.as_str()),
            )),
            _ => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Violation> {
        self.0
    }
}

impl From<Vec<Violation>> for Violations {
    fn from(violations: Vec<Violation>) -> Self {
        Self(violations)
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Types that can check their own constraints after deserialization
pub trait Validate {
    /// Collect every violated constraint; empty means valid
    fn validate(&self) -> Violations;
}
