//! Per-field validation rules.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern should compile")
});

pub fn is_valid_email(raw: &str) -> bool {
    EMAIL.is_match(raw)
}

/// A check on one raw field value. Text rules trim first; selection rules
/// only require a non-empty value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rule {
    /// Trimmed value has at least this many characters.
    MinChars(usize),
    /// Trimmed value looks like an email address.
    Email,
    /// A `<select>` with a chosen option.
    Selected,
    /// Trimmed value is non-empty.
    Required,
    /// Comma-separated list with at least one non-empty entry.
    ListNonEmpty,
}

impl Rule {
    pub fn is_satisfied(self, raw: &str) -> bool {
        let trimmed = raw.trim();
        match self {
            Rule::MinChars(min) => !trimmed.is_empty() && trimmed.chars().count() >= min,
            Rule::Email => !trimmed.is_empty() && is_valid_email(trimmed),
            Rule::Selected => !raw.is_empty(),
            Rule::Required => !trimmed.is_empty(),
            Rule::ListNonEmpty => raw.split(',').any(|item| !item.is_empty()),
        }
    }
}

/// Binds a rule to an input and the element that shows its error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    pub error: &'static str,
    pub rule: Rule,
    /// Whether the input itself gets the error outline.
    pub highlight: bool,
}

const fn field(field: &'static str, error: &'static str, rule: Rule) -> FieldRule {
    FieldRule {
        field,
        error,
        rule,
        highlight: true,
    }
}

pub const CLIENT_RULES: [FieldRule; 5] = [
    field("cf-name", "err-name", Rule::MinChars(2)),
    field("cf-email", "err-email", Rule::Email),
    field("cf-phone", "err-phone", Rule::MinChars(7)),
    field("cf-service", "err-service", Rule::Selected),
    field("cf-message", "err-message", Rule::MinChars(10)),
];

pub const CAREER_RULES: [FieldRule; 13] = [
    field("ca-name", "ca-err-name", Rule::MinChars(2)),
    field("ca-email", "ca-err-email", Rule::Email),
    field("ca-phone", "ca-err-phone", Rule::MinChars(7)),
    field("ca-experience", "ca-err-exp", Rule::Selected),
    // hidden input fed by the skill tags; only the message is shown
    FieldRule {
        field: "ca-skills",
        error: "ca-err-skills",
        rule: Rule::ListNonEmpty,
        highlight: false,
    },
    field("ca-portfolio", "ca-err-portfolio", Rule::Required),
    field("ca-linkedin", "ca-err-linkedin", Rule::Required),
    field("ca-github", "ca-err-github", Rule::Required),
    field("ca-project1", "ca-err-project1", Rule::Required),
    field("ca-project2", "ca-err-project2", Rule::Required),
    field("ca-project3", "ca-err-project3", Rule::Required),
    field("ca-message", "ca-err-message", Rule::MinChars(20)),
    field("ca-availability", "ca-err-avail", Rule::Selected),
];
