// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule declarations: severities, fields and rule kinds.

use crate::commit::ParsedCommitMessage;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// How strongly a failed rule counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "SeverityRepr")]
pub enum RuleSeverity {
    /// Rule is disabled and never evaluated.
    Off,
    /// Failure is reported but does not reject the message.
    Warning,
    /// Failure rejects the message.
    Error,
}

/// Accepts both the named and the numeric (0/1/2) spelling.
#[derive(Deserialize)]
#[serde(untagged)]
enum SeverityRepr {
    Level(i64),
    Name(String),
}

impl TryFrom<SeverityRepr> for RuleSeverity {
    type Error = String;

    fn try_from(repr: SeverityRepr) -> Result<Self, String> {
        match repr {
            SeverityRepr::Level(0) => Ok(RuleSeverity::Off),
            SeverityRepr::Level(1) => Ok(RuleSeverity::Warning),
            SeverityRepr::Level(2) => Ok(RuleSeverity::Error),
            SeverityRepr::Level(n) => Err(format!("severity level must be 0, 1 or 2, got {}", n)),
            SeverityRepr::Name(name) => name.parse(),
        }
    }
}

impl std::str::FromStr for RuleSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" => Ok(RuleSeverity::Off),
            "warning" | "warn" => Ok(RuleSeverity::Warning),
            "error" => Ok(RuleSeverity::Error),
            other => Err(format!("unknown severity '{}'", other)),
        }
    }
}

impl fmt::Display for RuleSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSeverity::Off => write!(f, "off"),
            RuleSeverity::Warning => write!(f, "warning"),
            RuleSeverity::Error => write!(f, "error"),
        }
    }
}

/// The part of a commit message a rule looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Type,
    Scope,
    Subject,
    Header,
    Body,
}

impl Field {
    /// Read this field from a message; absent parts are empty.
    pub fn value<'a>(&self, message: &'a ParsedCommitMessage) -> &'a str {
        match self {
            Field::Type => &message.commit_type,
            Field::Scope => message.scope_str(),
            Field::Subject => &message.subject,
            Field::Header => &message.header,
            Field::Body => message.body_str(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Type => "type",
            Field::Scope => "scope",
            Field::Subject => "subject",
            Field::Header => "header",
            Field::Body => "body",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a rule asserts its condition or its negation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum When {
    #[default]
    Always,
    Never,
}

/// Casing styles understood by the `case` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseMode {
    LowerCase,
    UpperCase,
    CamelCase,
    KebabCase,
    PascalCase,
    SentenceCase,
    SnakeCase,
    StartCase,
}

impl CaseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseMode::LowerCase => "lower-case",
            CaseMode::UpperCase => "upper-case",
            CaseMode::CamelCase => "camel-case",
            CaseMode::KebabCase => "kebab-case",
            CaseMode::PascalCase => "pascal-case",
            CaseMode::SentenceCase => "sentence-case",
            CaseMode::SnakeCase => "snake-case",
            CaseMode::StartCase => "start-case",
        }
    }
}

impl fmt::Display for CaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of permitted characters for the `charset` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Charset {
    Named(NamedCharset),
    /// Inclusive code point (or byte value) range.
    Range { min: u32, max: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedCharset {
    Ascii,
    Latin1,
}

impl Charset {
    pub const ASCII: Charset = Charset::Named(NamedCharset::Ascii);
    pub const LATIN1: Charset = Charset::Named(NamedCharset::Latin1);

    /// Inclusive bounds of the charset.
    pub fn bounds(&self) -> (u32, u32) {
        match self {
            Charset::Named(NamedCharset::Ascii) => (0, 0x7F),
            Charset::Named(NamedCharset::Latin1) => (0, 0xFF),
            Charset::Range { min, max } => (*min, *max),
        }
    }

    pub fn contains(&self, value: u32) -> bool {
        let (min, max) = self.bounds();
        (min..=max).contains(&value)
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Charset::Named(NamedCharset::Ascii) => write!(f, "ASCII"),
            Charset::Named(NamedCharset::Latin1) => write!(f, "Latin-1"),
            Charset::Range { min, max } => write!(f, "U+{:04X}..=U+{:04X}", min, max),
        }
    }
}

/// Unit at which the `charset` rule inspects text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Codepoint,
    Byte,
}

/// Outcome of a single rule check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub passed: bool,
    /// Explanation, present when the check failed.
    pub message: Option<String>,
}

impl RuleOutcome {
    pub fn pass() -> Self {
        Self {
            passed: true,
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: Some(message.into()),
        }
    }
}

/// Trait for custom rules.
///
/// Implementations must be pure: no I/O and no panics for any message.
pub trait Rule: fmt::Debug + Send + Sync {
    /// Check the commit message.
    fn check(&self, message: &ParsedCommitMessage) -> RuleOutcome;
}

/// Adapter turning a closure into a [`Rule`].
pub struct FnRule<F>(pub F);

impl<F> fmt::Debug for FnRule<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnRule")
    }
}

impl<F> Rule for FnRule<F>
where
    F: Fn(&ParsedCommitMessage) -> RuleOutcome + Send + Sync,
{
    fn check(&self, message: &ParsedCommitMessage) -> RuleOutcome {
        (self.0)(message)
    }
}

/// A rule kind together with its parameters.
#[derive(Debug, Clone)]
pub enum RuleKind {
    Enum {
        field: Field,
        allowed: Vec<String>,
        case_sensitive: bool,
        when: When,
    },
    Case {
        field: Field,
        modes: Vec<CaseMode>,
        when: When,
    },
    NonEmpty {
        field: Field,
    },
    NoTrailingChar {
        field: Field,
        ch: char,
    },
    MaxLength {
        field: Field,
        limit: usize,
        line_wise: bool,
    },
    MinLength {
        field: Field,
        limit: usize,
    },
    LeadingBlank {
        field: Field,
    },
    Charset {
        field: Field,
        charset: Charset,
        granularity: Granularity,
    },
    Custom(Arc<dyn Rule>),
}

impl RuleKind {
    /// Wrap a closure as a custom rule.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&ParsedCommitMessage) -> RuleOutcome + Send + Sync + 'static,
    {
        RuleKind::Custom(Arc::new(FnRule(f)))
    }

    /// The kind's configuration name.
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Enum { .. } => "enum",
            RuleKind::Case { .. } => "case",
            RuleKind::NonEmpty { .. } => "non-empty",
            RuleKind::NoTrailingChar { .. } => "no-trailing-char",
            RuleKind::MaxLength { .. } => "max-length",
            RuleKind::MinLength { .. } => "min-length",
            RuleKind::LeadingBlank { .. } => "leading-blank",
            RuleKind::Charset { .. } => "charset",
            RuleKind::Custom(_) => "custom",
        }
    }

    /// The field a declarative kind inspects.
    pub fn field(&self) -> Option<Field> {
        match self {
            RuleKind::Enum { field, .. }
            | RuleKind::Case { field, .. }
            | RuleKind::NonEmpty { field }
            | RuleKind::NoTrailingChar { field, .. }
            | RuleKind::MaxLength { field, .. }
            | RuleKind::MinLength { field, .. }
            | RuleKind::LeadingBlank { field }
            | RuleKind::Charset { field, .. } => Some(*field),
            RuleKind::Custom(_) => None,
        }
    }
}

/// One named validation rule.
#[derive(Debug, Clone)]
pub struct RuleSpec {
    pub name: String,
    pub severity: RuleSeverity,
    pub kind: RuleKind,
}

impl RuleSpec {
    pub fn new(name: impl Into<String>, severity: RuleSeverity, kind: RuleKind) -> Self {
        Self {
            name: name.into(),
            severity,
            kind,
        }
    }

    /// Check that the parameters are usable for this rule's kind.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: &str| -> Result<(), ConfigError> {
            Err(ConfigError::invalid(&self.name, message))
        };

        match &self.kind {
            RuleKind::Enum { allowed, .. } if allowed.is_empty() => {
                invalid("enum rule needs at least one value")
            }
            RuleKind::Case { modes, .. } if modes.is_empty() => {
                invalid("case rule needs at least one mode")
            }
            RuleKind::MaxLength { limit: 0, .. } | RuleKind::MinLength { limit: 0, .. } => {
                invalid("limit must be a positive integer")
            }
            RuleKind::Charset {
                charset: Charset::Range { min, max },
                ..
            } if min > max => invalid("charset range min must not exceed max"),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        severity: RuleSeverity,
    }

    fn severity(toml_src: &str) -> RuleSeverity {
        toml::from_str::<Wrapper>(toml_src).unwrap().severity
    }

    #[test]
    fn test_severity_named_and_numeric() {
        assert_eq!(severity("severity = \"error\""), RuleSeverity::Error);
        assert_eq!(severity("severity = 2"), RuleSeverity::Error);
        assert_eq!(severity("severity = \"warning\""), RuleSeverity::Warning);
        assert_eq!(severity("severity = 1"), RuleSeverity::Warning);
        assert_eq!(severity("severity = 0"), RuleSeverity::Off);
    }

    #[test]
    fn test_severity_out_of_range() {
        assert!(toml::from_str::<Wrapper>("severity = 3").is_err());
        assert!(toml::from_str::<Wrapper>("severity = \"fatal\"").is_err());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(RuleSeverity::Off < RuleSeverity::Warning);
        assert!(RuleSeverity::Warning < RuleSeverity::Error);
    }

    #[test]
    fn test_field_value_defaults_to_empty() {
        let msg = ParsedCommitMessage::new("feat", "add x");
        assert_eq!(Field::Scope.value(&msg), "");
        assert_eq!(Field::Body.value(&msg), "");
        assert_eq!(Field::Header.value(&msg), "feat: add x");
    }

    #[test]
    fn test_validate_rejects_zero_limit() {
        let spec = RuleSpec::new(
            "header-max-length",
            RuleSeverity::Error,
            RuleKind::MaxLength {
                field: Field::Header,
                limit: 0,
                line_wise: false,
            },
        );
        assert!(matches!(
            spec.validate(),
            Err(ConfigError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let spec = RuleSpec::new(
            "header-format",
            RuleSeverity::Error,
            RuleKind::Charset {
                field: Field::Header,
                charset: Charset::Range { min: 0x7F, max: 0x20 },
                granularity: Granularity::Codepoint,
            },
        );
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_custom_kind_from_closure() {
        let kind = RuleKind::custom(|_| RuleOutcome::pass());
        assert_eq!(kind.name(), "custom");
        assert!(kind.field().is_none());
    }
}
