// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines the structures that can be loaded from cklint.toml.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ConfigError;
use crate::rules::{CaseMode, Charset, Field, Granularity, RuleKind, RuleSeverity, RuleSpec, When};

use super::default::preset_rules;

/// The main configuration structure for cklint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Preset the declared rules are layered on (`conventional` or `none`).
    pub extends: String,

    /// Rule declarations, in evaluation order.
    pub rules: Vec<RuleDeclaration>,

    /// Output configuration.
    pub output: OutputConfig,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            extends: "conventional".to_string(),
            rules: Vec::new(),
            output: OutputConfig::default(),
        }
    }
}

impl LintConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }

    /// Resolve the effective rule list.
    ///
    /// Preset rules come first. A declared rule replaces the preset rule of
    /// the same name in place; other declared rules are appended in order.
    pub fn rule_specs(&self) -> Result<Vec<RuleSpec>, ConfigError> {
        let mut specs = preset_rules(&self.extends)?;
        let mut declared = HashSet::new();

        for declaration in &self.rules {
            if !declared.insert(declaration.name.as_str()) {
                return Err(ConfigError::DuplicateRule {
                    name: declaration.name.clone(),
                });
            }

            let spec = declaration.to_spec();
            match specs.iter_mut().find(|s| s.name == spec.name) {
                Some(existing) => *existing = spec,
                None => specs.push(spec),
            }
        }

        Ok(specs)
    }
}

/// One rule as written in a configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDeclaration")]
pub struct RuleDeclaration {
    /// Unique rule name, e.g. `type-enum`.
    pub name: String,

    /// Rule severity, named or numeric.
    pub severity: RuleSeverity,

    /// Rule kind and its parameters.
    #[serde(flatten)]
    pub kind: DeclaredKind,
}

/// A declaration before its kind parameters are checked.
///
/// Parameters are collected into a table and deserialized separately, so
/// that a misspelled key is rejected instead of silently defaulted.
#[derive(Deserialize)]
struct RawDeclaration {
    name: String,
    severity: RuleSeverity,
    #[serde(flatten)]
    params: toml::Table,
}

impl TryFrom<RawDeclaration> for RuleDeclaration {
    type Error = String;

    fn try_from(raw: RawDeclaration) -> Result<Self, String> {
        let kind = toml::Value::Table(raw.params)
            .try_into::<DeclaredKind>()
            .map_err(|e| format!("rule '{}': {}", raw.name, e.message()))?;

        Ok(Self {
            name: raw.name,
            severity: raw.severity,
            kind,
        })
    }
}

impl RuleDeclaration {
    pub fn to_spec(&self) -> RuleSpec {
        RuleSpec::new(self.name.clone(), self.severity, self.kind.clone().into())
    }
}

/// Rule kinds that can be declared in a file.
///
/// Custom predicates are code, so they are only available through the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case", deny_unknown_fields)]
pub enum DeclaredKind {
    Enum {
        field: Field,
        allowed: Vec<String>,
        #[serde(default = "default_true")]
        case_sensitive: bool,
        #[serde(default)]
        when: When,
    },
    Case {
        field: Field,
        modes: Vec<CaseMode>,
        #[serde(default)]
        when: When,
    },
    NonEmpty {
        field: Field,
    },
    NoTrailingChar {
        field: Field,
        #[serde(rename = "char")]
        ch: char,
    },
    MaxLength {
        field: Field,
        limit: usize,
        #[serde(default)]
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
        #[serde(default)]
        granularity: Granularity,
    },
}

fn default_true() -> bool {
    true
}

impl From<DeclaredKind> for RuleKind {
    fn from(kind: DeclaredKind) -> Self {
        match kind {
            DeclaredKind::Enum {
                field,
                allowed,
                case_sensitive,
                when,
            } => RuleKind::Enum {
                field,
                allowed,
                case_sensitive,
                when,
            },
            DeclaredKind::Case { field, modes, when } => RuleKind::Case { field, modes, when },
            DeclaredKind::NonEmpty { field } => RuleKind::NonEmpty { field },
            DeclaredKind::NoTrailingChar { field, ch } => RuleKind::NoTrailingChar { field, ch },
            DeclaredKind::MaxLength {
                field,
                limit,
                line_wise,
            } => RuleKind::MaxLength {
                field,
                limit,
                line_wise,
            },
            DeclaredKind::MinLength { field, limit } => RuleKind::MinLength { field, limit },
            DeclaredKind::LeadingBlank { field } => RuleKind::LeadingBlank { field },
            DeclaredKind::Charset {
                field,
                charset,
                granularity,
            } => RuleKind::Charset {
                field,
                charset,
                granularity,
            },
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Whether to use colors.
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_conventional() {
        let config = LintConfig::default();
        assert_eq!(config.extends, "conventional");
        let specs = config.rule_specs().unwrap();
        assert!(specs.iter().any(|s| s.name == "type-enum"));
        assert!(config.output.color);
    }

    #[test]
    fn test_declared_rule_replaces_in_place() {
        let mut config = LintConfig::default();
        let before = config.rule_specs().unwrap();
        let position = before
            .iter()
            .position(|s| s.name == "header-max-length")
            .unwrap();

        config.rules.push(RuleDeclaration {
            name: "header-max-length".to_string(),
            severity: RuleSeverity::Warning,
            kind: DeclaredKind::MaxLength {
                field: Field::Header,
                limit: 100,
                line_wise: false,
            },
        });
        config.rules.push(RuleDeclaration {
            name: "scope-enum".to_string(),
            severity: RuleSeverity::Error,
            kind: DeclaredKind::Enum {
                field: Field::Scope,
                allowed: vec!["api".to_string()],
                case_sensitive: true,
                when: When::Always,
            },
        });

        let after = config.rule_specs().unwrap();
        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(after[position].name, "header-max-length");
        assert_eq!(after[position].severity, RuleSeverity::Warning);
        assert_eq!(after.last().unwrap().name, "scope-enum");
    }

    #[test]
    fn test_duplicate_declarations_fail() {
        let declaration = RuleDeclaration {
            name: "subject-empty".to_string(),
            severity: RuleSeverity::Error,
            kind: DeclaredKind::NonEmpty {
                field: Field::Subject,
            },
        };
        let config = LintConfig {
            extends: "none".to_string(),
            rules: vec![declaration.clone(), declaration],
            output: OutputConfig::default(),
        };
        assert!(matches!(
            config.rule_specs(),
            Err(ConfigError::DuplicateRule { .. })
        ));
    }

    #[test]
    fn test_unknown_preset() {
        let config = LintConfig {
            extends: "angular".to_string(),
            ..LintConfig::default()
        };
        assert_eq!(
            config.rule_specs().unwrap_err(),
            ConfigError::UnknownPreset {
                name: "angular".to_string()
            }
        );
    }
}
