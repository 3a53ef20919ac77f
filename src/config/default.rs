// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in presets and example configuration files.

use crate::error::ConfigError;
use crate::rules::{CaseMode, Charset, Field, Granularity, RuleKind, RuleSeverity, RuleSpec, When};

/// Names accepted by `extends`.
pub const PRESETS: &[&str] = &["conventional", "none"];

/// Commit types allowed by the conventional preset.
pub const CONVENTIONAL_TYPES: &[&str] = &[
    "feat", "fix", "docs", "style", "refactor", "perf", "test", "build", "ci", "chore", "revert",
];

/// Rules of a named preset.
pub fn preset_rules(name: &str) -> Result<Vec<RuleSpec>, ConfigError> {
    match name {
        "conventional" => Ok(conventional_rules()),
        "none" => Ok(Vec::new()),
        other => Err(ConfigError::UnknownPreset {
            name: other.to_string(),
        }),
    }
}

/// The conventional commit rule set.
pub fn conventional_rules() -> Vec<RuleSpec> {
    let error = RuleSeverity::Error;

    vec![
        RuleSpec::new(
            "type-enum",
            error,
            RuleKind::Enum {
                field: Field::Type,
                allowed: CONVENTIONAL_TYPES.iter().map(|t| t.to_string()).collect(),
                case_sensitive: true,
                when: When::Always,
            },
        ),
        RuleSpec::new("type-case", error, lower_case(Field::Type)),
        RuleSpec::new("type-empty", error, RuleKind::NonEmpty { field: Field::Type }),
        RuleSpec::new("scope-case", error, lower_case(Field::Scope)),
        RuleSpec::new("subject-case", error, lower_case(Field::Subject)),
        RuleSpec::new(
            "subject-empty",
            error,
            RuleKind::NonEmpty {
                field: Field::Subject,
            },
        ),
        RuleSpec::new(
            "subject-full-stop",
            error,
            RuleKind::NoTrailingChar {
                field: Field::Subject,
                ch: '.',
            },
        ),
        RuleSpec::new(
            "header-max-length",
            error,
            RuleKind::MaxLength {
                field: Field::Header,
                limit: 72,
                line_wise: false,
            },
        ),
        RuleSpec::new(
            "body-leading-blank",
            error,
            RuleKind::LeadingBlank { field: Field::Body },
        ),
        RuleSpec::new(
            "body-max-line-length",
            error,
            RuleKind::MaxLength {
                field: Field::Body,
                limit: 72,
                line_wise: true,
            },
        ),
        RuleSpec::new(
            "header-format",
            error,
            RuleKind::Charset {
                field: Field::Header,
                charset: Charset::ASCII,
                granularity: Granularity::Codepoint,
            },
        ),
        RuleSpec::new(
            "body-format",
            error,
            RuleKind::Charset {
                field: Field::Body,
                charset: Charset::ASCII,
                granularity: Granularity::Codepoint,
            },
        ),
    ]
}

fn lower_case(field: Field) -> RuleKind {
    RuleKind::Case {
        field,
        modes: vec![CaseMode::LowerCase],
        when: When::Always,
    }
}

/// Minimal configuration file.
pub fn minimal_config() -> &'static str {
    r#"# cklint configuration (minimal)
extends = "none"

[[rules]]
name = "type-empty"
severity = "error"
kind = "non-empty"
field = "type"

[[rules]]
name = "subject-empty"
severity = "error"
kind = "non-empty"
field = "subject"

[[rules]]
name = "header-max-length"
severity = "error"
kind = "max-length"
field = "header"
limit = 72
"#
}

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# cklint configuration
# Author: Eshan Roy
# SPDX-License-Identifier: MIT

# Rules below are layered on this preset. A rule with the same name as a
# preset rule replaces it; new names are appended.
extends = "conventional"

[output]
color = true

# Severity: "off" (0), "warning" (1) or "error" (2).

[[rules]]
name = "scope-enum"
severity = "error"
kind = "enum"
field = "scope"
allowed = [
    "api", "ui", "db", "config", "security", "service",
    "test", "ci", "deps", "docs", "scripts",
]

[[rules]]
name = "type-forbidden"
severity = "error"
kind = "enum"
field = "type"
allowed = ["wip", "fixup", "squash"]
when = "never"

[[rules]]
name = "subject-min-length"
severity = "warning"
kind = "min-length"
field = "subject"
limit = 10

# Byte-level gate, stricter than the conventional codepoint check.
[[rules]]
name = "header-format"
severity = "error"
kind = "charset"
field = "header"
charset = "ascii"
granularity = "byte"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::parse_config;
    use crate::rules::RuleEngine;

    #[test]
    fn test_conventional_rules_build_an_engine() {
        let engine = RuleEngine::new(conventional_rules()).unwrap();
        assert_eq!(engine.rules().len(), 12);
    }

    #[test]
    fn test_conventional_fields() {
        let rules = conventional_rules();
        let scope_case = rules.iter().find(|r| r.name == "scope-case").unwrap();
        assert_eq!(scope_case.kind.field(), Some(Field::Scope));
        let subject_case = rules.iter().find(|r| r.name == "subject-case").unwrap();
        assert_eq!(subject_case.kind.field(), Some(Field::Subject));
    }

    #[test]
    fn test_example_config_parses() {
        let config = parse_config(example_config()).unwrap();
        let specs = config.rule_specs().unwrap();
        assert!(RuleEngine::new(specs).is_ok());
    }

    #[test]
    fn test_minimal_config_parses() {
        let config = parse_config(minimal_config()).unwrap();
        assert_eq!(config.rule_specs().unwrap().len(), 3);
    }

    #[test]
    fn test_presets_resolve() {
        for name in PRESETS {
            assert!(preset_rules(name).is_ok());
        }
    }
}
