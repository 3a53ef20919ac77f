// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine for commit validation.

use std::collections::HashSet;

use crate::commit::ParsedCommitMessage;
use crate::config::LintConfig;
use crate::error::{ConfigError, Result};

use super::builtin::check_rule;
use super::spec::{RuleSeverity, RuleSpec};
use super::validator::{Finding, ValidationResult};

/// Rule engine for validating commit messages.
///
/// The rule set is fixed at construction, so one engine can be shared
/// across threads and evaluated concurrently.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: Vec<RuleSpec>,
}

impl RuleEngine {
    /// Create a rule engine from an ordered list of rules.
    ///
    /// Fails on duplicate names and on parameters that are unusable for the
    /// rule's kind, including rules that are switched off.
    pub fn new(rules: impl IntoIterator<Item = RuleSpec>) -> std::result::Result<Self, ConfigError> {
        let rules: Vec<RuleSpec> = rules.into_iter().collect();
        let mut seen = HashSet::new();

        for rule in &rules {
            if !seen.insert(rule.name.as_str()) {
                return Err(ConfigError::DuplicateRule {
                    name: rule.name.clone(),
                });
            }
            rule.validate()?;
        }

        tracing::debug!("Rule engine configured with {} rules", rules.len());
        Ok(Self { rules })
    }

    /// Create a rule engine from loaded configuration.
    pub fn from_config(config: &LintConfig) -> std::result::Result<Self, ConfigError> {
        Self::new(config.rule_specs()?)
    }

    /// The configured rules, in evaluation order.
    pub fn rules(&self) -> &[RuleSpec] {
        &self.rules
    }

    /// Evaluate every enabled rule against a message.
    ///
    /// A rule whose parameters turn out to be unusable aborts the whole
    /// evaluation; rule failures are returned as findings.
    pub fn evaluate(
        &self,
        message: &ParsedCommitMessage,
    ) -> std::result::Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::new(message.header.clone());

        for rule in &self.rules {
            if rule.severity == RuleSeverity::Off {
                tracing::trace!(rule = %rule.name, "skipping disabled rule");
                continue;
            }

            let outcome = check_rule(rule, message)?;
            if !outcome.passed {
                tracing::debug!(rule = %rule.name, severity = %rule.severity, "rule failed");
            }

            result.findings.push(Finding {
                rule_name: rule.name.clone(),
                severity: rule.severity,
                passed: outcome.passed,
                message: outcome.message.filter(|_| !outcome.passed),
            });
        }

        Ok(result)
    }

    /// Parse raw commit text and evaluate it.
    pub fn validate_str(&self, raw: &str) -> Result<ValidationResult> {
        let parsed = ParsedCommitMessage::parse(raw)?;
        Ok(self.evaluate(&parsed)?)
    }
}
