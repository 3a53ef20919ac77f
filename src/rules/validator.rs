// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validation result types.

use crate::cli::args::OutputFormat;
use console::{style, Style};
use serde::Serialize;

use super::spec::RuleSeverity;

/// The result of evaluating one rule against one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Name of the rule that produced this finding.
    pub rule_name: String,
    /// Severity the rule was declared with.
    pub severity: RuleSeverity,
    /// Whether the rule passed.
    pub passed: bool,
    /// Human-readable explanation, present when the rule failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Finding {
    /// Whether this finding failed at error severity.
    pub fn is_error(&self) -> bool {
        !self.passed && self.severity == RuleSeverity::Error
    }

    /// Whether this finding failed at warning severity.
    pub fn is_warning(&self) -> bool {
        !self.passed && self.severity == RuleSeverity::Warning
    }

    /// Format the finding for terminal output.
    pub fn format(&self) -> String {
        let (prefix, code_style) = if self.is_error() {
            (style("✗").red().bold(), Style::new().red())
        } else {
            (style("⚠").yellow().bold(), Style::new().yellow())
        };

        format!(
            "{} {} {}",
            prefix,
            code_style.apply_to(&self.rule_name),
            self.message.as_deref().unwrap_or("")
        )
    }
}

/// Result of validating a commit message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// Header of the validated message, for display.
    pub header: String,
    /// Findings in rule declaration order.
    pub findings: Vec<Finding>,
}

impl ValidationResult {
    /// Create an empty validation result.
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            findings: Vec::new(),
        }
    }

    /// Any failed finding at error severity.
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(Finding::is_error)
    }

    /// Any failed finding at warning severity.
    pub fn has_warnings(&self) -> bool {
        self.findings.iter().any(Finding::is_warning)
    }

    /// Check if the validation passed (no errors).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// Failed findings, in declaration order.
    pub fn failures(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| !f.passed)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_warning())
    }

    /// Print the result to stdout.
    pub fn print(&self, format: Option<OutputFormat>) {
        match format {
            Some(OutputFormat::Json) => self.print_json(),
            _ => self.print_text(),
        }
    }

    /// Print in text format.
    fn print_text(&self) {
        let status = if self.is_valid() {
            style("✓").green().bold()
        } else {
            style("✗").red().bold()
        };
        println!("{} {}", status, self.header);

        for finding in self.failures() {
            println!("  {}", finding.format());
        }

        println!("  {}", style(self.summary()).dim());
    }

    /// Print in JSON format.
    fn print_json(&self) {
        let json = serde_json::json!({
            "valid": self.is_valid(),
            "has_errors": self.has_errors(),
            "has_warnings": self.has_warnings(),
            "header": self.header,
            "findings": self.findings,
        });

        println!(
            "{}",
            serde_json::to_string_pretty(&json).unwrap_or_default()
        );
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        let errors = self.errors().count();
        let warnings = self.warnings().count();

        if errors == 0 {
            if warnings == 0 {
                "Valid".to_string()
            } else {
                format!("Valid ({})", count(warnings, "warning"))
            }
        } else {
            format!(
                "Invalid ({}, {})",
                count(errors, "error"),
                count(warnings, "warning")
            )
        }
    }
}

fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", n, noun)
    }
}
