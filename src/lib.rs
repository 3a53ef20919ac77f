// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! cklint - Commit Message Rule Engine
//!
//! Classifies a single parsed commit message as valid or invalid against an
//! ordered set of named, declarative rules.
//!
//! # Features
//!
//! - **Rule Engine**: enum, case, non-empty, trailing-char, length,
//!   leading-blank and charset rules, plus custom predicates
//! - **Severities**: `off`, `warning` and `error`; only errors reject a message
//! - **Presets**: a conventional-commit rule set that config files extend
//! - **CLI**: a `check` command suitable for a `commit-msg` hook
//!
//! # Example
//!
//! ```
//! use cklint::commit::ParsedCommitMessage;
//! use cklint::config::conventional_rules;
//! use cklint::rules::RuleEngine;
//!
//! let engine = RuleEngine::new(conventional_rules()).unwrap();
//! let message = ParsedCommitMessage::new("feat", "add x").with_scope("api");
//!
//! let result = engine.evaluate(&message).unwrap();
//! assert!(!result.has_errors());
//! ```

// Module declarations
pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod rules;

// Re-exports for convenience
pub use commit::ParsedCommitMessage;
pub use config::LintConfig;
pub use error::{CkError, ConfigError, Result};
pub use rules::{RuleEngine, RuleSeverity, RuleSpec, ValidationResult};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of cklint.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, short_sha(sha), date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, short_sha(sha))
            }
            _ => VERSION.to_string(),
        }
    }

    fn short_sha(sha: &str) -> &str {
        sha.get(..7).unwrap_or(sha)
    }
}
