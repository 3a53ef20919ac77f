// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine module for commit validation.
//!
//! This module provides a declarative rule engine: an ordered set of named
//! rules, each with a severity, evaluated against a parsed commit message.

mod builtin;
mod engine;
mod spec;
mod validator;

pub use builtin::{check_rule, matches_case, to_case};
pub use engine::RuleEngine;
pub use spec::{
    CaseMode, Charset, Field, FnRule, Granularity, NamedCharset, Rule, RuleKind, RuleOutcome,
    RuleSeverity, RuleSpec, When,
};
pub use validator::{Finding, ValidationResult};
