// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in rule predicates.

use crate::commit::ParsedCommitMessage;
use crate::error::ConfigError;

use super::spec::{CaseMode, Charset, Field, Granularity, RuleKind, RuleOutcome, RuleSpec, When};

/// Values longer than this are shortened in failure messages.
const SUMMARY_CHARS: usize = 40;

/// Run the predicate for one rule against a message.
///
/// Parameters are re-checked here, so a spec that was never passed through
/// the engine constructor still fails with a configuration error instead of
/// producing a misleading finding.
pub fn check_rule(spec: &RuleSpec, message: &ParsedCommitMessage) -> Result<RuleOutcome, ConfigError> {
    spec.validate()?;

    let outcome = match &spec.kind {
        RuleKind::Enum {
            field,
            allowed,
            case_sensitive,
            when,
        } => check_enum(*field, field.value(message), allowed, *case_sensitive, *when),
        RuleKind::Case { field, modes, when } => {
            check_case(*field, field.value(message), modes, *when)
        }
        RuleKind::NonEmpty { field } => check_non_empty(*field, field.value(message)),
        RuleKind::NoTrailingChar { field, ch } => {
            check_no_trailing_char(*field, field.value(message), *ch)
        }
        RuleKind::MaxLength {
            field,
            limit,
            line_wise,
        } => check_max_length(*field, field.value(message), *limit, *line_wise),
        RuleKind::MinLength { field, limit } => {
            check_min_length(*field, field.value(message), *limit)
        }
        RuleKind::LeadingBlank { field } => check_leading_blank(*field, field.value(message)),
        RuleKind::Charset {
            field,
            charset,
            granularity,
        } => check_charset(*field, field.value(message), *charset, *granularity),
        RuleKind::Custom(rule) => {
            let outcome = rule.check(message);
            if !outcome.passed && outcome.message.is_none() {
                RuleOutcome::fail(format!("custom rule '{}' failed", spec.name))
            } else {
                outcome
            }
        }
    };

    Ok(outcome)
}

/// Check a value against an allowed (or forbidden) set.
fn check_enum(
    field: Field,
    value: &str,
    allowed: &[String],
    case_sensitive: bool,
    when: When,
) -> RuleOutcome {
    if value.is_empty() {
        return RuleOutcome::pass();
    }

    let found = allowed.iter().any(|candidate| {
        if case_sensitive {
            candidate == value
        } else {
            candidate.to_lowercase() == value.to_lowercase()
        }
    });

    match (when, found) {
        (When::Always, true) | (When::Never, false) => RuleOutcome::pass(),
        (When::Always, false) => RuleOutcome::fail(format!(
            "{} '{}' is not allowed, use one of: {}",
            field,
            summarize(value),
            allowed.join(", ")
        )),
        (When::Never, true) => {
            RuleOutcome::fail(format!("{} '{}' is forbidden", field, summarize(value)))
        }
    }
}

/// Check the casing of a value.
fn check_case(field: Field, value: &str, modes: &[CaseMode], when: When) -> RuleOutcome {
    if value.is_empty() {
        return RuleOutcome::pass();
    }

    let matches = modes.iter().any(|mode| matches_case(*mode, value));
    let names = modes
        .iter()
        .map(CaseMode::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    match (when, matches) {
        (When::Always, true) | (When::Never, false) => RuleOutcome::pass(),
        (When::Always, false) => RuleOutcome::fail(format!(
            "{} must be {} (found '{}')",
            field,
            names,
            summarize(value)
        )),
        (When::Never, true) => RuleOutcome::fail(format!(
            "{} must not be {} (found '{}')",
            field,
            names,
            summarize(value)
        )),
    }
}

fn check_non_empty(field: Field, value: &str) -> RuleOutcome {
    if value.trim().is_empty() {
        RuleOutcome::fail(format!("{} may not be empty", field))
    } else {
        RuleOutcome::pass()
    }
}

fn check_no_trailing_char(field: Field, value: &str, ch: char) -> RuleOutcome {
    if value.ends_with(ch) {
        RuleOutcome::fail(format!("{} may not end with '{}'", field, ch))
    } else {
        RuleOutcome::pass()
    }
}

/// Check the length of a value in characters, optionally per line.
fn check_max_length(field: Field, value: &str, limit: usize, line_wise: bool) -> RuleOutcome {
    if !line_wise {
        let len = value.chars().count();
        return if len > limit {
            RuleOutcome::fail(format!(
                "{} has {} characters, exceeds limit {}",
                field, len, limit
            ))
        } else {
            RuleOutcome::pass()
        };
    }

    // CRLF counts as one break, a lone CR as its own.
    let offenders: Vec<(usize, usize)> = value
        .split('\n')
        .flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.chars().count()))
        .filter(|(_, len)| *len > limit)
        .collect();

    match offenders.as_slice() {
        [] => RuleOutcome::pass(),
        [(line, len)] => RuleOutcome::fail(format!(
            "{} line {} has {} characters, exceeds limit {}",
            field, line, len, limit
        )),
        [(line, len), rest @ ..] => RuleOutcome::fail(format!(
            "{} line {} has {} characters, exceeds limit {} ({} more lines too long)",
            field,
            line,
            len,
            limit,
            rest.len()
        )),
    }
}

fn check_min_length(field: Field, value: &str, limit: usize) -> RuleOutcome {
    let len = value.chars().count();
    if value.is_empty() || len >= limit {
        RuleOutcome::pass()
    } else {
        RuleOutcome::fail(format!(
            "{} has {} characters, needs at least {}",
            field, len, limit
        ))
    }
}

/// The first line of the value must be blank.
fn check_leading_blank(field: Field, value: &str) -> RuleOutcome {
    if value.is_empty() {
        return RuleOutcome::pass();
    }

    let first_line = value.split('\n').next().unwrap_or("");
    if first_line.trim().is_empty() {
        RuleOutcome::pass()
    } else {
        RuleOutcome::fail(format!("{} must have a leading blank line", field))
    }
}

/// Check every character (or byte) of the value against a charset.
fn check_charset(field: Field, value: &str, charset: Charset, granularity: Granularity) -> RuleOutcome {
    match granularity {
        Granularity::Codepoint => value
            .chars()
            .enumerate()
            .find(|(_, ch)| !charset.contains(*ch as u32))
            .map_or_else(RuleOutcome::pass, |(pos, ch)| {
                RuleOutcome::fail(format!(
                    "{} must contain only {} characters, found '{}' (U+{:04X}) at position {}",
                    field, charset, ch, ch as u32, pos
                ))
            }),
        Granularity::Byte => value
            .bytes()
            .enumerate()
            .find(|(_, b)| !charset.contains(u32::from(*b)))
            .map_or_else(RuleOutcome::pass, |(offset, b)| {
                RuleOutcome::fail(format!(
                    "{} must contain only {} bytes, found 0x{:02X} at offset {}",
                    field, charset, b, offset
                ))
            }),
    }
}

/// Whether `value` is already in the given case.
pub fn matches_case(mode: CaseMode, value: &str) -> bool {
    to_case(mode, value) == value
}

/// Convert a value to the given case.
pub fn to_case(mode: CaseMode, value: &str) -> String {
    match mode {
        CaseMode::LowerCase => value.to_lowercase(),
        CaseMode::UpperCase => value.to_uppercase(),
        CaseMode::SentenceCase => upper_first(value),
        CaseMode::CamelCase => split_words(value)
            .iter()
            .enumerate()
            .map(|(idx, word)| {
                if idx == 0 {
                    word.to_lowercase()
                } else {
                    capitalize(word)
                }
            })
            .collect(),
        CaseMode::PascalCase => split_words(value).iter().map(|w| capitalize(w)).collect(),
        CaseMode::KebabCase => join_lower(value, "-"),
        CaseMode::SnakeCase => join_lower(value, "_"),
        CaseMode::StartCase => split_words(value)
            .iter()
            .map(|w| upper_first(w))
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Split on non-alphanumerics and on lower-to-upper transitions.
fn split_words(value: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in value.chars() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_numeric();
        current.push(ch);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn join_lower(value: &str, sep: &str) -> String {
    split_words(value)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(sep)
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Shorten long values for messages.
fn summarize(value: &str) -> String {
    if value.chars().count() <= SUMMARY_CHARS {
        value.to_string()
    } else {
        let head: String = value.chars().take(SUMMARY_CHARS).collect();
        format!("{}...", head)
    }
}
