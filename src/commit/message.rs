// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Parsed commit message structure.

use crate::error::{CommitError, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for splitting a conventional commit header.
    static ref HEADER_REGEX: Regex =
        Regex::new(r"^(?P<type>\w*)(?:\((?P<scope>[^)]*)\))?(?P<breaking>!)?: (?P<subject>.*)$")
            .expect("header regex is valid");
}

/// A commit message already split into its conventional parts.
///
/// Optional parts read as the empty string when absent, which is what the
/// rule predicates see.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedCommitMessage {
    /// Commit type (feat, fix, etc.). May be empty.
    pub commit_type: String,
    /// Optional scope.
    pub scope: Option<String>,
    /// Subject line.
    pub subject: String,
    /// Everything after the header line, including the separator blank line.
    pub body: Option<String>,
    /// The full first line.
    pub header: String,
    /// Whether the header carried the `!` marker.
    pub is_breaking: bool,
}

impl ParsedCommitMessage {
    /// Create a new message from a type and subject.
    pub fn new(commit_type: impl Into<String>, subject: impl Into<String>) -> Self {
        let mut msg = Self {
            commit_type: commit_type.into(),
            subject: subject.into(),
            ..Self::default()
        };
        msg.header = msg.format_header();
        msg
    }

    /// Set the scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        let scope = scope.into();
        self.scope = if scope.is_empty() { None } else { Some(scope) };
        self.header = self.format_header();
        self
    }

    /// Set the body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        let body = body.into();
        self.body = if body.is_empty() { None } else { Some(body) };
        self
    }

    /// Set the breaking flag.
    pub fn with_breaking(mut self, breaking: bool) -> Self {
        self.is_breaking = breaking;
        self.header = self.format_header();
        self
    }

    /// Split raw commit text into a parsed message.
    ///
    /// Git comment lines are dropped. A header that does not look like
    /// `type(scope): subject` yields an empty type and subject so that the
    /// declarative rules report it.
    pub fn parse(raw: &str) -> Result<Self> {
        let text = raw
            .lines()
            .filter(|line| !line.starts_with('#'))
            .collect::<Vec<_>>()
            .join("\n");
        let text = text.trim_end();
        let text = text.trim_start_matches(&['\n', '\r'][..]);

        if text.trim().is_empty() {
            return Err(CommitError::EmptyMessage.into());
        }

        let (header, rest) = match text.split_once('\n') {
            Some((header, rest)) => (header.trim_end_matches('\r'), Some(rest)),
            None => (text, None),
        };

        let body = rest
            .filter(|r| !r.trim().is_empty())
            .map(str::to_string);

        let mut msg = Self {
            header: header.to_string(),
            body,
            ..Self::default()
        };

        if let Some(captures) = HEADER_REGEX.captures(header) {
            msg.commit_type = captures
                .name("type")
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            msg.scope = captures
                .name("scope")
                .map(|m| m.as_str().to_string())
                .filter(|s| !s.is_empty());
            msg.subject = captures
                .name("subject")
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            msg.is_breaking = captures.name("breaking").is_some();
        } else {
            tracing::debug!("Header does not match the conventional format: {:?}", header);
        }

        Ok(msg)
    }

    /// The scope, or the empty string.
    pub fn scope_str(&self) -> &str {
        self.scope.as_deref().unwrap_or("")
    }

    /// The body, or the empty string.
    pub fn body_str(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }

    fn format_header(&self) -> String {
        let mut result = String::new();
        result.push_str(&self.commit_type);

        if let Some(ref scope) = self.scope {
            result.push('(');
            result.push_str(scope);
            result.push(')');
        }

        if self.is_breaking {
            result.push('!');
        }

        result.push_str(": ");
        result.push_str(&self.subject);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_new() {
        let msg = ParsedCommitMessage::new("feat", "add new feature");
        assert_eq!(msg.commit_type, "feat");
        assert_eq!(msg.subject, "add new feature");
        assert_eq!(msg.header, "feat: add new feature");
        assert!(msg.scope.is_none());
    }

    #[test]
    fn test_message_builder_updates_header() {
        let msg = ParsedCommitMessage::new("fix", "fix bug")
            .with_scope("core")
            .with_breaking(true)
            .with_body("\nThis fixes the bug");

        assert_eq!(msg.header, "fix(core)!: fix bug");
        assert_eq!(msg.scope_str(), "core");
        assert_eq!(msg.body_str(), "\nThis fixes the bug");
    }

    #[test]
    fn test_empty_scope_is_absent() {
        let msg = ParsedCommitMessage::new("feat", "add x").with_scope("");
        assert!(msg.scope.is_none());
        assert_eq!(msg.header, "feat: add x");
    }

    #[test]
    fn test_parse_header_parts() {
        let msg = ParsedCommitMessage::parse("feat(api): add x").unwrap();
        assert_eq!(msg.commit_type, "feat");
        assert_eq!(msg.scope.as_deref(), Some("api"));
        assert_eq!(msg.subject, "add x");
        assert_eq!(msg.header, "feat(api): add x");
        assert!(msg.body.is_none());
    }

    #[test]
    fn test_parse_keeps_separator_in_body() {
        let msg = ParsedCommitMessage::parse("fix: fix bug\n\nThis is the body\n").unwrap();
        assert_eq!(msg.body.as_deref(), Some("\nThis is the body"));
    }

    #[test]
    fn test_parse_strips_comment_lines() {
        let raw = "feat: add x\n\nbody text\n# Please enter the commit message\n# On branch main\n";
        let msg = ParsedCommitMessage::parse(raw).unwrap();
        assert_eq!(msg.body.as_deref(), Some("\nbody text"));
    }

    #[test]
    fn test_parse_breaking() {
        let msg = ParsedCommitMessage::parse("feat!: breaking change").unwrap();
        assert!(msg.is_breaking);
        assert_eq!(msg.commit_type, "feat");
    }

    #[test]
    fn test_parse_non_conventional_header() {
        let msg = ParsedCommitMessage::parse("Update stuff").unwrap();
        assert_eq!(msg.commit_type, "");
        assert_eq!(msg.subject, "");
        assert_eq!(msg.header, "Update stuff");
    }

    #[test]
    fn test_parse_empty() {
        assert!(ParsedCommitMessage::parse("\n# only a comment\n").is_err());
    }
}
