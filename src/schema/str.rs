//! String schema.

use regex::Regex;

use crate::issue::{Issue, IssueKind};
use crate::schema::{pipeline_methods, Kind, Limit, Parsed, Pipeline, Schema};
use crate::value::Value;

/// Validates string values. Constraints run in a fixed order: min-length,
/// max-length, pattern — first violation wins, no aggregation for scalars.
/// Lengths count Unicode scalar values, not bytes.
#[derive(Clone, Debug, Default)]
pub struct StringSchema {
    min: Option<Limit<usize>>,
    max: Option<Limit<usize>>,
    pattern: Option<Limit<Regex>>,
    pipeline: Pipeline,
}

impl StringSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, n: usize) -> Self {
        self.min = Some(Limit::new(n));
        self
    }

    pub fn min_with(mut self, n: usize, message: impl Into<String>) -> Self {
        self.min = Some(Limit::with(n, message));
        self
    }

    pub fn max(mut self, n: usize) -> Self {
        self.max = Some(Limit::new(n));
        self
    }

    pub fn max_with(mut self, n: usize, message: impl Into<String>) -> Self {
        self.max = Some(Limit::with(n, message));
        self
    }

    /// Require the whole value to match `re`. Anchor the pattern yourself if
    /// a full match is intended.
    pub fn pattern(mut self, re: Regex) -> Self {
        self.pattern = Some(Limit::new(re));
        self
    }

    pub fn pattern_with(mut self, re: Regex, message: impl Into<String>) -> Self {
        self.pattern = Some(Limit::with(re, message));
        self
    }

    pipeline_methods!();
}

impl Schema for StringSchema {
    fn kind(&self) -> Kind {
        Kind::String
    }

    fn safe_parse(&self, value: Value) -> Parsed {
        let value = self.pipeline.run_refines(Kind::String, value)?;
        if value.is_missing() {
            return Err(self.pipeline.required_issue("expected string"));
        }
        let Value::String(s) = &value else {
            return Err(Issue::new(
                IssueKind::StringType,
                format!("expected string, got {}", value.kind_name()),
            ));
        };
        if let Some(min) = &self.min {
            if s.chars().count() < min.value {
                return Err(Issue::new(
                    IssueKind::StringType,
                    min.message_or(format!("string shorter than {} characters", min.value)),
                ));
            }
        }
        if let Some(max) = &self.max {
            if s.chars().count() > max.value {
                return Err(Issue::new(
                    IssueKind::StringType,
                    max.message_or(format!("string longer than {} characters", max.value)),
                ));
            }
        }
        if let Some(pattern) = &self.pattern {
            if !pattern.value.is_match(s) {
                return Err(Issue::new(
                    IssueKind::StringType,
                    pattern.message_or(format!("string does not match /{}/", pattern.value)),
                ));
            }
        }
        self.pipeline.run_checks(Kind::String, &value, &value)?;
        Ok(value)
    }
}

// ------------------------------- Tests ------------------------------------ //
