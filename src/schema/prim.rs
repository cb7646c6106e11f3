//! Boolean, unknown and any schemas.

use crate::issue::{Issue, IssueKind};
use crate::schema::{pipeline_methods, Kind, Parsed, Pipeline, Schema};
use crate::value::Value;

/// Validates booleans. No constraint configs.
#[derive(Clone, Debug, Default)]
pub struct BooleanSchema {
    pipeline: Pipeline,
}

impl BooleanSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pipeline_methods!();
}

impl Schema for BooleanSchema {
    fn kind(&self) -> Kind {
        Kind::Boolean
    }

    fn safe_parse(&self, value: Value) -> Parsed {
        let value = self.pipeline.run_refines(Kind::Boolean, value)?;
        if value.is_missing() {
            return Err(self.pipeline.required_issue("expected boolean"));
        }
        if !matches!(value, Value::Bool(_)) {
            return Err(Issue::new(
                IssueKind::BooleanType,
                format!("expected boolean, got {}", value.kind_name()),
            ));
        }
        self.pipeline.run_checks(Kind::Boolean, &value, &value)?;
        Ok(value)
    }
}

/// Performs no type check at all. Null/undefined pass through, unless a
/// `required` message was explicitly configured.
#[derive(Clone, Debug, Default)]
pub struct UnknownSchema {
    pipeline: Pipeline,
}

impl UnknownSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pipeline_methods!();
}

impl Schema for UnknownSchema {
    fn kind(&self) -> Kind {
        Kind::Unknown
    }

    fn safe_parse(&self, value: Value) -> Parsed {
        let value = self.pipeline.run_refines(Kind::Unknown, value)?;
        if value.is_missing() && self.pipeline.has_required() {
            return Err(self.pipeline.required_issue("required value missing"));
        }
        self.pipeline.run_checks(Kind::Unknown, &value, &value)?;
        Ok(value)
    }
}

/// Like unknown, and additionally permits any output type through
/// checks and transforms.
#[derive(Clone, Debug, Default)]
pub struct AnySchema {
    pipeline: Pipeline,
}

impl AnySchema {
    pub fn new() -> Self {
        Self::default()
    }

    pipeline_methods!();
}

impl Schema for AnySchema {
    fn kind(&self) -> Kind {
        Kind::Any
    }

    fn safe_parse(&self, value: Value) -> Parsed {
        let value = self.pipeline.run_refines(Kind::Any, value)?;
        if value.is_missing() && self.pipeline.has_required() {
            return Err(self.pipeline.required_issue("required value missing"));
        }
        self.pipeline.run_checks(Kind::Any, &value, &value)?;
        Ok(value)
    }
}

// ------------------------------- Tests ------------------------------------ //
