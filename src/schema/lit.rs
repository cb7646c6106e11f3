//! Literal and union schemas.

use crate::issue::{Issue, IssueKind};
use crate::schema::{pipeline_methods, Kind, Parsed, Pipeline, Schema, SchemaRef};
use crate::value::Value;

/// Validates membership in an ordered set of allowed literal values.
/// Exact equality, linear scan, first match wins — order only determines
/// which comparison short-circuits first.
#[derive(Clone, Debug, Default)]
pub struct LiteralSchema {
    allowed: Vec<Value>,
    pipeline: Pipeline,
}

impl LiteralSchema {
    pub fn new<I, V>(allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        LiteralSchema {
            allowed: allowed.into_iter().map(Into::into).collect(),
            pipeline: Pipeline::default(),
        }
    }

    fn allowed_list(&self) -> String {
        let rendered: Vec<String> = self.allowed.iter().map(|v| v.to_string()).collect();
        rendered.join(", ")
    }

    pipeline_methods!();
}

impl Schema for LiteralSchema {
    fn kind(&self) -> Kind {
        Kind::Literal
    }

    fn safe_parse(&self, value: Value) -> Parsed {
        let value = self.pipeline.run_refines(Kind::Literal, value)?;
        if value.is_missing() {
            return Err(self
                .pipeline
                .required_issue(&format!("expected one of: {}", self.allowed_list())));
        }
        if !self.allowed.iter().any(|allowed| allowed == &value) {
            return Err(Issue::new(
                IssueKind::Literal,
                format!("expected one of: {}", self.allowed_list()),
            ));
        }
        self.pipeline.run_checks(Kind::Literal, &value, &value)?;
        Ok(value)
    }
}

/// Tries alternative schemas left-to-right; the first success wins, with no
/// backtracking or ambiguity detection. On total failure the message stays
/// generic and does not attribute failure to any alternative.
// TODO: aggregate the per-alternative issues once the public error shape can
// grow a Union child list.
#[derive(Clone, Debug)]
pub struct UnionSchema {
    alternatives: Vec<SchemaRef>,
    pipeline: Pipeline,
}

impl UnionSchema {
    pub fn new<I>(alternatives: I) -> Self
    where
        I: IntoIterator<Item = SchemaRef>,
    {
        UnionSchema {
            alternatives: alternatives.into_iter().collect(),
            pipeline: Pipeline::default(),
        }
    }

    pipeline_methods!();
}

impl Schema for UnionSchema {
    fn kind(&self) -> Kind {
        Kind::Union
    }

    fn safe_parse(&self, value: Value) -> Parsed {
        let value = self.pipeline.run_refines(Kind::Union, value)?;
        for alternative in &self.alternatives {
            if let Ok(out) = alternative.safe_parse(value.clone()) {
                self.pipeline.run_checks(Kind::Union, &value, &out)?;
                return Ok(out);
            }
        }
        if value.is_missing() {
            return Err(self.pipeline.required_issue("expected a union value"));
        }
        Err(Issue::new(
            IssueKind::Union,
            "no union alternative matched",
        ))
    }
}

// ------------------------------- Tests ------------------------------------ //
