//! Schema trait, kind discriminants, and the shared refine/check pipeline.
//!
//! Every variant runs the same fixed stage order per parse:
//! refine* → structural check → check* (→ transform, for the wrapper).
//! The stages live in [`Pipeline`], owned by each variant; the variant
//! supplies only its structural check.
//!
//! Configuration is consuming-builder style: `string().min(3).required("x")`
//! moves the schema through each call and hands back the configured value.
//! Once sealed behind an `Arc<dyn Schema>` an instance is immutable and can
//! be shared across threads for any number of parse calls.

pub mod arr;
pub mod lit;
pub mod num;
pub mod obj;
pub mod prim;
pub mod str;
pub mod wrap;

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::issue::{Issue, IssueKind};
use crate::value::Value;

pub use self::wrap::{Nullable, Optional, Transform};

/// Uniform result of every validation operation.
pub type Parsed = Result<Value, Issue>;

/// Shared, immutable handle to a sealed schema.
pub type SchemaRef = Arc<dyn Schema>;

// ------------------------------- Kind ------------------------------------- //

/// Fixed discriminant per variant, used for dispatch-free provenance in
/// issues (`Check`/`Refine`/`Transform` record which schema kind raised them).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    String,
    Number,
    BigInt,
    Boolean,
    Unknown,
    Any,
    Array,
    Object,
    Literal,
    Union,
    Optional,
    Nullable,
    Transform,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Number => "number",
            Kind::BigInt => "bigint",
            Kind::Boolean => "boolean",
            Kind::Unknown => "unknown",
            Kind::Any => "any",
            Kind::Array => "array",
            Kind::Object => "object",
            Kind::Literal => "literal",
            Kind::Union => "union",
            Kind::Optional => "optional",
            Kind::Nullable => "nullable",
            Kind::Transform => "transform",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ----------------------------- Parse error -------------------------------- //

/// Error surfaced by [`Schema::parse`]; carries the full issue tree with no
/// information loss versus `safe_parse`.
#[derive(Debug, Error)]
#[error("{issue}")]
pub struct ParseError {
    pub issue: Issue,
}

impl From<Issue> for ParseError {
    fn from(issue: Issue) -> Self {
        ParseError { issue }
    }
}

// --------------------------- Shared config -------------------------------- //

/// Traversal strategy for nestable schemas (arrays, objects).
///
/// Retained visits every element/field and aggregates all failures;
/// immediate stops at the first one. Retained is the default — `immediate()`
/// opts into short-circuiting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    Immediate,
    #[default]
    Retained,
}

/// One optional constraint config: a threshold plus an optional custom
/// failure message.
#[derive(Clone, Debug)]
pub(crate) struct Limit<T> {
    pub value: T,
    pub message: Option<String>,
}

impl<T> Limit<T> {
    pub fn new(value: T) -> Self {
        Limit {
            value,
            message: None,
        }
    }

    pub fn with(value: T, message: impl Into<String>) -> Self {
        Limit {
            value,
            message: Some(message.into()),
        }
    }

    pub fn message_or(&self, fallback: String) -> String {
        self.message.clone().unwrap_or(fallback)
    }
}

/// Consuming-builder methods for the refine/check stages, identical on
/// every variant that owns a `pipeline` field. The modifier wrappers use
/// this form directly: they have no null/undefined failure of their own, so
/// they carry no `required` override.
macro_rules! stage_methods {
    () => {
        /// Register a pre-validation rewriting step. Refines run in
        /// registration order before the structural check; the first failure
        /// aborts the parse with a `Refine` issue.
        pub fn refine<F>(mut self, f: F) -> Self
        where
            F: Fn(
                    &$crate::schema::RefineCtx<'_>,
                    $crate::value::Value,
                ) -> Result<$crate::value::Value, String>
                + Send
                + Sync
                + 'static,
        {
            self.pipeline.push_refine(::std::sync::Arc::new(f));
            self
        }

        /// Register a post-validation predicate with a caller-supplied
        /// message. Checks run in registration order after the structural
        /// check; the first failure aborts with a `Check` issue.
        pub fn check<F>(mut self, f: F) -> Self
        where
            F: Fn(&$crate::schema::CheckCtx<'_>) -> Result<(), String> + Send + Sync + 'static,
        {
            self.pipeline.push_check(::std::sync::Arc::new(f));
            self
        }
    };
}
pub(crate) use stage_methods;

/// `stage_methods` plus the `required` override, for the variants that can
/// themselves fail on null/undefined (scalars, array, object, literal,
/// union).
macro_rules! pipeline_methods {
    () => {
        $crate::schema::stage_methods!();

        /// Override the message used for the null/undefined failure,
        /// independently of the generic type-mismatch message.
        pub fn required(mut self, message: impl Into<String>) -> Self {
            self.pipeline.set_required(message.into());
            self
        }
    };
}
pub(crate) use pipeline_methods;

// ------------------------------ Pipeline ---------------------------------- //

/// Context handed to a refine step: the raw input to this schema's parse
/// plus the owning schema kind. The working value travels separately so
/// each refine sees the previous refine's output.
pub struct RefineCtx<'a> {
    pub input: &'a Value,
    pub kind: Kind,
}

/// Context handed to a check step: the post-refine input, the structural
/// result, and the owning schema kind. Checks never mutate the value.
pub struct CheckCtx<'a> {
    pub input: &'a Value,
    pub output: &'a Value,
    pub kind: Kind,
}

pub type RefineFn = Arc<dyn Fn(&RefineCtx<'_>, Value) -> Result<Value, String> + Send + Sync>;
pub type CheckFn = Arc<dyn Fn(&CheckCtx<'_>) -> Result<(), String> + Send + Sync>;

/// The user-extensible stages every variant carries. Stored as `Arc`s so
/// variants stay `Clone` (object `extend` re-registers them on the copy).
#[derive(Clone, Default)]
pub(crate) struct Pipeline {
    refines: Vec<RefineFn>,
    checks: Vec<CheckFn>,
    required: Option<String>,
}

impl Pipeline {
    pub fn push_refine(&mut self, f: RefineFn) {
        self.refines.push(f);
    }

    pub fn push_check(&mut self, f: CheckFn) {
        self.checks.push(f);
    }

    pub fn set_required(&mut self, message: String) {
        self.required = Some(message);
    }

    pub fn has_required(&self) -> bool {
        self.required.is_some()
    }

    pub fn has_checks(&self) -> bool {
        !self.checks.is_empty()
    }

    /// Run every refine in registration order. The first `Err` short-circuits
    /// with a `Refine` issue; each `Ok` replaces the working value.
    pub fn run_refines(&self, kind: Kind, value: Value) -> Result<Value, Issue> {
        if self.refines.is_empty() {
            return Ok(value);
        }
        let raw = value.clone();
        let mut current = value;
        for f in &self.refines {
            let ctx = RefineCtx { input: &raw, kind };
            current = f(&ctx, current)
                .map_err(|m| Issue::new(IssueKind::Refine { source: kind }, m))?;
        }
        Ok(current)
    }

    /// Run every check in registration order against the structural result.
    /// The first failing check short-circuits with its caller-supplied message.
    pub fn run_checks(&self, kind: Kind, input: &Value, output: &Value) -> Result<(), Issue> {
        for f in &self.checks {
            let ctx = CheckCtx { input, output, kind };
            f(&ctx).map_err(|m| Issue::new(IssueKind::Check { source: kind }, m))?;
        }
        Ok(())
    }

    /// Build the null/undefined failure. A custom `required` message wins
    /// over the variant's generic type message.
    pub fn required_issue(&self, generic: &str) -> Issue {
        let message = self
            .required
            .clone()
            .unwrap_or_else(|| generic.to_string());
        Issue::new(IssueKind::Required, message)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("refines", &self.refines.len())
            .field("checks", &self.checks.len())
            .field("required", &self.required)
            .finish()
    }
}

// ------------------------------- Schema ----------------------------------- //

/// One composable validation rule.
///
/// `safe_parse` is the sole validation entry point for control flow; it
/// never panics for invalid input. `parse` is the throw-ish convenience
/// wrapper returning a rendered [`ParseError`].
pub trait Schema: std::fmt::Debug + Send + Sync {
    fn kind(&self) -> Kind;

    fn safe_parse(&self, value: Value) -> Parsed;

    fn parse(&self, value: Value) -> Result<Value, ParseError> {
        self.safe_parse(value).map_err(ParseError::from)
    }

    /// Wrap so that `undefined` short-circuits to `Ok(undefined)`.
    fn optional(self) -> Optional
    where
        Self: Sized + 'static,
    {
        Optional::new(Arc::new(self))
    }

    /// Wrap so that `null` short-circuits to `Ok(null)`.
    fn nullable(self) -> Nullable
    where
        Self: Sized + 'static,
    {
        Nullable::new(Arc::new(self))
    }

    /// Wrap with a post-pipeline value mapping that can itself fail.
    /// Chainable: each call wraps the previous schema, and the chain runs
    /// left-to-right stopping at the first failing link.
    fn transform<F>(self, f: F) -> Transform
    where
        Self: Sized + 'static,
        F: Fn(Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        Transform::new(Arc::new(self), Arc::new(f))
    }

    /// Freeze into a shared immutable handle.
    fn seal(self) -> SchemaRef
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

// ------------------------------- Tests ------------------------------------ //
