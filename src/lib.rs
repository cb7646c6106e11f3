//! Runtime schema validation for untyped values (single-crate engine).
//!
//! Build a schema by composing variant constructors and modifier calls,
//! then run `parse`/`safe_parse` against an untyped [`Value`] (typically
//! fresh out of `serde_json`). The result is either the validated value or
//! a structured tree of issues mirroring the failing input.
//!
//! Design goals:
//! - Closed value sum type; structural checks match on it exhaustively.
//! - Fixed per-parse stage order: refine* → structural → check* → transform.
//! - Retained traversal aggregates every nested failure; immediate mode
//!   short-circuits at the first.
//! - Schemas are configured by consuming builders and sealed behind
//!   `Arc<dyn Schema>`; parsing is pure and reusable across threads.

pub mod adapter;
pub mod issue;
pub mod schema;
pub mod value;

use std::sync::Arc;

pub use crate::issue::{FieldIssue, IndexedIssue, Issue, IssueKind, PathKey};
pub use crate::schema::{
    CheckCtx, Kind, Mode, Nullable, Optional, ParseError, Parsed, RefineCtx, Schema, SchemaRef,
    Transform,
};
pub use crate::schema::arr::ArraySchema;
pub use crate::schema::lit::{LiteralSchema, UnionSchema};
pub use crate::schema::num::{BigIntSchema, NumberSchema};
pub use crate::schema::obj::ObjectSchema;
pub use crate::schema::prim::{AnySchema, BooleanSchema, UnknownSchema};
pub use crate::schema::str::StringSchema;
pub use crate::value::Value;

// ------------------------------ Factories --------------------------------- //

pub fn string() -> StringSchema {
    StringSchema::new()
}

pub fn number() -> NumberSchema {
    NumberSchema::new()
}

pub fn bigint() -> BigIntSchema {
    BigIntSchema::new()
}

pub fn boolean() -> BooleanSchema {
    BooleanSchema::new()
}

pub fn unknown() -> UnknownSchema {
    UnknownSchema::new()
}

pub fn any() -> AnySchema {
    AnySchema::new()
}

pub fn array(item: impl Schema + 'static) -> ArraySchema {
    ArraySchema::new(Arc::new(item))
}

/// Empty object schema; declare fields with `.field(name, schema)` (or use
/// [`ObjectSchema::from_fields`] for a prebuilt field list).
pub fn object() -> ObjectSchema {
    ObjectSchema::new()
}

pub fn literal<I, V>(allowed: I) -> LiteralSchema
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    LiteralSchema::new(allowed)
}

pub fn union<I>(alternatives: I) -> UnionSchema
where
    I: IntoIterator<Item = SchemaRef>,
{
    UnionSchema::new(alternatives)
}

// ------------------------------- Tests ------------------------------------ //
