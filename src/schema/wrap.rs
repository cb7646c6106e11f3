//! Modifier wrappers: optional, nullable, transform.
//!
//! Each wraps exactly one inner schema. Optional intercepts `undefined`,
//! Nullable intercepts `null`; everything else — including the other
//! sentinel — is forwarded to the inner schema, so the wrappers chain
//! freely. Transform maps the inner pipeline's output and is itself a
//! schema, so `.transform(..)` calls chain into a left-to-right pipeline
//! that stops at the first failing link.

use std::sync::Arc;

use crate::issue::{Issue, IssueKind};
use crate::schema::{stage_methods, Kind, Parsed, Pipeline, Schema, SchemaRef};
use crate::value::Value;

/// `undefined` short-circuits to `Ok(undefined)` without delegating.
#[derive(Clone, Debug)]
pub struct Optional {
    inner: SchemaRef,
    pipeline: Pipeline,
}

impl Optional {
    pub fn new(inner: SchemaRef) -> Self {
        Optional {
            inner,
            pipeline: Pipeline::default(),
        }
    }

    stage_methods!();
}

impl Schema for Optional {
    fn kind(&self) -> Kind {
        Kind::Optional
    }

    fn safe_parse(&self, value: Value) -> Parsed {
        let value = self.pipeline.run_refines(Kind::Optional, value)?;
        if value.is_undefined() {
            return Ok(Value::Undefined);
        }
        let input_copy = self.pipeline.has_checks().then(|| value.clone());
        let out = self.inner.safe_parse(value)?;
        if let Some(input) = &input_copy {
            self.pipeline.run_checks(Kind::Optional, input, &out)?;
        }
        Ok(out)
    }
}

/// `null` short-circuits to `Ok(null)` without delegating.
#[derive(Clone, Debug)]
pub struct Nullable {
    inner: SchemaRef,
    pipeline: Pipeline,
}

impl Nullable {
    pub fn new(inner: SchemaRef) -> Self {
        Nullable {
            inner,
            pipeline: Pipeline::default(),
        }
    }

    stage_methods!();
}

impl Schema for Nullable {
    fn kind(&self) -> Kind {
        Kind::Nullable
    }

    fn safe_parse(&self, value: Value) -> Parsed {
        let value = self.pipeline.run_refines(Kind::Nullable, value)?;
        if value.is_null() {
            return Ok(Value::Null);
        }
        let input_copy = self.pipeline.has_checks().then(|| value.clone());
        let out = self.inner.safe_parse(value)?;
        if let Some(input) = &input_copy {
            self.pipeline.run_checks(Kind::Nullable, input, &out)?;
        }
        Ok(out)
    }
}

pub type TransformFn = Arc<dyn Fn(Value) -> Result<Value, String> + Send + Sync>;

/// Runs the inner schema's full pipeline, then maps its output. Inner
/// failures are returned verbatim; a failing mapping becomes a `Transform`
/// issue.
#[derive(Clone)]
pub struct Transform {
    inner: SchemaRef,
    map: TransformFn,
    pipeline: Pipeline,
}

impl Transform {
    pub fn new(inner: SchemaRef, map: TransformFn) -> Self {
        Transform {
            inner,
            map,
            pipeline: Pipeline::default(),
        }
    }

    stage_methods!();
}

impl Schema for Transform {
    fn kind(&self) -> Kind {
        Kind::Transform
    }

    fn safe_parse(&self, value: Value) -> Parsed {
        let value = self.pipeline.run_refines(Kind::Transform, value)?;
        let input_copy = self.pipeline.has_checks().then(|| value.clone());
        let out = self.inner.safe_parse(value)?;
        if let Some(input) = &input_copy {
            self.pipeline.run_checks(Kind::Transform, input, &out)?;
        }
        (self.map)(out).map_err(|m| {
            Issue::new(
                IssueKind::Transform {
                    source: self.inner.kind(),
                },
                m,
            )
        })
    }
}

impl std::fmt::Debug for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transform")
            .field("inner", &self.inner)
            .field("pipeline", &self.pipeline)
            .finish_non_exhaustive()
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{number, string};

    #[test]
    fn optional_intercepts_only_undefined() {
        let schema = string().optional();
        assert_eq!(schema.safe_parse(Value::Undefined), Ok(Value::Undefined));
        // null forwards to the inner schema's own null handling
        let issue = schema.safe_parse(Value::Null).unwrap_err();
        assert_eq!(issue.kind, IssueKind::Required);
        assert_eq!(schema.safe_parse(Value::from("s")), Ok(Value::from("s")));
    }

    #[test]
    fn required_message_is_configured_on_the_inner_schema() {
        // the wrappers intercept their own sentinel and never produce a
        // Required issue themselves; the override lives on the wrapped schema
        let schema = string().required("name is required").optional();
        assert_eq!(schema.safe_parse(Value::Undefined), Ok(Value::Undefined));
        let issue = schema.safe_parse(Value::Null).unwrap_err();
        assert_eq!(issue.kind, IssueKind::Required);
        assert_eq!(issue.message, "name is required");
    }

    #[test]
    fn nullable_intercepts_only_null() {
        let schema = string().nullable();
        assert_eq!(schema.safe_parse(Value::Null), Ok(Value::Null));
        let issue = schema.safe_parse(Value::Undefined).unwrap_err();
        assert_eq!(issue.kind, IssueKind::Required);
    }

    #[test]
    fn wrappers_chain_each_sentinel_handled_by_its_own_layer() {
        let schema = string().nullable().optional();
        assert_eq!(schema.safe_parse(Value::Undefined), Ok(Value::Undefined));
        assert_eq!(schema.safe_parse(Value::Null), Ok(Value::Null));
        assert!(schema.safe_parse(Value::from(1.0)).is_err());
    }

    #[test]
    fn transform_maps_output_and_reports_source() {
        let schema = number().transform(|v| match v {
            Value::Number(n) => Ok(Value::from(format!("{}", n.0))),
            other => Err(format!("cannot stringify {}", other.kind_name())),
        });
        assert_eq!(schema.safe_parse(Value::from(6.0)), Ok(Value::from("6")));

        let always_fail = number().transform(|_| Err("nope".to_string()));
        let issue = always_fail.safe_parse(Value::from(1.0)).unwrap_err();
        assert_eq!(
            issue.kind,
            IssueKind::Transform {
                source: Kind::Number
            }
        );
        assert_eq!(issue.message, "nope");
    }

    #[test]
    fn inner_failure_returned_verbatim_not_as_transform() {
        let schema = number().transform(|v| Ok(v));
        let issue = schema.safe_parse(Value::from("x")).unwrap_err();
        assert_eq!(issue.kind, IssueKind::NumberType);
    }

    #[test]
    fn transform_chain_stops_at_first_failing_link() {
        let schema = number()
            .transform(|v| match v {
                Value::Number(n) if n.0 >= 0.0 => Ok(Value::number(n.0.sqrt())),
                _ => Err("negative".to_string()),
            })
            .transform(|v| match v {
                Value::Number(n) => Ok(Value::from(format!("{}", n.0))),
                _ => Err("unreached".to_string()),
            });
        assert_eq!(schema.safe_parse(Value::from(9.0)), Ok(Value::from("3")));
        let issue = schema.safe_parse(Value::from(-1.0)).unwrap_err();
        assert_eq!(issue.message, "negative");
        assert_eq!(
            issue.kind,
            IssueKind::Transform {
                source: Kind::Number
            }
        );
    }
}
