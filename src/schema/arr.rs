//! Array schema.

use crate::issue::{IndexedIssue, Issue, IssueKind};
use crate::schema::{pipeline_methods, Kind, Limit, Mode, Parsed, Pipeline, Schema, SchemaRef};
use crate::value::Value;

/// Validates arrays against a single element schema.
///
/// Length bounds are checked max-first, then min. Element traversal honors
/// the configured [`Mode`]: retained (default) visits every element and
/// aggregates all failures into one `ArraySchema` issue; immediate stops at
/// the first failing index.
#[derive(Clone, Debug)]
pub struct ArraySchema {
    item: SchemaRef,
    min: Option<Limit<usize>>,
    max: Option<Limit<usize>>,
    mode: Mode,
    pipeline: Pipeline,
}

impl ArraySchema {
    pub fn new(item: SchemaRef) -> Self {
        ArraySchema {
            item,
            min: None,
            max: None,
            mode: Mode::default(),
            pipeline: Pipeline::default(),
        }
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

    /// Stop element traversal at the first failure.
    pub fn immediate(mut self) -> Self {
        self.mode = Mode::Immediate;
        self
    }

    pipeline_methods!();
}

impl Schema for ArraySchema {
    fn kind(&self) -> Kind {
        Kind::Array
    }

    fn safe_parse(&self, value: Value) -> Parsed {
        let value = self.pipeline.run_refines(Kind::Array, value)?;
        if value.is_missing() {
            return Err(self.pipeline.required_issue("expected array"));
        }
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(Issue::new(
                    IssueKind::ArrayType,
                    format!("expected array, got {}", other.kind_name()),
                ));
            }
        };
        // length bounds: max first, then min
        if let Some(max) = &self.max {
            if items.len() > max.value {
                return Err(Issue::new(
                    IssueKind::ArrayType,
                    max.message_or(format!("array longer than {} items", max.value)),
                ));
            }
        }
        if let Some(min) = &self.min {
            if items.len() < min.value {
                return Err(Issue::new(
                    IssueKind::ArrayType,
                    min.message_or(format!("array shorter than {} items", min.value)),
                ));
            }
        }

        // snapshot only when a check will want the pre-traversal input
        let input_copy = self
            .pipeline
            .has_checks()
            .then(|| Value::Array(items.clone()));

        let mut out = Vec::with_capacity(items.len());
        let mut entries: Vec<IndexedIssue> = Vec::new();
        for (index, item) in items.into_iter().enumerate() {
            match self.item.safe_parse(item) {
                Ok(v) => out.push(v),
                Err(issue) => {
                    entries.push(IndexedIssue { index, issue });
                    if self.mode == Mode::Immediate {
                        break;
                    }
                }
            }
        }
        if !entries.is_empty() {
            return Err(Issue::new(
                IssueKind::ArraySchema { entries },
                "invalid array",
            ));
        }

        let output = Value::Array(out);
        if let Some(input) = &input_copy {
            self.pipeline.run_checks(Kind::Array, input, &output)?;
        }
        Ok(output)
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{number, string};

    fn numbers() -> ArraySchema {
        ArraySchema::new(number().seal())
    }

    fn from_json(v: serde_json::Value) -> Value {
        Value::from(v)
    }

    #[test]
    fn retained_mode_collects_every_failure() {
        let schema = numbers();
        let issue = schema
            .safe_parse(from_json(serde_json::json!([1, "a", 2, "b", "c"])))
            .unwrap_err();
        let IssueKind::ArraySchema { entries } = &issue.kind else {
            panic!("expected aggregate, got {issue:?}");
        };
        let indices: Vec<usize> = entries.iter().map(|e| e.index).collect();
        assert_eq!(indices, [1, 3, 4]);
    }

    #[test]
    fn immediate_mode_keeps_only_the_first_failure() {
        let schema = numbers().immediate();
        let issue = schema
            .safe_parse(from_json(serde_json::json!([1, "a", 2, "b"])))
            .unwrap_err();
        let IssueKind::ArraySchema { entries } = &issue.kind else {
            panic!("expected aggregate");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].index, 1);
    }

    #[test]
    fn max_checked_before_min() {
        // min > max is a misconfiguration, but ordering must still hold
        let schema = numbers().min_with(5, "short").max_with(2, "long");
        assert_eq!(
            schema
                .safe_parse(from_json(serde_json::json!([1, 2, 3])))
                .unwrap_err()
                .message,
            "long"
        );
        assert_eq!(
            schema
                .safe_parse(from_json(serde_json::json!([1])))
                .unwrap_err()
                .message,
            "short"
        );
    }

    #[test]
    fn non_array_reports_array_type() {
        let issue = numbers().safe_parse(Value::from("nope")).unwrap_err();
        assert_eq!(issue.kind, IssueKind::ArrayType);
        let issue = numbers().safe_parse(Value::Null).unwrap_err();
        assert_eq!(issue.kind, IssueKind::Required);
    }

    #[test]
    fn nested_arrays_aggregate_recursively() {
        let schema = ArraySchema::new(ArraySchema::new(string().seal()).seal());
        let issue = schema
            .safe_parse(from_json(serde_json::json!([["ok"], [1, "ok", 2]])))
            .unwrap_err();
        let IssueKind::ArraySchema { entries } = &issue.kind else {
            panic!("expected aggregate");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].index, 1);
        assert_eq!(entries[0].issue.child_count(), 2);
    }

    #[test]
    fn checks_see_input_and_output() {
        let schema = numbers().check(|ctx| {
            let (Value::Array(input), Value::Array(output)) = (ctx.input, ctx.output) else {
                return Err("not arrays".to_string());
            };
            if input.len() == output.len() {
                Ok(())
            } else {
                Err("length changed".to_string())
            }
        });
        assert!(schema
            .safe_parse(from_json(serde_json::json!([1, 2])))
            .is_ok());
    }
}
