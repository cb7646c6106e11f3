//! Object schema.

use indexmap::IndexMap;

use crate::issue::{tag_paths, FieldIssue, Issue, IssueKind};
use crate::schema::{pipeline_methods, Kind, Mode, Parsed, Pipeline, Schema, SchemaRef};
use crate::value::Value;

/// Validates objects field-by-field, in declared field order.
///
/// - [`Mode`] governs field traversal: retained (default) aggregates every
///   failing field into one `ObjectSchema` issue, immediate stops at the
///   first.
/// - `strict()` projects the output down to the declared fields; non-strict
///   passes unknown input fields through unchanged.
/// - `pathed()` runs the path-tagging pass over any issue tree this schema
///   produces.
/// - A declared field that was absent from the input and validated to
///   `undefined` (an optional field) stays absent from the output.
#[derive(Clone, Debug, Default)]
pub struct ObjectSchema {
    fields: IndexMap<String, SchemaRef>,
    mode: Mode,
    strict: bool,
    pathed: bool,
    pipeline: Pipeline,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, SchemaRef)>,
        K: Into<String>,
    {
        ObjectSchema {
            fields: fields.into_iter().map(|(k, s)| (k.into(), s)).collect(),
            ..Self::default()
        }
    }

    /// Declare (or redeclare) one field. Insertion order is the traversal
    /// order; redeclaring keeps the original position.
    pub fn field(mut self, name: impl Into<String>, schema: impl Schema + 'static) -> Self {
        self.fields.insert(name.into(), std::sync::Arc::new(schema));
        self
    }

    /// Stop field traversal at the first failure.
    pub fn immediate(mut self) -> Self {
        self.mode = Mode::Immediate;
        self
    }

    /// Output contains only the declared fields.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Attach paths to every issue this schema produces.
    pub fn pathed(mut self) -> Self {
        self.pathed = true;
        self
    }

    /// Clone with the given fields overlaid (argument wins on collision).
    /// Mode flags and registered refine/check functions carry over to the
    /// clone; the receiver is left unmodified.
    pub fn extend<I, K>(&self, fields: I) -> ObjectSchema
    where
        I: IntoIterator<Item = (K, SchemaRef)>,
        K: Into<String>,
    {
        let mut out = self.clone();
        for (name, schema) in fields {
            out.fields.insert(name.into(), schema);
        }
        out
    }

    pipeline_methods!();
}

impl ObjectSchema {
    fn parse_inner(&self, value: Value) -> Parsed {
        let value = self.pipeline.run_refines(Kind::Object, value)?;
        if value.is_missing() {
            return Err(self.pipeline.required_issue("expected object"));
        }
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(Issue::new(
                    IssueKind::ObjectType,
                    format!("expected object, got {}", other.kind_name()),
                ));
            }
        };

        let input_copy = self
            .pipeline
            .has_checks()
            .then(|| Value::Object(map.clone()));

        // non-strict starts from the input so unknown fields pass through in
        // their original positions; declared fields overwrite in place
        let mut output: IndexMap<String, Value> = if self.strict {
            IndexMap::with_capacity(self.fields.len())
        } else {
            map.clone()
        };

        let mut entries: Vec<FieldIssue> = Vec::new();
        for (name, schema) in &self.fields {
            let present = map.contains_key(name);
            let field_value = map.get(name).cloned().unwrap_or(Value::Undefined);
            match schema.safe_parse(field_value) {
                Ok(v) => {
                    if v.is_undefined() && !present {
                        continue;
                    }
                    output.insert(name.clone(), v);
                }
                Err(issue) => {
                    entries.push(FieldIssue {
                        field: name.clone(),
                        issue,
                    });
                    if self.mode == Mode::Immediate {
                        break;
                    }
                }
            }
        }
        if !entries.is_empty() {
            return Err(Issue::new(
                IssueKind::ObjectSchema { entries },
                "invalid object",
            ));
        }

        let output = Value::Object(output);
        if let Some(input) = &input_copy {
            self.pipeline.run_checks(Kind::Object, input, &output)?;
        }
        Ok(output)
    }
}

impl Schema for ObjectSchema {
    fn kind(&self) -> Kind {
        Kind::Object
    }

    fn safe_parse(&self, value: Value) -> Parsed {
        let mut result = self.parse_inner(value);
        if self.pathed {
            if let Err(issue) = &mut result {
                tag_paths(issue);
            }
        }
        result
    }
}

// ------------------------------- Tests ------------------------------------ //
