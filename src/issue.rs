//! Validation issue taxonomy.
//!
//! A failed parse produces one `Issue`. Leaf kinds are terminal; the two
//! aggregate kinds (`ArraySchema`, `ObjectSchema`) carry ordered child
//! entries and form a tree mirroring the shape of the input that failed.
//! The whole tree serializes to JSON for structured reporting.

use serde::Serialize;

use crate::schema::Kind;

/// One step of a path locating an issue inside a nested input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathKey {
    Field(String),
    Index(usize),
}

/// A failed array element: which index, and why.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IndexedIssue {
    pub index: usize,
    pub issue: Issue,
}

/// A failed object field: which field, and why.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub issue: Issue,
}

/// Closed set of failure kinds. `Check`/`Refine`/`Transform` record the kind
/// of the schema stage that raised them; the aggregates carry their child
/// entries (non-empty by construction — an aggregate only exists when at
/// least one element/field failed).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum IssueKind {
    Required,
    StringType,
    NumberType,
    BigIntType,
    BooleanType,
    ArrayType,
    ObjectType,
    Literal,
    Union,
    Check { source: Kind },
    Refine { source: Kind },
    Transform { source: Kind },
    ArraySchema { entries: Vec<IndexedIssue> },
    ObjectSchema { entries: Vec<FieldIssue> },
}

/// A structured validation failure. `path` stays `None` unless an owning
/// object schema enabled path tagging.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Issue {
    #[serde(flatten)]
    pub kind: IssueKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathKey>>,
}

impl Issue {
    pub(crate) fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Issue {
            kind,
            message: message.into(),
            path: None,
        }
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(
            self.kind,
            IssueKind::ArraySchema { .. } | IssueKind::ObjectSchema { .. }
        )
    }

    /// Number of direct child entries (0 for leaves).
    pub fn child_count(&self) -> usize {
        match &self.kind {
            IssueKind::ArraySchema { entries } => entries.len(),
            IssueKind::ObjectSchema { entries } => entries.len(),
            _ => 0,
        }
    }
}

// ----------------------------- Path tagging -------------------------------- //

/// Attach a `path` to every issue in a just-built tree.
///
/// One depth-first pass over the owned tree: each node receives the parent
/// path concatenated with its local field/index key; the root receives the
/// empty path. Runs after the tree is fully constructed, so arbitrary
/// Object/Array nesting falls out of the recursion.
pub fn tag_paths(issue: &mut Issue) {
    tag_at(issue, &[]);
}

fn tag_at(issue: &mut Issue, prefix: &[PathKey]) {
    issue.path = Some(prefix.to_vec());
    match &mut issue.kind {
        IssueKind::ArraySchema { entries } => {
            for entry in entries {
                let mut p = prefix.to_vec();
                p.push(PathKey::Index(entry.index));
                tag_at(&mut entry.issue, &p);
            }
        }
        IssueKind::ObjectSchema { entries } => {
            for entry in entries {
                let mut p = prefix.to_vec();
                p.push(PathKey::Field(entry.field.clone()));
                tag_at(&mut entry.issue, &p);
            }
        }
        _ => {}
    }
}

// ------------------------------- Display ---------------------------------- //

/// Compact single-line rendering: leaves print their message, aggregates
/// print the message followed by `key: sub` entries.
impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            IssueKind::ArraySchema { entries } => {
                write!(f, "{} (", self.message)?;
                for (i, e) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "[{}]: {}", e.index, e.issue)?;
                }
                write!(f, ")")
            }
            IssueKind::ObjectSchema { entries } => {
                write!(f, "{} (", self.message)?;
                for (i, e) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}: {}", e.field, e.issue)?;
                }
                write!(f, ")")
            }
            _ => write!(f, "{}", self.message),
        }
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Issue {
        Issue::new(
            IssueKind::ObjectSchema {
                entries: vec![
                    FieldIssue {
                        field: "name".into(),
                        issue: Issue::new(IssueKind::StringType, "expected string"),
                    },
                    FieldIssue {
                        field: "traits".into(),
                        issue: Issue::new(
                            IssueKind::ObjectSchema {
                                entries: vec![FieldIssue {
                                    field: "height".into(),
                                    issue: Issue::new(IssueKind::Required, "h"),
                                }],
                            },
                            "invalid object",
                        ),
                    },
                ],
            },
            "invalid object",
        )
    }

    #[test]
    fn tag_paths_concatenates_per_level() {
        let mut issue = sample_tree();
        tag_paths(&mut issue);
        assert_eq!(issue.path.as_deref(), Some(&[][..]));

        let IssueKind::ObjectSchema { entries } = &issue.kind else {
            panic!("expected aggregate");
        };
        assert_eq!(
            entries[0].issue.path.as_deref(),
            Some(&[PathKey::Field("name".into())][..])
        );
        assert_eq!(
            entries[1].issue.path.as_deref(),
            Some(&[PathKey::Field("traits".into())][..])
        );
        let IssueKind::ObjectSchema { entries: inner } = &entries[1].issue.kind else {
            panic!("expected nested aggregate");
        };
        assert_eq!(
            inner[0].issue.path.as_deref(),
            Some(&[PathKey::Field("traits".into()), PathKey::Field("height".into())][..])
        );
    }

    #[test]
    fn display_renders_nested_entries() {
        let issue = sample_tree();
        assert_eq!(
            issue.to_string(),
            "invalid object (name: expected string; traits: invalid object (height: h))"
        );
    }

    #[test]
    fn serializes_with_flat_kind_tag() {
        let issue = Issue::new(IssueKind::Required, "required");
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["kind"], "Required");
        assert_eq!(json["message"], "required");
        assert!(json.get("path").is_none());
    }

    #[test]
    fn path_keys_serialize_untagged() {
        let path = vec![PathKey::Field("traits".into()), PathKey::Index(2)];
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json, serde_json::json!(["traits", 2]));
    }
}
