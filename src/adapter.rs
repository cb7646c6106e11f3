//! Third-party "standard schema" protocol adapter.
//!
//! Glue over [`Schema::safe_parse`]: a `{version, vendor, validate}`
//! descriptor whose `validate` maps `Ok` to `{"value": ..}` and `Err` to
//! `{"issues": [..]}`. No behavior beyond the `safe_parse` contract.

use serde::Serialize;

use crate::issue::Issue;
use crate::schema::{Schema, SchemaRef};
use crate::value::Value;

pub const STANDARD_VERSION: u32 = 1;
pub const VENDOR: &str = "json-vet";

/// Protocol-shaped validation outcome.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StandardResult {
    Value { value: Value },
    Issues { issues: Vec<Issue> },
}

/// Per-schema protocol descriptor.
#[derive(Clone, Debug)]
pub struct StandardSchema {
    pub version: u32,
    pub vendor: &'static str,
    schema: SchemaRef,
}

impl StandardSchema {
    pub fn new(schema: SchemaRef) -> Self {
        StandardSchema {
            version: STANDARD_VERSION,
            vendor: VENDOR,
            schema,
        }
    }

    pub fn validate(&self, value: Value) -> StandardResult {
        match self.schema.safe_parse(value) {
            Ok(value) => StandardResult::Value { value },
            Err(issue) => StandardResult::Issues {
                issues: vec![issue],
            },
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
