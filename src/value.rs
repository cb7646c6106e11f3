//! Closed dynamic-value representation.
//!
//! Every structural check in the engine matches on this sum type
//! exhaustively; there is no open-ended runtime type probing. `Undefined`
//! models the absent sentinel (a missing object field), `Null` the explicit
//! one — the two are distinct so `Optional` and `Nullable` can each
//! intercept exactly their own sentinel.

use indexmap::IndexMap;
use ordered_float::OrderedFloat;

/// One untyped input (or validated output) value.
///
/// - `Number` is an `OrderedFloat<f64>` so equality is total (literal
///   membership tests need a well-defined `==`).
/// - `Object` keeps field insertion order; issue ordering in retained-mode
///   traversal depends on it.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(OrderedFloat<f64>),
    BigInt(i128),
    String(String),
    Array(Vec<Value>),
    Object(IndexMap<String, Value>),
}

impl Value {
    pub fn number(n: f64) -> Self {
        Value::Number(OrderedFloat(n))
    }

    pub fn bigint(n: i128) -> Self {
        Value::BigInt(n)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for either absence sentinel. Scalars, arrays, objects, literals
    /// and unions all report `Required` for these.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Runtime kind name for diagnostics ("expected string, got number").
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::BigInt(_) => "bigint",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.0),
            _ => None,
        }
    }
}

// ------------------------------ Conversions ------------------------------- //

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::number(n as f64)
    }
}

impl From<Vec<Value>> for Value {
    fn from(xs: Vec<Value>) -> Self {
        Value::Array(xs)
    }
}

/// Trust-boundary entry point: freshly parsed JSON in, dynamic value out.
/// serde_json is built with `preserve_order`, so object field order carries
/// through into the `IndexMap`.
impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::number(n.as_f64().unwrap_or_default()),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(xs) => {
                Value::Array(xs.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(m) => {
                let mut out = IndexMap::with_capacity(m.len());
                for (k, v) in m {
                    out.insert(k, Value::from(v));
                }
                Value::Object(out)
            }
        }
    }
}

/// Validated output back to plain JSON. `Undefined` has no JSON spelling and
/// collapses to null; a `BigInt` outside i64 range is emitted as a decimal
/// string rather than losing precision.
impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Undefined | Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(n) => json_num_pref_i64(n.0),
            Value::BigInt(n) => {
                if let Ok(i) = i64::try_from(n) {
                    serde_json::Value::from(i)
                } else {
                    serde_json::Value::from(n.to_string())
                }
            }
            Value::String(s) => serde_json::Value::String(s),
            Value::Array(xs) => {
                serde_json::Value::Array(xs.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Object(m) => {
                let mut out = serde_json::Map::with_capacity(m.len());
                for (k, v) in m {
                    out.insert(k, serde_json::Value::from(v));
                }
                serde_json::Value::Object(out)
            }
        }
    }
}

// Helper: prefer emitting integers when exact
fn json_num_pref_i64(n: f64) -> serde_json::Value {
    if n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Value::from(n)
    }
}

/// Serializes like the equivalent JSON value: `Undefined` as null, exact
/// integral numbers as integers, oversized bigints as decimal strings.
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Undefined | Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => {
                let n = n.0;
                if n.is_finite()
                    && n.fract() == 0.0
                    && n >= i64::MIN as f64
                    && n <= i64::MAX as f64
                {
                    serializer.serialize_i64(n as i64)
                } else {
                    serializer.serialize_f64(n)
                }
            }
            Value::BigInt(n) => {
                if let Ok(i) = i64::try_from(*n) {
                    serializer.serialize_i64(i)
                } else {
                    serializer.serialize_str(&n.to_string())
                }
            }
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(xs) => serializer.collect_seq(xs),
            Value::Object(m) => serializer.collect_map(m),
        }
    }
}

// ------------------------------- Display ---------------------------------- //

/// Compact, JSON-ish rendering used in issue messages (literal lists etc.).
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{}", n.0),
            Value::BigInt(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Array(xs) => {
                write!(f, "[")?;
                for (i, x) in xs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{x}")?;
                }
                write!(f, "]")
            }
            Value::Object(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k:?}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
