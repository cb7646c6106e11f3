//! Number and bigint schemas.

use crate::issue::{Issue, IssueKind};
use crate::schema::{pipeline_methods, Kind, Limit, Parsed, Pipeline, Schema};
use crate::value::Value;

/// Validates f64 numbers. Constraint order is fixed: integer-check, then
/// min, then max; the first violated constraint wins. A bigint input is a
/// type mismatch, not a number.
#[derive(Clone, Debug, Default)]
pub struct NumberSchema {
    int: Option<Limit<()>>,
    min: Option<Limit<f64>>,
    max: Option<Limit<f64>>,
    pipeline: Pipeline,
}

impl NumberSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require an integral value: finite and `fract() == 0.0`.
    pub fn int(mut self) -> Self {
        self.int = Some(Limit::new(()));
        self
    }

    pub fn int_with(mut self, message: impl Into<String>) -> Self {
        self.int = Some(Limit::with((), message));
        self
    }

    pub fn min(mut self, n: f64) -> Self {
        self.min = Some(Limit::new(n));
        self
    }

    pub fn min_with(mut self, n: f64, message: impl Into<String>) -> Self {
        self.min = Some(Limit::with(n, message));
        self
    }

    pub fn max(mut self, n: f64) -> Self {
        self.max = Some(Limit::new(n));
        self
    }

    pub fn max_with(mut self, n: f64, message: impl Into<String>) -> Self {
        self.max = Some(Limit::with(n, message));
        self
    }

    pipeline_methods!();
}

impl Schema for NumberSchema {
    fn kind(&self) -> Kind {
        Kind::Number
    }

    fn safe_parse(&self, value: Value) -> Parsed {
        let value = self.pipeline.run_refines(Kind::Number, value)?;
        if value.is_missing() {
            return Err(self.pipeline.required_issue("expected number"));
        }
        let Value::Number(n) = &value else {
            return Err(Issue::new(
                IssueKind::NumberType,
                format!("expected number, got {}", value.kind_name()),
            ));
        };
        let n = n.0;
        if let Some(int) = &self.int {
            if !(n.is_finite() && n.fract() == 0.0) {
                return Err(Issue::new(
                    IssueKind::NumberType,
                    int.message_or(format!("expected integer, got {n}")),
                ));
            }
        }
        if let Some(min) = &self.min {
            if n < min.value {
                return Err(Issue::new(
                    IssueKind::NumberType,
                    min.message_or(format!("number below minimum {}", min.value)),
                ));
            }
        }
        if let Some(max) = &self.max {
            if n > max.value {
                return Err(Issue::new(
                    IssueKind::NumberType,
                    max.message_or(format!("number above maximum {}", max.value)),
                ));
            }
        }
        self.pipeline.run_checks(Kind::Number, &value, &value)?;
        Ok(value)
    }
}

/// Validates i128 bigints. Constraint order: min then max.
#[derive(Clone, Debug, Default)]
pub struct BigIntSchema {
    min: Option<Limit<i128>>,
    max: Option<Limit<i128>>,
    pipeline: Pipeline,
}

impl BigIntSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, n: i128) -> Self {
        self.min = Some(Limit::new(n));
        self
    }

    pub fn min_with(mut self, n: i128, message: impl Into<String>) -> Self {
        self.min = Some(Limit::with(n, message));
        self
    }

    pub fn max(mut self, n: i128) -> Self {
        self.max = Some(Limit::new(n));
        self
    }

    pub fn max_with(mut self, n: i128, message: impl Into<String>) -> Self {
        self.max = Some(Limit::with(n, message));
        self
    }

    pipeline_methods!();
}

impl Schema for BigIntSchema {
    fn kind(&self) -> Kind {
        Kind::BigInt
    }

    fn safe_parse(&self, value: Value) -> Parsed {
        let value = self.pipeline.run_refines(Kind::BigInt, value)?;
        if value.is_missing() {
            return Err(self.pipeline.required_issue("expected bigint"));
        }
        let Value::BigInt(n) = &value else {
            return Err(Issue::new(
                IssueKind::BigIntType,
                format!("expected bigint, got {}", value.kind_name()),
            ));
        };
        let n = *n;
        if let Some(min) = &self.min {
            if n < min.value {
                return Err(Issue::new(
                    IssueKind::BigIntType,
                    min.message_or(format!("bigint below minimum {}", min.value)),
                ));
            }
        }
        if let Some(max) = &self.max {
            if n > max.value {
                return Err(Issue::new(
                    IssueKind::BigIntType,
                    max.message_or(format!("bigint above maximum {}", max.value)),
                ));
            }
        }
        self.pipeline.run_checks(Kind::BigInt, &value, &value)?;
        Ok(value)
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_coercion_of_valid_input() {
        let schema = NumberSchema::new().min(0.0).max(10.0);
        assert_eq!(schema.safe_parse(Value::from(4.5)), Ok(Value::from(4.5)));
    }

    #[test]
    fn int_checked_before_bounds() {
        let schema = NumberSchema::new().int_with("whole numbers only").min(10.0);
        // 3.5 violates both; the integer check must win
        assert_eq!(
            schema.safe_parse(Value::from(3.5)).unwrap_err().message,
            "whole numbers only"
        );
        // 3.0 passes int, fails min
        assert_eq!(
            schema.safe_parse(Value::from(3.0)).unwrap_err().message,
            "number below minimum 10"
        );
    }

    #[test]
    fn bigint_is_not_a_number() {
        let issue = NumberSchema::new()
            .safe_parse(Value::bigint(5))
            .unwrap_err();
        assert_eq!(issue.kind, IssueKind::NumberType);
        assert_eq!(issue.message, "expected number, got bigint");
    }

    #[test]
    fn number_is_not_a_bigint() {
        let issue = BigIntSchema::new().safe_parse(Value::from(5.0)).unwrap_err();
        assert_eq!(issue.kind, IssueKind::BigIntType);
    }

    #[test]
    fn bigint_min_checked_before_max() {
        let schema = BigIntSchema::new().min_with(0, "negative").max(10);
        assert_eq!(
            schema.safe_parse(Value::bigint(-3)).unwrap_err().message,
            "negative"
        );
        assert_eq!(
            schema.safe_parse(Value::bigint(99)).unwrap_err().message,
            "bigint above maximum 10"
        );
        assert_eq!(schema.safe_parse(Value::bigint(7)), Ok(Value::bigint(7)));
    }

    #[test]
    fn non_finite_fails_int() {
        let schema = NumberSchema::new().int();
        assert!(schema.safe_parse(Value::number(f64::INFINITY)).is_err());
        assert!(schema.safe_parse(Value::number(f64::NAN)).is_err());
    }
}
