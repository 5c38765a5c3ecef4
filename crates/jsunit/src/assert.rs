//! Assertion recorder handed to every test body.
//!
//! Each method appends exactly one [`AssertionRecord`] and never fails, so a
//! failed comparison does not stop the body.

use serde::{Serialize, Serializer};
use std::fmt;
use tracing::trace;

use crate::value::Value;

/// What an assertion checked the actual value against
#[derive(Debug, Clone, PartialEq)]
pub enum Expectation {
    /// The actual value was expected to match this value
    Exactly(Value),
    /// The actual value was expected NOT to match this value
    Not(Value),
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Exactly(v) => write!(f, "{}", v),
            Expectation::Not(v) => write!(f, "NOT {}", v),
        }
    }
}

impl Serialize for Expectation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Expectation::Exactly(v) => v.serialize(serializer),
            Expectation::Not(_) => serializer.collect_str(self),
        }
    }
}

/// Outcome of one assertion call, or of a failed test body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssertionRecord {
    /// A normal comparison
    Comparison {
        /// What the actual value was checked against
        expected: Expectation,
        /// The value supplied by the test author
        actual: Value,
        /// Outcome of the comparison
        passed: bool,
        /// Optional label
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// The test body failed; no comparison took place
    Failure {
        /// The failure's message
        error: String,
    },
}

impl AssertionRecord {
    /// True for a comparison that passed
    pub fn is_passed(&self) -> bool {
        matches!(self, AssertionRecord::Comparison { passed: true, .. })
    }

    /// True for a failure record
    pub fn is_failure(&self) -> bool {
        matches!(self, AssertionRecord::Failure { .. })
    }

    /// The assertion label, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            AssertionRecord::Comparison { message, .. } => message.as_deref(),
            AssertionRecord::Failure { .. } => None,
        }
    }
}

/// Records the assertions made by a single test body.
#[derive(Debug, Default)]
pub struct Assert {
    records: Vec<AssertionRecord>,
}

impl Assert {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded outcomes, in call order
    pub fn records(&self) -> &[AssertionRecord] {
        &self.records
    }

    /// Checks that `actual` is truthy.
    pub fn ok<'m>(&mut self, actual: impl Into<Value>, message: impl Into<Option<&'m str>>) {
        let actual = actual.into();
        let passed = actual.to_boolean();
        self.compare(Expectation::Exactly(Value::Boolean(true)), actual, passed, message);
    }

    /// Checks that `actual` is falsy.
    pub fn not_ok<'m>(&mut self, actual: impl Into<Value>, message: impl Into<Option<&'m str>>) {
        let actual = actual.into();
        let passed = !actual.to_boolean();
        self.compare(Expectation::Exactly(Value::Boolean(false)), actual, passed, message);
    }

    /// Checks that `actual` is the boolean `true` itself.
    pub fn is_true<'m>(&mut self, actual: impl Into<Value>, message: impl Into<Option<&'m str>>) {
        let actual = actual.into();
        let passed = actual == Value::Boolean(true);
        self.compare(Expectation::Exactly(Value::Boolean(true)), actual, passed, message);
    }

    /// Checks that `actual` is the boolean `false` itself.
    pub fn is_false<'m>(&mut self, actual: impl Into<Value>, message: impl Into<Option<&'m str>>) {
        let actual = actual.into();
        let passed = actual == Value::Boolean(false);
        self.compare(Expectation::Exactly(Value::Boolean(false)), actual, passed, message);
    }

    /// Checks `actual == expected` with coercion.
    pub fn equal<'m>(
        &mut self,
        actual: impl Into<Value>,
        expected: impl Into<Value>,
        message: impl Into<Option<&'m str>>,
    ) {
        let (actual, expected) = (actual.into(), expected.into());
        let passed = actual.loosely_equals(&expected);
        self.compare(Expectation::Exactly(expected), actual, passed, message);
    }

    /// Checks `actual != expected` with coercion.
    pub fn not_equal<'m>(
        &mut self,
        actual: impl Into<Value>,
        expected: impl Into<Value>,
        message: impl Into<Option<&'m str>>,
    ) {
        let (actual, expected) = (actual.into(), expected.into());
        let passed = !actual.loosely_equals(&expected);
        self.compare(Expectation::Not(expected), actual, passed, message);
    }

    /// Checks `actual === expected`.
    pub fn strict_equal<'m>(
        &mut self,
        actual: impl Into<Value>,
        expected: impl Into<Value>,
        message: impl Into<Option<&'m str>>,
    ) {
        let (actual, expected) = (actual.into(), expected.into());
        let passed = actual.strictly_equals(&expected);
        self.compare(Expectation::Exactly(expected), actual, passed, message);
    }

    /// Checks `actual !== expected`.
    pub fn not_strict_equal<'m>(
        &mut self,
        actual: impl Into<Value>,
        expected: impl Into<Value>,
        message: impl Into<Option<&'m str>>,
    ) {
        let (actual, expected) = (actual.into(), expected.into());
        let passed = !actual.strictly_equals(&expected);
        self.compare(Expectation::Not(expected), actual, passed, message);
    }

    /// Checks that `actual` coerces to NaN.
    pub fn is_nan<'m>(&mut self, actual: impl Into<Value>, message: impl Into<Option<&'m str>>) {
        let actual = actual.into();
        let passed = actual.coerces_to_nan();
        self.compare(Expectation::Exactly(Value::NAN), actual, passed, message);
    }

    /// Checks that `actual` does not coerce to NaN.
    pub fn is_not_nan<'m>(
        &mut self,
        actual: impl Into<Value>,
        message: impl Into<Option<&'m str>>,
    ) {
        let actual = actual.into();
        let passed = !actual.coerces_to_nan();
        self.compare(Expectation::Not(Value::NAN), actual, passed, message);
    }

    fn compare<'m>(
        &mut self,
        expected: Expectation,
        actual: Value,
        passed: bool,
        message: impl Into<Option<&'m str>>,
    ) {
        let message = message.into().map(str::to_string);
        trace!(%expected, %actual, passed, ?message, "assertion");
        self.records.push(AssertionRecord::Comparison {
            expected,
            actual,
            passed,
            message,
        });
    }

    pub(crate) fn record_failure(&mut self, error: String) {
        self.records.push(AssertionRecord::Failure { error });
    }
}
