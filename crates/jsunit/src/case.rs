//! A single registered test.

use serde::Serialize;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::{debug, warn};

use crate::assert::{Assert, AssertionRecord};

/// A test body. Returning `Err` (or panicking) ends the test with a failure record.
pub type TestBody = Box<dyn FnOnce(&mut Assert) -> anyhow::Result<()>>;

/// One registered unit test
pub struct TestCase {
    position: usize,
    title: String,
    module: String,
    body: Option<TestBody>,
    assert: Assert,
    elapsed_ms: f64,
}

impl TestCase {
    /// Create a test case. `position` is its 1-based registration index.
    pub fn new(
        position: usize,
        title: impl Into<String>,
        module: impl Into<String>,
        body: TestBody,
    ) -> Self {
        Self {
            position,
            title: title.into(),
            module: module.into(),
            body: Some(body),
            assert: Assert::new(),
            elapsed_ms: 0.0,
        }
    }

    /// 1-based registration position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Test title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Module label active when the test was registered
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Recorded outcomes, in call order
    pub fn records(&self) -> &[AssertionRecord] {
        self.assert.records()
    }

    /// Wall-clock duration of the body, in milliseconds
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub(crate) fn set_elapsed_ms(&mut self, elapsed_ms: f64) {
        self.elapsed_ms = elapsed_ms;
    }

    /// Number of comparisons that passed
    pub fn passed_count(&self) -> usize {
        self.records().iter().filter(|r| r.is_passed()).count()
    }

    /// Number of records, failures included
    pub fn total_count(&self) -> usize {
        self.records().len()
    }

    /// A test passes when every record passed. No records is a pass.
    pub fn is_passed(&self) -> bool {
        self.passed_count() == self.total_count()
    }

    /// Whether the body failed with an error or a panic
    pub fn has_failure(&self) -> bool {
        self.records().iter().any(AssertionRecord::is_failure)
    }

    /// Whether the body has already run
    pub fn is_performed(&self) -> bool {
        self.body.is_none()
    }

    /// Run the body once, converting an error or panic into a failure record.
    pub fn perform(&mut self) {
        let Some(body) = self.body.take() else {
            debug!(position = self.position, title = %self.title, "test already performed");
            return;
        };

        let assert = &mut self.assert;
        let error = match catch_unwind(AssertUnwindSafe(|| body(assert))) {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(e.to_string()),
            Err(panic) => Some(panic_message(panic.as_ref())),
        };

        if let Some(error) = error {
            warn!(position = self.position, title = %self.title, %error, "test body failed");
            self.assert.record_failure(error);
        }
    }

    /// Read-only, serialisable view for reporters
    pub fn snapshot(&self) -> CaseSnapshot {
        CaseSnapshot {
            position: self.position,
            title: self.title.clone(),
            module: self.module.clone(),
            records: self.records().to_vec(),
            elapsed_ms: self.elapsed_ms,
            passed_count: self.passed_count(),
            total_count: self.total_count(),
            passed: self.is_passed(),
        }
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("position", &self.position)
            .field("title", &self.title)
            .field("module", &self.module)
            .field("performed", &self.is_performed())
            .field("records", &self.records())
            .field("elapsed_ms", &self.elapsed_ms)
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "test panicked".to_string()
    }
}

/// Finished test case as handed to reporters
#[derive(Debug, Clone, Serialize)]
pub struct CaseSnapshot {
    /// 1-based registration position
    pub position: usize,
    /// Test title
    pub title: String,
    /// Module label
    pub module: String,
    /// Recorded outcomes
    pub records: Vec<AssertionRecord>,
    /// Elapsed time in milliseconds
    pub elapsed_ms: f64,
    /// Passed comparisons
    pub passed_count: usize,
    /// All records
    pub total_count: usize,
    /// Overall outcome
    pub passed: bool,
}
