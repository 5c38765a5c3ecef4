//! Test result reporting

mod html;
mod json;
mod text;

pub use html::{HtmlReporter, ROOT_ID};
pub use json::JsonReporter;
pub use text::TextReporter;

use serde::Serialize;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use crate::case::{CaseSnapshot, TestCase};
use crate::runner::{MAX_ELAPSED_PRECISION, round_number};

/// Receives every finished test case.
///
/// Reporters only render; nothing in the harness depends on what they do.
pub trait Reporter {
    /// Called once per test, right after its body ran
    fn report(&mut self, case: &TestCase) -> io::Result<()>;

    /// Called once at the end of a run
    fn finish(&mut self, _summary: &RunSummary) -> io::Result<()> {
        Ok(())
    }
}

/// A shared reporter, so the caller can keep a handle to it
impl<R: Reporter> Reporter for Rc<RefCell<R>> {
    fn report(&mut self, case: &TestCase) -> io::Result<()> {
        self.borrow_mut().report(case)
    }

    fn finish(&mut self, summary: &RunSummary) -> io::Result<()> {
        self.borrow_mut().finish(summary)
    }
}

/// Keeps snapshots of reported cases in memory
#[derive(Debug, Default)]
pub struct CollectingReporter {
    cases: Vec<CaseSnapshot>,
    summary: Option<RunSummary>,
}

impl CollectingReporter {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots in reporting order
    pub fn cases(&self) -> &[CaseSnapshot] {
        &self.cases
    }

    /// Summary passed to `finish`, if it was called
    pub fn summary(&self) -> Option<&RunSummary> {
        self.summary.as_ref()
    }
}

impl Reporter for CollectingReporter {
    fn report(&mut self, case: &TestCase) -> io::Result<()> {
        self.cases.push(case.snapshot());
        Ok(())
    }

    fn finish(&mut self, summary: &RunSummary) -> io::Result<()> {
        self.summary = Some(summary.clone());
        Ok(())
    }
}

/// Aggregate over a run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    /// Number of tests that ran
    pub total: usize,
    /// Number of passed tests
    pub passed: usize,
    /// Number of failed tests
    pub failed: usize,
    /// Number of tests whose body errored or panicked
    pub errored: usize,
    /// Number of assertion records
    pub assertions: usize,
    /// Number of passed assertions
    pub passed_assertions: usize,
    /// Pass rate as percentage
    pub pass_rate: f64,
    /// Sum of elapsed times, in milliseconds
    pub elapsed_ms: f64,
    /// Results by module, in order of first appearance
    pub modules: Vec<ModuleReport>,
}

/// Per-module report
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModuleReport {
    /// Module label
    pub name: String,
    /// Tests in this module
    pub total: usize,
    /// Passed tests
    pub passed: usize,
    /// Failed tests
    pub failed: usize,
}

impl RunSummary {
    /// Summarise the cases that have run; cases not yet run are left out.
    pub fn from_cases<'a>(cases: impl IntoIterator<Item = &'a TestCase>) -> Self {
        let mut summary = Self::default();
        let mut elapsed_ms = 0.0;

        for case in cases.into_iter().filter(|c| c.is_performed()) {
            let passed = case.is_passed();
            summary.total += 1;
            if passed {
                summary.passed += 1;
            } else {
                summary.failed += 1;
            }
            if case.has_failure() {
                summary.errored += 1;
            }
            summary.assertions += case.total_count();
            summary.passed_assertions += case.passed_count();
            elapsed_ms += case.elapsed_ms();

            // Track by module
            let module = match summary.modules.iter().position(|m| m.name == case.module()) {
                Some(i) => &mut summary.modules[i],
                None => {
                    summary.modules.push(ModuleReport {
                        name: case.module().to_string(),
                        ..Default::default()
                    });
                    let last = summary.modules.len() - 1;
                    &mut summary.modules[last]
                }
            };
            module.total += 1;
            if passed {
                module.passed += 1;
            } else {
                module.failed += 1;
            }
        }

        // Sum of rounded values: only float noise needs removing
        summary.elapsed_ms = round_number(elapsed_ms, MAX_ELAPSED_PRECISION);
        if summary.total > 0 {
            summary.pass_rate = (summary.passed as f64 / summary.total as f64) * 100.0;
        }

        summary
    }

    /// True when no test failed
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}
