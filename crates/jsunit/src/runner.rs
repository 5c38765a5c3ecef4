//! Test execution: hooks, timing and reporting around a single test body.

use std::time::Instant;
use tracing::{debug, info};

use crate::case::TestCase;
use crate::error::{HarnessError, HarnessResult, HookPhase};
use crate::registry::TestRegistry;
use crate::report::Reporter;

/// The number of decimals kept in elapsed times.
pub const ELAPSED_TIME_PRECISION: u32 = 3;

/// Upper bound for the configured precision.
pub const MAX_ELAPSED_PRECISION: u32 = 9;

/// A lifecycle hook, called with the 1-based position of the test.
pub type Hook = Box<dyn FnMut(usize) -> anyhow::Result<()>>;

/// Runs registered tests and hands each finished one to the reporter
pub struct TestRunner {
    before_each: Option<Hook>,
    after_each: Option<Hook>,
    reporter: Box<dyn Reporter>,
    precision: u32,
}

impl TestRunner {
    /// Create a runner reporting to `reporter`
    pub fn new(reporter: Box<dyn Reporter>) -> Self {
        Self {
            before_each: None,
            after_each: None,
            reporter,
            precision: ELAPSED_TIME_PRECISION,
        }
    }

    /// Set the number of decimals kept in elapsed times
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Replace the before-each hook; `None` disables it.
    pub fn set_before_each(&mut self, hook: Option<Hook>) {
        self.before_each = hook;
    }

    /// Replace the after-each hook; `None` disables it.
    pub fn set_after_each(&mut self, hook: Option<Hook>) {
        self.after_each = hook;
    }

    /// The reporter finished cases are handed to
    pub fn reporter_mut(&mut self) -> &mut dyn Reporter {
        self.reporter.as_mut()
    }

    /// Run the test at `position`. A test that already ran is left untouched.
    ///
    /// Failures inside the body are recorded on the case. Hook and reporter
    /// errors are returned and abort the run.
    pub fn run_test(
        &mut self,
        registry: &mut TestRegistry,
        position: usize,
    ) -> HarnessResult<()> {
        let case = registry
            .get_mut(position)
            .ok_or(HarnessError::UnknownTest(position))?;
        if case.is_performed() {
            debug!(position, "skipping test that already ran");
            return Ok(());
        }

        run_hook(self.before_each.as_mut(), HookPhase::BeforeEach, position)?;

        let start = Instant::now();
        case.perform();
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        case.set_elapsed_ms(round_number(elapsed_ms, self.precision));

        log_finished(case);
        self.reporter.report(case)?;

        run_hook(self.after_each.as_mut(), HookPhase::AfterEach, position)
    }

    /// Run every test that has not run yet, in registration order.
    pub fn run_all_tests(&mut self, registry: &mut TestRegistry) -> HarnessResult<()> {
        for position in 1..=registry.len() {
            self.run_test(registry, position)?;
        }
        Ok(())
    }
}

fn run_hook(hook: Option<&mut Hook>, phase: HookPhase, position: usize) -> HarnessResult<()> {
    let Some(hook) = hook else {
        return Ok(());
    };
    hook(position).map_err(|source| HarnessError::Hook {
        phase,
        position,
        source,
    })
}

fn log_finished(case: &TestCase) {
    info!(
        position = case.position(),
        title = case.title(),
        module = case.module(),
        passed = case.passed_count(),
        total = case.total_count(),
        elapsed_ms = case.elapsed_ms(),
        "test finished"
    );
}

/// Round `num` to `decimals` places after the point.
pub fn round_number(num: f64, decimals: u32) -> f64 {
    let precision = 10f64.powi(decimals as i32);
    (num * precision).round() / precision
}
