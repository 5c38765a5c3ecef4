//! The harness: one registry, one runner, one reporter.
//!
//! Test files talk to the harness through four calls:
//!
//! ```
//! use jsunit::{Harness, CollectingReporter};
//!
//! let mut jsunit = Harness::with_reporter(CollectingReporter::new());
//! jsunit.before_each(|index| {
//!     println!("Start test #{index}");
//!     Ok(())
//! });
//! jsunit.module("Sum");
//! jsunit
//!     .test("adds", |assert| {
//!         assert.equal(2 + 2, 4, "basic");
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! assert!(jsunit.summary().all_passed());
//! ```

use crate::assert::Assert;
use crate::case::TestCase;
use crate::config::{HarnessConfig, OutputFormat};
use crate::error::HarnessResult;
use crate::registry::TestRegistry;
use crate::report::{HtmlReporter, JsonReporter, Reporter, RunSummary, TextReporter};
use crate::runner::TestRunner;
use crate::value::Value;

/// Owns the registered tests, the lifecycle hooks and the reporter
pub struct Harness {
    registry: TestRegistry,
    runner: TestRunner,
}

impl Harness {
    /// Create a harness from `config`, reporting to `reporter`
    pub fn new(config: &HarnessConfig, reporter: impl Reporter + 'static) -> Self {
        Self {
            registry: TestRegistry::new(config.default_module.clone()),
            runner: TestRunner::new(Box::new(reporter)).with_precision(config.elapsed_precision),
        }
    }

    /// Create a harness with default configuration
    pub fn with_reporter(reporter: impl Reporter + 'static) -> Self {
        Self::new(&HarnessConfig::default(), reporter)
    }

    /// Create a harness printing to stdout in the configured format
    pub fn stdout(config: &HarnessConfig) -> Self {
        match config.format {
            OutputFormat::Text => Self::new(
                config,
                TextReporter::stdout()
                    .with_color(config.color)
                    .with_verbose(config.verbose),
            ),
            OutputFormat::Json => Self::new(config, JsonReporter::stdout()),
            OutputFormat::Html => Self::new(
                config,
                HtmlReporter::stdout().with_root_id(config.root_id.clone()),
            ),
        }
    }

    /// Register a test and run it immediately. Returns its 1-based position.
    pub fn test<F>(&mut self, title: impl Into<String>, body: F) -> HarnessResult<usize>
    where
        F: FnOnce(&mut Assert) -> anyhow::Result<()> + 'static,
    {
        let position = self.registry.add_test(title, body);
        self.runner.run_test(&mut self.registry, position)?;
        Ok(position)
    }

    /// Register a test without running it; see [`Harness::run_all_tests`].
    pub fn add_test<F>(&mut self, title: impl Into<String>, body: F) -> usize
    where
        F: FnOnce(&mut Assert) -> anyhow::Result<()> + 'static,
    {
        self.registry.add_test(title, body)
    }

    /// Run every registered test that has not run yet.
    pub fn run_all_tests(&mut self) -> HarnessResult<()> {
        self.runner.run_all_tests(&mut self.registry)
    }

    /// Set the hook called before each test with its 1-based position.
    pub fn before_each<F>(&mut self, hook: F)
    where
        F: FnMut(usize) -> anyhow::Result<()> + 'static,
    {
        self.runner.set_before_each(Some(Box::new(hook)));
    }

    /// Set the hook called after each test with its 1-based position.
    pub fn after_each<F>(&mut self, hook: F)
    where
        F: FnMut(usize) -> anyhow::Result<()> + 'static,
    {
        self.runner.set_after_each(Some(Box::new(hook)));
    }

    /// Remove the before-each hook
    pub fn clear_before_each(&mut self) {
        self.runner.set_before_each(None);
    }

    /// Remove the after-each hook
    pub fn clear_after_each(&mut self) {
        self.runner.set_after_each(None);
    }

    /// Set the module label for tests registered from now on.
    ///
    /// Anything other than a non-empty string is ignored.
    pub fn module(&mut self, label: impl Into<Value>) {
        self.registry.set_module(label);
    }

    /// Module label applied to new registrations
    pub fn current_module(&self) -> &str {
        self.registry.current_module()
    }

    /// All tests in registration order
    pub fn cases(&self) -> &[TestCase] {
        self.registry.cases()
    }

    /// Test at a 1-based position
    pub fn case(&self, position: usize) -> Option<&TestCase> {
        self.registry.get(position)
    }

    /// Summary of the tests that have run so far
    pub fn summary(&self) -> RunSummary {
        RunSummary::from_cases(self.registry.cases())
    }

    /// Hand the summary to the reporter and return it.
    pub fn finish(&mut self) -> HarnessResult<RunSummary> {
        let summary = self.summary();
        self.runner.reporter_mut().finish(&summary)?;
        Ok(summary)
    }
}
