//! Ordered, append-only list of registered tests.

use tracing::debug;

use crate::assert::Assert;
use crate::case::TestCase;
use crate::value::Value;

/// The default module name.
pub const DEFAULT_MODULE: &str = "Common";

/// Registered tests plus the module label applied to new registrations
#[derive(Debug)]
pub struct TestRegistry {
    cases: Vec<TestCase>,
    current_module: String,
}

impl Default for TestRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_MODULE)
    }
}

impl TestRegistry {
    /// Create an empty registry starting in `module`
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            cases: Vec::new(),
            current_module: module.into(),
        }
    }

    /// Register a test under the current module and return its 1-based position.
    pub fn add_test<F>(&mut self, title: impl Into<String>, body: F) -> usize
    where
        F: FnOnce(&mut Assert) -> anyhow::Result<()> + 'static,
    {
        let position = self.cases.len() + 1;
        let case = TestCase::new(position, title, self.current_module.clone(), Box::new(body));
        debug!(position, title = case.title(), module = case.module(), "registered test");
        self.cases.push(case);
        position
    }

    /// Set the module label for tests registered from now on.
    ///
    /// Anything other than a non-empty string is ignored.
    pub fn set_module(&mut self, label: impl Into<Value>) {
        match label.into() {
            Value::String(label) if !label.is_empty() => {
                debug!(from = %self.current_module, to = %label, "module changed");
                self.current_module = label;
            }
            other => debug!(label = %other, "ignoring invalid module label"),
        }
    }

    /// Module label applied to new registrations
    pub fn current_module(&self) -> &str {
        &self.current_module
    }

    /// All tests in registration order
    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    /// Test at a 1-based position
    pub fn get(&self, position: usize) -> Option<&TestCase> {
        position.checked_sub(1).and_then(|i| self.cases.get(i))
    }

    pub(crate) fn get_mut(&mut self, position: usize) -> Option<&mut TestCase> {
        position.checked_sub(1).and_then(|i| self.cases.get_mut(i))
    }

    /// Number of registered tests
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}
