//! # JSUnit
//!
//! A minimal unit-testing harness.
//!
//! Tests are registered with a title and a body, grouped under a flat module
//! label, and run immediately in registration order. Each body receives an
//! [`Assert`] recorder; every assertion call appends one record, a failing
//! comparison never stops the body, and an error or panic in the body is
//! caught and recorded as a single failure. Finished tests are handed to a
//! [`Reporter`] for presentation.

#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod assert;
pub mod case;
pub mod config;
pub mod error;
pub mod harness;
pub mod registry;
pub mod report;
pub mod runner;
pub mod value;

pub use assert::{Assert, AssertionRecord, Expectation};
pub use case::{CaseSnapshot, TestCase};
pub use config::{HarnessConfig, OutputFormat};
pub use error::{ConfigError, HarnessError, HarnessResult, HookPhase};
pub use harness::Harness;
pub use registry::{DEFAULT_MODULE, TestRegistry};
pub use report::{
    CollectingReporter, HtmlReporter, JsonReporter, ModuleReport, Reporter, RunSummary,
    TextReporter,
};
pub use runner::{ELAPSED_TIME_PRECISION, TestRunner};
pub use value::Value;
