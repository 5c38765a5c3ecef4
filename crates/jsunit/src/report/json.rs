//! JSON presenter

use serde::Serialize;
use std::io::{self, Write};

use super::{Reporter, RunSummary};
use crate::case::{CaseSnapshot, TestCase};

#[derive(Serialize)]
struct JsonDocument<'a> {
    summary: &'a RunSummary,
    tests: &'a [CaseSnapshot],
}

/// Collects every case and writes a single JSON document on `finish`
pub struct JsonReporter<W: Write> {
    out: W,
    cases: Vec<CaseSnapshot>,
}

impl JsonReporter<io::Stdout> {
    /// Report to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonReporter<W> {
    /// Report to `out`
    pub fn new(out: W) -> Self {
        Self {
            out,
            cases: Vec::new(),
        }
    }

    /// Consume the reporter, returning the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, case: &TestCase) -> io::Result<()> {
        self.cases.push(case.snapshot());
        Ok(())
    }

    fn finish(&mut self, summary: &RunSummary) -> io::Result<()> {
        let document = JsonDocument {
            summary,
            tests: &self.cases,
        };
        serde_json::to_writer_pretty(&mut self.out, &document)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TestRegistry;

    #[test]
    fn test_json_document() {
        let mut registry = TestRegistry::default();
        registry.add_test("adds", |a| {
            a.equal(2 + 2, 4, "basic");
            a.is_not_nan(f64::NAN, None);
            Ok(())
        });
        registry.get_mut(1).unwrap().perform();

        let mut reporter = JsonReporter::new(Vec::new());
        reporter.report(registry.get(1).unwrap()).unwrap();
        reporter
            .finish(&RunSummary::from_cases(registry.cases()))
            .unwrap();

        let json: serde_json::Value = serde_json::from_slice(&reporter.into_inner()).unwrap();
        assert_eq!(json["summary"]["total"], 1);
        assert_eq!(json["summary"]["failed"], 1);
        assert_eq!(json["summary"]["modules"][0]["name"], "Common");

        let test = &json["tests"][0];
        assert_eq!(test["position"], 1);
        assert_eq!(test["title"], "adds");
        assert_eq!(test["module"], "Common");
        assert_eq!(test["passed_count"], 1);
        assert_eq!(test["total_count"], 2);
        assert_eq!(test["passed"], false);
        assert_eq!(test["records"][0]["expected"], 4.0);
        assert_eq!(test["records"][0]["message"], "basic");
        assert_eq!(test["records"][1]["expected"], "NOT NaN");
        assert_eq!(test["records"][1]["actual"], "NaN");
        assert!(test["records"][1].get("message").is_none());
    }
}
