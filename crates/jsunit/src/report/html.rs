//! HTML presenter.
//!
//! Produces the markup of the browser page: a root container holding one
//! block per test, styled through `jsunit-*` class names.

use std::fmt::Write as _;
use std::io::{self, Write};

use super::{Reporter, RunSummary};
use crate::assert::AssertionRecord;
use crate::case::TestCase;

/// The root element id.
pub const ROOT_ID: &str = "jsunit";

/// Renders each case as an HTML block, written inside the root container on `finish`
pub struct HtmlReporter<W: Write> {
    out: W,
    root_id: String,
    body: String,
}

impl HtmlReporter<io::Stdout> {
    /// Report to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> HtmlReporter<W> {
    /// Report to `out` using the default root id
    pub fn new(out: W) -> Self {
        Self {
            out,
            root_id: ROOT_ID.to_string(),
            body: String::new(),
        }
    }

    /// Use a different id for the root container
    pub fn with_root_id(mut self, root_id: impl Into<String>) -> Self {
        self.root_id = root_id.into();
        self
    }

    /// Consume the reporter, returning the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for HtmlReporter<W> {
    fn report(&mut self, case: &TestCase) -> io::Result<()> {
        render_test(&mut self.body, case).map_err(io::Error::other)
    }

    fn finish(&mut self, summary: &RunSummary) -> io::Result<()> {
        writeln!(self.out, "<div id=\"{}\">", escape(&self.root_id))?;
        writeln!(
            self.out,
            "<div class=\"jsunit-summary\"><strong>{}/{}</strong> tests passed in {} ms</div>",
            summary.passed, summary.total, summary.elapsed_ms
        )?;
        self.out.write_all(self.body.as_bytes())?;
        writeln!(self.out, "</div>")?;
        self.out.flush()
    }
}

fn render_test(html: &mut String, case: &TestCase) -> std::fmt::Result {
    let status = if case.is_passed() {
        "jsunit-test-passed"
    } else {
        "jsunit-test-failed"
    };

    writeln!(html, "<div class=\"jsunit-test {}\">", status)?;
    writeln!(html, "<h2 class=\"jsunit-title\">{}</h2>", escape(case.title()))?;
    writeln!(
        html,
        "<div class=\"jsunit-overall\"><strong>{}/{}</strong> passed</div>",
        case.passed_count(),
        case.total_count()
    )?;

    writeln!(html, "<div class=\"jsunit-info\">")?;
    writeln!(
        html,
        "<div class=\"jsunit-module\"><strong>Module: </strong>{}</div>",
        escape(case.module())
    )?;
    writeln!(
        html,
        "<div class=\"jsunit-elapsed\"><strong>Elapsed time: </strong>{} ms</div>",
        case.elapsed_ms()
    )?;
    writeln!(html, "</div>")?;

    writeln!(html, "<div class=\"jsunit-asserts\">")?;
    for (i, record) in case.records().iter().enumerate() {
        render_record(html, i, record)?;
    }
    writeln!(html, "</div>")?;
    writeln!(html, "</div>")
}

fn render_record(html: &mut String, index: usize, record: &AssertionRecord) -> std::fmt::Result {
    let passed = record.is_passed();
    let title = match record.message() {
        Some(message) => format!("#{} - {}", index + 1, message),
        None => format!("#{}", index + 1),
    };
    let class = if passed { "jsunit-passed" } else { "jsunit-failed" };

    writeln!(html, "<div class=\"jsunit-assert\">")?;
    writeln!(
        html,
        "<h3 class=\"jsunit-assert-title {}\">{}</h3>",
        class,
        escape(&title)
    )?;
    writeln!(html, "<div class=\"jsunit-assert-result\">")?;
    match record {
        AssertionRecord::Failure { error } => {
            writeln!(
                html,
                "<div class=\"jsunit-assert-error\"><strong>Error: </strong>{}</div>",
                escape(error)
            )?;
        }
        AssertionRecord::Comparison {
            expected, actual, ..
        } => {
            writeln!(
                html,
                "<div class=\"jsunit-assert-expected\"><strong>Expected: </strong>{}</div>",
                escape(&expected.to_string())
            )?;
            writeln!(
                html,
                "<div class=\"jsunit-assert-actual\"><strong>Actual: </strong>{}</div>",
                escape(&actual.to_string())
            )?;
            writeln!(
                html,
                "<div class=\"jsunit-assert-passed\"><strong>Passed: </strong>{}</div>",
                passed
            )?;
        }
    }
    writeln!(html, "</div>")?;
    writeln!(html, "</div>")
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
