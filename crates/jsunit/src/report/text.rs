//! Terminal presenter

use colored::{Color, Colorize};
use std::io::{self, Write};

use super::{Reporter, RunSummary};
use crate::assert::AssertionRecord;
use crate::case::TestCase;

/// Writes a human-readable report, one block per test
pub struct TextReporter<W: Write> {
    out: W,
    color: bool,
    verbose: bool,
}

impl TextReporter<io::Stdout> {
    /// Report to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TextReporter<W> {
    /// Report to `out`, coloured, showing details of failed assertions only
    pub fn new(out: W) -> Self {
        Self {
            out,
            color: true,
            verbose: false,
        }
    }

    /// Enable or disable ANSI colours
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Also show details of passing assertions
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Consume the reporter, returning the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn write_record(&mut self, index: usize, record: &AssertionRecord) -> io::Result<()> {
        let passed = record.is_passed();
        let title = match record.message() {
            Some(message) => format!("#{} - {}", index + 1, message),
            None => format!("#{}", index + 1),
        };
        let title = self.paint(&title, if passed { Color::Green } else { Color::Red });
        writeln!(self.out, "    {}", title)?;

        match record {
            AssertionRecord::Failure { error } => {
                let label = self.bold("Error:");
                writeln!(self.out, "      {} {}", label, error)
            }
            AssertionRecord::Comparison {
                expected, actual, ..
            } => {
                let labels = [
                    self.bold("Expected:"),
                    self.bold("Actual:"),
                    self.bold("Passed:"),
                ];
                writeln!(self.out, "      {}  {}", labels[0], expected)?;
                writeln!(self.out, "      {}    {}", labels[1], actual)?;
                writeln!(self.out, "      {}    {}", labels[2], passed)
            }
        }
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn report(&mut self, case: &TestCase) -> io::Result<()> {
        let (mark, color) = if case.is_passed() {
            ("✓", Color::Green)
        } else {
            ("✗", Color::Red)
        };
        let mark = self.paint(mark, color);
        let title = self.bold(case.title());
        writeln!(
            self.out,
            "{} {} {}/{} passed",
            mark,
            title,
            case.passed_count(),
            case.total_count()
        )?;
        writeln!(
            self.out,
            "    Module: {} | Elapsed time: {} ms",
            case.module(),
            case.elapsed_ms()
        )?;

        for (i, record) in case.records().iter().enumerate() {
            if self.verbose || !record.is_passed() {
                self.write_record(i, record)?;
            }
        }
        Ok(())
    }

    fn finish(&mut self, summary: &RunSummary) -> io::Result<()> {
        let header = self.bold("=== JSUnit Results ===");
        writeln!(self.out, "\n{}", header)?;
        writeln!(
            self.out,
            "Tests:      {} ({} passed, {} failed, {} errored)",
            summary.total, summary.passed, summary.failed, summary.errored
        )?;
        writeln!(
            self.out,
            "Assertions: {}/{} passed",
            summary.passed_assertions, summary.assertions
        )?;
        let rate = format!("{:.1}%", summary.pass_rate);
        let rate = self.paint(
            &rate,
            if summary.all_passed() {
                Color::Green
            } else {
                Color::Red
            },
        );
        writeln!(self.out, "Pass rate:  {}", rate)?;
        writeln!(self.out, "Elapsed:    {} ms", summary.elapsed_ms)?;

        if !summary.modules.is_empty() {
            let header = self.bold("=== Modules ===");
            writeln!(self.out, "\n{}", header)?;
            let width = summary.modules.iter().map(|m| m.name.len()).max().unwrap_or(0);
            for module in &summary.modules {
                writeln!(
                    self.out,
                    "  {:width$}  {}/{} passed",
                    module.name,
                    module.passed,
                    module.total,
                    width = width
                )?;
            }
        }
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TestRegistry;

    fn render(verbose: bool) -> String {
        let mut registry = TestRegistry::default();
        registry.set_module("Sum");
        registry.add_test("Sum Function", |a| {
            a.equal(9, 9, "Simple add");
            a.equal(10, "11", "Add string nums");
            Ok(())
        });
        registry.add_test("Broken", |_| anyhow::bail!("sum is not defined"));

        let mut reporter = TextReporter::new(Vec::new())
            .with_color(false)
            .with_verbose(verbose);
        for position in 1..=registry.len() {
            registry.get_mut(position).unwrap().perform();
            reporter.report(registry.get(position).unwrap()).unwrap();
        }
        reporter
            .finish(&RunSummary::from_cases(registry.cases()))
            .unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_failed_assertions_are_detailed() {
        let output = render(false);

        assert!(output.contains("✗ Sum Function 1/2 passed"));
        assert!(output.contains("Module: Sum | Elapsed time: 0 ms"));
        assert!(!output.contains("#1 - Simple add"));
        assert!(output.contains("#2 - Add string nums"));
        assert!(output.contains("Expected:  11"));
        assert!(output.contains("Actual:    10"));
        assert!(output.contains("Passed:    false"));
        assert!(output.contains("✗ Broken 0/1 passed"));
        assert!(output.contains("Error: sum is not defined"));
    }

    #[test]
    fn test_verbose_shows_passing_assertions() {
        let output = render(true);
        assert!(output.contains("#1 - Simple add"));
        assert!(output.contains("Passed:    true"));
    }

    #[test]
    fn test_summary_block() {
        let output = render(false);
        assert!(output.contains("Tests:      2 (0 passed, 2 failed, 1 errored)"));
        assert!(output.contains("Assertions: 1/3 passed"));
        assert!(output.contains("Pass rate:  0.0%"));
        assert!(output.contains("Sum  0/2 passed"));
        assert!(!output.contains('\u{1b}'));
    }
}
