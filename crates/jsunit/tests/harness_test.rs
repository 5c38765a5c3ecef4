//! End-to-end tests for the harness entry points.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use jsunit::{
    AssertionRecord, CollectingReporter, Expectation, Harness, HarnessConfig, HarnessError,
    HookPhase, Reporter, TestCase, Value,
};

fn harness() -> Harness {
    Harness::with_reporter(CollectingReporter::new())
}

fn outcomes(case: &TestCase) -> Vec<bool> {
    case.records().iter().map(AssertionRecord::is_passed).collect()
}

#[test]
fn test_adds_scenario() {
    let mut jsunit = harness();
    let position = jsunit
        .test("adds", |a| {
            a.equal(2 + 2, 4, "basic");
            Ok(())
        })
        .unwrap();

    let case = jsunit.case(position).unwrap();
    assert_eq!(
        case.records(),
        &[AssertionRecord::Comparison {
            expected: Expectation::Exactly(Value::from(4)),
            actual: Value::from(4),
            passed: true,
            message: Some("basic".to_string()),
        }]
    );
    assert_eq!(case.passed_count(), 1);
    assert_eq!(case.total_count(), 1);
    assert!(case.is_passed());
}

#[test]
fn test_coercion_properties() {
    let mut jsunit = harness();
    jsunit
        .test("equality", |a| {
            a.equal(5, "5", None);
            a.strict_equal(5, "5", None);
            a.not_equal(5, "5", None);
            a.not_strict_equal(5, "5", None);
            Ok(())
        })
        .unwrap();
    jsunit
        .test("nan", |a| {
            a.is_nan(f64::NAN, None);
            a.is_nan("not-a-number-string", None);
            a.is_nan(f64::INFINITY, None);
            Ok(())
        })
        .unwrap();

    assert_eq!(outcomes(&jsunit.cases()[0]), vec![true, false, false, true]);
    assert_eq!(outcomes(&jsunit.cases()[1]), vec![true, true, false]);
}

#[test]
fn test_records_follow_call_order() {
    let mut jsunit = harness();
    jsunit
        .test("ordered", |a| {
            for i in 0..5 {
                a.equal(i, i, format!("step {i}").as_str());
            }
            a.ok(true, "step 0");
            Ok(())
        })
        .unwrap();

    let messages: Vec<_> = jsunit.cases()[0]
        .records()
        .iter()
        .map(|r| r.message().unwrap_or_default().to_string())
        .collect();
    assert_eq!(
        messages,
        vec!["step 0", "step 1", "step 2", "step 3", "step 4", "step 0"]
    );
}

#[test]
fn test_failing_body_is_isolated() {
    let mut jsunit = harness();
    jsunit
        .test("throws", |a| {
            a.ok(true, "ran before the error");
            a.equal(1, 2, "failed before the error");
            anyhow::bail!("sum is not defined");
        })
        .unwrap();
    jsunit
        .test("panics", |a| {
            let values: Vec<i32> = Vec::new();
            let third = values[3];
            a.equal(third, 3, "never recorded");
            Ok(())
        })
        .unwrap();
    jsunit
        .test("still runs", |a| {
            a.ok(true, None);
            Ok(())
        })
        .unwrap();

    let failures = |case: &TestCase| {
        case.records()
            .iter()
            .filter(|r| r.is_failure())
            .count()
    };

    let throws = &jsunit.cases()[0];
    assert_eq!(failures(throws), 1);
    assert!(throws.records().last().unwrap().is_failure());
    assert_eq!(
        throws.records().last(),
        Some(&AssertionRecord::Failure {
            error: "sum is not defined".to_string()
        })
    );
    assert!(!throws.is_passed());

    let panics = &jsunit.cases()[1];
    assert_eq!(panics.total_count(), 1);
    assert_eq!(failures(panics), 1);

    assert!(jsunit.cases()[2].is_passed());
    assert_eq!(jsunit.summary().errored, 2);
}

#[test]
fn test_vacuous_pass() {
    let mut jsunit = harness();
    jsunit.test("empty", |_| Ok(())).unwrap();

    let case = &jsunit.cases()[0];
    assert_eq!(case.passed_count(), case.total_count());
    assert!(case.is_passed());
    assert_eq!(jsunit.summary().passed, 1);
}

#[test]
fn test_module_labels() {
    let mut jsunit = harness();
    jsunit.module("Shipping");
    jsunit.test("a", |_| Ok(())).unwrap();
    jsunit.test("b", |_| Ok(())).unwrap();
    jsunit.module("Billing");
    jsunit.test("c", |_| Ok(())).unwrap();
    jsunit.module(123);
    jsunit.module("");
    jsunit.test("d", |_| Ok(())).unwrap();

    let modules: Vec<_> = jsunit.cases().iter().map(TestCase::module).collect();
    assert_eq!(modules, vec!["Shipping", "Shipping", "Billing", "Billing"]);
    assert_eq!(jsunit.current_module(), "Billing");
}

#[test]
fn test_default_module_comes_from_config() {
    let config = HarnessConfig {
        default_module: "Smoke".to_string(),
        ..Default::default()
    };
    let mut jsunit = Harness::new(&config, CollectingReporter::new());
    jsunit.test("first", |_| Ok(())).unwrap();
    assert_eq!(jsunit.cases()[0].module(), "Smoke");
}

#[test]
fn test_before_hook_sees_positions_in_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut jsunit = harness();

    let hook_log = Rc::clone(&log);
    jsunit.before_each(move |index| {
        hook_log.borrow_mut().push(format!("before {index}"));
        Ok(())
    });
    for title in ["first", "second"] {
        let body_log = Rc::clone(&log);
        jsunit
            .test(title, move |_| {
                body_log.borrow_mut().push(format!("body {title}"));
                Ok(())
            })
            .unwrap();
    }

    assert_eq!(
        *log.borrow(),
        vec!["before 1", "body first", "before 2", "body second"]
    );
}

#[test]
fn test_hooks_are_overwritten_and_cleared() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut jsunit = harness();

    let first = Rc::clone(&calls);
    jsunit.after_each(move |i| {
        first.borrow_mut().push(("first", i));
        Ok(())
    });
    let second = Rc::clone(&calls);
    jsunit.after_each(move |i| {
        second.borrow_mut().push(("second", i));
        Ok(())
    });
    jsunit.test("one", |_| Ok(())).unwrap();
    jsunit.clear_after_each();
    jsunit.test("two", |_| Ok(())).unwrap();

    assert_eq!(*calls.borrow(), vec![("second", 1)]);
}

#[test]
fn test_hook_error_aborts_the_run() {
    let mut jsunit = harness();
    jsunit.before_each(|index| {
        if index == 2 {
            anyhow::bail!("fixture missing");
        }
        Ok(())
    });

    jsunit.add_test("one", |a| {
        a.ok(true, None);
        Ok(())
    });
    jsunit.add_test("two", |a| {
        a.ok(true, None);
        Ok(())
    });
    jsunit.add_test("three", |a| {
        a.ok(true, None);
        Ok(())
    });

    let err = jsunit.run_all_tests().unwrap_err();
    assert_eq!(
        err.to_string(),
        "beforeEach hook failed for test #2: fixture missing"
    );
    match err {
        HarnessError::Hook {
            phase, position, ..
        } => {
            assert_eq!(phase, HookPhase::BeforeEach);
            assert_eq!(position, 2);
        }
        other => panic!("unexpected error: {other}"),
    }

    let performed: Vec<_> = jsunit.cases().iter().map(TestCase::is_performed).collect();
    assert_eq!(performed, vec![true, false, false]);
    assert_eq!(jsunit.summary().total, 1);
}

#[test]
fn test_after_hook_error_is_reported_after_the_test_ran() {
    let mut jsunit = harness();
    jsunit.after_each(|_| anyhow::bail!("teardown failed"));

    let err = jsunit.test("runs anyway", |a| {
        a.ok(true, None);
        Ok(())
    });

    assert!(matches!(
        err,
        Err(HarnessError::Hook {
            phase: HookPhase::AfterEach,
            position: 1,
            ..
        })
    ));
    assert!(jsunit.cases()[0].is_performed());
    assert_eq!(jsunit.cases()[0].total_count(), 1);
}

struct DiskFull;

impl Reporter for DiskFull {
    fn report(&mut self, _case: &TestCase) -> io::Result<()> {
        Err(io::Error::other("disk full"))
    }
}

#[test]
fn test_reporter_error_aborts_the_run() {
    let after_calls = Rc::new(RefCell::new(0));
    let mut jsunit = Harness::with_reporter(DiskFull);

    let after = Rc::clone(&after_calls);
    jsunit.after_each(move |_| {
        *after.borrow_mut() += 1;
        Ok(())
    });

    let err = jsunit
        .test("first", |a| {
            a.ok(true, None);
            Ok(())
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "reporter failed: disk full");
    assert!(matches!(err, HarnessError::Report(_)));
    assert!(jsunit.cases()[0].is_performed());

    jsunit.add_test("second", |_| Ok(()));
    jsunit.add_test("third", |_| Ok(()));
    let err = jsunit.run_all_tests().unwrap_err();
    assert!(matches!(err, HarnessError::Report(_)));

    let performed: Vec<_> = jsunit.cases().iter().map(TestCase::is_performed).collect();
    assert_eq!(performed, vec![true, true, false]);
    assert_eq!(*after_calls.borrow(), 0);
}

#[test]
fn test_batch_mode_runs_in_registration_order() {
    let order = Rc::new(RefCell::new(Vec::new()));
    let mut jsunit = harness();

    for title in ["a", "b", "c"] {
        let order = Rc::clone(&order);
        jsunit.add_test(title, move |_| {
            order.borrow_mut().push(title);
            Ok(())
        });
    }
    assert!(jsunit.cases().iter().all(|c| !c.is_performed()));

    jsunit.run_all_tests().unwrap();
    assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
}

#[test]
fn test_elapsed_time_is_rounded() {
    let mut jsunit = harness();
    jsunit
        .test("busy", |a| {
            let sum: u64 = (0..10_000u64).sum();
            a.equal(sum as f64, 49_995_000.0, None);
            Ok(())
        })
        .unwrap();

    let elapsed = jsunit.cases()[0].elapsed_ms();
    assert!(elapsed >= 0.0);
    let scaled = elapsed * 1000.0;
    assert!((scaled - scaled.round()).abs() < 1e-6);
}

#[test]
fn test_finish_hands_summary_to_reporter() {
    let reporter = Rc::new(RefCell::new(CollectingReporter::new()));
    let mut jsunit = Harness::with_reporter(Rc::clone(&reporter));

    jsunit.module("Sum");
    jsunit
        .test("passes", |a| {
            a.equal("5", 5, None);
            Ok(())
        })
        .unwrap();
    jsunit
        .test("fails", |a| {
            a.strict_equal("5", 5, None);
            Ok(())
        })
        .unwrap();
    let summary = jsunit.finish().unwrap();

    assert_eq!(summary.total, 2);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.pass_rate, 50.0);

    let reporter = reporter.borrow();
    let titles: Vec<_> = reporter.cases().iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["passes", "fails"]);
    assert_eq!(reporter.summary(), Some(&summary));
}
