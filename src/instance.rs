//! Per-suite case table and execution engine.
//!
//! A [`TestInstance`] owns an ordered list of [`TestCase`] records and a
//! parallel list of statuses. [`TestInstance::run_case`] is the harness's
//! failure-containment boundary: a panic inside a case's work is caught and
//! recorded as `Failed`, never allowed to abort the rest of the run.
//!
//! ## Severity tiers
//!
//! Duplicate case names and lookups of names that were never registered are
//! authoring bugs and panic immediately. Assertion mismatches and panics
//! raised by a case's own work are runtime outcomes and only mark the case
//! `Failed`.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use core::fmt::Write as _;

use crate::case::{CaseFn, TestCase, TestStatus};
use crate::check::Checker;

/// Capability implemented by each concrete suite: populate a fresh
/// [`TestInstance`] with the cases it wants to run.
///
/// One level deep on purpose; suites share fixture state through their
/// closures' captures, not through inheritance.
pub trait Suite {
    fn define(&mut self, t: &mut TestInstance);
}

/// Ordered case table plus execution state for one suite.
#[derive(Debug, Default)]
pub struct TestInstance {
    cases: Vec<TestCase>,
    statuses: Vec<TestStatus>,
    checker: Checker,
}

impl TestInstance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a test case. Declaration order is execution order.
    ///
    /// # Panics
    ///
    /// Panics if a case with the same name is already registered on this
    /// instance; that is a test-authoring bug, not a recoverable error.
    pub fn case(&mut self, name: impl Into<String>, work: impl Fn(&mut Checker) + 'static) {
        let name = name.into();
        assert!(
            self.index_of(&name).is_none(),
            "duplicate test case name {name:?}"
        );
        self.cases.push(TestCase::new(name, Box::new(work) as CaseFn));
        self.statuses.push(TestStatus::NotTested);
    }

    /// Clear the transient failure flag and the current-case marker.
    /// Invoked before every individual case execution.
    pub fn reset_flags(&mut self) {
        self.checker.reset();
    }

    /// Run a single case by name and return whether it passed.
    ///
    /// Any panic raised by the case's work is caught here, its message is
    /// routed to the log, and the case is recorded `Failed`. The default
    /// panic hook is silenced for the duration so a failing case does not
    /// spray a backtrace over the report.
    ///
    /// # Panics
    ///
    /// Panics if no case with this name is registered.
    pub fn run_case(&mut self, name: &str) -> bool {
        self.reset_flags();
        let Some(index) = self.index_of(name) else {
            panic!("no test case named {name:?} is registered");
        };
        self.checker.enter_case(index, name);

        let outcome = {
            let case = &self.cases[index];
            let checker = &mut self.checker;
            let previous_hook = panic::take_hook();
            panic::set_hook(Box::new(|_| {}));
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| case.do_work(checker)));
            panic::set_hook(previous_hook);
            outcome
        };

        let passed = outcome.is_ok() && !self.checker.failed();
        if let Err(payload) = outcome {
            let msg = panic_message(payload.as_ref());
            let _ = writeln!(self.checker.log_mut(), "in {name} [panicked]: {msg}");
        }
        self.statuses[index] = if passed {
            TestStatus::Passed
        } else {
            TestStatus::Failed
        };
        self.checker.leave_case();
        passed
    }

    /// Run every registered case in declaration order; true iff all passed.
    ///
    /// `run_case` already contains panics, but each case is wrapped in a
    /// second boundary so a single misbehaving case can never take the
    /// remaining ones down with it.
    pub fn run_all(&mut self) -> bool {
        let names: Vec<String> = self.cases.iter().map(|c| c.name().to_string()).collect();
        let mut passed = 0usize;
        for name in &names {
            let ok = panic::catch_unwind(AssertUnwindSafe(|| self.run_case(name))).unwrap_or(false);
            passed += usize::from(ok);
        }
        passed == names.len()
    }

    /// Status of a single case.
    ///
    /// # Panics
    ///
    /// Panics if no case with this name is registered.
    pub fn result(&self, name: &str) -> TestStatus {
        let Some(index) = self.index_of(name) else {
            panic!("no test case named {name:?} is registered");
        };
        self.statuses[index]
    }

    /// Statuses of all cases, indexed like [`case_names`](Self::case_names).
    pub fn results(&self) -> &[TestStatus] {
        &self.statuses
    }

    /// Case names in declaration order.
    pub fn case_names(&self) -> Vec<&str> {
        self.cases.iter().map(TestCase::name).collect()
    }

    /// Index of the case currently executing, or `None` when idle.
    pub fn current_case(&self) -> Option<usize> {
        self.checker.current_case()
    }

    /// Assertion context, for checking values outside a running case.
    pub fn checker(&mut self) -> &mut Checker {
        &mut self.checker
    }

    /// Diagnostic log accumulated by failed checks and panics.
    pub fn log(&self) -> &str {
        self.checker.log()
    }

    pub fn clear_log(&mut self) {
        self.checker.clear_log();
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.cases.iter().position(|c| c.name() == name)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_track_cases_one_to_one() {
        let mut t = TestInstance::new();
        t.case("a", |_| {});
        t.case("b", |_| {});
        assert_eq!(t.results().len(), t.case_names().len());
        assert_eq!(t.results(), &[TestStatus::NotTested, TestStatus::NotTested]);
    }

    #[test]
    #[should_panic(expected = "duplicate test case name")]
    fn duplicate_case_name_is_fatal() {
        let mut t = TestInstance::new();
        t.case("same", |_| {});
        t.case("same", |_| {});
    }

    #[test]
    #[should_panic(expected = "no test case named")]
    fn unknown_result_lookup_is_fatal() {
        let t = TestInstance::new();
        t.result("never registered");
    }

    #[test]
    fn panicking_case_is_contained_and_failed() {
        let mut t = TestInstance::new();
        t.case("explodes", |_| panic!("kaboom"));
        t.case("fine", |cx| {
            cx.check_true(true);
        });
        assert!(!t.run_all());
        assert_eq!(t.result("explodes"), TestStatus::Failed);
        assert_eq!(t.result("fine"), TestStatus::Passed);
        assert!(t.log().contains("kaboom"));
    }

    #[test]
    fn rerunning_overwrites_status() {
        use std::cell::Cell;
        use std::rc::Rc;

        let flip = Rc::new(Cell::new(false));
        let seen = Rc::clone(&flip);
        let mut t = TestInstance::new();
        t.case("flaky", move |cx| {
            cx.check_true(seen.get());
        });
        assert!(!t.run_case("flaky"));
        assert_eq!(t.result("flaky"), TestStatus::Failed);
        flip.set(true);
        assert!(t.run_case("flaky"));
        assert_eq!(t.result("flaky"), TestStatus::Passed);
    }
}
