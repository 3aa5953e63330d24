//! Test-case records and their execution status.

use std::fmt;

use crate::check::Checker;

/// Unit of work executed for a single test case.
///
/// Fixture state lives in the closure's captures; assertions go through the
/// [`Checker`] passed in by the execution engine.
pub type CaseFn = Box<dyn Fn(&mut Checker)>;

/// Execution status of a single test case.
///
/// A case starts as `NotTested` and transitions to `Passed` or `Failed` each
/// time it runs. Re-running overwrites the prior status: last run wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TestStatus {
    #[default]
    NotTested,
    Passed,
    Failed,
}

/// Immutable pairing of a case name and its unit of work.
///
/// Created when a suite's `define` registers it; owned by the
/// [`TestInstance`](crate::TestInstance) for the instance's lifetime.
pub struct TestCase {
    name: String,
    work: CaseFn,
}

impl TestCase {
    pub(crate) fn new(name: String, work: CaseFn) -> Self {
        Self { name, work }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the unit of work. Panics from the work propagate to the
    /// caller; containment is the execution engine's responsibility.
    pub(crate) fn do_work(&self, cx: &mut Checker) {
        (self.work)(cx);
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
