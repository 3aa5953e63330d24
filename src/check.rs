//! Assertion surface consumed by test-case bodies.
//!
//! A [`Checker`] is handed to each case's work closure. Checks never panic
//! on mismatch: they set a transient failure flag, append a diagnostic line
//! to the instance log (naming the running case and the call site), and
//! return the assertion's own truth so a case body can branch on it:
//!
//! ```
//! use tessera::Checker;
//!
//! let mut cx = Checker::new();
//! if !cx.check_true(1 + 1 == 2) {
//!     return; // quit the case early on failure
//! }
//! ```

use core::fmt;
use core::fmt::Write as _;
use std::panic::Location;

use crate::almost::AlmostEq;

/// Equality as the harness checks it: exact for integers and characters,
/// machine-epsilon tolerant for floats.
pub trait CheckedEq: PartialEq + fmt::Debug {
    fn checked_eq(&self, other: &Self) -> bool {
        self == other
    }
}

macro_rules! exact_checked_eq {
    ($($ty:ty),* $(,)?) => {
        $(impl CheckedEq for $ty {})*
    };
}

exact_checked_eq!(i8, u8, i32, u32, char);

impl CheckedEq for f32 {
    fn checked_eq(&self, other: &Self) -> bool {
        self.almost_eq(*other, f32::DEFAULT_TOLERANCE)
    }
}

impl CheckedEq for f64 {
    fn checked_eq(&self, other: &Self) -> bool {
        self.almost_eq(*other, f64::DEFAULT_TOLERANCE)
    }
}

/// Per-case assertion context.
///
/// Holds the transient failure flag, the index and name of the currently
/// running case, and the append-only diagnostic log. Owned by a
/// [`TestInstance`](crate::TestInstance) during a run, but also usable
/// standalone for checking values outside any case.
#[derive(Debug, Default)]
pub struct Checker {
    failed: bool,
    current: Option<usize>,
    current_name: Option<String>,
    log: String,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if any check has failed since the last [`reset`](Self::reset).
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Index of the case currently executing, or `None` when idle.
    pub fn current_case(&self) -> Option<usize> {
        self.current
    }

    /// Fail the case unless `expression` is true. Returns `expression`.
    #[track_caller]
    pub fn check_true(&mut self, expression: bool) -> bool {
        if !expression {
            self.record_failure(
                format_args!("check_true: expected true, got false"),
                Location::caller(),
            );
        }
        expression
    }

    /// Fail the case unless `expression` is false. Returns `!expression`.
    #[track_caller]
    pub fn check_false(&mut self, expression: bool) -> bool {
        if expression {
            self.record_failure(
                format_args!("check_false: expected false, got true"),
                Location::caller(),
            );
        }
        !expression
    }

    /// Fail the case unless the two values compare equal under [`CheckedEq`].
    /// Returns whether they did.
    #[track_caller]
    pub fn check_eq<T: CheckedEq>(&mut self, value: T, expected: T) -> bool {
        if !value.checked_eq(&expected) {
            self.record_failure(
                format_args!("check_eq: {value:?} != {expected:?}"),
                Location::caller(),
            );
            return false;
        }
        true
    }

    /// Float equality with a caller-chosen tolerance instead of the
    /// machine-epsilon default.
    #[track_caller]
    pub fn check_eq_within<T: AlmostEq + fmt::Debug>(
        &mut self,
        value: T,
        expected: T,
        tolerance: T,
    ) -> bool {
        if !value.almost_eq(expected, tolerance) {
            self.record_failure(
                format_args!("check_eq_within: {value:?} != {expected:?} (tolerance {tolerance:?})"),
                Location::caller(),
            );
            return false;
        }
        true
    }

    /// Unconditionally fail the current case with a message.
    #[track_caller]
    pub fn fail(&mut self, msg: &str) {
        self.record_failure(format_args!("{msg}"), Location::caller());
    }

    /// Diagnostic log accumulated by failed checks.
    pub fn log(&self) -> &str {
        &self.log
    }

    /// Append-only access for free-form diagnostics from case bodies.
    pub fn log_mut(&mut self) -> &mut String {
        &mut self.log
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    /// Clear the failure flag and the current-case marker. The log is kept.
    pub(crate) fn reset(&mut self) {
        self.failed = false;
        self.current = None;
        self.current_name = None;
    }

    pub(crate) fn enter_case(&mut self, index: usize, name: &str) {
        self.current = Some(index);
        self.current_name = Some(name.to_string());
    }

    pub(crate) fn leave_case(&mut self) {
        self.current = None;
        self.current_name = None;
    }

    fn record_failure(&mut self, detail: fmt::Arguments<'_>, location: &Location<'_>) {
        self.failed = true;
        let case = self.current_name.clone().unwrap_or_else(|| "<no case>".into());
        // Writing to String cannot fail.
        let _ = writeln!(self.log, "in {case} [{location}]: {detail}");
    }
}
