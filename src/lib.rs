//! Minimal self-registering unit-test harness.
//!
//! Declare a suite, register it, run everything:
//!
//! ```
//! use tessera::{Registry, Suite, TestInstance};
//!
//! #[derive(Default)]
//! struct Arithmetic;
//!
//! impl Suite for Arithmetic {
//!     fn define(&mut self, t: &mut TestInstance) {
//!         t.case("adds small integers", |cx| {
//!             cx.check_eq(2 + 2, 4);
//!         });
//!         t.case("stays within epsilon", |cx| {
//!             cx.check_eq(0.1f64 + 0.2, 0.3f64);
//!         });
//!     }
//! }
//!
//! tessera::register_suite!(Arithmetic);
//!
//! fn main() {
//!     let registry = Registry::collected();
//!     assert!(registry.run(None));
//! }
//! ```
//!
//! ## Modules
//!
//! - [`case`] - case records and statuses
//! - [`check`] - the assertion surface handed to case bodies
//! - [`instance`] - per-suite case table and the failure-containment boundary
//! - [`registry`] - explicit name → factory registry and the run driver
//! - [`report`] - structured run events and the default text renderer
//! - [`cli`] - argument parsing and exit-code translation for harness binaries
//!
//! ## Design
//!
//! Checks record failure and keep going; a panic inside a case marks it
//! failed without aborting the run. Duplicate or unknown case names, by
//! contrast, are authoring bugs and panic immediately. Suites run
//! sequentially in lexicographic name order.

pub mod almost;
pub mod case;
pub mod check;
pub mod cli;
pub mod instance;
pub mod registry;
pub mod report;

pub use almost::AlmostEq;
pub use case::{TestCase, TestStatus};
pub use check::{CheckedEq, Checker};
pub use cli::Cli;
pub use instance::{Suite, TestInstance};
pub use registry::{Registry, SuiteEntry, SuiteFactory};
pub use report::{ReportError, ReportSink, TextSink};

// Re-exported for the expansion of `register_suite!`.
#[doc(hidden)]
pub use inventory;
