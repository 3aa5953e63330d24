//! Suite registry and the run-all driver.
//!
//! The registry is an explicit object with an explicit lifecycle: construct
//! it, add factories, run it. Automatic discovery goes through
//! [`register_suite!`](crate::register_suite): each use submits a
//! link-time [`SuiteEntry`], and [`Registry::collected`] assembles them all
//! at one call site. No code runs before `main` and no cross-module
//! initialization order matters.
//!
//! Suites run in lexicographic name order (the map's iteration order), and
//! that ordering is part of the contract.

use std::collections::BTreeMap;
use std::path::Path;

use crate::instance::{Suite, TestInstance};
use crate::report::{ReportSink, TextSink};

/// Builds a fresh suite value for one run.
pub type SuiteFactory = Box<dyn Fn() -> Box<dyn Suite>>;

/// Link-time registration record gathered by [`Registry::collected`].
pub struct SuiteEntry {
    pub name: &'static str,
    pub build: fn() -> Box<dyn Suite>,
}

inventory::collect!(SuiteEntry);

/// Register a suite type for collection by [`Registry::collected`].
///
/// The type must implement [`Suite`](crate::Suite) and `Default`. With one
/// argument the registered name is the type's own name; the two-argument
/// form picks the name explicitly.
#[macro_export]
macro_rules! register_suite {
    ($suite:ty) => {
        $crate::register_suite!(stringify!($suite), $suite);
    };
    ($name:expr, $suite:ty) => {
        $crate::inventory::submit! {
            $crate::registry::SuiteEntry {
                name: $name,
                build: || ::std::boxed::Box::new(<$suite as ::core::default::Default>::default()),
            }
        }
    };
}

/// Mapping from suite name to factory, plus the driver that runs them all.
#[derive(Default)]
pub struct Registry {
    factories: BTreeMap<String, SuiteFactory>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from every [`register_suite!`] submission linked
    /// into the program.
    pub fn collected() -> Self {
        let mut registry = Self::new();
        for entry in inventory::iter::<SuiteEntry> {
            registry.add_factory(entry.name, Box::new(entry.build));
        }
        registry
    }

    /// Install a factory that default-constructs `S` under `name`.
    pub fn add<S: Suite + Default + 'static>(&mut self, name: impl Into<String>) {
        self.add_factory(name, Box::new(|| Box::new(S::default())));
    }

    /// Install an arbitrary factory under `name`.
    ///
    /// Registering the same name twice keeps the later factory (last write
    /// wins) and logs a warning, since a silent overwrite usually points at
    /// a copy-pasted registration.
    pub fn add_factory(&mut self, name: impl Into<String>, factory: SuiteFactory) {
        let name = name.into();
        if self.factories.insert(name.clone(), factory).is_some() {
            tracing::warn!(suite = %name, "suite re-registered, previous factory replaced");
        }
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Registered suite names, in the order suites will run.
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Run every registered suite and stream events to `sink`.
    ///
    /// For each (name, factory) pair in lexicographic name order: build the
    /// suite, let it define its cases into a fresh [`TestInstance`], run
    /// every case, report, and drop the suite. Returns true iff every suite
    /// passed all of its cases.
    #[tracing::instrument(skip_all, fields(suite_count = self.factories.len()))]
    pub fn run_all_tests(&self, sink: &mut dyn ReportSink) -> bool {
        sink.on_run_start(self.factories.len());

        let mut suites_passed = 0usize;
        for (name, factory) in &self.factories {
            tracing::debug!(suite = %name, "running suite");
            sink.on_suite_start(name);

            let mut suite = factory();
            let mut table = TestInstance::new();
            suite.define(&mut table);

            let case_names: Vec<String> =
                table.case_names().iter().map(|n| n.to_string()).collect();
            let mut cases_passed = 0usize;
            for case in &case_names {
                sink.on_case_start(case);
                let ok = table.run_case(case);
                sink.on_case_result(case, ok);
                cases_passed += usize::from(ok);
            }

            if !table.log().is_empty() {
                sink.on_suite_log(table.log());
            }
            sink.on_suite_summary(name, cases_passed, case_names.len());
            suites_passed += usize::from(cases_passed == case_names.len());
        }

        let all_passed = suites_passed == self.factories.len();
        sink.on_run_summary(suites_passed, self.factories.len(), all_passed);
        all_passed
    }

    /// Run with the default text renderer, writing to `log_path` when given
    /// (stderr otherwise, or when the file cannot be created).
    pub fn run(&self, log_path: Option<&Path>) -> bool {
        let mut sink = TextSink::from_path(log_path);
        self.run_all_tests(&mut sink)
    }
}
