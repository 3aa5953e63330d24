//! Link-time suite collection through `register_suite!`.
//!
//! Lives in its own test binary so `Registry::collected` sees exactly the
//! suites registered here.

use tessera::{Registry, Suite, TestInstance};

#[derive(Default)]
struct Smoke;

impl Suite for Smoke {
    fn define(&mut self, t: &mut TestInstance) {
        t.case("wires up", |cx| {
            cx.check_eq(1 + 1, 2);
        });
    }
}

#[derive(Default)]
struct Renamed;

impl Suite for Renamed {
    fn define(&mut self, t: &mut TestInstance) {
        t.case("answers under an alias", |cx| {
            cx.check_true(true);
        });
    }
}

tessera::register_suite!(Smoke);
tessera::register_suite!("CustomName", Renamed);

#[test]
fn collected_registry_contains_every_submission() {
    let registry = Registry::collected();
    assert_eq!(registry.names(), vec!["CustomName", "Smoke"]);
}

#[test]
fn collected_registry_runs_clean() {
    let registry = Registry::collected();
    assert!(registry.run(None));
}
