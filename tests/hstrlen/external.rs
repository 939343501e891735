//! HSTRLEN cases against an external store
//!
//! Skipped unless `RESPCHECK_ADDR` names a running store. The store is
//! flushed before the run.

use crate::common::*;
use respcheck::{CaseRunner, HarnessConfig, ADDR_ENV};

#[test]
fn all_cases_pass_against_external_store() {
    if std::env::var_os(ADDR_ENV).is_none() {
        return;
    }
    init_tracing();
    let runner = CaseRunner::new(HarnessConfig::from_env());
    let report = runner.run_suite(&load_suite()).unwrap();
    report.ensure_passed().unwrap();
}
