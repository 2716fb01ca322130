//! Tests for the tracing setup.

use std::sync::Mutex;

use csp_core::tracing::init_tracing;

/// Serializes tests that manipulate `CSP_LOG`.
static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_init_tracing_with_filter() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("CSP_LOG", "csp_analysis=debug,csp_core=warn");
    init_tracing();
    std::env::remove_var("CSP_LOG");
}

#[test]
fn test_init_tracing_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    tracing::info!(target: "csp_core", "still alive after repeated init");
}

#[test]
fn test_invalid_filter_falls_back() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("CSP_LOG", "=== not a filter ===");
    init_tracing();
    std::env::remove_var("CSP_LOG");
}
