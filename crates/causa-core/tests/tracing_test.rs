//! Tracing initialization.

use std::sync::Mutex;

use causa_core::config::LoggingConfig;
use causa_core::constants::LOG_ENV_VAR;
use causa_core::tracing_setup::init_tracing;

/// Serializes tests that touch `CAUSA_LOG`.
static TRACING_MUTEX: Mutex<()> = Mutex::new(());

/// TRC-01: per-target filter syntax is accepted.
#[test]
fn test_per_target_filter() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var(LOG_ENV_VAR, "causa_search::fas=debug,causa_search::generator=warn");
    init_tracing(&LoggingConfig::default());
    tracing::debug!(target: "causa_search::fas", "filter accepted");
    std::env::remove_var(LOG_ENV_VAR);
}

/// TRC-02: repeated initialization is a no-op.
#[test]
fn test_init_is_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    let logging = LoggingConfig {
        level: Some("debug".to_string()),
        with_location: Some(true),
    };
    init_tracing(&logging);
    assert!(!init_tracing(&logging));
    assert!(!init_tracing(&LoggingConfig::default()));
}

/// TRC-03: a garbage filter falls back to the configured level.
#[test]
fn test_invalid_filter_falls_back() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var(LOG_ENV_VAR, "not a [valid filter");
    init_tracing(&LoggingConfig::default());
    std::env::remove_var(LOG_ENV_VAR);
}
