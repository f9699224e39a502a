//! Integration tests for configuration documents driving a board.

use super::helpers::{Backend, manager};
use std::time::Duration;
use taskboard::config::{BoardConfig, ConfigError};

#[tokio::test(flavor = "multi_thread")]
async fn json_document_sets_the_reload_cadence() {
    let config = BoardConfig::from_json_str(r#"{"reload_interval_ms": 5000}"#)
        .expect("valid configuration");
    assert_eq!(config.reload_interval(), Duration::from_secs(5));

    let backend = Backend::seeded();
    let mut board = backend.board(manager(), config);
    board.mount().await;

    backend.clock.advance(chrono::TimeDelta::seconds(5));
    assert!(board.tick().await);
}

#[test]
fn zero_timer_tick_is_rejected() {
    let result = BoardConfig::from_json_str(r#"{"timer_tick_ms": 0}"#);
    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
}
