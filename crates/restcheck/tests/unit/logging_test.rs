//! Tests for log level parsing

use restcheck::logging::parse_log_level;
use tracing::Level;

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("TRACE").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);
}

#[test]
fn test_invalid_log_level() {
    let error = parse_log_level("loud").unwrap_err();
    assert!(error.to_string().contains("Invalid log level: loud"));
}
