//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::money::MoneyError;
use core_kernel::ports::PortError;
use core_kernel::temporal::TemporalError;

#[test]
fn test_core_error_validation() {
    let error = CoreError::validation("Invalid input");

    match error {
        CoreError::Validation(msg) => assert_eq!(msg, "Invalid input"),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_core_error_not_found() {
    let error = CoreError::not_found("Account 999 not found");

    match error {
        CoreError::NotFound(msg) => assert!(msg.contains("999")),
        _ => panic!("Expected NotFound error"),
    }
}

#[test]
fn test_money_error_converts() {
    let error: CoreError =
        MoneyError::CurrencyMismatch("EUR".to_string(), "USD".to_string()).into();
    assert!(matches!(error, CoreError::Money(_)));
    assert!(error.to_string().contains("EUR"));
}

#[test]
fn test_temporal_error_converts() {
    let error: CoreError = TemporalError::InvalidDayOfMonth(42).into();
    assert!(matches!(error, CoreError::Temporal(_)));
    assert!(error.to_string().contains("42"));
}

#[test]
fn test_port_error_converts() {
    let error: CoreError = PortError::conflict("duplicate entry number").into();
    assert!(matches!(error, CoreError::Store(_)));
    assert!(error.to_string().contains("duplicate"));
}
