//! Assertion helpers for payment results.

use crate::model::PaymentResult;

/// Assert that `result` is a well-formed success.
///
/// # Panics
/// Panics if the payment did not succeed or the result is inconsistent.
pub fn assert_payment_succeeded(result: &PaymentResult) {
    assert!(
        result.success,
        "Payment should have succeeded, got error: {:?}",
        result.error
    );
    assert!(result.token.is_some(), "Successful payment must carry a token");
    assert!(
        result.transaction_id.is_some(),
        "Successful payment must carry a transaction id"
    );
    assert!(
        result.error.is_none(),
        "Successful payment must not carry an error"
    );
}

/// Assert that `result` is a failure with exactly `expected_error`.
///
/// # Panics
/// Panics if the payment succeeded or the error differs.
pub fn assert_payment_failed(result: &PaymentResult, expected_error: &str) {
    assert!(!result.success, "Payment should have failed");
    assert!(result.token.is_none(), "Failed payment must not carry a token");
    assert_eq!(result.error.as_deref(), Some(expected_error));
}
