//! Canonical payment results.
//!
//! `PaymentResult`, `PaymentToken` and `PaymentMethod` are produced by the
//! response mappers through [`PaymentResult::success`] and
//! [`PaymentResult::failure`], which uphold the success/token/error
//! invariant. Fields are public, so a value assembled by hand or
//! deserialized can break it; [`PaymentResult::is_consistent`] checks.

use serde::{Deserialize, Serialize};

use crate::model::contact::{Contact, SecureElementPass};
use crate::model::network::PaymentNetwork;

/// Funding type of the presented card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethodType {
    #[default]
    Unknown,
    Debit,
    Credit,
    Prepaid,
    Store,
}

impl PaymentMethodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Debit => "debit",
            Self::Credit => "credit",
            Self::Prepaid => "prepaid",
            Self::Store => "store",
        }
    }
}

/// The card the shopper authorized with.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub display_name: Option<String>,
    pub network: Option<PaymentNetwork>,
    #[serde(rename = "type")]
    pub method_type: PaymentMethodType,
    pub secure_element_pass: Option<SecureElementPass>,
    pub billing_address: Option<Contact>,
}

/// Authorization token to forward to a payment processor.
///
/// `payment_data` is opaque and relayed unchanged.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentToken {
    pub payment_method: PaymentMethod,
    pub transaction_identifier: String,
    pub payment_data: String,
}

impl std::fmt::Debug for PaymentToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentToken")
            .field("payment_method", &self.payment_method)
            .field("transaction_identifier", &self.transaction_identifier)
            .field("payment_data", &format_args!("<{} bytes>", self.payment_data.len()))
            .finish()
    }
}

/// Terminal outcome of one authorization attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    pub success: bool,
    pub transaction_id: Option<String>,
    pub token: Option<PaymentToken>,
    pub error: Option<String>,
}

impl PaymentResult {
    /// Create a successful result.
    pub fn success(transaction_id: impl Into<String>, token: PaymentToken) -> Self {
        Self {
            success: true,
            transaction_id: Some(transaction_id.into()),
            token: Some(token),
            error: None,
        }
    }

    /// Create a failed result.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            transaction_id: None,
            token: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Check the success/token/error invariant.
    pub fn is_consistent(&self) -> bool {
        if self.success {
            self.token.is_some() && self.transaction_id.is_some() && self.error.is_none()
        } else {
            self.token.is_none()
        }
    }
}

/// Point-in-time wallet capability snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayServiceStatus {
    pub can_make_payments: bool,
    pub can_setup_cards: bool,
}

impl PayServiceStatus {
    pub fn new(can_make_payments: bool, can_setup_cards: bool) -> Self {
        Self {
            can_make_payments,
            can_setup_cards,
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> PaymentToken {
        PaymentToken {
            payment_method: PaymentMethod::default(),
            transaction_identifier: "tx-1".into(),
            payment_data: "opaque".into(),
        }
    }

    #[test]
    fn test_constructors_hold_invariant() {
        let ok = PaymentResult::success("tx-1", token());
        assert!(ok.is_success());
        assert!(ok.is_consistent());

        let failed = PaymentResult::failure("Payment cancelled by user");
        assert!(!failed.is_success());
        assert!(failed.is_consistent());
        assert!(failed.transaction_id.is_none());
        assert_eq!(failed.error.as_deref(), Some("Payment cancelled by user"));
    }

    #[test]
    fn test_inconsistent_result_detected() {
        let mut broken = PaymentResult::failure("x");
        broken.token = Some(token());
        assert!(!broken.is_consistent());
    }

    #[test]
    fn test_token_debug_hides_payment_data() {
        let debug = format!("{:?}", token());
        assert!(!debug.contains("opaque"));
        assert!(debug.contains("6 bytes"));
    }

    #[test]
    fn test_result_json_shape() {
        let json = serde_json::to_value(PaymentResult::failure("boom")).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["transactionId"].is_null());
        assert_eq!(json["error"], "boom");
    }
}
