//! `PKPayment` → [`PaymentResult`] mapping.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::tables;
use crate::model::{Contact, PaymentMethod, PaymentResult, PaymentToken, SecureElementPass};
use crate::platform::{FailureReason, ResponseMapper};

/// `PKPaymentMethod` as reported by the Swift shim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplePayPaymentMethod {
    #[serde(default)]
    pub display_name: Option<String>,
    /// `PKPaymentNetwork` raw value, e.g. `"MasterCard"`.
    #[serde(default)]
    pub network: Option<String>,
    /// `PKPaymentMethodType` raw value.
    #[serde(default, rename = "type")]
    pub method_type: u32,
    #[serde(default)]
    pub secure_element_pass: Option<SecureElementPass>,
    #[serde(default)]
    pub billing_address: Option<Contact>,
}

/// `PKPaymentToken`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplePayPaymentToken {
    pub payment_method: ApplePayPaymentMethod,
    #[serde(default)]
    pub transaction_identifier: String,
    /// Raw `paymentData` bytes.
    pub payment_data: Vec<u8>,
}

impl std::fmt::Debug for ApplePayPaymentToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplePayPaymentToken")
            .field("payment_method", &self.payment_method)
            .field("transaction_identifier", &self.transaction_identifier)
            .field("payment_data", &format_args!("<{} bytes>", self.payment_data.len()))
            .finish()
    }
}

/// `PKPayment` delivered by `didAuthorizePayment`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplePayPayment {
    pub token: ApplePayPaymentToken,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ApplePayResponseMapper;

impl ApplePayResponseMapper {
    pub fn new() -> Self {
        Self
    }

    fn payment_method(method: ApplePayPaymentMethod) -> PaymentMethod {
        PaymentMethod {
            display_name: method.display_name,
            network: method.network.as_deref().map(tables::from_native_network),
            method_type: tables::from_native_method_type(method.method_type),
            secure_element_pass: method.secure_element_pass,
            billing_address: method.billing_address,
        }
    }
}

impl ResponseMapper for ApplePayResponseMapper {
    type Success = ApplePayPayment;

    fn from_native_success(&self, payment: ApplePayPayment) -> PaymentResult {
        let token = payment.token;
        if token.payment_data.is_empty() {
            return self.from_native_failure(FailureReason::MalformedResponse(
                "payment token is empty".to_string(),
            ));
        }

        // Simulator and some test cards report an empty identifier.
        let transaction_identifier = if token.transaction_identifier.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            token.transaction_identifier
        };

        let token = PaymentToken {
            payment_method: Self::payment_method(token.payment_method),
            transaction_identifier,
            payment_data: STANDARD.encode(&token.payment_data),
        };

        PaymentResult::success(Uuid::new_v4().to_string(), token)
    }
}
