//! Request and native payload fixtures.

use rust_decimal::Decimal;

use crate::model::{CommonNetworks, PaymentItem, PaymentRequest};
use crate::platform::apple::{ApplePayPayment, ApplePayPaymentMethod, ApplePayPaymentToken};
use crate::platform::google::GooglePayPaymentData;

/// Coffee 4.99 plus tax 0.50, totalling 5.49 USD.
pub fn coffee_request() -> PaymentRequest {
    PaymentRequest::new("merchant.com.example", "US", "USD")
        .with_item(PaymentItem::final_item("Coffee", Decimal::new(499, 2)))
        .with_item(PaymentItem::final_item("Tax", Decimal::new(50, 2)))
        .with_supported_networks(CommonNetworks::all())
        .with_merchant_capabilities(vec!["3DS".to_string()])
}

/// A Visa debit `PKPayment` carrying `payment_data`.
pub fn apple_payment(payment_data: &[u8]) -> ApplePayPayment {
    ApplePayPayment {
        token: ApplePayPaymentToken {
            payment_method: ApplePayPaymentMethod {
                display_name: Some("Visa 0492".to_string()),
                network: Some("Visa".to_string()),
                method_type: 1,
                ..Default::default()
            },
            transaction_identifier: "5394D1B9C5B2E5F6A1B0".to_string(),
            payment_data: payment_data.to_vec(),
        },
    }
}

/// `PaymentData.toJson()` for a Mastercard ending in 4444.
pub const GOOGLE_PAYMENT_DATA_JSON: &str = r#"{
  "apiVersion": 2,
  "apiVersionMinor": 0,
  "paymentMethodData": {
    "type": "CARD",
    "description": "Mastercard •••• 4444",
    "info": {
      "cardNetwork": "MASTERCARD",
      "cardDetails": "4444"
    },
    "tokenizationData": {
      "type": "PAYMENT_GATEWAY",
      "token": "{\"signature\":\"MEUCIQ\",\"protocolVersion\":\"ECv2\"}"
    }
  }
}"#;

pub fn google_payment_data() -> GooglePayPaymentData {
    GooglePayPaymentData::new(GOOGLE_PAYMENT_DATA_JSON)
}
