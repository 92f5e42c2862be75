//! Canonical payment request types and amount helpers.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::GooglePayOptions;
use crate::constants::AMOUNT_DECIMAL_PLACES;
use crate::model::network::CommonNetworks;
use crate::{Result, WalletPayError};

/// Whether a line amount is final or an estimate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentItemType {
    #[default]
    Final,
    Pending,
}

/// One priced line of a purchase.
///
/// Currency comes from the enclosing [`PaymentRequest`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentItem {
    pub label: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "type", default)]
    pub item_type: PaymentItemType,
}

impl PaymentItem {
    pub fn new(label: impl Into<String>, amount: Decimal, item_type: PaymentItemType) -> Self {
        Self {
            label: label.into(),
            amount,
            item_type,
        }
    }

    /// A line with a confirmed amount.
    pub fn final_item(label: impl Into<String>, amount: Decimal) -> Self {
        Self::new(label, amount, PaymentItemType::Final)
    }

    /// A line whose amount is an estimate (e.g. shipping before address entry).
    pub fn pending(label: impl Into<String>, amount: Decimal) -> Self {
        Self::new(label, amount, PaymentItemType::Pending)
    }

    /// Amount formatted with exactly two decimals.
    pub fn formatted_amount(&self) -> String {
        format_amount(self.amount)
    }
}

/// A vendor-neutral description of a purchase.
///
/// `items` are in display order; wallets that show a total line use the
/// recomputed sum, never a caller-provided total.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub merchant_identifier: String,
    pub country_code: String,
    pub currency_code: String,
    #[serde(rename = "paymentItems")]
    pub items: Vec<PaymentItem>,
    #[serde(default)]
    pub merchant_capabilities: Vec<String>,
    #[serde(default)]
    pub supported_networks: Vec<String>,
    #[serde(default)]
    pub shipping_type: Option<String>,
    #[serde(default)]
    pub shipping_methods: Option<Vec<PaymentItem>>,
    #[serde(default)]
    pub billing_contact_required: Option<bool>,
    #[serde(default)]
    pub shipping_contact_required: Option<bool>,
    #[serde(default)]
    pub merchant_name: Option<String>,
    #[serde(default)]
    pub google_pay: GooglePayOptions,
}

impl PaymentRequest {
    /// Create a request with no items and no network/capability restrictions.
    pub fn new(
        merchant_identifier: impl Into<String>,
        country_code: impl Into<String>,
        currency_code: impl Into<String>,
    ) -> Self {
        Self {
            merchant_identifier: merchant_identifier.into(),
            country_code: country_code.into(),
            currency_code: currency_code.into(),
            items: Vec::new(),
            merchant_capabilities: Vec::new(),
            supported_networks: Vec::new(),
            shipping_type: None,
            shipping_methods: None,
            billing_contact_required: None,
            shipping_contact_required: None,
            merchant_name: None,
            google_pay: GooglePayOptions::default(),
        }
    }

    /// Single-item request with `US`/`USD`, the common networks and `3DS`.
    pub fn simple(
        merchant_identifier: impl Into<String>,
        amount: Decimal,
        label: impl Into<String>,
    ) -> Self {
        Self::new(merchant_identifier, "US", "USD")
            .with_item(PaymentItem::final_item(label, amount))
            .with_supported_networks(CommonNetworks::all())
            .with_merchant_capabilities(vec!["3DS".to_string()])
    }

    pub fn with_item(mut self, item: PaymentItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = PaymentItem>) -> Self {
        self.items.extend(items);
        self
    }

    pub fn with_supported_networks(mut self, networks: Vec<String>) -> Self {
        self.supported_networks = networks;
        self
    }

    pub fn with_merchant_capabilities(mut self, capabilities: Vec<String>) -> Self {
        self.merchant_capabilities = capabilities;
        self
    }

    pub fn with_merchant_name(mut self, name: impl Into<String>) -> Self {
        self.merchant_name = Some(name.into());
        self
    }

    pub fn with_shipping_type(mut self, shipping_type: impl Into<String>) -> Self {
        self.shipping_type = Some(shipping_type.into());
        self
    }

    pub fn with_shipping_methods(mut self, methods: Vec<PaymentItem>) -> Self {
        self.shipping_methods = Some(methods);
        self
    }

    pub fn with_billing_contact_required(mut self, required: bool) -> Self {
        self.billing_contact_required = Some(required);
        self
    }

    pub fn with_shipping_contact_required(mut self, required: bool) -> Self {
        self.shipping_contact_required = Some(required);
        self
    }

    pub fn with_google_pay(mut self, options: GooglePayOptions) -> Self {
        self.google_pay = options;
        self
    }

    /// Sum of all item amounts. Fails if the sum overflows.
    pub fn total(&self) -> Result<Decimal> {
        calculate_total(&self.items)
    }

    pub fn requires_billing_contact(&self) -> bool {
        self.billing_contact_required.unwrap_or(false)
    }

    pub fn requires_shipping_contact(&self) -> bool {
        self.shipping_contact_required.unwrap_or(false)
    }

    /// Check the request before any native work happens.
    pub fn validate(&self) -> Result<()> {
        if self.merchant_identifier.trim().is_empty() {
            return Err(WalletPayError::invalid_data(
                "merchantIdentifier",
                "must not be empty",
            ));
        }
        if self.country_code.len() != 2 {
            return Err(WalletPayError::invalid_data(
                "countryCode",
                format!("expected ISO 3166-1 alpha-2, got '{}'", self.country_code),
            ));
        }
        if self.currency_code.len() != 3 {
            return Err(WalletPayError::invalid_data(
                "currencyCode",
                format!("expected ISO 4217, got '{}'", self.currency_code),
            ));
        }
        if self.items.is_empty() {
            return Err(WalletPayError::ValidationFailed(
                "payment request has no items".to_string(),
            ));
        }
        let shipping = self.shipping_methods.iter().flatten();
        for item in self.items.iter().chain(shipping) {
            if item.amount.is_sign_negative() && !item.amount.is_zero() {
                return Err(WalletPayError::invalid_data(
                    "amount",
                    format!("'{}' has negative amount {}", item.label, item.amount),
                ));
            }
        }
        self.total().map(|_| ())
    }
}

/// Sum the amounts of `items`.
pub fn calculate_total(items: &[PaymentItem]) -> Result<Decimal> {
    items.iter().try_fold(Decimal::ZERO, |acc, item| {
        acc.checked_add(item.amount)
            .ok_or_else(|| WalletPayError::invalid_data("amount", "total overflows"))
    })
}

/// Format an amount with exactly two decimals, rounding half away from zero.
pub fn format_amount(amount: Decimal) -> String {
    let rounded =
        amount.round_dp_with_strategy(AMOUNT_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Parse a decimal amount string such as `"29.99"`.
pub fn parse_amount(value: &str) -> Result<Decimal> {
    value
        .trim()
        .parse::<Decimal>()
        .map_err(|e| WalletPayError::invalid_data("amount", format!("'{}': {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_total_and_format() {
        let request = PaymentRequest::new("merchant.com.example", "US", "USD")
            .with_item(PaymentItem::final_item("Coffee", dec("4.99")))
            .with_item(PaymentItem::final_item("Tax", dec("0.50")));
        assert_eq!(request.total().unwrap(), dec("5.49"));
        assert_eq!(format_amount(request.total().unwrap()), "5.49");
    }

    #[test]
    fn test_total_overflow_is_rejected() {
        let request = PaymentRequest::new("merchant.com.example", "US", "USD")
            .with_item(PaymentItem::final_item("Big", Decimal::MAX))
            .with_item(PaymentItem::final_item("Bigger", Decimal::MAX));
        let err = request.validate().unwrap_err();
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("total overflows"));
        assert!(calculate_total(&request.items).is_err());
    }

    #[test]
    fn test_format_amount_pads_and_rounds() {
        assert_eq!(format_amount(dec("29.9")), "29.90");
        assert_eq!(format_amount(dec("100")), "100.00");
        assert_eq!(format_amount(dec("0.125")), "0.13");
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("29.99").unwrap(), dec("29.99"));
        assert_eq!(parse_amount(" 100 ").unwrap(), dec("100"));
        assert!(parse_amount("abc").is_err());
    }

    #[test]
    fn test_simple_request_defaults() {
        let request = PaymentRequest::simple("merchant.com.example", dec("29.99"), "Coffee");
        assert_eq!(request.country_code, "US");
        assert_eq!(request.currency_code, "USD");
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].item_type, PaymentItemType::Final);
        assert_eq!(
            request.supported_networks,
            vec!["visa", "mastercard", "amex", "discover"]
        );
        assert_eq!(request.merchant_capabilities, vec!["3DS"]);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_items() {
        let request = PaymentRequest::new("merchant.com.example", "US", "USD");
        let err = request.validate().unwrap_err();
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("no items"));
    }

    #[test]
    fn test_validate_rejects_negative_amounts() {
        let request = PaymentRequest::new("merchant.com.example", "US", "USD")
            .with_item(PaymentItem::final_item("Refund", dec("-1.00")));
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_request_json_shape() {
        let json = r#"{
            "merchantIdentifier": "merchant.com.example",
            "countryCode": "US",
            "currencyCode": "USD",
            "paymentItems": [{"label": "Coffee", "amount": 4.99, "type": "final"}],
            "merchantCapabilities": ["3DS"],
            "supportedNetworks": ["visa"],
            "billingContactRequired": true
        }"#;
        let request: PaymentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.items[0].amount, dec("4.99"));
        assert!(request.requires_billing_contact());
        assert!(!request.requires_shipping_contact());
        assert!(request.google_pay.gateway.is_none());
    }
}
