//! `PKPaymentRequest` builder.

use serde::Serialize;

use super::tables::{self, ContactField, ShippingType, REQUIRED_CONTACT_FIELDS};
use crate::config::Environment;
use crate::constants::DEFAULT_MERCHANT_NAME;
use crate::model::{
    format_amount, MerchantCapabilities, PaymentItem, PaymentItemType, PaymentNetwork,
    PaymentRequest,
};
use crate::platform::RequestBuilder;
use crate::Result;

/// `PKPaymentSummaryItemType`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryItemType {
    Final,
    Pending,
}

impl From<PaymentItemType> for SummaryItemType {
    fn from(value: PaymentItemType) -> Self {
        match value {
            PaymentItemType::Final => Self::Final,
            PaymentItemType::Pending => Self::Pending,
        }
    }
}

/// `PKPaymentSummaryItem` with a two-decimal amount string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryItem {
    pub label: String,
    pub amount: String,
    #[serde(rename = "type")]
    pub item_type: SummaryItemType,
}

impl From<&PaymentItem> for SummaryItem {
    fn from(item: &PaymentItem) -> Self {
        Self {
            label: item.label.clone(),
            amount: format_amount(item.amount),
            item_type: item.item_type.into(),
        }
    }
}

/// `PKShippingMethod`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingMethod {
    pub identifier: String,
    #[serde(flatten)]
    pub item: SummaryItem,
}

/// Native Apple Pay request handed to the Swift shim.
///
/// `merchant_identifier` is only present for `Production`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplePayRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_identifier: Option<String>,
    pub country_code: String,
    pub currency_code: String,
    pub payment_summary_items: Vec<SummaryItem>,
    /// Recomputed total, labeled with the merchant name.
    pub total: SummaryItem,
    pub merchant_capabilities: MerchantCapabilities,
    pub supported_networks: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_type: Option<ShippingType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shipping_methods: Vec<ShippingMethod>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required_billing_contact_fields: Vec<ContactField>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required_shipping_contact_fields: Vec<ContactField>,
}

impl ApplePayRequest {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Builds [`ApplePayRequest`] payloads.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApplePayRequestBuilder;

impl ApplePayRequestBuilder {
    pub fn new() -> Self {
        Self
    }

    fn supported_networks(networks: &[String]) -> Vec<String> {
        networks
            .iter()
            .filter_map(|s| PaymentNetwork::parse(s))
            .filter_map(tables::to_native_network)
            .map(str::to_string)
            .collect()
    }

    fn total(request: &PaymentRequest) -> Result<SummaryItem> {
        let any_pending = request
            .items
            .iter()
            .any(|i| i.item_type == PaymentItemType::Pending);
        Ok(SummaryItem {
            label: request
                .merchant_name
                .clone()
                .unwrap_or_else(|| DEFAULT_MERCHANT_NAME.to_string()),
            amount: format_amount(request.total()?),
            item_type: if any_pending {
                SummaryItemType::Pending
            } else {
                SummaryItemType::Final
            },
        })
    }
}

impl RequestBuilder for ApplePayRequestBuilder {
    type Payload = ApplePayRequest;

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, request), fields(items = request.items.len(), env = %environment)))]
    fn build(&self, request: &PaymentRequest, environment: Environment) -> Result<ApplePayRequest> {
        request.validate()?;

        let contact_fields = |required: bool| {
            if required {
                REQUIRED_CONTACT_FIELDS.to_vec()
            } else {
                Vec::new()
            }
        };

        Ok(ApplePayRequest {
            merchant_identifier: environment
                .is_production()
                .then(|| request.merchant_identifier.clone()),
            country_code: request.country_code.clone(),
            currency_code: request.currency_code.clone(),
            payment_summary_items: request.items.iter().map(SummaryItem::from).collect(),
            total: Self::total(request)?,
            merchant_capabilities: MerchantCapabilities::from_tags(&request.merchant_capabilities),
            supported_networks: Self::supported_networks(&request.supported_networks),
            shipping_type: request.shipping_type.as_deref().map(ShippingType::from_tag),
            shipping_methods: request
                .shipping_methods
                .iter()
                .flatten()
                .map(|m| ShippingMethod {
                    identifier: m.label.clone(),
                    item: m.into(),
                })
                .collect(),
            required_billing_contact_fields: contact_fields(request.requires_billing_contact()),
            required_shipping_contact_fields: contact_fields(request.requires_shipping_contact()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn coffee_request() -> PaymentRequest {
        PaymentRequest::new("merchant.com.example", "US", "USD")
            .with_item(PaymentItem::final_item("Coffee", dec("4.99")))
            .with_item(PaymentItem::final_item("Tax", dec("0.50")))
            .with_supported_networks(vec!["visa".into(), "amex".into(), "klarna".into()])
            .with_merchant_capabilities(vec!["3DS".into(), "Credit".into(), "NFC".into()])
    }

    #[test]
    fn test_items_map_one_to_one() {
        let payload = ApplePayRequestBuilder::new()
            .build(&coffee_request(), Environment::Test)
            .unwrap();
        assert_eq!(payload.payment_summary_items.len(), 2);
        assert_eq!(payload.payment_summary_items[0].label, "Coffee");
        assert_eq!(payload.payment_summary_items[0].amount, "4.99");
        assert_eq!(payload.payment_summary_items[1].amount, "0.50");
        assert_eq!(payload.total.amount, "5.49");
        assert_eq!(payload.total.label, DEFAULT_MERCHANT_NAME);
        assert_eq!(payload.total.item_type, SummaryItemType::Final);
    }

    #[test]
    fn test_pending_items_mark_total_pending() {
        let request = coffee_request().with_item(PaymentItem::pending("Shipping", dec("5")));
        let payload = ApplePayRequestBuilder::new()
            .build(&request, Environment::Test)
            .unwrap();
        assert_eq!(payload.payment_summary_items[2].item_type, SummaryItemType::Pending);
        assert_eq!(payload.total.item_type, SummaryItemType::Pending);
        assert_eq!(payload.total.amount, "10.49");
    }

    #[test]
    fn test_merchant_identifier_only_in_production() {
        let builder = ApplePayRequestBuilder::new();
        let test = builder.build(&coffee_request(), Environment::Test).unwrap();
        assert!(test.merchant_identifier.is_none());
        assert!(!test.to_json().unwrap().contains("merchant.com.example"));

        let prod = builder
            .build(&coffee_request(), Environment::Production)
            .unwrap();
        assert_eq!(prod.merchant_identifier.as_deref(), Some("merchant.com.example"));
    }

    #[test]
    fn test_networks_and_capabilities() {
        let payload = ApplePayRequestBuilder::new()
            .build(&coffee_request(), Environment::Test)
            .unwrap();
        assert_eq!(payload.supported_networks, vec!["Visa", "AmEx"]);
        assert!(payload
            .merchant_capabilities
            .contains(MerchantCapabilities::THREE_DS | MerchantCapabilities::CREDIT));
        assert!(!payload.merchant_capabilities.contains(MerchantCapabilities::EMV));
    }

    #[test]
    fn test_contact_and_shipping() {
        let request = coffee_request()
            .with_billing_contact_required(true)
            .with_shipping_type("storePickup")
            .with_shipping_methods(vec![PaymentItem::final_item("Express", dec("9.5"))]);
        let payload = ApplePayRequestBuilder::new()
            .build(&request, Environment::Test)
            .unwrap();
        assert_eq!(
            payload.required_billing_contact_fields,
            vec![ContactField::PostalAddress, ContactField::Name]
        );
        assert!(payload.required_shipping_contact_fields.is_empty());
        assert_eq!(payload.shipping_type, Some(ShippingType::StorePickup));
        assert_eq!(payload.shipping_methods[0].identifier, "Express");
        assert_eq!(payload.shipping_methods[0].item.amount, "9.50");

        let json: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
        assert_eq!(json["shippingMethods"][0]["label"], "Express");
        assert_eq!(json["requiredBillingContactFields"][0], "postalAddress");
    }

    #[test]
    fn test_empty_items_rejected() {
        let request = PaymentRequest::new("merchant.com.example", "US", "USD");
        assert!(ApplePayRequestBuilder::new()
            .build(&request, Environment::Test)
            .is_err());
    }
}
