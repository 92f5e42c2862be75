//! Google Pay `PaymentDataRequest` / `IsReadyToPayRequest` builders.
//!
//! Payloads serialize to the Wallet API JSON the Kotlin shim passes to
//! `PaymentDataRequest.fromJson`.

use serde::Serialize;

use super::tables;
use crate::config::Environment;
use crate::constants::{google, DEFAULT_MERCHANT_NAME};
use crate::model::{format_amount, PaymentItem, PaymentItemType, PaymentNetwork, PaymentRequest};
use crate::platform::RequestBuilder;
use crate::Result;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantInfo {
    pub merchant_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BillingAddressParameters {
    pub format: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardParameters {
    pub allowed_auth_methods: Vec<String>,
    pub allowed_card_networks: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address_parameters: Option<BillingAddressParameters>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayParameters {
    pub gateway: String,
    pub gateway_merchant_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenizationSpecification {
    #[serde(rename = "type")]
    pub spec_type: String,
    pub parameters: GatewayParameters,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPaymentMethod {
    #[serde(rename = "type")]
    pub method_type: String,
    pub parameters: CardParameters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokenization_specification: Option<TokenizationSpecification>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayItem {
    pub label: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub price: String,
    pub status: String,
}

impl From<&PaymentItem> for DisplayItem {
    fn from(item: &PaymentItem) -> Self {
        Self {
            label: item.label.clone(),
            item_type: google::LINE_ITEM_TYPE.to_string(),
            price: format_amount(item.amount),
            status: match item.item_type {
                PaymentItemType::Final => google::STATUS_FINAL,
                PaymentItemType::Pending => google::STATUS_PENDING,
            }
            .to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInfo {
    pub total_price_status: String,
    pub total_price: String,
    pub total_price_label: String,
    pub currency_code: String,
    pub country_code: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub display_items: Vec<DisplayItem>,
}

/// `PaymentDataRequest` JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GooglePayRequest {
    pub api_version: u32,
    pub api_version_minor: u32,
    pub merchant_info: MerchantInfo,
    pub allowed_payment_methods: Vec<CardPaymentMethod>,
    pub transaction_info: TransactionInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address_required: Option<bool>,
    /// Wallet environment the Kotlin shim must create its client with.
    #[serde(skip)]
    pub environment: Environment,
}

impl GooglePayRequest {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// `IsReadyToPayRequest` JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IsReadyToPayRequest {
    pub api_version: u32,
    pub api_version_minor: u32,
    pub allowed_payment_methods: Vec<CardPaymentMethod>,
}

impl IsReadyToPayRequest {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Builds [`GooglePayRequest`] payloads.
#[derive(Clone, Copy, Debug, Default)]
pub struct GooglePayRequestBuilder;

impl GooglePayRequestBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Readiness probe with the default card networks and no tokenization.
    pub fn is_ready_to_pay_request(&self) -> IsReadyToPayRequest {
        IsReadyToPayRequest {
            api_version: google::API_VERSION,
            api_version_minor: google::API_VERSION_MINOR,
            allowed_payment_methods: vec![Self::card_method(default_card_networks(), None, false)],
        }
    }

    fn card_method(
        networks: Vec<String>,
        tokenization: Option<TokenizationSpecification>,
        billing_address_required: bool,
    ) -> CardPaymentMethod {
        CardPaymentMethod {
            method_type: google::PAYMENT_METHOD_CARD.to_string(),
            parameters: CardParameters {
                allowed_auth_methods: vec![
                    google::AUTH_PAN_ONLY.to_string(),
                    google::AUTH_CRYPTOGRAM_3DS.to_string(),
                ],
                allowed_card_networks: networks,
                billing_address_required: billing_address_required.then_some(true),
                billing_address_parameters: billing_address_required.then(|| {
                    BillingAddressParameters {
                        format: google::BILLING_ADDRESS_FORMAT_FULL.to_string(),
                    }
                }),
            },
            tokenization_specification: tokenization,
        }
    }

    /// Unmapped entries are dropped; the result may be empty.
    fn card_networks(networks: &[String]) -> Vec<String> {
        networks
            .iter()
            .filter_map(|s| PaymentNetwork::parse(s))
            .filter_map(tables::to_native_network)
            .map(str::to_string)
            .collect()
    }

    fn tokenization(request: &PaymentRequest, environment: Environment) -> TokenizationSpecification {
        let options = &request.google_pay;
        let gateway_merchant_id = match (&options.gateway_merchant_id, environment) {
            (Some(id), _) => id.clone(),
            (None, Environment::Production) => request.merchant_identifier.clone(),
            (None, Environment::Test) => google::DEFAULT_GATEWAY_MERCHANT_ID.to_string(),
        };
        TokenizationSpecification {
            spec_type: google::TOKENIZATION_PAYMENT_GATEWAY.to_string(),
            parameters: GatewayParameters {
                gateway: options
                    .gateway
                    .clone()
                    .unwrap_or_else(|| google::DEFAULT_GATEWAY.to_string()),
                gateway_merchant_id,
            },
        }
    }
}

fn default_card_networks() -> Vec<String> {
    google::DEFAULT_CARD_NETWORKS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl RequestBuilder for GooglePayRequestBuilder {
    type Payload = GooglePayRequest;

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, request), fields(items = request.items.len(), env = %environment)))]
    fn build(&self, request: &PaymentRequest, environment: Environment) -> Result<GooglePayRequest> {
        request.validate()?;

        let card = Self::card_method(
            Self::card_networks(&request.supported_networks),
            Some(Self::tokenization(request, environment)),
            request.requires_billing_contact(),
        );

        Ok(GooglePayRequest {
            api_version: google::API_VERSION,
            api_version_minor: google::API_VERSION_MINOR,
            merchant_info: MerchantInfo {
                merchant_name: request
                    .merchant_name
                    .clone()
                    .unwrap_or_else(|| DEFAULT_MERCHANT_NAME.to_string()),
                merchant_id: environment
                    .is_production()
                    .then(|| request.merchant_identifier.clone()),
            },
            allowed_payment_methods: vec![card],
            transaction_info: TransactionInfo {
                total_price_status: google::TOTAL_PRICE_STATUS_FINAL.to_string(),
                total_price: format_amount(request.total()?),
                total_price_label: google::TOTAL_PRICE_LABEL_DEFAULT.to_string(),
                currency_code: request.currency_code.clone(),
                country_code: request.country_code.clone(),
                display_items: request.items.iter().map(DisplayItem::from).collect(),
            },
            shipping_address_required: request.requires_shipping_contact().then_some(true),
            environment,
        })
    }
}
