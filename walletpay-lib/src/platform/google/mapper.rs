//! `PaymentData` JSON → [`PaymentResult`] mapping.

use serde::Deserialize;
use uuid::Uuid;

use super::tables;
use crate::constants::google;
use crate::model::{
    Contact, Labeled, PaymentMethod, PaymentMethodType, PaymentResult, PaymentToken,
    PostalAddress,
};
use crate::platform::{FailureReason, NativeOutcome, ResponseMapper};

/// `PaymentData.toJson()` as handed over by the Kotlin shim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GooglePayPaymentData(pub String);

impl GooglePayPaymentData {
    pub fn new(json: impl Into<String>) -> Self {
        Self(json.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentDataJson {
    payment_method_data: PaymentMethodData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentMethodData {
    tokenization_data: TokenizationData,
    info: CardInfo,
}

#[derive(Debug, Deserialize)]
struct TokenizationData {
    token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardInfo {
    #[serde(default)]
    card_network: Option<String>,
    #[serde(default)]
    card_details: Option<String>,
    #[serde(default)]
    billing_address: Option<GoogleAddress>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleAddress {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    address1: Option<String>,
    #[serde(default)]
    address2: Option<String>,
    #[serde(default)]
    address3: Option<String>,
    #[serde(default)]
    locality: Option<String>,
    #[serde(default)]
    administrative_area: Option<String>,
    #[serde(default)]
    country_code: Option<String>,
    #[serde(default)]
    postal_code: Option<String>,
    #[serde(default)]
    phone_number: Option<String>,
}

impl From<GoogleAddress> for Contact {
    fn from(address: GoogleAddress) -> Self {
        let name = address.name.unwrap_or_default();
        let (given_name, family_name) = match name.trim().split_once(char::is_whitespace) {
            Some((given, family)) => (given.to_string(), family.trim().to_string()),
            None => (name.trim().to_string(), String::new()),
        };

        let street = [&address.address1, &address.address2, &address.address3]
            .into_iter()
            .flatten()
            .filter(|line| !line.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");

        Contact {
            given_name,
            family_name,
            phone_numbers: address
                .phone_number
                .filter(|p| !p.is_empty())
                .map(Labeled::unlabeled)
                .into_iter()
                .collect(),
            postal_addresses: vec![Labeled::unlabeled(PostalAddress {
                street: (!street.is_empty()).then_some(street),
                city: address.locality,
                state: address.administrative_area,
                postal_code: address.postal_code,
                country: None,
                iso_country_code: address.country_code,
            })],
            ..Contact::default()
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GooglePayResponseMapper;

impl GooglePayResponseMapper {
    pub fn new() -> Self {
        Self
    }

    fn parse(json: &str) -> Result<PaymentToken, String> {
        let data: PaymentDataJson = serde_json::from_str(json).map_err(|e| e.to_string())?;
        let method = data.payment_method_data;
        if method.tokenization_data.token.is_empty() {
            return Err("payment token is empty".to_string());
        }

        let info = method.info;
        let display_name = format!(
            "{} {}",
            info.card_network.as_deref().unwrap_or("unknown"),
            info.card_details.as_deref().unwrap_or("****"),
        );

        Ok(PaymentToken {
            payment_method: PaymentMethod {
                display_name: Some(display_name),
                network: Some(tables::from_native_network(
                    info.card_network.as_deref().unwrap_or_default(),
                )),
                method_type: PaymentMethodType::Unknown,
                secure_element_pass: None,
                billing_address: info.billing_address.map(Contact::from),
            },
            transaction_identifier: Uuid::new_v4().to_string(),
            payment_data: method.tokenization_data.token,
        })
    }
}

impl ResponseMapper for GooglePayResponseMapper {
    type Success = GooglePayPaymentData;

    fn from_native_success(&self, payload: GooglePayPaymentData) -> PaymentResult {
        match Self::parse(payload.as_str()) {
            Ok(token) => PaymentResult::success(Uuid::new_v4().to_string(), token),
            Err(reason) => self.from_native_failure(FailureReason::MalformedResponse(reason)),
        }
    }
}

/// What `onActivityResult` delivered for a `loadPaymentData` resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoogleActivityResult {
    pub request_code: i32,
    pub result_code: i32,
    /// `PaymentData.toJson()`, present on `RESULT_OK`.
    pub payment_data_json: Option<String>,
    /// `AutoResolveHelper` status message, present on `RESULT_ERROR`.
    pub status_message: Option<String>,
}

impl GoogleActivityResult {
    /// Classify the activity result, or `None` when it belongs to a different request.
    pub fn into_outcome(self) -> Option<NativeOutcome<GooglePayPaymentData>> {
        if self.request_code != google::LOAD_PAYMENT_DATA_REQUEST_CODE {
            return None;
        }
        let outcome = match self.result_code {
            google::RESULT_OK => match self.payment_data_json {
                Some(json) => NativeOutcome::Authorized(GooglePayPaymentData(json)),
                None => NativeOutcome::Failed(FailureReason::NoPaymentData),
            },
            google::RESULT_CANCELED => NativeOutcome::cancelled(),
            google::RESULT_ERROR => NativeOutcome::error(self.status_message),
            code => NativeOutcome::Failed(FailureReason::UnexpectedResultCode(code)),
        };
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PaymentNetwork;

    const PAYMENT_DATA: &str = r#"{
        "apiVersion": 2,
        "apiVersionMinor": 0,
        "paymentMethodData": {
            "type": "CARD",
            "description": "Visa •••• 1111",
            "info": {
                "cardNetwork": "VISA",
                "cardDetails": "1111",
                "billingAddress": {
                    "name": "Jane Q Doe",
                    "address1": "1 Main St",
                    "address2": "Apt 2",
                    "locality": "Springfield",
                    "administrativeArea": "IL",
                    "countryCode": "US",
                    "postalCode": "62701"
                }
            },
            "tokenizationData": {
                "type": "PAYMENT_GATEWAY",
                "token": "examplePaymentMethodToken"
            }
        }
    }"#;

    #[test]
    fn test_success_maps_token() {
        let result =
            GooglePayResponseMapper::new().from_native_success(GooglePayPaymentData::new(PAYMENT_DATA));
        assert!(result.is_consistent());
        let token = result.token.unwrap();
        assert_eq!(token.payment_data, "examplePaymentMethodToken");
        assert_eq!(token.payment_method.display_name.as_deref(), Some("VISA 1111"));
        assert_eq!(token.payment_method.network, Some(PaymentNetwork::Visa));
        assert_eq!(token.payment_method.method_type, PaymentMethodType::Unknown);
        assert!(Uuid::parse_str(&token.transaction_identifier).is_ok());
        assert_ne!(
            result.transaction_id.as_deref(),
            Some(token.transaction_identifier.as_str())
        );

        let contact = token.payment_method.billing_address.unwrap();
        assert_eq!(contact.given_name, "Jane");
        assert_eq!(contact.family_name, "Q Doe");
        let address = &contact.postal_addresses[0].value;
        assert_eq!(address.street.as_deref(), Some("1 Main St\nApt 2"));
        assert_eq!(address.iso_country_code.as_deref(), Some("US"));
    }

    #[test]
    fn test_missing_card_info_defaults() {
        let json = r#"{"paymentMethodData":{"info":{},"tokenizationData":{"token":"t"}}}"#;
        let token = GooglePayResponseMapper::new()
            .from_native_success(GooglePayPaymentData::new(json))
            .token
            .unwrap();
        assert_eq!(token.payment_method.display_name.as_deref(), Some("unknown ****"));
        assert_eq!(token.payment_method.network, Some(PaymentNetwork::Visa));
        assert!(token.payment_method.billing_address.is_none());
    }

    #[test]
    fn test_malformed_payload() {
        let result = GooglePayResponseMapper::new()
            .from_native_success(GooglePayPaymentData::new("{\"paymentMethodData\":{}}"));
        assert!(!result.success);
        assert!(result.token.is_none());
        assert!(result
            .error
            .unwrap()
            .starts_with("Failed to parse payment data: "));
    }

    #[test]
    fn test_activity_result_classification() {
        let result = |result_code, json: Option<&str>, status: Option<&str>| GoogleActivityResult {
            request_code: google::LOAD_PAYMENT_DATA_REQUEST_CODE,
            result_code,
            payment_data_json: json.map(str::to_string),
            status_message: status.map(str::to_string),
        };

        assert!(matches!(
            result(google::RESULT_OK, Some(PAYMENT_DATA), None).into_outcome(),
            Some(NativeOutcome::Authorized(_))
        ));
        assert_eq!(
            result(google::RESULT_OK, None, None).into_outcome(),
            Some(NativeOutcome::Failed(FailureReason::NoPaymentData))
        );
        assert_eq!(
            result(google::RESULT_CANCELED, None, None).into_outcome(),
            Some(NativeOutcome::cancelled())
        );
        assert_eq!(
            result(google::RESULT_ERROR, None, Some("DEVELOPER_ERROR")).into_outcome(),
            Some(NativeOutcome::error(Some("DEVELOPER_ERROR".into())))
        );
        assert_eq!(
            result(7, None, None).into_outcome(),
            Some(NativeOutcome::Failed(FailureReason::UnexpectedResultCode(7)))
        );
    }

    #[test]
    fn test_foreign_request_code_ignored() {
        let result = GoogleActivityResult {
            request_code: 1,
            result_code: google::RESULT_OK,
            payment_data_json: Some(PAYMENT_DATA.into()),
            status_message: None,
        };
        assert!(result.into_outcome().is_none());
    }
}
