//! Walletpay Mobile FFI Bindings
//!
//! This crate provides UniFFI bindings for walletpay, letting the Swift
//! (PassKit) and Kotlin (Google Pay Wallet API) shims drive the shared
//! payment core.
//!
//! # Architecture
//!
//! - The host implements [`ApplePayHostFFI`] or [`GooglePayHostFFI`]: it
//!   answers availability queries and presents the native sheet from a JSON
//!   payload built in Rust.
//! - The host routes the sheet's delegate / activity result to the
//!   [`ApplePayCompletion`] / [`GooglePayCompletion`] object it was handed.
//! - The app calls [`PaymentHandler::start_payment`] and receives exactly one
//!   [`PaymentResultFFI`] through its [`PaymentResultCallback`].
//!
//! # Thread Safety
//!
//! All exposed types are thread-safe. `start_payment` runs on the handler's
//! Tokio runtime; hosts must hop to the main thread before touching UI.

pub mod async_bridge;
pub mod handler;
pub mod host_ffi;

pub use handler::{PaymentHandler, PaymentResultCallback};
pub use host_ffi::{
    ApplePayCompletion, ApplePayHostBridge, ApplePayHostFFI, GooglePayCompletion,
    GooglePayHostBridge, GooglePayHostFFI,
};

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use walletpay_lib::model::{
    Contact, ContactType, Labeled, PassActivationState, PostalAddress, SecureElementPass,
};
use walletpay_lib::platform::apple::{ApplePayPayment, ApplePayPaymentMethod, ApplePayPaymentToken};
use walletpay_lib::{
    Environment, GooglePayOptions, PayServiceStatus, PaymentItem, PaymentItemType, PaymentMethod,
    PaymentMethodType, PaymentRequest, PaymentResult, PaymentToken, PlatformKind, SessionConfig,
    WalletPayError,
};

// UniFFI scaffolding
uniffi::setup_scaffolding!();

// ============================================================================
// Error Types
// ============================================================================

/// Mobile-friendly error type.
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum WalletPayMobileError {
    /// Invalid request data (amounts, codes, identifiers).
    #[error("Validation error: {msg}")]
    Validation { msg: String },

    /// Nothing could be presented.
    #[error("Presentation error: {msg}")]
    Presentation { msg: String },

    /// The native platform reported an error.
    #[error("Platform error: {msg}")]
    Platform { msg: String },

    /// Serialization/deserialization error.
    #[error("Serialization error: {msg}")]
    Serialization { msg: String },

    /// Internal error (unexpected state).
    #[error("Internal error: {msg}")]
    Internal { msg: String },
}

impl From<WalletPayError> for WalletPayMobileError {
    fn from(e: WalletPayError) -> Self {
        match e {
            WalletPayError::InvalidData { field, reason } => Self::Validation {
                msg: format!("Invalid {}: {}", field, reason),
            },
            WalletPayError::ValidationFailed(msg) => Self::Validation { msg },
            WalletPayError::NetworkNotSupported(network) => Self::Validation {
                msg: format!("Payment network not supported: {}", network),
            },
            WalletPayError::SheetUnavailable(msg) => Self::Presentation { msg },
            WalletPayError::Platform(msg) => Self::Platform { msg },
            WalletPayError::Serialization(msg) => Self::Serialization { msg },
        }
    }
}

impl From<uniffi::UnexpectedUniFFICallbackError> for WalletPayMobileError {
    fn from(e: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::Internal { msg: e.reason }
    }
}

pub type Result<T> = std::result::Result<T, WalletPayMobileError>;

// ============================================================================
// Configuration
// ============================================================================

/// Wallet environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum EnvironmentFFI {
    Test,
    Production,
}

impl From<EnvironmentFFI> for Environment {
    fn from(env: EnvironmentFFI) -> Self {
        match env {
            EnvironmentFFI::Test => Environment::Test,
            EnvironmentFFI::Production => Environment::Production,
        }
    }
}

impl From<Environment> for EnvironmentFFI {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Test => Self::Test,
            Environment::Production => Self::Production,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum PlatformKindFFI {
    ApplePay,
    GooglePay,
}

impl From<PlatformKind> for PlatformKindFFI {
    fn from(kind: PlatformKind) -> Self {
        match kind {
            PlatformKind::ApplePay => Self::ApplePay,
            PlatformKind::GooglePay => Self::GooglePay,
        }
    }
}

/// Session configuration.
#[derive(Clone, Debug, uniffi::Record)]
pub struct SessionConfigFFI {
    /// Environment used when a request carries no override.
    pub environment: EnvironmentFFI,
    /// Log built native payloads at debug level.
    pub log_payloads: bool,
}

impl Default for SessionConfigFFI {
    fn default() -> Self {
        SessionConfig::default().into()
    }
}

impl From<SessionConfig> for SessionConfigFFI {
    fn from(config: SessionConfig) -> Self {
        Self {
            environment: config.environment.into(),
            log_payloads: config.log_payloads,
        }
    }
}

impl From<SessionConfigFFI> for SessionConfig {
    fn from(config: SessionConfigFFI) -> Self {
        SessionConfig::new(config.environment.into()).with_log_payloads(config.log_payloads)
    }
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum PaymentItemTypeFFI {
    Final,
    Pending,
}

/// One priced line. `amount` is in major units of the request currency.
#[derive(Clone, Debug, uniffi::Record)]
pub struct PaymentItemFFI {
    pub label: String,
    pub amount: f64,
    pub item_type: PaymentItemTypeFFI,
}

impl TryFrom<PaymentItemFFI> for PaymentItem {
    type Error = WalletPayMobileError;

    fn try_from(item: PaymentItemFFI) -> Result<Self> {
        let amount = Decimal::from_f64(item.amount).ok_or_else(|| {
            WalletPayMobileError::Validation {
                msg: format!("Invalid amount for '{}': {}", item.label, item.amount),
            }
        })?;
        let item_type = match item.item_type {
            PaymentItemTypeFFI::Final => PaymentItemType::Final,
            PaymentItemTypeFFI::Pending => PaymentItemType::Pending,
        };
        Ok(PaymentItem::new(item.label, amount, item_type))
    }
}

/// Vendor-neutral payment request.
#[derive(Clone, Debug, uniffi::Record)]
pub struct PaymentRequestFFI {
    pub merchant_identifier: String,
    pub country_code: String,
    pub currency_code: String,
    pub payment_items: Vec<PaymentItemFFI>,
    pub merchant_capabilities: Vec<String>,
    pub supported_networks: Vec<String>,
    pub shipping_type: Option<String>,
    pub shipping_methods: Option<Vec<PaymentItemFFI>>,
    pub billing_contact_required: Option<bool>,
    pub shipping_contact_required: Option<bool>,
    pub merchant_name: Option<String>,
    pub google_pay_environment: Option<EnvironmentFFI>,
    pub google_pay_gateway: Option<String>,
    pub google_pay_gateway_merchant_id: Option<String>,
}

fn convert_items(items: Vec<PaymentItemFFI>) -> Result<Vec<PaymentItem>> {
    items.into_iter().map(PaymentItem::try_from).collect()
}

impl TryFrom<PaymentRequestFFI> for PaymentRequest {
    type Error = WalletPayMobileError;

    fn try_from(request: PaymentRequestFFI) -> Result<Self> {
        let mut google_pay = GooglePayOptions::new();
        google_pay.environment = request.google_pay_environment.map(Environment::from);
        google_pay.gateway = request.google_pay_gateway;
        google_pay.gateway_merchant_id = request.google_pay_gateway_merchant_id;

        let mut converted = PaymentRequest::new(
            request.merchant_identifier,
            request.country_code,
            request.currency_code,
        )
        .with_items(convert_items(request.payment_items)?)
        .with_merchant_capabilities(request.merchant_capabilities)
        .with_supported_networks(request.supported_networks)
        .with_google_pay(google_pay);

        converted.shipping_type = request.shipping_type;
        converted.shipping_methods = request.shipping_methods.map(convert_items).transpose()?;
        converted.billing_contact_required = request.billing_contact_required;
        converted.shipping_contact_required = request.shipping_contact_required;
        converted.merchant_name = request.merchant_name;
        Ok(converted)
    }
}

// ============================================================================
// Contact Types
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, uniffi::Record)]
pub struct PostalAddressFFI {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub iso_country_code: Option<String>,
}

impl From<PostalAddress> for PostalAddressFFI {
    fn from(a: PostalAddress) -> Self {
        Self {
            street: a.street,
            city: a.city,
            state: a.state,
            postal_code: a.postal_code,
            country: a.country,
            iso_country_code: a.iso_country_code,
        }
    }
}

impl From<PostalAddressFFI> for PostalAddress {
    fn from(a: PostalAddressFFI) -> Self {
        Self {
            street: a.street,
            city: a.city,
            state: a.state,
            postal_code: a.postal_code,
            country: a.country,
            iso_country_code: a.iso_country_code,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, uniffi::Enum)]
pub enum ContactTypeFFI {
    #[default]
    Person,
    Organization,
}

impl From<ContactType> for ContactTypeFFI {
    fn from(t: ContactType) -> Self {
        match t {
            ContactType::Person => Self::Person,
            ContactType::Organization => Self::Organization,
        }
    }
}

impl From<ContactTypeFFI> for ContactType {
    fn from(t: ContactTypeFFI) -> Self {
        match t {
            ContactTypeFFI::Person => Self::Person,
            ContactTypeFFI::Organization => Self::Organization,
        }
    }
}

/// Phone number or email with its `CNLabeledValue` label.
#[derive(Clone, Debug, Default, PartialEq, Eq, uniffi::Record)]
pub struct LabeledStringFFI {
    pub label: Option<String>,
    pub value: String,
}

impl From<Labeled<String>> for LabeledStringFFI {
    fn from(l: Labeled<String>) -> Self {
        Self {
            label: l.label,
            value: l.value,
        }
    }
}

impl From<LabeledStringFFI> for Labeled<String> {
    fn from(l: LabeledStringFFI) -> Self {
        Self {
            label: l.label,
            value: l.value,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, uniffi::Record)]
pub struct LabeledPostalAddressFFI {
    pub label: Option<String>,
    pub value: PostalAddressFFI,
}

impl From<Labeled<PostalAddress>> for LabeledPostalAddressFFI {
    fn from(l: Labeled<PostalAddress>) -> Self {
        Self {
            label: l.label,
            value: l.value.into(),
        }
    }
}

impl From<LabeledPostalAddressFFI> for Labeled<PostalAddress> {
    fn from(l: LabeledPostalAddressFFI) -> Self {
        Self {
            label: l.label,
            value: l.value.into(),
        }
    }
}

/// Billing contact, field for field with `CNContact`.
#[derive(Clone, Debug, Default, PartialEq, Eq, uniffi::Record)]
pub struct ContactFFI {
    pub identifier: String,
    pub contact_type: ContactTypeFFI,
    pub name_prefix: String,
    pub given_name: String,
    pub middle_name: String,
    pub family_name: String,
    pub name_suffix: String,
    pub organization_name: String,
    pub phone_numbers: Vec<LabeledStringFFI>,
    pub email_addresses: Vec<LabeledStringFFI>,
    pub postal_addresses: Vec<LabeledPostalAddressFFI>,
}

impl From<Contact> for ContactFFI {
    fn from(c: Contact) -> Self {
        Self {
            identifier: c.identifier,
            contact_type: c.contact_type.into(),
            name_prefix: c.name_prefix,
            given_name: c.given_name,
            middle_name: c.middle_name,
            family_name: c.family_name,
            name_suffix: c.name_suffix,
            organization_name: c.organization_name,
            phone_numbers: c.phone_numbers.into_iter().map(Into::into).collect(),
            email_addresses: c.email_addresses.into_iter().map(Into::into).collect(),
            postal_addresses: c.postal_addresses.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ContactFFI> for Contact {
    fn from(c: ContactFFI) -> Self {
        Self {
            identifier: c.identifier,
            contact_type: c.contact_type.into(),
            name_prefix: c.name_prefix,
            given_name: c.given_name,
            middle_name: c.middle_name,
            family_name: c.family_name,
            name_suffix: c.name_suffix,
            organization_name: c.organization_name,
            phone_numbers: c.phone_numbers.into_iter().map(Into::into).collect(),
            email_addresses: c.email_addresses.into_iter().map(Into::into).collect(),
            postal_addresses: c.postal_addresses.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum PassActivationStateFFI {
    Activated,
    RequiresActivation,
    Activating,
    Suspended,
    Deactivated,
}

impl From<PassActivationState> for PassActivationStateFFI {
    fn from(s: PassActivationState) -> Self {
        match s {
            PassActivationState::Activated => Self::Activated,
            PassActivationState::RequiresActivation => Self::RequiresActivation,
            PassActivationState::Activating => Self::Activating,
            PassActivationState::Suspended => Self::Suspended,
            PassActivationState::Deactivated => Self::Deactivated,
        }
    }
}

impl From<PassActivationStateFFI> for PassActivationState {
    fn from(s: PassActivationStateFFI) -> Self {
        match s {
            PassActivationStateFFI::Activated => Self::Activated,
            PassActivationStateFFI::RequiresActivation => Self::RequiresActivation,
            PassActivationStateFFI::Activating => Self::Activating,
            PassActivationStateFFI::Suspended => Self::Suspended,
            PassActivationStateFFI::Deactivated => Self::Deactivated,
        }
    }
}

/// `PKSecureElementPass` (Apple Pay only).
#[derive(Clone, Debug, PartialEq, Eq, uniffi::Record)]
pub struct SecureElementPassFFI {
    pub pass_type_identifier: String,
    pub serial_number: String,
    pub organization_name: Option<String>,
    pub primary_account_identifier: String,
    pub primary_account_number_suffix: String,
    pub device_account_identifier: String,
    pub device_account_number_suffix: String,
    pub pass_activation_state: PassActivationStateFFI,
    pub device_pass_identifier: Option<String>,
    pub paired_terminal_identifier: Option<String>,
}

impl From<SecureElementPass> for SecureElementPassFFI {
    fn from(p: SecureElementPass) -> Self {
        Self {
            pass_type_identifier: p.pass_type_identifier,
            serial_number: p.serial_number,
            organization_name: p.organization_name,
            primary_account_identifier: p.primary_account_identifier,
            primary_account_number_suffix: p.primary_account_number_suffix,
            device_account_identifier: p.device_account_identifier,
            device_account_number_suffix: p.device_account_number_suffix,
            pass_activation_state: p.pass_activation_state.into(),
            device_pass_identifier: p.device_pass_identifier,
            paired_terminal_identifier: p.paired_terminal_identifier,
        }
    }
}

impl From<SecureElementPassFFI> for SecureElementPass {
    fn from(p: SecureElementPassFFI) -> Self {
        Self {
            pass_type_identifier: p.pass_type_identifier,
            serial_number: p.serial_number,
            organization_name: p.organization_name,
            primary_account_identifier: p.primary_account_identifier,
            primary_account_number_suffix: p.primary_account_number_suffix,
            device_account_identifier: p.device_account_identifier,
            device_account_number_suffix: p.device_account_number_suffix,
            pass_activation_state: p.pass_activation_state.into(),
            device_pass_identifier: p.device_pass_identifier,
            paired_terminal_identifier: p.paired_terminal_identifier,
        }
    }
}

// ============================================================================
// Native Apple Pay Payload
// ============================================================================

/// `PKPayment` as delivered to `didAuthorizePayment`.
#[derive(Clone, Debug, uniffi::Record)]
pub struct ApplePayPaymentFFI {
    pub display_name: Option<String>,
    /// `PKPaymentNetwork` raw value.
    pub network: Option<String>,
    /// `PKPaymentMethodType` raw value.
    pub method_type: u32,
    pub secure_element_pass: Option<SecureElementPassFFI>,
    pub billing_contact: Option<ContactFFI>,
    pub transaction_identifier: String,
    /// `PKPaymentToken.paymentData`.
    pub payment_data: Vec<u8>,
}

impl From<ApplePayPaymentFFI> for ApplePayPayment {
    fn from(p: ApplePayPaymentFFI) -> Self {
        ApplePayPayment {
            token: ApplePayPaymentToken {
                payment_method: ApplePayPaymentMethod {
                    display_name: p.display_name,
                    network: p.network,
                    method_type: p.method_type,
                    secure_element_pass: p.secure_element_pass.map(Into::into),
                    billing_address: p.billing_contact.map(Into::into),
                },
                transaction_identifier: p.transaction_identifier,
                payment_data: p.payment_data,
            },
        }
    }
}

// ============================================================================
// Result Types
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum PaymentMethodTypeFFI {
    Unknown,
    Debit,
    Credit,
    Prepaid,
    Store,
}

impl From<PaymentMethodType> for PaymentMethodTypeFFI {
    fn from(t: PaymentMethodType) -> Self {
        match t {
            PaymentMethodType::Unknown => Self::Unknown,
            PaymentMethodType::Debit => Self::Debit,
            PaymentMethodType::Credit => Self::Credit,
            PaymentMethodType::Prepaid => Self::Prepaid,
            PaymentMethodType::Store => Self::Store,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, uniffi::Record)]
pub struct PaymentMethodFFI {
    pub display_name: Option<String>,
    /// Canonical network id, e.g. `"visa"`.
    pub network: Option<String>,
    pub method_type: PaymentMethodTypeFFI,
    pub secure_element_pass: Option<SecureElementPassFFI>,
    pub billing_address: Option<ContactFFI>,
}

impl From<PaymentMethod> for PaymentMethodFFI {
    fn from(m: PaymentMethod) -> Self {
        Self {
            display_name: m.display_name,
            network: m.network.map(|n| n.as_str().to_string()),
            method_type: m.method_type.into(),
            secure_element_pass: m.secure_element_pass.map(Into::into),
            billing_address: m.billing_address.map(Into::into),
        }
    }
}

#[derive(Clone, PartialEq, Eq, uniffi::Record)]
pub struct PaymentTokenFFI {
    pub payment_method: PaymentMethodFFI,
    pub transaction_identifier: String,
    /// Opaque token to forward to the payment processor.
    pub payment_data: String,
}

impl std::fmt::Debug for PaymentTokenFFI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentTokenFFI")
            .field("payment_method", &self.payment_method)
            .field("transaction_identifier", &self.transaction_identifier)
            .field("payment_data", &"<redacted>")
            .finish()
    }
}

impl From<PaymentToken> for PaymentTokenFFI {
    fn from(t: PaymentToken) -> Self {
        Self {
            payment_method: t.payment_method.into(),
            transaction_identifier: t.transaction_identifier,
            payment_data: t.payment_data,
        }
    }
}

/// Terminal outcome of one payment attempt.
#[derive(Clone, Debug, PartialEq, Eq, uniffi::Record)]
pub struct PaymentResultFFI {
    pub success: bool,
    pub transaction_id: Option<String>,
    pub token: Option<PaymentTokenFFI>,
    pub error: Option<String>,
}

impl From<PaymentResult> for PaymentResultFFI {
    fn from(r: PaymentResult) -> Self {
        Self {
            success: r.success,
            transaction_id: r.transaction_id,
            token: r.token.map(Into::into),
            error: r.error,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Record)]
pub struct PayServiceStatusFFI {
    pub can_make_payments: bool,
    pub can_setup_cards: bool,
}

impl From<PayServiceStatus> for PayServiceStatusFFI {
    fn from(s: PayServiceStatus) -> Self {
        Self {
            can_make_payments: s.can_make_payments,
            can_setup_cards: s.can_setup_cards,
        }
    }
}

// ============================================================================
// Utility Functions
// ============================================================================

/// Sum of `items`, formatted with two decimals.
#[uniffi::export]
pub fn calculate_total(items: Vec<PaymentItemFFI>) -> Result<String> {
    let items = convert_items(items)?;
    let total = walletpay_lib::model::calculate_total(&items)?;
    Ok(walletpay_lib::model::format_amount(total))
}

/// Networks accepted by both wallets.
#[uniffi::export]
pub fn common_networks() -> Vec<String> {
    walletpay_lib::model::CommonNetworks::all()
}

/// Get the library version.
#[uniffi::export]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(label: &str, amount: f64) -> PaymentItemFFI {
        PaymentItemFFI {
            label: label.to_string(),
            amount,
            item_type: PaymentItemTypeFFI::Final,
        }
    }

    #[test]
    fn test_calculate_total() {
        let total = calculate_total(vec![item("Coffee", 4.99), item("Tax", 0.5)]).unwrap();
        assert_eq!(total, "5.49");
    }

    #[test]
    fn test_non_finite_amount_rejected() {
        let err = PaymentItem::try_from(item("Broken", f64::NAN)).unwrap_err();
        assert!(matches!(err, WalletPayMobileError::Validation { .. }));
    }

    #[test]
    fn test_error_mapping() {
        let err: WalletPayMobileError = WalletPayError::invalid_data("amount", "negative").into();
        assert_eq!(err.to_string(), "Validation error: Invalid amount: negative");

        let err: WalletPayMobileError = WalletPayError::SheetUnavailable("closed".into()).into();
        assert!(matches!(err, WalletPayMobileError::Presentation { .. }));
    }

    #[test]
    fn test_session_config_roundtrip() {
        let config: SessionConfig = SessionConfigFFI {
            environment: EnvironmentFFI::Production,
            log_payloads: false,
        }
        .into();
        assert_eq!(config.environment, Environment::Production);
        assert!(!config.log_payloads);
        assert_eq!(SessionConfigFFI::default().environment, EnvironmentFFI::Test);
    }

    #[test]
    fn test_contact_conversion_keeps_every_field() {
        let contact = Contact {
            identifier: "A1B2-C3".into(),
            contact_type: ContactType::Organization,
            name_prefix: "Dr.".into(),
            given_name: "Jane".into(),
            middle_name: "Q".into(),
            family_name: "Doe".into(),
            name_suffix: "Jr.".into(),
            organization_name: "Acme".into(),
            phone_numbers: vec![Labeled {
                label: Some("home".into()),
                value: "+1 555 0100".into(),
            }],
            email_addresses: vec![
                Labeled {
                    label: Some("work".into()),
                    value: "jane@acme.test".into(),
                },
                Labeled::unlabeled("jane@example.test".to_string()),
            ],
            postal_addresses: vec![Labeled {
                label: Some("billing".into()),
                value: PostalAddress {
                    street: Some("1 Infinite Loop".into()),
                    city: Some("Cupertino".into()),
                    state: Some("CA".into()),
                    postal_code: Some("95014".into()),
                    country: Some("United States".into()),
                    iso_country_code: Some("us".into()),
                },
            }],
        };

        let ffi = ContactFFI::from(contact.clone());
        assert_eq!(ffi.contact_type, ContactTypeFFI::Organization);
        assert_eq!(ffi.phone_numbers[0].label.as_deref(), Some("home"));
        assert_eq!(ffi.postal_addresses[0].label.as_deref(), Some("billing"));

        let back = Contact::from(ffi);
        assert_eq!(back, contact);
        assert_eq!(back.full_name(), "Jane Q Doe");
    }
}
