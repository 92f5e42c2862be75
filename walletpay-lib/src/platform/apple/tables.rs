//! PassKit identifier tables.
//!
//! Outgoing lookups return `None` for values PassKit cannot express so the
//! builder can drop them. Incoming lookups never fail: unknown networks fall
//! back to Visa and unknown method types to `Unknown`.

use serde::{Deserialize, Serialize};

use crate::model::{PaymentMethodType, PaymentNetwork};

/// `PKPaymentNetwork` raw value for a canonical network.
pub fn to_native_network(network: PaymentNetwork) -> Option<&'static str> {
    Some(match network {
        PaymentNetwork::Visa => "Visa",
        PaymentNetwork::Mastercard => "MasterCard",
        PaymentNetwork::Amex => "AmEx",
        PaymentNetwork::Discover => "Discover",
        PaymentNetwork::Jcb => "JCB",
        PaymentNetwork::Maestro => "Maestro",
        PaymentNetwork::Electron => "Electron",
        PaymentNetwork::Elo => "Elo",
        PaymentNetwork::IdCredit => "iD",
        PaymentNetwork::Interac => "Interac",
        PaymentNetwork::PrivateLabel => "PrivateLabel",
    })
}

/// Canonical network for a `PKPaymentNetwork` raw value.
pub fn from_native_network(raw: &str) -> PaymentNetwork {
    PaymentNetwork::ALL
        .iter()
        .copied()
        .find(|n| to_native_network(*n) == Some(raw))
        .unwrap_or(PaymentNetwork::Visa)
}

/// Canonical method type for a `PKPaymentMethodType` raw value.
pub fn from_native_method_type(raw: u32) -> PaymentMethodType {
    match raw {
        1 => PaymentMethodType::Debit,
        2 => PaymentMethodType::Credit,
        3 => PaymentMethodType::Prepaid,
        4 => PaymentMethodType::Store,
        _ => PaymentMethodType::Unknown,
    }
}

/// `PKShippingType`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShippingType {
    #[default]
    Shipping,
    Delivery,
    StorePickup,
    ServicePickup,
}

impl ShippingType {
    /// Map a free-form shipping type; unknown values become `Shipping`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "delivery" => Self::Delivery,
            "storePickup" => Self::StorePickup,
            "servicePickup" => Self::ServicePickup,
            _ => Self::Shipping,
        }
    }
}

/// `PKContactField`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    PostalAddress,
    Name,
}

/// The only contact field set this layer requests.
pub const REQUIRED_CONTACT_FIELDS: [ContactField; 2] = [ContactField::PostalAddress, ContactField::Name];
