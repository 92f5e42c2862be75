//! Billing contact and secure element pass types returned by the wallets.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactType {
    #[default]
    Person,
    Organization,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub iso_country_code: Option<String>,
}

/// A labeled contact value such as `("home", "+1 555 0100")`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labeled<T> {
    #[serde(default)]
    pub label: Option<String>,
    pub value: T,
}

impl<T> Labeled<T> {
    pub fn unlabeled(value: T) -> Self {
        Self { label: None, value }
    }
}

/// Billing contact attached to a payment method.
///
/// Only the fields the wallets actually populate for payment contacts are
/// carried; empty strings mean "not provided".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub contact_type: ContactType,
    #[serde(default)]
    pub name_prefix: String,
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub middle_name: String,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub name_suffix: String,
    #[serde(default)]
    pub organization_name: String,
    #[serde(default)]
    pub phone_numbers: Vec<Labeled<String>>,
    #[serde(default)]
    pub email_addresses: Vec<Labeled<String>>,
    #[serde(default)]
    pub postal_addresses: Vec<Labeled<PostalAddress>>,
}

impl Contact {
    /// Given, middle and family name joined by a space, skipping empty parts.
    pub fn full_name(&self) -> String {
        [self.given_name.as_str(), self.middle_name.as_str(), self.family_name.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PassActivationState {
    Activated,
    RequiresActivation,
    Activating,
    Suspended,
    Deactivated,
}

/// Device-bound card pass (Apple Pay only).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecureElementPass {
    pub pass_type_identifier: String,
    pub serial_number: String,
    #[serde(default)]
    pub organization_name: Option<String>,
    pub primary_account_identifier: String,
    pub primary_account_number_suffix: String,
    pub device_account_identifier: String,
    pub device_account_number_suffix: String,
    pub pass_activation_state: PassActivationState,
    #[serde(default)]
    pub device_pass_identifier: Option<String>,
    #[serde(default)]
    pub paired_terminal_identifier: Option<String>,
}
