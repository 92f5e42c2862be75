//! Payment networks and merchant capabilities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::WalletPayError;

/// Card networks understood by both wallets.
///
/// Each platform maps a subset of these onto its own identifiers; see
/// `platform::apple::tables` and `platform::google::tables`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PaymentNetwork {
    #[serde(rename = "visa")]
    Visa,
    #[serde(rename = "mastercard")]
    Mastercard,
    #[serde(rename = "amex")]
    Amex,
    #[serde(rename = "discover")]
    Discover,
    #[serde(rename = "jcb")]
    Jcb,
    #[serde(rename = "maestro")]
    Maestro,
    #[serde(rename = "electron")]
    Electron,
    #[serde(rename = "elo")]
    Elo,
    #[serde(rename = "idcredit")]
    IdCredit,
    #[serde(rename = "interac")]
    Interac,
    #[serde(rename = "privateLabel")]
    PrivateLabel,
}

impl PaymentNetwork {
    /// Every network, in declaration order.
    pub const ALL: [PaymentNetwork; 11] = [
        Self::Visa,
        Self::Mastercard,
        Self::Amex,
        Self::Discover,
        Self::Jcb,
        Self::Maestro,
        Self::Electron,
        Self::Elo,
        Self::IdCredit,
        Self::Interac,
        Self::PrivateLabel,
    ];

    /// Canonical identifier, as accepted in `PaymentRequest::supported_networks`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::Amex => "amex",
            Self::Discover => "discover",
            Self::Jcb => "jcb",
            Self::Maestro => "maestro",
            Self::Electron => "electron",
            Self::Elo => "elo",
            Self::IdCredit => "idcredit",
            Self::Interac => "interac",
            Self::PrivateLabel => "privateLabel",
        }
    }

    /// Name suitable for display to a shopper.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::Amex => "American Express",
            Self::Discover => "Discover",
            Self::Jcb => "JCB",
            Self::Maestro => "Maestro",
            Self::Electron => "Visa Electron",
            Self::Elo => "Elo",
            Self::IdCredit => "iD Credit",
            Self::Interac => "Interac",
            Self::PrivateLabel => "Private Label",
        }
    }

    /// Case-sensitive parse of a canonical identifier.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|n| n.as_str() == value)
    }

    /// Case-insensitive parse, used for availability checks.
    pub fn parse_lenient(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|n| n.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for PaymentNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentNetwork {
    type Err = WalletPayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| WalletPayError::NetworkNotSupported(s.to_string()))
    }
}

/// Networks accepted by both Apple Pay and Google Pay.
pub struct CommonNetworks;

impl CommonNetworks {
    pub const VISA: &'static str = "visa";
    pub const MASTERCARD: &'static str = "mastercard";
    pub const AMEX: &'static str = "amex";
    pub const DISCOVER: &'static str = "discover";

    /// The four common networks as owned identifiers.
    pub fn all() -> Vec<String> {
        [Self::VISA, Self::MASTERCARD, Self::AMEX, Self::DISCOVER]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

/// Case-insensitive membership test of `network` in `supported`.
pub fn is_network_supported(network: &str, supported: &[String]) -> bool {
    supported.iter().any(|s| s.eq_ignore_ascii_case(network))
}

/// Merchant capability bit-set, mirroring `PKMerchantCapability`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerchantCapabilities(u8);

impl MerchantCapabilities {
    pub const THREE_DS: Self = Self(1 << 0);
    pub const EMV: Self = Self(1 << 1);
    pub const CREDIT: Self = Self(1 << 2);
    pub const DEBIT: Self = Self(1 << 3);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Map a free-form capability tag. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "3DS" => Some(Self::THREE_DS),
            "EMV" => Some(Self::EMV),
            "Credit" => Some(Self::CREDIT),
            "Debit" => Some(Self::DEBIT),
            _ => None,
        }
    }

    /// Fold a list of tags into a bit-set, dropping unknown tags.
    pub fn from_tags<S: AsRef<str>>(tags: &[S]) -> Self {
        tags.iter()
            .filter_map(|t| Self::from_tag(t.as_ref()))
            .fold(Self::empty(), |mut acc, cap| {
                acc.insert(cap);
                acc
            })
    }
}

impl std::ops::BitOr for MerchantCapabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
