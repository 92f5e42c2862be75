//! Google Pay identifier tables.

use crate::model::PaymentNetwork;

/// Networks the Google Pay integration reports as payable.
pub const AVAILABILITY_NETWORKS: [PaymentNetwork; 4] = [
    PaymentNetwork::Visa,
    PaymentNetwork::Mastercard,
    PaymentNetwork::Amex,
    PaymentNetwork::Discover,
];

/// `allowedCardNetworks` value for a canonical network.
///
/// iD Credit and private-label cards have no Google Pay equivalent.
pub fn to_native_network(network: PaymentNetwork) -> Option<&'static str> {
    match network {
        PaymentNetwork::Visa => Some("VISA"),
        PaymentNetwork::Mastercard => Some("MASTERCARD"),
        PaymentNetwork::Amex => Some("AMEX"),
        PaymentNetwork::Discover => Some("DISCOVER"),
        PaymentNetwork::Jcb => Some("JCB"),
        PaymentNetwork::Maestro => Some("MAESTRO"),
        PaymentNetwork::Electron => Some("ELECTRON"),
        PaymentNetwork::Elo => Some("ELO"),
        PaymentNetwork::Interac => Some("INTERAC"),
        PaymentNetwork::IdCredit | PaymentNetwork::PrivateLabel => None,
    }
}

/// Canonical network for a reported `cardNetwork`, case-insensitive.
///
/// Unrecognized networks fall back to Visa.
pub fn from_native_network(raw: &str) -> PaymentNetwork {
    PaymentNetwork::ALL
        .iter()
        .copied()
        .find(|n| matches!(to_native_network(*n), Some(native) if native.eq_ignore_ascii_case(raw)))
        .unwrap_or(PaymentNetwork::Visa)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmapped_networks() {
        assert_eq!(to_native_network(PaymentNetwork::IdCredit), None);
        assert_eq!(to_native_network(PaymentNetwork::PrivateLabel), None);
        assert_eq!(to_native_network(PaymentNetwork::Jcb), Some("JCB"));
    }

    #[test]
    fn test_from_native_network() {
        assert_eq!(from_native_network("MASTERCARD"), PaymentNetwork::Mastercard);
        assert_eq!(from_native_network("amex"), PaymentNetwork::Amex);
        assert_eq!(from_native_network("ELO_DEBIT"), PaymentNetwork::Visa);
        assert_eq!(from_native_network("unknown"), PaymentNetwork::Visa);
    }
}
