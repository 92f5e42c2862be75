//! Availability probing.
//!
//! [`AvailabilityProber::can_make_payments`] is a membership test against the
//! platform's network table. It never consults provisioned cards; that coarser
//! signal is `can_setup_cards` in [`PayServiceStatus`].

use crate::model::{PayServiceStatus, PaymentNetwork};
use crate::platform::WalletPlatform;
use crate::Result;

/// Device capability queries answered by the host.
///
/// Implementations must not present UI.
pub trait WalletAvailability: Send + Sync {
    /// Whether the device can authorize wallet payments at all.
    fn can_make_payments(&self) -> Result<bool>;

    /// Whether the shopper can add a card to the wallet.
    fn can_setup_cards(&self) -> Result<bool>;
}

impl<T: WalletAvailability + ?Sized> WalletAvailability for std::sync::Arc<T> {
    fn can_make_payments(&self) -> Result<bool> {
        (**self).can_make_payments()
    }

    fn can_setup_cards(&self) -> Result<bool> {
        (**self).can_setup_cards()
    }
}

pub trait AvailabilityProber {
    /// Point-in-time capability snapshot. Host failures read as unavailable.
    fn status(&self) -> PayServiceStatus;

    /// True when at least one of `networks` is supported by the platform.
    fn can_make_payments(&self, networks: &[String]) -> bool;
}

/// [`AvailabilityProber`] for one platform's network table.
pub struct PlatformProber<A> {
    supported: &'static [PaymentNetwork],
    host: A,
}

impl<A: WalletAvailability> PlatformProber<A> {
    pub fn new(supported: &'static [PaymentNetwork], host: A) -> Self {
        Self { supported, host }
    }

    pub fn for_platform<P: WalletPlatform>(platform: &P, host: A) -> Self {
        Self::new(platform.supported_networks(), host)
    }

    pub fn supported_networks(&self) -> &'static [PaymentNetwork] {
        self.supported
    }

    fn query(&self) -> Result<PayServiceStatus> {
        Ok(PayServiceStatus::new(
            self.host.can_make_payments()?,
            self.host.can_setup_cards()?,
        ))
    }
}

impl<A: WalletAvailability> AvailabilityProber for PlatformProber<A> {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    fn status(&self) -> PayServiceStatus {
        match self.query() {
            Ok(status) => status,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_e, "wallet availability query failed");
                PayServiceStatus::unavailable()
            }
        }
    }

    fn can_make_payments(&self, networks: &[String]) -> bool {
        networks
            .iter()
            .filter_map(|n| PaymentNetwork::parse_lenient(n))
            .any(|n| self.supported.contains(&n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::google::tables::AVAILABILITY_NETWORKS;
    use crate::test_utils::MockAvailability;

    fn networks(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_one_match_is_enough() {
        let prober = PlatformProber::new(&AVAILABILITY_NETWORKS, MockAvailability::available());
        assert!(prober.can_make_payments(&networks(&["visa", "klarna"])));
        assert!(prober.can_make_payments(&networks(&["VISA"])));
        assert!(!prober.can_make_payments(&networks(&["klarna", "jcb"])));
        assert!(!prober.can_make_payments(&[]));
    }

    #[test]
    fn test_membership_ignores_device_state() {
        let prober = PlatformProber::new(&AVAILABILITY_NETWORKS, MockAvailability::unavailable());
        assert!(prober.can_make_payments(&networks(&["mastercard"])));
        assert_eq!(prober.status(), PayServiceStatus::unavailable());
    }

    #[test]
    fn test_status_reports_host() {
        let host = MockAvailability::new(true, false);
        let prober = PlatformProber::new(&AVAILABILITY_NETWORKS, host.clone());
        assert_eq!(prober.status(), PayServiceStatus::new(true, false));
        assert_eq!(host.query_count(), 1);
    }

    #[test]
    fn test_host_failure_collapses() {
        let prober = PlatformProber::new(&AVAILABILITY_NETWORKS, MockAvailability::failing());
        assert_eq!(prober.status(), PayServiceStatus::new(false, false));
    }
}
