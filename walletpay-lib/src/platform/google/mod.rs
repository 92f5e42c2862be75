//! Google Pay (Wallet API) adapter.

pub mod mapper;
pub mod request;
pub mod tables;

pub use mapper::{GoogleActivityResult, GooglePayPaymentData, GooglePayResponseMapper};
pub use request::{GooglePayRequest, GooglePayRequestBuilder, IsReadyToPayRequest};

use super::{PlatformKind, RequestBuilder, ResponseMapper, WalletPlatform};
use crate::config::Environment;
use crate::model::{PaymentNetwork, PaymentRequest, PaymentResult};
use crate::Result;

/// Google Pay as a [`WalletPlatform`].
///
/// The request's `google_pay.environment` overrides the session default.
#[derive(Clone, Copy, Debug, Default)]
pub struct GooglePay {
    builder: GooglePayRequestBuilder,
    mapper: GooglePayResponseMapper,
}

impl GooglePay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready_to_pay_request(&self) -> IsReadyToPayRequest {
        self.builder.is_ready_to_pay_request()
    }
}

impl WalletPlatform for GooglePay {
    type Request = GooglePayRequest;
    type Success = GooglePayPaymentData;

    fn kind(&self) -> PlatformKind {
        PlatformKind::GooglePay
    }

    fn supported_networks(&self) -> &'static [PaymentNetwork] {
        &tables::AVAILABILITY_NETWORKS
    }

    fn environment_for(&self, request: &PaymentRequest, fallback: Environment) -> Environment {
        request.google_pay.environment.unwrap_or(fallback)
    }

    fn build_request(
        &self,
        request: &PaymentRequest,
        environment: Environment,
    ) -> Result<GooglePayRequest> {
        self.builder.build(request, environment)
    }

    fn map_success(&self, payload: GooglePayPaymentData) -> PaymentResult {
        self.mapper.from_native_success(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GooglePayOptions;

    #[test]
    fn test_environment_override() {
        let platform = GooglePay::new();
        let request = PaymentRequest::new("m", "US", "USD");
        assert_eq!(
            platform.environment_for(&request, Environment::Test),
            Environment::Test
        );

        let request = request
            .with_google_pay(GooglePayOptions::new().with_environment(Environment::Production));
        assert_eq!(
            platform.environment_for(&request, Environment::Test),
            Environment::Production
        );
    }
}
