//! Apple Pay (PassKit) adapter.

pub mod mapper;
pub mod request;
pub mod tables;

pub use mapper::{
    ApplePayPayment, ApplePayPaymentMethod, ApplePayPaymentToken, ApplePayResponseMapper,
};
pub use request::{ApplePayRequest, ApplePayRequestBuilder, ShippingMethod, SummaryItem, SummaryItemType};
pub use tables::{ContactField, ShippingType};

use super::{PlatformKind, RequestBuilder, ResponseMapper, WalletPlatform};
use crate::config::Environment;
use crate::model::{PaymentNetwork, PaymentRequest, PaymentResult};
use crate::Result;

/// Apple Pay as a [`WalletPlatform`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ApplePay {
    builder: ApplePayRequestBuilder,
    mapper: ApplePayResponseMapper,
}

impl ApplePay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WalletPlatform for ApplePay {
    type Request = ApplePayRequest;
    type Success = ApplePayPayment;

    fn kind(&self) -> PlatformKind {
        PlatformKind::ApplePay
    }

    fn supported_networks(&self) -> &'static [PaymentNetwork] {
        &PaymentNetwork::ALL
    }

    fn build_request(
        &self,
        request: &PaymentRequest,
        environment: Environment,
    ) -> Result<ApplePayRequest> {
        self.builder.build(request, environment)
    }

    fn map_success(&self, payload: ApplePayPayment) -> PaymentResult {
        self.mapper.from_native_success(payload)
    }
}
