//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use walletpay_lib::prelude::*;
//! ```

// Model
pub use crate::model::{
    format_amount, parse_amount, CommonNetworks, Contact, MerchantCapabilities, PayServiceStatus,
    PaymentItem, PaymentItemType, PaymentMethod, PaymentMethodType, PaymentNetwork,
    PaymentRequest, PaymentResult, PaymentToken,
};

// Configuration
pub use crate::config::{Environment, GooglePayOptions, SessionConfig};

// Error handling
pub use crate::errors::{WalletPayError, WalletPayErrorCode};
pub use crate::Result;

// Platforms
pub use crate::platform::apple::{ApplePay, ApplePayPayment, ApplePayRequest};
pub use crate::platform::google::{
    GoogleActivityResult, GooglePay, GooglePayPaymentData, GooglePayRequest,
};
pub use crate::platform::{FailureReason, NativeOutcome, WalletPlatform};

// Session and availability
pub use crate::availability::{AvailabilityProber, WalletAvailability};
pub use crate::session::{
    ApplePaySession, GooglePaySession, NativeCompletion, PaymentService, PaymentSession,
    PaymentSheetHost,
};
