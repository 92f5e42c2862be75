//! Canonical, vendor-neutral payment model.

pub mod contact;
pub mod network;
pub mod request;
pub mod result;

pub use contact::{
    Contact, ContactType, Labeled, PassActivationState, PostalAddress, SecureElementPass,
};
pub use network::{is_network_supported, CommonNetworks, MerchantCapabilities, PaymentNetwork};
pub use request::{
    calculate_total, format_amount, parse_amount, PaymentItem, PaymentItemType, PaymentRequest,
};
pub use result::{PayServiceStatus, PaymentMethod, PaymentMethodType, PaymentResult, PaymentToken};
