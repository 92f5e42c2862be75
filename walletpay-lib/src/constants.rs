//! Constants shared by the platform builders and mappers.

/// Merchant display name used when the request does not carry one.
pub const DEFAULT_MERCHANT_NAME: &str = "Example Merchant";

/// Number of fractional digits in every amount sent to a wallet.
pub const AMOUNT_DECIMAL_PLACES: u32 = 2;

/// Google Pay Wallet API constants.
pub mod google {
    pub const API_VERSION: u32 = 2;
    pub const API_VERSION_MINOR: u32 = 0;

    pub const PAYMENT_METHOD_CARD: &str = "CARD";

    pub const AUTH_PAN_ONLY: &str = "PAN_ONLY";
    pub const AUTH_CRYPTOGRAM_3DS: &str = "CRYPTOGRAM_3DS";

    pub const TOKENIZATION_PAYMENT_GATEWAY: &str = "PAYMENT_GATEWAY";
    pub const DEFAULT_GATEWAY: &str = "example";
    pub const DEFAULT_GATEWAY_MERCHANT_ID: &str = "exampleGatewayMerchantId";

    pub const TOTAL_PRICE_STATUS_FINAL: &str = "FINAL";
    pub const TOTAL_PRICE_LABEL_DEFAULT: &str = "Total";
    pub const LINE_ITEM_TYPE: &str = "LINE_ITEM";
    pub const STATUS_FINAL: &str = "FINAL";
    pub const STATUS_PENDING: &str = "PENDING";

    pub const BILLING_ADDRESS_FORMAT_FULL: &str = "FULL";

    /// `Activity.RESULT_OK`.
    pub const RESULT_OK: i32 = -1;
    /// `Activity.RESULT_CANCELED`.
    pub const RESULT_CANCELED: i32 = 0;
    /// `AutoResolveHelper.RESULT_ERROR`.
    pub const RESULT_ERROR: i32 = 1;

    /// Request code used when launching the Google Pay sheet.
    pub const LOAD_PAYMENT_DATA_REQUEST_CODE: i32 = 991;

    /// Card network defaults used when the request maps to nothing.
    pub const DEFAULT_CARD_NETWORKS: &[&str] = &["VISA", "MASTERCARD", "AMEX", "DISCOVER"];
}

/// Human-readable failure messages carried in `PaymentResult::error`.
pub mod messages {
    pub const PAYMENT_CANCELLED: &str = "Payment cancelled by user";
    pub const UNABLE_TO_PRESENT: &str = "Unable to present payment authorization";
    pub const UNABLE_TO_CREATE: &str = "Unable to create payment authorization";
    pub const NO_PAYMENT_DATA: &str = "No payment data received";
    pub const UNKNOWN_ERROR: &str = "Unknown error";
    pub const PAYMENT_BUSY: &str = "Payment already in progress";
    pub const PAYMENT_INTERRUPTED: &str = "Payment authorization was interrupted";
}
