//! Error types for walletpay operations.
//!
//! These errors never cross the `start_payment` boundary: the session turns
//! every one of them into a terminal [`PaymentResult`](crate::PaymentResult).
//! They are returned by the pure building blocks (request builders, amount
//! parsing) so callers using those directly get structured failures.

use std::fmt;

/// Error codes for FFI and mobile integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum WalletPayErrorCode {
    /// Request data is invalid
    InvalidData = 1000,
    /// Request failed validation
    ValidationFailed = 1001,
    /// Network is not supported by the platform
    NetworkNotSupported = 1002,
    /// The native sheet could not be created
    SheetUnavailable = 2001,
    /// Native platform reported an error
    Platform = 3000,
    /// Native payload could not be parsed
    Serialization = 4000,
}

/// Error type for walletpay operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletPayError {
    /// Invalid data provided.
    InvalidData {
        /// Field or parameter name
        field: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Validation failed.
    ValidationFailed(String),

    /// Payment network cannot be expressed on this platform.
    NetworkNotSupported(String),

    /// The native payment sheet could not be constructed.
    SheetUnavailable(String),

    /// The native platform reported an error.
    Platform(String),

    /// Serialization/deserialization error.
    Serialization(String),
}

impl WalletPayError {
    /// Get the error code for FFI/mobile integration.
    pub fn code(&self) -> WalletPayErrorCode {
        match self {
            Self::InvalidData { .. } => WalletPayErrorCode::InvalidData,
            Self::ValidationFailed(_) => WalletPayErrorCode::ValidationFailed,
            Self::NetworkNotSupported(_) => WalletPayErrorCode::NetworkNotSupported,
            Self::SheetUnavailable(_) => WalletPayErrorCode::SheetUnavailable,
            Self::Platform(_) => WalletPayErrorCode::Platform,
            Self::Serialization(_) => WalletPayErrorCode::Serialization,
        }
    }

    /// Get the error message as an owned String (useful for FFI).
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns true if the error was raised before any native interaction.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidData { .. } | Self::ValidationFailed(_) | Self::NetworkNotSupported(_)
        )
    }

    /// Create an invalid data error.
    pub fn invalid_data(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidData {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for WalletPayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidData { field, reason } => write!(f, "invalid {}: {}", field, reason),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::NetworkNotSupported(network) => {
                write!(f, "payment network not supported: {}", network)
            }
            Self::SheetUnavailable(msg) => write!(f, "payment sheet unavailable: {}", msg),
            Self::Platform(msg) => write!(f, "platform error: {}", msg),
            Self::Serialization(msg) => write!(f, "serialization error: {}", msg),
        }
    }
}

impl std::error::Error for WalletPayError {}

impl From<serde_json::Error> for WalletPayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<rust_decimal::Error> for WalletPayError {
    fn from(err: rust_decimal::Error) -> Self {
        Self::invalid_data("amount", err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = WalletPayError::SheetUnavailable("no controller".into());
        assert_eq!(err.code(), WalletPayErrorCode::SheetUnavailable);
        assert!(!err.is_configuration_error());

        let err = WalletPayError::ValidationFailed("no items".into());
        assert_eq!(err.code() as i32, 1001);
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_error_display() {
        let err = WalletPayError::invalid_data("amount", "must not be negative");
        assert_eq!(err.to_string(), "invalid amount: must not be negative");
        assert_eq!(err.message(), err.to_string());
    }

    #[test]
    fn test_from_serde_json() {
        let err: WalletPayError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.code(), WalletPayErrorCode::Serialization);
    }
}
