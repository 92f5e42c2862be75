//! Handler E2E Tests
//!
//! Drives `PaymentHandler` through simulated PassKit and Google Pay hosts,
//! the way the Swift and Kotlin shims call into the bindings.

use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use walletpay_mobile::{
    ApplePayCompletion, ApplePayHostFFI, ApplePayPaymentFFI, EnvironmentFFI, GooglePayCompletion,
    GooglePayHostFFI, PaymentHandler, PaymentItemFFI, PaymentItemTypeFFI, PaymentMethodTypeFFI,
    PaymentRequestFFI, PaymentResultCallback, PaymentResultFFI, PlatformKindFFI,
    SessionConfigFFI, WalletPayMobileError,
};

const TIMEOUT: Duration = Duration::from_secs(5);

// ============================================================================
// Test Infrastructure
// ============================================================================

fn coffee_request() -> PaymentRequestFFI {
    PaymentRequestFFI {
        merchant_identifier: "merchant.com.example".to_string(),
        country_code: "US".to_string(),
        currency_code: "USD".to_string(),
        payment_items: vec![
            PaymentItemFFI {
                label: "Coffee".to_string(),
                amount: 4.99,
                item_type: PaymentItemTypeFFI::Final,
            },
            PaymentItemFFI {
                label: "Tax".to_string(),
                amount: 0.50,
                item_type: PaymentItemTypeFFI::Final,
            },
        ],
        merchant_capabilities: vec!["3DS".to_string()],
        supported_networks: vec!["visa".to_string(), "mastercard".to_string()],
        shipping_type: None,
        shipping_methods: None,
        billing_contact_required: None,
        shipping_contact_required: None,
        merchant_name: Some("Coffee Shop".to_string()),
        google_pay_environment: None,
        google_pay_gateway: None,
        google_pay_gateway_merchant_id: None,
    }
}

struct ChannelCallback(Mutex<mpsc::Sender<PaymentResultFFI>>);

impl PaymentResultCallback for ChannelCallback {
    fn on_result(&self, result: PaymentResultFFI) {
        let _ = self.0.lock().unwrap().send(result);
    }
}

fn channel_callback() -> (Box<dyn PaymentResultCallback>, Receiver<PaymentResultFFI>) {
    let (tx, rx) = mpsc::channel();
    (Box::new(ChannelCallback(Mutex::new(tx))), rx)
}

/// Simulated PassKit host that keeps the completion like a delegate would.
#[derive(Default)]
struct PassKitHost {
    window: bool,
    presented: Mutex<Vec<String>>,
    completion: Mutex<Option<Arc<ApplePayCompletion>>>,
    completion_tx: Mutex<Option<mpsc::Sender<Arc<ApplePayCompletion>>>>,
}

impl PassKitHost {
    fn new(window: bool) -> (Arc<Self>, Receiver<Arc<ApplePayCompletion>>) {
        let (tx, rx) = mpsc::channel();
        let host = Arc::new(Self {
            window,
            completion_tx: Mutex::new(Some(tx)),
            ..Default::default()
        });
        (host, rx)
    }
}

/// Forwards to a shared host so the test can inspect it after handing it over.
struct SharedPassKitHost(Arc<PassKitHost>);

impl ApplePayHostFFI for SharedPassKitHost {
    fn can_make_payments(&self) -> Result<bool, WalletPayMobileError> {
        Ok(true)
    }

    fn can_setup_cards(&self) -> Result<bool, WalletPayMobileError> {
        Ok(false)
    }

    fn can_present(&self) -> bool {
        self.0.window
    }

    fn present(
        &self,
        request_json: String,
        completion: Arc<ApplePayCompletion>,
    ) -> Result<(), WalletPayMobileError> {
        self.0.presented.lock().unwrap().push(request_json);
        *self.0.completion.lock().unwrap() = Some(completion.clone());
        if let Some(tx) = self.0.completion_tx.lock().unwrap().as_ref() {
            let _ = tx.send(completion);
        }
        Ok(())
    }
}

fn apple_payment() -> ApplePayPaymentFFI {
    ApplePayPaymentFFI {
        display_name: Some("Visa 0492".to_string()),
        network: Some("Visa".to_string()),
        method_type: 2,
        secure_element_pass: None,
        billing_contact: None,
        transaction_identifier: "TXN-0492".to_string(),
        payment_data: b"{\"data\":\"abc\"}".to_vec(),
    }
}

/// Simulated Google Pay host answering `onActivityResult` inline.
struct WalletApiHost {
    ready: bool,
    result_code: i32,
    payment_data_json: Option<String>,
    environments: Arc<Mutex<Vec<EnvironmentFFI>>>,
}

impl GooglePayHostFFI for WalletApiHost {
    fn is_ready_to_pay(&self, request_json: String) -> Result<bool, WalletPayMobileError> {
        assert!(request_json.contains("\"allowedPaymentMethods\""));
        if self.ready {
            Ok(true)
        } else {
            Err(WalletPayMobileError::Platform {
                msg: "Google Play services unavailable".to_string(),
            })
        }
    }

    fn can_present(&self) -> bool {
        true
    }

    fn load_payment_data(
        &self,
        environment: EnvironmentFFI,
        request_json: String,
        completion: Arc<GooglePayCompletion>,
    ) -> Result<(), WalletPayMobileError> {
        assert!(request_json.contains("\"totalPrice\":\"5.49\""));
        self.environments.lock().unwrap().push(environment);
        // A foreign activity result must not resolve the attempt.
        assert!(!completion.on_activity_result(1234, -1, None, None));
        completion.on_activity_result(991, self.result_code, self.payment_data_json.clone(), None);
        Ok(())
    }
}

const GOOGLE_PAYMENT_DATA: &str = r#"{"apiVersion":2,"apiVersionMinor":0,"paymentMethodData":{"type":"CARD","info":{"cardNetwork":"AMEX","cardDetails":"0005"},"tokenizationData":{"type":"PAYMENT_GATEWAY","token":"tok_amex"}}}"#;

// ============================================================================
// Apple Pay
// ============================================================================

#[test]
fn apple_pay_authorize_then_finish() {
    let (host, completions) = PassKitHost::new(true);
    let handler = PaymentHandler::apple_pay(
        Box::new(SharedPassKitHost(host.clone())),
        SessionConfigFFI::default(),
    )
    .unwrap();
    assert_eq!(handler.platform(), PlatformKindFFI::ApplePay);

    let (callback, results) = channel_callback();
    handler.start_payment(coffee_request(), callback);

    let completion = completions.recv_timeout(TIMEOUT).unwrap();
    assert!(completion.did_authorize_payment(apple_payment()));
    assert!(!completion.did_finish());

    let result = results.recv_timeout(TIMEOUT).unwrap();
    assert!(result.success);
    assert!(result.error.is_none());
    let token = result.token.unwrap();
    assert_eq!(token.transaction_identifier, "TXN-0492");
    assert_eq!(token.payment_data, "eyJkYXRhIjoiYWJjIn0=");
    assert_eq!(token.payment_method.network.as_deref(), Some("visa"));
    assert_eq!(token.payment_method.method_type, PaymentMethodTypeFFI::Credit);

    let presented = host.presented.lock().unwrap();
    assert!(presented[0].contains("\"amount\":\"5.49\""));
    assert!(!presented[0].contains("merchant.com.example"));
    assert!(results.recv_timeout(Duration::from_millis(100)).is_err());
}

#[test]
fn apple_pay_finish_without_authorizing_cancels() {
    let (host, completions) = PassKitHost::new(true);
    let handler =
        PaymentHandler::apple_pay(Box::new(SharedPassKitHost(host)), SessionConfigFFI::default())
            .unwrap();

    let (callback, results) = channel_callback();
    handler.start_payment(coffee_request(), callback);
    let completion = completions.recv_timeout(TIMEOUT).unwrap();
    assert!(completion.did_finish());
    assert!(completion.is_resolved());

    let result = results.recv_timeout(TIMEOUT).unwrap();
    assert_eq!(
        result,
        PaymentResultFFI {
            success: false,
            transaction_id: None,
            token: None,
            error: Some("Payment cancelled by user".to_string()),
        }
    );
}

#[test]
fn apple_pay_without_window() {
    let (host, _completions) = PassKitHost::new(false);
    let handler = PaymentHandler::apple_pay(
        Box::new(SharedPassKitHost(host.clone())),
        SessionConfigFFI::default(),
    )
    .unwrap();

    let result = handler.start_payment_blocking(coffee_request());
    assert!(!result.success);
    assert_eq!(
        result.error.as_deref(),
        Some("Unable to present payment authorization")
    );
    assert!(host.presented.lock().unwrap().is_empty());
}

#[test]
fn apple_pay_status_and_networks() {
    let (host, _completions) = PassKitHost::new(true);
    let handler =
        PaymentHandler::apple_pay(Box::new(SharedPassKitHost(host)), SessionConfigFFI::default())
            .unwrap();

    let status = handler.pay_service_status();
    assert!(status.can_make_payments);
    assert!(!status.can_setup_cards);
    assert!(handler.can_make_payments(vec!["visa".to_string(), "klarna".to_string()]));
    assert!(handler.can_make_payments(vec!["privateLabel".to_string()]));
    assert!(!handler.can_make_payments(vec!["klarna".to_string()]));
}

#[test]
fn invalid_amount_resolves_immediately() {
    let (host, _completions) = PassKitHost::new(true);
    let handler = PaymentHandler::apple_pay(
        Box::new(SharedPassKitHost(host.clone())),
        SessionConfigFFI::default(),
    )
    .unwrap();

    let mut request = coffee_request();
    request.payment_items[0].amount = f64::INFINITY;
    let (callback, results) = channel_callback();
    handler.start_payment(request, callback);

    let result = results.recv_timeout(TIMEOUT).unwrap();
    assert!(!result.success);
    assert!(result
        .error
        .unwrap()
        .starts_with("Invalid payment request: "));
    assert!(host.presented.lock().unwrap().is_empty());
}

// ============================================================================
// Google Pay
// ============================================================================

#[test]
fn google_pay_result_ok() {
    let environments = Arc::new(Mutex::new(Vec::new()));
    let handler = PaymentHandler::google_pay(
        Box::new(WalletApiHost {
            ready: true,
            result_code: -1,
            payment_data_json: Some(GOOGLE_PAYMENT_DATA.to_string()),
            environments: environments.clone(),
        }),
        SessionConfigFFI::default(),
    )
    .unwrap();

    let result = handler.start_payment_blocking(coffee_request());
    assert!(result.success);
    let token = result.token.unwrap();
    assert_eq!(token.payment_data, "tok_amex");
    assert_eq!(token.payment_method.network.as_deref(), Some("amex"));
    assert_eq!(
        token.payment_method.display_name.as_deref(),
        Some("AMEX 0005")
    );
    assert_eq!(*environments.lock().unwrap(), vec![EnvironmentFFI::Test]);
}

#[test]
fn google_pay_environment_override() {
    let environments = Arc::new(Mutex::new(Vec::new()));
    let handler = PaymentHandler::google_pay(
        Box::new(WalletApiHost {
            ready: true,
            result_code: 0,
            payment_data_json: None,
            environments: environments.clone(),
        }),
        SessionConfigFFI::default(),
    )
    .unwrap();

    let mut request = coffee_request();
    request.google_pay_environment = Some(EnvironmentFFI::Production);
    let result = handler.start_payment_blocking(request);
    assert_eq!(result.error.as_deref(), Some("Payment cancelled by user"));
    assert_eq!(
        *environments.lock().unwrap(),
        vec![EnvironmentFFI::Production]
    );
}

#[test]
fn google_pay_result_ok_without_data() {
    let handler = PaymentHandler::google_pay(
        Box::new(WalletApiHost {
            ready: true,
            result_code: -1,
            payment_data_json: None,
            environments: Arc::new(Mutex::new(Vec::new())),
        }),
        SessionConfigFFI::default(),
    )
    .unwrap();

    let result = handler.start_payment_blocking(coffee_request());
    assert_eq!(result.error.as_deref(), Some("No payment data received"));
    assert!(result.token.is_none());
}

#[test]
fn google_pay_unavailable_status() {
    let handler = PaymentHandler::google_pay(
        Box::new(WalletApiHost {
            ready: false,
            result_code: 0,
            payment_data_json: None,
            environments: Arc::new(Mutex::new(Vec::new())),
        }),
        SessionConfigFFI::default(),
    )
    .unwrap();

    let status = handler.pay_service_status();
    assert!(!status.can_make_payments);
    assert!(!status.can_setup_cards);
    assert!(handler.can_make_payments(vec!["VISA".to_string()]));
    assert!(!handler.can_make_payments(vec!["jcb".to_string()]));
}
