//! In-memory payment gateway for tests and local development.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{CreateCheckoutRequest, PaymentGateway, PaymentGatewayError, ProviderCheckout};

/// Records checkout requests and returns canned sessions.
pub struct MockPaymentGateway {
    fail: bool,
    requests: Mutex<Vec<CreateCheckoutRequest>>,
    counter: Mutex<u32>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self {
            fail: false,
            requests: Mutex::new(Vec::new()),
            counter: Mutex::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            requests: Mutex::new(Vec::new()),
            counter: Mutex::new(0),
        }
    }

    /// Requests seen so far.
    pub fn requests(&self) -> Vec<CreateCheckoutRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockPaymentGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<ProviderCheckout, PaymentGatewayError> {
        if self.fail {
            return Err(PaymentGatewayError::network("mock gateway down"));
        }

        self.requests.lock().unwrap().push(request);

        let mut counter = self.counter.lock().unwrap();
        *counter += 1;
        Ok(ProviderCheckout {
            id: format!("cs_mock_{counter}"),
            url: format!("https://checkout.mock.example/cs_mock_{counter}"),
        })
    }
}
