//! The checkout gateway.

use serde_json::Value;
use sofa_core::{
    BasketSource, CheckoutModel, CheckoutSummary, CheckoutToken, SupportedCheckoutMethods,
};
use tracing::{debug, error, instrument};

use crate::config::{CheckoutConfig, Endpoint};
use crate::decoder;
use crate::encoder::{self, CheckoutTask, TASK_FIELD};
use crate::envelope::unwrap_envelope;
use crate::error::CheckoutError;
use crate::form::FormPayload;
use crate::transport::CheckoutTransport;

/// Client for the checkout backend.
///
/// Each operation sends exactly one request and holds no state between
/// calls. `Ok(None)` means the operation had nothing to send, or the
/// backend's answer was too short to carry data.
#[derive(Debug, Clone)]
pub struct CheckoutGateway<T, B> {
    transport: T,
    config: CheckoutConfig,
    basket: B,
}

impl<T, B> CheckoutGateway<T, B>
where
    T: CheckoutTransport,
    B: BasketSource,
{
    /// Create a gateway from its collaborators.
    #[must_use]
    pub const fn new(transport: T, config: CheckoutConfig, basket: B) -> Self {
        Self {
            transport,
            config,
            basket,
        }
    }

    /// Get the gateway configuration.
    #[must_use]
    pub const fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// Get the basket the gateway quotes from.
    #[must_use]
    pub const fn basket(&self) -> &B {
        &self.basket
    }

    /// Encode a checkout model for the `ajax.php` endpoint.
    ///
    /// Returns `None` if there is no model.
    #[must_use]
    pub fn encode_request(
        &self,
        model: Option<&CheckoutModel>,
        task: CheckoutTask,
    ) -> Option<FormPayload> {
        let mut payload = encoder::encode(model, &self.basket)?;
        payload.insert(TASK_FIELD, task.as_str());
        Some(payload)
    }

    /// Look up the payment and shipping methods available for a model.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response is malformed.
    #[instrument(skip(self, model))]
    pub async fn get_supported_checkout_methods(
        &self,
        model: Option<&CheckoutModel>,
    ) -> Result<Option<SupportedCheckoutMethods>, CheckoutError> {
        let Some(payload) = self.encode_request(model, CheckoutTask::GetPaymentMethods) else {
            debug!("No checkout model, nothing to send");
            return Ok(None);
        };

        let Some(data) = self.send(Endpoint::Ajax, &payload).await? else {
            return Ok(None);
        };

        let methods = decoder::supported_methods(data).inspect_err(|e| {
            error!(error = %e, "Unexpected payment methods response");
        })?;

        debug!(
            payment_methods = methods.payment_methods.len(),
            shipping_methods = methods.shipping_methods.len(),
            "Checkout methods received"
        );

        Ok(Some(methods))
    }

    /// Submit a model for checkout and obtain the backend's checkout token.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response is malformed.
    #[instrument(skip(self, model))]
    pub async fn checkout(
        &self,
        model: Option<&CheckoutModel>,
    ) -> Result<Option<CheckoutToken>, CheckoutError> {
        let Some(payload) = self.encode_request(model, CheckoutTask::Checkout) else {
            debug!("No checkout model, nothing to send");
            return Ok(None);
        };

        let data = self.send(Endpoint::Ajax, &payload).await?;
        let token = data.as_ref().and_then(decoder::checkout_token);

        if token.is_none() {
            debug!("Checkout response carried no token");
        }

        Ok(token)
    }

    /// Fetch the addresses and totals of a checkout.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response is malformed.
    #[instrument(skip(self, token))]
    pub async fn get_summary(
        &self,
        token: &CheckoutToken,
    ) -> Result<Option<CheckoutSummary>, CheckoutError> {
        let data = self.send(Endpoint::Summary, &token_request(token)).await?;
        Ok(data.map(decoder::checkout_summary))
    }

    /// Create the order on the backend. This is the final checkout step.
    ///
    /// The backend's confirmation is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response is malformed.
    #[instrument(skip(self, token))]
    pub async fn activate_order(
        &self,
        token: &CheckoutToken,
    ) -> Result<Option<Value>, CheckoutError> {
        self.send(Endpoint::Activation, &token_request(token)).await
    }

    /// POST a payload to an endpoint and unwrap the response envelope.
    async fn send(
        &self,
        endpoint: Endpoint,
        payload: &FormPayload,
    ) -> Result<Option<Value>, CheckoutError> {
        let url = self.config.endpoint_url(endpoint)?;

        let text = self
            .transport
            .post_form(&url, payload.to_form_string())
            .await
            .inspect_err(|e| error!(error = %e, endpoint = endpoint.path(), "Checkout request failed"))?;

        let data = unwrap_envelope(Some(&text)).inspect_err(|e| {
            error!(error = %e, endpoint = endpoint.path(), "Malformed checkout response");
        })?;

        if data.is_none() {
            debug!(endpoint = endpoint.path(), "Checkout response carried no data");
        }

        Ok(data)
    }
}

/// Request body for the token-based endpoints.
fn token_request(token: &CheckoutToken) -> FormPayload {
    [("details", "get"), ("token", token.as_str())]
        .into_iter()
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use serde_json::json;
    use sofa_core::{BasketItem, Country, CheckoutAddress, ProductId, SelectedMethod};
    use url::Url;

    use super::*;
    use crate::error::TransportError;

    /// Records requests and replays canned responses.
    #[derive(Default)]
    struct FakeTransport {
        responses: Mutex<VecDeque<Result<String, TransportError>>>,
        requests: Mutex<Vec<(String, String)>>,
    }

    impl FakeTransport {
        fn replying(responses: impl IntoIterator<Item = &'static str>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().map(|r| Ok(r.to_string())).collect()),
                requests: Mutex::default(),
            }
        }

        fn failing(status: u16) -> Self {
            let transport = Self::default();
            transport
                .responses
                .lock()
                .unwrap()
                .push_back(Err(TransportError::Status {
                    status,
                    body: "down".to_string(),
                }));
            transport
        }

        fn requests(&self) -> Vec<(String, String)> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl CheckoutTransport for FakeTransport {
        async fn post_form(&self, url: &Url, body: String) -> Result<String, TransportError> {
            self.requests.lock().unwrap().push((url.to_string(), body));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(String::new()))
        }
    }

    fn gateway(transport: FakeTransport) -> CheckoutGateway<FakeTransport, Vec<BasketItem>> {
        let config = CheckoutConfig::new("https://shop.example.com/checkout/").unwrap();
        let basket = vec![
            BasketItem::new(ProductId::new(1), 2),
            BasketItem::new(ProductId::new(2), 1),
        ];
        CheckoutGateway::new(transport, config, basket)
    }

    fn model() -> CheckoutModel {
        CheckoutModel {
            billing_address: Some(
                CheckoutAddress::with_country(Country::new("DE", "Germany")).field("name", "Jane"),
            ),
            selected_payment_method: Some(SelectedMethod::new(json!({"method": "prepayment"}))),
            ..CheckoutModel::default()
        }
    }

    #[test]
    fn test_encode_request_adds_task() {
        let gateway = gateway(FakeTransport::default());

        let payload = gateway
            .encode_request(Some(&model()), CheckoutTask::GetPaymentMethods)
            .unwrap();

        assert_eq!(payload.get(TASK_FIELD), Some("GETPAYMENTMETHODS"));
        let quote: Value = serde_json::from_str(payload.get("quote").unwrap()).unwrap();
        assert_eq!(quote.as_object().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_supported_methods() {
        let gateway = gateway(FakeTransport::replying([
            r#"({"paymentMethods":[{"surcharge":"1.50"}],"shippingMethods":[{"price":"2.00"}]})"#,
        ]));

        let methods = gateway
            .get_supported_checkout_methods(Some(&model()))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(methods.payment_methods.first().unwrap().surcharge, Some(1.5));
        assert_eq!(methods.shipping_methods.first().unwrap().price, Some(2.0));

        let requests = gateway.transport.requests();
        let (url, body) = requests.first().unwrap();
        assert_eq!(url, "https://shop.example.com/checkout/ajax.php");
        assert!(body.contains("task=GETPAYMENTMETHODS"));
        assert!(body.contains("invoiceAddress="));
        assert!(body.contains("paymentMethod="));
        assert!(!body.contains("shippingAddress="));
    }

    #[tokio::test]
    async fn test_no_model_sends_nothing() {
        let gateway = gateway(FakeTransport::default());

        assert!(gateway.get_supported_checkout_methods(None).await.unwrap().is_none());
        assert!(gateway.checkout(None).await.unwrap().is_none());
        assert!(gateway.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_empty_response_is_no_data() {
        let gateway = gateway(FakeTransport::replying(["", "x"]));

        assert!(
            gateway
                .get_supported_checkout_methods(Some(&model()))
                .await
                .unwrap()
                .is_none()
        );
        assert!(gateway.checkout(Some(&model())).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_checkout_returns_token() {
        let gateway = gateway(FakeTransport::replying([r#"({"token":"abc"})"#]));

        let token = gateway.checkout(Some(&model())).await.unwrap();

        assert_eq!(token, Some(CheckoutToken::new("abc")));
        let requests = gateway.transport.requests();
        assert!(requests.first().unwrap().1.contains("task=CHECKOUT"));
    }

    #[tokio::test]
    async fn test_checkout_without_token() {
        let gateway = gateway(FakeTransport::replying([r#"({"error":"basket empty"})"#]));

        assert!(gateway.checkout(Some(&model())).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_summary() {
        let gateway = gateway(FakeTransport::replying([
            r#"({"billing":{"firstname":"Jane","lastname":"Doe","country":"DE","countryname":"Germany"},"shipping":{},"totals":{"subtotal":"10.00","grandtotal":"12.00"}})"#,
        ]));

        let summary = gateway
            .get_summary(&CheckoutToken::new("abc"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(summary.invoice_address.surname, "Doe");
        assert_eq!(
            summary.invoice_address.country,
            Some(Country::new("DE", "Germany"))
        );
        assert!(summary.shipping_address.country.is_none());
        assert_eq!(summary.summary.sum, "10.00");
        assert_eq!(summary.summary.total, "12.00");

        let requests = gateway.transport.requests();
        let (url, body) = requests.first().unwrap();
        assert_eq!(url, "https://shop.example.com/checkout/summaryst.php");
        assert_eq!(body, "details=get&token=abc");
    }

    #[tokio::test]
    async fn test_activate_order_returns_envelope_as_is() {
        let gateway = gateway(FakeTransport::replying([r#"({"status":"ok","orderId":17})"#]));

        let confirmation = gateway
            .activate_order(&CheckoutToken::new("a b"))
            .await
            .unwrap();

        assert_eq!(confirmation, Some(json!({"status": "ok", "orderId": 17})));
        let requests = gateway.transport.requests();
        let (url, body) = requests.first().unwrap();
        assert_eq!(url, "https://shop.example.com/checkout/docheckoutst.php");
        assert_eq!(body, "details=get&token=a%20b");
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let gateway = gateway(FakeTransport::failing(503));

        let result = gateway.get_supported_checkout_methods(Some(&model())).await;

        assert!(matches!(
            result,
            Err(CheckoutError::Transport(TransportError::Status { status: 503, .. }))
        ));
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let gateway = gateway(FakeTransport::replying(["(not json)"]));

        let result = gateway.activate_order(&CheckoutToken::new("abc")).await;

        assert!(matches!(result, Err(CheckoutError::Decode(_))));
    }
}
