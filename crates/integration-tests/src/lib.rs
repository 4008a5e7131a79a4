//! Integration tests for the Sofa checkout gateway.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p sofa-integration-tests
//! ```
//!
//! Tests run the real [`HttpTransport`] against a local `wiremock` server
//! that plays the checkout backend, envelope quirk included.

use sofa_checkout::{CheckoutConfig, CheckoutGateway, HttpTransport};
use sofa_core::{BasketItem, CheckoutAddress, CheckoutModel, Country, ProductId, VariantId};
use wiremock::MockServer;

/// Gateway type used across the integration tests.
pub type TestGateway = CheckoutGateway<HttpTransport, Vec<BasketItem>>;

/// Wrap a JSON body the way the checkout backend does.
#[must_use]
pub fn envelope(json: &serde_json::Value) -> String {
    format!("({json})")
}

/// Build a gateway pointed at a mock backend, mounted under `/checkout/`.
///
/// # Panics
///
/// Panics if the mock server URL is not a valid base URL.
#[must_use]
#[allow(clippy::expect_used)]
pub fn gateway_for(server: &MockServer, basket: Vec<BasketItem>) -> TestGateway {
    let config = CheckoutConfig::new(&format!("{}/checkout", server.uri()))
        .expect("mock server URL is valid");
    let transport = HttpTransport::new(&config).expect("HTTP client builds");
    CheckoutGateway::new(transport, config, basket)
}

/// A two-line basket.
#[must_use]
pub fn sample_basket() -> Vec<BasketItem> {
    vec![
        BasketItem::new(ProductId::new(101), 2).with_variant(VariantId::new(7)),
        BasketItem::new(ProductId::new(202), 1),
    ]
}

/// A checkout model with both addresses and a payment method selected.
#[must_use]
pub fn sample_model() -> CheckoutModel {
    CheckoutModel {
        billing_address: Some(
            CheckoutAddress::with_country(Country::new("DE", "Germany"))
                .field("name", "Jane")
                .field("surname", "Doe")
                .field("street", "Hauptstraße 1"),
        ),
        shipping_address: Some(
            CheckoutAddress::with_country(Country::new("AT", "Austria"))
                .field("name", "John")
                .field("surname", "Doe"),
        ),
        selected_payment_method: Some(sofa_core::SelectedMethod::new(
            serde_json::json!({"method": "prepayment"}),
        )),
        selected_shipping_method: None,
    }
}
