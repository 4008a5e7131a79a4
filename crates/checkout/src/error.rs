//! Checkout gateway errors.

use thiserror::Error;

/// Errors raised by a [`CheckoutTransport`](crate::CheckoutTransport).
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("Checkout backend error: {status} - {body}")]
    Status { status: u16, body: String },
}

/// Errors returned by [`CheckoutGateway`](crate::CheckoutGateway) operations.
///
/// A response too short to carry an envelope is not an error; operations
/// report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The request never produced a usable response.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The unwrapped envelope was not valid JSON, or not the expected shape.
    #[error("Malformed checkout response: {0}")]
    Decode(#[from] serde_json::Error),

    /// An endpoint URL could not be built from the configured base.
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}
