//! HTTP transport for the checkout backend.
//!
//! The gateway only needs one primitive: POST a form body, get text back.
//! [`CheckoutTransport`] is that seam; [`HttpTransport`] is the `reqwest`
//! implementation used in production.

use std::future::Future;

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, error, instrument};
use url::Url;

use crate::config::CheckoutConfig;
use crate::error::TransportError;

/// Content type of every request sent to the checkout backend.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Sends form-encoded requests to the checkout backend.
pub trait CheckoutTransport: Send + Sync {
    /// POST `body` to `url` as `application/x-www-form-urlencoded` and return
    /// the response text.
    fn post_form(
        &self,
        url: &Url,
        body: String,
    ) -> impl Future<Output = Result<String, TransportError>> + Send;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport using the timeout and user agent from `config`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &CheckoutConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();

        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wrap an existing client.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl CheckoutTransport for HttpTransport {
    #[instrument(skip(self, body), fields(url = %url, body_len = body.len()))]
    async fn post_form(&self, url: &Url, body: String) -> Result<String, TransportError> {
        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Checkout backend returned an error status");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        debug!(response_len = text.len(), "Checkout response received");

        Ok(text)
    }
}
