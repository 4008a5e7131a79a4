//! Sofa Checkout - Client for the storefront's checkout backend.
//!
//! The backend speaks form-encoded POST requests and answers with JSON
//! wrapped in an envelope (one extra character on each side). This crate
//! hides both quirks behind [`CheckoutGateway`].
//!
//! # Pipeline
//!
//! 1. [`encoder`] turns a [`CheckoutModel`](sofa_core::CheckoutModel) and the
//!    current basket into backend form fields
//! 2. A [`CheckoutTransport`] POSTs the form body
//! 3. [`envelope`] strips the wrapper and parses JSON
//! 4. [`decoder`] normalizes the backend's shapes into `sofa-core` records
//!
//! # Example
//!
//! ```rust,ignore
//! use sofa_checkout::{CheckoutConfig, CheckoutGateway, HttpTransport};
//!
//! let config = CheckoutConfig::from_env()?;
//! let transport = HttpTransport::new(&config)?;
//! let gateway = CheckoutGateway::new(transport, config, basket);
//!
//! let methods = gateway.get_supported_checkout_methods(Some(&model)).await?;
//! let token = gateway.checkout(Some(&model)).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod envelope;
pub mod error;
pub mod form;
pub mod gateway;
pub mod transport;

pub use config::{CheckoutConfig, ConfigError, Endpoint};
pub use encoder::CheckoutTask;
pub use envelope::unwrap_envelope;
pub use error::{CheckoutError, TransportError};
pub use form::FormPayload;
pub use gateway::CheckoutGateway;
pub use transport::{CheckoutTransport, FORM_CONTENT_TYPE, HttpTransport};
