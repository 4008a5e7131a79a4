//! Sofa Core - Shared checkout types.
//!
//! This crate provides the types exchanged between the storefront and the
//! checkout gateway:
//! - `checkout` - The UI-shaped checkout model handed to the gateway
//! - `basket` - Basket items and the [`BasketSource`] accessor
//! - `address`, `summary`, `method` - Canonical records produced from
//!   backend responses
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! The wire quirks of the checkout backend live in `sofa-checkout`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
