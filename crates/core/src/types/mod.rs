//! Core types for the Sofa checkout.

pub mod address;
pub mod basket;
pub mod checkout;
pub mod id;
pub mod method;
pub mod summary;

pub use address::{Address, Country};
pub use basket::{BasketItem, BasketSource};
pub use checkout::{CheckoutAddress, CheckoutModel, CheckoutToken, SelectedMethod};
pub use id::*;
pub use method::{PaymentMethod, ShippingMethod, SupportedCheckoutMethods};
pub use summary::{CheckoutSummary, OrderSummary};
