//! Payment and shipping methods offered by the checkout backend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A payment method the backend supports for the current checkout.
///
/// Only the surcharge is typed; every other backend field is carried
/// through untouched in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Surcharge for choosing this method. `None` if the backend value was
    /// missing or not numeric.
    #[serde(default)]
    pub surcharge: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A shipping method the backend supports for the current checkout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingMethod {
    /// Shipping price. `None` if the backend value was missing or not numeric.
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payment and shipping methods available for a checkout model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportedCheckoutMethods {
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethod>,
    #[serde(default)]
    pub shipping_methods: Vec<ShippingMethod>,
}
