//! The checkout model as the storefront UI builds it.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::address::Country;

/// Everything the customer has entered on the checkout page so far.
///
/// All parts are optional: the model is sent to the backend repeatedly while
/// the customer fills it in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutModel {
    #[serde(default)]
    pub billing_address: Option<CheckoutAddress>,
    #[serde(default)]
    pub shipping_address: Option<CheckoutAddress>,
    #[serde(default)]
    pub selected_payment_method: Option<SelectedMethod>,
    #[serde(default)]
    pub selected_shipping_method: Option<SelectedMethod>,
}

/// An address form as entered in the UI.
///
/// The country comes from a picker and is structured; every other field is
/// free-form and forwarded to the backend as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutAddress {
    #[serde(default)]
    pub country: Option<Country>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl CheckoutAddress {
    /// Create an address with the given country and no other fields.
    #[must_use]
    pub fn with_country(country: Country) -> Self {
        Self {
            country: Some(country),
            fields: Map::new(),
        }
    }

    /// Set a free-form field.
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// A payment or shipping method picked in the UI.
///
/// `method` is the backend's own method record, echoed back verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectedMethod {
    #[serde(default)]
    pub method: Option<Value>,
}

impl SelectedMethod {
    /// Select the given backend method record.
    #[must_use]
    pub const fn new(method: Value) -> Self {
        Self {
            method: Some(method),
        }
    }
}

/// Token identifying a checkout session on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckoutToken(String);

impl CheckoutToken {
    /// Wrap a backend token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the token and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CheckoutToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CheckoutToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
