//! Canonical order totals.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::address::Address;

/// Order totals as shown by the checkout summary templates.
///
/// Values are kept as the backend formatted them. Missing values are empty
/// strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Subtotal of all basket lines.
    pub sum: String,
    pub shipping: String,
    /// Payment method surcharge.
    pub surcharge: String,
    pub vat: String,
    /// Grand total.
    pub total: String,
}

/// Everything the summary page needs for one checkout token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    /// The unwrapped backend response, for fields the canonical records drop.
    pub response: Value,
    pub invoice_address: Address,
    pub shipping_address: Address,
    pub summary: OrderSummary,
}
