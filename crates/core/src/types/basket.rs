//! Basket items as the checkout sees them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::id::{OptionId, ProductId, VariantId};

/// A single basket line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketItem {
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(default)]
    pub variant_id: Option<VariantId>,
    #[serde(default)]
    pub option_id: Option<OptionId>,
}

impl BasketItem {
    /// Create a basket line without variant or option.
    #[must_use]
    pub const fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
            variant_id: None,
            option_id: None,
        }
    }

    /// Set the selected variant.
    #[must_use]
    pub const fn with_variant(mut self, variant_id: VariantId) -> Self {
        self.variant_id = Some(variant_id);
        self
    }

    /// Set the selected option.
    #[must_use]
    pub const fn with_option(mut self, option_id: OptionId) -> Self {
        self.option_id = Some(option_id);
        self
    }
}

/// Read access to the current basket contents.
///
/// The gateway calls [`BasketSource::items`] once per request, so an
/// implementation backed by shared state sees the basket as it is at send
/// time.
pub trait BasketSource: Send + Sync {
    /// Current basket lines, in basket order.
    fn items(&self) -> Vec<BasketItem>;
}

impl BasketSource for [BasketItem] {
    fn items(&self) -> Vec<BasketItem> {
        self.to_vec()
    }
}

impl BasketSource for Vec<BasketItem> {
    fn items(&self) -> Vec<BasketItem> {
        self.clone()
    }
}

impl<T: BasketSource + ?Sized> BasketSource for &T {
    fn items(&self) -> Vec<BasketItem> {
        (**self).items()
    }
}

impl<T: BasketSource + ?Sized> BasketSource for Arc<T> {
    fn items(&self) -> Vec<BasketItem> {
        (**self).items()
    }
}
