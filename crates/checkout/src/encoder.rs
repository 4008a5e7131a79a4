//! Translation of the UI checkout model into the backend's form fields.
//!
//! The backend expects most fields as JSON strings inside a form-encoded
//! body. Only fields with source data are sent; there are no empty
//! placeholders.

use serde_json::{Map, Value, json};
use sofa_core::{BasketItem, BasketSource, CheckoutAddress, CheckoutModel, SelectedMethod};
use tracing::debug;

use crate::form::FormPayload;

/// Form field for the billing address.
pub const INVOICE_ADDRESS_FIELD: &str = "invoiceAddress";
/// Form field for the shipping address.
pub const SHIPPING_ADDRESS_FIELD: &str = "shippingAddress";
/// Form field for the selected payment method.
pub const PAYMENT_METHOD_FIELD: &str = "paymentMethod";
/// Form field for the selected shipping method.
pub const SHIPPING_METHOD_FIELD: &str = "shippingMethod";
/// Form field for the basket quote.
pub const QUOTE_FIELD: &str = "quote";
/// Form field selecting the backend task.
pub const TASK_FIELD: &str = "task";

/// What the `ajax.php` endpoint should do with an encoded model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutTask {
    /// Look up payment and shipping methods for the model.
    GetPaymentMethods,
    /// Submit the model and obtain a checkout token.
    Checkout,
}

impl CheckoutTask {
    /// Wire value of the task discriminator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GetPaymentMethods => "GETPAYMENTMETHODS",
            Self::Checkout => "CHECKOUT",
        }
    }
}

/// Encode a checkout model and the current basket into form fields.
///
/// Returns `None` when there is no model, meaning there is nothing to send.
/// The caller adds the [`TASK_FIELD`].
pub fn encode<B>(model: Option<&CheckoutModel>, basket: &B) -> Option<FormPayload>
where
    B: BasketSource + ?Sized,
{
    let model = model?;
    let mut payload = FormPayload::new();

    if let Some(address) = encode_address(model.billing_address.as_ref(), "billing") {
        payload.insert(INVOICE_ADDRESS_FIELD, address);
    }

    if let Some(address) = encode_address(model.shipping_address.as_ref(), "shipping") {
        payload.insert(SHIPPING_ADDRESS_FIELD, address);
    }

    if let Some(method) = encode_method(model.selected_payment_method.as_ref()) {
        payload.insert(PAYMENT_METHOD_FIELD, method);
    }

    if let Some(method) = encode_method(model.selected_shipping_method.as_ref()) {
        payload.insert(SHIPPING_METHOD_FIELD, method);
    }

    payload.insert(QUOTE_FIELD, Value::Object(create_quote(&basket.items())).to_string());

    Some(payload)
}

/// Build the per-product quote the backend prices the order from.
///
/// Keys are product IDs; a later line for the same product replaces an
/// earlier one.
#[must_use]
pub fn create_quote(items: &[BasketItem]) -> Map<String, Value> {
    items
        .iter()
        .map(|item| {
            let mut line = Map::new();
            line.insert("qty".to_string(), json!(item.quantity));
            if let Some(variant_id) = item.variant_id {
                line.insert("variantID".to_string(), json!(variant_id));
            }
            if let Some(option_id) = item.option_id {
                line.insert("optionID".to_string(), json!(option_id));
            }
            (item.product_id.to_string(), Value::Object(line))
        })
        .collect()
}

/// Serialize an address with its country flattened to `country` and
/// `countryLabel`. Addresses without a country are skipped; an unlabelled
/// country sends no `countryLabel`.
fn encode_address(address: Option<&CheckoutAddress>, kind: &str) -> Option<String> {
    let address = address?;

    let Some(country) = address.country.as_ref() else {
        debug!(kind, "Skipping address without country");
        return None;
    };

    let mut fields = address.fields.clone();
    fields.insert("country".to_string(), Value::String(country.value.clone()));
    if !country.label.is_empty() {
        fields.insert(
            "countryLabel".to_string(),
            Value::String(country.label.clone()),
        );
    }

    Some(Value::Object(fields).to_string())
}

fn encode_method(selected: Option<&SelectedMethod>) -> Option<String> {
    selected?.method.as_ref().map(Value::to_string)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sofa_core::{Country, OptionId, ProductId, VariantId};

    use super::*;

    fn address(country: Option<Country>) -> CheckoutAddress {
        CheckoutAddress {
            country,
            ..CheckoutAddress::default()
        }
        .field("name", "Jane")
        .field("surname", "Doe")
    }

    fn parse(field: Option<&str>) -> Value {
        serde_json::from_str(field.unwrap()).unwrap()
    }

    #[test]
    fn test_no_model_means_nothing_to_send() {
        let basket = vec![BasketItem::new(ProductId::new(1), 1)];
        assert!(encode(None, &basket).is_none());
    }

    #[test]
    fn test_addresses_are_flattened() {
        let model = CheckoutModel {
            billing_address: Some(address(Some(Country::new("DE", "Germany")))),
            shipping_address: Some(address(Some(Country::new("AT", "Austria")))),
            ..CheckoutModel::default()
        };

        let payload = encode(Some(&model), &Vec::<BasketItem>::new()).unwrap();

        let invoice = parse(payload.get(INVOICE_ADDRESS_FIELD));
        assert_eq!(invoice["country"], "DE");
        assert_eq!(invoice["countryLabel"], "Germany");
        assert_eq!(invoice["name"], "Jane");

        let shipping = parse(payload.get(SHIPPING_ADDRESS_FIELD));
        assert_eq!(shipping["country"], "AT");
        assert_eq!(shipping["countryLabel"], "Austria");
    }

    #[test]
    fn test_address_without_country_is_omitted() {
        let model = CheckoutModel {
            billing_address: Some(address(None)),
            shipping_address: Some(address(Some(Country::new("DE", "Germany")))),
            ..CheckoutModel::default()
        };

        let payload = encode(Some(&model), &Vec::<BasketItem>::new()).unwrap();

        assert!(!payload.contains_key(INVOICE_ADDRESS_FIELD));
        assert!(payload.contains_key(SHIPPING_ADDRESS_FIELD));
    }

    #[test]
    fn test_unlabelled_country_omits_label() {
        let model = CheckoutModel {
            billing_address: Some(address(Some(Country::new("DE", "")))),
            ..CheckoutModel::default()
        };

        let payload = encode(Some(&model), &Vec::<BasketItem>::new()).unwrap();

        let invoice = parse(payload.get(INVOICE_ADDRESS_FIELD));
        assert_eq!(invoice["country"], "DE");
        assert!(invoice.get("countryLabel").is_none());
    }

    #[test]
    fn test_caller_model_is_untouched() {
        let model = CheckoutModel {
            billing_address: Some(address(Some(Country::new("DE", "Germany")))),
            ..CheckoutModel::default()
        };
        let before = model.clone();

        let _ = encode(Some(&model), &Vec::<BasketItem>::new());

        assert_eq!(model, before);
    }

    #[test]
    fn test_selected_methods() {
        let model = CheckoutModel {
            selected_payment_method: Some(SelectedMethod::new(json!({"method": "paypal"}))),
            selected_shipping_method: Some(SelectedMethod::default()),
            ..CheckoutModel::default()
        };

        let payload = encode(Some(&model), &Vec::<BasketItem>::new()).unwrap();

        assert_eq!(
            parse(payload.get(PAYMENT_METHOD_FIELD)),
            json!({"method": "paypal"})
        );
        assert!(!payload.contains_key(SHIPPING_METHOD_FIELD));
    }

    #[test]
    fn test_empty_basket_still_sends_quote() {
        let payload = encode(Some(&CheckoutModel::default()), &Vec::<BasketItem>::new()).unwrap();

        assert_eq!(parse(payload.get(QUOTE_FIELD)), json!({}));
        assert_eq!(payload.len(), 1);
        assert!(!payload.contains_key(TASK_FIELD));
    }

    #[test]
    fn test_quote_has_one_entry_per_product() {
        let basket = vec![
            BasketItem::new(ProductId::new(10), 2)
                .with_variant(VariantId::new(100))
                .with_option(OptionId::new(1000)),
            BasketItem::new(ProductId::new(11), 1),
            BasketItem::new(ProductId::new(12), 5).with_variant(VariantId::new(120)),
        ];

        let quote = create_quote(&basket);

        assert_eq!(quote.len(), 3);
        assert_eq!(
            quote["10"],
            json!({"qty": 2, "variantID": 100, "optionID": 1000})
        );
        assert_eq!(quote["11"], json!({"qty": 1}));
        assert_eq!(quote["12"], json!({"qty": 5, "variantID": 120}));
    }

    #[test]
    fn test_quote_same_product_last_line_wins() {
        let basket = vec![
            BasketItem::new(ProductId::new(10), 2),
            BasketItem::new(ProductId::new(10), 7),
        ];

        let quote = create_quote(&basket);

        assert_eq!(quote.len(), 1);
        assert_eq!(quote["10"]["qty"], 7);
    }

    #[test]
    fn test_task_wire_values() {
        assert_eq!(CheckoutTask::GetPaymentMethods.as_str(), "GETPAYMENTMETHODS");
        assert_eq!(CheckoutTask::Checkout.as_str(), "CHECKOUT");
    }
}
