//! Normalization of unwrapped backend responses.
//!
//! The backend uses its own address and totals layouts and sends prices as
//! strings. Everything here maps those shapes onto the canonical records in
//! `sofa-core`.

use serde_json::{Number, Value};
use sofa_core::{
    Address, CheckoutSummary, CheckoutToken, Country, OrderSummary, SupportedCheckoutMethods,
};

/// Decode the payment/shipping method lookup, coercing each payment
/// method's `surcharge` and each shipping method's `price` to a number.
///
/// # Errors
///
/// Returns an error if the response is not an object of method lists.
pub fn supported_methods(mut data: Value) -> Result<SupportedCheckoutMethods, serde_json::Error> {
    coerce_each(&mut data, "paymentMethods", "surcharge");
    coerce_each(&mut data, "shippingMethods", "price");
    serde_json::from_value(data)
}

/// Extract the checkout token. A falsy token (absent, `null`, `""`, `0`,
/// `false`) is `None`.
#[must_use]
pub fn checkout_token(data: &Value) -> Option<CheckoutToken> {
    let token = data.get("token").filter(|t| is_truthy(t))?;

    match token {
        Value::String(token) => Some(CheckoutToken::new(token.clone())),
        Value::Number(token) => Some(CheckoutToken::new(token.to_string())),
        _ => None,
    }
}

/// Build the summary page data from a summary response.
#[must_use]
pub fn checkout_summary(data: Value) -> CheckoutSummary {
    CheckoutSummary {
        invoice_address: convert_address(data.get("billing")),
        shipping_address: convert_address(data.get("shipping")),
        summary: convert_summary(data.get("totals")),
        response: data,
    }
}

/// Convert a backend summary address to the canonical address.
#[must_use]
pub fn convert_address(raw: Option<&Value>) -> Address {
    let field = |key: &str| scalar_text(raw.and_then(|r| r.get(key)));

    let country = raw
        .and_then(|r| r.get("country"))
        .is_some_and(is_truthy)
        .then(|| Country {
            value: field("country"),
            label: field("countryname"),
        });

    Address {
        company: field("company"),
        salutation: field("salutation"),
        surname: field("lastname"),
        name: field("firstname"),
        street: field("street1"),
        zip: field("zip"),
        city: field("city"),
        country,
        email: field("email"),
        telephone: field("telephone"),
    }
}

/// Convert backend totals to the canonical order summary.
#[must_use]
pub fn convert_summary(raw: Option<&Value>) -> OrderSummary {
    let field = |key: &str| scalar_text(raw.and_then(|r| r.get(key)));

    OrderSummary {
        sum: field("subtotal"),
        shipping: field("shipping"),
        surcharge: field("surcharge"),
        vat: field("vat"),
        total: field("grandtotal"),
    }
}

/// Parse the longest numeric prefix of a string, ignoring leading
/// whitespace. Returns `None` if there is no finite number at the start.
#[must_use]
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut end = digits_from(sign);
    let mut has_digits = end > sign;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if frac_end > end + 1 {
            has_digits = true;
            end = frac_end;
        }
    }

    if !has_digits {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + sign);
        if exp_end > end + 1 + sign {
            end = exp_end;
        }
    }

    s.get(..end)?.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Coerce `field` of every entry in the `list` array to a JSON number.
fn coerce_each(data: &mut Value, list: &str, field: &str) {
    let Some(entries) = data.get_mut(list).and_then(Value::as_array_mut) else {
        return;
    };

    for entry in entries.iter_mut().filter_map(Value::as_object_mut) {
        let coerced = coerce_float(entry.get(field));
        entry.insert(field.to_string(), coerced);
    }
}

fn coerce_float(value: Option<&Value>) -> Value {
    match value {
        Some(Value::Number(n)) => Value::Number(n.clone()),
        Some(Value::String(s)) => parse_float_prefix(s)
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number),
        _ => Value::Null,
    }
}

/// Whether a backend value counts as set: `null`, `false`, zero and the
/// empty string do not.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a scalar as text; missing, null, and structured values are empty.
fn scalar_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
