//! Canonical address record used by checkout templates.

use serde::{Deserialize, Serialize};

/// A selectable country, as the storefront's country picker models it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// ISO country code (e.g., "DE").
    pub value: String,
    /// Human-readable country name.
    #[serde(default)]
    pub label: String,
}

impl Country {
    /// Create a new country option.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// An address in the storefront's canonical shape.
///
/// Every text field is an empty string when the source had no value. The
/// country is `None` when the source carried no country code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub company: String,
    pub salutation: String,
    /// Last name.
    pub surname: String,
    /// First name.
    pub name: String,
    pub street: String,
    pub zip: String,
    pub city: String,
    pub country: Option<Country>,
    pub email: String,
    pub telephone: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_address_serializes_null_country() {
        let json = serde_json::to_value(Address::default()).unwrap();
        assert!(json["country"].is_null());
        assert_eq!(json["street"], "");
    }

    #[test]
    fn test_country_label_defaults_to_empty() {
        let country: Country = serde_json::from_str(r#"{"value":"AT"}"#).unwrap();
        assert_eq!(country, Country::new("AT", ""));
    }
}
