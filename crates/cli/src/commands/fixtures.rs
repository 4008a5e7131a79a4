//! Loading checkout models and baskets from fixture files.
//!
//! Files are JSON or YAML, chosen by extension. Models use the storefront
//! UI's camelCase field names:
//!
//! ```yaml
//! billingAddress:
//!   name: Jane
//!   surname: Doe
//!   country: { value: DE, label: Germany }
//! selectedPaymentMethod:
//!   method: { method: prepayment }
//! ```

use std::path::Path;

use serde::de::DeserializeOwned;
use sofa_core::{BasketItem, CheckoutModel};
use tracing::info;

use super::CommandError;

/// Load a checkout model.
///
/// # Errors
///
/// Returns error if the file cannot be read or parsed.
pub async fn load_model(path: &Path) -> Result<CheckoutModel, CommandError> {
    load(path).await
}

/// Load basket lines, or an empty basket if no file is given.
///
/// # Errors
///
/// Returns error if the file cannot be read or parsed.
pub async fn load_basket(path: Option<&Path>) -> Result<Vec<BasketItem>, CommandError> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };

    let basket: Vec<BasketItem> = load(path).await?;
    info!(items = basket.len(), "Loaded basket");
    Ok(basket)
}

async fn load<T: DeserializeOwned>(path: &Path) -> Result<T, CommandError> {
    let display = path.display().to_string();
    let format = Format::from_path(path)?;

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CommandError::Io {
            path: display.clone(),
            source,
        })?;

    match format {
        Format::Json => serde_json::from_str(&content).map_err(|source| CommandError::Json {
            path: display,
            source,
        }),
        Format::Yaml => serde_yaml::from_str(&content).map_err(|source| CommandError::Yaml {
            path: display,
            source,
        }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, CommandError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Ok(Self::Yaml)
            }
            _ => Err(CommandError::UnsupportedFormat(path.display().to_string())),
        }
    }
}
