//! Checkout gateway commands.
//!
//! # Usage
//!
//! ```bash
//! # Show the form body that would be sent, without any network access
//! sofa-cli encode -m model.yaml -b basket.json
//!
//! # Look up payment and shipping methods
//! sofa-cli methods -m model.yaml -b basket.json
//!
//! # Submit the checkout and print the token
//! sofa-cli checkout -m model.yaml -b basket.json
//!
//! # Fetch the summary, then activate the order
//! sofa-cli summary -t <token>
//! sofa-cli activate -t <token>
//! ```
//!
//! # Environment Variables
//!
//! - `SOFA_CHECKOUT_URL` - Base URL of the checkout backend (required for network commands)
//! - `SOFA_CHECKOUT_TIMEOUT_SECS` - Optional request timeout
//! - `SOFA_CHECKOUT_USER_AGENT` - Optional user agent

use std::path::Path;

use serde::Serialize;
use sofa_checkout::{CheckoutConfig, CheckoutGateway, CheckoutTask, HttpTransport};
use sofa_core::{BasketItem, CheckoutToken};
use tracing::{info, warn};

use super::CommandError;
use super::fixtures::{load_basket, load_model};

type Gateway = CheckoutGateway<HttpTransport, Vec<BasketItem>>;

/// Print the form-encoded body for a model without sending it.
///
/// # Errors
///
/// Returns error if the fixture files cannot be loaded.
pub async fn encode(
    model_path: &Path,
    basket_path: Option<&Path>,
    task: CheckoutTask,
) -> Result<(), CommandError> {
    let model = load_model(model_path).await?;
    let basket = load_basket(basket_path).await?;

    let Some(mut payload) = sofa_checkout::encoder::encode(Some(&model), &basket) else {
        warn!("Nothing to send");
        return Ok(());
    };
    payload.insert(sofa_checkout::encoder::TASK_FIELD, task.as_str());

    for (key, value) in payload.iter() {
        info!(field = key, value, "Form field");
    }

    print_line(&payload.to_form_string());
    Ok(())
}

/// Look up available payment and shipping methods.
///
/// # Errors
///
/// Returns error if configuration is missing or the request fails.
pub async fn methods(model_path: &Path, basket_path: Option<&Path>) -> Result<(), CommandError> {
    let model = load_model(model_path).await?;
    let gateway = connect(load_basket(basket_path).await?)?;

    match gateway.get_supported_checkout_methods(Some(&model)).await? {
        Some(methods) => print_json(&methods),
        None => {
            warn!("Backend returned no checkout methods");
            Ok(())
        }
    }
}

/// Submit a checkout and print the resulting token.
///
/// # Errors
///
/// Returns error if configuration is missing or the request fails.
pub async fn checkout(model_path: &Path, basket_path: Option<&Path>) -> Result<(), CommandError> {
    let model = load_model(model_path).await?;
    let gateway = connect(load_basket(basket_path).await?)?;

    match gateway.checkout(Some(&model)).await? {
        Some(token) => {
            info!(%token, "Checkout accepted");
            print_line(token.as_str());
        }
        None => warn!("Backend returned no checkout token"),
    }
    Ok(())
}

/// Print the addresses and totals for a checkout token.
///
/// # Errors
///
/// Returns error if configuration is missing or the request fails.
pub async fn summary(token: &str) -> Result<(), CommandError> {
    let gateway = connect(Vec::new())?;

    match gateway.get_summary(&CheckoutToken::new(token)).await? {
        Some(summary) => print_json(&summary),
        None => {
            warn!("Backend returned no summary");
            Ok(())
        }
    }
}

/// Activate the order for a checkout token.
///
/// # Errors
///
/// Returns error if configuration is missing or the request fails.
pub async fn activate(token: &str) -> Result<(), CommandError> {
    let gateway = connect(Vec::new())?;

    match gateway.activate_order(&CheckoutToken::new(token)).await? {
        Some(confirmation) => {
            info!("Order activated");
            print_json(&confirmation)
        }
        None => {
            warn!("Backend returned no confirmation");
            Ok(())
        }
    }
}

fn connect(basket: Vec<BasketItem>) -> Result<Gateway, CommandError> {
    let config = CheckoutConfig::from_env()?;
    info!(url = %config.checkout_url(), "Using checkout backend");

    let transport = HttpTransport::new(&config)?;
    Ok(CheckoutGateway::new(transport, config, basket))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CommandError> {
    let rendered = serde_json::to_string_pretty(value).map_err(CommandError::Output)?;
    print_line(&rendered);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_line(line: &str) {
    println!("{line}");
}
