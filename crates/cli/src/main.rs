//! Sofa CLI - Drive the checkout backend from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Print the form body for a model (offline)
//! sofa-cli encode -m model.yaml -b basket.json --task checkout
//!
//! # Look up payment and shipping methods
//! sofa-cli methods -m model.yaml -b basket.json
//!
//! # Submit the checkout
//! sofa-cli checkout -m model.yaml -b basket.json
//!
//! # Summary and activation for a token
//! sofa-cli summary -t 4f2a
//! sofa-cli activate -t 4f2a
//! ```
//!
//! # Commands
//!
//! - `encode` - Show the encoded request without sending it
//! - `methods` - Payment and shipping method lookup
//! - `checkout` - Checkout submission
//! - `summary` - Order summary for a token
//! - `activate` - Order activation for a token

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use sentry::integrations::tracing as sentry_tracing;
use sofa_checkout::CheckoutTask;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "sofa-cli")]
#[command(author, version, about = "Sofa checkout CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the form-encoded request for a model without sending it
    Encode {
        /// Checkout model file (.json, .yaml)
        #[arg(short, long)]
        model: PathBuf,

        /// Basket file (.json, .yaml)
        #[arg(short, long)]
        basket: Option<PathBuf>,

        /// Backend task to encode for
        #[arg(short, long, value_enum, default_value = "get-payment-methods")]
        task: TaskArg,
    },
    /// Look up payment and shipping methods for a model
    Methods {
        /// Checkout model file (.json, .yaml)
        #[arg(short, long)]
        model: PathBuf,

        /// Basket file (.json, .yaml)
        #[arg(short, long)]
        basket: Option<PathBuf>,
    },
    /// Submit a model for checkout and print the token
    Checkout {
        /// Checkout model file (.json, .yaml)
        #[arg(short, long)]
        model: PathBuf,

        /// Basket file (.json, .yaml)
        #[arg(short, long)]
        basket: Option<PathBuf>,
    },
    /// Print the summary for a checkout token
    Summary {
        /// Checkout token
        #[arg(short, long)]
        token: String,
    },
    /// Activate the order for a checkout token
    Activate {
        /// Checkout token
        #[arg(short, long)]
        token: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TaskArg {
    GetPaymentMethods,
    Checkout,
}

impl From<TaskArg> for CheckoutTask {
    fn from(task: TaskArg) -> Self {
        match task {
            TaskArg::GetPaymentMethods => Self::GetPaymentMethods,
            TaskArg::Checkout => Self::Checkout,
        }
    }
}

/// Initialize Sentry error tracking if `SENTRY_DSN` is set.
fn init_sentry() -> Option<sentry::ClientInitGuard> {
    let dsn = std::env::var("SENTRY_DSN").ok()?;

    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    )))
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Load .env before reading SENTRY_DSN or RUST_LOG
    dotenvy::dotenv().ok();

    let _sentry_guard = init_sentry();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sofa_cli=info,sofa_checkout=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Encode {
            model,
            basket,
            task,
        } => commands::checkout::encode(&model, basket.as_deref(), task.into()).await,
        Commands::Methods { model, basket } => {
            commands::checkout::methods(&model, basket.as_deref()).await
        }
        Commands::Checkout { model, basket } => {
            commands::checkout::checkout(&model, basket.as_deref()).await
        }
        Commands::Summary { token } => commands::checkout::summary(&token).await,
        Commands::Activate { token } => commands::checkout::activate(&token).await,
    }
}
