//! Vitrine CLI entrypoint for catalog reviews and log viewing.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use tracing_subscriber::EnvFilter;
use vitrine::{CatalogError, OperationMode, VitrineConfig};

const USAGE_HINT: &str = concat!(
    "nothing to do: use --logs-file to view logs, --product-id with --review-text to add a ",
    "review, --product-id --review-id with --review-text to edit or with --delete to delete ",
    "it, or --product-id --delete to delete a product",
);

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run() -> Result<(), CatalogError> {
    let config = load_config()?;
    config.validate()?;

    match config.operation_mode() {
        OperationMode::ViewLogs => cli::logs::run(&config),
        OperationMode::AddReview => cli::reviews::add(&config).await,
        OperationMode::EditReview => cli::reviews::edit(&config).await,
        OperationMode::DeleteReview => cli::reviews::delete(&config).await,
        OperationMode::DeleteProduct => cli::products::delete(&config).await,
        OperationMode::Usage => Err(CatalogError::Configuration {
            message: USAGE_HINT.to_owned(),
        }),
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`CatalogError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<VitrineConfig, CatalogError> {
    VitrineConfig::load().map_err(|error| CatalogError::Configuration {
        message: error.to_string(),
    })
}
