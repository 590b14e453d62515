use super::CliError;
use acra_core::modules::serialization::encode_json_document;
use anyhow::Context;
use serde::Serialize;
use std::io::Write;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "warn";

/// Logs go to stderr; stdout carries only the result document.
pub(super) fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub(super) fn write_stdout_document<T: Serialize>(document: &T) -> Result<(), CliError> {
    let encoded = encode_json_document(document).map_err(CliError::Compute)?;
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&encoded)
        .and_then(|()| stdout.flush())
        .context("failed to write result document to stdout")?;
    Ok(())
}
