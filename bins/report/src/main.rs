//! Autonomo summaries report
//!
//! Reads a workspace's settings and records from JSON files, computes month or
//! quarter summaries and prints them as JSON on stdout. Logs go to stderr.

use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use autonomo_core::{InMemoryRecordStore, Record, RecordItem, Settings, SummariesService};
use autonomo_shared::config::Granularity;
use autonomo_shared::types::{RecordId, WorkspaceId};
use autonomo_shared::{AppConfig, AppError};

/// Recorded as creator of every loaded item.
const ACTOR: &str = "autonomo-report";

/// One entry of the records file.
#[derive(Debug, Deserialize)]
struct RecordInput {
    #[serde(default)]
    record_id: Option<RecordId>,
    record: Record,
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "autonomo=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::load()
        .map_err(AppError::from)
        .context("Failed to load configuration")?;
    let workspace_id = WorkspaceId::parse(config.input.workspace_id.clone())?;

    let settings: Settings = read_json(&config.input.settings_path)?;
    let inputs: Vec<RecordInput> = read_json(&config.input.records_path)?;

    let mut store = InMemoryRecordStore::new();
    let now = Utc::now();
    for input in inputs {
        let item = RecordItem::new(workspace_id.clone(), input.record, input.record_id, ACTOR, now);
        store.insert(item).map_err(log_failure)?;
    }
    info!(%workspace_id, records = store.len(), year = settings.year, "Loaded records");

    let service = SummariesService::new(&store);
    let response = match config.output.granularity {
        Granularity::Month => serde_json::to_value(
            service
                .month_summaries(&workspace_id, &settings)
                .map_err(log_failure)?,
        )?,
        Granularity::Quarter => serde_json::to_value(
            service
                .quarter_summaries(&workspace_id, &settings)
                .map_err(log_failure)?,
        )?,
    };

    let rendered = if config.output.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{rendered}");

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

fn log_failure(err: impl Into<AppError>) -> AppError {
    let err = err.into();
    error!(code = err.error_code(), status = err.status_code(), "{err}");
    err
}
