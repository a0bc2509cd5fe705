//! CLI smoke entry point.
//!
//! # Responsibility
//! - Load JSON snapshots from disk and print the computed dashboard views.
//! - Exercise the same facade calls a host would make.
//!
//! # Invariants
//! - Output is the view payload as pretty JSON on stdout; failures go to
//!   stderr with a non-zero exit.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use plantrack_api::ApiResponse;
use plantrack_core::{EngineConfig, FilterPreset, RecordFields};
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};

/// Print dashboard views computed from plan snapshots.
#[derive(Debug, Parser)]
#[command(name = "plantrack", version)]
struct Cli {
    /// Engine configuration file (JSON).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Read the snake_case/Spanish field names of the legacy plan API.
    #[arg(long, global = true)]
    legacy_fields: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check core linkage.
    Ping,
    /// Lay out the timeline chart.
    Gantt {
        plan: PathBuf,
        /// Timeline control value, `fieldId=value`.
        #[arg(long = "value", value_name = "ID=VALUE")]
        values: Vec<String>,
        /// Instant used for classification (RFC 3339). Defaults to now.
        #[arg(long)]
        now: Option<String>,
    },
    /// Group deliveries and milestones by month.
    Calendar {
        plan: PathBuf,
        milestones: Option<PathBuf>,
        /// Group by day instead of month.
        #[arg(long)]
        agenda: bool,
    },
    /// Print headline counters and upcoming deadlines.
    Stats {
        plan: PathBuf,
        milestones: Option<PathBuf>,
        #[arg(long)]
        now: Option<String>,
    },
    /// Run the cascading filter over a dataset.
    Filter {
        data: PathBuf,
        /// Ad-hoc filter, `fieldId=key=value`; value may be empty.
        #[arg(long = "filter", value_name = "ID=KEY=VALUE")]
        filters: Vec<String>,
        /// Use a view preset (`plan`, `gantt`, `hitos`, `documentos`, `repo`).
        #[arg(long, conflicts_with = "filters")]
        preset: Option<String>,
        /// Preset control value, `fieldId=value`.
        #[arg(long = "value", value_name = "ID=VALUE")]
        values: Vec<String>,
        /// Free-text overlay (plan and repo presets).
        #[arg(long)]
        search: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    configure(cli.config.as_deref(), cli.legacy_fields)?;

    let response = match cli.cmd {
        Command::Ping => {
            println!("plantrack_core ping={}", plantrack_api::ping());
            println!("plantrack_core version={}", plantrack_api::core_version());
            return Ok(());
        }
        Command::Gantt { plan, values, now } => plantrack_api::gantt_view(
            read_text(&plan)?,
            Value::Object(value_map(&values)?).to_string(),
            now.unwrap_or_default(),
        ),
        Command::Calendar {
            plan,
            milestones,
            agenda,
        } => plantrack_api::calendar_view(
            read_text(&plan)?,
            read_optional(milestones.as_deref())?,
            if agenda { "day" } else { "month" }.to_string(),
        ),
        Command::Stats {
            plan,
            milestones,
            now,
        } => plantrack_api::dashboard_stats(
            read_text(&plan)?,
            read_optional(milestones.as_deref())?,
            now.unwrap_or_default(),
        ),
        Command::Filter {
            data,
            filters,
            preset,
            values,
            search,
        } => {
            let request = filter_request(&read_text(&data)?, &filters, preset, &values, search)?;
            plantrack_api::cascade_filters(request.to_string())
        }
    };
    print_response(response)
}

fn configure(path: Option<&Path>, legacy_fields: bool) -> anyhow::Result<()> {
    let mut config = match path {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if legacy_fields {
        config.fields = RecordFields::legacy_wire();
    }
    let error = plantrack_api::configure_with(config);
    if !error.is_empty() {
        bail!(error);
    }
    Ok(())
}

fn filter_request(
    data: &str,
    filters: &[String],
    preset: Option<String>,
    values: &[String],
    search: Option<String>,
) -> anyhow::Result<Value> {
    let data: Value = serde_json::from_str(data).context("dataset is not valid JSON")?;
    let mut state = value_map(values)?;
    let mut specs = Vec::new();
    for raw in filters {
        let mut parts = raw.splitn(3, '=');
        let (Some(field_id), Some(key)) = (parts.next(), parts.next()) else {
            bail!("--filter expects ID=KEY=VALUE, got `{raw}`");
        };
        specs.push(json!({ "field_id": field_id, "key": key }));
        state.insert(
            field_id.to_string(),
            Value::String(parts.next().unwrap_or_default().to_string()),
        );
    }
    if let Some(name) = preset.as_deref() {
        if FilterPreset::parse(name).is_none() {
            bail!("unknown preset `{name}`");
        }
    }

    Ok(json!({
        "preset": preset,
        "filters": specs,
        "values": state,
        "data": data,
        "search": search.unwrap_or_default(),
    }))
}

fn value_map(pairs: &[String]) -> anyhow::Result<Map<String, Value>> {
    let mut map = Map::new();
    for raw in pairs {
        let Some((field_id, value)) = raw.split_once('=') else {
            bail!("--value expects ID=VALUE, got `{raw}`");
        };
        map.insert(field_id.to_string(), Value::String(value.to_string()));
    }
    Ok(map)
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_optional(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => read_text(path),
        None => Ok(String::new()),
    }
}

fn print_response(response: ApiResponse) -> anyhow::Result<()> {
    if !response.ok {
        bail!(response.message);
    }
    eprintln!("{}", response.message);
    let payload = response.payload.unwrap_or(Value::Null);
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
