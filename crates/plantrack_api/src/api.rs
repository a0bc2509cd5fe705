//! Use-case API for the dashboard host.
//!
//! # Responsibility
//! - Expose stable, view-level functions that take and return JSON text.
//! - Keep error semantics simple: every call answers with an envelope.
//!
//! # Invariants
//! - Exported functions never panic.
//! - Wall-clock time is read only when the caller passes no instant.
//! - The engine config is fixed after the first successful `configure`.

use crate::view::{
    CalendarBucketView, CalendarGranularity, CascadeView, GanttRowView, GanttView, StatsView,
    UpcomingView,
};
use chrono::{DateTime, Utc};
use log::{info, warn};
use plantrack_core::{
    apply_cascade, bucket_by_day, bucket_by_month, build_gantt, collect_events,
    core_version as core_version_inner, init_logging_with, ping as ping_inner, product_breakdown,
    records_from_json, search_records, status_breakdown, summarize, upcoming_deadlines,
    EngineConfig, FilterPreset, FilterSet, FilterSpec, FilterState, LoggingConfig, Record,
    TimelineItem,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

static ENGINE_CONFIG: OnceLock<EngineConfig> = OnceLock::new();
static DEFAULT_CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Response envelope shared by every view call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    /// Whether the call succeeded.
    pub ok: bool,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
    /// View payload; `None` on failure.
    pub payload: Option<Value>,
}

impl ApiResponse {
    fn success(message: impl Into<String>, payload: impl Serialize) -> Self {
        match serde_json::to_value(payload) {
            Ok(value) => Self {
                ok: true,
                message: message.into(),
                payload: Some(value),
            },
            Err(err) => Self::failure(format!("payload encoding failed: {err}")),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            payload: None,
        }
    }

    /// Compact JSON form of the envelope.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            format!(r#"{{"ok":false,"message":"envelope encoding failed: {err}","payload":null}}"#)
        })
    }
}

/// Minimal health-check API for host smoke tests.
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Exposes the core crate version.
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// Rotation limits come from the active engine config. Returns an empty
/// string on success and the error message on failure.
pub fn init_logging(level: String, log_dir: String) -> String {
    let config = LoggingConfig {
        level,
        ..active_config().logging.clone()
    };
    match init_logging_with(&config, log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Installs the engine config from a JSON document.
///
/// Returns an empty string on success and the error message on failure.
/// Repeating the call with an equal config is a no-op; a different config
/// after the first one is rejected.
pub fn configure(config_json: String) -> String {
    match EngineConfig::from_json_str(&config_json) {
        Ok(config) => configure_with(config),
        Err(err) => format!("configure failed: {err}"),
    }
}

/// Installs an already-built engine config. See [`configure`].
pub fn configure_with(config: EngineConfig) -> String {
    if let Err(err) = config.validate() {
        return format!("configure failed: {err}");
    }
    if let Some(active) = ENGINE_CONFIG.get() {
        return if *active == config {
            String::new()
        } else {
            "configure failed: engine config already set".to_string()
        };
    }
    match ENGINE_CONFIG.set(config) {
        Ok(()) => {
            info!("event=config_apply module=api status=ok");
            String::new()
        }
        Err(rejected) => {
            let same = ENGINE_CONFIG.get().is_some_and(|active| *active == rejected);
            if same {
                String::new()
            } else {
                "configure failed: engine config already set".to_string()
            }
        }
    }
}

/// Engine config in effect: the configured one, or defaults.
pub fn active_config() -> &'static EngineConfig {
    match ENGINE_CONFIG.get() {
        Some(config) => config,
        None => DEFAULT_CONFIG.get_or_init(EngineConfig::default),
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CascadeRequest {
    /// Named view preset; `filters` is used when absent.
    #[serde(default)]
    preset: Option<String>,
    #[serde(default)]
    filters: Vec<FilterSpec>,
    #[serde(default)]
    values: FilterState,
    /// Rows that are not JSON objects are skipped.
    #[serde(default)]
    data: Vec<Value>,
    /// Free-text overlay applied to the cascade result.
    #[serde(default)]
    search: String,
}

/// Runs the cascading filter over one dataset.
///
/// Request shape:
/// `{"preset": "plan", "values": {"filterProduct": "A1"}, "data": [...], "search": "informe"}`
/// or explicit `"filters": [{"field_id": "...", "key": "...", "control": "select"}]`
/// instead of `preset`.
pub fn cascade_filters(request_json: String) -> ApiResponse {
    let request = match serde_json::from_str::<CascadeRequest>(&request_json) {
        Ok(request) => request,
        Err(err) => return fail("cascade_filters", format!("invalid request: {err}")),
    };
    let config = active_config();

    let (filters, search_keys) = match request.preset.as_deref() {
        Some(raw) => {
            let Some(preset) = FilterPreset::parse(raw) else {
                return fail("cascade_filters", format!("unknown preset `{raw}`"));
            };
            match preset.filter_set(&config.fields) {
                Ok(filters) => (filters, preset.search_keys(&config.fields)),
                Err(err) => return fail("cascade_filters", err.to_string()),
            }
        }
        None => match FilterSet::new(request.filters) {
            Ok(filters) => (filters, Vec::new()),
            Err(err) => return fail("cascade_filters", err.to_string()),
        },
    };

    let rows = request
        .data
        .into_iter()
        .filter_map(Record::from_value)
        .collect::<Vec<_>>();
    let outcome = apply_cascade(&rows, &filters, &request.values, config.match_mode);
    let filtered = if search_keys.is_empty() {
        outcome.filtered
    } else {
        search_records(outcome.filtered, &request.search, &search_keys)
    };
    let message = format!("{} of {} row(s).", filtered.len(), rows.len());
    ApiResponse::success(
        message,
        CascadeView {
            filtered,
            options: outcome.options,
            selections: outcome.selections,
            total: rows.len(),
        },
    )
}

/// Groups delivery and milestone events for the calendar view.
///
/// `granularity` is `month` (default when blank) or `day`/`agenda`.
pub fn calendar_view(
    plan_json: String,
    milestones_json: String,
    granularity: String,
) -> ApiResponse {
    let Some(granularity) = CalendarGranularity::parse(&granularity) else {
        return fail("calendar_view", format!("unknown granularity `{granularity}`"));
    };
    let (plan, milestones) = match (
        parse_dataset("plan", &plan_json),
        parse_dataset("milestones", &milestones_json),
    ) {
        (Ok(plan), Ok(milestones)) => (plan, milestones),
        (Err(err), _) | (_, Err(err)) => return fail("calendar_view", err),
    };

    let events = collect_events(&plan, &milestones, &active_config().fields);
    let buckets = match granularity {
        CalendarGranularity::Month => bucket_by_month(&events),
        CalendarGranularity::Day => bucket_by_day(&events),
    };
    let views = buckets
        .iter()
        .map(|bucket| CalendarBucketView::from_bucket(bucket, granularity))
        .collect::<Vec<_>>();
    let message = if views.is_empty() {
        "No events.".to_string()
    } else {
        format!("{} event(s) in {} group(s).", events.len(), views.len())
    };
    ApiResponse::success(message, views)
}

/// Filters the plan with the timeline controls and lays out the chart.
///
/// `values_json` holds the control values (`{"ganttFilterProduct": "A1"}`);
/// blank means no filter. `now_rfc3339` pins the clock; blank reads it.
pub fn gantt_view(plan_json: String, values_json: String, now_rfc3339: String) -> ApiResponse {
    let plan = match parse_dataset("plan", &plan_json) {
        Ok(plan) => plan,
        Err(err) => return fail("gantt_view", err),
    };
    let values = match parse_values(&values_json) {
        Ok(values) => values,
        Err(err) => return fail("gantt_view", err),
    };
    let now = match resolve_now(&now_rfc3339) {
        Ok(now) => now,
        Err(err) => return fail("gantt_view", err),
    };
    let config = active_config();
    let filters = match FilterPreset::Gantt.filter_set(&config.fields) {
        Ok(filters) => filters,
        Err(err) => return fail("gantt_view", err.to_string()),
    };

    let outcome = apply_cascade(&plan, &filters, &values, config.match_mode);
    let items = outcome
        .filtered
        .iter()
        .filter_map(|record| TimelineItem::from_record(record, &config.fields))
        .collect::<Vec<_>>();
    let chart = build_gantt(&items, now, &config.statuses, &config.gantt);

    let view = match chart {
        Some(chart) => GanttView {
            rows: chart
                .rows
                .iter()
                .map(|row| GanttRowView::from_row(row, config.gantt.min_bar_width_pct))
                .collect(),
            axis: Some(chart.axis),
            today_pct: chart.today_pct,
            options: outcome.options,
            selections: outcome.selections,
        },
        None => GanttView {
            axis: None,
            rows: Vec::new(),
            today_pct: None,
            options: outcome.options,
            selections: outcome.selections,
        },
    };
    let message = if view.rows.is_empty() {
        "No timeline items.".to_string()
    } else {
        format!("{} bar(s).", view.rows.len())
    };
    ApiResponse::success(message, view)
}

/// Headline counters, breakdowns and upcoming deadlines.
pub fn dashboard_stats(
    plan_json: String,
    milestones_json: String,
    now_rfc3339: String,
) -> ApiResponse {
    let (plan, milestones) = match (
        parse_dataset("plan", &plan_json),
        parse_dataset("milestones", &milestones_json),
    ) {
        (Ok(plan), Ok(milestones)) => (plan, milestones),
        (Err(err), _) | (_, Err(err)) => return fail("dashboard_stats", err),
    };
    let now = match resolve_now(&now_rfc3339) {
        Ok(now) => now,
        Err(err) => return fail("dashboard_stats", err),
    };
    let config = active_config();

    let deadlines = upcoming_deadlines(
        &plan,
        now,
        &config.fields,
        &config.statuses,
        &config.upcoming,
    );
    let upcoming = deadlines
        .iter()
        .map(|deadline| UpcomingView::from_deadline(deadline, &config.fields))
        .collect();
    let view = StatsView {
        summary: summarize(&plan, milestones.len(), &config.fields, &config.statuses),
        by_status: status_breakdown(&plan, &config.fields, &config.statuses),
        by_product: product_breakdown(&plan, &config.fields),
        upcoming,
    };
    ApiResponse::success(format!("{} plan row(s).", view.summary.total), view)
}

fn fail(operation: &str, message: impl Into<String>) -> ApiResponse {
    let message = message.into();
    warn!("event=api_call module=api status=error op={operation}");
    ApiResponse::failure(format!("{operation} failed: {message}"))
}

fn parse_dataset(label: &str, text: &str) -> Result<Vec<Record>, String> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    records_from_json(text).map_err(|err| format!("invalid {label} dataset: {err}"))
}

fn parse_values(text: &str) -> Result<FilterState, String> {
    if text.trim().is_empty() {
        return Ok(FilterState::new());
    }
    serde_json::from_str(text).map_err(|err| format!("invalid filter values: {err}"))
}

fn resolve_now(text: &str) -> Result<DateTime<Utc>, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Utc::now());
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|err| format!("invalid instant `{trimmed}`: {err}"))
}

#[cfg(test)]
mod tests {
    use super::{
        calendar_view, cascade_filters, configure, core_version, dashboard_stats, gantt_view,
        init_logging, ping,
    };
    use serde_json::{json, Value};

    fn plan_json() -> String {
        json!([
            {"id": 1, "productCode": "A1", "primaryResponsible": "Ana", "activityCode": "1.1",
             "startDate": "2024-03-01", "endDate": "2024-03-10", "status": "En Progreso"},
            {"id": 2, "productCode": "A2", "primaryResponsible": "Luis", "activityCode": "1.2",
             "startDate": "2024-03-15", "endDate": "2024-03-20", "status": "Completado"}
        ])
        .to_string()
    }

    fn payload(response: &super::ApiResponse) -> &Value {
        assert!(response.ok, "{}", response.message);
        response.payload.as_ref().unwrap()
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn configure_rejects_invalid_documents() {
        assert!(configure("{not json".to_string()).contains("configure failed"));
        assert!(configure(r#"{"gantt": {"min_bar_width_pct": 400.0}}"#.to_string())
            .contains("min_bar_width_pct"));
        assert!(configure(r#"{"colour": "red"}"#.to_string()).contains("configure failed"));
    }

    #[test]
    fn cascade_with_preset_and_search() {
        let request = json!({
            "preset": "plan",
            "values": {"filterResp": "Ana"},
            "data": serde_json::from_str::<Value>(&plan_json()).unwrap(),
        });
        let response = cascade_filters(request.to_string());
        let body = payload(&response);

        assert_eq!(body["filtered"].as_array().unwrap().len(), 1);
        assert_eq!(body["total"], 2);
        assert_eq!(body["options"]["filterProduct"], json!(["A1"]));
        assert_eq!(body["selections"]["filterResp"], "Ana");
    }

    #[test]
    fn cascade_with_explicit_filters() {
        let request = json!({
            "filters": [{"field_id": "p", "key": "productCode"}],
            "values": {"p": "A"},
            "data": [{"productCode": "A1"}, {"productCode": "B1"}],
        });
        let response = cascade_filters(request.to_string());
        assert_eq!(payload(&response)["filtered"], json!([{"productCode": "A1"}]));
    }

    #[test]
    fn cascade_skips_rows_that_are_not_objects() {
        let request = json!({
            "filters": [{"field_id": "p", "key": "productCode"}],
            "values": {"p": ""},
            "data": [{"productCode": "A1"}, 5, "B1", null],
        });
        let response = cascade_filters(request.to_string());
        assert!(response.ok);
        let body = payload(&response);
        assert_eq!(body["filtered"], json!([{"productCode": "A1"}]));
        assert_eq!(body["total"], 1);
        assert_eq!(body["options"]["p"], json!(["A1"]));
    }

    #[test]
    fn cascade_reports_bad_requests() {
        let response = cascade_filters(r#"{"preset": "nope"}"#.to_string());
        assert!(!response.ok);
        assert!(response.message.contains("unknown preset"));
        assert!(response.payload.is_none());

        let duplicate = json!({
            "filters": [{"field_id": "p", "key": "a"}, {"field_id": "p", "key": "b"}]
        });
        assert!(!cascade_filters(duplicate.to_string()).ok);
        assert!(!cascade_filters("{not json".to_string()).ok);
    }

    #[test]
    fn gantt_view_filters_and_places_bars() {
        let response = gantt_view(
            plan_json(),
            r#"{"ganttFilterProduct": "A1"}"#.to_string(),
            "2024-03-05T09:00:00Z".to_string(),
        );
        let body = payload(&response);
        let rows = body["rows"].as_array().unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], "1");
        assert_eq!(rows[0]["status"], "active");
        assert_eq!(rows[0]["css_class"], "bar-active");
        assert_eq!(rows[0]["start_date"], "01/03/2024");
        assert_eq!(body["axis"]["min_date"], "2024-02-01");
        assert_eq!(body["axis"]["months"].as_array().unwrap().len(), 3);
        assert!(body["today_pct"].is_number());
    }

    #[test]
    fn gantt_view_without_dated_rows_has_no_axis() {
        let response = gantt_view("[]".to_string(), String::new(), String::new());
        let body = payload(&response);
        assert!(body["axis"].is_null());
        assert_eq!(response.message, "No timeline items.");
    }

    #[test]
    fn gantt_view_rejects_bad_instant() {
        let response = gantt_view(plan_json(), String::new(), "yesterday".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("invalid instant"));
    }

    #[test]
    fn calendar_view_groups_by_month_and_day() {
        let milestones = json!([{"name": "Revisión", "estimatedDate": "2024-03-10"}]).to_string();

        let months = calendar_view(plan_json(), milestones.clone(), "month".to_string());
        let body = payload(&months);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["title"], "marzo de 2024");
        assert_eq!(body[0]["events"].as_array().unwrap().len(), 3);
        assert_eq!(body[0]["events"][1]["code"], "HITO");
        assert_eq!(body[0]["events"][1]["date"], "2024-03-10");
        assert_eq!(body[0]["events"][1]["display_date"], "10/03/2024");

        let days = calendar_view(plan_json(), milestones, "agenda".to_string());
        let body = payload(&days);
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["key"], "2024-03-10");
        assert_eq!(body[0]["title"], "domingo, 10 de marzo");

        assert!(!calendar_view(String::new(), String::new(), "week".to_string()).ok);
    }

    #[test]
    fn dashboard_stats_reports_counters() {
        let response = dashboard_stats(
            plan_json(),
            json!([{"name": "Cierre"}]).to_string(),
            "2024-03-01T00:00:00Z".to_string(),
        );
        let body = payload(&response);

        assert_eq!(body["summary"]["total"], 2);
        assert_eq!(body["summary"]["done"], 1);
        assert_eq!(body["summary"]["in_progress"], 1);
        assert_eq!(body["summary"]["milestones"], 1);
        assert_eq!(body["upcoming"][0]["code"], "1.1");
        assert_eq!(body["upcoming"][0]["end_date"], "10/03/2024");
        assert_eq!(body["by_product"][0]["label"], "A1");
    }
}
