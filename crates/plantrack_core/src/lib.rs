//! Core logic for the PlanTrack dashboard.
//! This crate is the single source of truth for filtering and layout rules.

pub mod config;
pub mod date;
pub mod filter;
pub mod layout;
pub mod logging;
pub mod model;
pub mod service;
pub mod stats;

pub use config::{ConfigError, ConfigResult, EngineConfig, LoggingConfig};
pub use date::{display_date, format_display_date, parse_calendar_date, parse_date_text};
pub use filter::{
    apply_cascade, search_records, should_recompute, CascadeOutcome, ControlKind, FilterPreset,
    FilterSet, FilterSetError, FilterSpec, FilterState, MatchMode, Trigger,
};
pub use layout::{
    bucket_by_day, bucket_by_month, build_gantt, classify_bar, collect_events, compute_axis,
    place_bar, timeline_items, today_marker_pct, BarPlacement, BarStatus, EventBucket, GanttAxis,
    GanttChart, GanttOptions,
};
pub use logging::{default_log_level, init_logging, init_logging_with, logging_status};
pub use model::event::{DatedEvent, EventCategory};
pub use model::fields::RecordFields;
pub use model::record::{records_from_json, Filterable, Record};
pub use model::status::StatusVocabulary;
pub use model::timeline::TimelineItem;
pub use service::filter_session::{FilterSession, SessionError};
pub use stats::{
    product_breakdown, status_breakdown, summarize, upcoming_deadlines, CountEntry,
    DashboardSummary, UpcomingDeadline, UpcomingOptions,
};

/// Minimal health-check API for facade smoke tests.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
