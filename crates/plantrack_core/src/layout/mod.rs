//! Temporal layout for calendar and timeline views.
//!
//! # Responsibility
//! - Derive dated events and bucket them by UTC month/day.
//! - Compute the padded month axis and proportional bar placement.
//!
//! # Invariants
//! - Pure functions of their inputs plus an injected `now`.
//! - Empty input produces empty output, never an error.

pub mod calendar;
pub mod gantt;
pub mod labels;

pub use calendar::{
    bucket_by_day, bucket_by_month, collect_events, delivery_events, milestone_events,
    EventBucket,
};
pub use gantt::{
    build_gantt, classify_bar, compute_axis, compute_axis_padded, duration_label, place_bar,
    timeline_items, today_marker_pct, BarPlacement, BarStatus, GanttAxis, GanttChart,
    GanttOptions, GanttRow, MonthSlot,
};
