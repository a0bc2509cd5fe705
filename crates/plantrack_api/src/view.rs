//! Serializable view models returned inside API envelopes.
//!
//! # Invariants
//! - Dates shown to users are `DD/MM/YYYY`; machine keys stay ISO.
//! - Bar widths already carry the rendering floor.

use plantrack_core::date::{day_key, display_date, format_display_date};
use plantrack_core::layout::labels::{agenda_day_label, month_title};
use plantrack_core::layout::{BarStatus, EventBucket, GanttAxis, GanttRow};
use plantrack_core::stats::UpcomingDeadline;
use plantrack_core::{CountEntry, DashboardSummary, DatedEvent, Record, RecordFields};
use serde::Serialize;
use std::collections::BTreeMap;

/// Cascade result for one filtered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CascadeView<'a> {
    pub filtered: Vec<&'a Record>,
    pub options: BTreeMap<String, Vec<String>>,
    pub selections: BTreeMap<String, String>,
    /// Row count before filtering.
    pub total: usize,
}

/// Calendar grouping requested by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarGranularity {
    Month,
    Day,
}

impl CalendarGranularity {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "month" => Some(Self::Month),
            "day" | "agenda" => Some(Self::Day),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEventView {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub display_date: String,
    pub title: String,
    pub code: Option<String>,
    pub category: &'static str,
    pub caption: &'static str,
}

impl CalendarEventView {
    fn from_event(event: &DatedEvent<'_>) -> Self {
        Self {
            date: day_key(event.date),
            display_date: display_date(event.date),
            title: event.title.clone(),
            code: event.code.clone(),
            category: event.category.as_str(),
            caption: event.category.caption(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarBucketView {
    pub key: String,
    pub title: String,
    pub events: Vec<CalendarEventView>,
}

impl CalendarBucketView {
    pub fn from_bucket(bucket: &EventBucket<'_, '_>, granularity: CalendarGranularity) -> Self {
        let title = match granularity {
            CalendarGranularity::Month => month_title(bucket.date),
            CalendarGranularity::Day => agenda_day_label(bucket.date),
        };
        Self {
            key: bucket.key.clone(),
            title,
            events: bucket
                .events
                .iter()
                .map(|event| CalendarEventView::from_event(event))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GanttRowView {
    pub id: String,
    pub code: Option<String>,
    pub name: Option<String>,
    pub responsible: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub left_pct: f64,
    pub width_pct: f64,
    pub status: BarStatus,
    pub css_class: &'static str,
    pub duration_label: String,
}

impl GanttRowView {
    pub fn from_row(row: &GanttRow<'_>, min_bar_width_pct: f64) -> Self {
        Self {
            id: row.item.id.clone(),
            code: row.item.code.clone(),
            name: row.item.name.clone(),
            responsible: row.item.responsible.clone(),
            start_date: display_date(row.item.start_date),
            end_date: display_date(row.item.end_date),
            left_pct: row.placement.left_pct,
            width_pct: row.placement.display_width_pct(min_bar_width_pct),
            status: row.status,
            css_class: row.status.css_class(),
            duration_label: row.duration_label.clone(),
        }
    }
}

/// Timeline payload. `axis` is `None` when no row has both dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GanttView {
    pub axis: Option<GanttAxis>,
    pub rows: Vec<GanttRowView>,
    pub today_pct: Option<f64>,
    pub options: BTreeMap<String, Vec<String>>,
    pub selections: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpcomingView {
    pub code: Option<String>,
    pub name: Option<String>,
    pub responsible: Option<String>,
    pub end_date: String,
}

impl UpcomingView {
    pub fn from_deadline(deadline: &UpcomingDeadline<'_>, fields: &RecordFields) -> Self {
        Self {
            code: deadline.record.text(&fields.code),
            name: deadline.record.text(&fields.name),
            responsible: deadline.record.text(&fields.responsible),
            end_date: format_display_date(deadline.record.get(&fields.end_date)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsView {
    pub summary: DashboardSummary,
    pub by_status: Vec<CountEntry>,
    pub by_product: Vec<CountEntry>,
    pub upcoming: Vec<UpcomingView>,
}
