//! Gantt axis and bar placement.
//!
//! # Responsibility
//! - Size a month axis around the visible items with padding on both ends.
//! - Place each bar as percentages of the axis span.
//! - Classify bars for styling and locate the "today" marker.
//!
//! # Invariants
//! - The axis starts on a first-of-month and ends on a last-of-month.
//! - `left_pct >= 0` and `width_pct >= 0` for every placement.
//! - Wall-clock time is always passed in; nothing here reads the clock.

use crate::date::{first_of_month, last_of_month, month_key, shift_month_start, start_of_day_utc};
use crate::layout::labels::axis_month_label;
use crate::model::fields::RecordFields;
use crate::model::record::Record;
use crate::model::status::StatusVocabulary;
use crate::model::timeline::TimelineItem;
use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

/// Layout tuning for the timeline chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GanttOptions {
    /// Whole months added before the earliest start and after the latest end.
    pub padding_months: u32,
    /// Rendering floor for bar width, in percent of the axis.
    pub min_bar_width_pct: f64,
}

impl Default for GanttOptions {
    fn default() -> Self {
        Self {
            padding_months: 1,
            min_bar_width_pct: 0.5,
        }
    }
}

/// One column of the month axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSlot {
    /// `YYYY-MM`.
    pub key: String,
    pub label: String,
    pub first_day: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GanttAxis {
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
    pub months: Vec<MonthSlot>,
}

impl GanttAxis {
    pub fn span_days(&self) -> i64 {
        (self.max_date - self.min_date).num_days()
    }
}

/// Horizontal bar position in percent of the axis span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarPlacement {
    pub left_pct: f64,
    pub width_pct: f64,
}

impl BarPlacement {
    pub fn right_pct(&self) -> f64 {
        self.left_pct + self.width_pct
    }

    /// Width with the rendering floor applied.
    pub fn display_width_pct(&self, min_width_pct: f64) -> f64 {
        self.width_pct.max(min_width_pct)
    }
}

/// Styling class of one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarStatus {
    Completed,
    Active,
    Late,
    Planned,
}

impl BarStatus {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Completed => "bar-completed",
            Self::Active => "bar-active",
            Self::Late => "bar-late",
            Self::Planned => "bar-planned",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GanttRow<'i> {
    pub item: &'i TimelineItem,
    pub placement: BarPlacement,
    pub status: BarStatus,
    pub duration_label: String,
}

/// Everything a timeline view needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GanttChart<'i> {
    pub axis: GanttAxis,
    pub rows: Vec<GanttRow<'i>>,
    /// Position of the today marker; `None` when today is off-axis.
    pub today_pct: Option<f64>,
}

/// Timeline items for plan rows carrying both dates.
pub fn timeline_items(records: &[Record], fields: &RecordFields) -> Vec<TimelineItem> {
    records
        .iter()
        .filter_map(|record| TimelineItem::from_record(record, fields))
        .collect()
}

/// Axis with one month of padding on each side.
///
/// Returns `None` for an empty item list: there is nothing to render.
pub fn compute_axis(items: &[TimelineItem]) -> Option<GanttAxis> {
    compute_axis_padded(items, 1)
}

/// Axis with `padding_months` of padding on each side.
pub fn compute_axis_padded(items: &[TimelineItem], padding_months: u32) -> Option<GanttAxis> {
    let earliest = items.iter().map(|item| item.start_date).min()?;
    let latest = items.iter().map(|item| item.end_date).max()?;
    let padding = i32::try_from(padding_months).unwrap_or(i32::MAX);

    let min_date = shift_month_start(earliest, -padding);
    let max_date = last_of_month(shift_month_start(latest, padding));

    let mut months = Vec::new();
    let mut cursor = first_of_month(min_date);
    while cursor <= max_date {
        months.push(MonthSlot {
            key: month_key(cursor),
            label: axis_month_label(cursor),
            first_day: cursor,
        });
        let next = shift_month_start(cursor, 1);
        if next == cursor {
            break;
        }
        cursor = next;
    }

    Some(GanttAxis {
        min_date,
        max_date,
        months,
    })
}

/// Places one bar between `min_date` and `max_date`.
///
/// A bar starting before `min_date` keeps its right edge: the overflow is
/// folded into the width before `left_pct` clamps to zero.
pub fn place_bar(item: &TimelineItem, min_date: NaiveDate, max_date: NaiveDate) -> BarPlacement {
    let span = (max_date - min_date).num_days() as f64;
    if span <= 0.0 {
        return BarPlacement {
            left_pct: 0.0,
            width_pct: 0.0,
        };
    }

    let mut left_pct = (item.start_date - min_date).num_days() as f64 / span * 100.0;
    let mut width_pct = (item.end_date - item.start_date).num_days() as f64 / span * 100.0;

    if left_pct < 0.0 {
        width_pct += left_pct;
        left_pct = 0.0;
    }
    if width_pct < 0.0 {
        width_pct = 0.0;
    }

    BarPlacement {
        left_pct,
        width_pct,
    }
}

/// Classifies a bar. Priority: completed, active, late, planned.
///
/// An item is late once the UTC midnight starting its end date has passed.
pub fn classify_bar(
    status: Option<&str>,
    end_date: NaiveDate,
    now: DateTime<Utc>,
    vocab: &StatusVocabulary,
) -> BarStatus {
    if vocab.is_done(status) {
        BarStatus::Completed
    } else if vocab.is_in_progress(status) {
        BarStatus::Active
    } else if start_of_day_utc(end_date) < now {
        BarStatus::Late
    } else {
        BarStatus::Planned
    }
}

/// Percent position of `now` on the axis, `None` when outside it.
pub fn today_marker_pct(now: DateTime<Utc>, axis: &GanttAxis) -> Option<f64> {
    let min = start_of_day_utc(axis.min_date);
    let max = start_of_day_utc(axis.max_date);
    if now < min || now > max || max <= min {
        return None;
    }
    let elapsed = (now - min).num_milliseconds() as f64;
    let span = (max - min).num_milliseconds() as f64;
    Some(elapsed / span * 100.0)
}

/// `"{n} d"` for spans up to 30 days, otherwise rounded months `"{n} m"`.
pub fn duration_label(start_date: NaiveDate, end_date: NaiveDate) -> String {
    let days = (end_date - start_date).num_days();
    if days > 30 {
        format!("{} m", (days as f64 / 30.0).round() as i64)
    } else {
        format!("{days} d")
    }
}

/// Builds the axis, every row and the today marker in one pass.
///
/// Returns `None` when `items` is empty.
pub fn build_gantt<'i>(
    items: &'i [TimelineItem],
    now: DateTime<Utc>,
    vocab: &StatusVocabulary,
    options: &GanttOptions,
) -> Option<GanttChart<'i>> {
    let axis = compute_axis_padded(items, options.padding_months)?;
    let rows = items
        .iter()
        .map(|item| GanttRow {
            item,
            placement: place_bar(item, axis.min_date, axis.max_date),
            status: classify_bar(item.status.as_deref(), item.end_date, now, vocab),
            duration_label: duration_label(item.start_date, item.end_date),
        })
        .collect::<Vec<_>>();
    let today_pct = today_marker_pct(now, &axis);

    debug!(
        "event=gantt_build module=layout status=ok rows={} months={} today_visible={}",
        rows.len(),
        axis.months.len(),
        today_pct.is_some()
    );

    Some(GanttChart {
        axis,
        rows,
        today_pct,
    })
}
