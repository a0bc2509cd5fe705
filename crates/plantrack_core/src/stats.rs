//! Dashboard statistics over plan rows.
//!
//! # Responsibility
//! - Headline counters for the overview cards.
//! - Status and product breakdowns for the charts.
//! - Upcoming deadlines list.
//!
//! # Invariants
//! - Breakdowns are ordered by label for stable rendering.
//! - Done rows never appear as upcoming deadlines.

use crate::date::parse_calendar_date;
use crate::model::fields::RecordFields;
use crate::model::record::Record;
use crate::model::status::StatusVocabulary;
use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Product label for rows without a product code.
pub const GENERAL_PRODUCT: &str = "General";

/// Window and size of the upcoming-deadlines list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpcomingOptions {
    pub window_days: i64,
    pub limit: usize,
}

impl Default for UpcomingOptions {
    fn default() -> Self {
        Self {
            window_days: 30,
            limit: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total: usize,
    pub done: usize,
    pub in_progress: usize,
    pub milestones: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpcomingDeadline<'a> {
    pub end_date: NaiveDate,
    pub record: &'a Record,
}

pub fn summarize(
    plan: &[Record],
    milestone_count: usize,
    fields: &RecordFields,
    vocab: &StatusVocabulary,
) -> DashboardSummary {
    let mut summary = DashboardSummary {
        total: plan.len(),
        milestones: milestone_count,
        ..DashboardSummary::default()
    };
    for record in plan {
        let status = record.text(&fields.status);
        if vocab.is_done(status.as_deref()) {
            summary.done += 1;
        } else if vocab.is_in_progress(status.as_deref()) {
            summary.in_progress += 1;
        }
    }
    summary
}

/// Row count per status label; rows without status use the default label.
pub fn status_breakdown(
    plan: &[Record],
    fields: &RecordFields,
    vocab: &StatusVocabulary,
) -> Vec<CountEntry> {
    count_by(plan, |record| {
        vocab.label_for(record.text(&fields.status).as_deref())
    })
}

/// Row count per product prefix.
///
/// Codes like `1.1 | Coordinación` count under `1.1`; rows without a code
/// count under [`GENERAL_PRODUCT`].
pub fn product_breakdown(plan: &[Record], fields: &RecordFields) -> Vec<CountEntry> {
    count_by(plan, |record| {
        record
            .text(&fields.product)
            .map(|code| product_prefix(&code))
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or_else(|| GENERAL_PRODUCT.to_string())
    })
}

/// Text before the first `|`, trimmed.
pub fn product_prefix(code: &str) -> String {
    code.split('|').next().unwrap_or("").trim().to_string()
}

/// Not-done rows ending within `[today, today + window_days]`, earliest
/// first, capped at `limit`.
///
/// A negative window keeps only today; a window past the calendar range
/// reaches the last representable date.
pub fn upcoming_deadlines<'a>(
    plan: &'a [Record],
    now: DateTime<Utc>,
    fields: &RecordFields,
    vocab: &StatusVocabulary,
    options: &UpcomingOptions,
) -> Vec<UpcomingDeadline<'a>> {
    let today = now.date_naive();
    let window = u64::try_from(options.window_days).unwrap_or(0);
    let horizon = today
        .checked_add_days(Days::new(window))
        .unwrap_or(NaiveDate::MAX);

    let mut upcoming = plan
        .iter()
        .filter(|record| !vocab.is_done(record.text(&fields.status).as_deref()))
        .filter_map(|record| {
            let end_date = record.get(&fields.end_date).and_then(parse_calendar_date)?;
            (today..=horizon)
                .contains(&end_date)
                .then_some(UpcomingDeadline { end_date, record })
        })
        .collect::<Vec<_>>();
    upcoming.sort_by_key(|deadline| deadline.end_date);
    upcoming.truncate(options.limit);
    upcoming
}

fn count_by<F>(plan: &[Record], label_of: F) -> Vec<CountEntry>
where
    F: Fn(&Record) -> String,
{
    let mut counts = BTreeMap::<String, usize>::new();
    for record in plan {
        *counts.entry(label_of(record)).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(label, count)| CountEntry { label, count })
        .collect()
}
