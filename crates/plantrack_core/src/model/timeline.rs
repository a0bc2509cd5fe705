//! Gantt timeline projection.
//!
//! # Invariants
//! - Both dates are present on every item; rows lacking either are dropped
//!   by [`TimelineItem::from_record`].
//! - `end_date` may precede `start_date`; placement clamps the width.

use crate::date::parse_calendar_date;
use crate::model::fields::RecordFields;
use crate::model::record::Record;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineItem {
    /// Stringified row id; empty when the row has none.
    pub id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: Option<String>,
    pub code: Option<String>,
    pub name: Option<String>,
    pub responsible: Option<String>,
}

impl TimelineItem {
    /// Projects one plan row. `None` when either date is missing or
    /// unparseable.
    pub fn from_record(record: &Record, fields: &RecordFields) -> Option<Self> {
        let start_date = record
            .get(&fields.start_date)
            .and_then(parse_calendar_date)?;
        let end_date = record.get(&fields.end_date).and_then(parse_calendar_date)?;
        Some(Self {
            id: record.text(&fields.id).unwrap_or_default(),
            start_date,
            end_date,
            status: record.text(&fields.status),
            code: record.text(&fields.code),
            name: record.text(&fields.name),
            responsible: record.text(&fields.responsible),
        })
    }

    /// Whole days from start to end, negative when reversed.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}
