//! Calendar event projection.

use crate::date::parse_calendar_date;
use crate::model::fields::RecordFields;
use crate::model::record::Record;
use chrono::NaiveDate;
use serde::Serialize;

/// Code shown for milestones that are not linked to an activity.
pub const MILESTONE_FALLBACK_CODE: &str = "HITO";

/// Styling category of a calendar event. Has no effect on bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    /// Derived from a milestone's estimated date.
    Milestone,
    /// Derived from a plan item's end date.
    Delivery,
}

impl EventCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Milestone => "milestone",
            Self::Delivery => "delivery",
        }
    }

    /// Caption printed under the event title.
    pub fn caption(self) -> &'static str {
        match self {
            Self::Milestone => "Hito Importante",
            Self::Delivery => "Entrega Actividad",
        }
    }
}

/// One dated entry on the calendar, borrowing its source row.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedEvent<'a> {
    /// UTC calendar date.
    pub date: NaiveDate,
    pub title: String,
    pub code: Option<String>,
    pub category: EventCategory,
    pub source: &'a Record,
}

impl<'a> DatedEvent<'a> {
    /// Builds a delivery event from a plan row's end date.
    ///
    /// Returns `None` when the end date is missing or unparseable.
    pub fn delivery(record: &'a Record, fields: &RecordFields) -> Option<Self> {
        let date = record.get(&fields.end_date).and_then(parse_calendar_date)?;
        Some(Self {
            date,
            title: record.text(&fields.name).unwrap_or_default(),
            code: record.text(&fields.code),
            category: EventCategory::Delivery,
            source: record,
        })
    }

    /// Builds a milestone event from a milestone row's estimated date.
    ///
    /// Milestones without an activity code get [`MILESTONE_FALLBACK_CODE`].
    pub fn milestone(record: &'a Record, fields: &RecordFields) -> Option<Self> {
        let date = record
            .get(&fields.milestone_date)
            .and_then(parse_calendar_date)?;
        Some(Self {
            date,
            title: record.text(&fields.milestone_name).unwrap_or_default(),
            code: Some(
                record
                    .text(&fields.milestone_code)
                    .unwrap_or_else(|| MILESTONE_FALLBACK_CODE.to_string()),
            ),
            category: EventCategory::Milestone,
            source: record,
        })
    }
}
