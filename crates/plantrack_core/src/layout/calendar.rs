//! Calendar event derivation and date bucketing.
//!
//! # Invariants
//! - Bucket keys come from UTC calendar fields (`YYYY-MM`, `YYYY-MM-DD`).
//! - Buckets are sorted ascending by key.
//! - Events keep the caller's order inside a bucket.

use crate::date::{day_key, month_key};
use crate::model::event::DatedEvent;
use crate::model::fields::RecordFields;
use crate::model::record::Record;
use chrono::NaiveDate;
use log::debug;
use std::collections::BTreeMap;

/// Events sharing one month or day key.
#[derive(Debug, Clone, PartialEq)]
pub struct EventBucket<'e, 'a> {
    pub key: String,
    /// Date of the first event, used for headings.
    pub date: NaiveDate,
    pub events: Vec<&'e DatedEvent<'a>>,
}

/// Delivery events for plan rows with a parseable end date.
pub fn delivery_events<'a>(plan: &'a [Record], fields: &RecordFields) -> Vec<DatedEvent<'a>> {
    plan.iter()
        .filter_map(|record| DatedEvent::delivery(record, fields))
        .collect()
}

/// Milestone events for rows with a parseable estimated date.
pub fn milestone_events<'a>(
    milestones: &'a [Record],
    fields: &RecordFields,
) -> Vec<DatedEvent<'a>> {
    milestones
        .iter()
        .filter_map(|record| DatedEvent::milestone(record, fields))
        .collect()
}

/// Deliveries followed by milestones, stably sorted ascending by date.
pub fn collect_events<'a>(
    plan: &'a [Record],
    milestones: &'a [Record],
    fields: &RecordFields,
) -> Vec<DatedEvent<'a>> {
    let mut events = delivery_events(plan, fields);
    events.extend(milestone_events(milestones, fields));
    events.sort_by_key(|event| event.date);

    debug!(
        "event=calendar_collect module=layout status=ok plan_rows={} milestone_rows={} events={}",
        plan.len(),
        milestones.len(),
        events.len()
    );
    events
}

/// Groups events by `YYYY-MM`.
pub fn bucket_by_month<'e, 'a>(events: &'e [DatedEvent<'a>]) -> Vec<EventBucket<'e, 'a>> {
    bucket_by(events, month_key)
}

/// Groups events by `YYYY-MM-DD`.
pub fn bucket_by_day<'e, 'a>(events: &'e [DatedEvent<'a>]) -> Vec<EventBucket<'e, 'a>> {
    bucket_by(events, day_key)
}

fn bucket_by<'e, 'a>(
    events: &'e [DatedEvent<'a>],
    key_of: fn(NaiveDate) -> String,
) -> Vec<EventBucket<'e, 'a>> {
    let mut groups: BTreeMap<String, EventBucket<'e, 'a>> = BTreeMap::new();
    for event in events {
        groups
            .entry(key_of(event.date))
            .or_insert_with_key(|key| EventBucket {
                key: key.clone(),
                date: event.date,
                events: Vec::new(),
            })
            .events
            .push(event);
    }
    groups.into_values().collect()
}
