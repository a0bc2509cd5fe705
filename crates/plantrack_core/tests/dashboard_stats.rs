use chrono::{NaiveDate, TimeZone, Utc};
use plantrack_core::stats::{CountEntry, GENERAL_PRODUCT};
use plantrack_core::{
    product_breakdown, status_breakdown, summarize, upcoming_deadlines, Record, RecordFields,
    StatusVocabulary, UpcomingOptions,
};
use serde_json::json;

fn row(code: &str, product: serde_json::Value, status: &str, end: &str) -> Record {
    Record::new()
        .with("activityCode", code)
        .with("productCode", product)
        .with("status", status)
        .with("endDate", end)
}

fn plan() -> Vec<Record> {
    vec![
        row("1", json!("1.1 | Coordinación"), "Completado", "2024-03-02"),
        row("2", json!("1.1 | Coordinación"), "En Progreso", "2024-03-05"),
        row("3", json!("2.0 | Campo"), "", "2024-03-03"),
        row("4", json!(null), "Pendiente", "2024-04-20"),
        row("5", json!("2.0 | Campo"), "finalizado", "2024-03-04"),
        row("6", json!("3.0"), "Retrasado", "2024-02-28"),
    ]
}

fn entry(label: &str, count: usize) -> CountEntry {
    CountEntry {
        label: label.to_string(),
        count,
    }
}

#[test]
fn summary_counts_done_and_in_progress() {
    let summary = summarize(&plan(), 4, &RecordFields::default(), &StatusVocabulary::default());
    assert_eq!(summary.total, 6);
    assert_eq!(summary.done, 2);
    assert_eq!(summary.in_progress, 1);
    assert_eq!(summary.milestones, 4);
}

#[test]
fn status_breakdown_uses_default_label_for_blank_status() {
    let counts = status_breakdown(&plan(), &RecordFields::default(), &StatusVocabulary::default());
    assert_eq!(
        counts,
        vec![
            entry("Completado", 1),
            entry("En Progreso", 1),
            entry("Pendiente", 2),
            entry("Retrasado", 1),
            entry("finalizado", 1),
        ]
    );
}

#[test]
fn product_breakdown_groups_by_prefix() {
    let counts = product_breakdown(&plan(), &RecordFields::default());
    assert_eq!(
        counts,
        vec![
            entry("1.1", 2),
            entry("2.0", 2),
            entry("3.0", 1),
            entry(GENERAL_PRODUCT, 1),
        ]
    );
}

#[test]
fn upcoming_deadlines_skip_done_and_past_rows() {
    let plan = plan();
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 15, 0, 0).unwrap();
    let upcoming = upcoming_deadlines(
        &plan,
        now,
        &RecordFields::default(),
        &StatusVocabulary::default(),
        &UpcomingOptions::default(),
    );

    let codes = upcoming
        .iter()
        .map(|deadline| deadline.record.text("activityCode").unwrap())
        .collect::<Vec<_>>();
    assert_eq!(codes, vec!["3", "2"]);
    assert_eq!(
        upcoming[0].end_date,
        NaiveDate::from_ymd_opt(2024, 3, 3).unwrap()
    );
}

#[test]
fn upcoming_deadlines_respect_window_and_limit() {
    let plan = plan();
    let now = Utc.with_ymd_and_hms(2024, 2, 28, 0, 0, 0).unwrap();
    let fields = RecordFields::default();
    let vocab = StatusVocabulary::default();

    let wide = UpcomingOptions {
        window_days: 60,
        limit: 10,
    };
    assert_eq!(upcoming_deadlines(&plan, now, &fields, &vocab, &wide).len(), 4);

    let capped = UpcomingOptions {
        window_days: 60,
        limit: 2,
    };
    let first_two = upcoming_deadlines(&plan, now, &fields, &vocab, &capped);
    assert_eq!(first_two.len(), 2);
    assert_eq!(first_two[0].record.text("activityCode").as_deref(), Some("6"));

    let same_day = UpcomingOptions {
        window_days: 0,
        limit: 5,
    };
    assert_eq!(upcoming_deadlines(&plan, now, &fields, &vocab, &same_day).len(), 1);
}

#[test]
fn oversized_or_negative_windows_do_not_overflow() {
    let plan = vec![row("1", json!("A1"), "Pendiente", "2024-03-05")];
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let fields = RecordFields::default();
    let vocab = StatusVocabulary::default();

    let unbounded = UpcomingOptions {
        window_days: i64::MAX,
        limit: 5,
    };
    assert_eq!(upcoming_deadlines(&plan, now, &fields, &vocab, &unbounded).len(), 1);

    let negative = UpcomingOptions {
        window_days: -10,
        limit: 5,
    };
    assert!(upcoming_deadlines(&plan, now, &fields, &vocab, &negative).is_empty());
}
