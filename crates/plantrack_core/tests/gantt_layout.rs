use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use plantrack_core::layout::{compute_axis_padded, duration_label, BarStatus};
use plantrack_core::{
    build_gantt, classify_bar, compute_axis, place_bar, timeline_items, today_marker_pct,
    GanttOptions, Record, RecordFields, StatusVocabulary, TimelineItem,
};
use serde_json::json;

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, second)
        .unwrap()
}

fn item(id: &str, start: NaiveDate, end: NaiveDate, status: Option<&str>) -> TimelineItem {
    TimelineItem {
        id: id.to_string(),
        start_date: start,
        end_date: end,
        status: status.map(str::to_string),
        code: None,
        name: None,
        responsible: None,
    }
}

fn approx(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-9
}

#[test]
fn axis_pads_one_month_each_side() {
    let items = vec![
        item("1", ymd(2024, 3, 5), ymd(2024, 3, 12), None),
        item("2", ymd(2024, 3, 10), ymd(2024, 3, 28), None),
    ];
    let axis = compute_axis(&items).unwrap();

    assert_eq!(axis.min_date, ymd(2024, 2, 1));
    assert_eq!(axis.max_date, ymd(2024, 4, 30));
    assert_eq!(axis.span_days(), 89);

    let keys = axis
        .months
        .iter()
        .map(|slot| slot.key.as_str())
        .collect::<Vec<_>>();
    assert_eq!(keys, vec!["2024-02", "2024-03", "2024-04"]);
    assert_eq!(axis.months[0].label, "feb 24");
    assert_eq!(axis.months[2].first_day, ymd(2024, 4, 1));
}

#[test]
fn axis_crosses_year_boundaries() {
    let items = vec![item("1", ymd(2023, 12, 20), ymd(2024, 1, 5), None)];
    let axis = compute_axis(&items).unwrap();

    assert_eq!(axis.min_date, ymd(2023, 11, 1));
    assert_eq!(axis.max_date, ymd(2024, 2, 29));
    assert_eq!(axis.months.len(), 4);
}

#[test]
fn axis_padding_is_configurable() {
    let items = vec![item("1", ymd(2024, 6, 10), ymd(2024, 6, 20), None)];

    let tight = compute_axis_padded(&items, 0).unwrap();
    assert_eq!(tight.min_date, ymd(2024, 6, 1));
    assert_eq!(tight.max_date, ymd(2024, 6, 30));

    let wide = compute_axis_padded(&items, 2).unwrap();
    assert_eq!(wide.min_date, ymd(2024, 4, 1));
    assert_eq!(wide.max_date, ymd(2024, 8, 31));
}

#[test]
fn empty_item_list_has_no_axis() {
    assert!(compute_axis(&[]).is_none());
    let now = at(2024, 3, 1, 0, 0, 0);
    assert!(build_gantt(&[], now, &StatusVocabulary::default(), &GanttOptions::default()).is_none());
}

#[test]
fn bars_touching_the_axis_edges() {
    let min = ymd(2024, 2, 1);
    let max = ymd(2024, 4, 30);

    let first = place_bar(&item("1", min, ymd(2024, 2, 20), None), min, max);
    assert!(approx(first.left_pct, 0.0));

    let last = place_bar(&item("2", ymd(2024, 4, 1), max, None), min, max);
    assert!(approx(last.right_pct(), 100.0));
}

#[test]
fn bar_starting_before_axis_is_clipped() {
    let min = ymd(2024, 2, 1);
    let max = ymd(2024, 4, 30);
    let placement = place_bar(&item("1", ymd(2024, 1, 15), ymd(2024, 2, 10), None), min, max);

    assert!(approx(placement.left_pct, 0.0));
    assert!(approx(placement.width_pct, 9.0 / 89.0 * 100.0));
}

#[test]
fn bar_fully_before_axis_collapses_to_zero_width() {
    let min = ymd(2024, 2, 1);
    let max = ymd(2024, 4, 30);
    let placement = place_bar(&item("1", ymd(2023, 12, 1), ymd(2024, 1, 10), None), min, max);

    assert_eq!(placement.left_pct, 0.0);
    assert_eq!(placement.width_pct, 0.0);
    assert_eq!(placement.display_width_pct(0.5), 0.5);
}

#[test]
fn reversed_dates_get_zero_width() {
    let min = ymd(2024, 2, 1);
    let max = ymd(2024, 4, 30);
    let placement = place_bar(&item("1", ymd(2024, 3, 10), ymd(2024, 3, 1), None), min, max);

    assert!(placement.left_pct > 0.0);
    assert_eq!(placement.width_pct, 0.0);
}

#[test]
fn degenerate_axis_places_everything_at_origin() {
    let day = ymd(2024, 3, 1);
    let placement = place_bar(&item("1", day, day, None), day, day);
    assert_eq!(placement.left_pct, 0.0);
    assert_eq!(placement.width_pct, 0.0);
}

#[test]
fn classification_follows_priority() {
    let vocab = StatusVocabulary::default();
    let end = ymd(2024, 3, 10);
    let after = at(2024, 3, 10, 0, 0, 1);
    let midnight = at(2024, 3, 10, 0, 0, 0);

    assert_eq!(classify_bar(Some("Completado"), end, after, &vocab), BarStatus::Completed);
    assert_eq!(classify_bar(Some("listo"), end, after, &vocab), BarStatus::Completed);
    assert_eq!(classify_bar(Some("En Progreso"), end, after, &vocab), BarStatus::Active);
    assert_eq!(classify_bar(Some("Pendiente"), end, after, &vocab), BarStatus::Late);
    assert_eq!(classify_bar(None, end, after, &vocab), BarStatus::Late);
    assert_eq!(classify_bar(None, end, midnight, &vocab), BarStatus::Planned);
}

#[test]
fn classes_map_to_css_names() {
    assert_eq!(BarStatus::Completed.css_class(), "bar-completed");
    assert_eq!(BarStatus::Active.css_class(), "bar-active");
    assert_eq!(BarStatus::Late.css_class(), "bar-late");
    assert_eq!(BarStatus::Planned.css_class(), "bar-planned");
}

#[test]
fn today_marker_only_inside_axis() {
    let items = vec![item("1", ymd(2024, 3, 5), ymd(2024, 3, 12), None)];
    let axis = compute_axis(&items).unwrap();

    let inside = today_marker_pct(at(2024, 3, 1, 0, 0, 0), &axis).unwrap();
    assert!(approx(inside, 29.0 / 89.0 * 100.0));
    assert_eq!(today_marker_pct(at(2024, 2, 1, 0, 0, 0), &axis), Some(0.0));
    assert!(today_marker_pct(at(2024, 1, 31, 23, 59, 59), &axis).is_none());
    assert!(today_marker_pct(at(2024, 5, 1, 0, 0, 0), &axis).is_none());
}

#[test]
fn timeline_items_require_both_dates() {
    let fields = RecordFields::default();
    let rows = vec![
        Record::new()
            .with("id", 1)
            .with("startDate", "2024-03-01")
            .with("endDate", "2024-03-10")
            .with("status", "En Progreso")
            .with("activityCode", "1.1"),
        Record::new().with("id", 2).with("startDate", "2024-03-01"),
        Record::new()
            .with("id", 3)
            .with("startDate", json!(null))
            .with("endDate", "2024-03-10"),
        Record::new()
            .with("id", 4)
            .with("startDate", "not a date")
            .with("endDate", "2024-03-10"),
    ];
    let items = timeline_items(&rows, &fields);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "1");
    assert_eq!(items[0].code.as_deref(), Some("1.1"));
    assert_eq!(items[0].duration_days(), 9);
}

#[test]
fn chart_rows_follow_item_order() {
    let items = vec![
        item("late", ymd(2024, 3, 1), ymd(2024, 3, 5), Some("Pendiente")),
        item("long", ymd(2024, 3, 1), ymd(2024, 5, 10), Some("En Progreso")),
    ];
    let now = at(2024, 3, 20, 12, 0, 0);
    let chart = build_gantt(&items, now, &StatusVocabulary::default(), &GanttOptions::default())
        .unwrap();

    assert_eq!(chart.rows.len(), 2);
    assert_eq!(chart.rows[0].item.id, "late");
    assert_eq!(chart.rows[0].status, BarStatus::Late);
    assert_eq!(chart.rows[0].duration_label, "4 d");
    assert_eq!(chart.rows[1].status, BarStatus::Active);
    assert_eq!(chart.rows[1].duration_label, duration_label(ymd(2024, 3, 1), ymd(2024, 5, 10)));
    assert_eq!(chart.rows[1].duration_label, "2 m");
    assert_eq!(chart.axis.max_date, ymd(2024, 6, 30));
    assert!(chart.today_pct.is_some());
}
