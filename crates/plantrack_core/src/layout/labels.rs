//! Spanish date labels for calendar and timeline headers.

use chrono::{Datelike, NaiveDate, Weekday};

const MONTHS_LONG: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const MONTHS_SHORT: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

fn month_index(date: NaiveDate) -> usize {
    date.month0() as usize
}

/// Timeline column header, e.g. `mar 24`.
pub fn axis_month_label(date: NaiveDate) -> String {
    format!(
        "{} {:02}",
        MONTHS_SHORT[month_index(date)],
        date.year().rem_euclid(100)
    )
}

/// Calendar month title, e.g. `marzo de 2024`.
pub fn month_title(date: NaiveDate) -> String {
    format!("{} de {}", MONTHS_LONG[month_index(date)], date.year())
}

pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "lunes",
        Weekday::Tue => "martes",
        Weekday::Wed => "miércoles",
        Weekday::Thu => "jueves",
        Weekday::Fri => "viernes",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

/// Short agenda date, e.g. `25 de enero`.
pub fn day_month_label(date: NaiveDate) -> String {
    format!("{} de {}", date.day(), MONTHS_LONG[month_index(date)])
}

/// Agenda day heading, e.g. `jueves, 25 de enero`.
pub fn agenda_day_label(date: NaiveDate) -> String {
    format!("{}, {}", weekday_name(date), day_month_label(date))
}
