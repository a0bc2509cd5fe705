//! Cascading filter evaluation.
//!
//! # Invariants
//! - `filtered` keeps the input order.
//! - Options are trimmed, non-empty, distinct and sorted ascending.
//! - Evaluation is deterministic; repeated calls with equal input produce
//!   equal output.

use crate::filter::spec::{ControlKind, FilterSet, FilterState, MatchMode};
use crate::model::record::Filterable;
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Result of one cascade evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CascadeOutcome<'a, T> {
    /// Items satisfying every active control, in input order.
    pub filtered: Vec<&'a T>,
    /// Selectable values per field id, computed without that field's own
    /// constraint.
    pub options: BTreeMap<String, Vec<String>>,
    /// Value each control should show after repopulation.
    pub selections: BTreeMap<String, String>,
}

impl<'a, T> CascadeOutcome<'a, T> {
    pub fn options_for(&self, field_id: &str) -> &[String] {
        self.options
            .get(field_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn selection_for(&self, field_id: &str) -> &str {
        self.selections
            .get(field_id)
            .map(String::as_str)
            .unwrap_or("")
    }
}

struct Constraint<'s> {
    field_id: &'s str,
    key: &'s str,
    needle: String,
}

/// Evaluates every filter in `filters` against `data`.
///
/// An empty dataset yields no rows and empty option lists. With no active
/// control the whole dataset passes and options come from all rows.
pub fn apply_cascade<'a, T: Filterable>(
    data: &'a [T],
    filters: &FilterSet,
    state: &FilterState,
    mode: MatchMode,
) -> CascadeOutcome<'a, T> {
    let constraints = filters
        .specs()
        .iter()
        .filter(|spec| state.is_active(&spec.field_id))
        .map(|spec| Constraint {
            field_id: spec.field_id.as_str(),
            key: spec.key.as_str(),
            needle: fold_needle(state.value(&spec.field_id), mode),
        })
        .collect::<Vec<_>>();

    let filtered = data
        .iter()
        .filter(|item| satisfies(*item, &constraints, None, mode))
        .collect::<Vec<_>>();

    let mut options = BTreeMap::new();
    let mut selections = BTreeMap::new();
    for spec in filters.specs() {
        let field_options = if state.is_active(&spec.field_id) {
            let context = data
                .iter()
                .filter(|item| satisfies(*item, &constraints, Some(spec.field_id.as_str()), mode));
            distinct_options(context, &spec.key)
        } else {
            // Skipping an inactive control leaves the constraint set unchanged.
            distinct_options(filtered.iter().copied(), &spec.key)
        };
        let selection =
            reconcile_selection(spec.control, state.value(&spec.field_id), &field_options);
        selections.insert(spec.field_id.clone(), selection);
        options.insert(spec.field_id.clone(), field_options);
    }

    debug!(
        "event=cascade_apply module=filter status=ok items={} filters={} active={} filtered={} mode={:?}",
        data.len(),
        filters.len(),
        constraints.len(),
        filtered.len(),
        mode
    );

    CascadeOutcome {
        filtered,
        options,
        selections,
    }
}

/// Compares one record value with one control value under `mode`.
pub fn matches_value(item_value: &str, wanted: &str, mode: MatchMode) -> bool {
    if wanted.is_empty() {
        return true;
    }
    matches_folded(item_value, &fold_needle(wanted, mode), mode)
}

/// Distinct, trimmed, non-empty values at `key`, sorted ascending.
pub fn distinct_options<'i, T, I>(items: I, key: &str) -> Vec<String>
where
    T: Filterable + 'i,
    I: IntoIterator<Item = &'i T>,
{
    items
        .into_iter()
        .filter_map(|item| item.field_text(key))
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Value a control shows after its options are replaced.
///
/// Dropdowns keep the previous value only when it is still offered and
/// otherwise fall back to "all" (empty). Text inputs keep what was typed.
pub fn reconcile_selection(control: ControlKind, previous: &str, options: &[String]) -> String {
    match control {
        ControlKind::Text => previous.to_string(),
        ControlKind::Select => {
            if !previous.is_empty() && options.iter().any(|option| option == previous) {
                previous.to_string()
            } else {
                String::new()
            }
        }
    }
}

fn satisfies<T: Filterable>(
    item: &T,
    constraints: &[Constraint<'_>],
    skip_field: Option<&str>,
    mode: MatchMode,
) -> bool {
    constraints
        .iter()
        .filter(|constraint| Some(constraint.field_id) != skip_field)
        .all(|constraint| {
            let value = item.field_text(constraint.key);
            matches_folded(value.as_deref().unwrap_or(""), &constraint.needle, mode)
        })
}

fn fold_needle(wanted: &str, mode: MatchMode) -> String {
    match mode {
        MatchMode::Substring => wanted.to_lowercase(),
        MatchMode::Exact => wanted.trim().to_lowercase(),
    }
}

fn matches_folded(item_value: &str, needle: &str, mode: MatchMode) -> bool {
    match mode {
        MatchMode::Substring => item_value.to_lowercase().contains(needle),
        MatchMode::Exact => item_value.trim().to_lowercase() == needle,
    }
}
