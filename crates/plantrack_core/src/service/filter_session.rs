//! Filter session owned by the application layer.
//!
//! # Responsibility
//! - Hold the current dataset snapshot and control values for one view.
//! - Route control events through [`should_recompute`] and the cascade.
//!
//! # Invariants
//! - The snapshot is replaced wholesale, never patched.
//! - After each recompute the stored values equal the reconciled selections.

use crate::filter::cascade::{apply_cascade, CascadeOutcome};
use crate::filter::spec::{should_recompute, FilterSet, FilterState, MatchMode, Trigger};
use crate::model::record::Filterable;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Event addressed a control that the filter set does not declare.
    UnknownField(String),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownField(field_id) => write!(f, "unknown filter field: `{field_id}`"),
        }
    }
}

impl Error for SessionError {}

/// Dataset snapshot plus control values for one filtered view.
#[derive(Debug, Clone)]
pub struct FilterSession<T> {
    filters: FilterSet,
    mode: MatchMode,
    data: Vec<T>,
    state: FilterState,
}

impl<T: Filterable> FilterSession<T> {
    pub fn new(filters: FilterSet, mode: MatchMode) -> Self {
        Self {
            filters,
            mode,
            data: Vec::new(),
            state: FilterState::new(),
        }
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Swaps in a freshly fetched snapshot. Control values are kept.
    pub fn replace_data(&mut self, data: Vec<T>) {
        debug!(
            "event=session_refresh module=service status=ok previous_rows={} rows={}",
            self.data.len(),
            data.len()
        );
        self.data = data;
    }

    /// Records a control event.
    ///
    /// Returns `Ok(None)` when the event does not trigger a recompute, e.g.
    /// a keystroke on a dropdown.
    pub fn set_value(
        &mut self,
        field_id: &str,
        value: impl Into<String>,
        trigger: Trigger,
    ) -> Result<Option<CascadeOutcome<'_, T>>, SessionError> {
        let control = self
            .filters
            .get(field_id)
            .map(|spec| spec.control)
            .ok_or_else(|| SessionError::UnknownField(field_id.to_string()))?;

        self.state.set(field_id, value);
        if !should_recompute(control, trigger) {
            return Ok(None);
        }
        Ok(Some(self.recompute()))
    }

    /// Resets every control to "all" and recomputes.
    pub fn clear(&mut self) -> CascadeOutcome<'_, T> {
        self.state.clear();
        self.recompute()
    }

    /// Runs the cascade on the current snapshot and stores the reconciled
    /// control values.
    pub fn recompute(&mut self) -> CascadeOutcome<'_, T> {
        let outcome = apply_cascade(&self.data, &self.filters, &self.state, self.mode);
        for (field_id, selection) in &outcome.selections {
            self.state.set(field_id.clone(), selection.clone());
        }
        outcome
    }
}
