//! Cascading filter engine.
//!
//! # Responsibility
//! - Intersect a dataset against every active control value.
//! - Recompute each control's selectable values from the other controls.
//! - Provide the per-view filter presets and a free-text overlay.
//!
//! # Invariants
//! - A control's own value never narrows its own option list.
//! - Filters combine as a conjunction; declaration order carries no priority.
//! - The engine holds no state between calls.

pub mod cascade;
pub mod presets;
pub mod search;
pub mod spec;

pub use cascade::{
    apply_cascade, distinct_options, matches_value, reconcile_selection, CascadeOutcome,
};
pub use presets::FilterPreset;
pub use search::search_records;
pub use spec::{
    should_recompute, ControlKind, FilterSet, FilterSetError, FilterSpec, FilterState, MatchMode,
    Trigger,
};
