//! Filter declarations and control state.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// How a control value is compared with a record value.
///
/// Both sides are case-folded. `Substring` is the dashboard default, so a
/// dropdown value `"Ana"` also keeps rows for `"Ana Maria"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    #[default]
    Substring,
    /// Trimmed, case-folded equality.
    Exact,
}

/// Kind of UI control a filter is bound to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    /// Dropdown repopulated from computed options.
    #[default]
    Select,
    /// Free-text input; keeps whatever the user typed.
    Text,
}

/// Event that may trigger a recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Change,
    Keystroke,
}

/// Returns whether `trigger` on a control of `control` kind recomputes.
///
/// Every control recomputes on change; text inputs also on each keystroke.
pub fn should_recompute(control: ControlKind, trigger: Trigger) -> bool {
    match trigger {
        Trigger::Change => true,
        Trigger::Keystroke => control == ControlKind::Text,
    }
}

/// One filter bound to one control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Stable id of the bound control.
    pub field_id: String,
    /// Record field the control filters on.
    pub key: String,
    #[serde(default)]
    pub control: ControlKind,
}

impl FilterSpec {
    pub fn select(field_id: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            key: key.into(),
            control: ControlKind::Select,
        }
    }

    pub fn text(field_id: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            key: key.into(),
            control: ControlKind::Text,
        }
    }
}

/// Declaration errors for a filter set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSetError {
    EmptyFieldId,
    EmptyKey(String),
    DuplicateFieldId(String),
}

impl Display for FilterSetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFieldId => write!(f, "filter field id cannot be empty"),
            Self::EmptyKey(field_id) => write!(f, "filter `{field_id}` has an empty key"),
            Self::DuplicateFieldId(field_id) => {
                write!(f, "filter field id declared twice: `{field_id}`")
            }
        }
    }
}

impl Error for FilterSetError {}

/// Validated set of filters evaluated together.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterSet {
    specs: Vec<FilterSpec>,
}

impl FilterSet {
    /// Validates that every filter has a non-blank id and key and that ids
    /// are unique.
    pub fn new(specs: Vec<FilterSpec>) -> Result<Self, FilterSetError> {
        let mut seen = BTreeSet::new();
        for spec in &specs {
            if spec.field_id.trim().is_empty() {
                return Err(FilterSetError::EmptyFieldId);
            }
            if spec.key.trim().is_empty() {
                return Err(FilterSetError::EmptyKey(spec.field_id.clone()));
            }
            if !seen.insert(spec.field_id.as_str()) {
                return Err(FilterSetError::DuplicateFieldId(spec.field_id.clone()));
            }
        }
        Ok(Self { specs })
    }

    pub fn specs(&self) -> &[FilterSpec] {
        &self.specs
    }

    pub fn get(&self, field_id: &str) -> Option<&FilterSpec> {
        self.specs.iter().find(|spec| spec.field_id == field_id)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Current control values keyed by field id. Missing or empty means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState(BTreeMap<String, String>);

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field_id, value);
        self
    }

    pub fn set(&mut self, field_id: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field_id.into(), value.into());
    }

    /// Current value for `field_id`, empty when unset.
    pub fn value(&self, field_id: &str) -> &str {
        self.0.get(field_id).map(String::as_str).unwrap_or("")
    }

    pub fn is_active(&self, field_id: &str) -> bool {
        !self.value(field_id).is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(id, value)| (id.as_str(), value.as_str()))
    }
}

impl From<BTreeMap<String, String>> for FilterState {
    fn from(value: BTreeMap<String, String>) -> Self {
        Self(value)
    }
}
