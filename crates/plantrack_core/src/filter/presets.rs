//! Filter sets bound by each dashboard view.

use crate::filter::spec::{FilterSet, FilterSetError, FilterSpec};
use crate::model::fields::RecordFields;
use serde::{Deserialize, Serialize};

/// Dashboard view with a cascading filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterPreset {
    /// Activity table: product, responsible, status.
    Plan,
    /// Timeline: product, responsible.
    Gantt,
    /// Milestone list: product, milestone status.
    Milestones,
    /// Uploaded documents: product, uploader.
    Documents,
    /// Document repository: document type, plus a text search.
    Repository,
}

impl FilterPreset {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plan => "plan",
            Self::Gantt => "gantt",
            Self::Milestones => "milestones",
            Self::Documents => "documents",
            Self::Repository => "repository",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "plan" => Some(Self::Plan),
            "gantt" => Some(Self::Gantt),
            "milestones" | "hitos" => Some(Self::Milestones),
            "documents" | "documentos" => Some(Self::Documents),
            "repository" | "repositorio" | "repo" => Some(Self::Repository),
            _ => None,
        }
    }

    /// Control declarations for this view, keyed through `fields`.
    pub fn specs(self, fields: &RecordFields) -> Vec<FilterSpec> {
        match self {
            Self::Plan => vec![
                FilterSpec::select("filterProduct", &fields.product),
                FilterSpec::select("filterResp", &fields.responsible),
                FilterSpec::select("filterStatus", &fields.status),
            ],
            Self::Gantt => vec![
                FilterSpec::select("ganttFilterProduct", &fields.product),
                FilterSpec::select("ganttFilterResp", &fields.responsible),
            ],
            Self::Milestones => vec![
                FilterSpec::select("hitoFilterProduct", &fields.product),
                FilterSpec::select("hitoFilterStatus", &fields.milestone_status),
            ],
            Self::Documents => vec![
                FilterSpec::select("docFilterProduct", &fields.product),
                FilterSpec::select("docFilterResp", &fields.uploader),
            ],
            Self::Repository => vec![FilterSpec::select("repoFilterType", &fields.doc_type)],
        }
    }

    /// Validated filter set for this view.
    ///
    /// Fails only when `fields` maps a filter key to a blank name.
    pub fn filter_set(self, fields: &RecordFields) -> Result<FilterSet, FilterSetError> {
        FilterSet::new(self.specs(fields))
    }

    /// Keys searched by the free-text box layered over the cascade. Only the
    /// activity table and the repository have one.
    pub fn search_keys(self, fields: &RecordFields) -> Vec<&str> {
        match self {
            Self::Plan => vec![fields.name.as_str(), fields.code.as_str()],
            Self::Repository => vec![
                fields.doc_title.as_str(),
                fields.doc_description.as_str(),
                fields.doc_tags.as_str(),
            ],
            _ => Vec::new(),
        }
    }
}
