//! Field-name map for record projections.

use serde::{Deserialize, Serialize};

/// Names of the record fields that event, timeline and statistics
/// derivations read.
///
/// Defaults follow the camelCase wire contract. [`RecordFields::legacy_wire`]
/// maps the snake_case/Spanish names served by the legacy plan API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordFields {
    pub id: String,
    /// Activity code shown next to bars and calendar cards.
    pub code: String,
    /// Activity display name.
    pub name: String,
    pub responsible: String,
    pub product: String,
    pub status: String,
    pub start_date: String,
    pub end_date: String,
    /// Estimated date on milestone rows.
    pub milestone_date: String,
    pub milestone_name: String,
    pub milestone_code: String,
    pub milestone_status: String,
    /// Uploader name on document rows.
    pub uploader: String,
    /// Repository document title.
    pub doc_title: String,
    pub doc_description: String,
    /// Comma-separated tags on repository documents.
    pub doc_tags: String,
    pub doc_type: String,
}

impl Default for RecordFields {
    fn default() -> Self {
        Self {
            id: "id".to_string(),
            code: "activityCode".to_string(),
            name: "taskName".to_string(),
            responsible: "primaryResponsible".to_string(),
            product: "productCode".to_string(),
            status: "status".to_string(),
            start_date: "startDate".to_string(),
            end_date: "endDate".to_string(),
            milestone_date: "estimatedDate".to_string(),
            milestone_name: "name".to_string(),
            milestone_code: "activityCode".to_string(),
            milestone_status: "status".to_string(),
            uploader: "uploader".to_string(),
            doc_title: "title".to_string(),
            doc_description: "description".to_string(),
            doc_tags: "tags".to_string(),
            doc_type: "documentType".to_string(),
        }
    }
}

impl RecordFields {
    /// Field names used by the `/plan-maestro`, `/hitos`, `/documentos` and
    /// `/repositorio` endpoints.
    pub fn legacy_wire() -> Self {
        Self {
            id: "id".to_string(),
            code: "activity_code".to_string(),
            name: "task_name".to_string(),
            responsible: "primary_responsible".to_string(),
            product: "product_code".to_string(),
            status: "status".to_string(),
            start_date: "fecha_inicio".to_string(),
            end_date: "fecha_fin".to_string(),
            milestone_date: "fecha_estimada".to_string(),
            milestone_name: "nombre".to_string(),
            milestone_code: "activity_code".to_string(),
            milestone_status: "estado".to_string(),
            uploader: "uploader".to_string(),
            doc_title: "titulo".to_string(),
            doc_description: "descripcion".to_string(),
            doc_tags: "etiquetas".to_string(),
            doc_type: "tipo_documento".to_string(),
        }
    }

    /// Returns `(label, value)` pairs for every mapped key, in declaration
    /// order. Used by config validation.
    pub fn entries(&self) -> [(&'static str, &str); 17] {
        [
            ("id", self.id.as_str()),
            ("code", self.code.as_str()),
            ("name", self.name.as_str()),
            ("responsible", self.responsible.as_str()),
            ("product", self.product.as_str()),
            ("status", self.status.as_str()),
            ("start_date", self.start_date.as_str()),
            ("end_date", self.end_date.as_str()),
            ("milestone_date", self.milestone_date.as_str()),
            ("milestone_name", self.milestone_name.as_str()),
            ("milestone_code", self.milestone_code.as_str()),
            ("milestone_status", self.milestone_status.as_str()),
            ("uploader", self.uploader.as_str()),
            ("doc_title", self.doc_title.as_str()),
            ("doc_description", self.doc_description.as_str()),
            ("doc_tags", self.doc_tags.as_str()),
            ("doc_type", self.doc_type.as_str()),
        ]
    }
}
