//! The checklist — the computed read model for a batch, never stored.
//!
//! Derived on demand from the catalog and the uploaded-documents mapping;
//! rendering and transport are the caller's concern.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  batch::UploadedDocument,
  catalog::{Category, DocumentKind, Purpose, RequirementCatalog},
};

/// Per-document satisfied/not-satisfied line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistEntry {
  pub kind:        DocumentKind,
  /// Whether the accept gate treats this kind as optional. Shown for
  /// information only; readiness below still counts it.
  pub optional:    bool,
  pub uploaded:    bool,
  pub stored_name: Option<String>,
  pub uploaded_at: Option<DateTime<Utc>>,
}

/// The full per-batch view: one entry per required kind, in catalog order,
/// plus the overall readiness flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checklist {
  pub entries:   Vec<ChecklistEntry>,
  /// True only when the required list is non-empty and every listed kind —
  /// optional ones included — has an upload.
  pub all_ready: bool,
}

/// Build the checklist for a (purpose, category) choice. An unset or
/// unrecognised pair produces zero entries and `all_ready = false`: an
/// applicant cannot be ready with nothing required.
pub fn build_checklist(
  catalog: &RequirementCatalog,
  purpose: Option<Purpose>,
  category: Option<Category>,
  uploaded: &BTreeMap<DocumentKind, UploadedDocument>,
) -> Checklist {
  let required = match (purpose, category) {
    (Some(p), Some(c)) => catalog.lookup(p, c),
    _ => &[],
  };

  let entries: Vec<ChecklistEntry> = required
    .iter()
    .map(|&kind| {
      let doc = uploaded.get(&kind);
      ChecklistEntry {
        kind,
        optional: catalog.is_optional(kind),
        uploaded: doc.is_some(),
        stored_name: doc.map(|d| d.stored_name.clone()),
        uploaded_at: doc.map(|d| d.uploaded_at),
      }
    })
    .collect();

  let all_ready = !entries.is_empty() && entries.iter().all(|e| e.uploaded);

  Checklist { entries, all_ready }
}
