//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, expiry dates as `YYYY-MM-DD`,
//! and enum columns as their `snake_case` discriminants.

use chrono::{DateTime, NaiveDate, Utc};
use dossier_core::{
  catalog::{Category, DocumentKind, Purpose},
  record::DocumentRecord,
  review::ReviewStatus,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339()
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String {
  d.format("%Y-%m-%d").to_string()
}

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Enum columns ────────────────────────────────────────────────────────────

pub fn decode_purpose(s: &str) -> Result<Purpose> {
  Purpose::parse(s).ok_or_else(|| Error::UnknownToken {
    column: "purpose",
    value:  s.to_string(),
  })
}

pub fn decode_category(s: &str) -> Result<Category> {
  Category::parse(s).ok_or_else(|| Error::UnknownToken {
    column: "category",
    value:  s.to_string(),
  })
}

pub fn decode_kind(s: &str) -> Result<DocumentKind> {
  DocumentKind::parse(s).ok_or_else(|| Error::UnknownToken {
    column: "kind",
    value:  s.to_string(),
  })
}

pub fn decode_status(s: &str) -> Result<ReviewStatus> {
  ReviewStatus::parse(s).ok_or_else(|| Error::UnknownToken {
    column: "status",
    value:  s.to_string(),
  })
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw strings read directly from a `documents` row.
pub struct RawDocumentRecord {
  pub id:          i64,
  pub reference:   String,
  pub purpose:     String,
  pub category:    String,
  pub kind:        String,
  pub stored_name: String,
  pub expiry:      Option<String>,
  pub status:      String,
  pub uploaded_at: String,
}

impl RawDocumentRecord {
  pub fn into_record(self) -> Result<DocumentRecord> {
    Ok(DocumentRecord {
      id:          self.id,
      reference:   self.reference.into(),
      purpose:     decode_purpose(&self.purpose)?,
      category:    decode_category(&self.category)?,
      kind:        decode_kind(&self.kind)?,
      stored_name: self.stored_name,
      expiry_date: self.expiry.as_deref().map(decode_date).transpose()?,
      status:      decode_status(&self.status)?,
      uploaded_at: decode_dt(&self.uploaded_at)?,
    })
  }
}
