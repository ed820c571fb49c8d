//! [`SqliteStore`] — the SQLite implementation of [`DocumentStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use dossier_core::{
  batch::ReferenceCode,
  record::{DocumentRecord, NewDocumentRecord},
  review::{ReviewAction, ReviewStatus},
  store::DocumentStore,
};

use crate::{
  Error, Result,
  encode::{RawDocumentRecord, encode_date, encode_dt},
  schema::SCHEMA,
};

const COLUMNS: &str =
  "id, reference, purpose, category, kind, stored_name, expiry, status, uploaded_at";

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawDocumentRecord> {
  Ok(RawDocumentRecord {
    id:          row.get(0)?,
    reference:   row.get(1)?,
    purpose:     row.get(2)?,
    category:    row.get(3)?,
    kind:        row.get(4)?,
    stored_name: row.get(5)?,
    expiry:      row.get(6)?,
    status:      row.get(7)?,
    uploaded_at: row.get(8)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Dossier document store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Fetch one row by id, without decoding.
  async fn fetch_raw(&self, id: i64) -> Result<Option<RawDocumentRecord>> {
    let raw = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {COLUMNS} FROM documents WHERE id = ?1"),
              rusqlite::params![id],
              read_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(raw)
  }
}

// ─── DocumentStore impl ──────────────────────────────────────────────────────

impl DocumentStore for SqliteStore {
  type Error = Error;

  async fn insert_document(&self, input: NewDocumentRecord) -> Result<DocumentRecord> {
    let uploaded_at = Utc::now();
    let status = ReviewStatus::Pending;

    let reference_str = input.reference.as_str().to_owned();
    let purpose_str   = input.purpose.as_str().to_owned();
    let category_str  = input.category.as_str().to_owned();
    let kind_str      = input.kind.as_str().to_owned();
    let stored_name   = input.stored_name.clone();
    let expiry_str    = input.expiry_date.map(encode_date);
    let status_str    = status.as_str().to_owned();
    let at_str        = encode_dt(uploaded_at);

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO documents (
             reference, purpose, category, kind,
             stored_name, expiry, status, uploaded_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            reference_str,
            purpose_str,
            category_str,
            kind_str,
            stored_name,
            expiry_str,
            status_str,
            at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(DocumentRecord {
      id,
      reference: input.reference,
      purpose: input.purpose,
      category: input.category,
      kind: input.kind,
      stored_name: input.stored_name,
      expiry_date: input.expiry_date,
      status,
      uploaded_at,
    })
  }

  async fn get_document(&self, id: i64) -> Result<Option<DocumentRecord>> {
    let raw = self.fetch_raw(id).await?;
    raw.map(RawDocumentRecord::into_record).transpose()
  }

  async fn list_by_reference(&self, reference: &ReferenceCode) -> Result<Vec<DocumentRecord>> {
    let reference_str = reference.as_str().to_owned();

    let raws: Vec<RawDocumentRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {COLUMNS} FROM documents
           WHERE reference = ?1
           ORDER BY uploaded_at DESC, id DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![reference_str], read_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDocumentRecord::into_record).collect()
  }

  async fn list_documents(&self, status: Option<ReviewStatus>) -> Result<Vec<DocumentRecord>> {
    let status_str = status.map(|s| s.as_str().to_owned());

    let raws: Vec<RawDocumentRecord> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(s) = status_str {
          let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM documents
             WHERE status = ?1
             ORDER BY uploaded_at DESC, id DESC"
          ))?;
          stmt
            .query_map(rusqlite::params![s], read_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM documents ORDER BY uploaded_at DESC, id DESC"
          ))?;
          stmt
            .query_map([], read_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDocumentRecord::into_record).collect()
  }

  async fn transition(&self, id: i64, action: ReviewAction) -> Result<DocumentRecord> {
    let raw = self.fetch_raw(id).await?.ok_or(Error::RecordNotFound(id))?;
    let record = raw.into_record()?;

    let next = record.status.apply(action).map_err(|_| Error::InvalidTransition {
      id,
      from: record.status,
      action,
    })?;

    let next_str = next.as_str().to_owned();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE documents SET status = ?1 WHERE id = ?2",
          rusqlite::params![next_str, id],
        )?;
        Ok(())
      })
      .await?;

    Ok(DocumentRecord { status: next, ..record })
  }
}
