//! On-disk storage for uploaded document bytes.
//!
//! Only the bytes live on disk; every other attribute of an upload lives in
//! the document store. The stored name embeds the document kind, a
//! millisecond timestamp, and a sanitised version of the client's filename
//! hint, so a directory listing stays human-readable.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::Utc;
use dossier_core::catalog::DocumentKind;

use crate::error::Result;

/// File storage rooted at the configured upload directory.
#[derive(Clone)]
pub struct FileStore {
  root: PathBuf,
}

impl FileStore {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Write one document's bytes and return the assigned storage name.
  ///
  /// The write completes before the caller inserts the database row; a
  /// crash in between leaves an orphan file and no record.
  pub async fn save(
    &self,
    kind: DocumentKind,
    original_name: &str,
    bytes: Bytes,
  ) -> Result<String> {
    let stored_name = format!(
      "{kind}_{}_{}",
      Utc::now().timestamp_millis(),
      sanitize_filename(original_name),
    );
    tokio::fs::create_dir_all(&self.root).await?;
    tokio::fs::write(self.root.join(&stored_name), &bytes).await?;
    Ok(stored_name)
  }
}

/// Reduce a client-supplied filename hint to a safe single path segment:
/// take the last segment of any path, keep `[A-Za-z0-9._-]`, map everything
/// else to `_`, and never return something empty or dot-leading.
pub fn sanitize_filename(name: &str) -> String {
  let last_segment = name
    .rsplit(['/', '\\'])
    .next()
    .unwrap_or(name);

  let cleaned: String = last_segment
    .chars()
    .map(|c| {
      if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
        c
      } else {
        '_'
      }
    })
    .collect();

  let trimmed = cleaned.trim_start_matches('.');
  if trimmed.is_empty() {
    "file".to_string()
  } else {
    trimmed.to_string()
  }
}
