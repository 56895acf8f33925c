use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::contact::{Contact, Status};

/// One stored card, keyed by (account, id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub account: String,
    pub status: Status,
    #[serde(flatten)]
    pub contact: Contact,
}

/// Address book store: one JSON entry per line, UTF-8.
///
/// Lines that fail to parse are skipped with a warning instead of poisoning
/// the whole book.
pub struct Book {
    path: PathBuf,
}

impl Book {
    /// Bind the store to a file, creating parent directories as needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("cannot create address book directory {}", parent.display())
                })?;
            }
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries currently in the book. A missing file is an empty book.
    pub fn entries(&self) -> Result<Vec<Entry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("cannot read address book {}", self.path.display()))?;

        let mut entries = Vec::new();
        for (lineno, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Entry>(line) {
                Ok(entry) => entries.push(entry),
                Err(err) => log::warn!(
                    "skipping malformed entry at {}:{}: {err}",
                    self.path.display(),
                    lineno + 1
                ),
            }
        }
        Ok(entries)
    }

    /// Upsert a card under an account. An existing entry with the same
    /// (account, id) is replaced, so re-filing the same message is
    /// idempotent.
    pub fn update(&self, contact: &Contact, account: &str, id: &str, status: Status) -> Result<()> {
        let mut entries = self.entries()?;
        let entry = Entry {
            id: id.to_string(),
            account: account.to_string(),
            status,
            contact: contact.clone(),
        };

        match entries
            .iter_mut()
            .find(|e| e.account == account && e.id == id)
        {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }

        let mut out = String::new();
        for entry in &entries {
            out.push_str(&serde_json::to_string(entry)?);
            out.push('\n');
        }
        std::fs::write(&self.path, out)
            .with_context(|| format!("cannot write address book {}", self.path.display()))?;

        log::debug!("filed {} under account {account}", contact.label());
        Ok(())
    }
}
