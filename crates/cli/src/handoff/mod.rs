//! Durable key/value handoff between separately run scenarios.
//!
//! One scenario copies a user id off the device and saves it; a later run,
//! possibly a different process, loads it. The backing file is a single JSON
//! object rewritten in full on every save. Single writer only: there is no
//! locking, which is fine while scenarios run serially.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{E2eError, Result};

pub mod storage;


/// Handle on the handoff file. Cheap to construct; reads happen per call.
#[derive(Debug, Clone)]
pub struct HandoffStore {
	path: PathBuf,
}

impl HandoffStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Upserts `key` and persists the whole mapping before returning.
	pub fn save(&self, key: &str, value: &str) -> Result<()> {
		let mut entries = storage::read_entries(&self.path)?;
		let previous = entries.insert(key.to_string(), value.to_string());
		storage::write_entries(&self.path, &entries)?;
		debug!(
			target = "nose.handoff",
			key,
			overwrote = previous.is_some(),
			path = %self.path.display(),
			"saved handoff value"
		);
		Ok(())
	}

	/// Returns the stored value, or `None` when the key (or the file) is absent.
	pub fn load(&self, key: &str) -> Result<Option<String>> {
		Ok(storage::read_entries(&self.path)?.remove(key))
	}

	/// Like [`load`](Self::load), but a missing or empty value is an error.
	pub fn require(&self, key: &str) -> Result<String> {
		match self.load(key)? {
			Some(value) if !value.is_empty() => Ok(value),
			_ => Err(E2eError::MissingHandoff {
				key: key.to_string(),
				path: self.path.clone(),
			}),
		}
	}

	pub fn entries(&self) -> Result<BTreeMap<String, String>> {
		storage::read_entries(&self.path)
	}

	/// Deletes `key`. Returns `true` if it was present.
	pub fn remove(&self, key: &str) -> Result<bool> {
		let mut entries = storage::read_entries(&self.path)?;
		if entries.remove(key).is_none() {
			return Ok(false);
		}
		storage::write_entries(&self.path, &entries)?;
		debug!(target = "nose.handoff", key, "removed handoff value");
		Ok(true)
	}
}
