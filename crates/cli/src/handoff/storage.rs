//! File format for the handoff store: one flat JSON object of strings.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::Result;

/// Reads the whole mapping. A missing file is an empty mapping; a file that
/// is not a JSON object of strings is an error.
pub fn read_entries(path: &Path) -> Result<BTreeMap<String, String>> {
	let content = match fs::read_to_string(path) {
		Ok(content) => content,
		Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
		Err(err) => return Err(err.into()),
	};
	if content.trim().is_empty() {
		return Ok(BTreeMap::new());
	}
	Ok(serde_json::from_str(&content)?)
}

/// Replaces the file with `entries`, creating parent directories.
pub fn write_entries(path: &Path, entries: &BTreeMap<String, String>) -> Result<()> {
	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		fs::create_dir_all(parent)?;
	}
	fs::write(path, serde_json::to_string_pretty(entries)?)?;
	Ok(())
}
