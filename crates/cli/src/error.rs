use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, E2eError>;

#[derive(Debug, Error)]
pub enum E2eError {
	/// Session-level failure: element not found, backend error, start failure.
	#[error(transparent)]
	Driver(#[from] nose_driver::Error),

	/// A verification step did not hold.
	#[error("assertion failed: {0}")]
	Assertion(String),

	/// A scenario needs a value that an earlier scenario should have saved.
	#[error("handoff key `{key}` is missing or empty in {}; run the scenario that saves it first", path.display())]
	MissingHandoff { key: String, path: PathBuf },

	#[error("configuration error: {0}")]
	Config(String),

	#[error("no scenarios match `{0}`")]
	NoScenarios(String),

	#[error("{failed} of {total} scenarios failed")]
	RunFailed { failed: usize, total: usize },

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

impl E2eError {
	/// Whether the whole run must stop rather than move on to the next scenario.
	pub fn is_fatal_for_run(&self) -> bool {
		matches!(self, E2eError::Driver(nose_driver::Error::SessionStart { .. }))
	}
}

/// Fails with [`E2eError::Assertion`] unless `condition` holds.
pub fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<()> {
	if condition { Ok(()) } else { Err(E2eError::Assertion(message())) }
}
