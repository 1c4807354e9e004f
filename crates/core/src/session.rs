//! The remote session interface consumed by page objects and fixtures.

use async_trait::async_trait;
use nose_protocol::{ElementRef, Locator, Point};

use crate::error::Result;

/// Default drag duration for [`Session::swipe`].
pub const DEFAULT_SWIPE_MS: u64 = 600;

/// A system or in-app alert currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
	pub text: String,
}

/// One live connection to the automation backend.
///
/// Every call blocks the caller until the backend answers; nothing here
/// retries or waits on its own.
#[async_trait]
pub trait Session: Send + Sync {
	/// Backend-assigned session identifier.
	fn id(&self) -> &str;

	/// Returns the first element matching `locator`.
	///
	/// Fails with [`Error::ElementNotFound`](crate::Error::ElementNotFound)
	/// when nothing matches.
	async fn find_element(&self, locator: &Locator) -> Result<ElementRef>;

	/// Returns every element matching `locator`, possibly none.
	async fn find_elements(&self, locator: &Locator) -> Result<Vec<ElementRef>>;

	async fn click(&self, element: &ElementRef) -> Result<()>;

	/// Empties an editable element.
	async fn clear(&self, element: &ElementRef) -> Result<()>;

	/// Types `text` into the element. Special keys from
	/// [`keys`](nose_protocol::keys) are sent as-is.
	async fn send_keys(&self, element: &ElementRef, text: &str) -> Result<()>;

	async fn text(&self, element: &ElementRef) -> Result<String>;

	/// Reads an element attribute such as `value` or `label`.
	async fn attribute(&self, element: &ElementRef, name: &str) -> Result<Option<String>>;

	async fn is_displayed(&self, element: &ElementRef) -> Result<bool>;

	/// Returns the open alert, or `None` when no alert is shown.
	async fn try_active_alert(&self) -> Result<Option<Alert>>;

	async fn accept_alert(&self) -> Result<()>;

	async fn dismiss_alert(&self) -> Result<()>;

	async fn tap(&self, at: Point) -> Result<()>;

	async fn swipe(&self, from: Point, to: Point, duration_ms: u64) -> Result<()>;

	/// Reads the device clipboard as plain text.
	async fn clipboard_text(&self) -> Result<String>;

	/// Ends the remote session. Later calls fail with
	/// [`Error::SessionClosed`](crate::Error::SessionClosed).
	async fn end(&self) -> Result<()>;
}

/// Opens new sessions. The fixture owns one of these and calls it at most
/// once per run cycle.
#[async_trait]
pub trait SessionConnector: Send + Sync {
	/// Human-readable endpoint, used in logs and errors.
	fn endpoint(&self) -> &str;

	async fn connect(&self) -> Result<Box<dyn Session>>;
}
