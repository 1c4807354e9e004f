//! [`Session`] over the W3C WebDriver HTTP protocol, as served by Appium.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use nose_protocol::{
	ActionsRequest, Capabilities, ClipboardContentType, ClipboardRequest, ElementRef, Locator, NewSessionRequest,
	NewSessionResponse, Point, SendKeysRequest, WireError, WireResponse, error_codes,
};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::session::{Alert, Session, SessionConnector};

/// Where and how to open a session.
#[derive(Debug, Clone)]
pub struct WebDriverConfig {
	/// Appium server base URL, e.g. `http://localhost:4723`.
	pub server_url: String,
	pub capabilities: Capabilities,
	/// Client-side per-request timeout. `None` leaves timing to the backend.
	pub request_timeout: Option<Duration>,
}

/// Opens [`WebDriverSession`]s for the fixture.
#[derive(Debug, Clone)]
pub struct WebDriverConnector {
	config: WebDriverConfig,
}

impl WebDriverConnector {
	pub fn new(config: WebDriverConfig) -> Self {
		Self { config }
	}
}

#[async_trait]
impl SessionConnector for WebDriverConnector {
	fn endpoint(&self) -> &str {
		&self.config.server_url
	}

	async fn connect(&self) -> Result<Box<dyn Session>> {
		let session = WebDriverSession::start(&self.config).await?;
		Ok(Box::new(session))
	}
}

/// Thin JSON-over-HTTP layer: builds URLs and unwraps `{"value": ...}`.
#[derive(Debug, Clone)]
struct Transport {
	client: reqwest::Client,
	base: Url,
}

impl Transport {
	fn new(server_url: &str, request_timeout: Option<Duration>) -> Result<Self> {
		let mut base = Url::parse(server_url)?;
		if !base.path().ends_with('/') {
			let path = format!("{}/", base.path());
			base.set_path(&path);
		}

		let mut builder = reqwest::Client::builder();
		if let Some(timeout) = request_timeout {
			builder = builder.timeout(timeout);
		}

		Ok(Self {
			client: builder.build()?,
			base,
		})
	}

	fn url(&self, path: &str) -> Result<Url> {
		Ok(self.base.join(path)?)
	}

	async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
		let url = self.url(path)?;
		self.execute(self.client.get(url)).await
	}

	async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
		let url = self.url(path)?;
		self.execute(self.client.post(url).json(body)).await
	}

	async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
		let url = self.url(path)?;
		self.execute(self.client.delete(url)).await
	}

	async fn execute<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
		let response = request.send().await?;
		let status = response.status();
		let body = response.bytes().await?;

		if !status.is_success() {
			return Err(match serde_json::from_slice::<WireResponse<WireError>>(&body) {
				Ok(wire) => Error::Remote {
					error: wire.value.error,
					message: wire.value.message,
				},
				Err(_) => Error::Protocol(format!("HTTP {status}: {}", String::from_utf8_lossy(&body))),
			});
		}

		let envelope: WireResponse<T> = serde_json::from_slice(&body)?;
		Ok(envelope.value)
	}
}

/// Live Appium session.
#[derive(Debug)]
pub struct WebDriverSession {
	transport: Transport,
	id: String,
	closed: AtomicBool,
}

impl WebDriverSession {
	/// Creates a session on the backend. Fails with [`Error::SessionStart`]
	/// on any error; there is no retry.
	pub async fn start(config: &WebDriverConfig) -> Result<Self> {
		let start_error = |err: Error| Error::SessionStart {
			endpoint: config.server_url.clone(),
			reason: err.to_string(),
		};

		let transport = Transport::new(&config.server_url, config.request_timeout).map_err(start_error)?;
		debug!(
			target = "nose.session",
			endpoint = %config.server_url,
			platform = %config.capabilities.platform_name,
			automation = %config.capabilities.automation_name,
			"creating session"
		);

		let created: NewSessionResponse = transport
			.post("session", &NewSessionRequest::new(config.capabilities.clone()))
			.await
			.map_err(start_error)?;

		info!(target = "nose.session", session_id = %created.session_id, "session started");
		Ok(Self {
			transport,
			id: created.session_id,
			closed: AtomicBool::new(false),
		})
	}

	fn path(&self, suffix: &str) -> Result<String> {
		if self.closed.load(Ordering::SeqCst) {
			return Err(Error::SessionClosed(self.id.clone()));
		}
		Ok(format!("session/{}/{suffix}", self.id))
	}

	async fn alert_command(&self, command: &str) -> Result<()> {
		let path = self.path(&format!("alert/{command}"))?;
		match self.transport.post::<_, IgnoredAny>(&path, &serde_json::json!({})).await {
			Ok(_) => Ok(()),
			Err(err) if err.remote_code() == Some(error_codes::NO_SUCH_ALERT) => Err(Error::NoSuchAlert),
			Err(err) => Err(err),
		}
	}

	async fn perform(&self, actions: &ActionsRequest) -> Result<()> {
		let path = self.path("actions")?;
		self.transport.post::<_, IgnoredAny>(&path, actions).await?;
		Ok(())
	}
}

fn not_found(err: Error, locator: &Locator) -> Error {
	if err.remote_code() == Some(error_codes::NO_SUCH_ELEMENT) {
		Error::ElementNotFound {
			locator: locator.to_string(),
		}
	} else {
		err
	}
}

#[async_trait]
impl Session for WebDriverSession {
	fn id(&self) -> &str {
		&self.id
	}

	async fn find_element(&self, locator: &Locator) -> Result<ElementRef> {
		let path = self.path("element")?;
		debug!(target = "nose.session", %locator, "find element");
		self.transport
			.post(&path, &locator.to_params())
			.await
			.map_err(|err| not_found(err, locator))
	}

	async fn find_elements(&self, locator: &Locator) -> Result<Vec<ElementRef>> {
		let path = self.path("elements")?;
		self.transport.post(&path, &locator.to_params()).await
	}

	async fn click(&self, element: &ElementRef) -> Result<()> {
		let path = self.path(&format!("element/{}/click", element.id))?;
		self.transport.post::<_, IgnoredAny>(&path, &serde_json::json!({})).await?;
		Ok(())
	}

	async fn clear(&self, element: &ElementRef) -> Result<()> {
		let path = self.path(&format!("element/{}/clear", element.id))?;
		self.transport.post::<_, IgnoredAny>(&path, &serde_json::json!({})).await?;
		Ok(())
	}

	async fn send_keys(&self, element: &ElementRef, text: &str) -> Result<()> {
		let path = self.path(&format!("element/{}/value", element.id))?;
		let body = SendKeysRequest { text: text.to_string() };
		self.transport.post::<_, IgnoredAny>(&path, &body).await?;
		Ok(())
	}

	async fn text(&self, element: &ElementRef) -> Result<String> {
		let path = self.path(&format!("element/{}/text", element.id))?;
		self.transport.get(&path).await
	}

	async fn attribute(&self, element: &ElementRef, name: &str) -> Result<Option<String>> {
		let path = self.path(&format!("element/{}/attribute/{name}", element.id))?;
		let value: serde_json::Value = self.transport.get(&path).await?;
		Ok(match value {
			serde_json::Value::Null => None,
			serde_json::Value::String(s) => Some(s),
			other => Some(other.to_string()),
		})
	}

	async fn is_displayed(&self, element: &ElementRef) -> Result<bool> {
		let path = self.path(&format!("element/{}/displayed", element.id))?;
		self.transport.get(&path).await
	}

	async fn try_active_alert(&self) -> Result<Option<Alert>> {
		let path = self.path("alert/text")?;
		match self.transport.get::<Option<String>>(&path).await {
			Ok(text) => Ok(Some(Alert {
				text: text.unwrap_or_default(),
			})),
			Err(err) if err.remote_code() == Some(error_codes::NO_SUCH_ALERT) => Ok(None),
			Err(err) => Err(err),
		}
	}

	async fn accept_alert(&self) -> Result<()> {
		self.alert_command("accept").await
	}

	async fn dismiss_alert(&self) -> Result<()> {
		self.alert_command("dismiss").await
	}

	async fn tap(&self, at: Point) -> Result<()> {
		debug!(target = "nose.session", x = at.x, y = at.y, "tap");
		self.perform(&ActionsRequest::tap(at)).await
	}

	async fn swipe(&self, from: Point, to: Point, duration_ms: u64) -> Result<()> {
		debug!(target = "nose.session", ?from, ?to, duration_ms, "swipe");
		self.perform(&ActionsRequest::swipe(from, to, duration_ms)).await
	}

	async fn clipboard_text(&self) -> Result<String> {
		let path = self.path("appium/device/get_clipboard")?;
		let body = ClipboardRequest {
			content_type: ClipboardContentType::Plaintext,
		};
		let encoded: String = self.transport.post(&path, &body).await?;
		let bytes = STANDARD.decode(encoded.trim())?;
		Ok(String::from_utf8(bytes)?)
	}

	async fn end(&self) -> Result<()> {
		if self.closed.swap(true, Ordering::SeqCst) {
			return Ok(());
		}
		let path = format!("session/{}", self.id);
		match self.transport.delete::<IgnoredAny>(&path).await {
			Ok(_) => {
				info!(target = "nose.session", session_id = %self.id, "session ended");
				Ok(())
			}
			Err(err) => {
				warn!(target = "nose.session", session_id = %self.id, error = %err, "failed to end session");
				Err(err)
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn transport_keeps_base_path_prefix() {
		let transport = Transport::new("http://localhost:4723/wd/hub", None).unwrap();
		assert_eq!(
			transport.url("session/abc/element").unwrap().as_str(),
			"http://localhost:4723/wd/hub/session/abc/element"
		);

		let transport = Transport::new("http://localhost:4723", None).unwrap();
		assert_eq!(transport.url("session").unwrap().as_str(), "http://localhost:4723/session");
	}

	#[test]
	fn transport_rejects_garbage_url() {
		assert!(matches!(Transport::new("not a url", None), Err(Error::InvalidUrl(_))));
	}

	#[test]
	fn not_found_only_rewrites_no_such_element() {
		let locator = Locator::accessibility_id("Search");
		let err = not_found(
			Error::Remote {
				error: "no such element".into(),
				message: "An element could not be located".into(),
			},
			&locator,
		);
		assert!(err.is_element_not_found());
		assert_eq!(err.to_string(), r#"element not found: accessibility id "Search""#);

		let err = not_found(
			Error::Remote {
				error: "stale element reference".into(),
				message: String::new(),
			},
			&locator,
		);
		assert_eq!(err.remote_code(), Some("stale element reference"));
	}
}
