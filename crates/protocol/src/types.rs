//! Request and response envelopes shared by every endpoint.

use serde::{Deserialize, Deserializer, Serialize};

/// W3C web element identifier key.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";
/// Legacy JSONWP key some Appium drivers still return.
pub const LEGACY_ELEMENT_KEY: &str = "ELEMENT";

/// Special keys from the WebDriver keyboard table.
pub mod keys {
	pub const RETURN: &str = "\u{E006}";
	pub const ENTER: &str = "\u{E007}";
	pub const BACKSPACE: &str = "\u{E003}";
}

/// Every WebDriver response wraps its payload in `value`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireResponse<T> {
	pub value: T,
}

/// Error payload carried in `value` on non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireError {
	pub error: String,
	#[serde(default)]
	pub message: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub stacktrace: Option<String>,
}

/// Error codes this suite distinguishes.
pub mod error_codes {
	pub const NO_SUCH_ELEMENT: &str = "no such element";
	pub const NO_SUCH_ALERT: &str = "no such alert";
	pub const INVALID_SESSION_ID: &str = "invalid session id";
	pub const SESSION_NOT_CREATED: &str = "session not created";
	pub const STALE_ELEMENT: &str = "stale element reference";
}

/// Opaque handle to an element returned by a find request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ElementRef {
	#[serde(rename = "element-6066-11e4-a52e-4f735466cecf")]
	pub id: String,
}

impl ElementRef {
	pub fn new(id: impl Into<String>) -> Self {
		Self { id: id.into() }
	}
}

impl<'de> Deserialize<'de> for ElementRef {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		#[derive(Deserialize)]
		struct Raw {
			#[serde(rename = "element-6066-11e4-a52e-4f735466cecf")]
			w3c: Option<String>,
			#[serde(rename = "ELEMENT")]
			legacy: Option<String>,
		}

		let raw = Raw::deserialize(deserializer)?;
		raw.w3c
			.or(raw.legacy)
			.map(ElementRef::new)
			.ok_or_else(|| serde::de::Error::custom(format!("missing `{ELEMENT_KEY}` in element reference")))
	}
}

/// Body of `POST /element/{id}/value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendKeysRequest {
	pub text: String,
}

/// Body of the Appium clipboard extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipboardRequest {
	pub content_type: ClipboardContentType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardContentType {
	Plaintext,
	Image,
	Url,
}

/// Screen coordinate in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
	pub x: i64,
	pub y: i64,
}

impl Point {
	pub const fn new(x: i64, y: i64) -> Self {
		Self { x, y }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn element_ref_accepts_w3c_and_legacy_keys() {
		let w3c: ElementRef = serde_json::from_str(r#"{"element-6066-11e4-a52e-4f735466cecf":"abc"}"#).unwrap();
		let legacy: ElementRef = serde_json::from_str(r#"{"ELEMENT":"def"}"#).unwrap();
		assert_eq!(w3c, ElementRef::new("abc"));
		assert_eq!(legacy, ElementRef::new("def"));

		let missing = serde_json::from_str::<ElementRef>(r#"{"other":"x"}"#);
		assert!(missing.is_err());
	}

	#[test]
	fn wire_error_tolerates_missing_message() {
		let err: WireResponse<WireError> = serde_json::from_str(r#"{"value":{"error":"no such alert"}}"#).unwrap();
		assert_eq!(err.value.error, error_codes::NO_SUCH_ALERT);
		assert!(err.value.message.is_empty());
	}
}
