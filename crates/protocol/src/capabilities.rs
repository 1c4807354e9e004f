//! Session capabilities sent with `POST /session`.

use serde::{Deserialize, Serialize};

/// Device and app configuration for a new automation session.
///
/// Serialized with the `appium:` vendor prefix on every non-standard key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
	#[serde(rename = "platformName")]
	pub platform_name: String,
	#[serde(rename = "appium:platformVersion", skip_serializing_if = "Option::is_none")]
	pub platform_version: Option<String>,
	#[serde(rename = "appium:deviceName", skip_serializing_if = "Option::is_none")]
	pub device_name: Option<String>,
	/// Path to the installable `.app` bundle.
	#[serde(rename = "appium:app", skip_serializing_if = "Option::is_none")]
	pub app: Option<String>,
	#[serde(rename = "appium:automationName")]
	pub automation_name: String,
	#[serde(rename = "appium:noReset", skip_serializing_if = "Option::is_none")]
	pub no_reset: Option<bool>,
	#[serde(rename = "appium:fullReset", skip_serializing_if = "Option::is_none")]
	pub full_reset: Option<bool>,
}

impl Default for Capabilities {
	fn default() -> Self {
		Self {
			platform_name: "iOS".to_string(),
			platform_version: None,
			device_name: None,
			app: None,
			automation_name: "XCUITest".to_string(),
			no_reset: None,
			full_reset: None,
		}
	}
}

/// Body of `POST /session`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSessionRequest {
	pub capabilities: CapabilitiesRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitiesRequest {
	pub always_match: Capabilities,
	#[serde(default)]
	pub first_match: Vec<serde_json::Value>,
}

impl NewSessionRequest {
	pub fn new(capabilities: Capabilities) -> Self {
		Self {
			capabilities: CapabilitiesRequest {
				always_match: capabilities,
				first_match: vec![serde_json::json!({})],
			},
		}
	}
}

/// Successful `POST /session` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSessionResponse {
	pub session_id: String,
	#[serde(default)]
	pub capabilities: serde_json::Value,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn vendor_keys_are_prefixed_and_unset_options_omitted() {
		let caps = Capabilities {
			platform_version: Some("18.2".into()),
			device_name: Some("iPhone 16 Pro".into()),
			app: Some("/tmp/nose.app".into()),
			..Default::default()
		};
		let json = serde_json::to_value(NewSessionRequest::new(caps)).unwrap();
		let always = &json["capabilities"]["alwaysMatch"];

		assert_eq!(always["platformName"], "iOS");
		assert_eq!(always["appium:platformVersion"], "18.2");
		assert_eq!(always["appium:deviceName"], "iPhone 16 Pro");
		assert_eq!(always["appium:app"], "/tmp/nose.app");
		assert_eq!(always["appium:automationName"], "XCUITest");
		assert!(always.get("appium:noReset").is_none());
		assert_eq!(json["capabilities"]["firstMatch"], serde_json::json!([{}]));
	}
}
