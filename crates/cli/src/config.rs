//! Suite configuration: device, server, users, pacing.
//!
//! Loaded from a JSON file (`nose-e2e.json` by default). Every field has a
//! default, so a partial file, or none at all, is valid.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use nose_driver::{Capabilities, WebDriverConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{E2eError, Result};

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "nose-e2e.json";
pub const DEFAULT_SERVER_URL: &str = "http://localhost:4723";
pub const DEFAULT_HANDOFF_FILE: &str = "user_data.json";
/// Upper bound for `pacing.scale`.
pub const MAX_PACING_SCALE: f64 = 100.0;
/// Upper bound for `alert_timeout_secs` (one hour).
pub const MAX_ALERT_TIMEOUT_SECS: u64 = 3600;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
	pub server_url: String,
	pub device: DeviceConfig,
	/// JSON file used to pass values between separately run scenarios.
	pub handoff_path: PathBuf,
	/// Test accounts keyed by logical name (`user_a`, `user_b`).
	pub users: BTreeMap<String, TestUser>,
	pub pacing: Pacing,
	/// How long to wait for an optional system alert.
	pub alert_timeout_secs: u64,
	pub request_timeout_secs: Option<u64>,
}

impl Default for SuiteConfig {
	fn default() -> Self {
		Self {
			server_url: DEFAULT_SERVER_URL.to_string(),
			device: DeviceConfig::default(),
			handoff_path: PathBuf::from(DEFAULT_HANDOFF_FILE),
			users: default_users(),
			pacing: Pacing::default(),
			alert_timeout_secs: 10,
			request_timeout_secs: None,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
	pub platform_name: String,
	pub platform_version: Option<String>,
	pub device_name: Option<String>,
	/// Path to the simulator `.app` build.
	pub app: Option<String>,
	pub automation_name: String,
	pub no_reset: Option<bool>,
	pub full_reset: Option<bool>,
}

impl Default for DeviceConfig {
	fn default() -> Self {
		Self {
			platform_name: "iOS".to_string(),
			platform_version: Some("18.2".to_string()),
			device_name: Some("iPhone 16 Pro".to_string()),
			app: None,
			automation_name: "XCUITest".to_string(),
			no_reset: None,
			full_reset: None,
		}
	}
}

impl DeviceConfig {
	pub fn capabilities(&self) -> Capabilities {
		Capabilities {
			platform_name: self.platform_name.clone(),
			platform_version: self.platform_version.clone(),
			device_name: self.device_name.clone(),
			app: self.app.clone(),
			automation_name: self.automation_name.clone(),
			no_reset: self.no_reset,
			full_reset: self.full_reset,
		}
	}
}

/// A Google account used to sign in, plus the names the app shows for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestUser {
	pub name: String,
	pub email: String,
	pub display_name: String,
	#[serde(default)]
	pub updated_name: Option<String>,
}

impl TestUser {
	/// Label of the account row on the Google account chooser.
	pub fn chooser_label(&self) -> String {
		format!("{} {}", self.name, self.email)
	}
}

fn default_users() -> BTreeMap<String, TestUser> {
	let mut users = BTreeMap::new();
	users.insert(
		"user_a".to_string(),
		TestUser {
			name: "Test User A".to_string(),
			email: "user.a@example.com".to_string(),
			display_name: "User A".to_string(),
			updated_name: None,
		},
	);
	users.insert(
		"user_b".to_string(),
		TestUser {
			name: "Test User B".to_string(),
			email: "user.b@example.com".to_string(),
			display_name: "User B".to_string(),
			updated_name: Some("User B Updated".to_string()),
		},
	);
	users
}

/// Scales the fixed settle pauses between UI steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pacing {
	/// `1.0` keeps the authored pauses, `0.0` disables them.
	pub scale: f64,
}

impl Default for Pacing {
	fn default() -> Self {
		Self { scale: 1.0 }
	}
}

impl Pacing {
	pub fn pause(&self, secs: f64) -> Duration {
		Duration::try_from_secs_f64((secs * self.scale).max(0.0)).unwrap_or(Duration::MAX)
	}
}

/// Command-line values that win over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
	pub server_url: Option<String>,
	pub app: Option<String>,
	pub handoff_path: Option<PathBuf>,
}

impl SuiteConfig {
	/// Loads configuration.
	///
	/// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
	/// read when present and defaults are used otherwise.
	pub fn load(path: Option<&Path>) -> Result<Self> {
		let (path, required) = match path {
			Some(p) => (p.to_path_buf(), true),
			None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
		};

		let content = match fs::read_to_string(&path) {
			Ok(c) => c,
			Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
				debug!(target = "nose.config", path = %path.display(), "no config file; using defaults");
				return Ok(Self::default());
			}
			Err(err) => return Err(E2eError::Config(format!("cannot read {}: {err}", path.display()))),
		};

		let config: SuiteConfig =
			serde_json::from_str(&content).map_err(|err| E2eError::Config(format!("invalid {}: {err}", path.display())))?;
		debug!(target = "nose.config", path = %path.display(), "loaded config");
		config.validate()?;
		Ok(config)
	}

	pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
		if let Some(url) = overrides.server_url {
			self.server_url = url;
		}
		if let Some(app) = overrides.app {
			self.device.app = Some(app);
		}
		if let Some(path) = overrides.handoff_path {
			self.handoff_path = path;
		}
	}

	pub fn validate(&self) -> Result<()> {
		if !(0.0..=MAX_PACING_SCALE).contains(&self.pacing.scale) {
			return Err(E2eError::Config(format!(
				"pacing.scale must be a number from 0 to {MAX_PACING_SCALE}, got {}",
				self.pacing.scale
			)));
		}
		if self.alert_timeout_secs > MAX_ALERT_TIMEOUT_SECS {
			return Err(E2eError::Config(format!(
				"alert_timeout_secs must be at most {MAX_ALERT_TIMEOUT_SECS}, got {}",
				self.alert_timeout_secs
			)));
		}
		if self.server_url.trim().is_empty() {
			return Err(E2eError::Config("server_url is empty".to_string()));
		}
		Ok(())
	}

	pub fn user(&self, key: &str) -> Result<&TestUser> {
		self.users
			.get(key)
			.ok_or_else(|| E2eError::Config(format!("no test user `{key}` configured")))
	}

	pub fn alert_timeout(&self) -> Duration {
		Duration::from_secs(self.alert_timeout_secs)
	}

	pub fn webdriver(&self) -> WebDriverConfig {
		WebDriverConfig {
			server_url: self.server_url.clone(),
			capabilities: self.device.capabilities(),
			request_timeout: self.request_timeout_secs.map(Duration::from_secs),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	#[test]
	fn partial_file_keeps_defaults() {
		let tmp = TempDir::new().unwrap();
		let path = tmp.path().join("suite.json");
		fs::write(&path, r#"{ "device": { "app": "/builds/nose.app" }, "pacing": { "scale": 0 } }"#).unwrap();

		let config = SuiteConfig::load(Some(&path)).unwrap();
		assert_eq!(config.server_url, DEFAULT_SERVER_URL);
		assert_eq!(config.device.app.as_deref(), Some("/builds/nose.app"));
		assert_eq!(config.device.automation_name, "XCUITest");
		assert_eq!(config.pacing.pause(2.0), Duration::ZERO);
		assert!(config.users.contains_key("user_b"));
	}

	#[test]
	fn explicit_missing_file_is_an_error() {
		let tmp = TempDir::new().unwrap();
		let err = SuiteConfig::load(Some(&tmp.path().join("absent.json"))).unwrap_err();
		assert!(matches!(err, E2eError::Config(_)));
	}

	#[test]
	fn negative_pacing_is_rejected() {
		let tmp = TempDir::new().unwrap();
		let path = tmp.path().join("suite.json");
		fs::write(&path, r#"{ "pacing": { "scale": -1 } }"#).unwrap();
		assert!(matches!(SuiteConfig::load(Some(&path)), Err(E2eError::Config(_))));
	}

	#[test]
	fn oversized_pacing_is_rejected() {
		let tmp = TempDir::new().unwrap();
		let path = tmp.path().join("suite.json");
		fs::write(&path, r#"{ "pacing": { "scale": 1e300 } }"#).unwrap();

		let err = SuiteConfig::load(Some(&path)).unwrap_err();
		assert!(err.to_string().contains("pacing.scale must be a number from 0 to 100"), "{err}");
	}

	#[test]
	fn oversized_alert_timeout_is_rejected() {
		let tmp = TempDir::new().unwrap();
		let path = tmp.path().join("suite.json");
		fs::write(&path, format!(r#"{{ "alert_timeout_secs": {} }}"#, u64::MAX)).unwrap();

		let err = SuiteConfig::load(Some(&path)).unwrap_err();
		assert!(err.to_string().contains("alert_timeout_secs"), "{err}");
	}

	#[test]
	fn upper_bounds_are_accepted() {
		let config = SuiteConfig {
			pacing: Pacing { scale: MAX_PACING_SCALE },
			alert_timeout_secs: MAX_ALERT_TIMEOUT_SECS,
			..SuiteConfig::default()
		};
		assert!(config.validate().is_ok());
		assert_eq!(config.pacing.pause(2.0), Duration::from_secs(200));
	}

	#[test]
	fn pause_saturates_instead_of_overflowing() {
		let pacing = Pacing { scale: 1e300 };
		assert_eq!(pacing.pause(2.0), Duration::MAX);
		assert_eq!(Pacing { scale: f64::NAN }.pause(1.0), Duration::ZERO);
	}

	#[test]
	fn overrides_win_over_file_values() {
		let mut config = SuiteConfig::default();
		config.apply_overrides(ConfigOverrides {
			server_url: Some("http://10.0.0.2:4723".into()),
			app: Some("/tmp/nose.app".into()),
			handoff_path: None,
		});

		let webdriver = config.webdriver();
		assert_eq!(webdriver.server_url, "http://10.0.0.2:4723");
		assert_eq!(webdriver.capabilities.app.as_deref(), Some("/tmp/nose.app"));
		assert_eq!(config.handoff_path, PathBuf::from(DEFAULT_HANDOFF_FILE));
	}

	#[test]
	fn chooser_label_joins_name_and_email() {
		let config = SuiteConfig::default();
		assert_eq!(config.user("user_a").unwrap().chooser_label(), "Test User A user.a@example.com");
		assert!(config.user("user_c").is_err());
	}
}
