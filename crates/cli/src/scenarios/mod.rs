//! Registered end-to-end scenarios.
//!
//! Scenarios run in name order against one shared session. Several of them
//! pass values forward through the handoff store (the account-creation
//! scenarios save user ids that later ones require), so the numeric name
//! prefixes are load-bearing.

mod account_creation;
mod blocking;
mod delete_account;
mod home;

use std::time::Duration;

use async_trait::async_trait;
use nose_driver::Session;

use crate::config::{SuiteConfig, TestUser};
use crate::error::{E2eError, Result};
use crate::handoff::HandoffStore;
use crate::pages::{HomePage, LibraryPage, LoginPage};

/// One end-to-end test case.
#[async_trait]
pub trait Scenario: Send + Sync {
	/// Unique name; also the run order.
	fn name(&self) -> &'static str;

	/// One line for `nose-e2e list`.
	fn description(&self) -> &'static str {
		""
	}

	async fn run(&self, cx: &ScenarioContext<'_>) -> Result<()>;
}

/// Everything a scenario body may touch.
pub struct ScenarioContext<'a> {
	session: &'a dyn Session,
	handoff: &'a HandoffStore,
	config: &'a SuiteConfig,
}

impl<'a> ScenarioContext<'a> {
	pub fn new(session: &'a dyn Session, handoff: &'a HandoffStore, config: &'a SuiteConfig) -> Self {
		Self {
			session,
			handoff,
			config,
		}
	}

	pub fn session(&self) -> &'a dyn Session {
		self.session
	}

	pub fn handoff(&self) -> &'a HandoffStore {
		self.handoff
	}

	pub fn config(&self) -> &'a SuiteConfig {
		self.config
	}

	pub fn user(&self, key: &str) -> Result<&'a TestUser> {
		self.config.user(key)
	}

	pub fn login_page(&self) -> LoginPage<'a> {
		LoginPage::new(self.session)
	}

	pub fn home_page(&self) -> HomePage<'a> {
		HomePage::new(self.session)
	}

	pub fn library_page(&self) -> LibraryPage<'a> {
		LibraryPage::new(self.session)
	}

	/// Lets the app settle for `secs` authored seconds, scaled by pacing.
	pub async fn pause(&self, secs: f64) {
		let delay = self.config.pacing.pause(secs);
		if delay > Duration::ZERO {
			tokio::time::sleep(delay).await;
		}
	}
}

/// Every registered scenario, sorted by name.
pub fn all() -> Vec<Box<dyn Scenario>> {
	let mut scenarios: Vec<Box<dyn Scenario>> = vec![
		Box::new(account_creation::CreateUserA),
		Box::new(account_creation::CreateUserB),
		Box::new(home::SearchAndBookmark),
		Box::new(blocking::BlockFriend),
		Box::new(blocking::BlockedOwnerView),
		Box::new(blocking::AddBlockedFriendBack),
		Box::new(delete_account::DeleteAccount),
	];
	scenarios.sort_by_key(|s| s.name());
	scenarios
}

/// Scenarios whose name contains `filter`; all of them without one.
pub fn select(filter: Option<&str>) -> Result<Vec<Box<dyn Scenario>>> {
	let selected: Vec<_> = all()
		.into_iter()
		.filter(|s| filter.is_none_or(|f| s.name().contains(f)))
		.collect();
	if selected.is_empty() {
		return Err(E2eError::NoScenarios(filter.unwrap_or_default().to_string()));
	}
	Ok(selected)
}

#[cfg(test)]
pub(crate) mod test_support {
	use nose_driver::Locator;
	use nose_driver::testing::MockSession;
	use tempfile::TempDir;

	use super::*;
	use crate::config::Pacing;

	/// Config with pauses and alert waits disabled.
	pub fn fast_config(tmp: &TempDir) -> SuiteConfig {
		SuiteConfig {
			handoff_path: tmp.path().join("user_data.json"),
			pacing: Pacing { scale: 0.0 },
			alert_timeout_secs: 0,
			..SuiteConfig::default()
		}
	}

	pub fn show(session: &MockSession, locators: impl IntoIterator<Item = Locator>) {
		for locator in locators {
			session.set_element(locator);
		}
	}

	/// Screen state for a complete sign-in and sign-out of `user`.
	pub fn show_login_and_logout(session: &MockSession, user: &TestUser) {
		show(
			session,
			[
				LoginPage::CONTINUE_WITH_GOOGLE,
				LoginPage::account_link(user),
				LoginPage::CONTINUE,
				LibraryPage::PERSONAL_LIBRARY,
				LibraryPage::ACCOUNT,
				LibraryPage::LOGOUT,
				LibraryPage::CONFIRM,
				LibraryPage::OK,
			],
		);
	}
}
