//! Launch screen, Google account chooser and first-run name prompt.

use std::time::Duration;

use nose_driver::{Locator, Session};
use tracing::debug;

use super::BasePage;
use super::alerts::{ALERT_POLL_INTERVAL, accept_alert_within};
use crate::config::TestUser;
use crate::error::{E2eError, Result, ensure};

pub struct LoginPage<'s> {
	base: BasePage<'s>,
}

impl<'s> LoginPage<'s> {
	pub const CONTINUE_WITH_GOOGLE: Locator = Locator::id("Continue with Google");
	pub const CONTINUE: Locator = Locator::id("Continue");
	/// Same button when the Google sheet renders in Japanese.
	pub const CONTINUE_JA: Locator = Locator::id("次へ");
	pub const NAME_PROMPT: Locator = Locator::id("What should we call you?");
	pub const NAME_FIELD: Locator = Locator::class("XCUIElementTypeTextField");
	pub const NAME_SUBMIT: Locator = Locator::class("XCUIElementTypeButton");
	pub const ERROR_ALERT: Locator = Locator::path(r#"//XCUIElementTypeAlert[@name="Error"]"#);
	pub const OK: Locator = Locator::id("OK");

	pub fn new(session: &'s dyn Session) -> Self {
		Self {
			base: BasePage::new(session),
		}
	}

	/// Row for `user` on the Google account chooser.
	pub fn account_link(user: &TestUser) -> Locator {
		Locator::xpath(format!(r#"//XCUIElementTypeLink[@name="{}"]"#, user.chooser_label()))
	}

	pub async fn click_continue_with_google(&self) -> Result<()> {
		self.base.click(&Self::CONTINUE_WITH_GOOGLE).await
	}

	/// Accepts the "wants to use google.com to sign in" dialog if it shows up
	/// within `timeout`.
	pub async fn accept_sign_in_consent(&self, timeout: Duration) -> Result<bool> {
		accept_alert_within(self.base.session(), timeout, ALERT_POLL_INTERVAL).await
	}

	pub async fn choose_account(&self, user: &TestUser) -> Result<()> {
		self.base.click(&Self::account_link(user)).await
	}

	/// Clicks Continue, falling back to the localized label.
	pub async fn click_continue(&self) -> Result<()> {
		let button = match self.base.find(&Self::CONTINUE).await {
			Ok(button) => button,
			Err(E2eError::Driver(err)) if err.is_element_not_found() => {
				debug!(target = "nose.page", "`Continue` not found; trying localized label");
				self.base.find(&Self::CONTINUE_JA).await?
			}
			Err(err) => return Err(err),
		};
		self.base.session().click(&button).await?;
		Ok(())
	}

	pub async fn expect_name_prompt(&self) -> Result<()> {
		let text = self.base.text(&Self::NAME_PROMPT).await?;
		ensure(text == "What should we call you?", || format!("name prompt reads {text:?}"))
	}

	pub async fn enter_display_name(&self, name: &str) -> Result<()> {
		self.base.replace_text(&Self::NAME_FIELD, name).await
	}

	pub async fn submit_display_name(&self) -> Result<()> {
		self.base.click(&Self::NAME_SUBMIT).await
	}

	/// The validation alert for a rejected name is up; dismisses it with OK.
	pub async fn acknowledge_name_error(&self) -> Result<()> {
		self.base.expect_visible(&Self::ERROR_ALERT).await?;
		self.base.click(&Self::OK).await
	}

	/// The app is back on its launch screen (signed out).
	pub async fn expect_launch_screen(&self) -> Result<()> {
		self.base.expect_visible(&Self::CONTINUE_WITH_GOOGLE).await
	}
}

#[cfg(test)]
mod tests {
	use nose_driver::testing::{MockAction, MockSession};

	use super::*;

	fn user_a() -> TestUser {
		TestUser {
			name: "Test User A".into(),
			email: "user.a@example.com".into(),
			display_name: "User A".into(),
			updated_name: None,
		}
	}

	#[test]
	fn account_link_matches_chooser_row() {
		assert_eq!(
			LoginPage::account_link(&user_a()),
			Locator::xpath(r#"//XCUIElementTypeLink[@name="Test User A user.a@example.com"]"#)
		);
	}

	#[tokio::test]
	async fn continue_falls_back_to_localized_label() {
		let session = MockSession::new("s");
		session.set_element(LoginPage::CONTINUE_JA);

		LoginPage::new(&session).click_continue().await.unwrap();

		assert_eq!(
			session.actions().last(),
			Some(&MockAction::Click {
				locator: LoginPage::CONTINUE_JA
			})
		);
	}

	#[tokio::test]
	async fn continue_prefers_english_label() {
		let session = MockSession::new("s");
		session.set_element(LoginPage::CONTINUE);
		session.set_element(LoginPage::CONTINUE_JA);

		LoginPage::new(&session).click_continue().await.unwrap();

		assert!(!session.actions().contains(&MockAction::Find {
			locator: LoginPage::CONTINUE_JA
		}));
	}

	#[tokio::test]
	async fn continue_fails_when_neither_label_exists() {
		let session = MockSession::new("s");

		let err = LoginPage::new(&session).click_continue().await.unwrap_err();
		assert!(matches!(err, E2eError::Driver(ref e) if e.is_element_not_found()));
	}

	#[tokio::test]
	async fn missing_consent_dialog_is_not_an_error() {
		let session = MockSession::new("s");
		let accepted = LoginPage::new(&session).accept_sign_in_consent(Duration::ZERO).await.unwrap();
		assert!(!accepted);
	}

	#[tokio::test]
	async fn name_prompt_text_is_checked() {
		let session = MockSession::new("s");
		session.set_text(LoginPage::NAME_PROMPT, "What should we call you?");
		LoginPage::new(&session).expect_name_prompt().await.unwrap();

		session.set_text(LoginPage::NAME_PROMPT, "Welcome back");
		assert!(LoginPage::new(&session).expect_name_prompt().await.is_err());
	}
}
