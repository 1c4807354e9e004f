use async_trait::async_trait;

use super::{Scenario, ScenarioContext};
use crate::error::Result;
use crate::flows;

/// Walks the About items in Settings, then deletes user A's account.
///
/// Destructive: every later run has to sign up user A again, so this sorts
/// last.
pub struct DeleteAccount;

#[async_trait]
impl Scenario for DeleteAccount {
	fn name(&self) -> &'static str {
		"99_delete_account"
	}

	fn description(&self) -> &'static str {
		"check settings items, delete user A, land on the launch screen"
	}

	async fn run(&self, cx: &ScenarioContext<'_>) -> Result<()> {
		flows::google_login(cx, "user_a").await?;
		flows::allow_location_if_asked(cx).await?;

		let library = cx.library_page();
		library.open().await?;
		cx.pause(2.0).await;

		library.open_privacy_policy().await?;
		cx.pause(5.0).await;
		library.back_to_settings().await?;
		cx.pause(2.0).await;
		library.open_terms_of_service().await?;
		cx.pause(5.0).await;
		library.back_to_settings().await?;
		cx.pause(2.0).await;
		library.expect_app_version().await?;

		library.open_account().await?;
		cx.pause(2.0).await;
		library.click_delete_account().await?;
		library.click_confirm().await?;
		cx.pause(2.0).await;
		library.click_delete().await?;
		cx.pause(2.0).await;

		cx.login_page().expect_launch_screen().await
	}
}

#[cfg(test)]
mod tests {
	use nose_driver::testing::{MockAction, MockSession};
	use tempfile::TempDir;

	use super::*;
	use crate::error::E2eError;
	use crate::handoff::HandoffStore;
	use crate::pages::{LibraryPage, LoginPage};
	use crate::scenarios::test_support::{fast_config, show, show_login_and_logout};

	fn show_settings(session: &MockSession) {
		show(
			session,
			[
				LibraryPage::PRIVACY_POLICY,
				LibraryPage::TERMS_OF_SERVICE,
				LibraryPage::SETTINGS,
				LibraryPage::APP_VERSION,
				LibraryPage::APP_VERSION_TEXT,
				LibraryPage::DELETE_ACCOUNT,
				LibraryPage::DELETE,
			],
		);
	}

	#[tokio::test]
	async fn deletion_returns_to_launch_screen() {
		let tmp = TempDir::new().unwrap();
		let config = fast_config(&tmp);
		let store = HandoffStore::new(&config.handoff_path);
		let session = MockSession::new("s");
		show_login_and_logout(&session, config.user("user_a").unwrap());
		show_settings(&session);

		DeleteAccount.run(&ScenarioContext::new(&session, &store, &config)).await.unwrap();

		let actions = session.actions();
		let deleted = actions
			.iter()
			.position(|a| *a == MockAction::Click { locator: LibraryPage::DELETE })
			.unwrap();
		assert_eq!(
			actions[deleted + 1..],
			[
				MockAction::Find {
					locator: LoginPage::CONTINUE_WITH_GOOGLE
				},
				MockAction::Displayed {
					locator: LoginPage::CONTINUE_WITH_GOOGLE
				},
			]
		);
	}

	#[tokio::test]
	async fn hidden_launch_button_fails_the_check() {
		let tmp = TempDir::new().unwrap();
		let config = fast_config(&tmp);
		let store = HandoffStore::new(&config.handoff_path);
		let session = MockSession::new("s");
		show_login_and_logout(&session, config.user("user_a").unwrap());
		show_settings(&session);
		session.set_hidden(LoginPage::CONTINUE_WITH_GOOGLE);

		let err = DeleteAccount
			.run(&ScenarioContext::new(&session, &store, &config))
			.await
			.unwrap_err();
		assert!(matches!(err, E2eError::Assertion(_)));
	}
}
