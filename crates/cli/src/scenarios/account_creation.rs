//! First sign-in of both test accounts; saves their user ids for later
//! scenarios.

use async_trait::async_trait;
use tracing::info;

use super::{Scenario, ScenarioContext};
use crate::error::Result;
use crate::flows;

/// Rejected by the name prompt: below the minimum length.
const NAME_TOO_SHORT: &str = "1";
/// Rejected by the name prompt: one over the 30 character limit.
const NAME_TOO_LONG: &str = "1234567890123456789012345678901";

pub struct CreateUserA;

#[async_trait]
impl Scenario for CreateUserA {
	fn name(&self) -> &'static str {
		"01_account_creation_a"
	}

	fn description(&self) -> &'static str {
		"sign up as user A, check name validation, save A's user id"
	}

	async fn run(&self, cx: &ScenarioContext<'_>) -> Result<()> {
		let user = cx.user("user_a")?;
		flows::google_login(cx, "user_a").await?;

		let login = cx.login_page();
		login.expect_name_prompt().await?;
		for rejected in [NAME_TOO_SHORT, NAME_TOO_LONG] {
			login.enter_display_name(rejected).await?;
			login.submit_display_name().await?;
			cx.pause(1.0).await;
			login.acknowledge_name_error().await?;
			cx.pause(1.0).await;
		}
		login.enter_display_name(&user.display_name).await?;
		login.submit_display_name().await?;
		cx.pause(5.0).await;
		flows::allow_location_if_asked(cx).await?;

		let library = cx.library_page();
		library.open().await?;
		cx.pause(1.0).await;
		library.open_add_friend().await?;
		cx.pause(1.0).await;
		let user_id = library.copy_user_id().await?;
		cx.handoff().save("user_a", &user_id)?;
		info!(target = "nose.scenario", user_id = %user_id, "saved user A id");

		library.back_to_settings().await?;
		cx.pause(1.0).await;
		library.back_to_home().await?;
		cx.pause(1.0).await;
		flows::logout(cx).await
	}
}

pub struct CreateUserB;

#[async_trait]
impl Scenario for CreateUserB {
	fn name(&self) -> &'static str {
		"01_account_creation_b"
	}

	fn description(&self) -> &'static str {
		"sign up as user B, befriend user A by id, save B's user id"
	}

	async fn run(&self, cx: &ScenarioContext<'_>) -> Result<()> {
		let user = cx.user("user_b")?;
		let user_a_id = cx.handoff().require("user_a")?;
		flows::google_login(cx, "user_b").await?;

		let login = cx.login_page();
		login.expect_name_prompt().await?;
		login.enter_display_name(&user.display_name).await?;
		login.submit_display_name().await?;
		cx.pause(5.0).await;
		flows::allow_location_if_asked(cx).await?;

		let library = cx.library_page();
		library.open().await?;
		cx.pause(1.0).await;
		library.open_add_friend().await?;
		cx.pause(1.0).await;
		library.search_user_id(&user_a_id).await?;
		cx.pause(1.0).await;
		library.add_found_friend().await?;
		cx.pause(1.0).await;

		let user_id = library.copy_user_id().await?;
		cx.handoff().save("user_b", &user_id)?;
		info!(target = "nose.scenario", user_id = %user_id, "saved user B id");

		library.back_to_settings().await?;
		cx.pause(1.0).await;
		library.back_to_home().await?;
		cx.pause(1.0).await;
		flows::logout(cx).await
	}
}
