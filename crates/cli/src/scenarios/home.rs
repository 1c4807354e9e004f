use async_trait::async_trait;

use super::{Scenario, ScenarioContext};
use crate::error::Result;
use crate::flows;

/// Search for a place, check its detail sheet and bookmark it into a new
/// list.
pub struct SearchAndBookmark;

#[async_trait]
impl Scenario for SearchAndBookmark {
	fn name(&self) -> &'static str {
		"02_home_search_bookmark"
	}

	fn description(&self) -> &'static str {
		"search Golden Gate Bridge, verify details, bookmark into a new list"
	}

	async fn run(&self, cx: &ScenarioContext<'_>) -> Result<()> {
		flows::google_login(cx, "user_a").await?;

		let home = cx.home_page();
		home.dismiss_location_permission().await?;
		cx.pause(1.0).await;
		home.click_search_icon().await?;
		cx.pause(1.0).await;
		home.enter_search_text().await?;
		cx.pause(1.0).await;
		home.click_first_suggestion().await?;
		cx.pause(3.0).await;
		home.verify_place_details().await?;

		home.click_bookmark_icon().await?;
		cx.pause(1.0).await;
		home.verify_no_bookmark_list().await?;
		home.click_create_bookmark_list().await?;
		cx.pause(1.0).await;
		home.enter_bookmark_list_name().await?;
		cx.pause(1.0).await;
		home.verify_created_bookmark_list().await?;
		home.select_created_bookmark_list().await?;
		home.click_confirm().await?;
		home.tap_map().await?;
		cx.pause(3.0).await;

		flows::logout(cx).await
	}
}
