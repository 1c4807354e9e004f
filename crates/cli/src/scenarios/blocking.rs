//! Blocking a friend hides shared collections both ways; adding the friend
//! back by id restores the friendship.

use async_trait::async_trait;

use super::{Scenario, ScenarioContext};
use crate::error::Result;
use crate::flows;
use crate::pages::HomePage;

/// User B blocks user A and no longer sees A's shared collection.
pub struct BlockFriend;

#[async_trait]
impl Scenario for BlockFriend {
	fn name(&self) -> &'static str {
		"11_blocking_user_01_block"
	}

	fn description(&self) -> &'static str {
		"user B blocks user A; A's shared collection disappears for B"
	}

	async fn run(&self, cx: &ScenarioContext<'_>) -> Result<()> {
		let friend = &cx.user("user_a")?.display_name;
		flows::google_login(cx, "user_b").await?;
		flows::allow_location_if_asked(cx).await?;

		let library = cx.library_page();
		library.open().await?;
		cx.pause(2.0).await;
		library.open_friend_list().await?;
		cx.pause(2.0).await;
		library.select_friend(friend).await?;
		cx.pause(2.0).await;
		library.block_selected_friend().await?;
		cx.pause(2.0).await;

		library.open_blocked_tab().await?;
		cx.pause(2.0).await;
		library.expect_friend_listed(friend).await?;

		library.back_to_settings().await?;
		cx.pause(2.0).await;
		library.back_to_home().await?;
		cx.pause(2.0).await;

		let home = cx.home_page();
		home.open_collections().await?;
		cx.pause(2.0).await;
		home.click_from_friends().await?;
		cx.pause(2.0).await;
		home.expect_shared_collection_absent().await?;
		home.tap(HomePage::SCREEN_CORNER).await?;
		cx.pause(2.0).await;

		flows::logout(cx).await
	}
}

/// User A still owns the collection but can no longer share it with B.
pub struct BlockedOwnerView;

#[async_trait]
impl Scenario for BlockedOwnerView {
	fn name(&self) -> &'static str {
		"11_blocking_user_02_owner_view"
	}

	fn description(&self) -> &'static str {
		"user A's collection keeps one share, and B is not offered as a target"
	}

	async fn run(&self, cx: &ScenarioContext<'_>) -> Result<()> {
		let blocked = &cx.user("user_b")?.display_name;
		flows::google_login(cx, "user_a").await?;
		flows::allow_location_if_asked(cx).await?;

		let home = cx.home_page();
		home.open_collections().await?;
		cx.pause(2.0).await;
		home.open_shared_collection().await?;
		cx.pause(2.0).await;
		home.expect_shared_friends_count(1).await?;
		home.open_share_sheet().await?;
		cx.pause(2.0).await;
		home.expect_share_target_absent(blocked).await?;
		home.close_share_sheet().await?;
		cx.pause(2.0).await;
		home.tap(HomePage::SCREEN_CORNER).await?;
		cx.pause(2.0).await;

		flows::logout(cx).await
	}
}

/// User A sends a new friend request to B using B's saved id.
pub struct AddBlockedFriendBack;

#[async_trait]
impl Scenario for AddBlockedFriendBack {
	fn name(&self) -> &'static str {
		"11_blocking_user_03_add_back"
	}

	fn description(&self) -> &'static str {
		"user A adds user B again by the id saved at sign-up"
	}

	async fn run(&self, cx: &ScenarioContext<'_>) -> Result<()> {
		let user_b_id = cx.handoff().require("user_b")?;
		flows::google_login(cx, "user_a").await?;
		flows::allow_location_if_asked(cx).await?;

		let library = cx.library_page();
		library.open().await?;
		cx.pause(1.0).await;
		library.open_add_friend().await?;
		cx.pause(1.0).await;
		library.search_user_id(&user_b_id).await?;
		cx.pause(1.0).await;
		library.add_found_friend().await?;
		cx.pause(1.0).await;
		library.back_to_settings().await?;
		cx.pause(1.0).await;
		library.back_to_home().await?;
		cx.pause(1.0).await;

		flows::logout(cx).await
	}
}
