//! Personal Library and the settings screens behind it: account, friends,
//! blocking.

use nose_driver::{Locator, Session};
use tracing::info;

use super::BasePage;
use crate::error::{Result, ensure};

pub struct LibraryPage<'s> {
	base: BasePage<'s>,
}

impl<'s> LibraryPage<'s> {
	pub const PERSONAL_LIBRARY: Locator = Locator::id("Personal Library");
	pub const SETTINGS: Locator = Locator::id("Settings");
	pub const BACK: Locator = Locator::id("Back");

	pub const ACCOUNT: Locator = Locator::id("Account");
	pub const LOGOUT: Locator = Locator::id("Logout");
	pub const DELETE_ACCOUNT: Locator = Locator::id("Delete Account");
	pub const CONFIRM: Locator = Locator::id("Confirm");
	pub const DELETE: Locator = Locator::id("Delete");
	pub const OK: Locator = Locator::id("OK");

	pub const ADD_FRIEND: Locator = Locator::id("Add Friend");
	pub const COPY_USER_ID: Locator = Locator::id("copy");
	pub const SEARCH_BY_USER_ID: Locator = Locator::id("Search by User ID");
	pub const ADD_FRIEND_BUTTON: Locator = Locator::id("add_friend_button");

	pub const PRIVACY_POLICY: Locator = Locator::id("Privacy Policy");
	pub const TERMS_OF_SERVICE: Locator = Locator::id("Terms of Service");
	pub const APP_VERSION: Locator = Locator::id("App Version");
	pub const APP_VERSION_TEXT: Locator = Locator::id("app_version_text");

	pub const FRIEND_LIST: Locator = Locator::id("Friend List");
	pub const BLOCK_USER: Locator = Locator::id("Block User");
	pub const BLOCK: Locator = Locator::id("Block");
	pub const BLOCKED_TAB: Locator = Locator::id("Blocked");

	pub fn new(session: &'s dyn Session) -> Self {
		Self {
			base: BasePage::new(session),
		}
	}

	/// Row for a friend, labelled with their display name.
	pub fn friend(display_name: &str) -> Locator {
		Locator::accessibility_id(display_name.to_string())
	}

	pub async fn open(&self) -> Result<()> {
		self.base.click(&Self::PERSONAL_LIBRARY).await
	}

	/// Back from a settings sub-screen to Settings.
	pub async fn back_to_settings(&self) -> Result<()> {
		self.base.click(&Self::SETTINGS).await
	}

	/// Back from Settings to the map.
	pub async fn back_to_home(&self) -> Result<()> {
		self.base.click(&Self::BACK).await
	}

	pub async fn open_account(&self) -> Result<()> {
		self.base.click(&Self::ACCOUNT).await
	}

	pub async fn click_logout(&self) -> Result<()> {
		self.base.click(&Self::LOGOUT).await
	}

	pub async fn click_delete_account(&self) -> Result<()> {
		self.base.click(&Self::DELETE_ACCOUNT).await
	}

	pub async fn click_confirm(&self) -> Result<()> {
		self.base.click(&Self::CONFIRM).await
	}

	/// Final destructive confirmation of account deletion.
	pub async fn click_delete(&self) -> Result<()> {
		self.base.click(&Self::DELETE).await
	}

	pub async fn click_ok(&self) -> Result<()> {
		self.base.click(&Self::OK).await
	}

	/// Opens the privacy policy page; leave it with [`back_to_settings`](Self::back_to_settings).
	pub async fn open_privacy_policy(&self) -> Result<()> {
		self.base.click(&Self::PRIVACY_POLICY).await
	}

	pub async fn open_terms_of_service(&self) -> Result<()> {
		self.base.click(&Self::TERMS_OF_SERVICE).await
	}

	/// The App Version row and its value are both displayed.
	pub async fn expect_app_version(&self) -> Result<()> {
		self.base.expect_visible(&Self::APP_VERSION).await?;
		self.base.expect_visible(&Self::APP_VERSION_TEXT).await
	}

	pub async fn open_add_friend(&self) -> Result<()> {
		self.base.click(&Self::ADD_FRIEND).await
	}

	/// Taps the copy icon next to the signed-in user's id and returns what
	/// landed on the clipboard.
	pub async fn copy_user_id(&self) -> Result<String> {
		self.base.click(&Self::COPY_USER_ID).await?;
		let id = self.base.session().clipboard_text().await?;
		let id = id.trim().to_string();
		ensure(!id.is_empty(), || "clipboard is empty after copying the user id".to_string())?;
		info!(target = "nose.page", user_id = %id, "copied user id");
		Ok(id)
	}

	/// Looks up another user by id and submits the search.
	pub async fn search_user_id(&self, user_id: &str) -> Result<()> {
		self.base.click(&Self::SEARCH_BY_USER_ID).await?;
		self.base.enter_text(&Self::SEARCH_BY_USER_ID, user_id).await
	}

	/// Sends the friend request for the search result and acknowledges it.
	pub async fn add_found_friend(&self) -> Result<()> {
		self.base.click(&Self::ADD_FRIEND_BUTTON).await?;
		self.click_ok().await
	}

	pub async fn open_friend_list(&self) -> Result<()> {
		self.base.click(&Self::FRIEND_LIST).await
	}

	pub async fn select_friend(&self, display_name: &str) -> Result<()> {
		self.base.click(&Self::friend(display_name)).await
	}

	/// Blocks the friend whose profile is open.
	pub async fn block_selected_friend(&self) -> Result<()> {
		self.base.click(&Self::BLOCK_USER).await?;
		self.base.click(&Self::BLOCK).await
	}

	pub async fn open_blocked_tab(&self) -> Result<()> {
		self.base.click(&Self::BLOCKED_TAB).await
	}

	pub async fn expect_friend_listed(&self, display_name: &str) -> Result<()> {
		self.base.expect_visible(&Self::friend(display_name)).await
	}
}
