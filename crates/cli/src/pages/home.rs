//! Map screen: place search, place details, bookmark lists, collections.

use nose_driver::{Locator, Point, Session};

use super::BasePage;
use super::alerts::{accept_alert_if_present, dismiss_alert_if_present};
use crate::error::Result;

/// Text typed into the place search bar.
pub const SEARCH_QUERY: &str = "Golden Gate Bridge";
/// Name given to the bookmark list created from the place sheet.
pub const BOOKMARK_LIST: &str = "trip to SF";
/// Shared collection that must not reach a blocked friend.
pub const SHARED_COLLECTION_NAME: &str = "National Parks";

pub struct HomePage<'s> {
	base: BasePage<'s>,
}

impl<'s> HomePage<'s> {
	pub const SEARCH_ICON: Locator = Locator::id("Search");
	pub const SEARCH_BAR: Locator = Locator::id("Search for a place");
	pub const FIRST_SUGGESTION: Locator =
		Locator::path("//XCUIElementTypeTable/XCUIElementTypeCell[1]/XCUIElementTypeOther[1]/XCUIElementTypeOther");

	pub const LOCATION_NAME: Locator = Locator::id("Golden Gate Bridge Vista Point");
	pub const ADDRESS: Locator = Locator::id(" Golden Gate Bridge Vista Point, San Francisco, CA 94129, USA");
	pub const PHONE_NUMBER: Locator = Locator::path(r#"(//XCUIElementTypeStaticText[@name=" N/A"])[1]"#);
	pub const WEBSITE: Locator = Locator::path(r#"//XCUIElementTypeButton[@name=" N/A"]"#);
	pub const RATING: Locator = Locator::path(r#"//XCUIElementTypeStaticText[@name=" 4.8"]"#);
	pub const OPENING_HOURS: Locator = Locator::path(r#"//XCUIElementTypeStaticText[@name="Opening Hours: N/A"]"#);
	pub const PHOTOS: Locator = Locator::path("//XCUIElementTypeCollectionView");

	pub const BOOKMARK_ICON: Locator = Locator::id("bookmark");
	pub const NO_BOOKMARK_LIST: Locator = Locator::id("No bookmark lists created yet.");
	pub const CREATE_BOOKMARK_LIST: Locator = Locator::path(r#"//XCUIElementTypeStaticText[@name="Create Bookmark List"]"#);
	pub const BOOKMARK_LIST_NAME: Locator = Locator::path(
		"//XCUIElementTypeCell/XCUIElementTypeOther/XCUIElementTypeOther/XCUIElementTypeOther/XCUIElementTypeOther[2]",
	);
	pub const CREATED_LIST_ROW: Locator = Locator::path("//XCUIElementTypeCell/XCUIElementTypeOther[1]/XCUIElementTypeOther");
	pub const ZERO_POIS_SAVED: Locator = Locator::id("0 POIs saved");
	pub const CREATED_LIST: Locator = Locator::id(BOOKMARK_LIST);
	pub const CHECK_MARK: Locator = Locator::id("checkmark");
	pub const CONFIRM: Locator = Locator::path(r#"//XCUIElementTypeStaticText[@name="Confirm"]"#);

	pub const MIDDLE_DOT: Locator = Locator::id("middle_dot");
	pub const RIGHT_DOT: Locator = Locator::id("right_dot");
	pub const SPARKLE: Locator = Locator::id("sparkle");
	pub const FROM_FRIENDS: Locator = Locator::id("From Friends");
	pub const SHARED_COLLECTION: Locator = Locator::id(SHARED_COLLECTION_NAME);
	pub const SHARED_FRIENDS_COUNT: Locator = Locator::id("shared_friends_count_label");
	pub const MORE: Locator = Locator::id("More");
	pub const SHARE_WITH_FRIENDS: Locator = Locator::id("Share with Friends");
	pub const CLOSE_SHARE_SHEET: Locator = Locator::id("close");

	/// Empty map area; tapping it collapses sheets.
	pub const MAP_POINT: Point = Point::new(100, 100);
	pub const SCREEN_CORNER: Point = Point::new(200, 200);
	pub const SHEET_HANDLE: Point = Point::new(300, 350);
	pub const SHEET_DISMISSED: Point = Point::new(300, 650);

	pub fn new(session: &'s dyn Session) -> Self {
		Self {
			base: BasePage::new(session),
		}
	}

	/// Declines the location-permission prompt if it is up.
	pub async fn dismiss_location_permission(&self) -> Result<bool> {
		dismiss_alert_if_present(self.base.session()).await
	}

	/// Grants the location-permission prompt if it is up.
	pub async fn allow_location_permission(&self) -> Result<bool> {
		accept_alert_if_present(self.base.session()).await
	}

	pub async fn click_search_icon(&self) -> Result<()> {
		self.base.click(&Self::SEARCH_ICON).await
	}

	pub async fn enter_search_text(&self) -> Result<()> {
		self.base.enter_text(&Self::SEARCH_BAR, SEARCH_QUERY).await
	}

	pub async fn click_first_suggestion(&self) -> Result<()> {
		self.base.click(&Self::FIRST_SUGGESTION).await
	}

	/// Every field of the place detail sheet is on screen.
	pub async fn verify_place_details(&self) -> Result<()> {
		for locator in [
			&Self::LOCATION_NAME,
			&Self::ADDRESS,
			&Self::PHONE_NUMBER,
			&Self::WEBSITE,
			&Self::RATING,
			&Self::OPENING_HOURS,
			&Self::PHOTOS,
		] {
			self.base.find(locator).await?;
		}
		Ok(())
	}

	pub async fn click_bookmark_icon(&self) -> Result<()> {
		self.base.click(&Self::BOOKMARK_ICON).await
	}

	pub async fn verify_no_bookmark_list(&self) -> Result<()> {
		self.base.find(&Self::NO_BOOKMARK_LIST).await.map(drop)
	}

	pub async fn click_create_bookmark_list(&self) -> Result<()> {
		self.base.click(&Self::CREATE_BOOKMARK_LIST).await
	}

	pub async fn enter_bookmark_list_name(&self) -> Result<()> {
		self.base.enter_text(&Self::BOOKMARK_LIST_NAME, BOOKMARK_LIST).await
	}

	/// The new list is shown, still empty.
	pub async fn verify_created_bookmark_list(&self) -> Result<()> {
		self.base.find(&Self::CREATED_LIST_ROW).await?;
		self.base.find(&Self::ZERO_POIS_SAVED).await?;
		Ok(())
	}

	pub async fn select_created_bookmark_list(&self) -> Result<()> {
		self.base.click(&Self::CREATED_LIST).await?;
		self.base.find(&Self::CHECK_MARK).await.map(drop)
	}

	pub async fn click_confirm(&self) -> Result<()> {
		self.base.click(&Self::CONFIRM).await
	}

	pub async fn tap_map(&self) -> Result<()> {
		self.base.tap(Self::MAP_POINT).await
	}

	pub async fn tap(&self, at: Point) -> Result<()> {
		self.base.tap(at).await
	}

	pub async fn click_middle_dot(&self) -> Result<()> {
		self.base.click(&Self::MIDDLE_DOT).await
	}

	/// Opens the collections tab (right dot, then the sparkle button).
	pub async fn open_collections(&self) -> Result<()> {
		self.base.click(&Self::RIGHT_DOT).await?;
		self.base.click(&Self::SPARKLE).await
	}

	pub async fn click_from_friends(&self) -> Result<()> {
		self.base.click(&Self::FROM_FRIENDS).await
	}

	pub async fn open_shared_collection(&self) -> Result<()> {
		self.base.click(&Self::SHARED_COLLECTION).await
	}

	pub async fn expect_shared_collection_absent(&self) -> Result<()> {
		self.base.expect_absent(&Self::SHARED_COLLECTION).await
	}

	pub async fn expect_shared_friends_count(&self, count: usize) -> Result<()> {
		self.base
			.expect_attribute(&Self::SHARED_FRIENDS_COUNT, "value", &count.to_string())
			.await
	}

	/// Opens More, then Share with Friends.
	pub async fn open_share_sheet(&self) -> Result<()> {
		self.base.click(&Self::MORE).await?;
		self.base.click(&Self::SHARE_WITH_FRIENDS).await
	}

	/// Nobody called `name` is offered on the share sheet.
	pub async fn expect_share_target_absent(&self, name: &str) -> Result<()> {
		self.base.expect_absent(&Locator::accessibility_id(name.to_string())).await
	}

	/// Closes the share sheet and drags the collection sheet down.
	pub async fn close_share_sheet(&self) -> Result<()> {
		self.base.click(&Self::CLOSE_SHARE_SHEET).await?;
		self.base.swipe(Self::SHEET_HANDLE, Self::SHEET_DISMISSED).await
	}
}

#[cfg(test)]
mod tests {
	use nose_driver::testing::{MockAction, MockSession};

	use super::*;

	#[tokio::test]
	async fn place_details_require_every_field() {
		let session = MockSession::new("s");
		for locator in [
			HomePage::LOCATION_NAME,
			HomePage::ADDRESS,
			HomePage::PHONE_NUMBER,
			HomePage::WEBSITE,
			HomePage::RATING,
			HomePage::OPENING_HOURS,
		] {
			session.set_element(locator);
		}
		let page = HomePage::new(&session);

		let err = page.verify_place_details().await.unwrap_err();
		assert!(err.to_string().contains("XCUIElementTypeCollectionView"), "{err}");

		session.set_element(HomePage::PHOTOS);
		page.verify_place_details().await.unwrap();
	}

	#[tokio::test]
	async fn location_prompt_is_optional() {
		let session = MockSession::new("s");
		let page = HomePage::new(&session);

		assert!(!page.dismiss_location_permission().await.unwrap());
		session.set_alert("Allow \"nose\" to use your location?");
		assert!(page.dismiss_location_permission().await.unwrap());
	}

	#[tokio::test]
	async fn shared_friends_count_reads_value_attribute() {
		let session = MockSession::new("s");
		session.set_attribute(HomePage::SHARED_FRIENDS_COUNT, "value", "1");
		let page = HomePage::new(&session);

		page.expect_shared_friends_count(1).await.unwrap();
		assert!(page.expect_shared_friends_count(2).await.is_err());
	}

	#[tokio::test]
	async fn closing_share_sheet_swipes_it_down() {
		let session = MockSession::new("s");
		session.set_element(HomePage::CLOSE_SHARE_SHEET);

		HomePage::new(&session).close_share_sheet().await.unwrap();

		assert_eq!(
			session.actions().last(),
			Some(&MockAction::Swipe {
				from: Point::new(300, 350),
				to: Point::new(300, 650)
			})
		);
	}
}
