//! Page objects: one type per screen, one method per user-visible action.
//!
//! Each page borrows the shared session and never owns it. Actions locate
//! one element through [`BasePage`] and perform one primitive on it; lookup
//! failures come straight from the session.

pub mod alerts;
pub mod home;
pub mod library;
pub mod login;

use nose_driver::{ElementRef, Locator, Point, Session, keys};
use tracing::debug;

use crate::error::{Result, ensure};

pub use home::HomePage;
pub use library::LibraryPage;
pub use login::LoginPage;

/// Duration used for drag gestures on modal sheets.
pub const SWIPE_MS: u64 = nose_driver::session::DEFAULT_SWIPE_MS;

/// Primitive element operations shared by every screen.
#[derive(Clone, Copy)]
pub struct BasePage<'s> {
	session: &'s dyn Session,
}

impl<'s> BasePage<'s> {
	pub fn new(session: &'s dyn Session) -> Self {
		Self { session }
	}

	pub fn session(&self) -> &'s dyn Session {
		self.session
	}

	pub async fn find(&self, locator: &Locator) -> Result<ElementRef> {
		Ok(self.session.find_element(locator).await?)
	}

	pub async fn find_all(&self, locator: &Locator) -> Result<Vec<ElementRef>> {
		Ok(self.session.find_elements(locator).await?)
	}

	pub async fn click(&self, locator: &Locator) -> Result<()> {
		debug!(target = "nose.page", %locator, "click");
		let element = self.find(locator).await?;
		self.session.click(&element).await?;
		Ok(())
	}

	/// Types `text` without submitting.
	pub async fn type_text(&self, locator: &Locator, text: &str) -> Result<()> {
		let element = self.find(locator).await?;
		self.session.send_keys(&element, text).await?;
		Ok(())
	}

	/// Focuses the field, empties it and types `text`.
	pub async fn replace_text(&self, locator: &Locator, text: &str) -> Result<()> {
		let element = self.find(locator).await?;
		self.session.click(&element).await?;
		self.session.clear(&element).await?;
		self.session.send_keys(&element, text).await?;
		Ok(())
	}

	/// Types `text`, then presses RETURN on a freshly located field.
	pub async fn enter_text(&self, locator: &Locator, text: &str) -> Result<()> {
		debug!(target = "nose.page", %locator, "enter text");
		self.type_text(locator, text).await?;
		self.type_text(locator, keys::RETURN).await
	}

	pub async fn text(&self, locator: &Locator) -> Result<String> {
		let element = self.find(locator).await?;
		Ok(self.session.text(&element).await?)
	}

	pub async fn attribute(&self, locator: &Locator, name: &str) -> Result<Option<String>> {
		let element = self.find(locator).await?;
		Ok(self.session.attribute(&element, name).await?)
	}

	/// The element exists and is displayed.
	pub async fn expect_visible(&self, locator: &Locator) -> Result<()> {
		let element = self.find(locator).await?;
		let displayed = self.session.is_displayed(&element).await?;
		ensure(displayed, || format!("{locator} is present but not displayed"))
	}

	/// No element matches.
	pub async fn expect_absent(&self, locator: &Locator) -> Result<()> {
		let found = self.find_all(locator).await?;
		ensure(found.is_empty(), || {
			format!("{locator} was found {} time(s) when it should not exist", found.len())
		})
	}

	pub async fn expect_attribute(&self, locator: &Locator, name: &str, expected: &str) -> Result<()> {
		let actual = self.attribute(locator, name).await?;
		ensure(actual.as_deref() == Some(expected), || {
			format!("{locator} attribute `{name}` is {actual:?}, expected {expected:?}")
		})
	}

	pub async fn tap(&self, at: Point) -> Result<()> {
		Ok(self.session.tap(at).await?)
	}

	pub async fn swipe(&self, from: Point, to: Point) -> Result<()> {
		Ok(self.session.swipe(from, to, SWIPE_MS).await?)
	}
}
