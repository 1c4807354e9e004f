//! Element locators and their `{using, value}` wire form.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// How to find an element on screen.
///
/// Every page object selector is one of these variants; the session consumes
/// them through a single lookup path regardless of strategy. Selector
/// tables can be `const` via [`Locator::id`] and friends.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
	/// Stable accessibility identifier (or label) assigned by the app.
	AccessibilityId(Cow<'static, str>),
	/// Structural XPath query over the XCUITest element tree.
	XPath(Cow<'static, str>),
	/// Element type, e.g. `XCUIElementTypeTextField`.
	ClassName(Cow<'static, str>),
}

impl Locator {
	pub const fn id(id: &'static str) -> Self {
		Self::AccessibilityId(Cow::Borrowed(id))
	}

	pub const fn path(query: &'static str) -> Self {
		Self::XPath(Cow::Borrowed(query))
	}

	pub const fn class(name: &'static str) -> Self {
		Self::ClassName(Cow::Borrowed(name))
	}

	pub fn accessibility_id(id: impl Into<Cow<'static, str>>) -> Self {
		Self::AccessibilityId(id.into())
	}

	pub fn xpath(query: impl Into<Cow<'static, str>>) -> Self {
		Self::XPath(query.into())
	}

	pub fn class_name(name: impl Into<Cow<'static, str>>) -> Self {
		Self::ClassName(name.into())
	}

	/// Strategy name expected by the `using` field.
	pub fn strategy(&self) -> &'static str {
		match self {
			Self::AccessibilityId(_) => "accessibility id",
			Self::XPath(_) => "xpath",
			Self::ClassName(_) => "class name",
		}
	}

	pub fn value(&self) -> &str {
		match self {
			Self::AccessibilityId(v) | Self::XPath(v) | Self::ClassName(v) => &**v,
		}
	}

	/// Request body for `POST /element` and `POST /elements`.
	pub fn to_params(&self) -> FindElementParams<'_> {
		FindElementParams {
			using: self.strategy(),
			value: self.value(),
		}
	}
}

impl fmt::Display for Locator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {:?}", self.strategy(), self.value())
	}
}

/// Body of a find-element request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FindElementParams<'a> {
	pub using: &'static str,
	pub value: &'a str,
}

/// Owned variant used when decoding requests (test servers, logs).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FindElementRequest {
	pub using: String,
	pub value: String,
}

impl FindElementRequest {
	/// Maps a wire strategy back to a [`Locator`], if it is one we issue.
	pub fn into_locator(self) -> Option<Locator> {
		match self.using.as_str() {
			"accessibility id" => Some(Locator::accessibility_id(self.value)),
			"xpath" => Some(Locator::xpath(self.value)),
			"class name" => Some(Locator::class_name(self.value)),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn params_use_w3c_strategy_names() {
		let json = serde_json::to_value(Locator::accessibility_id("Search").to_params()).unwrap();
		assert_eq!(json, serde_json::json!({ "using": "accessibility id", "value": "Search" }));

		let json = serde_json::to_value(Locator::class_name("XCUIElementTypeTextField").to_params()).unwrap();
		assert_eq!(json["using"], "class name");
	}

	#[test]
	fn const_and_owned_constructors_compare_equal() {
		const SEARCH: Locator = Locator::id("Search");
		assert_eq!(SEARCH, Locator::accessibility_id(String::from("Search")));
		assert_ne!(SEARCH, Locator::path("Search"));
	}

	#[test]
	fn display_quotes_value() {
		let locator = Locator::xpath("//XCUIElementTypeCell[1]");
		assert_eq!(locator.to_string(), r#"xpath "//XCUIElementTypeCell[1]""#);
	}

	#[test]
	fn request_maps_back_to_locator() {
		let req: FindElementRequest = serde_json::from_str(r#"{"using":"xpath","value":"//a"}"#).unwrap();
		assert_eq!(req.into_locator(), Some(Locator::xpath("//a")));

		let req: FindElementRequest = serde_json::from_str(r#"{"using":"css selector","value":"a"}"#).unwrap();
		assert_eq!(req.into_locator(), None);
	}
}
