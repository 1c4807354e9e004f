//! Wire types for the WebDriver protocol as spoken by an Appium server.
//!
//! Types in this crate are pure data: they describe request and response
//! bodies exactly as they travel over HTTP. Behavior lives in `nose-driver`.

pub mod actions;
pub mod capabilities;
pub mod locator;
pub mod types;

pub use actions::*;
pub use capabilities::*;
pub use locator::*;
pub use types::*;
