//! Remote automation session for the nose iOS app.
//!
//! [`Session`] is the seam between test code and the automation backend:
//! page objects and the test-run fixture only ever see `&dyn Session`.
//! [`WebDriverSession`] implements it against an Appium server over the W3C
//! WebDriver HTTP protocol.

pub mod error;
pub mod session;
pub mod webdriver;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{Error, Result};
pub use nose_protocol::{Capabilities, ElementRef, Locator, Point, keys};
pub use session::{Alert, Session, SessionConnector};
pub use webdriver::{WebDriverConfig, WebDriverConnector, WebDriverSession};
