//! In-memory session doubles for testing code that drives a [`Session`].
//!
//! [`MockSession`] keeps a scripted "screen": which locators match how many
//! elements, their text and attributes, the clipboard, and whether an alert
//! is up. Every call is recorded as a [`MockAction`] for later assertions.
//! Clones share state, so a test can hand one clone to the code under test
//! and inspect another.
//!
//! ```ignore
//! let session = MockSession::new("s1");
//! session.set_element(Locator::accessibility_id("Search"));
//! session.set_alert_after("Allow location?", 2);
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use nose_protocol::{ElementRef, Locator, Point};
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::session::{Alert, Session, SessionConnector};

/// Call recorded by [`MockSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockAction {
	Find { locator: Locator },
	FindAll { locator: Locator },
	Click { locator: Locator },
	Clear { locator: Locator },
	SendKeys { locator: Locator, text: String },
	Text { locator: Locator },
	Attribute { locator: Locator, name: String },
	Displayed { locator: Locator },
	AlertQuery,
	AcceptAlert,
	DismissAlert,
	Tap { at: Point },
	Swipe { from: Point, to: Point },
	Clipboard,
	End,
}

#[derive(Default)]
struct MockState {
	counts: HashMap<Locator, usize>,
	texts: HashMap<Locator, String>,
	attributes: HashMap<(Locator, String), String>,
	hidden: Vec<Locator>,
	/// Locators behind every handed-out [`ElementRef`], indexed by id.
	resolved: Vec<Locator>,
	alert: Option<String>,
	/// Presence queries left before `alert` becomes visible.
	alert_delay: usize,
	clipboard: String,
	actions: Vec<MockAction>,
}

/// Scripted [`Session`] double.
#[derive(Clone)]
pub struct MockSession {
	id: Arc<str>,
	state: Arc<Mutex<MockState>>,
	closed: Arc<AtomicBool>,
}

impl MockSession {
	pub fn new(id: &str) -> Self {
		Self {
			id: Arc::from(id),
			state: Arc::new(Mutex::new(MockState::default())),
			closed: Arc::new(AtomicBool::new(false)),
		}
	}

	/// Makes `locator` match exactly one visible element.
	pub fn set_element(&self, locator: Locator) {
		self.set_count(locator, 1);
	}

	pub fn set_count(&self, locator: Locator, count: usize) {
		self.state.lock().counts.insert(locator, count);
	}

	pub fn remove_element(&self, locator: &Locator) {
		self.state.lock().counts.remove(locator);
	}

	/// Sets element text (also makes the locator match one element if unset).
	pub fn set_text(&self, locator: Locator, text: &str) {
		let mut state = self.state.lock();
		state.counts.entry(locator.clone()).or_insert(1);
		state.texts.insert(locator, text.to_string());
	}

	pub fn set_attribute(&self, locator: Locator, name: &str, value: &str) {
		let mut state = self.state.lock();
		state.counts.entry(locator.clone()).or_insert(1);
		state.attributes.insert((locator, name.to_string()), value.to_string());
	}

	/// Marks a matching element as present but not displayed.
	pub fn set_hidden(&self, locator: Locator) {
		let mut state = self.state.lock();
		state.counts.entry(locator.clone()).or_insert(1);
		state.hidden.push(locator);
	}

	/// Shows an alert immediately.
	pub fn set_alert(&self, text: &str) {
		self.set_alert_after(text, 0);
	}

	/// Shows an alert once `polls` presence queries have come back empty.
	pub fn set_alert_after(&self, text: &str, polls: usize) {
		let mut state = self.state.lock();
		state.alert = Some(text.to_string());
		state.alert_delay = polls;
	}

	pub fn alert_open(&self) -> bool {
		let state = self.state.lock();
		state.alert.is_some() && state.alert_delay == 0
	}

	pub fn set_clipboard(&self, text: &str) {
		self.state.lock().clipboard = text.to_string();
	}

	pub fn actions(&self) -> Vec<MockAction> {
		self.state.lock().actions.clone()
	}

	pub fn clear_actions(&self) {
		self.state.lock().actions.clear();
	}

	/// Number of [`MockAction::End`] calls that reached the session.
	pub fn end_count(&self) -> usize {
		self.state.lock().actions.iter().filter(|a| matches!(a, MockAction::End)).count()
	}

	pub fn is_closed(&self) -> bool {
		self.closed.load(Ordering::SeqCst)
	}

	fn reopen(&self) {
		self.closed.store(false, Ordering::SeqCst);
	}

	fn check_open(&self) -> Result<()> {
		if self.is_closed() {
			return Err(Error::SessionClosed(self.id.to_string()));
		}
		Ok(())
	}

	fn record(&self, action: MockAction) {
		self.state.lock().actions.push(action);
	}

	fn locator_of(&self, element: &ElementRef) -> Result<Locator> {
		let state = self.state.lock();
		element
			.id
			.parse::<usize>()
			.ok()
			.and_then(|idx| state.resolved.get(idx).cloned())
			.ok_or_else(|| Error::Remote {
				error: "stale element reference".to_string(),
				message: format!("unknown element {}", element.id),
			})
	}

	fn resolve(&self, locator: &Locator) -> ElementRef {
		let mut state = self.state.lock();
		state.resolved.push(locator.clone());
		ElementRef::new((state.resolved.len() - 1).to_string())
	}

	fn count(&self, locator: &Locator) -> usize {
		self.state.lock().counts.get(locator).copied().unwrap_or(0)
	}

	fn pending_alert(&self) -> Result<()> {
		if self.alert_open() {
			Ok(())
		} else {
			Err(Error::NoSuchAlert)
		}
	}
}

#[async_trait]
impl Session for MockSession {
	fn id(&self) -> &str {
		&self.id
	}

	async fn find_element(&self, locator: &Locator) -> Result<ElementRef> {
		self.check_open()?;
		self.record(MockAction::Find {
			locator: locator.clone(),
		});
		if self.count(locator) == 0 {
			return Err(Error::ElementNotFound {
				locator: locator.to_string(),
			});
		}
		Ok(self.resolve(locator))
	}

	async fn find_elements(&self, locator: &Locator) -> Result<Vec<ElementRef>> {
		self.check_open()?;
		self.record(MockAction::FindAll {
			locator: locator.clone(),
		});
		Ok((0..self.count(locator)).map(|_| self.resolve(locator)).collect())
	}

	async fn click(&self, element: &ElementRef) -> Result<()> {
		self.check_open()?;
		let locator = self.locator_of(element)?;
		self.record(MockAction::Click { locator });
		Ok(())
	}

	async fn clear(&self, element: &ElementRef) -> Result<()> {
		self.check_open()?;
		let locator = self.locator_of(element)?;
		self.record(MockAction::Clear { locator });
		Ok(())
	}

	async fn send_keys(&self, element: &ElementRef, text: &str) -> Result<()> {
		self.check_open()?;
		let locator = self.locator_of(element)?;
		self.record(MockAction::SendKeys {
			locator,
			text: text.to_string(),
		});
		Ok(())
	}

	async fn text(&self, element: &ElementRef) -> Result<String> {
		self.check_open()?;
		let locator = self.locator_of(element)?;
		self.record(MockAction::Text {
			locator: locator.clone(),
		});
		Ok(self.state.lock().texts.get(&locator).cloned().unwrap_or_default())
	}

	async fn attribute(&self, element: &ElementRef, name: &str) -> Result<Option<String>> {
		self.check_open()?;
		let locator = self.locator_of(element)?;
		self.record(MockAction::Attribute {
			locator: locator.clone(),
			name: name.to_string(),
		});
		Ok(self.state.lock().attributes.get(&(locator, name.to_string())).cloned())
	}

	async fn is_displayed(&self, element: &ElementRef) -> Result<bool> {
		self.check_open()?;
		let locator = self.locator_of(element)?;
		self.record(MockAction::Displayed {
			locator: locator.clone(),
		});
		Ok(!self.state.lock().hidden.contains(&locator))
	}

	async fn try_active_alert(&self) -> Result<Option<Alert>> {
		self.check_open()?;
		self.record(MockAction::AlertQuery);
		let mut state = self.state.lock();
		match state.alert.clone() {
			Some(text) if state.alert_delay == 0 => Ok(Some(Alert { text })),
			Some(_) => {
				state.alert_delay -= 1;
				Ok(None)
			}
			None => Ok(None),
		}
	}

	async fn accept_alert(&self) -> Result<()> {
		self.check_open()?;
		self.pending_alert()?;
		self.record(MockAction::AcceptAlert);
		self.state.lock().alert = None;
		Ok(())
	}

	async fn dismiss_alert(&self) -> Result<()> {
		self.check_open()?;
		self.pending_alert()?;
		self.record(MockAction::DismissAlert);
		self.state.lock().alert = None;
		Ok(())
	}

	async fn tap(&self, at: Point) -> Result<()> {
		self.check_open()?;
		self.record(MockAction::Tap { at });
		Ok(())
	}

	async fn swipe(&self, from: Point, to: Point, _duration_ms: u64) -> Result<()> {
		self.check_open()?;
		self.record(MockAction::Swipe { from, to });
		Ok(())
	}

	async fn clipboard_text(&self) -> Result<String> {
		self.check_open()?;
		self.record(MockAction::Clipboard);
		Ok(self.state.lock().clipboard.clone())
	}

	async fn end(&self) -> Result<()> {
		self.check_open()?;
		self.record(MockAction::End);
		self.closed.store(true, Ordering::SeqCst);
		Ok(())
	}
}

/// Connector handing out clones of one [`MockSession`].
pub struct MockConnector {
	session: MockSession,
	connects: AtomicUsize,
	refuse: AtomicBool,
}

impl MockConnector {
	pub fn new(session: MockSession) -> Self {
		Self {
			session,
			connects: AtomicUsize::new(0),
			refuse: AtomicBool::new(false),
		}
	}

	/// Makes every later `connect` fail like an unreachable server.
	pub fn refuse_connections(&self) {
		self.refuse.store(true, Ordering::SeqCst);
	}

	pub fn connect_count(&self) -> usize {
		self.connects.load(Ordering::SeqCst)
	}

	pub fn session(&self) -> &MockSession {
		&self.session
	}
}

#[async_trait]
impl SessionConnector for MockConnector {
	fn endpoint(&self) -> &str {
		"mock://device"
	}

	async fn connect(&self) -> Result<Box<dyn Session>> {
		if self.refuse.load(Ordering::SeqCst) {
			return Err(Error::SessionStart {
				endpoint: self.endpoint().to_string(),
				reason: "connection refused".to_string(),
			});
		}
		self.connects.fetch_add(1, Ordering::SeqCst);
		self.session.reopen();
		Ok(Box::new(self.session.clone()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn alert_appears_after_configured_polls() {
		let session = MockSession::new("s");
		session.set_alert_after("Allow?", 2);

		assert_eq!(session.try_active_alert().await.unwrap(), None);
		assert_eq!(session.try_active_alert().await.unwrap(), None);
		assert_eq!(
			session.try_active_alert().await.unwrap(),
			Some(Alert {
				text: "Allow?".to_string()
			})
		);
	}

	#[tokio::test]
	async fn clicks_record_the_originating_locator() {
		let session = MockSession::new("s");
		let search = Locator::accessibility_id("Search");
		session.set_element(search.clone());

		let element = session.find_element(&search).await.unwrap();
		session.click(&element).await.unwrap();

		assert_eq!(
			session.actions(),
			vec![
				MockAction::Find { locator: search.clone() },
				MockAction::Click { locator: search },
			]
		);
	}

	#[tokio::test]
	async fn ended_session_rejects_calls() {
		let session = MockSession::new("s");
		session.end().await.unwrap();
		assert!(matches!(session.clipboard_text().await, Err(Error::SessionClosed(_))));
	}
}
