//! Optional system alerts (sign-in consent, location permission).
//!
//! Two ways to deal with an alert that may or may not show up:
//! [`accept_alert_within`] polls until a deadline, [`accept_alert_if_present`]
//! looks exactly once. Neither treats "no alert" as an error.

use std::time::Duration;

use nose_driver::Session;
use tokio::time::Instant;
use tracing::debug;

use crate::error::Result;

/// Gap between presence checks while polling.
pub const ALERT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Waits up to `timeout` for an alert and accepts it.
///
/// Returns `true` if an alert was accepted. When none appears in time the
/// call returns `false` having only queried for presence.
pub async fn accept_alert_within(session: &dyn Session, timeout: Duration, poll_interval: Duration) -> Result<bool> {
	// `None` when the timeout is too large to represent: poll until an alert shows.
	let deadline = Instant::now().checked_add(timeout);
	loop {
		if let Some(alert) = session.try_active_alert().await? {
			debug!(target = "nose.alert", text = %alert.text, "accepting alert");
			session.accept_alert().await?;
			return Ok(true);
		}

		let wait = match deadline {
			Some(deadline) => {
				let now = Instant::now();
				if now >= deadline {
					debug!(target = "nose.alert", ?timeout, "no alert appeared");
					return Ok(false);
				}
				poll_interval.min(deadline - now)
			}
			None => poll_interval,
		};
		tokio::time::sleep(wait).await;
	}
}

/// Accepts an alert if one is showing right now.
pub async fn accept_alert_if_present(session: &dyn Session) -> Result<bool> {
	match session.try_active_alert().await? {
		Some(alert) => {
			debug!(target = "nose.alert", text = %alert.text, "accepting alert");
			session.accept_alert().await?;
			Ok(true)
		}
		None => {
			debug!(target = "nose.alert", "no alert to accept");
			Ok(false)
		}
	}
}

/// Dismisses an alert if one is showing right now.
pub async fn dismiss_alert_if_present(session: &dyn Session) -> Result<bool> {
	match session.try_active_alert().await? {
		Some(alert) => {
			debug!(target = "nose.alert", text = %alert.text, "dismissing alert");
			session.dismiss_alert().await?;
			Ok(true)
		}
		None => Ok(false),
	}
}

#[cfg(test)]
mod tests {
	use nose_driver::testing::{MockAction, MockSession};

	use super::*;

	const FAST: Duration = Duration::from_millis(5);

	#[tokio::test]
	async fn polling_accepts_alert_that_shows_up_late() {
		let session = MockSession::new("s");
		session.set_alert_after("Sign in with Google?", 3);

		let accepted = accept_alert_within(&session, Duration::from_secs(5), FAST).await.unwrap();

		assert!(accepted);
		assert!(!session.alert_open());
		let queries = session.actions().iter().filter(|a| **a == MockAction::AlertQuery).count();
		assert_eq!(queries, 4);
	}

	#[tokio::test]
	async fn polling_times_out_quietly_without_touching_state() {
		let session = MockSession::new("s");

		let accepted = accept_alert_within(&session, Duration::from_millis(30), FAST).await.unwrap();

		assert!(!accepted);
		assert!(session.actions().iter().all(|a| *a == MockAction::AlertQuery));
		assert!(!session.actions().is_empty());
	}

	#[tokio::test]
	async fn unbounded_timeout_still_polls() {
		let session = MockSession::new("s");
		session.set_alert_after("Allow location?", 2);

		let accepted = accept_alert_within(&session, Duration::from_secs(u64::MAX), FAST).await.unwrap();

		assert!(accepted);
		assert_eq!(session.actions().last(), Some(&MockAction::AcceptAlert));
	}

	#[tokio::test]
	async fn zero_timeout_checks_once() {
		let session = MockSession::new("s");

		assert!(!accept_alert_within(&session, Duration::ZERO, FAST).await.unwrap());
		assert_eq!(session.actions(), vec![MockAction::AlertQuery]);
	}

	#[tokio::test]
	async fn best_effort_accept_swallows_absence() {
		let session = MockSession::new("s");
		assert!(!accept_alert_if_present(&session).await.unwrap());

		session.set_alert("Allow location?");
		assert!(accept_alert_if_present(&session).await.unwrap());
		assert_eq!(session.actions().last(), Some(&MockAction::AcceptAlert));
	}

	#[tokio::test]
	async fn best_effort_dismiss() {
		let session = MockSession::new("s");
		session.set_alert("Allow location?");

		assert!(dismiss_alert_if_present(&session).await.unwrap());
		assert!(!dismiss_alert_if_present(&session).await.unwrap());
		assert!(session.actions().contains(&MockAction::DismissAlert));
	}
}
