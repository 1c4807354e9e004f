//! Shared remote session for a whole test run.
//!
//! [`TestRun`] is created once by the runner and passed to every scenario's
//! setup and teardown. The first [`acquire`](TestRun::acquire) opens the
//! session; each [`release`](TestRun::release) counts one finished case; the
//! release that reaches the expected total ends the session. The expected
//! total is configuration handed in by the runner, never inferred from the
//! cases themselves.

use nose_driver::{Session, SessionConnector};
use tracing::{debug, info, warn};

use crate::error::Result;

pub struct TestRun<C> {
	connector: C,
	expected: usize,
	completed: usize,
	session: Option<Box<dyn Session>>,
	opened: usize,
}

impl<C: SessionConnector> TestRun<C> {
	/// `expected_cases` is the number of cases that will call
	/// [`release`](Self::release) in this run.
	pub fn new(connector: C, expected_cases: usize) -> Self {
		Self {
			connector,
			expected: expected_cases,
			completed: 0,
			session: None,
			opened: 0,
		}
	}

	/// Returns the live session, connecting on first use.
	///
	/// A connection failure is returned as-is and never retried.
	pub async fn acquire(&mut self) -> Result<&dyn Session> {
		let session = match self.session.take() {
			Some(session) => session,
			None => {
				info!(
					target = "nose.fixture",
					endpoint = self.connector.endpoint(),
					expected = self.expected,
					"opening shared session"
				);
				let session = self.connector.connect().await?;
				self.opened += 1;
				self.completed = 0;
				session
			}
		};
		Ok(&**self.session.insert(session))
	}

	/// Records one finished case. Ends the session when this was the last one.
	///
	/// Returns `true` when this call closed the session. Without a live
	/// session this is a no-op returning `false`.
	pub async fn release(&mut self) -> Result<bool> {
		if self.session.is_none() {
			debug!(target = "nose.fixture", "release without a live session; ignoring");
			return Ok(false);
		}

		self.completed += 1;
		debug!(
			target = "nose.fixture",
			completed = self.completed,
			expected = self.expected,
			"case finished"
		);
		if self.completed < self.expected {
			return Ok(false);
		}

		self.close().await?;
		Ok(true)
	}

	/// Ends a still-open session, e.g. when the runner stops early.
	pub async fn finish(&mut self) -> Result<()> {
		if self.session.is_some() {
			warn!(
				target = "nose.fixture",
				completed = self.completed,
				expected = self.expected,
				"closing session before all cases finished"
			);
		}
		self.close().await
	}

	/// The handle is cleared before the remote call, so even a failed end
	/// leaves the fixture ready for a fresh session.
	async fn close(&mut self) -> Result<()> {
		let Some(session) = self.session.take() else {
			return Ok(());
		};
		self.completed = 0;
		info!(target = "nose.fixture", session_id = session.id(), "closing shared session");
		session.end().await?;
		Ok(())
	}

	pub fn is_active(&self) -> bool {
		self.session.is_some()
	}

	pub fn expected(&self) -> usize {
		self.expected
	}

	pub fn completed(&self) -> usize {
		self.completed
	}

	/// Sessions opened over the lifetime of this fixture.
	pub fn sessions_opened(&self) -> usize {
		self.opened
	}

	pub fn connector(&self) -> &C {
		&self.connector
	}
}

#[cfg(test)]
mod tests {
	use nose_driver::testing::{MockConnector, MockSession};

	use super::*;
	use crate::error::E2eError;

	fn run_of(expected: usize) -> TestRun<MockConnector> {
		TestRun::new(MockConnector::new(MockSession::new("shared")), expected)
	}

	#[tokio::test]
	async fn one_session_for_all_cases_closed_after_last() {
		let mut run = run_of(3);

		for case in 1..=3 {
			let id = run.acquire().await.unwrap().id().to_string();
			assert_eq!(id, "shared");
			let closed = run.release().await.unwrap();
			assert_eq!(closed, case == 3, "case {case}");
			assert_eq!(run.connector().session().end_count(), usize::from(case == 3));
		}

		assert_eq!(run.connector().connect_count(), 1);
		assert_eq!(run.connector().session().end_count(), 1);
		assert!(!run.is_active());
	}

	#[tokio::test]
	async fn release_without_acquire_is_a_noop() {
		let mut run = run_of(1);

		assert!(!run.release().await.unwrap());
		assert_eq!(run.completed(), 0);
		assert_eq!(run.connector().connect_count(), 0);
	}

	#[tokio::test]
	async fn extra_release_after_close_does_not_close_twice() {
		let mut run = run_of(1);
		run.acquire().await.unwrap();

		assert!(run.release().await.unwrap());
		assert!(!run.release().await.unwrap());
		assert_eq!(run.connector().session().end_count(), 1);
	}

	#[tokio::test]
	async fn acquire_after_close_starts_fresh() {
		let mut run = run_of(1);
		run.acquire().await.unwrap();
		run.release().await.unwrap();

		run.acquire().await.unwrap();
		assert_eq!(run.connector().connect_count(), 2);
		assert_eq!(run.completed(), 0);
		assert_eq!(run.sessions_opened(), 2);
	}

	#[tokio::test]
	async fn connection_failure_is_returned_without_retry() {
		let mut run = run_of(2);
		run.connector().refuse_connections();

		let err = run.acquire().await.err().unwrap();
		assert!(err.is_fatal_for_run());
		assert!(matches!(err, E2eError::Driver(nose_driver::Error::SessionStart { .. })));
		assert_eq!(run.connector().connect_count(), 0);
		assert!(!run.is_active());
	}

	#[tokio::test]
	async fn finish_closes_early_and_is_idempotent() {
		let mut run = run_of(5);
		run.acquire().await.unwrap();
		run.release().await.unwrap();

		run.finish().await.unwrap();
		run.finish().await.unwrap();
		assert_eq!(run.connector().session().end_count(), 1);
		assert!(run.connector().session().is_closed());
	}
}
