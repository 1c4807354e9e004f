//! Serial scenario runner.
//!
//! Owns one [`TestRun`] sized to the selected scenarios. Every scenario is
//! acquired, run and released in turn; a failing scenario is reported and
//! the run moves on, but a session that cannot be started ends the run.

use std::time::{Duration, Instant};

use colored::Colorize;
use nose_driver::SessionConnector;
use tracing::{error, info, warn};

use crate::config::SuiteConfig;
use crate::error::Result;
use crate::fixture::TestRun;
use crate::handoff::HandoffStore;
use crate::scenarios::{Scenario, ScenarioContext};

#[derive(Debug)]
pub struct Outcome {
	pub name: &'static str,
	/// `None` when the scenario passed.
	pub error: Option<String>,
	pub elapsed: Duration,
}

impl Outcome {
	pub fn passed(&self) -> bool {
		self.error.is_none()
	}
}

#[derive(Debug, Default)]
pub struct RunReport {
	pub outcomes: Vec<Outcome>,
}

impl RunReport {
	pub fn total(&self) -> usize {
		self.outcomes.len()
	}

	pub fn failed(&self) -> usize {
		self.outcomes.iter().filter(|o| !o.passed()).count()
	}
}

/// Runs `scenarios` in order on one shared session.
///
/// Returns the per-scenario report; scenario failures are inside it, not in
/// the `Err` branch. `Err` means the run itself could not proceed.
pub async fn run<C: SessionConnector>(
	scenarios: &[Box<dyn Scenario>],
	connector: C,
	config: &SuiteConfig,
) -> Result<RunReport> {
	let handoff = HandoffStore::new(&config.handoff_path);
	let mut fixture = TestRun::new(connector, scenarios.len());
	let mut report = RunReport::default();

	info!(target = "nose.runner", count = scenarios.len(), "starting run");
	for scenario in scenarios {
		let name = scenario.name();
		let started = Instant::now();

		let result = match fixture.acquire().await {
			Ok(session) => {
				let cx = ScenarioContext::new(session, &handoff, config);
				scenario.run(&cx).await
			}
			Err(err) => {
				error!(target = "nose.runner", scenario = name, error = %err, "cannot start session; aborting run");
				if let Err(finish_err) = fixture.finish().await {
					warn!(target = "nose.runner", error = %finish_err, "failed to close session");
				}
				return Err(err);
			}
		};

		if let Err(err) = fixture.release().await {
			warn!(target = "nose.runner", scenario = name, error = %err, "failed to end session");
		}

		let outcome = Outcome {
			name,
			error: result.err().map(|err| err.to_string()),
			elapsed: started.elapsed(),
		};
		print_outcome(&outcome);
		report.outcomes.push(outcome);
	}

	fixture.finish().await?;
	info!(
		target = "nose.runner",
		total = report.total(),
		failed = report.failed(),
		sessions = fixture.sessions_opened(),
		"run finished"
	);
	Ok(report)
}

fn print_outcome(outcome: &Outcome) {
	let elapsed = format!("({:.1}s)", outcome.elapsed.as_secs_f64());
	match &outcome.error {
		None => println!("{} {} {}", "PASS".green().bold(), outcome.name, elapsed.dimmed()),
		Some(err) => {
			println!("{} {} {}", "FAIL".red().bold(), outcome.name, elapsed.dimmed());
			println!("     {err}");
		}
	}
}

/// Prints the closing summary line.
pub fn print_summary(report: &RunReport) {
	let failed = report.failed();
	let passed = report.total() - failed;
	let line = format!("{passed} passed, {failed} failed");
	if failed == 0 {
		println!("\n{}", line.green().bold());
	} else {
		println!("\n{}", line.red().bold());
	}
}

#[cfg(test)]
mod tests {
	use async_trait::async_trait;
	use nose_driver::Locator;
	use nose_driver::testing::{MockAction, MockConnector, MockSession};
	use tempfile::TempDir;

	use super::*;
	use crate::error::E2eError;
	use crate::scenarios::test_support::fast_config;

	/// Looks up its own name on screen, then passes or fails as told.
	struct Scripted {
		name: &'static str,
		fail: bool,
	}

	#[async_trait]
	impl Scenario for Scripted {
		fn name(&self) -> &'static str {
			self.name
		}

		async fn run(&self, cx: &ScenarioContext<'_>) -> Result<()> {
			cx.session().find_elements(&Locator::id(self.name)).await?;
			if self.fail {
				return Err(E2eError::Assertion(format!("{} failed", self.name)));
			}
			Ok(())
		}
	}

	fn scripted(plan: &[(&'static str, bool)]) -> Vec<Box<dyn Scenario>> {
		plan.iter()
			.map(|&(name, fail)| Box::new(Scripted { name, fail }) as Box<dyn Scenario>)
			.collect()
	}

	#[tokio::test]
	async fn failing_scenario_still_releases_and_session_closes_once() {
		let tmp = TempDir::new().unwrap();
		let config = fast_config(&tmp);
		let connector = MockConnector::new(MockSession::new("shared"));
		let session = connector.session().clone();
		let scenarios = scripted(&[("a", false), ("b", true), ("c", false)]);

		let report = run(&scenarios, connector, &config).await.unwrap();

		assert_eq!(report.total(), 3);
		assert_eq!(report.failed(), 1);
		assert!(!report.outcomes[1].passed());
		assert!(report.outcomes[2].passed());
		assert_eq!(session.end_count(), 1);
		assert_eq!(session.actions().last(), Some(&MockAction::End));
	}

	#[tokio::test]
	async fn scenarios_run_in_given_order_on_one_session() {
		let tmp = TempDir::new().unwrap();
		let config = fast_config(&tmp);
		let connector = MockConnector::new(MockSession::new("shared"));
		let session = connector.session().clone();

		run(&scripted(&[("first", false), ("second", false)]), connector, &config)
			.await
			.unwrap();

		let looked_up: Vec<_> = session
			.actions()
			.into_iter()
			.filter_map(|a| match a {
				MockAction::FindAll { locator } => Some(locator),
				_ => None,
			})
			.collect();
		assert_eq!(looked_up, vec![Locator::id("first"), Locator::id("second")]);
	}

	#[tokio::test]
	async fn session_start_failure_aborts_the_run() {
		let tmp = TempDir::new().unwrap();
		let config = fast_config(&tmp);
		let connector = MockConnector::new(MockSession::new("shared"));
		connector.refuse_connections();
		let session = connector.session().clone();

		let err = run(&scripted(&[("a", false), ("b", false)]), connector, &config)
			.await
			.unwrap_err();

		assert!(err.is_fatal_for_run());
		assert!(session.actions().is_empty());
	}
}
