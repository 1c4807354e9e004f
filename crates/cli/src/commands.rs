//! Subcommand implementations.

use colored::Colorize;
use nose_driver::WebDriverConnector;
use tracing::debug;

use crate::cli::{Cli, Commands, HandoffAction};
use crate::config::SuiteConfig;
use crate::error::{E2eError, Result};
use crate::handoff::HandoffStore;
use crate::{runner, scenarios};

pub async fn dispatch(cli: Cli) -> Result<()> {
	let mut config = SuiteConfig::load(cli.config.as_deref())?;
	config.apply_overrides(cli.overrides());
	config.validate()?;
	debug!(target = "nose.cli", server = %config.server_url, handoff = %config.handoff_path.display(), "configuration ready");

	match cli.command {
		Commands::Run { filter } => run(&config, filter.as_deref()).await,
		Commands::List => {
			list();
			Ok(())
		}
		Commands::Handoff { action } => handoff(&HandoffStore::new(&config.handoff_path), action),
	}
}

async fn run(config: &SuiteConfig, filter: Option<&str>) -> Result<()> {
	let selected = scenarios::select(filter)?;
	let connector = WebDriverConnector::new(config.webdriver());

	let report = runner::run(&selected, connector, config).await?;
	runner::print_summary(&report);

	match report.failed() {
		0 => Ok(()),
		failed => Err(E2eError::RunFailed {
			failed,
			total: report.total(),
		}),
	}
}

fn list() {
	for scenario in scenarios::all() {
		println!("  {} {}", scenario.name().cyan().bold(), scenario.description().dimmed());
	}
}

fn handoff(store: &HandoffStore, action: HandoffAction) -> Result<()> {
	match action {
		HandoffAction::Get { key } => {
			println!("{}", store.require(&key)?);
		}
		HandoffAction::Set { key, value } => {
			store.save(&key, &value)?;
		}
		HandoffAction::List => {
			for (key, value) in store.entries()? {
				println!("{key}\t{value}");
			}
		}
		HandoffAction::Remove { key } => {
			if !store.remove(&key)? {
				eprintln!("{} no entry named `{key}`", "warning:".yellow().bold());
			}
		}
	}
	Ok(())
}
