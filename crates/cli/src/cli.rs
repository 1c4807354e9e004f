use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::ConfigOverrides;
use crate::styles::cli_styles;

#[derive(Parser, Debug)]
#[command(name = "nose-e2e")]
#[command(about = "End-to-end UI tests for the nose iOS app, driven through Appium")]
#[command(version)]
#[command(styles = cli_styles())]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Suite configuration file [default: ./nose-e2e.json if present]
	#[arg(short, long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Appium server URL
	#[arg(long, global = true, value_name = "URL")]
	pub server: Option<String>,

	/// Path to the simulator .app build under test
	#[arg(long, global = true, value_name = "PATH")]
	pub app: Option<String>,

	/// Handoff file shared between scenarios
	#[arg(long, global = true, value_name = "FILE")]
	pub handoff: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

impl Cli {
	pub fn overrides(&self) -> ConfigOverrides {
		ConfigOverrides {
			server_url: self.server.clone(),
			app: self.app.clone(),
			handoff_path: self.handoff.clone(),
		}
	}
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Run scenarios in name order on one shared session
	Run {
		/// Only run scenarios whose name contains this text
		#[arg(short, long)]
		filter: Option<String>,
	},

	/// List registered scenarios
	#[command(alias = "ls")]
	List,

	/// Inspect or edit the handoff file
	Handoff {
		#[command(subcommand)]
		action: HandoffAction,
	},
}

#[derive(Subcommand, Debug)]
pub enum HandoffAction {
	/// Print the value stored under KEY
	Get { key: String },
	/// Store VALUE under KEY
	Set { key: String, value: String },
	/// Print every stored entry
	List,
	/// Delete KEY
	#[command(alias = "rm")]
	Remove { key: String },
}
