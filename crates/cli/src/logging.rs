//! Tracing setup for the `nose-e2e` binary.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
fn default_filter(verbosity: u8) -> &'static str {
	match verbosity {
		0 => "warn",
		1 => "info,reqwest=warn,hyper=warn",
		_ => "debug,hyper=info",
	}
}

/// Installs a compact stderr subscriber.
///
/// Scenario PASS/FAIL lines go to stdout, so even at `warn` a run stays readable.
/// `-v` adds session lifecycle and scenario boundaries, `-vv` every lookup and gesture.
pub fn init_logging(verbosity: u8) {
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.compact()
		.init();
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn verbosity_raises_the_default_level() {
		assert_eq!(default_filter(0), "warn");
		assert!(default_filter(1).starts_with("info"));
		assert!(default_filter(2).starts_with("debug"));
		assert_eq!(default_filter(7), default_filter(2));
	}

	#[test]
	fn default_filters_parse() {
		for verbosity in 0..3 {
			assert!(EnvFilter::try_new(default_filter(verbosity)).is_ok());
		}
	}
}
