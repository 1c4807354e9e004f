//! Help and error colors for `nose-e2e`.
//!
//! Headers and usage follow cargo. Errors use the same red as the `error:`
//! prefix `main` prints, so clap's own argument errors look alike.

use clap::builder::Styles;
use clap::builder::styling::AnsiColor;

pub fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().bold())
		.usage(AnsiColor::Green.on_default().bold())
		.literal(AnsiColor::Cyan.on_default().bold())
		.placeholder(AnsiColor::Cyan.on_default())
		.error(AnsiColor::Red.on_default().bold())
		.invalid(AnsiColor::Yellow.on_default().bold())
		.valid(AnsiColor::Green.on_default())
}
