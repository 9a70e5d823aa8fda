use tracing_subscriber::EnvFilter;

use crate::LogArgs;

/// Install the stderr subscriber.
///
/// `-q` selects errors only. Otherwise `RUST_LOG` is used when set, falling
/// back to `info` raised one step per `-v`.
pub fn init(args: &LogArgs) {
	let filter = if args.quiet {
		EnvFilter::new("error")
	} else {
		let level = match args.verbose {
			0 => "info",
			1 => "debug",
			_ => "trace",
		};
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.without_time()
		.init();
}
