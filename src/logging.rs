use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn default_directives(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "partscout=info,tower_http=info",
        1 => "partscout=debug,partscout_resolve=debug,partscout_fetch=debug,tower_http=debug",
        _ => "partscout=trace,partscout_resolve=trace,partscout_fetch=trace,partscout_extract=trace,tower_http=trace",
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `-v`.
///
/// Logs go to stderr so that command output on stdout stays parseable.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
    if installed.is_err() {
        tracing::debug!("global subscriber already installed");
    }
}
