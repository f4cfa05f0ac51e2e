use tracing_subscriber::EnvFilter;

mod command;
mod util;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so JSON written to stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    command::run()
}
