use anyhow::{anyhow, Context};
use std::{fs::OpenOptions, io, path::Path, sync::Mutex};
use tracing_subscriber::EnvFilter;

pub(crate) enum LogTarget<'a> {
    /// The interactive UI owns stdout, so logs go to a file.
    File(&'a Path),
    Stderr,
}

/// `RUST_LOG` wins over the configured level.
pub(crate) fn init(target: LogTarget<'_>, default_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .with_context(|| format!("invalid log level {default_level:?}"))?;

    let installed = match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("could not open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init(),
    };
    installed.map_err(|e| anyhow!("could not install log subscriber: {e}"))
}
