use std::fs::{self, OpenOptions};
use std::path::Path;

use anyhow::Result;
use env_logger::{Builder, Env, Target};

use crate::config::Config;

/// Route `log` output to the configured file. The terminal is in raw mode
/// on the alternate screen, so nothing may go to stderr while it runs.
///
/// `RUST_LOG` overrides the configured level.
pub fn init(config: &Config) -> Result<()> {
    let path = Path::new(&config.log_file);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    Builder::from_env(Env::default().default_filter_or(config.log_level.as_str()))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_secs()
        .try_init()?;
    Ok(())
}
