use std::str::FromStr;

use anyhow::Result;
use once_cell::sync::OnceCell;
use tracing_subscriber::{prelude::*, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Installs the global tracing subscriber.
///
/// `level` is a tracing env filter, eg. `info` or `api=debug,sqlx=warn`.
/// Calling this more than once is a no-op, so tests can initialize freely.
pub fn init(level: &str) -> Result<()> {
    INITIALIZED.get_or_try_init(|| {
        let filter = EnvFilter::from_str(level)?;

        tracing_subscriber::fmt()
            .with_file(true)
            .with_line_number(true)
            .with_env_filter(filter)
            .finish()
            .try_init()?;

        Ok::<_, anyhow::Error>(())
    })?;

    Ok(())
}
