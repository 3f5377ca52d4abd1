// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Sends tracing output to `path`, appending. The terminal belongs to the UI,
/// so nothing is logged without a file.
pub fn init_file_logging(path: &Path, filter: &str) -> Result<()> {
    let filter = EnvFilter::try_new(filter)
        .with_context(|| format!("invalid log filter {filter:?} -- check REMOULD_LOG or [log] level"))?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|error| anyhow::anyhow!("install log subscriber: {error}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::init_file_logging;
    use anyhow::Result;

    #[test]
    fn bad_filter_is_rejected_before_touching_disk() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("logs").join("remould.log");
        let error = init_file_logging(&path, "remould=loud").expect_err("bad filter");
        assert!(error.to_string().contains("invalid log filter"));
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn creates_log_file_and_parent() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("logs").join("remould.log");
        // Another test may already own the global subscriber; the file is
        // opened either way.
        let _ = init_file_logging(&path, "info");
        assert!(path.exists());
        Ok(())
    }
}
