//! Config validation logic.
//! Verifies the sandbox root exists, is a readable directory, and that limits are sane.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info};

use super::types::Config;

/// Upper bound for `tool_timeout` and `kill_grace`.
pub const MAX_TOOL_WAIT: Duration = Duration::from_secs(60 * 60);

impl Config {
    /// Validate root existence/readability and numeric limits.
    pub fn validate(&self) -> Result<()> {
        ensure_dir_exists_and_is_dir(&self.root, "root")?;
        ensure_readable(&self.root, "root")?;

        if self.tool_timeout.is_zero() {
            bail!("tool_timeout must be greater than zero");
        }
        if self.tool_timeout > MAX_TOOL_WAIT {
            bail!(
                "tool_timeout must be at most {}s (got {}s)",
                MAX_TOOL_WAIT.as_secs(),
                self.tool_timeout.as_secs()
            );
        }
        if self.kill_grace > MAX_TOOL_WAIT {
            bail!(
                "kill_grace must be at most {}s (got {}s)",
                MAX_TOOL_WAIT.as_secs(),
                self.kill_grace.as_secs()
            );
        }
        if self.page_size == 0 {
            bail!("page_size must be greater than zero");
        }

        info!(
            root = %self.root.display(),
            fallback = %self.fallback,
            parent_policy = %self.parent_policy,
            log_file = %self
                .log_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<none>".into()),
            "Config validated"
        );
        Ok(())
    }
}

/// Validate, then replace `root` with its canonical absolute form.
pub fn validate_and_normalize(cfg: &mut Config) -> Result<()> {
    cfg.validate()?;
    cfg.root = dunce::canonicalize(&cfg.root)
        .with_context(|| format!("canonicalize root '{}'", cfg.root.display()))?;
    debug!(root = %cfg.root.display(), "root normalized");
    Ok(())
}

/// Ensure path exists and is a directory; emit clear errors with path context.
fn ensure_dir_exists_and_is_dir(path: &Path, name: &str) -> Result<()> {
    if !path.exists() {
        error!("{name} does not exist: {}", path.display());
        bail!("{name} does not exist: {}", path.display());
    }
    if !path.is_dir() {
        error!("{name} is not a directory: {}", path.display());
        bail!("{name} is not a directory: {}", path.display());
    }
    Ok(())
}

/// Ensure directory is readable by attempting to open its entries.
fn ensure_readable(path: &Path, name: &str) -> Result<()> {
    fs::read_dir(path).with_context(|| {
        format!("Cannot read {name} directory '{}'; check permissions", path.display())
    })?;
    debug!("{name} readable: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_root_fails() {
        let td = tempdir().unwrap();
        let cfg = Config::new(td.path().join("nope"));
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("root does not exist"));
    }

    #[test]
    fn file_root_fails() {
        let td = tempdir().unwrap();
        let f = td.path().join("f");
        fs::write(&f, b"x").unwrap();
        let err = Config::new(&f).validate().unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn zero_timeout_fails() {
        let td = tempdir().unwrap();
        let mut cfg = Config::new(td.path());
        cfg.tool_timeout = Duration::ZERO;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn oversized_waits_fail() {
        let td = tempdir().unwrap();
        let mut cfg = Config::new(td.path());
        cfg.tool_timeout = Duration::from_secs(u64::MAX);
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("tool_timeout must be at most"));

        let mut cfg = Config::new(td.path());
        cfg.kill_grace = MAX_TOOL_WAIT + Duration::from_secs(1);
        assert!(cfg.validate().is_err());

        cfg.kill_grace = MAX_TOOL_WAIT;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn normalize_makes_root_absolute() {
        let td = tempdir().unwrap();
        let mut cfg = Config::new(td.path().join("."));
        validate_and_normalize(&mut cfg).unwrap();
        assert!(cfg.root.is_absolute());
        assert_eq!(cfg.root, dunce::canonicalize(td.path()).unwrap());
    }
}
