//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Unknown fields are rejected so typos surface instead of being silently ignored.
//!
//! Example:
//! <config>
//!   <root>/path/to/project</root>
//!   <log_level>normal</log_level>
//!   <log_file>/path/to/context_coder.log</log_file>
//!   <tool_timeout_seconds>5</tool_timeout_seconds>
//!   <kill_grace_seconds>5</kill_grace_seconds>
//!   <fallback>any-failure</fallback>
//!   <parent_references>reject</parent_references>
//!   <page_size>99000</page_size>
//! </config>

use anyhow::{anyhow, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use super::paths::default_config_path;
use super::types::{Config, FallbackPolicy, LogLevel};
use crate::sandbox::ParentPolicy;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    root: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
    #[serde(default, deserialize_with = "de_u64_trimmed_opt")]
    tool_timeout_seconds: Option<u64>,
    #[serde(default, deserialize_with = "de_u64_trimmed_opt")]
    kill_grace_seconds: Option<u64>,
    fallback: Option<String>,
    parent_references: Option<String>,
    #[serde(default, deserialize_with = "de_u64_trimmed_opt")]
    page_size: Option<u64>,
}

// Trims surrounding whitespace; an empty element is absent, anything else must be a number.
fn de_u64_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<u64>().map(Some).map_err(|e| {
            serde::de::Error::custom(format!("expected a whole number, got '{s}': {e}"))
        }),
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

// Map XmlConfig -> Config. Bad enum values are errors: a misspelt policy must not
// silently change move semantics.
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(root) = non_empty(parsed.root.as_deref()) {
        cfg.root = PathBuf::from(root);
    }
    if let Some(file) = non_empty(parsed.log_file.as_deref()) {
        cfg.log_file = Some(PathBuf::from(file));
    }
    if let Some(level) = non_empty(parsed.log_level.as_deref()) {
        cfg.log_level = level.parse::<LogLevel>().map_err(|e| anyhow!(e))?;
    }
    if let Some(secs) = parsed.tool_timeout_seconds {
        cfg.tool_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = parsed.kill_grace_seconds {
        cfg.kill_grace = Duration::from_secs(secs);
    }
    if let Some(policy) = non_empty(parsed.fallback.as_deref()) {
        cfg.fallback = policy.parse::<FallbackPolicy>().map_err(|e| anyhow!(e))?;
    }
    if let Some(policy) = non_empty(parsed.parent_references.as_deref()) {
        cfg.parent_policy = policy.parse::<ParentPolicy>().map_err(|e| anyhow!(e))?;
    }
    if let Some(size) = parsed.page_size {
        cfg.page_size = usize::try_from(size).context("page_size out of range")?;
    }
    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid value in config xml '{}'", path.display()))
}

/// Load the config from the default location; Ok(None) when no file exists there.
pub fn load_config() -> Result<Option<Config>> {
    let path = default_config_path().context("resolve default config path")?;
    if !path.exists() {
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(None);
    }
    debug!(path = %path.display(), "loading config");
    load_config_from_xml_path(&path).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(xml: &str) -> (tempfile::TempDir, PathBuf) {
        let td = tempdir().unwrap();
        let p = td.path().join("config.xml");
        fs::write(&p, xml).unwrap();
        (td, p)
    }

    #[test]
    fn empty_config_yields_defaults() {
        let (_td, p) = write("<config></config>");
        let cfg = load_config_from_xml_path(&p).unwrap();
        assert_eq!(cfg.root, PathBuf::from("."));
        assert_eq!(cfg.fallback, FallbackPolicy::AnyFailure);
        assert_eq!(cfg.page_size, crate::config::PAGE_SIZE_DEFAULT);
    }

    #[test]
    fn whitespace_around_numbers_is_trimmed() {
        let (_td, p) = write("<config><tool_timeout_seconds> 9 </tool_timeout_seconds></config>");
        let cfg = load_config_from_xml_path(&p).unwrap();
        assert_eq!(cfg.tool_timeout, Duration::from_secs(9));
    }

    #[test]
    fn non_numeric_seconds_are_rejected() {
        let (_td, p) = write("<config><tool_timeout_seconds>abc</tool_timeout_seconds></config>");
        let err = load_config_from_xml_path(&p).unwrap_err();
        assert!(format!("{err:#}").contains("expected a whole number"), "err: {err:#}");
    }

    #[test]
    fn bad_policy_is_rejected() {
        let (_td, p) = write("<config><fallback>sometimes</fallback></config>");
        let err = load_config_from_xml_path(&p).unwrap_err();
        assert!(format!("{err:#}").contains("invalid fallback policy"));
    }
}
