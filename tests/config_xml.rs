use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::tempdir;

use context_coder::config::load_config_from_xml_path;
use context_coder::{FallbackPolicy, LogLevel, ParentPolicy};

fn write(xml: &str) -> (tempfile::TempDir, PathBuf) {
    let td = tempdir().unwrap();
    let p = td.path().join("config.xml");
    fs::write(&p, xml).unwrap();
    (td, p)
}

#[test]
fn full_config_is_read() {
    let (_td, p) = write(
        r#"<config>
  <root>  /srv/project  </root>
  <log_level>debug</log_level>
  <log_file>/tmp/cc.log</log_file>
  <tool_timeout_seconds> 9 </tool_timeout_seconds>
  <kill_grace_seconds>2</kill_grace_seconds>
  <fallback>unavailable-only</fallback>
  <parent_references>balanced</parent_references>
  <page_size>50000</page_size>
</config>"#,
    );
    let cfg = load_config_from_xml_path(&p).unwrap();
    assert_eq!(cfg.root, PathBuf::from("/srv/project"));
    assert_eq!(cfg.log_level, LogLevel::Debug);
    assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/cc.log")));
    assert_eq!(cfg.tool_timeout, Duration::from_secs(9));
    assert_eq!(cfg.kill_grace, Duration::from_secs(2));
    assert_eq!(cfg.fallback, FallbackPolicy::ToolUnavailableOnly);
    assert_eq!(cfg.parent_policy, ParentPolicy::Balanced);
    assert_eq!(cfg.page_size, 50_000);
}

#[test]
fn malformed_xml_errors() {
    // Missing closing tag for root
    let (_td, p) = write(
        r#"<config>
  <root>/tmp/project
</config>"#,
    );
    let err = load_config_from_xml_path(&p).unwrap_err();
    assert!(format!("{err}").contains("parse config xml"));
}

#[test]
fn unknown_elements_are_rejected() {
    let (_td, p) = write("<config><download_base>/x</download_base></config>");
    assert!(load_config_from_xml_path(&p).is_err());
}

#[test]
fn bad_policy_value_is_rejected() {
    let (_td, p) = write("<config><fallback>sometimes</fallback></config>");
    let err = load_config_from_xml_path(&p).unwrap_err();
    assert!(format!("{err:#}").contains("sometimes"), "err: {err:#}");
}

#[test]
fn missing_file_errors_with_context() {
    let td = tempdir().unwrap();
    let err = load_config_from_xml_path(&td.path().join("nope.xml")).unwrap_err();
    assert!(format!("{err}").contains("read config xml"));
}

#[cfg(unix)]
#[test]
fn oversized_timeout_is_refused_before_git_runs() {
    use context_coder::vcs::GitCli;
    use context_coder::VersionControl;

    let root = tempdir().unwrap();
    let (_td, p) = write(&format!(
        "<config><root>{}</root><tool_timeout_seconds>18446744073709551615</tool_timeout_seconds></config>",
        root.path().display()
    ));
    let cfg = load_config_from_xml_path(&p).unwrap();
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("tool_timeout"), "err: {err}");

    // Even unvalidated limits must not panic a probe that actually spawns.
    let stand_in = GitCli::with_program("true", cfg.process_limits());
    assert!(stand_in.probe_available());
}
