//! Config module.
//! Provides configuration types, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor, CONFIG_ENV};
pub use types::{Config, FallbackPolicy, LogLevel};
pub use validate::{validate_and_normalize, MAX_TOOL_WAIT};
pub use xml::{load_config, load_config_from_xml_path};

/// Defaults shared across submodules.
pub const ROOT_DEFAULT: &str = ".";
/// Characters per digest page; leaves headroom under a 100k client limit.
pub const PAGE_SIZE_DEFAULT: usize = 99_000;
