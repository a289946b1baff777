//! User-facing rendering of path tokens.

use std::path::{Component, Path};

/// Shown in place of an empty or root-equivalent path.
pub const ROOT_MARKER: &str = "(root)";

/// Strip leading `./` prefixes; root-equivalent tokens become [`ROOT_MARKER`].
/// Idempotent: formatting an already formatted string returns it unchanged.
pub fn format_display(token: &str) -> String {
    let mut rest = token;
    while let Some(stripped) = rest.strip_prefix("./") {
        rest = stripped;
    }
    if rest.is_empty() || rest == "." {
        ROOT_MARKER.to_string()
    } else {
        rest.to_string()
    }
}

/// Render `path` relative to `root` with `/` separators, for listings and logs.
/// Paths outside `root` are shown as given.
pub fn relative_display(path: &Path, root: &Path) -> String {
    let Ok(rel) = path.strip_prefix(root) else {
        return path.display().to_string();
    };
    let parts: Vec<_> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        ROOT_MARKER.to_string()
    } else {
        parts.join("/")
    }
}
