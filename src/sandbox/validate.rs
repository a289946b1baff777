//! Lexical validation of relative path tokens.
//!
//! Only a segment that is exactly `..` counts as a parent reference. Dots elsewhere
//! (`.env.local`, `[...rest]`, `.eslint...rc.js`) are ordinary characters.

use std::fmt;
use std::path::{Component, Path};
use std::str::FromStr;

use crate::errors::ContextCoderError;

/// How parent references (`..` segments) are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParentPolicy {
    /// Any `..` segment is rejected, even `src/../x` which stays inside the root.
    #[default]
    Reject,
    /// `..` is allowed while it is matched by a preceding real segment.
    Balanced,
}

impl ParentPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" | "strict" => Some(ParentPolicy::Reject),
            "balanced" | "lexical" => Some(ParentPolicy::Balanced),
            _ => None,
        }
    }
}

impl fmt::Display for ParentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParentPolicy::Reject => "reject",
            ParentPolicy::Balanced => "balanced",
        })
    }
}

impl FromStr for ParentPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid parent policy: '{s}'"))
    }
}

/// Validate `token` with the default (strict) parent policy.
pub fn validate(token: &str) -> Result<(), ContextCoderError> {
    validate_with(token, ParentPolicy::default())
}

/// Validate `token`, scanning segments left to right with a depth counter.
pub fn validate_with(token: &str, policy: ParentPolicy) -> Result<(), ContextCoderError> {
    if is_rooted(token) {
        return Err(ContextCoderError::AbsolutePath {
            token: token.to_string(),
        });
    }

    let mut depth: usize = 0;
    for segment in token.split(is_separator) {
        match segment {
            "" | "." => {}
            ".." => {
                if policy == ParentPolicy::Reject || depth == 0 {
                    return Err(ContextCoderError::PathEscape {
                        token: token.to_string(),
                    });
                }
                depth -= 1;
            }
            _ => depth += 1,
        }
    }
    Ok(())
}

pub(super) fn is_separator(c: char) -> bool {
    c == '/' || (cfg!(windows) && c == '\\')
}

fn is_rooted(token: &str) -> bool {
    token.starts_with(is_separator)
        || Path::new(token)
            .components()
            .any(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escapes(token: &str) -> bool {
        matches!(validate(token), Err(ContextCoderError::PathEscape { .. }))
    }

    #[test]
    fn root_equivalents_are_valid() {
        for t in ["", ".", "./", ".//", "././"] {
            assert!(validate(t).is_ok(), "{t:?} should be valid");
        }
    }

    #[test]
    fn dotted_names_are_not_parent_references() {
        for t in [
            "src/routes/[...rest]/+server.ts",
            "components/[...props].svelte",
            ".eslint...rc.js",
            "...",
            "a/.../b",
            "..hidden",
            "file..",
        ] {
            assert!(validate(t).is_ok(), "{t:?} should be valid");
        }
    }

    #[test]
    fn strict_policy_rejects_balanced_parent() {
        assert!(escapes("./src/../outside.txt"));
        assert!(escapes("src/../"));
        assert!(validate_with("./src/../outside.txt", ParentPolicy::Balanced).is_ok());
    }

    #[test]
    fn balanced_policy_rejects_net_escape() {
        let p = ParentPolicy::Balanced;
        assert!(validate_with("src/../../outside.txt", p).is_err());
        assert!(validate_with("./folder/../..", p).is_err());
        assert!(validate_with("../", p).is_err());
        assert!(validate_with("a/b/../../c", p).is_ok());
    }

    #[test]
    fn rejection_happens_at_first_negative_prefix() {
        // depth would recover later, but the prefix `..` already escaped
        assert!(validate_with("../a/b/c", ParentPolicy::Balanced).is_err());
    }

    #[test]
    fn absolute_tokens_are_rejected() {
        assert!(matches!(
            validate("/etc/passwd"),
            Err(ContextCoderError::AbsolutePath { .. })
        ));
    }

    #[test]
    fn policy_parses_names() {
        assert_eq!(ParentPolicy::parse("Balanced"), Some(ParentPolicy::Balanced));
        assert_eq!("strict".parse::<ParentPolicy>().unwrap(), ParentPolicy::Reject);
        assert!("loose".parse::<ParentPolicy>().is_err());
    }
}
