//! Sandbox boundary.
//! Every caller-supplied path token passes through here before it touches the filesystem:
//! - `validate` rejects tokens that climb out of the root (lexical, no I/O).
//! - `SandboxRoot::resolve` joins a token onto the root and re-checks containment.
//! - `format_display` renders tokens for user-facing messages.

mod display;
mod resolve;
mod validate;

pub use display::{format_display, relative_display, ROOT_MARKER};
pub use resolve::{resolve, SandboxRoot};
pub use validate::{validate, validate_with, ParentPolicy};
