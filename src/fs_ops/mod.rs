//! Filesystem operations: sandboxed relocation and the primitives it is built on.

mod atomic;
mod helpers;
mod relocate;
#[cfg(unix)]
mod util;

pub use atomic::{ensure_parent_dir, try_atomic_move};
pub use helpers::{hint_for, io_error_with_help};
pub use relocate::{relocate, RelocationOutcome, RelocationRequest, Strategy};
