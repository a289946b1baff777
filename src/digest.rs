//! Codebase digest requests.
//!
//! The digest engine itself is an external collaborator behind [`DigestEngine`]. This module
//! owns what happens before it is called: the requested directory is validated and resolved
//! inside the sandbox, and the directory's control files are looked up fresh.

use anyhow::{anyhow, Result};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::context::OperationContext;
use crate::control_files::ControlFiles;

pub use crate::config::PAGE_SIZE_DEFAULT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestRequest {
    pub input_dir: PathBuf,
    pub page: usize,
    pub page_size: usize,
    pub ignore_file: Option<String>,
    pub minify_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestPage {
    pub content: String,
    pub has_more_pages: bool,
}

pub trait DigestEngine {
    fn generate(&self, request: &DigestRequest) -> Result<DigestPage>;
}

/// Build the request for `path` without calling the engine.
pub fn build_request(
    ctx: &OperationContext,
    path: &str,
    page: usize,
    page_size: Option<usize>,
) -> Result<DigestRequest> {
    let input_dir = ctx.resolve(path)?;
    let control = ControlFiles::probe(&input_dir);
    if let Some(f) = &control.ignore {
        info!(ignore_file = %f, "using ignore file");
    }
    if let Some(f) = &control.minify {
        info!(minify_file = %f, "using minify file");
    }
    Ok(DigestRequest {
        input_dir,
        page,
        page_size: page_size.unwrap_or(ctx.page_size()),
        ignore_file: control.ignore,
        minify_file: control.minify,
    })
}

/// Fetch one page of the digest for `path`.
/// Sandbox errors propagate unchanged; engine errors are wrapped.
pub fn codebase_page(
    ctx: &OperationContext,
    engine: &dyn DigestEngine,
    path: &str,
    page: usize,
    page_size: Option<usize>,
) -> Result<DigestPage> {
    let request = build_request(ctx, path, page, page_size)?;
    debug!(input_dir = %request.input_dir.display(), page, "generating codebase digest");
    let result = engine
        .generate(&request)
        .map_err(|e| anyhow!("Failed to generate codebase digest: {e}"))?;
    info!(
        page,
        content_len = result.content.len(),
        has_more_pages = result.has_more_pages,
        "codebase digest page ready"
    );
    Ok(result)
}
