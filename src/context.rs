//! Per-operation context.
//! Carries the sandbox root, the version-control capability and the policies every
//! operation needs, instead of reading process-wide state.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{Config, FallbackPolicy, PAGE_SIZE_DEFAULT};
use crate::errors::ContextCoderError;
use crate::sandbox::{validate_with, ParentPolicy, SandboxRoot};
use crate::vcs::{GitCli, VersionControl};

#[derive(Clone)]
pub struct OperationContext {
    root: SandboxRoot,
    vcs: Arc<dyn VersionControl>,
    fallback: FallbackPolicy,
    parent_policy: ParentPolicy,
    page_size: usize,
}

impl std::fmt::Debug for OperationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationContext")
            .field("root", &self.root)
            .field("fallback", &self.fallback)
            .field("parent_policy", &self.parent_policy)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl OperationContext {
    pub fn new(root: SandboxRoot, vcs: Arc<dyn VersionControl>) -> Self {
        Self {
            root,
            vcs,
            fallback: FallbackPolicy::default(),
            parent_policy: ParentPolicy::default(),
            page_size: PAGE_SIZE_DEFAULT,
        }
    }

    /// Build a context backed by the real `git` binary, using the config's limits and policies.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let root = SandboxRoot::new(&cfg.root)?;
        let vcs = Arc::new(GitCli::new(cfg.process_limits()));
        Ok(Self::new(root, vcs)
            .with_fallback(cfg.fallback)
            .with_parent_policy(cfg.parent_policy)
            .with_page_size(cfg.page_size))
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_parent_policy(mut self, policy: ParentPolicy) -> Self {
        self.parent_policy = policy;
        self
    }

    /// Digest page size used when a request does not name one.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn root(&self) -> &SandboxRoot {
        &self.root
    }

    pub fn vcs(&self) -> &dyn VersionControl {
        self.vcs.as_ref()
    }

    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }

    pub fn parent_policy(&self) -> ParentPolicy {
        self.parent_policy
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn validate(&self, token: &str) -> Result<(), ContextCoderError> {
        validate_with(token, self.parent_policy)
    }

    /// Validate `token`, then resolve it under the root.
    pub fn resolve(&self, token: &str) -> Result<PathBuf, ContextCoderError> {
        self.validate(token)?;
        self.root.resolve(token)
    }
}
