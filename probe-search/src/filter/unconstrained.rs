//! The unconstrained filter and its denylist-aware refinement.

use std::sync::{Arc, Weak};

use crate::catalog::{FileSpec, Image, PathStyle, Target};
use crate::filter::SearchFilter;
use crate::searcher::Searcher;
use crate::traverse;

/// Matches every image and every unit.
#[derive(Debug, Clone)]
pub struct UnconstrainedFilter {
    target: Weak<Target>,
}

impl UnconstrainedFilter {
    /// Create a filter over `target`'s whole catalog.
    pub fn new(target: &Arc<Target>) -> Self {
        Self {
            target: Arc::downgrade(target),
        }
    }
}

impl SearchFilter for UnconstrainedFilter {
    fn target(&self) -> Option<Arc<Target>> {
        self.target.upgrade()
    }

    fn search(&self, searcher: &mut dyn Searcher) {
        traverse::search(self, searcher);
    }

    fn search_in_image_list(&self, searcher: &mut dyn Searcher, images: &[Arc<Image>]) {
        traverse::search_in_image_list(self, searcher, images);
    }
}

/// Matches every image except those the target denylists for broad
/// (non-image-specific) searches.
///
/// Hosts use this for operations like "set a breakpoint everywhere" where
/// system stubs should not participate.
#[derive(Debug, Clone)]
pub struct DenylistAwareFilter {
    target: Weak<Target>,
    style: PathStyle,
}

impl DenylistAwareFilter {
    /// Create a denylist-aware filter over `target`'s catalog.
    pub fn new(target: &Arc<Target>) -> Self {
        Self {
            target: Arc::downgrade(target),
            style: PathStyle::default(),
        }
    }

    /// Override the path comparison style used against the denylist.
    pub fn with_style(mut self, style: PathStyle) -> Self {
        self.style = style;
        self
    }
}

impl SearchFilter for DenylistAwareFilter {
    fn target(&self) -> Option<Arc<Target>> {
        self.target.upgrade()
    }

    fn image_passes_spec(&self, spec: &FileSpec) -> bool {
        match self.target.upgrade() {
            Some(target) => !target.is_image_excluded(spec, self.style),
            None => false,
        }
    }

    fn search(&self, searcher: &mut dyn Searcher) {
        traverse::search(self, searcher);
    }

    fn search_in_image_list(&self, searcher: &mut dyn Searcher, images: &[Arc<Image>]) {
        traverse::search_in_image_list(self, searcher, images);
    }
}
