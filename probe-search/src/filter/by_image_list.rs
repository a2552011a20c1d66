//! Filter constrained to a list of image path specs.

use std::sync::{Arc, Weak};

use crate::catalog::{FileSpec, FileSpecList, Image, PathStyle, Target};
use crate::context::{MatchContext, ScopeMask};
use crate::filter::{describe_spec_list, SearchFilter};
use crate::searcher::{CallbackAction, SearchDepth, Searcher};
use crate::traverse;

/// Selects images that are members of a spec list; units are
/// unconstrained. An empty list matches every image.
#[derive(Debug, Clone)]
pub struct ByImageListFilter {
    target: Weak<Target>,
    image_specs: FileSpecList,
    style: PathStyle,
}

impl ByImageListFilter {
    /// Create a filter matching images against `image_specs`.
    pub fn new(target: &Arc<Target>, image_specs: FileSpecList) -> Self {
        Self {
            target: Arc::downgrade(target),
            image_specs,
            style: PathStyle::default(),
        }
    }

    /// Override the path comparison style.
    pub fn with_style(mut self, style: PathStyle) -> Self {
        self.style = style;
        self
    }

    /// The constraining image specs.
    pub fn image_specs(&self) -> &FileSpecList {
        &self.image_specs
    }

    /// The path comparison style in effect.
    pub fn style(&self) -> PathStyle {
        self.style
    }
}

impl SearchFilter for ByImageListFilter {
    fn target(&self) -> Option<Arc<Target>> {
        self.target.upgrade()
    }

    fn image_passes_spec(&self, spec: &FileSpec) -> bool {
        self.image_specs.is_empty() || self.image_specs.contains(spec, self.style)
    }

    fn context_passes(&self, context: &MatchContext, valid_scope: ScopeMask) -> bool {
        if !valid_scope.contains(ScopeMask::IMAGE) {
            return false;
        }
        match &context.image {
            Some(image) => self.image_passes_spec(image.file()),
            None => true,
        }
    }

    fn required_scope(&self) -> ScopeMask {
        ScopeMask::IMAGE
    }

    fn describe(&self, s: &mut String) {
        describe_spec_list(s, "image", &self.image_specs);
    }

    /// Scans only list-member images, dispatching each through the
    /// pinned-image descent.
    fn search(&self, searcher: &mut dyn Searcher) {
        let Some(target) = self.target() else {
            tracing::debug!("image-list filter has no target, skipping search");
            return;
        };
        let root = MatchContext::new(Arc::clone(&target));
        if searcher.depth() == SearchDepth::Target {
            searcher.on_match(self, &root, None, false);
            return;
        }
        for image in target.images() {
            if !self.image_passes(image) {
                continue;
            }
            let scoped = root.with_image(Arc::clone(image));
            if traverse::descend_images(self, &scoped, searcher) == CallbackAction::Stop {
                return;
            }
        }
    }

    fn search_in_image_list(&self, searcher: &mut dyn Searcher, images: &[Arc<Image>]) {
        traverse::search_in_image_list(self, searcher, images);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_target() -> Arc<Target> {
        let mut target = Target::new();
        target.add_image(Image::new(FileSpec::new("/usr/lib/a.so")));
        target.add_image(Image::new(FileSpec::new("/usr/lib/b.so")));
        Arc::new(target)
    }

    fn specs(paths: &[&str]) -> FileSpecList {
        paths.iter().map(|p| FileSpec::new(p)).collect()
    }

    #[test]
    fn membership_constrains_images() {
        let target = make_target();
        let filter = ByImageListFilter::new(&target, specs(&["a.so"]));
        assert!(filter.image_passes_spec(&FileSpec::new("/usr/lib/a.so")));
        assert!(!filter.image_passes_spec(&FileSpec::new("/usr/lib/b.so")));
    }

    #[test]
    fn empty_list_is_a_match_everything_sentinel() {
        let target = make_target();
        let filter = ByImageListFilter::new(&target, FileSpecList::new());
        assert!(filter.image_passes_spec(&FileSpec::new("anything.so")));

        let context = MatchContext::new(Arc::clone(&target))
            .with_image(Arc::clone(&target.images()[1]));
        assert!(filter.context_passes(&context, ScopeMask::IMAGE));
    }

    #[test]
    fn describe_lists_member_names() {
        let target = make_target();
        let filter = ByImageListFilter::new(&target, specs(&["a.so", "b.so"]));
        let mut s = String::new();
        filter.describe(&mut s);
        assert_eq!(s, ", images(2) = a.so, b.so");
    }
}
