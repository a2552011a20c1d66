//! Filter constrained to a single image path spec.

use std::sync::{Arc, Weak};

use crate::catalog::{FileSpec, Image, PathStyle, Target};
use crate::context::{MatchContext, ScopeMask};
use crate::filter::SearchFilter;
use crate::searcher::Searcher;
use crate::traverse;

/// Selects images matching one path spec; units are unconstrained.
#[derive(Debug, Clone)]
pub struct ByImageFilter {
    target: Weak<Target>,
    image_spec: FileSpec,
    style: PathStyle,
}

impl ByImageFilter {
    /// Create a filter matching images against `image_spec`.
    pub fn new(target: &Arc<Target>, image_spec: FileSpec) -> Self {
        Self {
            target: Arc::downgrade(target),
            image_spec,
            style: PathStyle::default(),
        }
    }

    /// Override the path comparison style.
    pub fn with_style(mut self, style: PathStyle) -> Self {
        self.style = style;
        self
    }

    /// The constraining image spec.
    pub fn image_spec(&self) -> &FileSpec {
        &self.image_spec
    }
}

impl SearchFilter for ByImageFilter {
    fn target(&self) -> Option<Arc<Target>> {
        self.target.upgrade()
    }

    fn image_passes_spec(&self, spec: &FileSpec) -> bool {
        spec.matches(&self.image_spec, self.style)
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
        use std::fmt::Write as _;
        let _ = write!(s, ", image = {}", self.image_spec.filename());
    }

    fn search(&self, searcher: &mut dyn Searcher) {
        traverse::search(self, searcher);
    }

    fn search_in_image_list(&self, searcher: &mut dyn Searcher, images: &[Arc<Image>]) {
        traverse::search_in_image_list(self, searcher, images);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CompilationUnit;

    fn make_target() -> Arc<Target> {
        let mut target = Target::new();
        let mut a = Image::new(FileSpec::new("/usr/lib/a.so"));
        a.add_unit(CompilationUnit::new(FileSpec::new("x.c")));
        target.add_image(a);
        target.add_image(Image::new(FileSpec::new("/usr/lib/b.so")));
        Arc::new(target)
    }

    #[test]
    fn only_the_named_image_passes() {
        let target = make_target();
        let filter = ByImageFilter::new(&target, FileSpec::new("a.so"));
        assert!(filter.image_passes_spec(&FileSpec::new("/usr/lib/a.so")));
        assert!(!filter.image_passes_spec(&FileSpec::new("/usr/lib/b.so")));
        assert!(filter.unit_passes_spec(&FileSpec::new("anything.c")));
    }

    #[test]
    fn context_check_fails_closed_on_scope() {
        let target = make_target();
        let filter = ByImageFilter::new(&target, FileSpec::new("a.so"));
        let image = Arc::clone(&target.images()[0]);
        let context = MatchContext::new(Arc::clone(&target)).with_image(image);

        // Populated image field, but the caller's scope does not cover it.
        assert!(!filter.context_passes(&context, ScopeMask::TARGET));
        assert!(filter.context_passes(&context, ScopeMask::TARGET | ScopeMask::IMAGE));
    }

    #[test]
    fn context_check_matches_the_scoped_image() {
        let target = make_target();
        let filter = ByImageFilter::new(&target, FileSpec::new("b.so"));
        let context = MatchContext::new(Arc::clone(&target))
            .with_image(Arc::clone(&target.images()[0]));
        assert!(!filter.context_passes(&context, ScopeMask::IMAGE));

        let context = MatchContext::new(Arc::clone(&target))
            .with_image(Arc::clone(&target.images()[1]));
        assert!(filter.context_passes(&context, ScopeMask::IMAGE));
    }

    #[test]
    fn style_override_relaxes_case() {
        let target = make_target();
        let filter = ByImageFilter::new(&target, FileSpec::new("A.SO"))
            .with_style(PathStyle { case_sensitive: false });
        assert!(filter.image_passes_spec(&FileSpec::new("/usr/lib/a.so")));
    }
}
