//! Filter constrained to an image list and a compilation-unit list.

use std::sync::Arc;

use crate::catalog::{FileSpec, FileSpecList, Image, PathStyle, Target};
use crate::context::{MatchContext, ScopeMask};
use crate::filter::{describe_spec_list, ByImageListFilter, SearchFilter};
use crate::searcher::{CallbackAction, SearchDepth, Searcher};
use crate::traverse;

/// Selects images that are members of an image list AND units that are
/// members of a unit list. Either list may be empty, meaning everything
/// at that level passes.
///
/// Composes a [`ByImageListFilter`] for the image level rather than
/// duplicating its membership logic.
#[derive(Debug, Clone)]
pub struct ByImageListAndUnitFilter {
    images: ByImageListFilter,
    unit_specs: FileSpecList,
}

impl ByImageListAndUnitFilter {
    /// Create a filter over `image_specs` × `unit_specs`.
    pub fn new(target: &Arc<Target>, image_specs: FileSpecList, unit_specs: FileSpecList) -> Self {
        Self {
            images: ByImageListFilter::new(target, image_specs),
            unit_specs,
        }
    }

    /// Override the path comparison style for both levels.
    pub fn with_style(mut self, style: PathStyle) -> Self {
        self.images = self.images.with_style(style);
        self
    }

    /// The constraining unit specs.
    pub fn unit_specs(&self) -> &FileSpecList {
        &self.unit_specs
    }
}

impl SearchFilter for ByImageListAndUnitFilter {
    fn target(&self) -> Option<Arc<Target>> {
        self.images.target()
    }

    fn image_passes_spec(&self, spec: &FileSpec) -> bool {
        self.images.image_passes_spec(spec)
    }

    fn unit_passes_spec(&self, spec: &FileSpec) -> bool {
        self.unit_specs.is_empty() || self.unit_specs.contains(spec, self.images.style())
    }

    fn context_passes(&self, context: &MatchContext, valid_scope: ScopeMask) -> bool {
        if !self.images.context_passes(context, valid_scope) {
            return false;
        }
        if !valid_scope.contains(ScopeMask::COMP_UNIT) {
            return false;
        }
        match &context.unit {
            Some(unit) => self.unit_passes_spec(unit.file()),
            None => true,
        }
    }

    fn required_scope(&self) -> ScopeMask {
        ScopeMask::IMAGE | ScopeMask::COMP_UNIT
    }

    fn describe(&self, s: &mut String) {
        self.images.describe(s);
        describe_spec_list(s, "unit", &self.unit_specs);
    }

    /// At unit depth, inlines the images × units double loop so both list
    /// memberships apply before any dispatch; no redundant second
    /// per-unit pass through the shared descent.
    fn search(&self, searcher: &mut dyn Searcher) {
        let Some(target) = self.target() else {
            tracing::debug!("image-and-unit filter has no target, skipping search");
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
            let at_image = root.with_image(Arc::clone(image));
            if searcher.depth() == SearchDepth::Image {
                match traverse::descend_images(self, &at_image, searcher) {
                    CallbackAction::Stop => return,
                    CallbackAction::Pop | CallbackAction::Continue => {}
                }
                continue;
            }
            'units: for unit in image.units() {
                if !self.unit_passes(unit) {
                    continue;
                }
                if searcher.depth() == SearchDepth::CompUnit {
                    let scoped = at_image.with_unit(Arc::clone(unit));
                    match searcher.on_match(self, &scoped, None, false) {
                        CallbackAction::Stop => return,
                        // Reject the rest of this image's units, move on.
                        CallbackAction::Pop => break 'units,
                        CallbackAction::Continue => {}
                    }
                } else {
                    match traverse::descend_functions(self, unit, &at_image, searcher) {
                        CallbackAction::Stop => return,
                        CallbackAction::Pop => break 'units,
                        CallbackAction::Continue => {}
                    }
                }
            }
        }
    }

    fn search_in_image_list(&self, searcher: &mut dyn Searcher, images: &[Arc<Image>]) {
        traverse::search_in_image_list(self, searcher, images);
    }
}
