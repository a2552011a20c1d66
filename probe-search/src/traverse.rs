//! The depth-bounded recursive descent tying filters and searchers
//! together.
//!
//! The descent walks target → images → compilation units (→ functions,
//! stubbed), pruning branches the filter rejects and steering on the
//! searcher's tri-state return. Absorption rules are encoded explicitly at
//! each loop boundary:
//! - `Stop` always propagates and ends the whole search.
//! - `Pop` abandons the current branch: at the unit loop it skips the
//!   image's remaining units; at the image loop (the outermost) it
//!   degrades to `Continue`.
//!
//! A pinned context field (image or unit already set by the caller) skips
//! the corresponding list scan, and the callback's raw result flows back
//! to the caller unmodified.

use std::sync::Arc;

use crate::catalog::{CompilationUnit, Image};
use crate::context::MatchContext;
use crate::filter::SearchFilter;
use crate::searcher::{CallbackAction, SearchDepth, Searcher};

/// Walk the target's catalog to the searcher's depth.
///
/// The shared engine behind [`SearchFilter::search`]; list-constrained
/// filters override their `search` with pre-pruned scans and come back in
/// through [`descend_images`].
pub fn search(filter: &dyn SearchFilter, searcher: &mut dyn Searcher) {
    let Some(target) = filter.target() else {
        tracing::debug!("search filter has no target, skipping search");
        return;
    };
    let context = MatchContext::new(target);
    if searcher.depth() == SearchDepth::Target {
        searcher.on_match(filter, &context, None, false);
        return;
    }
    descend_images(filter, &context, searcher);
}

/// Walk a caller-supplied image list instead of the target's own.
pub fn search_in_image_list(
    filter: &dyn SearchFilter,
    searcher: &mut dyn Searcher,
    images: &[Arc<Image>],
) {
    let Some(target) = filter.target() else {
        tracing::debug!("search filter has no target, skipping image-list search");
        return;
    };
    let context = MatchContext::new(target);
    if searcher.depth() == SearchDepth::Target {
        searcher.on_match(filter, &context, None, false);
        return;
    }
    for image in images {
        if !filter.image_passes(image) {
            continue;
        }
        let scoped = context.with_image(Arc::clone(image));
        if descend_images(filter, &scoped, searcher) == CallbackAction::Stop {
            return;
        }
    }
}

/// Image-level descent.
///
/// With no image pinned in the context, scans the target's images in
/// index order. With an image pinned, skips the scan and returns the
/// callback's (or the unit descent's) raw result to the caller.
pub fn descend_images(
    filter: &dyn SearchFilter,
    context: &MatchContext,
    searcher: &mut dyn Searcher,
) -> CallbackAction {
    if searcher.depth() < SearchDepth::Image {
        return CallbackAction::Continue;
    }

    let Some(image) = context.image.as_ref() else {
        for image in context.target.images() {
            if !filter.image_passes(image) {
                continue;
            }
            if searcher.depth() == SearchDepth::Image {
                let scoped = context.with_image(Arc::clone(image));
                match searcher.on_match(filter, &scoped, None, false) {
                    CallbackAction::Stop => return CallbackAction::Stop,
                    // No level above this loop for Pop to reach; both
                    // resume with the next image.
                    CallbackAction::Pop | CallbackAction::Continue => {}
                }
            } else {
                let scoped = context.with_image(Arc::clone(image));
                match descend_units(filter, image, &scoped, searcher) {
                    CallbackAction::Stop => return CallbackAction::Stop,
                    // Pop from the unit level rejects this image's
                    // subtree; resume with the next image.
                    CallbackAction::Pop | CallbackAction::Continue => {}
                }
            }
        }
        return CallbackAction::Continue;
    };

    if searcher.depth() == SearchDepth::Image {
        searcher.on_match(filter, context, None, false)
    } else {
        descend_units(filter, image, context, searcher)
    }
}

/// Unit-level descent within one image.
///
/// With a unit pinned in the context, tests it and dispatches once,
/// returning the raw result. Otherwise scans the image's units in index
/// order.
pub fn descend_units(
    filter: &dyn SearchFilter,
    image: &Arc<Image>,
    context: &MatchContext,
    searcher: &mut dyn Searcher,
) -> CallbackAction {
    if let Some(unit) = context.unit.as_ref() {
        if filter.unit_passes(unit) {
            let scoped = MatchContext::new(Arc::clone(&context.target))
                .with_image(Arc::clone(image))
                .with_unit(Arc::clone(unit));
            return searcher.on_match(filter, &scoped, None, false);
        }
        return CallbackAction::Continue;
    }

    for unit in image.units() {
        if !filter.unit_passes(unit) {
            continue;
        }
        if searcher.depth() == SearchDepth::CompUnit {
            let scoped = context.with_unit(Arc::clone(unit));
            match searcher.on_match(filter, &scoped, None, false) {
                // Pop rejects the image's remaining units without
                // aborting the search; the image loop above resumes.
                CallbackAction::Pop => return CallbackAction::Continue,
                CallbackAction::Stop => return CallbackAction::Stop,
                CallbackAction::Continue => {}
            }
        } else {
            match descend_functions(filter, unit, context, searcher) {
                CallbackAction::Stop => return CallbackAction::Stop,
                CallbackAction::Pop | CallbackAction::Continue => {}
            }
        }
    }
    CallbackAction::Continue
}

/// Function-level descent.
///
/// Extension point: function enumeration is not yet part of the catalog,
/// so every qualifying unit is an automatic pass-through.
pub fn descend_functions(
    _filter: &dyn SearchFilter,
    _unit: &Arc<CompilationUnit>,
    _context: &MatchContext,
    _searcher: &mut dyn Searcher,
) -> CallbackAction {
    CallbackAction::Continue
}
