//! The filter family: pluggable predicates deciding which catalog nodes
//! qualify during a search.
//!
//! One trait with default-true predicates, five concrete filters:
//! - [`UnconstrainedFilter`] — matches everything
//! - [`DenylistAwareFilter`] — skips images the target denylists for broad
//!   searches
//! - [`ByImageFilter`] — one image path spec
//! - [`ByImageListFilter`] — image membership list
//! - [`ByImageListAndUnitFilter`] — image list plus compilation-unit list
//!
//! An empty constraint list is a sentinel meaning "match everything at
//! this level", never an error and never "match nothing".

pub mod by_image;
pub mod by_image_list;
pub mod by_image_list_and_unit;
pub mod unconstrained;

pub use by_image::ByImageFilter;
pub use by_image_list::ByImageListFilter;
pub use by_image_list_and_unit::ByImageListAndUnitFilter;
pub use unconstrained::{DenylistAwareFilter, UnconstrainedFilter};

use std::fmt::Write as _;
use std::sync::Arc;

use probe_core::constants::DEFAULT_MAX_DESCRIBED_SPECS;

use crate::catalog::{Address, CompilationUnit, FileSpec, FileSpecList, Image, Target};
use crate::context::{MatchContext, ScopeMask};
use crate::searcher::Searcher;

/// Filtering policy for one search.
///
/// All predicates are pure: no side effects, no I/O. Defaults answer true
/// (unconstrained), so a filter only overrides the levels it constrains.
/// Every filter holds a `Weak` reference to its target; once that expires,
/// every search entry point is a silent no-op.
pub trait SearchFilter {
    /// The target this filter searches, if still alive.
    fn target(&self) -> Option<Arc<Target>>;

    /// Whether an image named by `spec` qualifies. Default: true.
    fn image_passes_spec(&self, _spec: &FileSpec) -> bool {
        true
    }

    /// Whether a catalog image qualifies. Delegates to the spec form.
    fn image_passes(&self, image: &Image) -> bool {
        self.image_passes_spec(image.file())
    }

    /// Whether a compilation unit named by `spec` qualifies. Default: true.
    fn unit_passes_spec(&self, _spec: &FileSpec) -> bool {
        true
    }

    /// Whether a catalog unit qualifies. Delegates to the spec form.
    fn unit_passes(&self, unit: &CompilationUnit) -> bool {
        self.unit_passes_spec(unit.file())
    }

    /// Whether a match context qualifies, evaluated under the caller's
    /// declared `valid_scope`.
    ///
    /// A filter must answer false when a level it constrains is not
    /// covered by `valid_scope`, even if the field happens to be
    /// populated. A covered-but-unset field does not fail by itself.
    /// Default: true.
    fn context_passes(&self, _context: &MatchContext, _valid_scope: ScopeMask) -> bool {
        true
    }

    /// Whether a code address qualifies. Reserved for function/line-level
    /// constraints. Default: true.
    fn address_passes(&self, _address: &Address) -> bool {
        true
    }

    /// The minimal scope this filter needs to render a meaningful
    /// decision. Default: empty (an unconstrained filter needs nothing).
    fn required_scope(&self) -> ScopeMask {
        ScopeMask::empty()
    }

    /// Append a human-readable fragment describing the constraint.
    fn describe(&self, _s: &mut String) {}

    /// Walk the target's catalog to the searcher's depth, applying this
    /// filter and dispatching qualifying nodes to the searcher.
    fn search(&self, searcher: &mut dyn Searcher);

    /// Like [`search`](Self::search), but over a caller-supplied image
    /// list instead of the target's own.
    fn search_in_image_list(&self, searcher: &mut dyn Searcher, images: &[Arc<Image>]);
}

/// Append `, image = a.so` or `, images(3) = a.so, b.so, c.so` for a spec
/// list, capping long lists.
pub(crate) fn describe_spec_list(s: &mut String, noun: &str, specs: &FileSpecList) {
    match specs.len() {
        0 => {}
        1 => {
            if let Some(spec) = specs.first() {
                let _ = write!(s, ", {} = {}", noun, spec.filename());
            }
        }
        n => {
            let _ = write!(s, ", {}s({}) = ", noun, n);
            for (i, spec) in specs.iter().take(DEFAULT_MAX_DESCRIBED_SPECS).enumerate() {
                if i > 0 {
                    s.push_str(", ");
                }
                s.push_str(spec.filename());
            }
            if n > DEFAULT_MAX_DESCRIBED_SPECS {
                s.push_str(", ...");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_list_description_caps_long_lists() {
        let mut one = String::new();
        let single: FileSpecList = [FileSpec::new("a.so")].into_iter().collect();
        describe_spec_list(&mut one, "image", &single);
        assert_eq!(one, ", image = a.so");

        let mut many = String::new();
        let list: FileSpecList = (0..10).map(|i| FileSpec::new(&format!("lib{i}.so"))).collect();
        describe_spec_list(&mut many, "image", &list);
        assert!(many.starts_with(", images(10) = lib0.so"));
        assert!(many.ends_with(", ..."));
    }
}
