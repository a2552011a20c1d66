//! The match context threaded through a traversal, and the scope mask
//! describing which of its fields are meaningful.

use std::sync::Arc;

use bitflags::bitflags;

use crate::catalog::{CompilationUnit, Function, Image, Target};

bitflags! {
    /// Which fields of a [`MatchContext`] a caller asserts are meaningful.
    ///
    /// Filters evaluate a context under the caller's declared scope, not
    /// their own wishes: a filter that needs a field outside the declared
    /// scope must fail the check even if the field happens to be populated.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ScopeMask: u32 {
        const TARGET = 1 << 0;
        const IMAGE = 1 << 1;
        const COMP_UNIT = 1 << 2;
        const FUNCTION = 1 << 3;
    }
}

/// Accumulated identity built up during traversal.
///
/// Fields above the current depth are unset. Descent never clears a set
/// field; a sibling is visited with a fresh copy instead, so backtracking
/// after a `Pop` cannot observe a half-updated context.
#[derive(Debug, Clone)]
pub struct MatchContext {
    /// The owning target. Always set.
    pub target: Arc<Target>,
    /// The image scoping this match, once traversal reaches image depth.
    pub image: Option<Arc<Image>>,
    /// The compilation unit, once traversal reaches unit depth.
    pub unit: Option<Arc<CompilationUnit>>,
    /// The function, reserved for function-level descent.
    pub function: Option<Arc<Function>>,
}

impl MatchContext {
    /// A root context: target set, everything else empty.
    pub fn new(target: Arc<Target>) -> Self {
        Self {
            target,
            image: None,
            unit: None,
            function: None,
        }
    }

    /// Copy of this context scoped to `image`.
    pub fn with_image(&self, image: Arc<Image>) -> Self {
        let mut scoped = self.clone();
        scoped.image = Some(image);
        scoped
    }

    /// Copy of this context scoped to `unit`.
    pub fn with_unit(&self, unit: Arc<CompilationUnit>) -> Self {
        let mut scoped = self.clone();
        scoped.unit = Some(unit);
        scoped
    }

    /// The scope covering exactly the fields this context has populated.
    pub fn populated_scope(&self) -> ScopeMask {
        let mut scope = ScopeMask::TARGET;
        if self.image.is_some() {
            scope |= ScopeMask::IMAGE;
        }
        if self.unit.is_some() {
            scope |= ScopeMask::COMP_UNIT;
        }
        if self.function.is_some() {
            scope |= ScopeMask::FUNCTION;
        }
        scope
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FileSpec, Image, Target};

    #[test]
    fn descent_extends_without_clearing() {
        let mut target = Target::new();
        let mut image = Image::new(FileSpec::new("a.so"));
        image.add_unit(CompilationUnit::new(FileSpec::new("x.c")));
        let id = target.add_image(image);
        let target = Arc::new(target);

        let root = MatchContext::new(Arc::clone(&target));
        assert_eq!(root.populated_scope(), ScopeMask::TARGET);

        let image = Arc::clone(target.image_at(id).unwrap());
        let unit = Arc::clone(&image.units()[0]);
        let at_image = root.with_image(image);
        let at_unit = at_image.with_unit(unit);

        assert_eq!(at_image.populated_scope(), ScopeMask::TARGET | ScopeMask::IMAGE);
        assert_eq!(
            at_unit.populated_scope(),
            ScopeMask::TARGET | ScopeMask::IMAGE | ScopeMask::COMP_UNIT
        );
        // The shallower copies are untouched by deeper descent.
        assert!(root.image.is_none());
        assert!(at_image.unit.is_none());
    }
}
