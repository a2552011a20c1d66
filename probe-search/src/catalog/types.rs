//! Catalog types: target, images, compilation units, function stubs,
//! and code addresses.

use std::sync::Arc;

use probe_core::types::collections::{FxHashMap, SmallVec2};
use probe_core::types::{FunctionId, ImageId, UnitId};

use super::file_spec::{FileSpec, FileSpecList, PathStyle};

/// A resolved code address within a loaded image.
///
/// Reserved for function/line-level constraints; the engine currently only
/// threads addresses through to filters and searchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    load_addr: u64,
}

impl Address {
    /// Create an address from a load address.
    pub fn new(load_addr: u64) -> Self {
        Self { load_addr }
    }

    /// The load address.
    pub fn load_address(&self) -> u64 {
        self.load_addr
    }
}

/// A function within a compilation unit.
///
/// Stub level: carried for identity only, never descended into.
#[derive(Debug, Clone)]
pub struct Function {
    name: String,
    id: FunctionId,
}

impl Function {
    /// The function name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Slot of this function within its owning unit.
    pub fn id(&self) -> FunctionId {
        self.id
    }
}

/// One source-level translation unit within an image.
#[derive(Debug, Clone)]
pub struct CompilationUnit {
    file: FileSpec,
    id: UnitId,
    functions: Vec<Arc<Function>>,
}

impl CompilationUnit {
    /// Create a unit for the given source file.
    ///
    /// The unit's slot is assigned when it is added to an image.
    pub fn new(file: FileSpec) -> Self {
        Self {
            file,
            id: UnitId::new(0),
            functions: Vec::new(),
        }
    }

    /// Add a function stub, returning its slot.
    pub fn add_function(&mut self, name: &str) -> FunctionId {
        let id = FunctionId::new(self.functions.len() as u32);
        self.functions.push(Arc::new(Function {
            name: name.to_string(),
            id,
        }));
        id
    }

    /// The unit's source file spec.
    pub fn file(&self) -> &FileSpec {
        &self.file
    }

    /// Slot of this unit within its owning image.
    pub fn id(&self) -> UnitId {
        self.id
    }

    /// The unit's function stubs, in declaration order.
    pub fn functions(&self) -> &[Arc<Function>] {
        &self.functions
    }
}

/// A loaded executable or shared module.
#[derive(Debug, Clone)]
pub struct Image {
    file: FileSpec,
    id: ImageId,
    units: Vec<Arc<CompilationUnit>>,
}

impl Image {
    /// Create an image for the given file spec.
    ///
    /// The image's slot is assigned when it is added to a target.
    pub fn new(file: FileSpec) -> Self {
        Self {
            file,
            id: ImageId::new(0),
            units: Vec::new(),
        }
    }

    /// Add a compilation unit, returning its slot.
    pub fn add_unit(&mut self, mut unit: CompilationUnit) -> UnitId {
        let id = UnitId::new(self.units.len() as u32);
        unit.id = id;
        self.units.push(Arc::new(unit));
        id
    }

    /// The image's resolved file spec.
    pub fn file(&self) -> &FileSpec {
        &self.file
    }

    /// Slot of this image within its owning target.
    pub fn id(&self) -> ImageId {
        self.id
    }

    /// Number of compilation units.
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Unit at the given slot, if in range.
    pub fn unit_at(&self, id: UnitId) -> Option<&Arc<CompilationUnit>> {
        self.units.get(id.index())
    }

    /// The image's units, in index order.
    pub fn units(&self) -> &[Arc<CompilationUnit>] {
        &self.units
    }
}

/// The debugging target owning the full image catalog.
///
/// The target is built up by the embedding host, then frozen behind an
/// `Arc` for the lifetime of the session. Searches treat it as a stable,
/// read-only snapshot; the host must not mutate it while a search is in
/// flight.
#[derive(Debug, Default)]
pub struct Target {
    images: Vec<Arc<Image>>,
    by_basename: FxHashMap<String, SmallVec2<ImageId>>,
    excluded_images: FileSpecList,
}

impl Target {
    /// Create an empty target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an image, returning its slot.
    pub fn add_image(&mut self, mut image: Image) -> ImageId {
        let id = ImageId::new(self.images.len() as u32);
        image.id = id;
        self.by_basename
            .entry(image.file.filename().to_string())
            .or_default()
            .push(id);
        self.images.push(Arc::new(image));
        id
    }

    /// Denylist an image for broad (non-image-specific) searches.
    pub fn exclude_image(&mut self, spec: FileSpec) {
        self.excluded_images.push(spec);
    }

    /// Number of loaded images.
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Image at the given slot, if in range.
    pub fn image_at(&self, id: ImageId) -> Option<&Arc<Image>> {
        self.images.get(id.index())
    }

    /// The loaded images, in load order.
    pub fn images(&self) -> &[Arc<Image>] {
        &self.images
    }

    /// Slots of all images whose filename is exactly `basename`.
    pub fn images_named(&self, basename: &str) -> &[ImageId] {
        self.by_basename
            .get(basename)
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the denylist excludes `spec` from broad searches.
    pub fn is_image_excluded(&self, spec: &FileSpec, style: PathStyle) -> bool {
        self.excluded_images.contains(spec, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_image(path: &str, units: &[&str]) -> Image {
        let mut image = Image::new(FileSpec::new(path));
        for unit in units {
            image.add_unit(CompilationUnit::new(FileSpec::new(unit)));
        }
        image
    }

    #[test]
    fn slots_are_assigned_in_insertion_order() {
        let mut target = Target::new();
        let a = target.add_image(make_image("/usr/lib/a.so", &["x.c", "y.c"]));
        let b = target.add_image(make_image("/usr/lib/b.so", &["z.c"]));

        assert_eq!(a, ImageId::new(0));
        assert_eq!(b, ImageId::new(1));
        let image = target.image_at(a).unwrap();
        assert_eq!(image.unit_count(), 2);
        assert_eq!(image.unit_at(UnitId::new(1)).unwrap().file().filename(), "y.c");
        assert!(target.image_at(ImageId::new(9)).is_none());
    }

    #[test]
    fn basename_index_finds_all_slots() {
        let mut target = Target::new();
        target.add_image(make_image("/usr/lib/a.so", &[]));
        target.add_image(make_image("/opt/lib/a.so", &[]));
        target.add_image(make_image("/usr/lib/b.so", &[]));

        assert_eq!(target.images_named("a.so"), &[ImageId::new(0), ImageId::new(1)]);
        assert!(target.images_named("missing.so").is_empty());
    }

    #[test]
    fn denylist_consults_the_exclusion_list() {
        let mut target = Target::new();
        target.exclude_image(FileSpec::new("linker.so"));

        let style = PathStyle::default();
        assert!(target.is_image_excluded(&FileSpec::new("/system/linker.so"), style));
        assert!(!target.is_image_excluded(&FileSpec::new("a.so"), style));
    }

    #[test]
    fn function_stubs_keep_identity_only() {
        let mut unit = CompilationUnit::new(FileSpec::new("x.c"));
        let id = unit.add_function("main");
        assert_eq!(unit.functions()[id.index()].name(), "main");
    }
}
