//! The loaded-code catalog: a target owning ordered images, each image
//! owning ordered compilation units, each unit owning stub functions.
//!
//! The catalog is read-only for the duration of a search. Population and
//! update (image load/unload events) belong to the embedding host, not to
//! this crate.

pub mod file_spec;
pub mod types;

pub use file_spec::{FileSpec, FileSpecList, PathStyle};
pub use types::{Address, CompilationUnit, Function, Image, Target};
