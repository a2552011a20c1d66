//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;

/// SmallVec optimized for path-spec lists (usually <4).
pub type SmallVec4<T> = SmallVec<[T; 4]>;

/// SmallVec optimized for per-basename image slots (usually <2).
pub type SmallVec2<T> = SmallVec<[T; 2]>;
