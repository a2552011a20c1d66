//! Index-based ID types for type-safe catalog slots.
//!
//! Each ID type wraps the owning container's `u32` slot index to prevent
//! cross-type confusion. A `UnitId` cannot be accidentally used where an
//! `ImageId` is expected.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Create a new ID from a slot index.
            pub fn new(index: u32) -> Self {
                Self(index)
            }

            /// Get the slot index as a `usize` for container access.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<u32> for $name {
            fn from(index: u32) -> Self {
                Self(index)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Slot of an image in its target's ordered image list.
    ImageId
);

define_id!(
    /// Slot of a compilation unit in its image's ordered unit list.
    UnitId
);

define_id!(
    /// Slot of a function in its compilation unit's function list.
    FunctionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let image = ImageId::new(3);
        let unit = UnitId::new(3);
        assert_eq!(image.index(), unit.index());
        assert_eq!(u32::from(image), 3);
        assert_eq!(ImageId::from(3u32), image);
    }
}
