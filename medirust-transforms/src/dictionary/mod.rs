//! Dictionary-based wrappers around the array transforms.
//!
//! Every transform takes the `keys` it operates on and leaves other entries of
//! the [`DataDict`](crate::DataDict) untouched. Random transforms draw once per
//! call and apply the same decision to every key, so paired images and labels
//! stay aligned. Each `Xxxd` has `XxxD` and `XxxDict` aliases.

/// Declares the `XxxD` / `XxxDict` aliases of a dictionary transform.
macro_rules! dict_aliases {
    ($($name:ident => $upper:ident, $dict:ident;)*) => {
        $(
            pub type $upper = $name;
            pub type $dict = $name;
        )*
    };
}

/// Declares a dictionary transform that forwards every key to a
/// deterministic array transform held in `converter`.
macro_rules! map_transform {
    ($(#[$meta:meta])* $name:ident, $inner:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            keys: $crate::transform::KeysCollection,
            converter: $inner,
        }

        impl $crate::transform::Transform<$crate::transform::DataDict> for $name {
            fn apply(
                &mut self,
                data: $crate::transform::DataDict,
            ) -> Result<$crate::transform::DataDict, medirust_core::MediRustError> {
                let converter = &mut self.converter;
                $crate::transform::apply_to_keys(data, &self.keys, |_, img| {
                    $crate::transform::Transform::apply(converter, img)
                })
            }
        }
    };
}

pub mod intensity;
pub mod spatial;
pub mod utility;

pub use intensity::*;
pub use spatial::*;
pub use utility::*;
