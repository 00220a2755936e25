//! Scene-side descriptors consumed by the raster cache.

/// Animation object descriptor.
pub mod anim_object;
