//! Texture atlas: the framebuffer abstraction, shelf packing and the raster cache.

/// Generic shelf packer.
pub mod packer;
/// Per-attachment row packing state.
pub mod shelf;
/// LRU raster cache for vector objects.
pub mod svg_cache;
/// Texture handles and the framebuffer trait.
pub mod texture;

#[cfg(test)]
#[path = "../../tests/unit/atlas/recording.rs"]
pub(crate) mod recording;
