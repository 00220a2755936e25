//! Vector path engine and texture-atlas raster cache for a 2D math-animation editor.
//!
//! Geometry lives in [`svg`]: curves, contours and [`SvgObject`]s built through an SVG-like
//! construction API, parsed from path data, imported from SVG documents and morphed between
//! shapes. [`SvgCache`] rasterizes objects into the color attachments of a [`Framebuffer`] and
//! hands back texture coordinates; [`CpuFramebuffer`] is the bundled CPU backend.
#![forbid(unsafe_code)]

pub mod animation;
pub mod atlas;
pub mod config;
pub mod foundation;
pub mod render;
pub mod scene;
pub mod svg;

pub use animation::{
    ease::Ease,
    morph::{DrawOn, Morph},
};
pub use atlas::{
    packer::TexturePacker,
    svg_cache::{SvgCache, SvgCacheEntry, SvgCacheStats},
    texture::{Framebuffer, PixelRect, RasterJob, StrokeStyle, Texture, TextureFormat},
};
pub use config::{PackerOpts, SvgCacheOpts};
pub use foundation::core::{
    Affine, BezPath, FillType, FrameIndex, FrameRange, Point, Rect, Rgba, Vec2,
};
pub use foundation::error::{MathAnimError, MathAnimResult};
pub use foundation::math::{cache_key, combine_hash};
pub use render::cpu::CpuFramebuffer;
pub use scene::anim_object::AnimObject;
pub use svg::{
    curve::{Curve, CurveKind},
    group::SvgGroup,
    interpolate::interpolate,
    object::SvgObject,
    parse::{parse_path, parse_path_into},
    path::Path,
    persist::{
        read_svg_file, read_svg_object, read_svg_object_or_default, write_svg_file,
        write_svg_object,
    },
    write::to_path_string,
};
