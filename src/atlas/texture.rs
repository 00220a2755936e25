use crate::foundation::core::{Affine, Rgba, Vec2};
use crate::foundation::error::MathAnimResult;
use crate::svg::object::SvgObject;

/// Pixel format of an atlas texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TextureFormat {
    /// 8-bit premultiplied RGBA.
    Rgba8,
}

/// Handle to a texture owned by a [`Framebuffer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Texture {
    /// Backend texture id. `0` is the 1x1 white dummy.
    pub id: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel format.
    pub format: TextureFormat,
}

impl Texture {
    /// Reserved id of the dummy texture.
    pub const DUMMY_ID: u32 = 0;

    /// The 1x1 white texture handed out on cache misses.
    pub const fn dummy() -> Self {
        Self {
            id: Self::DUMMY_ID,
            width: 1,
            height: 1,
            format: TextureFormat::Rgba8,
        }
    }

    /// `true` for the dummy texture.
    pub fn is_dummy(&self) -> bool {
        self.id == Self::DUMMY_ID
    }
}

/// Integer pixel rectangle inside an atlas attachment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// `true` when `(x, y)` lies inside the rectangle.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Normalized `(min, max)` texture coordinates within an atlas of the given size.
    pub fn uv(&self, atlas_width: u32, atlas_height: u32) -> (Vec2, Vec2) {
        let (w, h) = (f64::from(atlas_width), f64::from(atlas_height));
        (
            Vec2::new(f64::from(self.x) / w, f64::from(self.y) / h),
            Vec2::new(f64::from(self.right()) / w, f64::from(self.bottom()) / h),
        )
    }
}

/// Stroke styling for a rasterized outline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Rgba,
    /// Width in atlas pixels.
    pub width: f64,
}

/// One rasterization request: draw `object` through `transform` into `region`.
#[derive(Clone, Copy, Debug)]
pub struct RasterJob<'a> {
    /// Geometry to draw, filled with the object's fill rule.
    pub object: &'a SvgObject,
    /// Target color attachment.
    pub attachment: usize,
    /// Pixels the job may touch; drawing outside is clipped.
    pub region: PixelRect,
    /// Object space to attachment pixel space.
    pub transform: Affine,
    /// Fill color.
    pub fill: Rgba,
    /// Optional outline.
    pub stroke: Option<StrokeStyle>,
}

/// Render target backing an atlas: equally sized color attachments the cache draws into.
pub trait Framebuffer {
    /// Attachment width in pixels.
    fn width(&self) -> u32;

    /// Attachment height in pixels.
    fn height(&self) -> u32;

    /// Number of color attachments currently allocated.
    fn color_attachment_count(&self) -> usize;

    /// Allocate one more color attachment and return its index.
    fn add_color_attachment(&mut self) -> MathAnimResult<usize>;

    /// Texture handle of an attachment, `None` when out of range.
    fn texture(&self, attachment: usize) -> Option<Texture>;

    /// Reset a whole attachment to transparent.
    fn clear_color_attachment(&mut self, attachment: usize);

    /// Reset a region of an attachment to transparent.
    fn clear_region(&mut self, attachment: usize, region: PixelRect);

    /// Rasterize a job into its attachment.
    fn rasterize(&mut self, job: &RasterJob<'_>) -> MathAnimResult<()>;
}

#[cfg(test)]
#[path = "../../tests/unit/atlas/texture.rs"]
mod tests;
