use crate::atlas::texture::StrokeStyle;
use crate::foundation::core::{Affine, Rgba};
use crate::foundation::math::cache_key;

/// Column-major 4x4 identity.
pub const IDENTITY_4X4: [[f64; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// The parts of an animation object the raster cache reads.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimObject {
    /// Stable object id.
    pub id: u64,
    /// Object units to atlas pixels.
    pub svg_scale: f64,
    pub fill_color: Rgba,
    pub stroke_color: Rgba,
    /// Outline width in object units; `0` disables the outline.
    pub stroke_width: f64,
    /// Column-major world transform (`m[col][row]`).
    pub global_transform: [[f64; 4]; 4],
    pub position: [f64; 3],
    pub is_3d: bool,
}

impl Default for AnimObject {
    fn default() -> Self {
        Self {
            id: 0,
            svg_scale: 1.0,
            fill_color: Rgba::WHITE,
            stroke_color: Rgba::BLACK,
            stroke_width: 0.0,
            global_transform: IDENTITY_4X4,
            position: [0.0; 3],
            is_3d: false,
        }
    }
}

impl AnimObject {
    /// Default-styled object with the given id.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Builder-style scale override.
    pub fn with_scale(mut self, svg_scale: f64) -> Self {
        self.svg_scale = svg_scale;
        self
    }

    /// Key of this object's raster in an [`crate::atlas::svg_cache::SvgCache`].
    pub fn cache_key(&self) -> u64 {
        cache_key(self.id, self.svg_scale)
    }

    /// Outline style in atlas pixels, `None` when the object has no outline.
    pub fn stroke_style(&self) -> Option<StrokeStyle> {
        (self.stroke_width > 0.0 && self.stroke_color.a > 0.0).then(|| StrokeStyle {
            color: self.stroke_color,
            width: self.stroke_width * self.svg_scale,
        })
    }

    /// The xy part of the world transform, for placing the cached quad on a 2D canvas.
    pub fn transform_2d(&self) -> Affine {
        let m = &self.global_transform;
        Affine::new([m[0][0], m[0][1], m[1][0], m[1][1], m[3][0], m[3][1]])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/anim_object.rs"]
mod tests;
