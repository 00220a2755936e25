use std::collections::HashMap;

use crate::atlas::shelf::TextureConstraint;
use crate::atlas::texture::{Framebuffer, PixelRect};
use crate::foundation::core::Vec2;
use crate::foundation::error::MathAnimResult;

#[derive(Clone, Copy, Debug)]
struct PackedQuad {
    attachment: usize,
    region: PixelRect,
    uv_min: Vec2,
    uv_max: Vec2,
}

/// Shelf packer over the color attachments of a framebuffer.
///
/// Quads are keyed by caller-chosen ids. When every attachment is full the framebuffer grows by
/// one attachment.
pub struct TexturePacker<F: Framebuffer> {
    framebuffer: F,
    shelves: Vec<TextureConstraint>,
    quads: HashMap<u64, PackedQuad>,
}

impl<F: Framebuffer> TexturePacker<F> {
    /// Packer over `framebuffer`; an attachment is allocated when it has none.
    pub fn new(mut framebuffer: F) -> MathAnimResult<Self> {
        if framebuffer.color_attachment_count() == 0 {
            framebuffer.add_color_attachment()?;
        }
        let shelves = vec![TextureConstraint::new(); framebuffer.color_attachment_count()];
        Ok(Self {
            framebuffer,
            shelves,
            quads: HashMap::new(),
        })
    }

    fn atlas(&self) -> (u32, u32) {
        (self.framebuffer.width(), self.framebuffer.height())
    }

    /// Reserve a `size` quad under `key`.
    ///
    /// Returns `false` when the quad can never fit an attachment or the framebuffer refuses to
    /// grow. Re-inserting a known key keeps the original placement.
    pub fn insert(&mut self, key: u64, size: (u32, u32)) -> bool {
        if self.quads.contains_key(&key) {
            return true;
        }
        let atlas = self.atlas();
        if size.0 > atlas.0 || size.1 > atlas.1 {
            return false;
        }

        let mut placed = None;
        for (i, shelf) in self.shelves.iter_mut().enumerate() {
            if let Some(at) = shelf.place(size, atlas) {
                placed = Some((i, at));
                break;
            }
        }
        let (attachment, at) = match placed {
            Some(p) => p,
            None => {
                let attachment = match self.framebuffer.add_color_attachment() {
                    Ok(i) => i,
                    Err(err) => {
                        tracing::warn!(error = %err, "texture packer could not grow framebuffer");
                        return false;
                    }
                };
                self.shelves
                    .resize(self.framebuffer.color_attachment_count(), TextureConstraint::new());
                tracing::debug!(attachment, "texture packer grew framebuffer");
                let Some(at) = self.shelves[attachment].place(size, atlas) else {
                    return false;
                };
                (attachment, at)
            }
        };

        let region = PixelRect::new(at.0, at.1, size.0, size.1);
        let (uv_min, uv_max) = region.uv(atlas.0, atlas.1);
        self.quads.insert(
            key,
            PackedQuad {
                attachment,
                region,
                uv_min,
                uv_max,
            },
        );
        true
    }

    /// Top-left texture coordinate of a packed quad.
    pub fn uv_min(&self, key: u64) -> Option<Vec2> {
        self.quads.get(&key).map(|q| q.uv_min)
    }

    /// Bottom-right texture coordinate of a packed quad.
    pub fn uv_max(&self, key: u64) -> Option<Vec2> {
        self.quads.get(&key).map(|q| q.uv_max)
    }

    /// Texture id of the attachment holding a packed quad.
    pub fn texture_id(&self, key: u64) -> Option<u32> {
        let q = self.quads.get(&key)?;
        self.framebuffer.texture(q.attachment).map(|t| t.id)
    }

    /// Attachment index and pixel region of a packed quad.
    pub fn region(&self, key: u64) -> Option<(usize, PixelRect)> {
        self.quads.get(&key).map(|q| (q.attachment, q.region))
    }

    /// Number of packed quads.
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    /// `true` when nothing is packed.
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Forget every quad. Attachments stay allocated.
    pub fn clear_all_quads(&mut self) {
        self.quads.clear();
        for shelf in &mut self.shelves {
            shelf.reset();
        }
    }

    /// The underlying framebuffer.
    pub fn framebuffer(&self) -> &F {
        &self.framebuffer
    }

    /// Mutable access for drawing into packed regions.
    pub fn framebuffer_mut(&mut self) -> &mut F {
        &mut self.framebuffer
    }
}

#[cfg(test)]
#[path = "../../tests/unit/atlas/packer.rs"]
mod tests;
