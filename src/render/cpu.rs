use std::path::Path;

use anyhow::Context;

use crate::atlas::texture::{Framebuffer, PixelRect, RasterJob, Texture, TextureFormat};
use crate::config::{MAX_ATLAS_EDGE, PackerOpts, SvgCacheOpts};
use crate::foundation::core::{Affine, BezPath, FillType, Point, Rgba};
use crate::foundation::error::{MathAnimError, MathAnimResult};

/// Atlas framebuffer backed by `vello_cpu` pixmaps, one per color attachment.
///
/// Pixels are premultiplied RGBA8. Attachment `i` is exposed as texture id `i + 1`; id `0`
/// stays reserved for the dummy texture.
pub struct CpuFramebuffer {
    width: u16,
    height: u16,
    attachments: Vec<vello_cpu::Pixmap>,
    max_attachments: usize,
}

impl CpuFramebuffer {
    /// Framebuffer with a single transparent attachment.
    pub fn new(width: u32, height: u32) -> MathAnimResult<Self> {
        if width == 0 || height == 0 || width > MAX_ATLAS_EDGE || height > MAX_ATLAS_EDGE {
            return Err(MathAnimError::validation(format!(
                "cpu framebuffer size {width}x{height} must be within 1..={MAX_ATLAS_EDGE}"
            )));
        }
        let (w, h) = (width as u16, height as u16);
        Ok(Self {
            width: w,
            height: h,
            attachments: vec![vello_cpu::Pixmap::new(w, h)],
            max_attachments: usize::MAX,
        })
    }

    /// Framebuffer sized for an [`crate::atlas::svg_cache::SvgCache`].
    pub fn for_cache(opts: &SvgCacheOpts) -> MathAnimResult<Self> {
        opts.validate()?;
        Self::new(opts.atlas_width, opts.atlas_height)
    }

    /// Framebuffer sized for a [`crate::atlas::packer::TexturePacker`].
    pub fn for_packer(opts: &PackerOpts) -> MathAnimResult<Self> {
        opts.validate()?;
        Self::new(opts.atlas_width, opts.atlas_height)
    }

    /// Cap the number of attachments `add_color_attachment` may create.
    pub fn with_max_attachments(mut self, max: usize) -> Self {
        self.max_attachments = max.max(1);
        self
    }

    /// Premultiplied RGBA8 bytes of an attachment, row-major.
    pub fn pixels(&self, attachment: usize) -> Option<&[u8]> {
        self.attachments.get(attachment).map(|p| p.data_as_u8_slice())
    }

    /// One premultiplied pixel.
    pub fn pixel(&self, attachment: usize, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= u32::from(self.width) || y >= u32::from(self.height) {
            return None;
        }
        let data = self.pixels(attachment)?;
        let i = (y as usize * usize::from(self.width) + x as usize) * 4;
        Some([data[i], data[i + 1], data[i + 2], data[i + 3]])
    }

    /// Straight-alpha RGBA8 copy of an attachment.
    pub fn to_rgba8_straight(&self, attachment: usize) -> Option<Vec<u8>> {
        let mut out = self.pixels(attachment)?.to_vec();
        unpremultiply_rgba8_in_place(&mut out);
        Some(out)
    }

    /// Write an attachment as a PNG file.
    pub fn save_png(&self, attachment: usize, path: &Path) -> MathAnimResult<()> {
        let data = self.to_rgba8_straight(attachment).ok_or_else(|| {
            MathAnimError::render(format!("no color attachment {attachment}"))
        })?;
        image::save_buffer_with_format(
            path,
            &data,
            u32::from(self.width),
            u32::from(self.height),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }

    fn clip(&self, region: PixelRect) -> PixelRect {
        let x0 = region.x.min(u32::from(self.width));
        let y0 = region.y.min(u32::from(self.height));
        let x1 = region.right().min(u32::from(self.width));
        let y1 = region.bottom().min(u32::from(self.height));
        PixelRect::new(x0, y0, x1 - x0, y1 - y0)
    }
}

impl Framebuffer for CpuFramebuffer {
    fn width(&self) -> u32 {
        u32::from(self.width)
    }

    fn height(&self) -> u32 {
        u32::from(self.height)
    }

    fn color_attachment_count(&self) -> usize {
        self.attachments.len()
    }

    fn add_color_attachment(&mut self) -> MathAnimResult<usize> {
        if self.attachments.len() >= self.max_attachments {
            return Err(MathAnimError::render(format!(
                "cpu framebuffer is limited to {} color attachments",
                self.max_attachments
            )));
        }
        self.attachments
            .push(vello_cpu::Pixmap::new(self.width, self.height));
        Ok(self.attachments.len() - 1)
    }

    fn texture(&self, attachment: usize) -> Option<Texture> {
        (attachment < self.attachments.len()).then(|| Texture {
            id: attachment as u32 + 1,
            width: u32::from(self.width),
            height: u32::from(self.height),
            format: TextureFormat::Rgba8,
        })
    }

    fn clear_color_attachment(&mut self, attachment: usize) {
        if let Some(p) = self.attachments.get_mut(attachment) {
            clear_pixmap(p, [0, 0, 0, 0]);
        }
    }

    fn clear_region(&mut self, attachment: usize, region: PixelRect) {
        let region = self.clip(region);
        let stride = usize::from(self.width) * 4;
        let Some(p) = self.attachments.get_mut(attachment) else {
            return;
        };
        let data = p.data_as_u8_slice_mut();
        for y in region.y..region.bottom() {
            let row = y as usize * stride;
            let start = row + region.x as usize * 4;
            let end = row + region.right() as usize * 4;
            data[start..end].fill(0);
        }
    }

    fn rasterize(&mut self, job: &RasterJob<'_>) -> MathAnimResult<()> {
        if job.attachment >= self.attachments.len() {
            return Err(MathAnimError::render(format!(
                "no color attachment {}",
                job.attachment
            )));
        }
        let region = self.clip(job.region);
        if region.width == 0 || region.height == 0 || job.object.is_empty() {
            return Ok(());
        }
        let (w, h) = (region.width as u16, region.height as u16);

        let to_tile =
            Affine::translate((-f64::from(region.x), -f64::from(region.y))) * job.transform;
        let path = bezpath_to_cpu(&job.object.to_bezpath());

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_transform(affine_to_cpu(to_tile));
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_fill_rule(match job.object.fill_type {
            FillType::NonZero => vello_cpu::peniko::Fill::NonZero,
            FillType::EvenOdd => vello_cpu::peniko::Fill::EvenOdd,
        });
        ctx.set_paint(color_to_cpu(job.fill));
        ctx.fill_path(&path);
        if let Some(stroke) = job.stroke {
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(stroke.width));
            ctx.set_paint(color_to_cpu(stroke.color));
            ctx.stroke_path(&path);
        }
        ctx.flush();

        let mut tile = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut tile);

        let stride = usize::from(self.width) * 4;
        let dst = self.attachments[job.attachment].data_as_u8_slice_mut();
        let src = tile.data_as_u8_slice();
        let tile_stride = usize::from(w) * 4;
        for (ty, src_row) in src.chunks_exact(tile_stride).enumerate() {
            let start = (region.y as usize + ty) * stride + region.x as usize * 4;
            over_in_place(&mut dst[start..start + tile_stride], src_row);
        }
        Ok(())
    }
}

fn color_to_cpu(c: Rgba) -> vello_cpu::peniko::Color {
    let [r, g, b, a] = c.to_rgba8();
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

/// Premultiplied source-over of `src` onto `dst`, both RGBA8 rows of equal length.
fn over_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let inv = 255 - u16::from(s[3]);
        if inv == 255 {
            continue;
        }
        for i in 0..4 {
            let v = u16::from(s[i]) + (u16::from(d[i]) * inv + 127) / 255;
            d[i] = v.min(255) as u8;
        }
    }
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
