use std::collections::{HashMap, VecDeque};

use crate::atlas::shelf::TextureConstraint;
use crate::atlas::texture::{Framebuffer, PixelRect, RasterJob, Texture};
use crate::config::SvgCacheOpts;
use crate::foundation::core::{Affine, Vec2};
use crate::foundation::error::{MathAnimError, MathAnimResult};
use crate::foundation::math::cache_key;
use crate::scene::anim_object::AnimObject;
use crate::svg::object::SvgObject;

/// Where a cached object lives in the atlas, as handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SvgCacheEntry {
    /// Top-left of the raster in normalized texture coordinates.
    pub tex_coords_min: Vec2,
    /// Bottom-right of the raster in normalized texture coordinates.
    pub tex_coords_max: Vec2,
    /// Atlas page holding the raster.
    pub texture: Texture,
}

impl SvgCacheEntry {
    /// The full 1x1 white dummy texture, returned for objects that are not cached.
    pub fn dummy() -> Self {
        Self {
            tex_coords_min: Vec2::ZERO,
            tex_coords_max: Vec2::new(1.0, 1.0),
            texture: Texture::dummy(),
        }
    }

    /// `true` when this is the miss placeholder.
    pub fn is_dummy(&self) -> bool {
        self.texture.is_dummy()
    }
}

/// Cache counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SvgCacheStats {
    /// `get` calls that found an entry.
    pub hits: u64,
    /// `get` calls that fell back to the dummy texture.
    pub misses: u64,
    /// Objects drawn into the atlas.
    pub rasterizations: u64,
    /// LRU entries dropped to make room.
    pub evictions: u64,
    /// `put` calls that found no room at all.
    pub rejected: u64,
}

/// Atlas space owned by one entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CacheSlot {
    color_attachment: usize,
    texture_offset: (u32, u32),
    allotted_size: (u32, u32),
}

impl CacheSlot {
    fn fits(&self, size: (u32, u32)) -> bool {
        size.0 <= self.allotted_size.0 && size.1 <= self.allotted_size.1
    }

    fn rect(&self) -> PixelRect {
        PixelRect::new(
            self.texture_offset.0,
            self.texture_offset.1,
            self.allotted_size.0,
            self.allotted_size.1,
        )
    }
}

#[derive(Clone, Copy, Debug)]
struct SvgCacheEntryInternal {
    obj_id: u64,
    tex_coords_min: Vec2,
    tex_coords_max: Vec2,
    svg_size: (u32, u32),
    slot: CacheSlot,
    texture: Texture,
}

impl SvgCacheEntryInternal {
    fn public(&self) -> SvgCacheEntry {
        SvgCacheEntry {
            tex_coords_min: self.tex_coords_min,
            tex_coords_max: self.tex_coords_max,
            texture: self.texture,
        }
    }
}

/// Rasterized objects packed into the color attachments of a framebuffer.
///
/// Entries are keyed by `(object id, scale)`. New entries are laid out on shelves across the
/// configured attachments; once those are full, space is reclaimed from removed entries first
/// and then from the least recently used entry whose slot is large enough.
pub struct SvgCache<F: Framebuffer> {
    framebuffer: F,
    opts: SvgCacheOpts,
    entries: HashMap<u64, SvgCacheEntryInternal>,
    lru: VecDeque<u64>,
    freed: Vec<CacheSlot>,
    shelf: TextureConstraint,
    current_attachment: usize,
    warned_full: bool,
    stats: SvgCacheStats,
}

impl<F: Framebuffer> SvgCache<F> {
    /// Cache drawing into `framebuffer`, whose size must match `opts`.
    ///
    /// Missing attachments up to `opts.color_attachments` are allocated here.
    pub fn new(mut framebuffer: F, opts: SvgCacheOpts) -> MathAnimResult<Self> {
        opts.validate()?;
        if framebuffer.width() != opts.atlas_width || framebuffer.height() != opts.atlas_height {
            return Err(MathAnimError::validation(format!(
                "framebuffer is {}x{} but cache options ask for {}x{}",
                framebuffer.width(),
                framebuffer.height(),
                opts.atlas_width,
                opts.atlas_height
            )));
        }
        while framebuffer.color_attachment_count() < opts.color_attachments as usize {
            framebuffer.add_color_attachment()?;
        }
        Ok(Self {
            framebuffer,
            opts,
            entries: HashMap::new(),
            lru: VecDeque::new(),
            freed: Vec::new(),
            shelf: TextureConstraint::new(),
            current_attachment: 0,
            warned_full: false,
            stats: SvgCacheStats::default(),
        })
    }

    fn atlas(&self) -> (u32, u32) {
        (self.opts.atlas_width, self.opts.atlas_height)
    }

    fn touch(&mut self, key: u64) {
        if let Some(pos) = self.lru.iter().position(|x| *x == key) {
            self.lru.remove(pos);
        }
        self.lru.push_back(key);
    }

    fn forget(&mut self, key: u64) -> Option<SvgCacheEntryInternal> {
        let entry = self.entries.remove(&key)?;
        if let Some(pos) = self.lru.iter().position(|x| *x == key) {
            self.lru.remove(pos);
        }
        Some(entry)
    }

    /// New space on the shelves, moving on to the next configured attachment when the current
    /// one is vertically full.
    fn place_on_shelf(&mut self, size: (u32, u32)) -> Option<CacheSlot> {
        let atlas = self.atlas();
        loop {
            if let Some(at) = self.shelf.place(size, atlas) {
                return Some(CacheSlot {
                    color_attachment: self.current_attachment,
                    texture_offset: at,
                    allotted_size: size,
                });
            }
            if self.current_attachment + 1 >= self.opts.color_attachments as usize {
                return None;
            }
            self.current_attachment += 1;
            self.shelf.reset();
            tracing::debug!(
                attachment = self.current_attachment,
                "svg cache moved to next color attachment"
            );
        }
    }

    /// Reuse a freed slot, or evict the oldest entry whose slot is large enough.
    fn reclaim_slot(&mut self, size: (u32, u32)) -> Option<CacheSlot> {
        if let Some(i) = self.freed.iter().position(|s| s.fits(size)) {
            return Some(self.freed.remove(i));
        }
        let victim = self
            .lru
            .iter()
            .copied()
            .find(|k| self.entries.get(k).is_some_and(|e| e.slot.fits(size)))?;
        let evicted = self.forget(victim)?;
        self.stats.evictions = self.stats.evictions.saturating_add(1);
        tracing::debug!(
            key = victim,
            obj_id = evicted.obj_id,
            "evicted svg cache entry"
        );
        Some(evicted.slot)
    }

    fn reject(&mut self, size: (u32, u32)) -> SvgCacheEntry {
        self.stats.rejected = self.stats.rejected.saturating_add(1);
        if !self.warned_full {
            self.warned_full = true;
            tracing::warn!(
                width = size.0,
                height = size.1,
                "svg cache atlas is full; uncached objects fall back to the dummy texture"
            );
        }
        SvgCacheEntry::dummy()
    }

    /// Rasterize `svg` for `anim` and store it, replacing any entry for the same key.
    ///
    /// `svg` must be finalized. When no atlas space can be found the object is not cached and
    /// the dummy entry is returned.
    #[tracing::instrument(
        level = "debug",
        skip(self, anim, svg),
        fields(obj_id = anim.id, scale = anim.svg_scale)
    )]
    pub fn put(&mut self, anim: &AnimObject, svg: &SvgObject) -> MathAnimResult<SvgCacheEntry> {
        let scale = anim.svg_scale;
        if !(scale.is_finite() && scale > 0.0) {
            return Err(MathAnimError::validation(format!(
                "svg_scale must be finite and > 0, got {scale}"
            )));
        }
        let key = anim.cache_key();
        let stroke = anim.stroke_style();
        // The outline straddles the fill boundary; half of it lies outside the bbox.
        let stroke_px = stroke.map_or(0.0, |s| s.width);
        let svg_size = (
            (svg.bbox.width() * scale + stroke_px).ceil().max(1.0) as u32,
            (svg.bbox.height() * scale + stroke_px).ceil().max(1.0) as u32,
        );
        let pad = self.opts.padding_px;
        let allotted = (
            svg_size.0.saturating_add(2 * pad),
            svg_size.1.saturating_add(2 * pad),
        );

        let mut slot = None;
        if let Some(old) = self.forget(key) {
            if old.slot.fits(allotted) {
                slot = Some(old.slot);
            } else {
                self.framebuffer
                    .clear_region(old.slot.color_attachment, old.slot.rect());
                self.freed.push(old.slot);
            }
        }

        let atlas = self.atlas();
        if allotted.0 > atlas.0 || allotted.1 > atlas.1 {
            return Ok(self.reject(allotted));
        }
        let slot = match slot
            .or_else(|| self.place_on_shelf(allotted))
            .or_else(|| self.reclaim_slot(allotted))
        {
            Some(s) => s,
            None => return Ok(self.reject(allotted)),
        };

        self.framebuffer
            .clear_region(slot.color_attachment, slot.rect());
        let region = PixelRect::new(
            slot.texture_offset.0 + pad,
            slot.texture_offset.1 + pad,
            svg_size.0,
            svg_size.1,
        );
        let inset = stroke_px * 0.5;
        let transform =
            Affine::translate((f64::from(region.x) + inset, f64::from(region.y) + inset))
            * Affine::scale(scale)
            * Affine::translate(-svg.bbox.origin().to_vec2());
        let job = RasterJob {
            object: svg,
            attachment: slot.color_attachment,
            region,
            transform,
            fill: anim.fill_color,
            stroke,
        };
        let rasterized = self.framebuffer.rasterize(&job).and_then(|()| {
            self.framebuffer
                .texture(slot.color_attachment)
                .ok_or_else(|| MathAnimError::render("cache attachment has no texture"))
        });
        let texture = match rasterized {
            Ok(t) => t,
            Err(err) => {
                self.freed.push(slot);
                return Err(err);
            }
        };

        let (tex_coords_min, tex_coords_max) = region.uv(atlas.0, atlas.1);
        let entry = SvgCacheEntryInternal {
            obj_id: anim.id,
            tex_coords_min,
            tex_coords_max,
            svg_size,
            slot,
            texture,
        };
        self.entries.insert(key, entry);
        self.touch(key);
        self.stats.rasterizations = self.stats.rasterizations.saturating_add(1);
        tracing::debug!(
            key,
            attachment = slot.color_attachment,
            x = slot.texture_offset.0,
            y = slot.texture_offset.1,
            width = entry.svg_size.0,
            height = entry.svg_size.1,
            "cached svg object"
        );
        Ok(entry.public())
    }

    /// Cached entry for `anim`, rasterizing `svg` first when it is not cached yet.
    pub fn get_or_create_if_not_exist(
        &mut self,
        anim: &AnimObject,
        svg: &SvgObject,
    ) -> MathAnimResult<SvgCacheEntry> {
        if self.exists(anim.id, anim.svg_scale) {
            return Ok(self.get(anim.id, anim.svg_scale));
        }
        self.put(anim, svg)
    }

    /// Entry for `(obj_id, scale)`, or the dummy entry when not cached.
    pub fn get(&mut self, obj_id: u64, scale: f64) -> SvgCacheEntry {
        let key = cache_key(obj_id, scale);
        match self.entries.get(&key).map(SvgCacheEntryInternal::public) {
            Some(entry) => {
                self.touch(key);
                self.stats.hits = self.stats.hits.saturating_add(1);
                entry
            }
            None => {
                self.stats.misses = self.stats.misses.saturating_add(1);
                SvgCacheEntry::dummy()
            }
        }
    }

    /// `true` when `(obj_id, scale)` is cached. Does not count as a use.
    pub fn exists(&self, obj_id: u64, scale: f64) -> bool {
        self.entries.contains_key(&cache_key(obj_id, scale))
    }

    /// Drop every entry of `obj_id`, at any scale, and return how many were dropped.
    pub fn remove_object(&mut self, obj_id: u64) -> usize {
        let keys: Vec<u64> = self
            .lru
            .iter()
            .copied()
            .filter(|k| self.entries.get(k).is_some_and(|e| e.obj_id == obj_id))
            .collect();
        for &key in &keys {
            if let Some(entry) = self.forget(key) {
                self.framebuffer
                    .clear_region(entry.slot.color_attachment, entry.slot.rect());
                self.freed.push(entry.slot);
            }
        }
        if !keys.is_empty() {
            tracing::debug!(obj_id, removed = keys.len(), "removed svg cache entries");
        }
        keys.len()
    }

    /// Drop every entry and wipe the configured attachments.
    pub fn clear_all(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.freed.clear();
        self.shelf.reset();
        self.current_attachment = 0;
        self.warned_full = false;
        for i in 0..self.framebuffer.color_attachment_count() {
            self.framebuffer.clear_color_attachment(i);
        }
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counters accumulated since construction.
    pub fn stats(&self) -> SvgCacheStats {
        self.stats
    }

    /// Options the cache was built with.
    pub fn opts(&self) -> &SvgCacheOpts {
        &self.opts
    }

    /// The framebuffer holding the atlas.
    pub fn framebuffer(&self) -> &F {
        &self.framebuffer
    }

    /// Mutable framebuffer access. Writes into cached regions are not tracked.
    pub fn framebuffer_mut(&mut self) -> &mut F {
        &mut self.framebuffer
    }
}

#[cfg(test)]
#[path = "../../tests/unit/atlas/svg_cache.rs"]
mod tests;
