//! Atlas and cache options.
//!
//! Options deserialize from JSON with missing fields taking their defaults, and may be overridden
//! from the environment:
//!
//! - `MATHANIM_ATLAS_SIZE`: square atlas edge in pixels.
//! - `MATHANIM_ATLAS_ATTACHMENTS`: number of color attachments reserved up front.

use crate::foundation::error::{MathAnimError, MathAnimResult};

/// Largest atlas edge the CPU backend can allocate.
pub const MAX_ATLAS_EDGE: u32 = u16::MAX as u32;

fn env_u32(name: &str) -> Option<u32> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|&n| n > 0)
}

fn validate_atlas(width: u32, height: u32) -> MathAnimResult<()> {
    if width == 0 || height == 0 {
        return Err(MathAnimError::validation("atlas dimensions must be non-zero"));
    }
    if width > MAX_ATLAS_EDGE || height > MAX_ATLAS_EDGE {
        return Err(MathAnimError::validation(format!(
            "atlas dimensions must be <= {MAX_ATLAS_EDGE}"
        )));
    }
    Ok(())
}

/// Options for [`crate::atlas::svg_cache::SvgCache`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SvgCacheOpts {
    /// Attachment width in pixels.
    pub atlas_width: u32,
    /// Attachment height in pixels.
    pub atlas_height: u32,
    /// Color attachments filled before eviction starts.
    pub color_attachments: u32,
    /// Transparent border kept around every cached quad.
    pub padding_px: u32,
}

impl Default for SvgCacheOpts {
    fn default() -> Self {
        Self {
            atlas_width: 2048,
            atlas_height: 2048,
            color_attachments: 1,
            padding_px: 2,
        }
    }
}

impl SvgCacheOpts {
    /// Apply `MATHANIM_ATLAS_SIZE` / `MATHANIM_ATLAS_ATTACHMENTS` when set to positive integers.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(edge) = env_u32("MATHANIM_ATLAS_SIZE") {
            self.atlas_width = edge;
            self.atlas_height = edge;
        }
        if let Some(n) = env_u32("MATHANIM_ATLAS_ATTACHMENTS") {
            self.color_attachments = n;
        }
        self
    }

    /// Check the options are usable.
    pub fn validate(&self) -> MathAnimResult<()> {
        validate_atlas(self.atlas_width, self.atlas_height)?;
        if self.color_attachments == 0 {
            return Err(MathAnimError::validation(
                "color_attachments must be at least 1",
            ));
        }
        if u64::from(self.padding_px) * 2 >= u64::from(self.atlas_width.min(self.atlas_height)) {
            return Err(MathAnimError::validation(
                "padding_px leaves no room inside the atlas",
            ));
        }
        Ok(())
    }
}

/// Options for a standalone [`crate::atlas::packer::TexturePacker`] atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackerOpts {
    /// Attachment width in pixels.
    pub atlas_width: u32,
    /// Attachment height in pixels.
    pub atlas_height: u32,
}

impl Default for PackerOpts {
    fn default() -> Self {
        Self {
            atlas_width: 2048,
            atlas_height: 2048,
        }
    }
}

impl PackerOpts {
    /// Apply `MATHANIM_ATLAS_SIZE` when set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(edge) = env_u32("MATHANIM_ATLAS_SIZE") {
            self.atlas_width = edge;
            self.atlas_height = edge;
        }
        self
    }

    /// Check the options are usable.
    pub fn validate(&self) -> MathAnimResult<()> {
        validate_atlas(self.atlas_width, self.atlas_height)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
