/// Row-packing state of one atlas attachment.
///
/// Quads are laid left to right along the current line; a quad that does not fit horizontally
/// starts a new line below the tallest quad of the current one. For every committed quad,
/// `top + height <= atlas height`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextureConstraint {
    /// Next free position (x along the line, y of the line top) in pixels.
    pub pos: (u32, u32),
    /// Height of the tallest quad on the current line.
    pub line_height: u32,
}

impl TextureConstraint {
    /// Empty attachment.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when a quad of `width` still fits on the current line.
    pub fn fits_in_line(&self, width: u32, atlas_width: u32) -> bool {
        self.pos.0.saturating_add(width) <= atlas_width
    }

    /// Advance along the current line past a quad of the given size.
    pub fn increment_current_x(&mut self, width: u32, height: u32) {
        self.pos.0 += width;
        self.line_height = self.line_height.max(height);
    }

    /// Start a new line below the current one.
    pub fn increment_current_y(&mut self) {
        self.pos = (0, self.pos.1 + self.line_height);
        self.line_height = 0;
    }

    /// Top-left corner for a quad of `size`, committing the placement.
    ///
    /// Returns `None` without changing state when the attachment has no room left.
    pub fn place(&mut self, size: (u32, u32), atlas: (u32, u32)) -> Option<(u32, u32)> {
        let (w, h) = size;
        if w > atlas.0 || h > atlas.1 {
            return None;
        }
        let mut next = *self;
        if !next.fits_in_line(w, atlas.0) {
            next.increment_current_y();
        }
        if next.pos.1.saturating_add(h) > atlas.1 {
            return None;
        }
        let at = next.pos;
        next.increment_current_x(w, h);
        *self = next;
        Some(at)
    }

    /// Forget every placement.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/atlas/shelf.rs"]
mod tests;
