use crate::animation::ease::Ease;
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::math::combine_hash;
use crate::svg::interpolate::interpolate;
use crate::svg::object::SvgObject;

/// Shape morph between two objects over a frame range.
///
/// Sampling is a pure function of the frame, so the editor can scrub in either direction.
#[derive(Clone, Debug)]
pub struct Morph {
    /// Shape shown at and before the start of the range.
    pub src: SvgObject,
    /// Shape shown at and after the end of the range.
    pub dst: SvgObject,
    /// Frames over which the morph plays.
    pub range: FrameRange,
    /// Easing applied to linear progress.
    pub ease: Ease,
}

impl Morph {
    pub fn new(src: SvgObject, dst: SvgObject, range: FrameRange, ease: Ease) -> Self {
        Self {
            src,
            dst,
            range,
            ease,
        }
    }

    /// Eased interpolation parameter at `frame`; frames outside the range clamp to its ends.
    pub fn t_at(&self, frame: FrameIndex) -> f64 {
        self.ease.apply(self.range.progress(frame))
    }

    /// The in-between shape at `frame`.
    #[tracing::instrument(level = "trace", skip(self, frame), fields(frame = frame.0))]
    pub fn sample(&self, frame: FrameIndex) -> SvgObject {
        interpolate(&self.src, &self.dst, self.t_at(frame))
    }

    /// Cache id of the shape sampled at `frame`.
    ///
    /// Frames clamped to the same end of the range share an id, so the cache keeps one raster
    /// for the settled shape instead of one per frame.
    pub fn cache_id(&self, base_id: u64, frame: FrameIndex) -> u64 {
        clip_cache_id(self.range, base_id, frame)
    }
}

/// Draw-on clip: reveals the outline of `object` from nothing to complete over `range`.
#[derive(Clone, Debug)]
pub struct DrawOn {
    /// Shape whose outline is revealed.
    pub object: SvgObject,
    /// Frames over which the outline is drawn.
    pub range: FrameRange,
    /// Easing applied to linear progress.
    pub ease: Ease,
}

impl DrawOn {
    pub fn new(object: SvgObject, range: FrameRange, ease: Ease) -> Self {
        Self {
            object,
            range,
            ease,
        }
    }

    /// Fraction of the outline drawn at `frame`.
    pub fn percent_at(&self, frame: FrameIndex) -> f64 {
        self.ease.apply(self.range.progress(frame))
    }

    /// The visible part of the object at `frame`.
    pub fn sample(&self, frame: FrameIndex) -> SvgObject {
        let percent = self.percent_at(frame);
        if percent >= 1.0 {
            return self.object.clone();
        }
        self.object.trimmed(percent)
    }

    /// Cache id of the partial outline at `frame`; see [`Morph::cache_id`].
    pub fn cache_id(&self, base_id: u64, frame: FrameIndex) -> u64 {
        clip_cache_id(self.range, base_id, frame)
    }
}

fn clip_cache_id(range: FrameRange, base_id: u64, frame: FrameIndex) -> u64 {
    let last = range.end.0.saturating_sub(1).max(range.start.0);
    let clamped = frame.0.clamp(range.start.0, last);
    combine_hash(base_id, clamped - range.start.0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/morph.rs"]
mod tests;
