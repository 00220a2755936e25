//! Timeline helpers: easing curves, morph clips and draw-on clips sampled by frame.

/// Easing curves.
pub mod ease;
/// Frame-sampled morph and draw-on clips.
pub mod morph;
