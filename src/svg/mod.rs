//! Vector path engine: curves, contours, objects and everything that builds or transforms them.

/// Elliptical arc conversion.
pub mod arc;
/// Path-construction API on [`object::SvgObject`].
pub mod builder;
/// Single segments and their geometry.
pub mod curve;
/// Compound objects with placement offsets.
pub mod group;
/// SVG document import.
pub mod import;
/// Morphing between objects.
pub mod interpolate;
/// The object type.
pub mod object;
/// SVG path-data parser.
pub mod parse;
/// One contour.
pub mod path;
/// Binary and serde persistence.
pub mod persist;
/// SVG path-data writer.
pub mod write;
