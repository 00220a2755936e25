use crate::foundation::core::{Affine, Rect, Vec2};
use crate::svg::object::SvgObject;

/// A compound icon: several objects, each placed at an offset.
///
/// `unique_objects` keeps one copy per distinct name, for callers that share geometry between
/// repeated parts (glyph sets, repeated icon pieces).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SvgGroup {
    /// Member objects in drawing order.
    pub objects: Vec<SvgObject>,
    /// Placement of each member; parallel to `objects`.
    pub object_offsets: Vec<Vec2>,
    /// First object pushed under each distinct name.
    pub unique_objects: Vec<SvgObject>,
    /// Names parallel to `unique_objects`.
    pub unique_object_names: Vec<String>,
    /// Union of the placed member boxes.
    pub bbox: Rect,
}

impl SvgGroup {
    /// Empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `obj` at `offset`. The first object seen under `name` is also kept as unique.
    pub fn push_object(&mut self, name: &str, obj: SvgObject, offset: Vec2) {
        if !self.unique_object_names.iter().any(|n| n == name) {
            self.unique_object_names.push(name.to_owned());
            self.unique_objects.push(obj.clone());
        }
        self.objects.push(obj);
        self.object_offsets.push(offset);
    }

    /// Number of member objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// `true` when the group has no members.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Look up a unique object by name.
    pub fn unique_object(&self, name: &str) -> Option<&SvgObject> {
        self.unique_object_names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.unique_objects[i])
    }

    fn placed_boxes(&self) -> impl Iterator<Item = Rect> + '_ {
        self.objects
            .iter()
            .zip(&self.object_offsets)
            .filter(|(o, _)| !o.is_empty())
            .map(|(o, off)| o.bbox + *off)
    }

    /// Recompute and store the group box. Members must be finalized.
    pub fn calculate_bbox(&mut self) -> Rect {
        self.bbox = self
            .placed_boxes()
            .reduce(|acc, r| acc.union(r))
            .unwrap_or(Rect::ZERO);
        self.bbox
    }

    /// Map the group into a box of width 1 anchored at the origin, keeping the aspect ratio.
    ///
    /// Every member is re-based so its own bbox starts at the origin; offsets then place members
    /// relative to the group's box. A group with zero extent is left unchanged.
    pub fn normalize(&mut self) {
        let bbox = self.calculate_bbox();
        let extent = if bbox.width() > 0.0 {
            bbox.width()
        } else {
            bbox.height()
        };
        if extent <= 0.0 {
            return;
        }
        let inv = 1.0 / extent;
        let group_min = bbox.origin().to_vec2();

        for (obj, offset) in self.objects.iter_mut().zip(self.object_offsets.iter_mut()) {
            let own_min = obj.bbox.origin().to_vec2();
            *obj = obj.transformed(Affine::scale(inv) * Affine::translate(-own_min));
            *offset = (*offset + own_min - group_min) * inv;
        }
        for obj in &mut self.unique_objects {
            let own_min = obj.bbox.origin().to_vec2();
            *obj = obj.transformed(Affine::scale(inv) * Affine::translate(-own_min));
        }
        self.calculate_bbox();
    }

    /// Merge every placed member into one object, styled like the first member.
    pub fn flatten(&self) -> SvgObject {
        let mut out = SvgObject::create_default();
        if let Some(first) = self.objects.first() {
            out.fill_color = first.fill_color;
            out.fill_type = first.fill_type;
        }
        for (obj, offset) in self.objects.iter().zip(&self.object_offsets) {
            out.paths
                .extend(obj.transformed(Affine::translate(*offset)).paths);
        }
        if let Some(end) = out.paths.last().and_then(|p| p.last_point()) {
            out.cursor = end;
        }
        out.finalize();
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/svg/group.rs"]
mod tests;
