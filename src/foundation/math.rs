use kurbo::Point;

/// Tolerance for treating two points as coincident.
pub(crate) const POINT_EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

/// Fold `value` into `seed`, order-sensitive.
pub fn combine_hash(seed: u64, value: u64) -> u64 {
    let mut h = Fnv1a64::new(Fnv1a64::OFFSET_BASIS ^ seed.rotate_left(17));
    h.write_u64(seed);
    h.write_u64(value);
    h.finish()
}

/// Quantize a raster scale to three decimal places.
///
/// Scales that differ only by sub-millesimal jitter collapse to the same value.
pub fn quantize_scale(scale: f64) -> i64 {
    (scale * 1000.0).round() as i64
}

/// Cache key for an `(object id, scale)` pair.
pub fn cache_key(obj_id: u64, scale: f64) -> u64 {
    combine_hash(quantize_scale(scale) as u64, obj_id)
}

/// Round half up, the way split counts are rounded during interpolation.
pub(crate) fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

pub(crate) fn points_coincide(a: Point, b: Point) -> bool {
    (a - b).hypot2() <= POINT_EPSILON * POINT_EPSILON
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
