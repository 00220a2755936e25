use super::*;
use crate::atlas::recording::RecordingFramebuffer;
use crate::foundation::core::Rect;
use crate::svg::parse::parse_path;

fn rect_obj(x: f64, y: f64, w: f64, h: f64) -> SvgObject {
    parse_path(&format!("M{x} {y} h{w} v{h} h{} Z", -w)).unwrap()
}

fn opts(edge: u32, attachments: u32, pad: u32) -> SvgCacheOpts {
    SvgCacheOpts {
        atlas_width: edge,
        atlas_height: edge,
        color_attachments: attachments,
        padding_px: pad,
    }
}

fn cache(edge: u32, attachments: u32, pad: u32) -> SvgCache<RecordingFramebuffer> {
    SvgCache::new(
        RecordingFramebuffer::new(edge, edge, 1),
        opts(edge, attachments, pad),
    )
    .unwrap()
}

#[test]
fn put_rasterizes_into_padded_region() {
    let mut c = cache(64, 1, 2);
    let anim = AnimObject::new(1);
    let svg = rect_obj(10.0, 20.0, 28.0, 12.0);

    let e = c.put(&anim, &svg).unwrap();
    assert_eq!(e.texture.id, 1);
    assert_eq!(e.tex_coords_min, Vec2::new(2.0 / 64.0, 2.0 / 64.0));
    assert_eq!(e.tex_coords_max, Vec2::new(30.0 / 64.0, 14.0 / 64.0));

    let fb = c.framebuffer();
    assert_eq!(fb.jobs.len(), 1);
    assert_eq!(fb.jobs[0].region, PixelRect::new(2, 2, 28, 12));
    assert_eq!(fb.jobs[0].drawn, Rect::new(2.0, 2.0, 30.0, 14.0));
    assert_eq!(fb.cleared_regions, vec![(0, PixelRect::new(0, 0, 32, 16))]);
}

#[test]
fn scale_enlarges_the_raster() {
    let mut c = cache(64, 1, 0);
    let anim = AnimObject::new(1).with_scale(2.5);
    c.put(&anim, &rect_obj(0.0, 0.0, 4.0, 3.0)).unwrap();
    // 10 x 7.5 rounds up to 10 x 8 pixels.
    assert_eq!(c.framebuffer().jobs[0].region, PixelRect::new(0, 0, 10, 8));
}

#[test]
fn stroke_width_widens_the_raster() {
    let mut c = cache(64, 1, 2);
    let mut anim = AnimObject::new(1).with_scale(2.0);
    anim.stroke_width = 3.0;
    c.put(&anim, &rect_obj(0.0, 0.0, 10.0, 10.0)).unwrap();

    // 20 px of fill plus 6 px of outline, the fill inset by half the outline.
    let job = &c.framebuffer().jobs[0];
    assert_eq!(job.region, PixelRect::new(2, 2, 26, 26));
    assert_eq!(job.drawn, Rect::new(5.0, 5.0, 25.0, 25.0));
}

#[test]
fn get_or_create_rasterizes_once() {
    let mut c = cache(64, 1, 2);
    let anim = AnimObject::new(7);
    let svg = rect_obj(0.0, 0.0, 10.0, 10.0);

    let a = c.get_or_create_if_not_exist(&anim, &svg).unwrap();
    let b = c.get_or_create_if_not_exist(&anim, &svg).unwrap();
    assert_eq!(a, b);
    assert_eq!(c.framebuffer().jobs.len(), 1);
    assert_eq!(c.stats().rasterizations, 1);
    assert_eq!(c.stats().hits, 1);
    assert!(c.exists(7, 1.0));
    assert!(c.exists(7, 1.0000001));
    assert!(!c.exists(7, 2.0));
}

#[test]
fn unknown_key_returns_dummy() {
    let mut c = cache(64, 1, 2);
    let e = c.get(42, 1.0);
    assert!(e.is_dummy());
    assert_eq!(e.texture.id, 0);
    assert_eq!(e.tex_coords_min, Vec2::ZERO);
    assert_eq!(e.tex_coords_max, Vec2::new(1.0, 1.0));
    assert_eq!(c.stats().misses, 1);
}

#[test]
fn evicts_least_recently_used_fitting_entry() {
    let mut c = cache(64, 1, 2);
    let svg = rect_obj(0.0, 0.0, 28.0, 28.0);
    for id in 1..=4 {
        c.put(&AnimObject::new(id), &svg).unwrap();
    }
    // Touch 1 so 2 becomes the oldest.
    c.get(1, 1.0);
    let slot_of_2 = c.framebuffer().jobs[1].region;

    let e = c.put(&AnimObject::new(5), &svg).unwrap();
    assert!(!e.is_dummy());
    assert!(!c.exists(2, 1.0));
    assert!(c.exists(1, 1.0) && c.exists(3, 1.0) && c.exists(4, 1.0) && c.exists(5, 1.0));
    assert_eq!(c.framebuffer().jobs[4].region, slot_of_2);
    assert_eq!(c.stats().evictions, 1);
}

#[test]
fn eviction_skips_slots_that_are_too_small() {
    let mut c = cache(64, 1, 0);
    c.put(&AnimObject::new(1), &rect_obj(0.0, 0.0, 32.0, 32.0)).unwrap();
    c.put(&AnimObject::new(2), &rect_obj(0.0, 0.0, 32.0, 32.0)).unwrap();
    c.put(&AnimObject::new(3), &rect_obj(0.0, 0.0, 64.0, 32.0)).unwrap();

    c.put(&AnimObject::new(4), &rect_obj(0.0, 0.0, 64.0, 32.0)).unwrap();
    assert!(c.exists(1, 1.0) && c.exists(2, 1.0));
    assert!(!c.exists(3, 1.0));
    assert_eq!(c.framebuffer().jobs[3].region, PixelRect::new(0, 32, 64, 32));
}

#[test]
fn removed_objects_free_their_slots_first() {
    let mut c = cache(64, 1, 2);
    let svg = rect_obj(0.0, 0.0, 28.0, 28.0);
    c.put(&AnimObject::new(1), &svg).unwrap();
    c.put(&AnimObject::new(2), &svg).unwrap();
    c.put(&AnimObject::new(3), &svg).unwrap();
    c.put(&AnimObject::new(3).with_scale(0.5), &svg).unwrap();
    assert_eq!(c.remove_object(3), 2);
    assert!(!c.exists(3, 1.0) && !c.exists(3, 0.5));

    // The shelves are full; the first freed slot large enough is reused.
    c.put(&AnimObject::new(9), &svg).unwrap();
    assert_eq!(c.stats().evictions, 0);
    assert_eq!(c.framebuffer().jobs[4].region, PixelRect::new(2, 34, 28, 28));
    assert_eq!(c.len(), 3);
    assert_eq!(c.remove_object(1234), 0);
}

#[test]
fn full_atlas_warns_and_falls_back_to_dummy() {
    let mut c = cache(32, 1, 0);
    c.put(&AnimObject::new(1), &rect_obj(0.0, 0.0, 32.0, 16.0)).unwrap();
    c.put(&AnimObject::new(2), &rect_obj(0.0, 0.0, 16.0, 16.0)).unwrap();
    c.put(&AnimObject::new(3), &rect_obj(0.0, 0.0, 16.0, 16.0)).unwrap();

    // No entry has a 32x32 slot.
    let e = c.put(&AnimObject::new(4), &rect_obj(0.0, 0.0, 32.0, 32.0)).unwrap();
    assert!(e.is_dummy());
    assert!(!c.exists(4, 1.0));

    let e = c.put(&AnimObject::new(5), &rect_obj(0.0, 0.0, 40.0, 1.0)).unwrap();
    assert!(e.is_dummy());
    assert_eq!(c.stats().rejected, 2);
    assert_eq!(c.len(), 3);
    assert!(c.get(4, 1.0).is_dummy());
}

#[test]
fn configured_attachments_fill_before_eviction() {
    let mut c = cache(32, 2, 0);
    assert_eq!(c.framebuffer().attachments, 2);
    let svg = rect_obj(0.0, 0.0, 32.0, 32.0);

    let a = c.put(&AnimObject::new(1), &svg).unwrap();
    let b = c.put(&AnimObject::new(2), &svg).unwrap();
    assert_eq!((a.texture.id, b.texture.id), (1, 2));
    assert_eq!(c.stats().evictions, 0);

    let d = c.put(&AnimObject::new(3), &svg).unwrap();
    assert_eq!(d.texture.id, 1);
    assert!(!c.exists(1, 1.0));
}

#[test]
fn re_put_reuses_or_replaces_the_slot() {
    let mut c = cache(64, 1, 0);
    let anim = AnimObject::new(1);
    c.put(&anim, &rect_obj(0.0, 0.0, 20.0, 20.0)).unwrap();
    c.put(&anim, &rect_obj(0.0, 0.0, 10.0, 10.0)).unwrap();
    assert_eq!(c.framebuffer().jobs[1].region, PixelRect::new(0, 0, 10, 10));

    let e = c.put(&anim, &rect_obj(0.0, 0.0, 30.0, 30.0)).unwrap();
    assert_eq!(c.framebuffer().jobs[2].region, PixelRect::new(20, 0, 30, 30));
    assert_eq!(e.tex_coords_min, Vec2::new(20.0 / 64.0, 0.0));
    assert_eq!(c.len(), 1);
}

#[test]
fn clear_all_resets_state() {
    let mut c = cache(64, 1, 2);
    c.put(&AnimObject::new(1), &rect_obj(0.0, 0.0, 10.0, 10.0)).unwrap();
    c.clear_all();
    assert!(c.is_empty());
    assert!(!c.exists(1, 1.0));
    assert_eq!(c.framebuffer().cleared_attachments, vec![0]);

    c.put(&AnimObject::new(2), &rect_obj(0.0, 0.0, 10.0, 10.0)).unwrap();
    assert_eq!(c.framebuffer().jobs[1].region, PixelRect::new(2, 2, 10, 10));
}

#[test]
fn construction_checks_framebuffer_and_options() {
    let fb = RecordingFramebuffer::new(32, 32, 1);
    assert!(SvgCache::new(fb, opts(64, 1, 2)).is_err());

    let fb = RecordingFramebuffer::new(64, 64, 0);
    let c = SvgCache::new(fb, opts(64, 3, 2)).unwrap();
    assert_eq!(c.framebuffer().attachments, 3);
}

#[test]
fn invalid_scale_is_an_error() {
    let mut c = cache(64, 1, 2);
    let svg = rect_obj(0.0, 0.0, 1.0, 1.0);
    assert!(c.put(&AnimObject::new(1).with_scale(0.0), &svg).is_err());
    assert!(c.put(&AnimObject::new(1).with_scale(f64::NAN), &svg).is_err());
}
