use super::*;

#[test]
fn defaults_validate() {
    let o = SvgCacheOpts::default();
    assert_eq!((o.atlas_width, o.atlas_height), (2048, 2048));
    assert_eq!(o.color_attachments, 1);
    assert_eq!(o.padding_px, 2);
    o.validate().unwrap();
    PackerOpts::default().validate().unwrap();
}

#[test]
fn json_fills_missing_fields_with_defaults() {
    let o: SvgCacheOpts = serde_json::from_str(r#"{"atlas_width": 512}"#).unwrap();
    assert_eq!(o.atlas_width, 512);
    assert_eq!(o.atlas_height, 2048);

    assert!(serde_json::from_str::<SvgCacheOpts>(r#"{"atlas_depth": 2}"#).is_err());
}

#[test]
fn invalid_options_are_rejected() {
    let zero = SvgCacheOpts {
        atlas_width: 0,
        ..SvgCacheOpts::default()
    };
    assert!(zero.validate().is_err());

    let huge = PackerOpts {
        atlas_width: 70_000,
        atlas_height: 16,
    };
    assert!(huge.validate().is_err());

    let no_attachments = SvgCacheOpts {
        color_attachments: 0,
        ..SvgCacheOpts::default()
    };
    assert!(no_attachments.validate().is_err());

    let fat_padding = SvgCacheOpts {
        atlas_width: 8,
        atlas_height: 8,
        padding_px: 4,
        ..SvgCacheOpts::default()
    };
    let err = fat_padding.validate().unwrap_err();
    assert!(err.to_string().contains("padding_px"));
}
