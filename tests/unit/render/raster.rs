use super::*;

#[test]
fn size_follows_layout() {
    let down = RenderOpts::default();
    assert_eq!(raster_size(2, 3, 2, &down).unwrap(), (9, 4));
    assert_eq!(raster_size(2, 3, 0, &down).unwrap(), (1, 1));

    let across = RenderOpts {
        layout: Layout::RowsAcross,
        ..RenderOpts::default()
    };
    assert_eq!(raster_size(2, 3, 2, &across).unwrap(), (4, 9));
}

#[test]
fn area_ceiling_is_enforced() {
    let opts = RenderOpts {
        max_pixels: 16,
        ..RenderOpts::default()
    };
    assert_eq!(raster_size(2, 2, 2, &opts).unwrap(), (4, 4));
    assert!(matches!(
        raster_size(2, 2, 3, &opts),
        Err(QuiltError::Bounds(_))
    ));
    // Powers that overflow u64 are rejected, not wrapped.
    assert!(matches!(
        raster_size(10, 10, 40, &RenderOpts::default()),
        Err(QuiltError::Bounds(_))
    ));
}

#[test]
fn default_ceiling_matches_4000_square() {
    let opts = RenderOpts::default();
    // 2^11 = 2048 per side fits, 2^12 = 4096 per side does not.
    assert!(raster_size(2, 2, 11, &opts).is_ok());
    assert!(raster_size(2, 2, 12, &opts).is_err());
}

#[test]
fn depth_ceiling_bounds_single_cell_grids() {
    let opts = RenderOpts::default();
    assert_eq!(raster_size(1, 1, 64, &opts).unwrap(), (1, 1));
    assert!(matches!(
        raster_size(1, 1, 65, &opts),
        Err(QuiltError::Bounds(ref m)) if m.contains("iterations 65")
    ));
}

#[test]
fn from_rgba8_checks_length() {
    assert!(Raster::from_rgba8(2, 1, vec![0; 8]).is_ok());
    assert!(matches!(
        Raster::from_rgba8(2, 1, vec![0; 7]),
        Err(QuiltError::Shape(_))
    ));
}

#[test]
fn put_and_read_back() {
    let mut r = Raster::zeroed(3, 2);
    let px = Rgba8 {
        r: 1,
        g: 2,
        b: 3,
        a: 255,
    };
    r.put(2, 1, px);
    assert_eq!(r.pixel(2, 1), px);
    assert_eq!(&r.data[20..24], &[1, 2, 3, 255]);
    assert_eq!(r.pixel(0, 0).a, 0);
}

#[test]
fn default_layout_stacks_rows_down() {
    assert_eq!(Layout::default(), Layout::RowsDown);
    assert_eq!(RenderOpts::default().layout, Layout::RowsDown);
}
