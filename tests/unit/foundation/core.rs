use super::*;

#[test]
fn clamp_channel_saturates_and_rounds() {
    assert_eq!(clamp_channel(-10.0), 0);
    assert_eq!(clamp_channel(300.0), 255);
    assert_eq!(clamp_channel(12.4), 12);
    assert_eq!(clamp_channel(12.5), 13);
    assert_eq!(clamp_channel(f64::INFINITY), 255);
    assert_eq!(clamp_channel(f64::NEG_INFINITY), 0);
    assert_eq!(clamp_channel(f64::NAN), 0);
}

#[test]
fn pixel_is_opaque() {
    let px = Rgba8::from_color(Color::new(-10.0, 128.0, 300.0));
    assert_eq!(px.to_array(), [0, 128, 255, 255]);
}

#[test]
fn color_state_enforces_count_bounds() {
    assert!(matches!(
        ColorState::new(Vec::<Color>::new()),
        Err(QuiltError::Bounds(_))
    ));
    assert!(matches!(
        ColorState::new(vec![Color::default(); MAX_COLORS + 1]),
        Err(QuiltError::Bounds(_))
    ));
    let s = ColorState::new(vec![Color::default(); MAX_COLORS]).unwrap();
    assert_eq!(s.len(), MAX_COLORS);
}

#[test]
fn with_primary_leaves_source_untouched() {
    let s = ColorState::new([Color::new(1.0, 2.0, 3.0), Color::new(4.0, 5.0, 6.0)]).unwrap();
    let t = s.with_primary(Color::new(9.0, 9.0, 9.0));
    assert_eq!(s.primary(), Color::new(1.0, 2.0, 3.0));
    assert_eq!(t.primary(), Color::new(9.0, 9.0, 9.0));
    assert_eq!(t.get(1), s.get(1));
}

#[test]
fn channel_letters_and_indices() {
    let c = Color::new(1.0, 2.0, 3.0);
    for (i, ch) in Channel::ALL.into_iter().enumerate() {
        assert_eq!(ch.index(), i);
        assert_eq!(c.channel(ch), (i + 1) as f64);
    }
    assert_eq!(Channel::Green.letter(), 'g');
}
