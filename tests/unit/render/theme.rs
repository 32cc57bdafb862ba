use super::*;

#[test]
fn parses_hex_rgb_and_rgba() {
    assert_eq!(parse_hex("#ff0000").unwrap(), Rgba8::opaque(255, 0, 0));
    assert_eq!(parse_hex("0000FF80").unwrap(), Rgba8::rgba(0, 0, 255, 0x80));
    assert!(parse_hex("#fff").is_err());
    assert!(parse_hex("#gg0000").is_err());
    assert!(parse_hex("#ééé").is_err());
}

#[test]
fn accent_prefers_valid_hint() {
    let theme = ThemeHints {
        accent_color_hint: Some("#123456".to_owned()),
        primary_mood: "danger".to_owned(),
        ..ThemeHints::default()
    };
    assert_eq!(accent_color(&theme), Rgba8::opaque(0x12, 0x34, 0x56));
}

#[test]
fn accent_falls_back_to_mood_then_background() {
    let calm = ThemeHints {
        accent_color_hint: Some("not-a-color".to_owned()),
        primary_mood: "Calm focus".to_owned(),
        ..ThemeHints::default()
    };
    assert_eq!(accent_color(&calm), Rgba8::opaque(0x5b, 0xc0, 0xde));

    let energy_accent = ThemeHints {
        primary_mood: "calm".to_owned(),
        accent_mood: Some("energy".to_owned()),
        ..ThemeHints::default()
    };
    assert_eq!(accent_color(&energy_accent), Rgba8::opaque(0xf3, 0x9c, 0x12));

    let light = ThemeHints {
        background_style: BackgroundStyle::Light,
        ..ThemeHints::default()
    };
    assert_eq!(accent_color(&light), Rgba8::opaque(0x2c, 0x3e, 0x50));
    assert_eq!(
        TrackPalette::from_hints(&light).background,
        Rgba8::opaque(0xfd, 0xfd, 0xfd)
    );
}

#[test]
fn mix_endpoints() {
    let a = Rgba8::opaque(0, 0, 0);
    let b = Rgba8::opaque(200, 100, 50);
    assert_eq!(mix(a, b, 0.0), a);
    assert_eq!(mix(a, b, 1.0), b);
    assert_eq!(mix(a, b, 0.5), Rgba8::opaque(100, 50, 25));
}
