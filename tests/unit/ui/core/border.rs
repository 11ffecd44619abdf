use super::*;

#[test]
fn parses_every_known_style() {
    for style in BorderStyle::ALL {
        assert_eq!(style.name().parse::<BorderStyle>().unwrap(), style);
        assert_eq!(style.to_string(), style.name());
    }
}

#[test]
fn unknown_style_is_a_configuration_error() {
    let err = "dotted".parse::<BorderStyle>().unwrap_err();
    assert!(matches!(&err, Error::UnknownBorderStyle(name) if name == "dotted"));
    assert!(err.is_configuration());
}

#[test]
fn glyph_sets() {
    let light = BorderStyle::Light.glyphs();
    assert_eq!((light.top_left, light.horizontal, light.bottom_right), ('┌', '─', '┘'));
    let curved = BorderStyle::Curved.glyphs();
    assert_eq!((curved.top_left, curved.vertical, curved.bottom_left), ('╭', '│', '╰'));
    assert_eq!(BorderStyle::Double.glyphs().top_right, '╗');
    assert_eq!(BorderStyle::Heavy.glyphs().vertical, '┃');
}
