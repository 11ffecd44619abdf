use super::*;

#[test]
fn test_key_creation() {
    let key = Key::ctrl(KeyCode::Char('s'));
    assert_eq!(key.code, KeyCode::Char('s'));
    assert_eq!(key.modifiers, KeyModifiers::CONTROL);
}

#[test]
fn test_uppercase_is_normalized_to_shift() {
    let key = Key::from('Q');
    assert_eq!(key.code, KeyCode::Char('q'));
    assert!(key.modifiers.contains(KeyModifiers::SHIFT));
    assert_eq!(key, Key::shift(KeyCode::Char('q')));
    assert_eq!(key.as_char(), Some('Q'));
}

#[test]
fn test_parse_plain_and_named_keys() {
    assert_eq!("q".parse::<Key>().unwrap(), Key::from('q'));
    assert_eq!("esc".parse::<Key>().unwrap(), Key::simple(KeyCode::Esc));
    assert_eq!("space".parse::<Key>().unwrap(), Key::from(' '));
    assert_eq!("F5".parse::<Key>().unwrap(), Key::simple(KeyCode::F(5)));
    assert_eq!("f".parse::<Key>().unwrap(), Key::from('f'));
}

#[test]
fn test_parse_modifiers() {
    let key: Key = "ctrl+alt+x".parse().unwrap();
    assert_eq!(key.code, KeyCode::Char('x'));
    assert!(key.modifiers.contains(KeyModifiers::CONTROL | KeyModifiers::ALT));
    assert_eq!(key.as_char(), None);
}

#[test]
fn test_parse_rejects_garbage() {
    assert!("".parse::<Key>().is_err());
    assert!("ctrl+".parse::<Key>().is_err());
    assert!("a+b".parse::<Key>().is_err());
    assert!("nonsense".parse::<Key>().is_err());
}

#[test]
fn test_display_round_trips_through_parse() {
    for text in ["q", "ctrl+c", "esc", "shift+tab", "f12", "space"] {
        let key: Key = text.parse().unwrap();
        assert_eq!(key.to_string().parse::<Key>().unwrap(), key, "{text}");
    }
}
