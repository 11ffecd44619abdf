use super::*;

#[test]
fn rect_contains_is_inclusive_exclusive() {
    let r = Rect::new(20, 10, 2, 3); // rows 20..22, cols 10..13
    assert!(r.contains(Pos::new(20, 10)));
    assert!(r.contains(Pos::new(21, 12)));

    // Right/bottom edges are exclusive.
    assert!(!r.contains(Pos::new(20, 13)));
    assert!(!r.contains(Pos::new(22, 12)));

    // Outside.
    assert!(!r.contains(Pos::new(20, 9)));
    assert!(!r.contains(Pos::new(19, 10)));
}

#[test]
fn rect_empty_never_contains() {
    assert!(!Rect::new(0, 0, 0, 10).contains(Pos::new(0, 0)));
    assert!(!Rect::new(0, 0, 10, 0).contains(Pos::new(0, 0)));
    assert!(Rect::new(0, 0, -3, 4).is_empty());
}

#[test]
fn rect_intersect_handles_negative_origins() {
    let parent = Rect::new(0, 0, 5, 5);
    let child = Rect::new(-1, 3, 3, 4);
    assert_eq!(child.intersect(parent), Rect::new(0, 3, 2, 2));

    let far = Rect::new(10, 10, 2, 2);
    assert!(far.intersect(parent).is_empty());
}

#[test]
fn convert_fractions_round_half_to_even() {
    assert_eq!(convert(Hint::Fraction(0.5), 10), 5);
    assert_eq!(convert(Hint::Fraction(0.5), 5), 2);
    assert_eq!(convert(Hint::Fraction(0.5), 7), 4);
    assert_eq!(convert(Hint::Fraction(1.0), 24), 24);
    assert_eq!(convert(Hint::Fraction(0.0), 24), 0);
}

#[test]
fn convert_absolute_passes_through() {
    assert_eq!(convert(Hint::Cells(3), 10), 3);
    assert_eq!(convert(Hint::Cells(30), 10), 30);
}

#[test]
fn convert_negative_wraps_from_the_end() {
    assert_eq!(convert(Hint::Cells(-3), 10), 7);
    assert_eq!(convert(Hint::Fraction(-0.25), 20), 15);
    // The share is rounded before wrapping: a negative share that rounds
    // to zero cells resolves to zero.
    assert_eq!(convert(Hint::Fraction(-0.01), 10), 0);
    assert_eq!(convert(Hint::Fraction(-0.0), 10), 0);
    assert_eq!(convert(Hint::Fraction(-0.06), 10), 9);
    // Not clamped: a wrap that is still negative stays negative.
    assert_eq!(convert(Hint::Cells(-15), 10), -5);
}

#[test]
fn hints_from_numbers() {
    assert_eq!(Hint::from(0.5), Hint::Fraction(0.5));
    assert_eq!(Hint::from(4), Hint::Cells(4));
    let h = SizeHint::new(Hint::from(3), None);
    assert_eq!(h.height, Some(Hint::Cells(3)));
    assert!(h.width.is_none());
    assert!(PosHint::default().is_empty());
    assert!(!SizeHint::full().is_empty());
}
