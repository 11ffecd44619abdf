use super::*;

#[test]
fn index_resolves_and_counts_from_the_end() {
    assert_eq!(Span::Index(0).resolve(5).unwrap(), 0..1);
    assert_eq!(Span::Index(-1).resolve(5).unwrap(), 4..5);
    assert_eq!(Span::Index(-5).resolve(5).unwrap(), 0..1);
}

#[test]
fn index_out_of_bounds_is_an_error() {
    assert!(matches!(
        Span::Index(5).resolve(5),
        Err(Error::IndexOutOfBounds { index: 5, len: 5 })
    ));
    assert!(matches!(
        Span::Index(-6).resolve(5),
        Err(Error::IndexOutOfBounds { index: -6, len: 5 })
    ));
    assert!(Span::Index(0).resolve(0).is_err());
}

#[test]
fn slices_clip_silently() {
    assert_eq!(Span::from(1..3).resolve(5).unwrap(), 1..3);
    assert_eq!(Span::from(3..100).resolve(5).unwrap(), 3..5);
    assert_eq!(Span::from(-2..).resolve(5).unwrap(), 3..5);
    assert_eq!(Span::from(..-1).resolve(5).unwrap(), 0..4);
    assert_eq!(Span::from(..).resolve(5).unwrap(), 0..5);
    assert_eq!(Span::from(-100..2).resolve(5).unwrap(), 0..2);
    // Backwards and fully outside slices are empty, not errors.
    assert!(Span::from(4..1).resolve(5).unwrap().is_empty());
    assert!(Span::from(7..9).resolve(5).unwrap().is_empty());
}

#[test]
fn region_from_tuples() {
    let r: Region = (0, ..).into();
    assert_eq!(r, Region::new(Span::Index(0), Span::FULL));
    assert_eq!(r.resolve(3, 4).unwrap(), (0..1, 0..4));

    let r: Region = (1..3, -2..).into();
    assert_eq!(r.resolve(5, 10).unwrap(), (1..3, 8..10));

    let r: Region = (..).into();
    assert_eq!(r, Region::all());
    assert!(Region::cell(9, 0).resolve(3, 3).is_err());
}
