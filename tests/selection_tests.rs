use skycal_core::error::{CalibError, DomainError, ValidationError};
use skycal_core::geometry::SourceRect;
use skycal_core::selection::*;

fn image(w: u32, h: u32) -> SourceImage {
    SourceImage::new(w, h).unwrap()
}

#[test]
fn dual_image_halves() {
    let img = image(4000, 2000);
    assert_eq!(
        derive_rect(&img, Hemisphere::Left).unwrap(),
        SourceRect { sx: 0, sy: 0, sw: 2000, sh: 2000 }
    );
    assert_eq!(
        derive_rect(&img, Hemisphere::Right).unwrap(),
        SourceRect { sx: 2000, sy: 0, sw: 2000, sh: 2000 }
    );
    assert_eq!(derive_rect(&img, Hemisphere::Full).unwrap(), SourceRect::full(4000, 2000));
}

#[test]
fn odd_width_right_half_takes_the_extra_column() {
    let img = image(3999, 2000);
    let l = derive_rect(&img, Hemisphere::Left).unwrap();
    let r = derive_rect(&img, Hemisphere::Right).unwrap();
    assert_eq!(l.sw, 1999);
    assert_eq!(r.sx, 1999);
    assert_eq!(r.sw, 2000);
    assert_eq!(l.sw + r.sw, 3999);
}

#[test]
fn undecided_has_no_rect() {
    let img = image(4000, 2000);
    assert_eq!(
        derive_rect(&img, Hemisphere::Undecided),
        Err(CalibError::Validation(ValidationError::UndecidedHemisphere))
    );
}

#[test]
fn classification_band_is_inclusive() {
    assert!(classify(&image(4000, 2000)).dual);
    assert!(classify(&image(1900, 1000)).dual);
    assert!(classify(&image(2100, 1000)).dual);
    assert!(!classify(&image(1899, 1000)).dual);
    assert!(!classify(&image(2101, 1000)).dual);
    assert!(!classify(&image(3000, 2000)).dual);
    let c = classify(&image(3000, 2000));
    assert!((c.ratio - 1.5).abs() < 1e-12);
}

#[test]
fn zero_sized_image_is_rejected() {
    assert_eq!(
        SourceImage::new(0, 100),
        Err(DomainError::EmptyImage { width: 0, height: 100 })
    );
}

#[test]
fn non_dual_selection_is_locked_to_full() {
    let img = image(3000, 2000);
    let sel = Selection::for_image(img, classify(&img));
    assert_eq!(sel.hemisphere(), Hemisphere::Full);
    assert_eq!(sel.rect(), Some(SourceRect::full(3000, 2000)));
}

#[test]
fn dual_selection_starts_undecided_and_displays_whole_image() {
    let img = image(4000, 2000);
    let mut sel = Selection::for_image(img, classify(&img));
    assert_eq!(sel.hemisphere(), Hemisphere::Undecided);
    assert_eq!(sel.rect(), None);
    assert_eq!(sel.display_rect(), SourceRect::full(4000, 2000));

    assert!(sel.set_hemisphere(Hemisphere::Right).unwrap());
    assert_eq!(sel.rect(), Some(SourceRect { sx: 2000, sy: 0, sw: 2000, sh: 2000 }));
    // same value again is not a change
    assert!(!sel.set_hemisphere(Hemisphere::Right).unwrap());
}

#[test]
fn rejected_hemisphere_keeps_previous_choice() {
    let img = image(4000, 2000);
    let mut sel = Selection::for_image(img, classify(&img));
    sel.set_hemisphere(Hemisphere::Left).unwrap();
    assert!(sel.set_hemisphere(Hemisphere::Undecided).is_err());
    assert_eq!(sel.hemisphere(), Hemisphere::Left);
    assert_eq!(sel.rect().map(|r| r.sx), Some(0));
}

#[test]
fn hemisphere_parsing_and_wire_values() {
    assert_eq!("left".parse::<Hemisphere>(), Ok(Hemisphere::Left));
    assert_eq!("right".parse::<Hemisphere>(), Ok(Hemisphere::Right));
    assert_eq!("full".parse::<Hemisphere>(), Ok(Hemisphere::Full));
    assert_eq!(
        "top".parse::<Hemisphere>(),
        Err(ValidationError::UnknownHemisphere("top".into()))
    );
    assert_eq!(Hemisphere::Undecided.wire(), WireHemisphere::Full);
    assert_eq!(serde_json::to_string(&Hemisphere::Left.wire()).unwrap(), "\"left\"");
    assert_eq!(serde_json::to_string(&Hemisphere::Undecided.wire()).unwrap(), "\"full\"");
}
