use skycal_core::error::ValidationError;
use skycal_core::wizard::*;

fn gate(has_image: bool, decided: bool, ready: bool, complete: bool) -> Gate {
    Gate {
        has_image,
        hemisphere_decided: decided,
        render_ready: ready,
        points_complete: complete,
    }
}

#[test]
fn preconditions_per_step() {
    use WizardStep::*;
    assert!(precondition(Upload, &gate(true, true, false, false)).is_ok());
    assert_eq!(
        precondition(Upload, &gate(true, false, false, false)),
        Err(ValidationError::PreconditionUnmet(Upload))
    );
    assert_eq!(
        precondition(Upload, &gate(false, true, false, false)),
        Err(ValidationError::PreconditionUnmet(Upload))
    );
    assert!(precondition(Orient, &gate(true, true, true, false)).is_ok());
    assert!(precondition(Orient, &gate(true, true, false, false)).is_err());
    assert!(precondition(Aperture, &gate(true, true, true, true)).is_ok());
    assert!(precondition(Aperture, &gate(true, true, true, false)).is_err());
    assert_eq!(
        precondition(Result, &gate(true, true, true, true)),
        Err(ValidationError::FinalStep(Result))
    );
}

#[test]
fn step_numbers_round_trip() {
    for step in WizardStep::ALL {
        assert_eq!(WizardStep::from_number(step.number()), Some(step));
    }
    assert_eq!(WizardStep::from_number(0), None);
    assert_eq!(WizardStep::from_number(5), None);
    assert_eq!(WizardStep::Upload.prev(), None);
    assert_eq!(WizardStep::Result.next(), None);
}

#[test]
fn retreat_only_goes_backwards() {
    let mut w = Wizard::new();
    assert_eq!(
        w.retreat(WizardStep::Upload),
        Err(ValidationError::IllegalRetreat {
            from: WizardStep::Upload,
            to: WizardStep::Upload
        })
    );
    assert!(!w.back());
    assert_eq!(w.current(), WizardStep::Upload);
}

#[test]
fn fresh_indicators() {
    let ind = Wizard::new().indicators();
    assert!(ind[0].active);
    assert!(!ind[0].done);
    assert!(ind.iter().all(|i| !i.clickable));
    assert_eq!(ind.map(|i| i.step.number()), [1, 2, 3, 4]);
}
