use skycal_core::orientation::*;
use skycal_core::SessionConfig;

fn controls() -> OrientationControls {
    let c = SessionConfig::default();
    OrientationControls::new(c.azimuth, c.zenith, c.roll)
}

#[test]
fn parse_degrees_treats_junk_as_zero() {
    assert_eq!(parse_degrees(""), 0);
    assert_eq!(parse_degrees("   "), 0);
    assert_eq!(parse_degrees("abc"), 0);
    assert_eq!(parse_degrees("-"), 0);
    assert_eq!(parse_degrees("42"), 42);
    assert_eq!(parse_degrees(" -17 "), -17);
    assert_eq!(parse_degrees("12.6"), 13);
}

#[test]
fn values_clamp_to_declared_range() {
    let mut c = controls();
    assert_eq!(c.set(Axis::Azimuth, 500), (360, true));
    assert_eq!(c.set(Axis::Zenith, -5), (0, false));
    assert_eq!(c.set(Axis::Roll, -400), (-180, true));
    assert_eq!(
        c.params(),
        OrientationParams { azimuth: 360, zenith: 0, roll: -180 }
    );
}

#[test]
fn nudges_step_and_clamp() {
    let mut c = controls();
    assert_eq!(c.nudge(Axis::Zenith, 10).0, 10);
    assert_eq!(c.nudge(Axis::Zenith, 1).0, 11);
    c.set(Axis::Zenith, 85);
    assert_eq!(c.nudge(Axis::Zenith, 10).0, 90);
    assert_eq!(c.nudge(Axis::Zenith, 1), (90, false));
}

#[test]
fn reset_returns_to_zero_or_nearest_bound() {
    let mut c = OrientationControls::new(
        AxisRange::new(0, 360),
        AxisRange::new(10, 80),
        AxisRange::new(-180, 180),
    );
    c.set(Axis::Azimuth, 90);
    c.set(Axis::Roll, 45);
    c.reset();
    assert_eq!(
        c.params(),
        OrientationParams { azimuth: 0, zenith: 10, roll: 0 }
    );
}

#[test]
fn inverted_config_range_fails_validation() {
    let cfg = SessionConfig::default().with_range(Axis::Roll, AxisRange::new(10, -10));
    assert!(cfg.validate().is_err());
    assert!(SessionConfig::default().validate().is_ok());
}
