use instant::Instant;
use skycal_core::coordinator::*;
use skycal_core::debounce::Debouncer;
use skycal_core::protocol::RenderedView;
use skycal_core::selection::WireHemisphere;
use skycal_core::{Hemisphere, OrientationParams, ServiceError};
use std::time::Duration;

const QUIET: Duration = Duration::from_millis(100);

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn intent(azimuth: i32) -> RenderIntent {
    RenderIntent {
        orientation: OrientationParams { azimuth, zenith: 0, roll: 0 },
        hemisphere: Hemisphere::Undecided,
    }
}

fn view(id: &str) -> RenderedView {
    RenderedView { view_id: id.into(), view_url: None }
}

#[test]
fn debouncer_replaces_pending_value() {
    let t0 = Instant::now();
    let mut d = Debouncer::new(QUIET);
    assert_eq!(d.quiet(), QUIET);
    d.schedule(t0, 1);
    d.schedule(t0 + ms(50), 2);
    assert_eq!(d.poll(t0 + ms(120)), None, "quiet period restarted");
    assert_eq!(d.remaining(t0 + ms(120)), Some(ms(30)));
    assert_eq!(d.poll(t0 + ms(150)), Some(2));
    assert!(!d.is_pending());
    assert_eq!(d.poll(t0 + ms(500)), None);
}

#[test]
fn debouncer_cancel_drops_value() {
    let t0 = Instant::now();
    let mut d = Debouncer::new(QUIET);
    d.schedule(t0, "x");
    assert_eq!(d.cancel(), Some("x"));
    assert_eq!(d.remaining(t0), None);
    assert_eq!(d.poll(t0 + ms(200)), None);
}

#[test]
fn burst_issues_one_request_with_latest_params() {
    let t0 = Instant::now();
    let mut rc = RenderCoordinator::new(QUIET);
    rc.schedule(t0, intent(10));
    rc.schedule(t0 + ms(20), intent(20));
    assert!(rc.poll(t0 + ms(110), "u1").is_none());
    let ticket = rc.poll(t0 + ms(120), "u1").expect("due");
    assert_eq!(ticket.request.azimuth, 20);
    assert_eq!(ticket.request.upload_id, "u1");
    assert_eq!(ticket.request.hemisphere, WireHemisphere::Full);
    assert!(rc.poll(t0 + ms(500), "u1").is_none());
    assert!(rc.is_in_flight());
    assert_eq!(rc.status(), RenderStatus::InFlight { seq: ticket.seq });
}

#[test]
fn out_of_order_replies_keep_the_latest() {
    let t0 = Instant::now();
    let mut rc = RenderCoordinator::new(QUIET);
    rc.schedule(t0, intent(10));
    let first = rc.poll(t0 + QUIET, "u1").unwrap();
    rc.schedule(t0 + ms(150), intent(20));
    let second = rc.poll(t0 + ms(250), "u1").unwrap();
    assert!(second.seq > first.seq);

    assert_eq!(
        rc.complete(second.seq, Ok(view("B"))),
        RenderOutcome::Applied(view("B"))
    );
    assert_eq!(rc.complete(first.seq, Ok(view("A"))), RenderOutcome::Superseded);
    assert_eq!(rc.view_id(), Some("B"));
    assert!(rc.is_ready());
}

#[test]
fn stale_reply_while_newer_is_scheduled_is_dropped() {
    let t0 = Instant::now();
    let mut rc = RenderCoordinator::new(QUIET);
    rc.schedule(t0, intent(10));
    let first = rc.poll(t0 + QUIET, "u1").unwrap();
    let applied = rc.complete(first.seq, Ok(view("A")));
    assert_eq!(applied, RenderOutcome::Applied(view("A")));
    rc.schedule(t0 + ms(200), intent(30));
    assert!(!rc.is_ready(), "a newer render is pending");
    assert_eq!(rc.status(), RenderStatus::Scheduled);
}

#[test]
fn failure_is_recorded_and_blocks_readiness() {
    let t0 = Instant::now();
    let mut rc = RenderCoordinator::new(QUIET);
    rc.schedule(t0, intent(10));
    let t = rc.poll(t0 + QUIET, "u1").unwrap();
    let err = ServiceError::Rejected("bad".into());
    assert_eq!(rc.complete(t.seq, Err(err.clone())), RenderOutcome::Failed(err.clone()));
    assert!(!rc.is_ready());
    assert_eq!(rc.status(), RenderStatus::Failed(err));
}

#[test]
fn reset_invalidates_in_flight_requests() {
    let t0 = Instant::now();
    let mut rc = RenderCoordinator::new(QUIET);
    rc.schedule(t0, intent(10));
    let t = rc.poll(t0 + QUIET, "u1").unwrap();
    rc.reset();
    assert_eq!(rc.complete(t.seq, Ok(view("old"))), RenderOutcome::Superseded);
    assert_eq!(rc.view_id(), None);
    assert_eq!(rc.status(), RenderStatus::Idle);

    rc.schedule(t0 + ms(300), intent(0));
    let next = rc.poll(t0 + ms(400), "u2").unwrap();
    assert!(next.seq > t.seq, "sequence numbers keep counting");
}
