// Host-side tests for pure input helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::DVec2;
use input::*;
use instant::Instant;
use skycal_core::error::ServiceError;
use skycal_core::protocol::UploadAccepted;
use skycal_core::session::SessionState;
use skycal_core::{Axis, SessionConfig};
use std::time::Duration;

#[test]
fn backing_store_mapping_scales_css_pixels() {
    // 300x300 backing shown at 150x150 CSS pixels, offset by (10, 20)
    let p = css_to_backing(
        DVec2::new(85.0, 95.0),
        DVec2::new(10.0, 20.0),
        DVec2::new(150.0, 150.0),
        (300, 300),
    );
    assert_eq!(p, Some(DVec2::new(150.0, 150.0)));
    assert_eq!(
        css_to_backing(DVec2::ZERO, DVec2::ZERO, DVec2::new(0.0, 10.0), (300, 300)),
        None
    );
}

#[test]
fn arrow_keys_nudge_by_one_or_ten() {
    assert_eq!(nudge_delta("ArrowUp", false), Some(1));
    assert_eq!(nudge_delta("ArrowRight", false), Some(1));
    assert_eq!(nudge_delta("ArrowDown", false), Some(-1));
    assert_eq!(nudge_delta("ArrowLeft", true), Some(-10));
    assert_eq!(nudge_delta("ArrowUp", true), Some(10));
    assert_eq!(nudge_delta("a", false), None);
}

#[test]
fn activation_and_cancel_keys() {
    assert!(is_activation_key("Enter"));
    assert!(is_activation_key(" "));
    assert!(!is_activation_key("Tab"));
    assert!(is_cancel_key("Escape"));
    assert!(!is_cancel_key("Enter"));
}

#[test]
fn number_box_rewrite_rules() {
    assert!(!needs_rewrite("", 0));
    assert!(!needs_rewrite("45", 45));
    assert!(needs_rewrite("500", 360));
    assert!(needs_rewrite("", 7));
}

#[test]
fn attribute_parsing() {
    assert_eq!(parse_attr::<u64>(Some(" 250 ")), Some(250));
    assert_eq!(parse_attr::<u64>(Some("")), None);
    assert_eq!(parse_attr::<u64>(Some("soon")), None);
    assert_eq!(parse_attr::<u64>(None), None);
    assert_eq!(level_from_str(Some("DEBUG")), log::Level::Debug);
    assert_eq!(level_from_str(None), log::Level::Info);
}

#[test]
fn status_lines() {
    assert_eq!(upload_status(UploadStage::Uploading("sky.jpg")), "Uploading sky.jpg…");
    assert_eq!(upload_status(UploadStage::Uploaded("sky.jpg")), "Uploaded: sky.jpg");
    assert_eq!(upload_status(UploadStage::Failed("HTTP 500")), "Error: HTTP 500");
    assert_eq!(orientation_line(90, 10, -5), "az 90°, ze 10°, roll -5°");
}

#[test]
fn timeouts_round_up_to_whole_milliseconds() {
    assert_eq!(timeout_ms(Duration::from_micros(99_700)), 100);
    assert_eq!(timeout_ms(Duration::from_nanos(99_000_001)), 100);
    assert_eq!(timeout_ms(Duration::from_millis(100)), 100);
    assert_eq!(timeout_ms(Duration::ZERO), 0);
    assert_eq!(timeout_ms(Duration::from_secs(u64::MAX)), i32::MAX);
}

#[test]
fn render_is_due_when_the_timeout_fires() {
    let mut s = SessionState::new(SessionConfig::default()).unwrap();
    let generation = s.begin_upload();
    s.upload_completed(
        generation,
        Ok(UploadAccepted {
            upload_id: "u1".into(),
            upload_url: "/uploads/u1.jpg".into(),
        }),
    )
    .unwrap();
    let t0 = Instant::now();
    s.image_loaded(t0, generation, 640, 480).unwrap();
    if let Some(ticket) = s.poll_render(t0 + Duration::from_secs(1)) {
        s.complete_render(ticket.seq, Err(ServiceError::Http(500)));
    }

    let t1 = t0 + Duration::from_secs(2);
    s.set_axis(t1, Axis::Azimuth, 90);
    // the timer is armed a fraction of a millisecond after the change
    let t2 = t1 + Duration::from_micros(300);
    let wait = s.render_wait(t2).expect("render scheduled");
    assert_eq!(wait, Duration::from_micros(99_700));

    let fires_at = t2 + Duration::from_millis(timeout_ms(wait) as u64);
    assert!(s.poll_render(fires_at).is_some());
    assert!(!s.render().is_scheduled());
}
