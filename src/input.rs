use glam::DVec2;
use skycal_core::constants::{NUDGE_STEP, NUDGE_STEP_COARSE};
use skycal_core::orientation::parse_degrees;
use std::time::Duration;

/// Map a client-space point into the canvas backing store, which may be
/// scaled relative to its CSS box.
#[inline]
pub fn css_to_backing(
    client: DVec2,
    rect_origin: DVec2,
    rect_size: DVec2,
    backing: (u32, u32),
) -> Option<DVec2> {
    if rect_size.x <= 0.0 || rect_size.y <= 0.0 {
        return None;
    }
    let local = client - rect_origin;
    let scale = DVec2::new(backing.0 as f64 / rect_size.x, backing.1 as f64 / rect_size.y);
    Some(local * scale)
}

/// Signed step for an orientation keyboard nudge, or `None` if the key
/// doesn't nudge.
#[inline]
pub fn nudge_delta(key: &str, shift: bool) -> Option<i32> {
    let step = if shift { NUDGE_STEP_COARSE } else { NUDGE_STEP };
    match key {
        "ArrowUp" | "ArrowRight" => Some(step),
        "ArrowDown" | "ArrowLeft" => Some(-step),
        _ => None,
    }
}

/// Enter or Space activates a focused step indicator.
#[inline]
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Spacebar")
}

#[inline]
pub fn is_cancel_key(key: &str) -> bool {
    matches!(key, "Escape" | "Esc")
}

/// Whether a number box needs rewriting to show `value`. Text that
/// already reads as `value` (including a blank box for 0) is left alone
/// so typing isn't interrupted.
pub fn needs_rewrite(text: &str, value: i32) -> bool {
    parse_degrees(text) != i64::from(value)
}

/// Parse an optional numeric attribute, ignoring blanks and junk.
pub fn parse_attr<T: std::str::FromStr>(raw: Option<&str>) -> Option<T> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

pub fn level_from_str(raw: Option<&str>) -> log::Level {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("error") => log::Level::Error,
        Some("warn") => log::Level::Warn,
        Some("debug") => log::Level::Debug,
        Some("trace") => log::Level::Trace,
        _ => log::Level::Info,
    }
}

/// Text for the file part of the upload status line.
pub fn upload_status(stage: UploadStage<'_>) -> String {
    match stage {
        UploadStage::Uploading(name) => format!("Uploading {name}…"),
        UploadStage::Uploaded(name) => format!("Uploaded: {name}"),
        UploadStage::Failed(msg) => format!("Error: {msg}"),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadStage<'a> {
    Uploading(&'a str),
    Uploaded(&'a str),
    Failed(&'a str),
}

/// Orientation summary shown with a forecast.
pub fn orientation_line(azimuth: i32, zenith: i32, roll: i32) -> String {
    format!("az {azimuth}°, ze {zenith}°, roll {roll}°")
}

/// `setTimeout` delay for a wait, rounded up to a whole millisecond so the
/// callback never runs before the deadline.
pub fn timeout_ms(wait: Duration) -> i32 {
    i32::try_from(wait.as_nanos().div_ceil(1_000_000)).unwrap_or(i32::MAX)
}
