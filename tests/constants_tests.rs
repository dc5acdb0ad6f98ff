// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use skycal_core::constants as engine;
use std::collections::HashSet;

#[test]
#[allow(clippy::assertions_on_constants)]
fn engine_constants_are_consistent() {
    assert!(engine::RENDER_DEBOUNCE_MS > 0);
    assert!(engine::DUAL_RATIO_MIN < 2.0 && 2.0 < engine::DUAL_RATIO_MAX);
    assert_eq!(engine::MAX_POINTS, 3);
    assert!(engine::MARKER_RADIUS_PX > 0.0);
    assert!(engine::NUDGE_STEP < engine::NUDGE_STEP_COARSE);
    for (min, max) in [engine::AZIMUTH_RANGE, engine::ZENITH_RANGE, engine::ROLL_RANGE] {
        assert!(min <= 0 && 0 <= max, "0 must be a valid reset value");
    }
}

#[test]
fn element_ids_are_unique() {
    let ids = [
        DROPZONE_ID,
        FILE_INPUT_ID,
        UPLOAD_STATUS_ID,
        DUAL_INFO_BTN_ID,
        DUAL_INFO_MODAL_ID,
        DUAL_INFO_CLOSE_ID,
        ORIENTATION_CANVAS_ID,
        RENDERING_BADGE_ID,
        AZIMUTH_RANGE_ID,
        AZIMUTH_NUM_ID,
        ZENITH_RANGE_ID,
        ZENITH_NUM_ID,
        ROLL_RANGE_ID,
        ROLL_NUM_ID,
        APERTURE_CANVAS_ID,
        POINTS_HINT_ID,
        CLEAR_POINTS_ID,
        SEGMENT_BTN_ID,
        NEXT_FROM_UPLOAD_ID,
        NEXT_FROM_ORIENT_ID,
        NEXT_FROM_APERTURE_ID,
        FORECAST_BTN_ID,
        FORECAST_MODAL_ID,
        FORECAST_CONTENT_ID,
        FORECAST_ORIENT_ID,
        RESULT_MODAL_ID,
        RESULT_IMG_ID,
        DOWNLOAD_LINK_ID,
        CLOSE_MODAL_ID,
        HEMI_PICKER_ID,
        HEMI_LEFT_ID,
        HEMI_RIGHT_ID,
        HEMI_CANCEL_ID,
        ERROR_TOAST_ID,
    ];
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn toast_outlives_a_render_cycle() {
    assert!(ERROR_TOAST_MS as u64 > engine::RENDER_DEBOUNCE_MS);
}
