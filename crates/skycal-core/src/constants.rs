// Shared tuning constants for the calibration engine and the web frontend.

// Render coordination
pub const RENDER_DEBOUNCE_MS: u64 = 100; // quiet period before a render request goes out

// Dual-hemisphere heuristic (closed band on width / height)
pub const DUAL_RATIO_MIN: f64 = 1.9;
pub const DUAL_RATIO_MAX: f64 = 2.1;

// Aperture points
pub const MAX_POINTS: usize = 3; // exactly this many authorize segmentation

// Overlay styling
pub const MARKER_RADIUS_PX: f64 = 5.0;
pub const OVERLAY_LINE_WIDTH_PX: f64 = 2.0;
pub const OVERLAY_COLOR: &str = "#ff6b6b";

// Declared control ranges (degrees), used when the page does not declare its own
pub const AZIMUTH_RANGE: (i32, i32) = (0, 360);
pub const ZENITH_RANGE: (i32, i32) = (0, 90);
pub const ROLL_RANGE: (i32, i32) = (-180, 180);

// Keyboard nudges on the number inputs
pub const NUDGE_STEP: i32 = 1;
pub const NUDGE_STEP_COARSE: i32 = 10; // with Shift held

// Wizard
pub const STEP_COUNT: u8 = 4;
