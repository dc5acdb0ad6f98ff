// Element ids, selectors and timings the page glue binds to.
// Engine tuning lives in `skycal_core::constants`.

// Upload pane
pub const DROPZONE_ID: &str = "dropzone";
pub const FILE_INPUT_ID: &str = "fileInput";
pub const UPLOAD_STATUS_ID: &str = "uploadStatus";
pub const DUAL_INFO_BTN_ID: &str = "dualInfoBtn";
pub const DUAL_INFO_MODAL_ID: &str = "dualInfoModal";
pub const DUAL_INFO_CLOSE_ID: &str = "dualInfoClose";

// Orientation pane
pub const ORIENTATION_CANVAS_ID: &str = "orientationCanvas";
pub const RENDERING_BADGE_ID: &str = "renderingBadge";
pub const AZIMUTH_RANGE_ID: &str = "azimuth";
pub const AZIMUTH_NUM_ID: &str = "azimuthNum";
pub const ZENITH_RANGE_ID: &str = "zenith";
pub const ZENITH_NUM_ID: &str = "zenithNum";
pub const ROLL_RANGE_ID: &str = "roll";
pub const ROLL_NUM_ID: &str = "rollNum";

// Aperture pane
pub const APERTURE_CANVAS_ID: &str = "apertureCanvas";
pub const POINTS_HINT_ID: &str = "pointsHint";
pub const CLEAR_POINTS_ID: &str = "clearPoints";
pub const SEGMENT_BTN_ID: &str = "segmentBtn";

// Forward buttons
pub const NEXT_FROM_UPLOAD_ID: &str = "nextFromUpload";
pub const NEXT_FROM_ORIENT_ID: &str = "nextFromOrient";
pub const NEXT_FROM_APERTURE_ID: &str = "nextFromAperture";

// Result pane and dialogs
pub const FORECAST_BTN_ID: &str = "forecastBtn";
pub const FORECAST_MODAL_ID: &str = "forecastModal";
pub const FORECAST_CONTENT_ID: &str = "forecastContent";
pub const FORECAST_ORIENT_ID: &str = "fc-orient";
pub const CLOSE_FORECAST_ID: &str = "closeForecast";
pub const RESULT_MODAL_ID: &str = "resultModal";
pub const RESULT_IMG_ID: &str = "resultImg";
pub const DOWNLOAD_LINK_ID: &str = "downloadLink";
pub const CLOSE_MODAL_ID: &str = "closeModal";

// Hemisphere picker
pub const HEMI_PICKER_ID: &str = "hemispherePicker";
pub const HEMI_LEFT_ID: &str = "hemiLeft";
pub const HEMI_RIGHT_ID: &str = "hemiRight";
pub const HEMI_CANCEL_ID: &str = "hemiCancel";

// Transient error indicator
pub const ERROR_TOAST_ID: &str = "errorToast";
pub const ERROR_TOAST_MS: i32 = 2600;

// Selectors
pub const STEPPER_SELECTOR: &str = ".stepper .step";
pub const PANE_SELECTOR: &str = ".step-pane";
pub const BACK_SELECTOR: &str = "[data-back]";

// Body attributes read at startup
pub const ATTR_API_BASE: &str = "data-api-base";
pub const ATTR_DEBOUNCE_MS: &str = "data-render-debounce-ms";
pub const ATTR_LOG_LEVEL: &str = "data-log-level";
