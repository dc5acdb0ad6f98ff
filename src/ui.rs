//! Elements the glue binds to, and the functions that mirror engine
//! state into them.

use crate::constants::*;
use crate::dom::{self, by_id, maybe_by_id, query_all};
use crate::input::needs_rewrite;
use crate::overlay;
use skycal_core::orientation::Axis;
use skycal_core::{Controls, OrientationParams, StepIndicator};
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct AxisWidgets {
    pub axis: Axis,
    pub range: web::HtmlInputElement,
    pub number: web::HtmlInputElement,
}

pub struct Widgets {
    pub dropzone: web::Element,
    pub file_input: web::HtmlInputElement,
    pub upload_status: web::Element,
    pub orientation_canvas: web::HtmlCanvasElement,
    pub aperture_canvas: web::HtmlCanvasElement,
    pub rendering_badge: Option<web::Element>,
    pub points_hint: Option<web::Element>,
    pub clear_points: web::Element,
    pub segment_btn: web::Element,
    pub next_from_upload: web::Element,
    pub next_from_orient: web::Element,
    pub next_from_aperture: web::Element,
    pub forecast_btn: Option<web::Element>,
    pub forecast_modal: Option<web::HtmlDialogElement>,
    pub forecast_content: Option<web::Element>,
    pub forecast_orient: Option<web::Element>,
    pub result_modal: Option<web::HtmlDialogElement>,
    pub result_img: Option<web::HtmlImageElement>,
    pub download_link: Option<web::HtmlAnchorElement>,
    pub hemi_picker: Option<web::HtmlDialogElement>,
    pub hemi_left: Option<web::HtmlCanvasElement>,
    pub hemi_right: Option<web::HtmlCanvasElement>,
    pub error_toast: Option<web::Element>,
    pub axes: [AxisWidgets; 3],
    pub steps: Vec<web::Element>,
    pub panes: Vec<web::Element>,
}

impl Widgets {
    /// Resolve every element up front so a broken page fails at startup.
    pub fn resolve(document: &web::Document) -> anyhow::Result<Self> {
        let axis = |axis: Axis, range_id: &str, num_id: &str| -> anyhow::Result<AxisWidgets> {
            Ok(AxisWidgets {
                axis,
                range: by_id(document, range_id)?,
                number: by_id(document, num_id)?,
            })
        };
        Ok(Self {
            dropzone: by_id(document, DROPZONE_ID)?,
            file_input: by_id(document, FILE_INPUT_ID)?,
            upload_status: by_id(document, UPLOAD_STATUS_ID)?,
            orientation_canvas: by_id(document, ORIENTATION_CANVAS_ID)?,
            aperture_canvas: by_id(document, APERTURE_CANVAS_ID)?,
            rendering_badge: maybe_by_id(document, RENDERING_BADGE_ID),
            points_hint: maybe_by_id(document, POINTS_HINT_ID),
            clear_points: by_id(document, CLEAR_POINTS_ID)?,
            segment_btn: by_id(document, SEGMENT_BTN_ID)?,
            next_from_upload: by_id(document, NEXT_FROM_UPLOAD_ID)?,
            next_from_orient: by_id(document, NEXT_FROM_ORIENT_ID)?,
            next_from_aperture: by_id(document, NEXT_FROM_APERTURE_ID)?,
            forecast_btn: maybe_by_id(document, FORECAST_BTN_ID),
            forecast_modal: maybe_by_id(document, FORECAST_MODAL_ID),
            forecast_content: maybe_by_id(document, FORECAST_CONTENT_ID),
            forecast_orient: maybe_by_id(document, FORECAST_ORIENT_ID),
            result_modal: maybe_by_id(document, RESULT_MODAL_ID),
            result_img: maybe_by_id(document, RESULT_IMG_ID),
            download_link: maybe_by_id(document, DOWNLOAD_LINK_ID),
            hemi_picker: maybe_by_id(document, HEMI_PICKER_ID),
            hemi_left: maybe_by_id(document, HEMI_LEFT_ID),
            hemi_right: maybe_by_id(document, HEMI_RIGHT_ID),
            error_toast: maybe_by_id(document, ERROR_TOAST_ID),
            axes: [
                axis(Axis::Azimuth, AZIMUTH_RANGE_ID, AZIMUTH_NUM_ID)?,
                axis(Axis::Zenith, ZENITH_RANGE_ID, ZENITH_NUM_ID)?,
                axis(Axis::Roll, ROLL_RANGE_ID, ROLL_NUM_ID)?,
            ],
            steps: query_all(document, STEPPER_SELECTOR),
            panes: query_all(document, PANE_SELECTOR),
        })
    }

    pub fn flash_error(&self, text: &str) {
        overlay::flash_error(self.error_toast.as_ref(), text);
    }
}

/// Stepper indicators and the visible pane.
pub fn sync_steps(w: &Widgets, indicators: &[StepIndicator; 4]) {
    for el in &w.steps {
        let Some(n) = dom::data_step(el) else { continue };
        let Some(ind) = indicators.iter().find(|i| i.step.number() == n) else {
            continue;
        };
        dom::set_class(el, "active", ind.active);
        dom::set_class(el, "done", ind.done);
        if let Ok(Some(dot)) = el.query_selector(".dot span") {
            let label = if ind.done { "✓".to_string() } else { n.to_string() };
            dot.set_text_content(Some(&label));
        }
        if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
            html.set_tab_index(if ind.clickable { 0 } else { -1 });
        }
        _ = el.set_attribute("aria-disabled", if ind.clickable { "false" } else { "true" });
    }
    let current = indicators.iter().find(|i| i.active).map(|i| i.step.number());
    for pane in &w.panes {
        dom::set_class(pane, "active", dom::data_step(pane) == current);
    }
}

pub fn sync_controls(w: &Widgets, c: &Controls) {
    dom::set_disabled(&w.next_from_upload, !c.next_from_upload);
    dom::set_disabled(&w.next_from_orient, !c.next_from_orient);
    dom::set_disabled(&w.next_from_aperture, !c.next_from_aperture);
    dom::set_disabled(&w.clear_points, !c.clear_points);
    dom::set_disabled(&w.segment_btn, !c.segment);
    if let Some(btn) = &w.forecast_btn {
        dom::set_disabled(btn, !c.forecast);
    }
    if let Some(badge) = &w.rendering_badge {
        overlay::set_visible(badge, c.rendering_badge);
    }
    if let Some(hint) = &w.points_hint {
        hint.set_text_content(Some(&c.points_hint));
    }
}

/// Write engine values back into both widgets of each axis. Clamping may
/// have changed what the user typed; `force` also normalises text that
/// merely reads as the right value.
pub fn sync_axis_widgets(w: &Widgets, params: OrientationParams, force: bool) {
    for aw in &w.axes {
        let v = params.get(aw.axis);
        let text = v.to_string();
        if aw.range.value() != text {
            aw.range.set_value(&text);
        }
        if force || needs_rewrite(&aw.number.value(), v) {
            aw.number.set_value(&text);
        }
    }
}

pub fn set_status(w: &Widgets, text: &str, loading: bool) {
    w.upload_status.set_text_content(Some(text));
    dom::set_class(&w.upload_status, "loading", loading);
}
