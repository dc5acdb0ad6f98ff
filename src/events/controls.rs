use crate::app::{self, Shared};
use crate::constants::{
    BACK_SELECTOR, CLOSE_FORECAST_ID, CLOSE_MODAL_ID, DUAL_INFO_BTN_ID, DUAL_INFO_CLOSE_ID,
    DUAL_INFO_MODAL_ID, HEMI_CANCEL_ID,
};
use crate::dom::{self, maybe_by_id};
use crate::overlay;
use crate::ui;
use instant::Instant;
use skycal_core::orientation::parse_degrees;
use web_sys as web;

pub fn wire_control_handlers(shared: &Shared) {
    wire_navigation(shared);
    wire_axis_inputs(shared);
    wire_action_buttons(shared);
    if let Some(document) = dom::window_document() {
        wire_dialogs(shared, &document);
    }
}

fn wire_navigation(shared: &Shared) {
    let w = &shared.widgets;
    for el in [&w.next_from_upload, &w.next_from_orient, &w.next_from_aperture] {
        let s = shared.clone();
        dom::on_click(el, move || app::advance(&s));
    }
    let Some(document) = dom::window_document() else {
        return;
    };
    for btn in dom::query_all::<web::Element>(&document, BACK_SELECTOR) {
        let s = shared.clone();
        dom::on_click(&btn, move || {
            app::update(&s, |app| app.session.back());
        });
    }
}

/// Slider and number box of one axis both feed the engine; the clamped
/// value is written back into both by the orientation listener.
fn wire_axis_inputs(shared: &Shared) {
    for aw in &shared.widgets.axes {
        for el in [&aw.range, &aw.number] {
            let s = shared.clone();
            let source = el.clone();
            let axis = aw.axis;
            dom::listen(el, "input", move |_: web::Event| {
                let raw = parse_degrees(&source.value());
                app::update(&s, |app| app.session.set_axis(Instant::now(), axis, raw));
            });
        }
    }
    // a blank box reads as 0 once the user leaves it
    for aw in &shared.widgets.axes {
        let s = shared.clone();
        dom::listen(&aw.number, "change", move |_: web::Event| {
            let params = s.app.borrow().session.orientation();
            ui::sync_axis_widgets(&s.widgets, params, true);
        });
    }
}

fn wire_action_buttons(shared: &Shared) {
    let w = &shared.widgets;
    let s = shared.clone();
    dom::on_click(&w.clear_points, move || {
        app::update(&s, |app| app.session.clear_points());
    });
    let s = shared.clone();
    dom::on_click(&w.segment_btn, move || app::run_segment(&s));
    if let Some(btn) = &w.forecast_btn {
        let s = shared.clone();
        dom::on_click(btn, move || app::run_forecast(&s));
    }
}

fn wire_dialogs(shared: &Shared, document: &web::Document) {
    let w = &shared.widgets;
    let closers = [
        (CLOSE_MODAL_ID, w.result_modal.clone()),
        (CLOSE_FORECAST_ID, w.forecast_modal.clone()),
    ];
    for (button_id, dialog) in closers {
        let (Some(button), Some(dialog)) = (maybe_by_id::<web::Element>(document, button_id), dialog)
        else {
            continue;
        };
        dom::on_click(&button, move || overlay::close_dialog(&dialog));
    }

    if let Some(cancel) = maybe_by_id::<web::Element>(document, HEMI_CANCEL_ID) {
        let s = shared.clone();
        dom::on_click(&cancel, move || app::resolve_prompt(&s, None));
    }

    // static explainer for dual-fisheye uploads
    let modal = maybe_by_id::<web::HtmlDialogElement>(document, DUAL_INFO_MODAL_ID);
    if let (Some(open), Some(modal)) = (maybe_by_id::<web::Element>(document, DUAL_INFO_BTN_ID), modal) {
        let m = modal.clone();
        dom::on_click(&open, move || overlay::open_dialog(&m));
        if let Some(close) = maybe_by_id::<web::Element>(document, DUAL_INFO_CLOSE_ID) {
            dom::on_click(&close, move || overlay::close_dialog(&modal));
        }
    }
}
