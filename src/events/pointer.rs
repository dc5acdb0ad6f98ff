use crate::app::{self, Shared};
use crate::dom;
use crate::input;
use glam::DVec2;
use skycal_core::error::{CalibError, ValidationError};
use skycal_core::Hemisphere;
use web_sys as web;

pub fn wire_pointer_handlers(shared: &Shared) {
    wire_aperture_click(shared);
    wire_stepper_clicks(shared);
    wire_hemisphere_previews(shared);
    wire_dropzone(shared);
}

/// Click position in the canvas backing store.
fn canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Option<DVec2> {
    let rect = canvas.get_bounding_client_rect();
    input::css_to_backing(
        DVec2::new(ev.client_x() as f64, ev.client_y() as f64),
        DVec2::new(rect.left(), rect.top()),
        DVec2::new(rect.width(), rect.height()),
        (canvas.width(), canvas.height()),
    )
}

fn wire_aperture_click(shared: &Shared) {
    let s = shared.clone();
    let canvas = shared.widgets.aperture_canvas.clone();
    dom::listen(&canvas.clone(), "click", move |ev: web::MouseEvent| {
        let Some(p) = canvas_px(&ev, &canvas) else {
            return;
        };
        let (w, h) = (canvas.width(), canvas.height());
        let result = app::update(&s, |app| app.session.add_point(p.x, p.y, w, h));
        match result {
            Ok(n) => log::debug!("[points] {} collected", n),
            // outside the aperture or a full set: silently ignored
            Err(CalibError::Validation(
                ValidationError::OutsideAperture | ValidationError::PointSetFull(_),
            )) => {}
            Err(e) => log::debug!("[points] click ignored: {}", e),
        }
    });
}

fn wire_stepper_clicks(shared: &Shared) {
    for el in &shared.widgets.steps {
        let Some(n) = dom::data_step(el) else { continue };
        let s = shared.clone();
        dom::on_click(el, move || {
            if let Err(e) = app::update(&s, |app| app.session.retreat_to(n)) {
                log::debug!("[ui] step {} not clickable: {}", n, e);
            }
        });
    }
}

fn wire_hemisphere_previews(shared: &Shared) {
    let w = &shared.widgets;
    for (canvas, hemisphere) in [(&w.hemi_left, Hemisphere::Left), (&w.hemi_right, Hemisphere::Right)] {
        let Some(canvas) = canvas else { continue };
        let s = shared.clone();
        dom::on_click(canvas, move || app::resolve_prompt(&s, Some(hemisphere)));
    }
    // a click on the dialog itself (not its content) is a backdrop click
    if let Some(picker) = &w.hemi_picker {
        let s = shared.clone();
        let target = picker.clone();
        dom::listen(picker, "click", move |ev: web::MouseEvent| {
            let on_backdrop = ev
                .target()
                .is_some_and(|t| t == web::EventTarget::from(target.clone()));
            if on_backdrop {
                app::resolve_prompt(&s, None);
            }
        });
    }
}

fn first_file(files: Option<web::FileList>) -> Option<web::File> {
    files.and_then(|f| f.get(0))
}

fn wire_dropzone(shared: &Shared) {
    let zone = shared.widgets.dropzone.clone();

    let z = zone.clone();
    dom::listen(&zone, "dragover", move |ev: web::DragEvent| {
        ev.prevent_default();
        dom::set_class(&z, "dragover", true);
    });
    let z = zone.clone();
    dom::listen(&zone, "dragleave", move |_: web::DragEvent| {
        dom::set_class(&z, "dragover", false);
    });

    let z = zone.clone();
    let s = shared.clone();
    dom::listen(&zone, "drop", move |ev: web::DragEvent| {
        ev.prevent_default();
        dom::set_class(&z, "dragover", false);
        if let Some(file) = first_file(ev.data_transfer().and_then(|dt| dt.files())) {
            app::start_upload(&s, file);
        }
    });

    if let Ok(Some(label)) = zone.query_selector("label") {
        let input = shared.widgets.file_input.clone();
        dom::on_click(&label, move || input.click());
    }

    let s = shared.clone();
    let input = shared.widgets.file_input.clone();
    dom::listen(&shared.widgets.file_input, "change", move |_: web::Event| {
        if let Some(file) = first_file(input.files()) {
            app::start_upload(&s, file);
        }
        // let the same file be picked again
        input.set_value("");
    });
}
