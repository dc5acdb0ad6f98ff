use crate::app::{self, Shared};
use crate::dom;
use crate::input;
use instant::Instant;
use web_sys as web;

pub fn wire_keyboard_handlers(shared: &Shared) {
    wire_axis_nudges(shared);
    wire_stepper_keys(shared);
    wire_prompt_cancel(shared);
}

/// Arrow keys on the number boxes: ±1, ±10 with Shift.
fn wire_axis_nudges(shared: &Shared) {
    for aw in &shared.widgets.axes {
        let s = shared.clone();
        let axis = aw.axis;
        dom::listen(&aw.number, "keydown", move |ev: web::KeyboardEvent| {
            let Some(delta) = input::nudge_delta(&ev.key(), ev.shift_key()) else {
                return;
            };
            ev.prevent_default();
            let v = app::update(&s, |app| app.session.nudge_axis(Instant::now(), axis, delta));
            log::debug!("[orient] {} nudged to {}", axis.name(), v);
        });
    }
}

fn wire_stepper_keys(shared: &Shared) {
    for el in &shared.widgets.steps {
        let Some(n) = dom::data_step(el) else { continue };
        let s = shared.clone();
        dom::listen(el, "keydown", move |ev: web::KeyboardEvent| {
            if !input::is_activation_key(&ev.key()) {
                return;
            }
            let clickable = {
                let app = s.app.borrow();
                app.session
                    .indicators()
                    .iter()
                    .any(|i| i.step.number() == n && i.clickable)
            };
            if clickable {
                ev.prevent_default();
                _ = app::update(&s, |app| app.session.retreat_to(n));
            }
        });
    }
}

fn wire_prompt_cancel(shared: &Shared) {
    // the dialog closes itself on Escape; route that through the engine
    if let Some(picker) = &shared.widgets.hemi_picker {
        let s = shared.clone();
        dom::listen(picker, "cancel", move |ev: web::Event| {
            ev.prevent_default();
            app::resolve_prompt(&s, None);
        });
    }
    let Some(document) = dom::window_document() else {
        return;
    };
    let s = shared.clone();
    dom::listen(&document, "keydown", move |ev: web::KeyboardEvent| {
        if !input::is_cancel_key(&ev.key()) {
            return;
        }
        let pending = s.app.borrow().session.prompt().is_some();
        if pending {
            app::resolve_prompt(&s, None);
        }
    });
}
