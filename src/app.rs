//! Shared application state and the flows that drive the engine from the
//! page: upload, debounced render, segmentation, forecast.

use crate::api::Api;
use crate::canvas;
use crate::input::{orientation_line, upload_status, UploadStage};
use crate::overlay;
use crate::timer::TimerSlot;
use crate::ui::{self, Widgets};
use instant::Instant;
use skycal_core::protocol::{
    cache_busted, ForecastReply, RenderReply, SegmentReply, FORECAST_PATH, RENDER_PATH,
    SEGMENT_PATH,
};
use skycal_core::{
    Advance, CallOutcome, Change, Hemisphere, Notifier, RenderOutcome, SessionState,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub struct App {
    pub session: SessionState,
    /// Decoded upload, the image source of every canvas.
    pub image: Option<web::HtmlImageElement>,
    pub timer: TimerSlot,
}

#[derive(Clone)]
pub struct Shared {
    pub app: Rc<RefCell<App>>,
    pub notifier: Rc<RefCell<Notifier>>,
    pub widgets: Rc<Widgets>,
    pub api: Rc<Api>,
}

impl Shared {
    pub fn new(session: SessionState, widgets: Widgets, api: Api) -> Self {
        Self {
            app: Rc::new(RefCell::new(App {
                session,
                image: None,
                timer: TimerSlot::new(),
            })),
            notifier: Rc::new(RefCell::new(Notifier::new())),
            widgets: Rc::new(widgets),
            api: Rc::new(api),
        }
    }
}

/// Run `f` against the app, then notify listeners of whatever it changed
/// and re-arm the render timer. Listeners run after the borrow is released.
pub fn update<R>(shared: &Shared, f: impl FnOnce(&mut App) -> R) -> R {
    let (out, changes) = {
        let mut app = shared.app.borrow_mut();
        let out = f(&mut app);
        (out, app.session.drain_changes())
    };
    if !changes.is_empty() {
        shared.notifier.borrow_mut().dispatch(changes);
    }
    if changes.contains(Change::Render) {
        arm_render_timer(shared);
    }
    out
}

fn arm_render_timer(shared: &Shared) {
    let mut app = shared.app.borrow_mut();
    match app.session.render_wait(Instant::now()) {
        Some(wait) => {
            let s = shared.clone();
            app.timer.arm(wait, move || {
                s.app.borrow_mut().timer.fired();
                fire_render(&s);
            });
        }
        None => app.timer.cancel(),
    }
}

/// Issue the debounced render, if due, and apply its reply.
pub fn fire_render(shared: &Shared) {
    let Some(ticket) = update(shared, |app| app.session.poll_render(Instant::now())) else {
        // Woke before the deadline: wait out the remainder.
        let early = matches!(
            shared.app.borrow().session.render_wait(Instant::now()),
            Some(wait) if !wait.is_zero()
        );
        if early {
            arm_render_timer(shared);
        }
        return;
    };
    let s = shared.clone();
    spawn_local(async move {
        let result = s.api.post::<RenderReply>(RENDER_PATH, &ticket.request).await;
        let outcome = update(&s, |app| app.session.complete_render(ticket.seq, result));
        match outcome {
            RenderOutcome::Applied(_) => repaint(&s),
            RenderOutcome::Failed(e) => s.widgets.flash_error(&format!("Render failed: {e}")),
            RenderOutcome::Superseded => {}
        }
    });
}

/// Redraw both display surfaces from the current selection.
pub fn repaint(shared: &Shared) {
    let app = shared.app.borrow();
    let w = &shared.widgets;
    let image = app.image.as_ref();
    let rect = app.session.display_rect();
    match rect {
        Some(rect) => canvas::paint_preview(&w.orientation_canvas, image, rect),
        None => canvas::clear(&w.orientation_canvas),
    }
    canvas::paint_aperture(&w.aperture_canvas, image, rect, app.session.point_list());
}

pub fn start_upload(shared: &Shared, file: web::File) {
    let name = file.name();
    let generation = update(shared, |app| {
        app.image = None;
        app.session.begin_upload()
    });
    ui::set_status(&shared.widgets, &upload_status(UploadStage::Uploading(&name)), true);
    let s = shared.clone();
    spawn_local(async move {
        let result = s.api.upload(&file).await;
        let url = update(&s, |app| {
            app.session
                .upload_completed(generation, result)
                .map(|u| u.upload_url.clone())
        });
        match url {
            Ok(url) => {
                ui::set_status(&s.widgets, &upload_status(UploadStage::Uploaded(&name)), false);
                load_image(&s, generation, &url);
            }
            Err(e) => {
                log::warn!("[upload] {}", e);
                if s.app.borrow().session.generation() == generation {
                    ui::set_status(
                        &s.widgets,
                        &upload_status(UploadStage::Failed(&e.to_string())),
                        false,
                    );
                }
            }
        }
    });
}

fn load_image(shared: &Shared, generation: u64, url: &str) {
    let img = match web::HtmlImageElement::new() {
        Ok(img) => img,
        Err(e) => {
            log::error!("[upload] cannot create image: {:?}", e);
            return;
        }
    };
    let s = shared.clone();
    let loaded = img.clone();
    let onload = Closure::once(move || {
        let (w, h) = (loaded.natural_width(), loaded.natural_height());
        let result = update(&s, |app| {
            let class = app.session.image_loaded(Instant::now(), generation, w, h)?;
            app.image = Some(loaded.clone());
            Ok::<_, skycal_core::CalibError>(class)
        });
        match result {
            Ok(_) => repaint(&s),
            Err(e) => log::warn!("[upload] image ignored: {}", e),
        }
    });
    img.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();
    let s = shared.clone();
    let onerror = Closure::once(move || {
        s.widgets.flash_error("Could not decode the uploaded image");
    });
    img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onerror.forget();
    img.set_src(&cache_busted(url, js_sys::Date::now() as u64));
}

/// Forward button of the current step.
pub fn advance(shared: &Shared) {
    let result = update(shared, |app| app.session.advance(Instant::now()));
    match result {
        Ok(Advance::Entered(step)) => log::debug!("[ui] entered {:?}", step),
        Ok(Advance::ChooseHemisphere(_)) => {}
        Err(e) => log::debug!("[ui] advance ignored: {}", e),
    }
}

pub fn resolve_prompt(shared: &Shared, choice: Option<Hemisphere>) {
    let result = update(shared, |app| {
        app.session.resolve_prompt(Instant::now(), choice)
    });
    if let Err(e) = result {
        log::debug!("[ui] hemisphere choice ignored: {}", e);
    }
}

pub fn run_segment(shared: &Shared) {
    let ticket = match update(shared, |app| app.session.segment_request()) {
        Ok(t) => t,
        Err(e) => {
            log::debug!("[segment] not ready: {}", e);
            return;
        }
    };
    let s = shared.clone();
    spawn_local(async move {
        let result = s
            .api
            .post::<SegmentReply>(SEGMENT_PATH, &ticket.request)
            .await;
        match update(&s, |app| app.session.complete_segment(&ticket, result)) {
            CallOutcome::Applied(mask) => {
                let w = &s.widgets;
                let url = cache_busted(&mask.sky_url, js_sys::Date::now() as u64);
                if let Some(img) = &w.result_img {
                    img.set_src(&url);
                }
                if let Some(link) = &w.download_link {
                    link.set_href(&mask.sky_url);
                }
                if let Some(dialog) = &w.result_modal {
                    overlay::open_dialog(dialog);
                }
            }
            CallOutcome::Failed(e) => s.widgets.flash_error(&format!("Segmentation error: {e}")),
            CallOutcome::Stale => {}
        }
    });
}

pub fn run_forecast(shared: &Shared) {
    let ticket = match update(shared, |app| app.session.forecast_request()) {
        Ok(t) => t,
        Err(e) => {
            log::debug!("[forecast] not ready: {}", e);
            return;
        }
    };
    let s = shared.clone();
    spawn_local(async move {
        let result = s
            .api
            .post::<ForecastReply>(FORECAST_PATH, &ticket.request)
            .await;
        let outcome = update(&s, |app| app.session.complete_forecast(&ticket, result));
        let w = &s.widgets;
        let text = match outcome {
            CallOutcome::Applied(value) => {
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
            }
            CallOutcome::Failed(e) => format!("Forecast error: {e}"),
            CallOutcome::Stale => return,
        };
        let r = &ticket.request;
        if let Some(el) = &w.forecast_orient {
            el.set_text_content(Some(&orientation_line(r.azimuth, r.zenith, r.roll)));
        }
        if let Some(el) = &w.forecast_content {
            el.set_text_content(Some(&text));
        }
        if let Some(dialog) = &w.forecast_modal {
            overlay::open_dialog(dialog);
        }
    });
}

/// Mirror engine changes into the page. Registered once at startup.
pub fn subscribe_listeners(shared: &Shared) {
    let mut notifier = shared.notifier.borrow_mut();

    let s = shared.clone();
    notifier.subscribe(move |change| {
        if matches!(change, Change::Selection | Change::Points) {
            repaint(&s);
        }
    });

    let s = shared.clone();
    notifier.subscribe(move |change| match change {
        Change::Step => {
            let indicators = s.app.borrow().session.indicators();
            ui::sync_steps(&s.widgets, &indicators);
        }
        Change::Orientation => {
            let params = s.app.borrow().session.orientation();
            ui::sync_axis_widgets(&s.widgets, params, false);
        }
        Change::Session => {
            let app = s.app.borrow();
            ui::sync_steps(&s.widgets, &app.session.indicators());
            ui::sync_axis_widgets(&s.widgets, app.session.orientation(), true);
            for dialog in [&s.widgets.result_modal, &s.widgets.forecast_modal]
                .into_iter()
                .flatten()
            {
                overlay::close_dialog(dialog);
            }
        }
        _ => {}
    });

    let s = shared.clone();
    notifier.subscribe(move |change| {
        if change != Change::Prompt {
            return;
        }
        let app = s.app.borrow();
        let w = &s.widgets;
        let Some(picker) = &w.hemi_picker else { return };
        match app.session.prompt() {
            Some(prompt) => {
                if let (Some(left), Some(right)) = (&w.hemi_left, &w.hemi_right) {
                    match prompt.previews(
                        (left.width(), left.height()),
                        (right.width(), right.height()),
                    ) {
                        Ok((lops, rops)) => {
                            canvas::paint_ops(left, app.image.as_ref(), &lops);
                            canvas::paint_ops(right, app.image.as_ref(), &rops);
                        }
                        Err(e) => log::warn!("[ui] hemisphere previews skipped: {}", e),
                    }
                }
                overlay::open_dialog(picker);
            }
            None => overlay::close_dialog(picker),
        }
    });

    // controls last, after everything they depend on is in place
    let s = shared.clone();
    notifier.subscribe(move |_| {
        let controls = s.app.borrow().session.controls();
        ui::sync_controls(&s.widgets, &controls);
    });
}
