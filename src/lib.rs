#![cfg(target_arch = "wasm32")]
use skycal_core::SessionState;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod api;
mod app;
mod canvas;
mod config;
mod constants;
mod dom;
mod events;
mod input;
mod overlay;
mod timer;
mod ui;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let level = dom::window_document()
        .map(|d| config::log_level(&d))
        .unwrap_or(log::Level::Info);
    console_log::init_with_level(level).ok();
    log::info!("skycal-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let page = config::page_config(&document);
    let session = SessionState::new(page.session)?;
    let widgets = ui::Widgets::resolve(&document)?;
    let shared = app::Shared::new(session, widgets, api::Api::new(page.api_base));

    app::subscribe_listeners(&shared);
    events::wire_all(&shared);

    // initial paint of steps, controls and axis widgets
    {
        let app = shared.app.borrow();
        ui::sync_steps(&shared.widgets, &app.session.indicators());
        ui::sync_controls(&shared.widgets, &app.session.controls());
        ui::sync_axis_widgets(&shared.widgets, app.session.orientation(), true);
    }
    log::info!("skycal-web ready");
    Ok(())
}
