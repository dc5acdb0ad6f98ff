use crate::constants::{
    ATTR_API_BASE, ATTR_DEBOUNCE_MS, ATTR_LOG_LEVEL, AZIMUTH_NUM_ID, ROLL_NUM_ID, ZENITH_NUM_ID,
};
use crate::dom;
use crate::input::{level_from_str, parse_attr};
use skycal_core::orientation::{Axis, AxisRange};
use skycal_core::SessionConfig;
use std::time::Duration;
use web_sys as web;

/// Page-level settings read once at startup.
#[derive(Clone, Debug)]
pub struct PageConfig {
    pub session: SessionConfig,
    pub api_base: String,
}

pub fn log_level(document: &web::Document) -> log::Level {
    let raw = document.body().and_then(|b| b.get_attribute(ATTR_LOG_LEVEL));
    level_from_str(raw.as_deref())
}

/// Range declared by a number input's `min`/`max`, if both parse.
fn declared_range(document: &web::Document, id: &str) -> Option<AxisRange> {
    let input: web::HtmlInputElement = dom::maybe_by_id(document, id)?;
    let min = parse_attr::<f64>(Some(input.min().as_str()))?;
    let max = parse_attr::<f64>(Some(input.max().as_str()))?;
    Some(AxisRange::new(min.round() as i32, max.round() as i32))
}

pub fn page_config(document: &web::Document) -> PageConfig {
    let mut session = SessionConfig::default();
    for (axis, id) in [
        (Axis::Azimuth, AZIMUTH_NUM_ID),
        (Axis::Zenith, ZENITH_NUM_ID),
        (Axis::Roll, ROLL_NUM_ID),
    ] {
        if let Some(range) = declared_range(document, id) {
            session = session.with_range(axis, range);
        }
    }
    let body = document.body();
    let attr = |name: &str| body.as_ref().and_then(|b| b.get_attribute(name));
    if let Some(ms) = parse_attr::<u64>(attr(ATTR_DEBOUNCE_MS).as_deref()) {
        session.render_debounce = Duration::from_millis(ms);
    }
    let api_base = attr(ATTR_API_BASE).unwrap_or_default();
    if let Err(e) = session.validate() {
        log::warn!("[config] {}; falling back to defaults", e);
        session = SessionConfig::default();
    }
    log::info!(
        "[config] debounce={:?} az={:?} ze={:?} roll={:?} api='{}'",
        session.render_debounce,
        session.azimuth,
        session.zenith,
        session.roll,
        api_base
    );
    PageConfig { session, api_base }
}
