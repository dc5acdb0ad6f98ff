use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::input::timeout_ms;

/// One `setTimeout` at a time. Arming clears whatever was armed before.
///
/// The slot owns the JS callback. A cancelled callback is freed with it; a
/// fired one is parked in `spent` until the next timer fires, because it may
/// still be on the stack when the slot is re-armed from inside it.
#[derive(Debug, Default)]
pub struct TimerSlot {
    armed: Option<(i32, Closure<dyn FnMut()>)>,
    spent: Option<Closure<dyn FnMut()>>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, after: Duration, callback: impl FnOnce() + 'static) {
        self.cancel();
        let Some(window) = web::window() else {
            return;
        };
        let callback = Closure::once(callback);
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            timeout_ms(after),
        ) {
            Ok(handle) => self.armed = Some((handle, callback)),
            Err(e) => log::error!("[timer] setTimeout failed: {:?}", e),
        }
    }

    pub fn cancel(&mut self) {
        if let Some((handle, callback)) = self.armed.take() {
            if let Some(window) = web::window() {
                window.clear_timeout_with_handle(handle);
            }
            drop(callback);
        }
    }

    /// Called first thing from the callback of the timer that just fired.
    pub(crate) fn fired(&mut self) {
        if let Some((_, callback)) = self.armed.take() {
            self.spent = Some(callback);
        }
    }
}
