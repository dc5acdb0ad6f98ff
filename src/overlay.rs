use crate::constants::ERROR_TOAST_MS;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn show(el: &web::Element) {
    _ = el.class_list().remove_1("hidden");
    _ = el.remove_attribute("hidden");
}

#[inline]
pub fn hide(el: &web::Element) {
    _ = el.class_list().add_1("hidden");
    _ = el.set_attribute("hidden", "");
}

#[inline]
pub fn set_visible(el: &web::Element, visible: bool) {
    if visible {
        show(el);
    } else {
        hide(el);
    }
}

pub fn open_dialog(dialog: &web::HtmlDialogElement) {
    if !dialog.open() {
        if let Err(e) = dialog.show_modal() {
            log::warn!("[overlay] showModal failed: {:?}", e);
        }
    }
}

#[inline]
pub fn close_dialog(dialog: &web::HtmlDialogElement) {
    if dialog.open() {
        dialog.close();
    }
}

/// Show `text` in the transient error indicator, hiding it again later.
/// Falls back to the log when the page has no indicator.
pub fn flash_error(el: Option<&web::Element>, text: &str) {
    log::warn!("[ui] {}", text);
    let Some(el) = el else { return };
    el.set_text_content(Some(text));
    show(el);
    let el_hide = el.clone();
    let expected = text.to_string();
    let closure = Closure::once(move || {
        // a newer message keeps the indicator up
        if el_hide.text_content().as_deref() == Some(expected.as_str()) {
            hide(&el_hide);
        }
    });
    if let Some(w) = web::window() {
        _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            ERROR_TOAST_MS,
        );
    }
    closure.forget();
}
