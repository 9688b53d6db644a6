use crate::layout;
use star_core::{Companion, Controls};
use wasm_bindgen::JsCast;
use web_sys as web;

pub const CANVAS_ID: &str = "star-canvas";
pub const FINALIZE_BUTTON_ID: &str = "create-constellation-btn";
pub const CLEAR_BUTTON_ID: &str = "clear-constellation-btn";
pub const NAME_LABEL_ID: &str = "constellation-name";
pub const COMPANION_IMAGE_ID: &str = "miku";
pub const GALLERY_LIST_ID: &str = "constellation-list";

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::warn!("[dom] missing #{element_id}; click handler not wired");
    }
}

/// Match the canvas backing store to its CSS box. Writing the size resets
/// the bitmap, so it is only written when it differs. Returns `true` if the
/// backing size changed.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> bool {
    let rect = canvas.get_bounding_client_rect();
    let current = (canvas.width(), canvas.height());
    let Some((w_px, h_px)) = layout::backing_size_update(rect.width(), rect.height(), current)
    else {
        return false;
    };
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    true
}

pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(text));
    }
}

/// Toggle both the `disabled` property and the `disabled` class the
/// stylesheet keys off.
pub fn set_button_enabled(document: &web::Document, element_id: &str, enabled: bool) {
    let Some(el) = document.get_element_by_id(element_id) else {
        return;
    };
    if let Some(button) = el.dyn_ref::<web::HtmlButtonElement>() {
        button.set_disabled(!enabled);
    }
    let classes = el.class_list();
    let _ = if enabled {
        classes.remove_1("disabled")
    } else {
        classes.add_1("disabled")
    };
}

pub fn apply_controls(document: &web::Document, controls: Controls) {
    set_button_enabled(document, FINALIZE_BUTTON_ID, controls.finalize);
    set_button_enabled(document, CLEAR_BUTTON_ID, controls.clear);
}

pub fn companion_src(companion: Companion) -> String {
    format!("./assets/{}.png", companion.asset_name())
}

pub fn set_companion(document: &web::Document, companion: Companion) {
    if let Some(img) = document
        .get_element_by_id(COMPANION_IMAGE_ID)
        .and_then(|el| el.dyn_into::<web::HtmlImageElement>().ok())
    {
        img.set_src(&companion_src(companion));
    }
}
