use crate::dom::{self, CLEAR_BUTTON_ID, FINALIZE_BUTTON_ID};
use crate::frame::FrameContext;
use crate::input;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub const PLAYER_PLAY: &str = "player:play";
pub const PLAYER_PAUSE: &str = "player:pause";
pub const PLAYER_TIMEUPDATE: &str = "player:timeupdate";
pub const PLAYER_ENDED: &str = "player:ended";

pub fn wire_canvas_click(canvas: web::HtmlCanvasElement, ctx: Rc<RefCell<FrameContext>>) {
    let canvas_target = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        if let Some(at) = input::pointer_canvas_px(&ev, &canvas_target) {
            ctx.borrow_mut().pointer(at);
        }
    }) as Box<dyn FnMut(_)>);
    let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn wire_buttons(document: &web::Document, ctx: Rc<RefCell<FrameContext>>) {
    {
        let ctx = ctx.clone();
        dom::add_click_listener(document, FINALIZE_BUTTON_ID, move || {
            ctx.borrow_mut().finalize();
        });
    }
    dom::add_click_listener(document, CLEAR_BUTTON_ID, move || {
        ctx.borrow_mut().clear();
    });
}

pub fn wire_resize(ctx: Rc<RefCell<FrameContext>>) {
    let Some(window) = web::window() else {
        return;
    };
    let closure = Closure::wrap(Box::new(move || {
        ctx.borrow_mut().sync_size();
    }) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Listen for the transport's `player:*` custom events on the document.
pub fn wire_player_events(document: &web::Document, ctx: Rc<RefCell<FrameContext>>) {
    on_document(document, PLAYER_PLAY, {
        let ctx = ctx.clone();
        move |_| ctx.borrow_mut().set_playing(true)
    });
    on_document(document, PLAYER_PAUSE, {
        let ctx = ctx.clone();
        move |_| ctx.borrow_mut().set_playing(false)
    });
    on_document(document, PLAYER_TIMEUPDATE, {
        let ctx = ctx.clone();
        move |ev| {
            let Some(detail) = ev.dyn_ref::<web::CustomEvent>().map(|c| c.detail()) else {
                return;
            };
            let Some(position) = field(&detail, "position").and_then(|v| v.as_f64()) else {
                return;
            };
            let chord = field(&detail, "chord").and_then(|v| v.as_string());
            ctx.borrow_mut().set_position(position, chord);
        }
    });
    on_document(document, PLAYER_ENDED, move |_| {
        let mut c = ctx.borrow_mut();
        c.set_playing(false);
        c.show_gallery();
    });
}

fn on_document(document: &web::Document, name: &str, mut handler: impl FnMut(web::Event) + 'static) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| handler(ev)) as Box<dyn FnMut(_)>);
    if document
        .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
        .is_err()
    {
        log::warn!("[events] could not listen for {name}");
    }
    closure.forget();
}

fn field(obj: &JsValue, key: &str) -> Option<JsValue> {
    js_sys::Reflect::get(obj, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}
