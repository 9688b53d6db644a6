#![cfg(target_arch = "wasm32")]
mod canvas;
mod dom;
mod events;
mod frame;
mod gallery;
mod input;
mod layout;
mod spectrum;

use frame::FrameContext;
use star_core::{FieldConfig, Scene};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

thread_local! {
    static APP: RefCell<Option<Rc<RefCell<FrameContext>>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("star-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(dom::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", dom::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    dom::sync_canvas_backing_size(&canvas);

    let surface = canvas::CanvasSurface::new(canvas.clone())?;
    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let scene = Scene::new(FieldConfig::default(), seed);
    let ctx = Rc::new(RefCell::new(FrameContext::new(document.clone(), surface, scene)));

    events::wire_canvas_click(canvas, ctx.clone());
    events::wire_buttons(&document, ctx.clone());
    events::wire_player_events(&document, ctx.clone());
    events::wire_resize(ctx.clone());

    // Nothing is clickable until the player reports playback.
    ctx.borrow_mut().set_playing(false);
    APP.with(|app| *app.borrow_mut() = Some(ctx.clone()));
    frame::start_loop(ctx);
    log::info!("[init] scene ready (seed {seed})");
    Ok(())
}

fn app() -> Result<Rc<RefCell<FrameContext>>, JsValue> {
    APP.with(|app| app.borrow().clone())
        .ok_or_else(|| JsValue::from_str("star-web is not initialized yet"))
}

/// Fetch `/fft/<id>.json` and start a fresh field for that song. The
/// previous state is kept if loading fails.
#[wasm_bindgen]
pub async fn load_song(id: String) -> Result<(), JsValue> {
    let spectrum = spectrum::fetch_spectrum(&id).await.map_err(|e| {
        log::error!("spectrum load error: {:?}", e);
        JsValue::from_str(&format!("{e:#}"))
    })?;
    app()?.borrow_mut().load(spectrum);
    Ok(())
}

/// Name entered for the constellation in progress (e.g. a clicked lyric).
#[wasm_bindgen]
pub fn set_constellation_name(text: &str) -> Result<(), JsValue> {
    app()?.borrow_mut().set_name(text);
    Ok(())
}
