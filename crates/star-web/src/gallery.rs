use crate::canvas::CanvasSurface;
use crate::dom::{self, GALLERY_LIST_ID};
use star_core::{Companion, Constellation, Surface};
use wasm_bindgen::JsCast;
use web_sys as web;

pub const THUMBNAIL_PX: u32 = 400;
const THANK_YOU: &str = "遊んでくれてありがとう！";

/// End-of-song gallery: one card per finished constellation, or a thank-you
/// note when the player made none.
pub fn render(document: &web::Document, constellations: &[Constellation]) -> anyhow::Result<()> {
    let list = document
        .get_element_by_id(GALLERY_LIST_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{GALLERY_LIST_ID}"))?;
    list.set_inner_html("");
    list.set_scroll_top(0);

    if constellations.is_empty() {
        let wrapper = create(document, "div", "no-constellations-message")?;
        let message = create(document, "div", "no-constellations-text")?;
        message.set_text_content(Some(THANK_YOU));
        let image = create(document, "img", "no-constellations-image")?;
        let _ = image.set_attribute("src", &dom::companion_src(Companion::Celebrating));
        let _ = image.set_attribute("alt", "ミク");
        append(&wrapper, &message)?;
        append(&wrapper, &image)?;
        append(&list, &wrapper)?;
        return Ok(());
    }

    for constellation in constellations {
        let card = create(document, "div", "constellation-card")?;
        let holder = create(document, "div", "constellation-canvas-container")?;
        let canvas: web::HtmlCanvasElement = create(document, "canvas", "constellation-canvas")?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        canvas.set_width(THUMBNAIL_PX);
        canvas.set_height(THUMBNAIL_PX);
        append(&holder, &canvas)?;

        let mut surface = CanvasSurface::new(canvas)?;
        surface.clear();
        constellation.draw(&mut surface);

        let name = create(document, "div", "constellation-name")?;
        name.set_text_content(Some(constellation.name()));
        append(&card, &holder)?;
        append(&card, &name)?;
        append(&list, &card)?;
    }
    log::info!("[gallery] {} constellations shown", constellations.len());
    Ok(())
}

fn create(document: &web::Document, tag: &str, class: &str) -> anyhow::Result<web::Element> {
    let el = document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    el.set_class_name(class);
    Ok(el)
}

fn append(parent: &web::Node, child: &web::Node) -> anyhow::Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}
