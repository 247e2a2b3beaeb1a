use crate::constants::{CANVAS_ID, CANVAS_PARENT_SELECTOR};
use crate::core::Viewport;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Attach a listener that lives for the rest of the page.
pub fn add_listener<E: JsCast + 'static>(
    target: &web::EventTarget,
    event: &str,
    mut handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(web::Event)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::warn!("[dom] cannot listen for {}: {:?}", event, e);
    }
    closure.forget();
}

/// Viewport derived once from the body height.
pub fn read_viewport(document: &web::Document) -> anyhow::Result<Viewport> {
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no document body"))?;
    Ok(Viewport::from_height(body.client_height() as f32)?)
}

/// Find `#app-canvas`, creating it inside `.canvas-box` (or the body) if the
/// page does not provide one.
pub fn ensure_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = match document.get_element_by_id(CANVAS_ID) {
        Some(el) => el,
        None => {
            let el = document
                .create_element("canvas")
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            el.set_id(CANVAS_ID);
            let parent: web::Element = match document
                .query_selector(CANVAS_PARENT_SELECTOR)
                .ok()
                .flatten()
            {
                Some(p) => p,
                None => document
                    .body()
                    .ok_or_else(|| anyhow::anyhow!("no document body"))?
                    .into(),
            };
            parent
                .append_child(&el)
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            el
        }
    };
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

/// Size the canvas to the viewport in CSS pixels and its backing store to
/// CSS size * devicePixelRatio.
pub fn size_canvas(canvas: &web::HtmlCanvasElement, vp: &Viewport) {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", vp.width));
    _ = style.set_property("height", &format!("{}px", vp.height));
    _ = style.set_property("touch-action", "none");
    canvas.set_width(((vp.width as f64 * dpr) as u32).max(1));
    canvas.set_height(((vp.height as f64 * dpr) as u32).max(1));
}
