use crate::constants::{TEXT_COLOR_CSS, TEXT_FONT_FAMILY};
use crate::core::constants::TEXT_WORDS;
use crate::core::{mip_chain, TextBlockLayout, Viewport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[wasm_bindgen]
extern "C" {
    // `document.fonts`, bound directly so a missing face surfaces as a rejection
    type FontFaceSet;

    #[wasm_bindgen(method, catch, js_name = load)]
    fn load(this: &FontFaceSet, font: &str) -> Result<js_sys::Promise, JsValue>;
}

/// Tightly packed RGBA8 pixels, straight alpha.
pub struct Pixels {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

fn canvas_2d(
    document: &web::Document,
    width: u32,
    height: u32,
) -> anyhow::Result<(web::HtmlCanvasElement, web::CanvasRenderingContext2d)> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas.set_width(width.max(1));
    canvas.set_height(height.max(1));
    let ctx = canvas
        .get_context("2d")
        .map_err(js_err)?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok((canvas, ctx))
}

fn read_pixels(
    ctx: &web::CanvasRenderingContext2d,
    width: u32,
    height: u32,
) -> anyhow::Result<Pixels> {
    let data = ctx
        .get_image_data(0.0, 0.0, width as f64, height as f64)
        .map_err(js_err)?;
    Ok(Pixels {
        width,
        height,
        rgba: data.data().0,
    })
}

/// Let the browser fetch and decode `url`, then resample it to `side`² and
/// halve it down to 1×1. Returns the whole mip chain, base level first.
pub async fn load_image(
    document: &web::Document,
    url: &str,
    side: u32,
) -> anyhow::Result<Vec<Pixels>> {
    let img = web::HtmlImageElement::new().map_err(js_err)?;
    let loaded = js_sys::Promise::new(&mut |resolve, reject| {
        img.set_onload(Some(&resolve));
        img.set_onerror(Some(&reject));
    });
    img.set_src(url);
    let result = JsFuture::from(loaded).await;
    img.set_onload(None);
    img.set_onerror(None);
    result.map_err(|_| anyhow::anyhow!("failed to load image {}", url))?;

    let chain = mip_chain(side, side);
    let mut levels = Vec::with_capacity(chain.len());
    let mut prev: Option<web::HtmlCanvasElement> = None;
    for (w, h) in chain {
        let (canvas, ctx) = canvas_2d(document, w, h)?;
        match &prev {
            // each level is filtered from the one above it
            Some(src) => ctx.draw_image_with_html_canvas_element_and_dw_and_dh(
                src, 0.0, 0.0, w as f64, h as f64,
            ),
            None => ctx.draw_image_with_html_image_element_and_dw_and_dh(
                &img, 0.0, 0.0, w as f64, h as f64,
            ),
        }
        .map_err(js_err)?;
        levels.push(read_pixels(&ctx, w, h)?);
        prev = Some(canvas);
    }
    Ok(levels)
}

async fn load_font(document: &web::Document, font_css: &str) -> anyhow::Result<()> {
    let fonts = js_sys::Reflect::get(document, &JsValue::from_str("fonts")).map_err(js_err)?;
    if fonts.is_undefined() {
        anyhow::bail!("document.fonts unsupported");
    }
    let fonts: FontFaceSet = fonts.unchecked_into();
    let faces = JsFuture::from(fonts.load(font_css).map_err(js_err)?)
        .await
        .map_err(js_err)?;
    let faces: js_sys::Array = faces
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("unexpected font load result"))?;
    if faces.length() == 0 {
        anyhow::bail!("no font face matches {}", font_css);
    }
    Ok(())
}

/// Wait for the display font, then draw the stacked words into a texture.
/// `pixel_ratio` scales the bitmap so text stays sharp on dense screens.
pub async fn rasterize_text_block(
    document: &web::Document,
    vp: &Viewport,
    pixel_ratio: f64,
) -> anyhow::Result<(TextBlockLayout, Pixels)> {
    let font_px = vp.h(crate::core::constants::TEXT_SIZE_RATIO);
    let font_css = format!("{}px {}", font_px, TEXT_FONT_FAMILY);
    load_font(document, &font_css).await?;

    let (_, measure) = canvas_2d(document, 1, 1)?;
    measure.set_font(&font_css);
    let mut widths = Vec::with_capacity(TEXT_WORDS.len());
    for word in TEXT_WORDS {
        widths.push(measure.measure_text(word).map_err(js_err)?.width() as f32);
    }
    let layout = TextBlockLayout::new(vp, &widths);

    let scale = pixel_ratio.max(1.0);
    let width = (layout.size.x as f64 * scale).ceil() as u32;
    let height = (layout.size.y as f64 * scale).ceil() as u32;
    if width == 0 || height == 0 {
        anyhow::bail!("text block has no area");
    }
    let (_, ctx) = canvas_2d(document, width, height)?;
    ctx.scale(scale, scale).map_err(js_err)?;
    ctx.set_font(&font_css);
    ctx.set_text_baseline("top");
    ctx.set_fill_style_str(TEXT_COLOR_CSS);
    for (word, top) in TEXT_WORDS.iter().zip(&layout.line_tops) {
        ctx.fill_text(word, top.x as f64, top.y as f64)
            .map_err(js_err)?;
    }
    let pixels = read_pixels(&ctx, width, height)?;
    Ok((layout, pixels))
}
