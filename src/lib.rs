#![cfg(target_arch = "wasm32")]
use crate::core::{
    build_scene, FrameLoop, ObjectId, OrthoCamera, ScrollConfig, ScrollSensor, Viewport, PLANES,
};
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod audio;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod render;

use constants::*;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("scroll-scene starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn wire_scroll_sensor(
    canvas: &web::HtmlCanvasElement,
    vp: &Viewport,
) -> (Rc<RefCell<ScrollSensor>>, Rc<Cell<f32>>) {
    let scroll_top = Rc::new(Cell::new(0.0_f32));
    let mut sensor = ScrollSensor::new(ScrollConfig::new(0.0, vp.max_scroll_top()));
    {
        let scroll_top = scroll_top.clone();
        sensor.on_scroll(move |ev| scroll_top.set(ev.scroll_top));
    }
    let sensor = Rc::new(RefCell::new(sensor));
    events::wire_scroll_input(events::ScrollWiring {
        canvas: canvas.clone(),
        sensor: sensor.clone(),
    });
    (sensor, scroll_top)
}

fn wire_audio(window: &web::Window) {
    match audio::AudioCue::new(SOUND_URL) {
        Ok(cue) => {
            let cue = Rc::new(cue);
            cue.play();
            events::wire_audio_triggers(window, cue);
        }
        Err(e) => log::warn!("[audio] {:?}", e),
    }
}

fn spawn_image_load(
    frame_ctx: Rc<RefCell<frame::FrameContext>>,
    document: web::Document,
    id: ObjectId,
    image: &'static str,
) {
    spawn_local(async move {
        let url = format!("{}{}", IMAGE_DIR, image);
        match assets::load_image(&document, &url, PLANE_TEXTURE_PX).await {
            Ok(levels) => {
                if let Some(g) = frame_ctx.borrow_mut().gpu.as_mut() {
                    g.upload_texture(id, image, &levels);
                }
                log::info!("[assets] loaded {}", url);
            }
            Err(e) => log::warn!("[assets] {:?}", e),
        }
    });
}

fn spawn_text_load(
    frame_ctx: Rc<RefCell<frame::FrameContext>>,
    document: web::Document,
    vp: Viewport,
    id: ObjectId,
    pixel_ratio: f64,
) {
    spawn_local(async move {
        match assets::rasterize_text_block(&document, &vp, pixel_ratio).await {
            Ok((layout, px)) => {
                let mut ctx = frame_ctx.borrow_mut();
                let label = ctx
                    .frame_loop
                    .scene()
                    .get(id)
                    .map_or("text_block", |o| o.label());
                if let Some(g) = ctx.gpu.as_mut() {
                    g.upload_texture(id, label, std::slice::from_ref(&px));
                }
                ctx.frame_loop.scene_mut().activate(id, layout.size, layout.center);
                log::info!(
                    "[assets] text block {}x{} ready",
                    layout.size.x,
                    layout.size.y
                );
            }
            Err(e) => log::warn!("[assets] text block stays hidden: {:?}", e),
        }
    });
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let vp = dom::read_viewport(&document)?;
    log::info!("[init] viewport {}x{}", vp.width, vp.height);
    let canvas = dom::ensure_canvas(&document)?;
    dom::size_canvas(&canvas, &vp);

    let (sensor, scroll_top) = wire_scroll_sensor(&canvas, &vp);
    wire_audio(&window);

    let (scene, handles) = build_scene(&vp)?;
    let camera = OrthoCamera::for_viewport(
        vp.width,
        vp.height,
        CAMERA_Z,
        CAMERA_NEAR,
        CAMERA_FAR,
    );
    let gpu = frame::init_gpu(&canvas, &camera).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        frame_loop: FrameLoop::new(scene, StdRng::from_entropy()),
        sensor,
        scroll_top,
        canvas,
        gpu,
        last_instant: Instant::now(),
    }));

    for (&id, plane) in handles.planes.iter().zip(PLANES.iter()) {
        spawn_image_load(frame_ctx.clone(), document.clone(), id, plane.image);
    }
    spawn_text_load(
        frame_ctx.clone(),
        document.clone(),
        vp,
        handles.text,
        window.device_pixel_ratio(),
    );

    frame::start_loop(frame_ctx);
    Ok(())
}
