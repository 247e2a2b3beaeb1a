use crate::constants::CLEAR_COLOR_HEX;
use crate::core::{FrameLoop, OrthoCamera, ScrollSensor};
use crate::render;
use instant::Instant;
use rand::rngs::StdRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub frame_loop: FrameLoop<StdRng>,
    pub sensor: Rc<RefCell<ScrollSensor>>,
    /// Latest offset published by the sensor's scroll listener.
    pub scroll_top: Rc<Cell<f32>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState>,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        // Inertia first so this frame sees the coasted offset.
        self.sensor.borrow_mut().step(dt_sec);
        let offset = self.scroll_top.get();

        let canvas = &self.canvas;
        let gpu = &mut self.gpu;
        self.frame_loop.tick(offset, |scene| {
            if let Some(g) = gpu {
                g.resize_if_needed(canvas.width(), canvas.height());
                if let Err(e) = g.render(scene) {
                    log::error!("render error: {:?}", e);
                }
            }
        });
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    camera: &OrthoCamera,
) -> Option<render::GpuState> {
    match render::GpuState::new(canvas, camera, CLEAR_COLOR_HEX).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        if let Err(e) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
    }
}
