use crate::constants::WHEEL_LINE_PX;
use crate::core::{InputKind, ScrollSensor};
use crate::dom::add_listener;
use glam::Vec2;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use web_sys as web;

#[derive(Clone)]
pub struct ScrollWiring {
    pub canvas: web::HtmlCanvasElement,
    pub sensor: Rc<RefCell<ScrollSensor>>,
}

/// Feed wheel, mouse/pen and touch gestures on the canvas into the sensor.
pub fn wire_scroll_input(w: ScrollWiring) {
    wire_wheel(&w);
    wire_pointer_drag(&w);
    wire_touch_drag(&w);
    // The page itself never scrolls; the sensor owns the offset.
    add_listener(w.canvas.as_ref(), "scroll", |ev: web::Event| {
        ev.prevent_default();
    });
}

fn wire_wheel(w: &ScrollWiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    add_listener(target.as_ref(), "wheel", move |ev: web::WheelEvent| {
        let unit = match ev.delta_mode() {
            web::WheelEvent::DOM_DELTA_LINE => WHEEL_LINE_PX as f64,
            web::WheelEvent::DOM_DELTA_PAGE => w.canvas.client_height() as f64,
            _ => 1.0,
        };
        let delta = Vec2::new(
            (ev.delta_x() * unit) as f32,
            (ev.delta_y() * unit) as f32,
        );
        ev.prevent_default();
        w.sensor.borrow_mut().wheel(delta);
    });
}

#[inline]
fn client_pos(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

/// Seconds since the previous sample, from event timestamps in milliseconds.
#[inline]
fn elapsed_sec(last_ms: &Cell<f64>, now_ms: f64) -> f32 {
    let dt = ((now_ms - last_ms.get()) / 1000.0).max(0.0);
    last_ms.set(now_ms);
    dt as f32
}

fn wire_pointer_drag(w: &ScrollWiring) {
    let last_ms = Rc::new(Cell::new(0.0_f64));

    // Touch pointers are handled by the touch listeners below.
    {
        let w = w.clone();
        let last_ms = last_ms.clone();
        let target = w.canvas.clone();
        add_listener(target.as_ref(), "pointerdown", move |ev: web::PointerEvent| {
            if ev.pointer_type() == "touch" {
                return;
            }
            _ = w.canvas.set_pointer_capture(ev.pointer_id());
            last_ms.set(ev.time_stamp());
            w.sensor.borrow_mut().press(InputKind::Pointer, client_pos(&ev));
            ev.prevent_default();
        });
    }
    {
        let w = w.clone();
        let target = w.canvas.clone();
        add_listener(target.as_ref(), "pointermove", move |ev: web::PointerEvent| {
            if ev.pointer_type() == "touch" {
                return;
            }
            let mut sensor = w.sensor.borrow_mut();
            if !sensor.is_dragging() {
                return;
            }
            let dt = elapsed_sec(&last_ms, ev.time_stamp());
            sensor.drag_to(client_pos(&ev), dt);
        });
    }
    for name in ["pointerup", "pointercancel"] {
        let w = w.clone();
        let target = w.canvas.clone();
        add_listener(target.as_ref(), name, move |ev: web::PointerEvent| {
            if ev.pointer_type() == "touch" {
                return;
            }
            _ = w.canvas.release_pointer_capture(ev.pointer_id());
            w.sensor.borrow_mut().release();
        });
    }
}

fn first_touch(ev: &web::TouchEvent) -> Option<Vec2> {
    ev.touches()
        .get(0)
        .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
}

fn wire_touch_drag(w: &ScrollWiring) {
    let last_ms = Rc::new(Cell::new(0.0_f64));
    {
        let w = w.clone();
        let last_ms = last_ms.clone();
        let target = w.canvas.clone();
        add_listener(target.as_ref(), "touchstart", move |ev: web::TouchEvent| {
            ev.prevent_default();
            // extra fingers do not restart the drag of the first one
            if ev.touches().length() > 1 {
                return;
            }
            if let Some(pos) = first_touch(&ev) {
                last_ms.set(ev.time_stamp());
                w.sensor.borrow_mut().press(InputKind::Touch, pos);
            }
        });
    }
    {
        let w = w.clone();
        let target = w.canvas.clone();
        add_listener(target.as_ref(), "touchmove", move |ev: web::TouchEvent| {
            ev.prevent_default();
            if let Some(pos) = first_touch(&ev) {
                let dt = elapsed_sec(&last_ms, ev.time_stamp());
                w.sensor.borrow_mut().drag_to(pos, dt);
            }
        });
    }
    for name in ["touchend", "touchcancel"] {
        let w = w.clone();
        let target = w.canvas.clone();
        add_listener(target.as_ref(), name, move |ev: web::TouchEvent| {
            match first_touch(&ev) {
                // another finger is still down: follow it from where it is
                Some(pos) => w.sensor.borrow_mut().retarget(pos),
                None => w.sensor.borrow_mut().release(),
            }
        });
    }
}
