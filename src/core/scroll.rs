use super::constants::{
    DRAG_RELEASE_IDLE_SEC, DRAG_VELOCITY_SMOOTHING, INERTIA_DECELERATION, MAX_FLING_SPEED,
    WHEEL_FLING_GAIN,
};
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Wheel,
    Pointer,
    Touch,
}

/// Inertial deceleration in px/s^2 per axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Deceleration {
    pub x: f32,
    pub y: f32,
}

impl Deceleration {
    pub const fn uniform(v: f32) -> Self {
        Self { x: v, y: v }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollConfig {
    pub max_scroll_left: f32,
    pub max_scroll_top: f32,
    pub wheel: Deceleration,
    pub pointer: Deceleration,
    pub touch: Deceleration,
}

impl ScrollConfig {
    pub fn new(max_scroll_left: f32, max_scroll_top: f32) -> Self {
        let d = Deceleration::uniform(INERTIA_DECELERATION);
        Self {
            max_scroll_left: max_scroll_left.max(0.0),
            max_scroll_top: max_scroll_top.max(0.0),
            wheel: d,
            pointer: d,
            touch: d,
        }
    }

    pub fn deceleration(&self, kind: InputKind) -> Deceleration {
        match kind {
            InputKind::Wheel => self.wheel,
            InputKind::Pointer => self.pointer,
            InputKind::Touch => self.touch,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollEvent {
    pub scroll_left: f32,
    pub scroll_top: f32,
}

#[derive(Clone, Copy, Debug)]
struct Drag {
    kind: InputKind,
    last: Vec2,
    velocity: Vec2,
    idle_sec: f32, // time since the last drag sample
}

/// Turns wheel, pointer-drag and touch input into a bounded scroll offset
/// that keeps coasting after release and decelerates to rest.
pub struct ScrollSensor {
    config: ScrollConfig,
    offset: Vec2, // x = scroll left, y = scroll top
    velocity: Vec2,
    coasting: Option<InputKind>,
    drag: Option<Drag>,
    listener: Option<Box<dyn FnMut(ScrollEvent)>>,
}

impl ScrollSensor {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            offset: Vec2::ZERO,
            velocity: Vec2::ZERO,
            coasting: None,
            drag: None,
            listener: None,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Subscribe to offset changes. A later subscription replaces the earlier one.
    pub fn on_scroll(&mut self, listener: impl FnMut(ScrollEvent) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn scroll_top(&self) -> f32 {
        self.offset.y
    }

    pub fn scroll_left(&self) -> f32 {
        self.offset.x
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_coasting(&self) -> bool {
        self.coasting.is_some()
    }

    /// Wheel deltas scroll immediately and add a short fling.
    pub fn wheel(&mut self, delta: Vec2) {
        if !delta.is_finite() {
            return;
        }
        let before = self.offset;
        self.offset += delta;
        let fling = delta * WHEEL_FLING_GAIN;
        self.velocity = match self.coasting {
            Some(InputKind::Wheel) => self.velocity + fling,
            _ => fling,
        }
        .clamp_length_max(MAX_FLING_SPEED);
        self.coasting = Some(InputKind::Wheel);
        self.clamp_offset();
        self.emit_if_moved(before);
    }

    /// Start a pointer or touch drag at `pos` (client pixels); cancels coasting.
    pub fn press(&mut self, kind: InputKind, pos: Vec2) {
        self.drag = Some(Drag {
            kind,
            last: pos,
            velocity: Vec2::ZERO,
            idle_sec: 0.0,
        });
        self.velocity = Vec2::ZERO;
        self.coasting = None;
    }

    /// Content follows the finger: moving up scrolls down.
    pub fn drag_to(&mut self, pos: Vec2, dt_sec: f32) {
        let Some(mut drag) = self.drag else {
            return;
        };
        if !pos.is_finite() {
            return;
        }
        let delta = pos - drag.last;
        let before = self.offset;
        self.offset -= delta;
        if dt_sec > 0.0 {
            let instant = -delta / dt_sec;
            drag.velocity = drag.velocity * (1.0 - DRAG_VELOCITY_SMOOTHING)
                + instant * DRAG_VELOCITY_SMOOTHING;
        }
        drag.last = pos;
        drag.idle_sec = 0.0;
        self.drag = Some(drag);
        self.clamp_offset();
        self.emit_if_moved(before);
    }

    /// Move the drag anchor to `pos` without scrolling, e.g. when the tracked
    /// finger lifts and another one stays down.
    pub fn retarget(&mut self, pos: Vec2) {
        if let Some(drag) = self.drag.as_mut() {
            if pos.is_finite() {
                drag.last = pos;
            }
        }
    }

    /// End the drag and coast with the tracked release velocity. A finger
    /// held still before lifting releases without a fling.
    pub fn release(&mut self) {
        if let Some(drag) = self.drag.take() {
            let velocity = if drag.idle_sec > DRAG_RELEASE_IDLE_SEC {
                Vec2::ZERO
            } else {
                drag.velocity
            };
            self.velocity = velocity.clamp_length_max(MAX_FLING_SPEED);
            self.coasting = (self.velocity != Vec2::ZERO).then_some(drag.kind);
        }
    }

    /// Integrate inertia over `dt_sec`, or age the drag while a finger is
    /// down. Returns true if the offset moved.
    pub fn step(&mut self, dt_sec: f32) -> bool {
        if dt_sec <= 0.0 || !dt_sec.is_finite() {
            return false;
        }
        if let Some(drag) = self.drag.as_mut() {
            drag.idle_sec += dt_sec;
            return false;
        }
        let Some(kind) = self.coasting else {
            return false;
        };
        let decel = self.config.deceleration(kind);
        let (vx, dx) = coast(self.velocity.x, decel.x, dt_sec);
        let (vy, dy) = coast(self.velocity.y, decel.y, dt_sec);
        let before = self.offset;
        self.offset += Vec2::new(dx, dy);
        self.velocity = Vec2::new(vx, vy);
        self.clamp_offset();
        if self.velocity == Vec2::ZERO {
            self.coasting = None;
        }
        self.emit_if_moved(before)
    }

    fn clamp_offset(&mut self) {
        let max = Vec2::new(self.config.max_scroll_left, self.config.max_scroll_top);
        let clamped = self.offset.clamp(Vec2::ZERO, max);
        if clamped.x != self.offset.x {
            self.velocity.x = 0.0;
        }
        if clamped.y != self.offset.y {
            self.velocity.y = 0.0;
        }
        self.offset = clamped;
    }

    fn emit_if_moved(&mut self, before: Vec2) -> bool {
        if self.offset == before {
            return false;
        }
        let ev = ScrollEvent {
            scroll_left: self.offset.x,
            scroll_top: self.offset.y,
        };
        if let Some(listener) = self.listener.as_mut() {
            listener(ev);
        }
        true
    }
}

/// Constant deceleration over `dt_sec`, stopping at zero speed.
/// Returns the new velocity and the distance covered. A deceleration that is
/// not positive stops dead.
#[inline]
fn coast(v: f32, decel: f32, dt_sec: f32) -> (f32, f32) {
    if decel.is_nan() || decel <= 0.0 {
        return (0.0, 0.0);
    }
    let a = decel;
    let speed = v.abs();
    if dt_sec >= speed / a {
        // comes to rest within this step
        return (0.0, (speed * speed / (2.0 * a)).copysign(v));
    }
    let dist = (speed * dt_sec - 0.5 * a * dt_sec * dt_sec).copysign(v);
    ((speed - a * dt_sec).max(0.0).copysign(v), dist)
}
