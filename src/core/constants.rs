// Layout and animation tuning shared by the scene builder and the rules.
// Ratios are multiplied by the viewport height unless noted.

// Viewport
pub const VIEWPORT_ASPECT: f32 = 0.75; // width = height * aspect

// Scrolling
pub const MAX_SCROLL_TOP_RATIO: f32 = 4.5;
pub const INERTIA_DECELERATION: f32 = 5000.0; // px/s^2, every input kind and axis
pub const WHEEL_FLING_GAIN: f32 = 8.0; // wheel delta -> coasting velocity (1/s)
pub const MAX_FLING_SPEED: f32 = 4000.0; // px/s
pub const DRAG_VELOCITY_SMOOTHING: f32 = 0.3; // new = (1-a)*old + a*instant
pub const DRAG_RELEASE_IDLE_SEC: f32 = 0.1; // held longer than this, release does not fling

// Planes
pub const PLANE_SIZE_RATIO: f32 = 0.18;
pub const PLANE_GAP: f32 = 10.0; // px between a plane edge and the center line
pub const PLANE_ROW_GAP: f32 = 20.0; // px between rows
pub const MOVE_END_Y_RATIO: f32 = 0.25;
pub const INITIAL_PARK: f32 = 100_000.0; // before the first frame
pub const PARK_COORD: f32 = 10_000.0; // before a move window opens
pub const PULSE_START_RATIO: f32 = 4.4;

// Pulse automaton
pub const PULSE_TRIGGER_PROBABILITY: f64 = 0.005; // per frame, once gated on
pub const PULSE_STEP: f32 = 0.001; // scale change per frame
pub const PULSE_MIN_SCALE: f32 = 0.8;
pub const PULSE_MAX_SCALE: f32 = 1.0;

// Text block
pub const TEXT_WORDS: [&str; 3] = ["下滑", "开启", "魔法"];
pub const TEXT_SIZE_RATIO: f32 = 0.13;
pub const TEXT_LINE_ADVANCE_RATIO: f32 = 0.16;
pub const TEXT_NUDGE_X_RATIO: f32 = -0.02;
