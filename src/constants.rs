//! Page wiring and presentation constants for the web front end.
//!
//! Layout ratios and animation tuning live in `core::constants`; this file
//! only holds what depends on the host page or the GPU.
// DOM
pub const CANVAS_ID: &str = "app-canvas";
pub const CANVAS_PARENT_SELECTOR: &str = ".canvas-box";

// Assets, relative to the page
pub const IMAGE_DIR: &str = "assets/images/";
pub const SOUND_URL: &str = "assets/sounds/eva.mp3";
pub const TEXT_FONT_FAMILY: &str = "FZShuTi"; // declared by the page's @font-face

// Colors
pub const CLEAR_COLOR_HEX: u32 = 0xeeddaf;
pub const TEXT_COLOR_CSS: &str = "#20d9db";

// Plane images are resampled to a square texture of this side, plus mips
pub const PLANE_TEXTURE_PX: u32 = 512;

// Rendering
pub const MSAA_SAMPLES: u32 = 4;

// Camera
pub const CAMERA_Z: f32 = 600.0;
pub const CAMERA_NEAR: f32 = 10.0;
pub const CAMERA_FAR: f32 = 1000.0;

// Input
pub const WHEEL_LINE_PX: f32 = 16.0; // WheelEvent.deltaMode == DOM_DELTA_LINE
