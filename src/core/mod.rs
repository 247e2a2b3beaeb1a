pub mod anim;
pub mod camera;
pub mod constants;
pub mod layout;
pub mod mips;
pub mod scene;
pub mod scroll;

pub use anim::*;
pub use camera::*;
pub use layout::*;
pub use mips::*;
pub use scene::*;
pub use scroll::*;

pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
