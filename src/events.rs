use crate::audio::AudioCue;
use crate::dom::add_listener;
use std::rc::Rc;
use web_sys as web;

mod pointer;

pub use pointer::{wire_scroll_input, ScrollWiring};

/// Replay the cue on every click and wheel turn. This also covers browsers
/// that block the initial autoplay until a user gesture.
pub fn wire_audio_triggers(window: &web::Window, cue: Rc<AudioCue>) {
    for name in ["click", "wheel"] {
        let cue = cue.clone();
        add_listener(window.as_ref(), name, move |_: web::Event| {
            cue.play();
        });
    }
}
