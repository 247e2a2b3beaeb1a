use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Short sound played on load and on user interaction.
pub struct AudioCue {
    el: web::HtmlAudioElement,
}

impl AudioCue {
    pub fn new(src: &str) -> anyhow::Result<Self> {
        let el = web::HtmlAudioElement::new_with_src(src)
            .map_err(|e| anyhow::anyhow!("audio element error: {:?}", e))?;
        Ok(Self { el })
    }

    /// Start playback. Autoplay rejections are expected before the first
    /// user gesture and are only logged at debug level.
    pub fn play(&self) {
        match self.el.play() {
            Ok(promise) => spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::debug!("[audio] play deferred: {:?}", e);
                }
            }),
            Err(e) => log::warn!("[audio] play error: {:?}", e),
        }
    }
}
