// The app's state in one place: the uploaded photo, the current frame settings,
// and the surface the latest render lives on.
// Visual: every control (style, color, width, reset) goes through here and the
// preview updates immediately after.
//
// States: no image -> (load) -> rendered -> (style/color/width) -> rendered -> (reset) -> no image

use std::path::Path;

use log::{debug, info, warn};

use crate::canvas::Canvas;
use crate::codec::{load_image, save_png};
use crate::color::{Rgb, PRESET_SWATCHES};
use crate::error::Result;
use crate::frames::{FrameConfig, FrameStyle, MAX_FRAME_WIDTH};
use crate::render::render_into;
use crate::types::FrameBuffer;

pub struct Session {
    source: Option<FrameBuffer>,
    config: FrameConfig,
    canvas: Canvas,
    rendered: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(FrameConfig::default())
    }
}

impl Session {
    /// Start with no photo and the given settings (width clamped to the slider range).
    pub fn new(config: FrameConfig) -> Self {
        let config = FrameConfig { width_px: config.width_px.min(MAX_FRAME_WIDTH), ..config };
        Self { source: None, config, canvas: Canvas::new(0, 0), rendered: false }
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    /// Decode `path` and make it the current photo.
    /// On failure the error is returned and whatever was showing stays showing.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        match load_image(path) {
            Ok(img) => {
                self.set_source(img);
                Ok(())
            }
            Err(e) => {
                warn!("keeping previous image: {e}");
                Err(e)
            }
        }
    }

    /// Replace the photo wholesale and render it.
    pub fn set_source(&mut self, img: FrameBuffer) {
        info!("new source image {}x{}", img.width, img.height);
        self.source = Some(img);
        self.refresh();
    }

    pub fn set_style(&mut self, style: FrameStyle) {
        debug!("style -> {style}");
        self.config.style = style;
        self.refresh();
    }

    pub fn set_color(&mut self, color: Rgb) {
        debug!("color -> {color}");
        self.config.color = color;
        self.refresh();
    }

    /// Pick one of the six quick swatches (index wraps around).
    pub fn set_swatch(&mut self, index: usize) {
        self.set_color(PRESET_SWATCHES[index % PRESET_SWATCHES.len()]);
    }

    /// Border width in pixels, clamped to 0..=100 like the slider.
    pub fn set_width(&mut self, width_px: u32) {
        let width_px = width_px.min(MAX_FRAME_WIDTH);
        debug!("width -> {width_px}");
        self.config.width_px = width_px;
        self.refresh();
    }

    /// Back to the defaults with no photo; rendering is a no-op until the next load.
    pub fn reset(&mut self) {
        info!("reset");
        self.source = None;
        self.config = FrameConfig::default();
        self.canvas.resize(0, 0);
        self.rendered = false;
    }

    /// Full redraw with the current settings. Does nothing without a photo.
    pub fn refresh(&mut self) {
        if let Some(src) = &self.source {
            render_into(&mut self.canvas, src, &self.config);
            self.rendered = true;
        }
    }

    /// The latest render, if there is a photo.
    pub fn output(&self) -> Option<&FrameBuffer> {
        self.rendered.then(|| self.canvas.frame_buffer())
    }

    /// Write the current render as PNG. Returns false (and touches nothing) with no photo.
    pub fn export(&self, path: &Path) -> Result<bool> {
        match self.output() {
            Some(fb) => {
                save_png(fb, path)?;
                Ok(true)
            }
            None => {
                debug!("export skipped: nothing rendered");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DEFAULT_FRAME_COLOR;
    use crate::frames::DEFAULT_FRAME_WIDTH;
    use crate::render::render;

    fn photo() -> FrameBuffer {
        FrameBuffer { width: 8, height: 5, pixels: vec![0xFF336699; 40] }
    }

    fn scratch(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("photo-framer-session-{}-{name}", std::process::id()))
    }

    #[test]
    fn nothing_renders_without_a_photo() {
        let mut s = Session::default();
        s.set_style(FrameStyle::Neon);
        s.set_width(40);
        s.refresh();
        assert!(s.output().is_none());

        let path = scratch("never.png");
        assert!(!s.export(&path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn every_change_rerenders_with_the_new_settings() {
        let mut s = Session::default();
        s.set_source(photo());
        assert_eq!(s.output().unwrap().dimensions(), (8 + 40, 5 + 40));

        s.set_width(5);
        assert_eq!(s.output().unwrap().dimensions(), (18, 15));

        s.set_style(FrameStyle::Polaroid);
        assert_eq!(s.output().unwrap().dimensions(), (18, 25));

        s.set_color(Rgb::new(1, 2, 3));
        let expected = render(&photo(), s.config());
        assert_eq!(s.output(), Some(&expected));
    }

    #[test]
    fn width_is_clamped_to_the_slider_range() {
        let mut s = Session::default();
        s.set_width(250);
        assert_eq!(s.config().width_px, MAX_FRAME_WIDTH);
        let s = Session::new(FrameConfig { width_px: 1000, ..FrameConfig::default() });
        assert_eq!(s.config().width_px, MAX_FRAME_WIDTH);
    }

    #[test]
    fn switching_style_and_back_reproduces_the_output() {
        let mut s = Session::default();
        s.set_source(photo());
        s.set_style(FrameStyle::Vintage);
        let before = s.output().cloned();
        s.set_style(FrameStyle::Shadow);
        assert_ne!(s.output().cloned(), before);
        s.set_style(FrameStyle::Vintage);
        assert_eq!(s.output().cloned(), before);
    }

    #[test]
    fn reset_restores_defaults_and_drops_the_photo() {
        let mut s = Session::default();
        s.set_source(photo());
        s.set_style(FrameStyle::Emboss);
        s.set_swatch(3);
        s.set_width(70);
        s.reset();

        assert!(!s.has_image());
        assert_eq!(s.config().style, FrameStyle::Classic);
        assert_eq!(s.config().color, DEFAULT_FRAME_COLOR);
        assert_eq!(s.config().width_px, DEFAULT_FRAME_WIDTH);
        s.set_width(10);
        assert!(s.output().is_none());
    }

    #[test]
    fn failed_load_keeps_the_previous_render() {
        let mut s = Session::default();
        s.set_source(photo());
        let before = s.output().cloned();

        let bad = scratch("bad.png");
        std::fs::write(&bad, b"nope").unwrap();
        assert!(s.load(&bad).is_err());
        let _ = std::fs::remove_file(&bad);

        assert!(s.has_image());
        assert_eq!(s.output().cloned(), before);
    }

    #[test]
    fn export_writes_the_current_render() {
        let mut s = Session::default();
        s.set_source(photo());
        let path = scratch("out.png");
        assert!(s.export(&path).unwrap());
        let back = load_image(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(Some(&back), s.output());
    }

    #[test]
    fn swatches_wrap_around() {
        let mut s = Session::default();
        s.set_swatch(PRESET_SWATCHES.len() + 1);
        assert_eq!(s.config().color, PRESET_SWATCHES[1]);
    }
}
