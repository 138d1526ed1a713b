// One full render pass: size the surface, clear it, paint the frame, composite the photo.
// Visual: what appears in the preview and what gets exported.
//
// Every call redraws from scratch; nothing from the previous pass survives.

use log::debug;

use crate::canvas::Canvas;
use crate::frames::{paint_frame, FrameConfig, PaintContext};
use crate::types::FrameBuffer;

/// Output surface size for a photo of `(w, h)` under `config`:
/// the border on every side, plus the polaroid caption strip at the bottom.
pub fn output_size(source: (usize, usize), config: &FrameConfig) -> (usize, usize) {
    let border = 2 * config.width_px as usize;
    let extra = config.style.extra_bottom(config.width_px) as usize;
    (source.0 + border, source.1 + border + extra)
}

/// Render `source` framed per `config` into `canvas`, reusing its allocation.
pub fn render_into(canvas: &mut Canvas, source: &FrameBuffer, config: &FrameConfig) {
    // 1) + 2) Padding and surface size
    let (w, h) = output_size(source.dimensions(), config);
    canvas.resize(w, h);

    // 3) Start from transparent
    canvas.clear();

    // 4) Style painter draws the background/border
    let size = config.width_px as f32;
    let ctx = PaintContext {
        size,
        color: config.color,
        image_w: source.width as f32,
        image_h: source.height as f32,
    };
    paint_frame(config.style, canvas, &ctx);

    // 5) The photo itself, unscaled, inside the border
    let offset = config.width_px as i64;
    canvas.draw_image(source, offset, offset);

    debug!(
        "rendered {} frame ({}px, {}) -> {}x{}",
        config.style, config.width_px, config.color, w, h
    );
}

/// Render into a fresh surface and hand back the pixels.
pub fn render(source: &FrameBuffer, config: &FrameConfig) -> FrameBuffer {
    let mut canvas = Canvas::new(0, 0);
    render_into(&mut canvas, source, config);
    canvas.into_frame_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Rgb, DEFAULT_FRAME_COLOR};
    use crate::frames::FrameStyle;

    /// A little photo with a gradient so misplaced pixels show up.
    fn photo(w: usize, h: usize) -> FrameBuffer {
        let mut fb = FrameBuffer::new(w, h);
        for y in 0..h {
            for x in 0..w {
                fb.pixels[y * w + x] = 0xFF00_0000 | ((x as u32 * 2) << 16) | ((y as u32 * 2) << 8) | 0x40;
            }
        }
        fb
    }

    #[test]
    fn dimensions_follow_border_and_caption_strip() {
        let src = photo(37, 23);
        for style in FrameStyle::ALL {
            for width_px in [0, 1, 7, 20, 100] {
                let config = FrameConfig { style, color: DEFAULT_FRAME_COLOR, width_px };
                let out = render(&src, &config);
                let extra = if style == FrameStyle::Polaroid { 2 * width_px as usize } else { 0 };
                assert_eq!(
                    out.dimensions(),
                    (37 + 2 * width_px as usize, 23 + 2 * width_px as usize + extra),
                    "{style} at {width_px}px"
                );
            }
        }
    }

    #[test]
    fn photo_lands_unscaled_at_the_border_offset() {
        let src = photo(10, 8);
        for style in FrameStyle::ALL {
            let config = FrameConfig { style, color: Rgb::new(1, 2, 3), width_px: 6 };
            let out = render(&src, &config);
            for y in 0..8 {
                for x in 0..10 {
                    assert_eq!(out.get(x + 6, y + 6), src.get(x, y), "{style} at ({x},{y})");
                }
            }
        }
    }

    #[test]
    fn modern_example_from_a_square_photo() {
        let src = photo(100, 100);
        let config = FrameConfig { style: FrameStyle::Modern, color: DEFAULT_FRAME_COLOR, width_px: 20 };
        let out = render(&src, &config);
        assert_eq!(out.dimensions(), (140, 140));
        // 4px line centered on the (18,18) 104x104 outline -> rows/cols 16..20 and 120..124
        let line = 0xFF58_1200;
        assert_eq!(out.get(16, 16), Some(line));
        assert_eq!(out.get(19, 70), Some(line));
        assert_eq!(out.get(123, 123), Some(line));
        assert_eq!(out.get(15, 70), Some(0xFF8B_4513));
        assert_eq!(out.get(124, 70), Some(0xFF8B_4513));
    }

    #[test]
    fn rendering_twice_is_pixel_identical() {
        let src = photo(30, 20);
        for style in FrameStyle::ALL {
            let config = FrameConfig { style, color: Rgb::new(200, 40, 90), width_px: 13 };
            assert_eq!(render(&src, &config), render(&src, &config), "{style}");
        }
    }

    #[test]
    fn reused_surface_forgets_the_previous_style() {
        let src = photo(30, 20);
        let base = FrameConfig { style: FrameStyle::Ornate, color: DEFAULT_FRAME_COLOR, width_px: 12 };
        let fresh = render(&src, &base);

        let mut canvas = Canvas::new(0, 0);
        render_into(&mut canvas, &src, &base);
        render_into(&mut canvas, &src, &FrameConfig { style: FrameStyle::Neon, ..base });
        render_into(&mut canvas, &src, &FrameConfig { style: FrameStyle::Polaroid, ..base });
        render_into(&mut canvas, &src, &base);
        assert_eq!(canvas.frame_buffer(), &fresh);
    }

    #[test]
    fn zero_width_border_is_just_the_photo_for_solid_styles() {
        let src = photo(12, 9);
        let config = FrameConfig { style: FrameStyle::Modern, color: DEFAULT_FRAME_COLOR, width_px: 0 };
        let out = render(&src, &config);
        assert_eq!(out, src);
    }
}
