// The nine frame styles and the painter behind each one.
// Every painter draws the frame *behind* the photo; render.rs composites the photo last.
// Visual: the colored border, mats, glows and corner blocks around your picture.

use std::fmt;

use clap::ValueEnum;

use crate::canvas::{Canvas, LinearGradient, Paint, Shadow};
use crate::color::{Rgb, Rgba, DEFAULT_FRAME_COLOR};

pub const DEFAULT_FRAME_WIDTH: u32 = 20;
pub const MAX_FRAME_WIDTH: u32 = 100;

/// Named visual treatment, in the order the style buttons appear.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum FrameStyle {
    #[default]
    Classic,
    Modern,
    Ornate,
    Polaroid,
    Shadow,
    Double,
    Neon,
    Vintage,
    Emboss,
}

impl FrameStyle {
    pub const ALL: [FrameStyle; 9] = [
        FrameStyle::Classic,
        FrameStyle::Modern,
        FrameStyle::Ornate,
        FrameStyle::Polaroid,
        FrameStyle::Shadow,
        FrameStyle::Double,
        FrameStyle::Neon,
        FrameStyle::Vintage,
        FrameStyle::Emboss,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FrameStyle::Classic => "classic",
            FrameStyle::Modern => "modern",
            FrameStyle::Ornate => "ornate",
            FrameStyle::Polaroid => "polaroid",
            FrameStyle::Shadow => "shadow",
            FrameStyle::Double => "double",
            FrameStyle::Neon => "neon",
            FrameStyle::Vintage => "vintage",
            FrameStyle::Emboss => "emboss",
        }
    }

    /// Extra rows below the photo beyond the usual border (the polaroid caption strip).
    pub fn extra_bottom(self, width_px: u32) -> u32 {
        match self {
            FrameStyle::Polaroid => 2 * width_px,
            _ => 0,
        }
    }
}

impl fmt::Display for FrameStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Style, color and border width; always fully defined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameConfig {
    pub style: FrameStyle,
    pub color: Rgb,
    pub width_px: u32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self { style: FrameStyle::Classic, color: DEFAULT_FRAME_COLOR, width_px: DEFAULT_FRAME_WIDTH }
    }
}

/// What a painter may read: border width, frame color and the photo size.
/// The surface size comes from the canvas itself.
pub struct PaintContext {
    pub size: f32,
    pub color: Rgb,
    pub image_w: f32,
    pub image_h: f32,
}

// Fixed palette used by several styles
const CREAM: Rgb = Rgb::new(0xF5, 0xF5, 0xDC);
const NAVY: Rgb = Rgb::new(0x1a, 0x1a, 0x2e);
const SEPIA: Rgb = Rgb::new(0xc9, 0xa8, 0x76);
const LIGHT_GRAY: Rgb = Rgb::new(0xe8, 0xe8, 0xe8);

/// Paint the frame for `style` onto an already sized and cleared canvas.
pub fn paint_frame(style: FrameStyle, canvas: &mut Canvas, ctx: &PaintContext) {
    match style {
        FrameStyle::Classic => paint_classic(canvas, ctx),
        FrameStyle::Modern => paint_modern(canvas, ctx),
        FrameStyle::Ornate => paint_ornate(canvas, ctx),
        FrameStyle::Polaroid => paint_polaroid(canvas, ctx),
        FrameStyle::Shadow => paint_shadow(canvas, ctx),
        FrameStyle::Double => paint_double(canvas, ctx),
        FrameStyle::Neon => paint_neon(canvas, ctx),
        FrameStyle::Vintage => paint_vintage(canvas, ctx),
        FrameStyle::Emboss => paint_emboss(canvas, ctx),
    }
}

fn surface(canvas: &Canvas) -> (f32, f32) {
    (canvas.width() as f32, canvas.height() as f32)
}

fn solid(c: Rgb) -> Paint {
    Paint::Solid(c.into())
}

fn fill_all(canvas: &mut Canvas, paint: &Paint) {
    let (w, h) = surface(canvas);
    canvas.fill_rect(0.0, 0.0, w, h, paint);
}

/// Solid frame color with a soft dark line hugging the photo.
fn paint_classic(canvas: &mut Canvas, ctx: &PaintContext) {
    fill_all(canvas, &solid(ctx.color));

    canvas.set_shadow(Some(Shadow::glow(Rgba::black(0.5), ctx.size / 2.0)));
    canvas.stroke_rect(ctx.size, ctx.size, ctx.image_w, ctx.image_h, 2.0, &Rgba::black(0.3).into());
    canvas.set_shadow(None);
}

/// Solid frame color plus one crisp 4px line, 20% darker.
fn paint_modern(canvas: &mut Canvas, ctx: &PaintContext) {
    fill_all(canvas, &solid(ctx.color));

    let line = solid(ctx.color.shade(-20));
    canvas.stroke_rect(ctx.size - 2.0, ctx.size - 2.0, ctx.image_w + 4.0, ctx.image_h + 4.0, 4.0, &line);
}

/// Three nested outlines getting darker inward, plus dark corner blocks.
fn paint_ornate(canvas: &mut Canvas, ctx: &PaintContext) {
    fill_all(canvas, &solid(ctx.color));
    let (w, h) = surface(canvas);

    for i in 0..3 {
        let offset = (ctx.size / 4.0) * i as f32;
        let line = solid(ctx.color.shade(-15 * i));
        canvas.stroke_rect(offset, offset, w - offset * 2.0, h - offset * 2.0, 3.0, &line);
    }

    let corner = ctx.size / 2.0;
    let corner_paint = solid(ctx.color.shade(-30));
    for (x, y) in [(0.0, 0.0), (w - corner, 0.0), (0.0, h - corner), (w - corner, h - corner)] {
        canvas.fill_rect(x, y, corner, corner, &corner_paint);
    }
}

/// White card with a deeper bottom strip; the card casts a soft shadow downward.
fn paint_polaroid(canvas: &mut Canvas, _ctx: &PaintContext) {
    let white = Paint::Solid(Rgba::WHITE);
    fill_all(canvas, &white);

    // The card covers the whole surface, so it paints over its own shadow
    canvas.set_shadow(Some(Shadow { color: Rgba::black(0.2), blur: 15.0, offset_x: 0.0, offset_y: 5.0 }));
    fill_all(canvas, &white);
    canvas.set_shadow(None);
}

/// Transparent background; a white placeholder card at the photo position casts
/// a blurred shadow down and to the right.
fn paint_shadow(canvas: &mut Canvas, ctx: &PaintContext) {
    canvas.clear();

    canvas.set_shadow(Some(Shadow {
        color: Rgba::black(0.5),
        blur: ctx.size,
        offset_x: ctx.size / 4.0,
        offset_y: ctx.size / 4.0,
    }));
    canvas.fill_rect(ctx.size, ctx.size, ctx.image_w, ctx.image_h, &Rgba::WHITE.into());
    canvas.set_shadow(None);
}

/// Outer frame color, a cream mat band, and a thin frame-colored line at the photo edge.
fn paint_double(canvas: &mut Canvas, ctx: &PaintContext) {
    fill_all(canvas, &solid(ctx.color));
    let (w, h) = surface(canvas);

    let mat = ctx.size / 2.0;
    canvas.fill_rect(mat, mat, w - mat * 2.0, h - mat * 2.0, &solid(CREAM));

    canvas.stroke_rect(ctx.size, ctx.size, ctx.image_w, ctx.image_h, 2.0, &solid(ctx.color));
}

/// Dark navy board with two glowing tubes in the frame color.
fn paint_neon(canvas: &mut Canvas, ctx: &PaintContext) {
    fill_all(canvas, &solid(NAVY));

    let neon = solid(ctx.color);
    canvas.set_shadow(Some(Shadow::glow(Rgba::opaque(ctx.color), 15.0)));
    canvas.stroke_rect(ctx.size - 2.0, ctx.size - 2.0, ctx.image_w + 4.0, ctx.image_h + 4.0, 4.0, &neon);
    canvas.stroke_rect(ctx.size - 5.0, ctx.size - 5.0, ctx.image_w + 10.0, ctx.image_h + 10.0, 1.0, &neon);
    canvas.set_shadow(None);
}

/// Sepia board darkened toward two opposite corners, a dark outer line and a faint light inner line.
fn paint_vintage(canvas: &mut Canvas, ctx: &PaintContext) {
    fill_all(canvas, &solid(SEPIA));
    let (w, h) = surface(canvas);

    let edges = LinearGradient::new(0.0, 0.0, w, h)
        .stop(0.0, Rgba::black(0.3))
        .stop(0.5, Rgba::black(0.0))
        .stop(1.0, Rgba::black(0.3));
    fill_all(canvas, &edges.into());

    canvas.stroke_rect(ctx.size - 3.0, ctx.size - 3.0, ctx.image_w + 6.0, ctx.image_h + 6.0, 2.0, &Rgba::black(0.5).into());
    canvas.stroke_rect(
        ctx.size + 2.0,
        ctx.size + 2.0,
        ctx.image_w - 4.0,
        ctx.image_h - 4.0,
        1.0,
        &Rgba::new(255, 255, 255, 0.3).into(),
    );
}

/// Light gray board with a dark-to-light bevel along the top and left margins.
fn paint_emboss(canvas: &mut Canvas, ctx: &PaintContext) {
    fill_all(canvas, &solid(LIGHT_GRAY));
    let (w, h) = surface(canvas);
    let size = ctx.size;

    let bevel: Paint = LinearGradient::new(size, size, size + 10.0, size + 10.0)
        .stop(0.0, Rgba::black(0.4))
        .stop(1.0, Rgba::new(255, 255, 255, 0.6))
        .into();
    canvas.fill_rect(0.0, 0.0, size, h, &bevel);
    canvas.fill_rect(size, 0.0, w - size, size, &bevel);

    canvas.stroke_rect(size, size, ctx.image_w, ctx.image_h, 3.0, &solid(ctx.color));
    canvas.stroke_rect(
        size + 2.0,
        size + 2.0,
        ctx.image_w - 4.0,
        ctx.image_h - 4.0,
        1.0,
        &Rgba::new(255, 255, 255, 0.5).into(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::unpack_argb;

    fn painted(style: FrameStyle, color: Rgb, size: u32, img: (u32, u32)) -> Canvas {
        let extra = style.extra_bottom(size);
        let mut c = Canvas::new((img.0 + 2 * size) as usize, (img.1 + 2 * size + extra) as usize);
        let ctx = PaintContext { size: size as f32, color, image_w: img.0 as f32, image_h: img.1 as f32 };
        paint_frame(style, &mut c, &ctx);
        c
    }

    fn rgb_at(c: &Canvas, x: usize, y: usize) -> (u8, u8, u8, u8) {
        unpack_argb(c.frame_buffer().get(x, y).unwrap())
    }

    #[test]
    fn style_names_round_trip_through_clap() {
        for s in FrameStyle::ALL {
            assert_eq!(FrameStyle::from_str(s.name(), true).unwrap(), s);
        }
    }

    #[test]
    fn only_polaroid_has_a_caption_strip() {
        for s in FrameStyle::ALL {
            let expected = if s == FrameStyle::Polaroid { 40 } else { 0 };
            assert_eq!(s.extra_bottom(20), expected);
        }
    }

    #[test]
    fn classic_line_hugs_the_photo_with_a_soft_shadow() {
        let c = painted(FrameStyle::Classic, DEFAULT_FRAME_COLOR, 20, (60, 60));
        // 2px line centered on the photo edge at x=20 covers 19..21
        let line = rgb_at(&c, 19, 50);
        let near = rgb_at(&c, 15, 50);
        let far = rgb_at(&c, 5, 50);
        assert_eq!(line.0, 255);
        // Darkest on the line, shadow fading outward, untouched frame color beyond the blur
        assert!(line.1 < near.1, "line {line:?} near {near:?}");
        assert!(near.1 < 0x8B, "near {near:?}");
        assert_eq!(far, (255, 0x8B, 0x45, 0x13));
        // Centered shadow: same falloff on the right side of the photo
        let right = rgb_at(&c, 84, 50);
        assert!(right.1.abs_diff(near.1) <= 1, "near {near:?} right {right:?}");
    }

    #[test]
    fn ornate_inner_lines_step_darker() {
        let c = painted(FrameStyle::Ornate, DEFAULT_FRAME_COLOR, 20, (50, 50));
        let at = |x, y| {
            let (_, r, g, b) = rgb_at(&c, x, y);
            Rgb::new(r, g, b)
        };
        // Offsets 0, 5, 10 with 3px lines: bands -1.5..1.5, 3.5..6.5, 8.5..11.5
        assert_eq!(at(45, 0), DEFAULT_FRAME_COLOR);
        assert_eq!(at(45, 5), DEFAULT_FRAME_COLOR.shade(-15));
        assert_eq!(at(45, 10), DEFAULT_FRAME_COLOR.shade(-30));
        assert_eq!(at(0, 45), DEFAULT_FRAME_COLOR);
        assert_eq!(at(84, 45), DEFAULT_FRAME_COLOR.shade(-15));
        assert_eq!(at(79, 45), DEFAULT_FRAME_COLOR.shade(-30));
    }

    #[test]
    fn modern_line_is_twenty_percent_darker() {
        let c = painted(FrameStyle::Modern, DEFAULT_FRAME_COLOR, 20, (100, 100));
        // Band runs 16..20 on each side
        assert_eq!(rgb_at(&c, 17, 60), (255, 0x58, 0x12, 0x00));
        assert_eq!(rgb_at(&c, 121, 60), (255, 0x58, 0x12, 0x00));
        assert_eq!(rgb_at(&c, 10, 60), (255, 0x8B, 0x45, 0x13));
    }

    #[test]
    fn ornate_corners_are_thirty_percent_darker() {
        let c = painted(FrameStyle::Ornate, DEFAULT_FRAME_COLOR, 20, (50, 50));
        let dark = DEFAULT_FRAME_COLOR.shade(-30);
        let expect = (255, dark.r, dark.g, dark.b);
        assert_eq!(rgb_at(&c, 5, 5), expect);
        assert_eq!(rgb_at(&c, 85, 5), expect);
        assert_eq!(rgb_at(&c, 5, 85), expect);
        assert_eq!(rgb_at(&c, 85, 85), expect);
        // Top margin between the outer line (ends at 1.5) and the next one (starts at 3.5)
        assert_eq!(rgb_at(&c, 45, 2), (255, 0x8B, 0x45, 0x13));
    }

    #[test]
    fn polaroid_is_a_white_card() {
        let c = painted(FrameStyle::Polaroid, DEFAULT_FRAME_COLOR, 10, (30, 30));
        assert_eq!(c.height(), 30 + 20 + 20);
        assert!(c.frame_buffer().pixels.iter().all(|&p| p == 0xFFFFFFFF));
    }

    #[test]
    fn shadow_style_keeps_a_transparent_background() {
        let c = painted(FrameStyle::Shadow, DEFAULT_FRAME_COLOR, 20, (60, 60));
        assert_eq!(rgb_at(&c, 0, 0).0, 0);
        assert_eq!(rgb_at(&c, 50, 50), (255, 255, 255, 255));
        // Shadow falls down-right of the card, not up-left
        let below_right = rgb_at(&c, 84, 84).0;
        let above_left = rgb_at(&c, 15, 15).0;
        assert!(below_right > above_left);
    }

    #[test]
    fn double_has_cream_mat_and_outer_frame() {
        let c = painted(FrameStyle::Double, Rgb::new(0, 0, 0), 20, (40, 40));
        assert_eq!(rgb_at(&c, 5, 5), (255, 0, 0, 0));
        assert_eq!(rgb_at(&c, 14, 30), (255, 0xF5, 0xF5, 0xDC));
        // 2px inner line centered on the photo edge: 19..21
        assert_eq!(rgb_at(&c, 19, 30), (255, 0, 0, 0));
    }

    #[test]
    fn neon_glows_on_navy() {
        let color = Rgb::new(0, 255, 0);
        let c = painted(FrameStyle::Neon, color, 20, (40, 40));
        assert_eq!(rgb_at(&c, 17, 30), (255, 0, 255, 0));
        // Glow lifts the green channel near the tube, fading toward the corner
        let (_, _, near, _) = rgb_at(&c, 10, 30);
        let (a, _, far, _) = rgb_at(&c, 0, 0);
        assert_eq!(a, 255);
        assert!(near > 0x1a);
        assert!(far < near);
    }

    #[test]
    fn vintage_darkens_corners_more_than_center() {
        let c = painted(FrameStyle::Vintage, DEFAULT_FRAME_COLOR, 20, (100, 100));
        let corner = rgb_at(&c, 1, 1).1;
        // Pixel center (69.5, 70.5) sits exactly on the transparent middle stop
        let center = rgb_at(&c, 69, 70).1;
        assert!(corner < center);
        assert_eq!(center, 0xc9);
    }

    #[test]
    fn emboss_bevel_is_dark_on_the_top_left_margin() {
        let c = painted(FrameStyle::Emboss, DEFAULT_FRAME_COLOR, 20, (60, 60));
        let bevel = rgb_at(&c, 5, 5).1;
        assert!(bevel < 0xe8);
        // Right margin is not beveled
        assert_eq!(rgb_at(&c, 95, 50), (255, 0xe8, 0xe8, 0xe8));
    }
}
