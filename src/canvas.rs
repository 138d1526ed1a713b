// Software 2D drawing surface with the handful of primitives the frame painters need:
// clear, fill_rect, stroke_rect (with optional drop shadow), linear gradients, draw_image.
// Visual: this is the picture being built up layer by layer before you see it.
//
// Pixels are blended source-over in straight alpha and stored as 0xAARRGGBB.
// Rectangles take fractional coordinates; edge pixels get partial coverage
// (exact overlap area), so a 3px stroke at x=1.5 still looks crisp.

use crate::blur::gaussian_blur_mask;
use crate::color::Rgba;
use crate::types::{pack_argb, unpack_argb, FrameBuffer, Mask};

/// Axis-aligned rectangle in canvas coordinates, always normalized (x0<=x1, y0<=y1).
#[derive(Clone, Copy, Debug, PartialEq)]
struct RectF {
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
}

impl RectF {
    /// From canvas-style (x, y, w, h); negative extents flip the rect like a browser does.
    fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        let (x0, x1) = if w < 0.0 { (x + w, x) } else { (x, x + w) };
        let (y0, y1) = if h < 0.0 { (y + h, y) } else { (y, y + h) };
        Self { x0, y0, x1, y1 }
    }

    fn inset(self, d: f32) -> Self {
        Self { x0: self.x0 + d, y0: self.y0 + d, x1: self.x1 - d, y1: self.y1 - d }
    }

    fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    /// Fraction of the unit pixel square at (px, py) covered by this rect.
    #[inline]
    fn coverage(&self, px: f32, py: f32) -> f32 {
        let ox = (self.x1.min(px + 1.0) - self.x0.max(px)).max(0.0);
        let oy = (self.y1.min(py + 1.0) - self.y0.max(py)).max(0.0);
        ox * oy
    }
}

/// What a fill or stroke covers.
#[derive(Clone, Copy, Debug)]
enum Shape {
    Rect(RectF),
    // Stroke outline: the outer rect minus the inner one (None once the stroke eats the middle)
    Ring { outer: RectF, inner: Option<RectF> },
}

impl Shape {
    fn bounds(&self) -> RectF {
        match *self {
            Shape::Rect(r) => r,
            Shape::Ring { outer, .. } => outer,
        }
    }

    #[inline]
    fn coverage(&self, px: f32, py: f32) -> f32 {
        match self {
            Shape::Rect(r) => r.coverage(px, py),
            Shape::Ring { outer, inner } => {
                let c = outer.coverage(px, py) - inner.map_or(0.0, |i| i.coverage(px, py));
                c.max(0.0)
            }
        }
    }
}

/// Linear gradient between two points with color stops at offsets in [0,1].
/// Colors between stops are interpolated with premultiplied alpha.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    stops: Vec<(f32, Rgba)>,
}

impl LinearGradient {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1, stops: Vec::new() }
    }

    /// Add a stop; stops are kept sorted by offset (equal offsets keep insertion order).
    pub fn stop(mut self, offset: f32, color: Rgba) -> Self {
        let offset = offset.clamp(0.0, 1.0);
        let at = self.stops.partition_point(|(o, _)| *o <= offset);
        self.stops.insert(at, (offset, color));
        self
    }

    /// Color at canvas point (x, y).
    pub fn color_at(&self, x: f32, y: f32) -> Rgba {
        let (dx, dy) = (self.x1 - self.x0, self.y1 - self.y0);
        let len2 = dx * dx + dy * dy;
        // A zero-length gradient paints nothing
        if len2 == 0.0 || self.stops.is_empty() {
            return Rgba::TRANSPARENT;
        }
        let t = (((x - self.x0) * dx + (y - self.y0) * dy) / len2).clamp(0.0, 1.0);

        let (first, last) = (self.stops[0], self.stops[self.stops.len() - 1]);
        if t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }
        for pair in self.stops.windows(2) {
            let ((o0, c0), (o1, c1)) = (pair[0], pair[1]);
            if t >= o0 && t <= o1 {
                let u = if o1 > o0 { (t - o0) / (o1 - o0) } else { 1.0 };
                return lerp_premultiplied(c0, c1, u);
            }
        }
        last.1
    }
}

fn lerp_premultiplied(c0: Rgba, c1: Rgba, u: f32) -> Rgba {
    let a = c0.a * (1.0 - u) + c1.a * u;
    if a <= 0.0 {
        return Rgba::TRANSPARENT;
    }
    let ch = |s0: u8, s1: u8| {
        let v = (s0 as f32 * c0.a * (1.0 - u) + s1 as f32 * c1.a * u) / a;
        v.round().clamp(0.0, 255.0) as u8
    };
    Rgba::new(ch(c0.r, c1.r), ch(c0.g, c1.g), ch(c0.b, c1.b), a)
}

/// How a shape is colored.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear(LinearGradient),
}

impl Paint {
    #[inline]
    fn color_at(&self, x: f32, y: f32) -> Rgba {
        match self {
            Paint::Solid(c) => *c,
            Paint::Linear(g) => g.color_at(x, y),
        }
    }
}

impl From<Rgba> for Paint {
    fn from(c: Rgba) -> Self {
        Paint::Solid(c)
    }
}

impl From<LinearGradient> for Paint {
    fn from(g: LinearGradient) -> Self {
        Paint::Linear(g)
    }
}

/// Drop shadow applied to every fill/stroke while it is set.
/// Visual: a blurred, tinted copy of the shape drawn underneath it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub color: Rgba,
    pub blur: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Shadow {
    /// Glow/shadow centered on the shape.
    pub fn glow(color: Rgba, blur: f32) -> Self {
        Self { color, blur, offset_x: 0.0, offset_y: 0.0 }
    }

    /// Nothing is drawn for a transparent color, or with no blur and no offset.
    pub fn is_visible(&self) -> bool {
        self.color.a > 0.0 && (self.blur > 0.0 || self.offset_x != 0.0 || self.offset_y != 0.0)
    }
}

pub struct Canvas {
    fb: FrameBuffer,
    shadow: Option<Shadow>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self { fb: FrameBuffer::new(width, height), shadow: None }
    }

    pub fn width(&self) -> usize {
        self.fb.width
    }

    pub fn height(&self) -> usize {
        self.fb.height
    }

    /// Change the surface size. Like assigning canvas.width/height in a browser,
    /// this wipes the pixels and drops any shadow state.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.fb.width = width;
        self.fb.height = height;
        self.fb.pixels.clear();
        self.fb.pixels.resize(width * height, 0);
        self.shadow = None;
    }

    /// Every pixel becomes transparent black.
    pub fn clear(&mut self) {
        self.fb.pixels.fill(0);
    }

    pub fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.shadow = shadow;
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn into_frame_buffer(self) -> FrameBuffer {
        self.fb
    }

    /// Fill the rectangle (x, y, w, h).
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, paint: &Paint) {
        let r = RectF::from_xywh(x, y, w, h);
        if r.is_empty() {
            return;
        }
        self.paint_shape(Shape::Rect(r), paint);
    }

    /// Stroke the outline of (x, y, w, h) with a line `line_width` wide, centered on the edge.
    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, line_width: f32, paint: &Paint) {
        if line_width <= 0.0 || (w == 0.0 && h == 0.0) {
            return;
        }
        let r = RectF::from_xywh(x, y, w, h);
        let half = line_width / 2.0;
        // A degenerate rect is a single butt-capped segment, not a closed outline
        if w == 0.0 {
            self.paint_shape(Shape::Rect(RectF { x0: r.x0 - half, x1: r.x0 + half, ..r }), paint);
            return;
        }
        if h == 0.0 {
            self.paint_shape(Shape::Rect(RectF { y0: r.y0 - half, y1: r.y0 + half, ..r }), paint);
            return;
        }
        let outer = r.inset(-half);
        let inner = r.inset(half);
        let inner = if inner.is_empty() { None } else { Some(inner) };
        self.paint_shape(Shape::Ring { outer, inner }, paint);
    }

    /// Composite `src` unscaled with its top-left corner at (dx, dy), clipped to the surface.
    /// Visual: the photo lands inside the frame.
    pub fn draw_image(&mut self, src: &FrameBuffer, dx: i64, dy: i64) {
        for sy in 0..src.height {
            let ty = dy + sy as i64;
            if ty < 0 || ty >= self.fb.height as i64 {
                continue;
            }
            for sx in 0..src.width {
                let tx = dx + sx as i64;
                if tx < 0 || tx >= self.fb.width as i64 {
                    continue;
                }
                let px = src.pixels[sy * src.width + sx];
                let idx = ty as usize * self.fb.width + tx as usize;
                let (a, r, g, b) = unpack_argb(px);
                if a == 255 {
                    self.fb.pixels[idx] = px; // opaque photo pixels replace what is under them
                } else if a > 0 {
                    self.blend(idx, Rgba::new(r, g, b, a as f32 / 255.0), 1.0);
                }
            }
        }
    }

    fn paint_shape(&mut self, shape: Shape, paint: &Paint) {
        if let Some(shadow) = self.shadow.filter(Shadow::is_visible) {
            self.draw_shadow(shape, paint, shadow);
        }

        let b = shape.bounds();
        let (x_start, x_end) = clip_span(b.x0, b.x1, self.fb.width);
        let (y_start, y_end) = clip_span(b.y0, b.y1, self.fb.height);
        for py in y_start..y_end {
            for px in x_start..x_end {
                let cov = shape.coverage(px as f32, py as f32);
                if cov <= 0.0 {
                    continue;
                }
                let color = paint.color_at(px as f32 + 0.5, py as f32 + 0.5);
                self.blend(py * self.fb.width + px, color, cov);
            }
        }
    }

    /// Rasterize the shape's opacity into a mask padded by the blur reach,
    /// blur it, then tint and composite it at the shadow offset.
    fn draw_shadow(&mut self, shape: Shape, paint: &Paint, shadow: Shadow) {
        let sigma = shadow.blur / 2.0;
        let margin = (3.0 * sigma).ceil() as usize + 1;
        let (w, h) = (self.fb.width, self.fb.height);
        let mut mask = Mask::new(w + 2 * margin, h + 2 * margin);

        // 1) Silhouette: coverage times paint opacity, in mask space (canvas + margin)
        let b = shape.bounds();
        let m = margin as f32;
        let (x_start, x_end) = clip_span(b.x0 + m, b.x1 + m, mask.width);
        let (y_start, y_end) = clip_span(b.y0 + m, b.y1 + m, mask.height);
        for my in y_start..y_end {
            for mx in x_start..x_end {
                let (cx, cy) = (mx as f32 - m, my as f32 - m);
                let cov = shape.coverage(cx, cy);
                if cov <= 0.0 {
                    continue;
                }
                let a = paint.color_at(cx + 0.5, cy + 0.5).a;
                mask.alpha[my * mask.width + mx] = (cov * a).clamp(0.0, 1.0);
            }
        }

        // 2) Soften
        gaussian_blur_mask(&mut mask, sigma);

        // 3) Tint + composite, shifted by the offset
        for py in 0..h {
            for px in 0..w {
                // Sample at the pixel center
                let sx = px as f32 + 0.5 - shadow.offset_x + m;
                let sy = py as f32 + 0.5 - shadow.offset_y + m;
                let a = sample_bilinear(&mask, sx, sy);
                if a > 0.0 {
                    self.blend(py * w + px, shadow.color, a);
                }
            }
        }
    }

    /// Source-over blend of `color` at `coverage` onto pixel `idx`.
    #[inline]
    fn blend(&mut self, idx: usize, color: Rgba, coverage: f32) {
        let sa = (color.a * coverage).clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let (da8, dr, dg, db) = unpack_argb(self.fb.pixels[idx]);
        let da = da8 as f32 / 255.0;
        let keep = da * (1.0 - sa);
        let out_a = sa + keep;
        let ch = |s: u8, d: u8| ((s as f32 * sa + d as f32 * keep) / out_a).round().clamp(0.0, 255.0) as u8;
        let a8 = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
        self.fb.pixels[idx] = pack_argb(a8, ch(color.r, dr), ch(color.g, dg), ch(color.b, db));
    }
}

/// Pixel index range [start, end) touched by the span [lo, hi), clipped to 0..limit.
fn clip_span(lo: f32, hi: f32, limit: usize) -> (usize, usize) {
    let start = lo.floor().max(0.0) as usize;
    let end = (hi.ceil().max(0.0) as usize).min(limit);
    (start.min(end), end)
}

/// Mask value at the continuous pixel position (x, y) (pixel centers at +0.5); 0 outside.
fn sample_bilinear(mask: &Mask, x: f32, y: f32) -> f32 {
    let fx = x - 0.5;
    let fy = y - 0.5;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;
    let at = |ix: f32, iy: f32| -> f32 {
        if ix < 0.0 || iy < 0.0 || ix >= mask.width as f32 || iy >= mask.height as f32 {
            return 0.0;
        }
        mask.alpha[iy as usize * mask.width + ix as usize]
    };
    let top = at(x0, y0) * (1.0 - tx) + at(x0 + 1.0, y0) * tx;
    let bottom = at(x0, y0 + 1.0) * (1.0 - tx) + at(x0 + 1.0, y0 + 1.0) * tx;
    top * (1.0 - ty) + bottom * ty
}
