// Core types shared by the canvas, the painters and the session.

/// A raster of packed pixels.
/// Each entry is 0xAARRGGBB with straight (non-premultiplied) alpha.
/// Visual: the source photo, and the framed result you see and export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,     // pixels
    pub height: usize,    // pixels
    pub pixels: Vec<u32>, // length = width * height
}

impl FrameBuffer {
    /// A fully transparent buffer of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Pixel at (x, y); None when outside the buffer.
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

/// Alpha mask in [0,1] per pixel.
/// Visual: unseen directly; shapes are rasterized into it before their shadow is blurred.
pub struct Mask {
    pub width: usize,
    pub height: usize,
    pub alpha: Vec<f32>, // length = width * height, values in [0.0, 1.0]
}

impl Mask {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, alpha: vec![0.0; width * height] }
    }
}

/// Pack 8-bit channels as 0xAARRGGBB.
#[inline]
pub fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Unpack 0xAARRGGBB into (a, r, g, b).
#[inline]
pub fn unpack_argb(px: u32) -> (u8, u8, u8, u8) {
    (
        ((px >> 24) & 0xFF) as u8,
        ((px >> 16) & 0xFF) as u8,
        ((px >> 8) & 0xFF) as u8,
        (px & 0xFF) as u8,
    )
}
