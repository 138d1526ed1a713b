// Getting photos in and framed pictures out.
// Visual expectation: `load_image()` gives you the uploaded photo as a FrameBuffer
// (0xAARRGGBB per pixel); `save_png()` writes exactly what the preview shows.

use std::path::Path;

use image::{ImageFormat, RgbaImage};
use log::info;

use crate::error::{Error, Result};
use crate::types::{pack_argb, unpack_argb, FrameBuffer};

/// Default export name, same as the download button's.
pub const DEFAULT_EXPORT_NAME: &str = "framed-photo.png";

/// Pack an RGBA8 image into our pixel layout.
pub fn from_rgba(img: &RgbaImage) -> FrameBuffer {
    let (w, h) = img.dimensions();
    let mut out = Vec::with_capacity((w as usize) * (h as usize));
    for pixel in img.pixels() {
        // Each `pixel` is Rgba<u8>. We pack it as 0xAARRGGBB.
        let [r, g, b, a] = pixel.0;
        out.push(pack_argb(a, r, g, b));
    }
    FrameBuffer { width: w as usize, height: h as usize, pixels: out }
}

/// Unpack our pixels back into an RGBA8 image for encoding.
pub fn to_rgba(fb: &FrameBuffer) -> RgbaImage {
    RgbaImage::from_fn(fb.width as u32, fb.height as u32, |x, y| {
        let (a, r, g, b) = unpack_argb(fb.pixels[y as usize * fb.width + x as usize]);
        image::Rgba([r, g, b, a])
    })
}

/// Decode any raster format the `image` crate understands.
/// A corrupt or unsupported file is reported; nothing else changes.
pub fn load_image(path: &Path) -> Result<FrameBuffer> {
    let decoded = image::open(path).map_err(|source| Error::Decode { path: path.to_path_buf(), source })?;
    let rgba = decoded.to_rgba8();
    info!("loaded {} ({}x{})", path.display(), rgba.width(), rgba.height());
    Ok(from_rgba(&rgba))
}

/// Write `fb` as a lossless PNG.
pub fn save_png(fb: &FrameBuffer, path: &Path) -> Result<()> {
    to_rgba(fb)
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| Error::Encode { path: path.to_path_buf(), source })?;
    info!("exported {}x{} to {}", fb.width, fb.height, path.display());
    Ok(())
}
