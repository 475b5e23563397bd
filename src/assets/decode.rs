use std::sync::Arc;

use crate::foundation::error::{EaselError, EaselResult};

/// Raster image in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Vector image kept as a parsed `usvg` tree, rasterized at draw size.
#[derive(Clone, Debug)]
pub struct PreparedSvg {
    /// Parsed SVG tree.
    pub tree: Arc<usvg::Tree>,
}

/// A loaded image resource, ready to be blitted by a surface.
#[derive(Clone, Debug)]
pub enum DecodedImage {
    /// Bitmap formats (PNG, JPEG, GIF, WebP, ...).
    Raster(PreparedImage),
    /// SVG documents.
    Svg(PreparedSvg),
}

impl DecodedImage {
    /// Intrinsic size in pixels (SVG: the document size, rounded up).
    pub fn size(&self) -> (u32, u32) {
        match self {
            Self::Raster(img) => (img.width, img.height),
            Self::Svg(svg) => {
                let s = svg.tree.size();
                (
                    (s.width().ceil() as u32).max(1),
                    (s.height().ceil() as u32).max(1),
                )
            }
        }
    }

    /// Build a raster image from straight-alpha RGBA8 pixels.
    pub fn from_straight_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> EaselResult<Self> {
        if rgba.len() != (width as usize) * (height as usize) * 4 {
            return Err(EaselError::decode("rgba buffer length does not match size"));
        }
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Self::Raster(PreparedImage {
            width,
            height,
            rgba8_premul: Arc::new(rgba),
        }))
    }
}

/// Decode fetched bytes, choosing SVG or raster decoding by content sniffing.
pub fn decode_image_bytes(bytes: &[u8], mime_hint: Option<&str>) -> EaselResult<DecodedImage> {
    let svg_mime = mime_hint.is_some_and(|m| m.starts_with("image/svg"));
    if svg_mime || looks_like_svg(bytes) {
        return parse_svg(bytes).map(DecodedImage::Svg);
    }
    decode_image(bytes).map(DecodedImage::Raster)
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> EaselResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| EaselError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Parse SVG bytes into a prepared `usvg` tree.
pub fn parse_svg(bytes: &[u8]) -> EaselResult<PreparedSvg> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| EaselError::decode(format!("parse svg tree: {e}")))?;
    Ok(PreparedSvg {
        tree: Arc::new(tree),
    })
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let Ok(text) = std::str::from_utf8(head) else {
        return false;
    };
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
