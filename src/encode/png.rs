use std::io::Cursor;

use base64::Engine as _;

use crate::foundation::error::{EaselError, EaselResult};
use crate::render::frame::FrameRGBA;

/// Convert premultiplied RGBA8 to straight alpha.
pub fn unpremultiply_rgba8(premul: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(premul.len());
    for px in premul.chunks_exact(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            out.extend_from_slice(&[0, 0, 0, 0]);
            continue;
        }
        let un = |c: u8| -> u8 { ((u16::from(c) * 255 + a / 2) / a).min(255) as u8 };
        out.extend_from_slice(&[un(px[0]), un(px[1]), un(px[2]), px[3]]);
    }
    out
}

/// Encode a frame as PNG bytes (straight alpha).
pub fn encode_png(frame: &FrameRGBA) -> EaselResult<Vec<u8>> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(EaselError::encode(format!(
            "frame byte length {} does not match {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }
    let straight = if frame.premultiplied {
        unpremultiply_rgba8(&frame.data)
    } else {
        frame.data.clone()
    };
    let img = image::RgbaImage::from_raw(frame.width, frame.height, straight)
        .ok_or_else(|| EaselError::encode("frame buffer too small for its dimensions"))?;

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| EaselError::encode(format!("png encode failed: {e}")))?;
    Ok(buf)
}

/// `data:image/png;base64,...` for PNG bytes.
pub fn png_data_url(png: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    )
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
