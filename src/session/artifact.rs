use serde_json::Value;

use crate::encode::png::png_data_url;
use crate::foundation::core::DisplaySize;
use crate::render::frame::FrameRGBA;

/// Result of one finished render, emitted exactly once.
#[derive(Clone, Debug)]
pub struct CompletionArtifact {
    pub width: u32,
    pub height: u32,
    /// Raw surface snapshot (premultiplied RGBA8).
    pub frame: FrameRGBA,
    /// PNG encoding of `frame`.
    pub png: Vec<u8>,
    /// Host payload from the composition, passed through untouched.
    pub extra: Option<Value>,
    /// Render generation that produced this artifact.
    pub generation: u64,
    pub display: DisplaySize,
    pub debug: bool,
}

impl CompletionArtifact {
    /// The PNG as a `data:image/png;base64,...` URL.
    pub fn data_url(&self) -> String {
        png_data_url(&self.png)
    }
}
