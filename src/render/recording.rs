use crate::assets::decode::DecodedImage;
use crate::foundation::core::{BezPath, Color, Point, Rect};
use crate::foundation::error::{EaselError, EaselResult};
use crate::render::frame::FrameRGBA;
use crate::render::state::{DrawState, FontSpec, LineCap, StateStack, TextAlign, TextBaseline};
use crate::render::surface::Surface;

/// Advance of one character, as a fraction of the font size, in [`RecordingSurface`] metrics.
pub const RECORDING_ADVANCE_EM: f64 = 0.5;

/// One call observed by a [`RecordingSurface`]. Colors already include the global alpha.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Save,
    Restore,
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        line_width: f64,
    },
    FillPath {
        path: BezPath,
        color: Color,
    },
    StrokePath {
        path: BezPath,
        color: Color,
        line_width: f64,
        line_cap: LineCap,
    },
    Clip {
        path: BezPath,
    },
    FillText {
        text: String,
        at: Point,
        font: FontSpec,
        align: TextAlign,
        baseline: TextBaseline,
        color: Color,
    },
    DrawImage {
        size: (u32, u32),
        dst: Rect,
        alpha: f32,
    },
    Commit,
}

/// [`Surface`] that records calls instead of rasterizing.
///
/// Text is measured with a fixed advance of `chars × size × RECORDING_ADVANCE_EM`, so layouts
/// are deterministic without any font installed. Snapshots are blank frames.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    states: StateStack,
    path: BezPath,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            states: StateStack::default(),
            path: BezPath::new(),
            calls: Vec::new(),
        }
    }

    /// Calls recorded since the last resize.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Texts passed to `fill_text`, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of committed settle points.
    pub fn commits(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Commit))
            .count()
    }

    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) -> EaselResult<()> {
        if width == 0 || height == 0 {
            return Err(EaselError::render("surface dimensions must be non-zero"));
        }
        self.width = width;
        self.height = height;
        self.states = StateStack::default();
        self.path = BezPath::new();
        self.calls.clear();
        Ok(())
    }

    fn save(&mut self) {
        self.states.save();
        self.calls.push(DrawCall::Save);
    }

    fn restore(&mut self) {
        if self.states.restore().is_some() {
            self.calls.push(DrawCall::Restore);
        }
    }

    fn save_depth(&self) -> usize {
        self.states.depth()
    }

    fn state(&self) -> &DrawState {
        self.states.current()
    }

    fn state_mut(&mut self) -> &mut DrawState {
        self.states.current_mut()
    }

    fn path_mut(&mut self) -> &mut BezPath {
        &mut self.path
    }

    fn fill(&mut self) {
        let color = self.states.current().effective_fill();
        self.calls.push(DrawCall::FillPath {
            path: self.path.clone(),
            color,
        });
    }

    fn stroke(&mut self) {
        let st = self.states.current();
        self.calls.push(DrawCall::StrokePath {
            path: self.path.clone(),
            color: st.effective_stroke(),
            line_width: st.line_width,
            line_cap: st.line_cap,
        });
    }

    fn clip(&mut self) {
        self.states.current_mut().clip_depth += 1;
        self.calls.push(DrawCall::Clip {
            path: self.path.clone(),
        });
    }

    fn fill_rect(&mut self, rect: Rect) {
        let color = self.states.current().effective_fill();
        self.calls.push(DrawCall::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect) {
        let st = self.states.current();
        self.calls.push(DrawCall::StrokeRect {
            rect,
            color: st.effective_stroke(),
            line_width: st.line_width,
        });
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        let size = self.states.current().font.size_px;
        if !size.is_finite() || size <= 0.0 {
            return 0.0;
        }
        text.chars().count() as f64 * size * RECORDING_ADVANCE_EM
    }

    fn fill_text(&mut self, text: &str, at: Point) {
        let st = self.states.current();
        self.calls.push(DrawCall::FillText {
            text: text.to_owned(),
            at,
            font: st.font.clone(),
            align: st.text_align,
            baseline: st.text_baseline,
            color: st.effective_fill(),
        });
    }

    fn draw_image(&mut self, image: &DecodedImage, dst: Rect) -> EaselResult<()> {
        self.calls.push(DrawCall::DrawImage {
            size: image.size(),
            dst,
            alpha: self.states.current().global_alpha,
        });
        Ok(())
    }

    fn commit(&mut self) -> EaselResult<()> {
        self.calls.push(DrawCall::Commit);
        Ok(())
    }

    fn snapshot(&mut self) -> EaselResult<FrameRGBA> {
        Ok(FrameRGBA::blank(self.width, self.height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
