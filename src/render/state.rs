use serde::{Deserialize, Serialize};

use crate::foundation::core::Color;

/// Stroke end-cap style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    /// Flat end exactly at the endpoint.
    #[default]
    Butt,
    /// Semicircular end.
    Round,
    /// Flat end extended by half the line width.
    Square,
}

/// Horizontal text anchoring relative to the draw position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Text starts at x.
    #[default]
    Left,
    /// Text is centered on x.
    Center,
    /// Text ends at x.
    Right,
}

/// Vertical text anchoring relative to the draw position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    /// y is the top of the line box.
    Top,
    /// y is the middle of the line box.
    Middle,
    /// y is the bottom of the line box.
    Bottom,
    /// y is the alphabetic baseline.
    #[default]
    Alphabetic,
}

/// Upright or slanted glyphs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSlant {
    /// Upright.
    #[default]
    Normal,
    /// Italic face.
    Italic,
    /// Oblique face; resolved like italic.
    Oblique,
}

/// Font selection for text drawing and measurement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Font size in pixels.
    pub size_px: f64,
    /// CSS-style numeric weight (400 normal, 700 bold).
    pub weight: u16,
    /// Slant.
    pub slant: FontSlant,
    /// Comma-separated family candidates.
    pub family: String,
}

/// Family used when a primitive does not name one.
pub const DEFAULT_FONT_FAMILY: &str = "Microsoft YaHei";

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            size_px: 16.0,
            weight: 400,
            slant: FontSlant::Normal,
            family: DEFAULT_FONT_FAMILY.to_owned(),
        }
    }
}

impl FontSpec {
    /// CSS `font` shorthand, e.g. `normal 800 48px Microsoft YaHei`.
    pub fn css(&self) -> String {
        let slant = match self.slant {
            FontSlant::Normal => "normal",
            FontSlant::Italic => "italic",
            FontSlant::Oblique => "oblique",
        };
        format!("{slant} {} {}px {}", self.weight, self.size_px, self.family)
    }
}

/// The style state a surface's save/restore stack scopes.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawState {
    /// Fill color for `fill`, `fill_rect` and `fill_text`.
    pub fill: Color,
    /// Stroke color for `stroke` and `stroke_rect`.
    pub stroke: Color,
    /// Stroke width in pixels.
    pub line_width: f64,
    /// Stroke cap style.
    pub line_cap: LineCap,
    /// Multiplier applied to every draw.
    pub global_alpha: f32,
    /// Current font.
    pub font: FontSpec,
    /// Current text alignment.
    pub text_align: TextAlign,
    /// Current text baseline.
    pub text_baseline: TextBaseline,
    /// Number of clip regions active in this state.
    pub clip_depth: usize,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            fill: Color::BLACK,
            stroke: Color::BLACK,
            line_width: 1.0,
            line_cap: LineCap::Butt,
            global_alpha: 1.0,
            font: FontSpec {
                size_px: 10.0,
                family: "sans-serif".to_owned(),
                ..FontSpec::default()
            },
            text_align: TextAlign::Left,
            text_baseline: TextBaseline::Alphabetic,
            clip_depth: 0,
        }
    }
}

impl DrawState {
    /// Fill color with the global alpha applied.
    pub fn effective_fill(&self) -> Color {
        self.fill.with_alpha_mul(self.global_alpha)
    }

    /// Stroke color with the global alpha applied.
    pub fn effective_stroke(&self) -> Color {
        self.stroke.with_alpha_mul(self.global_alpha)
    }
}

/// Save/restore stack shared by surface implementations.
#[derive(Clone, Debug, Default)]
pub struct StateStack {
    current: DrawState,
    saved: Vec<DrawState>,
}

impl StateStack {
    /// The active state.
    pub fn current(&self) -> &DrawState {
        &self.current
    }

    /// Mutable access to the active state.
    pub fn current_mut(&mut self) -> &mut DrawState {
        &mut self.current
    }

    /// Push a copy of the active state.
    pub fn save(&mut self) {
        self.saved.push(self.current.clone());
    }

    /// Pop the last saved state. Returns how many clip regions were dropped, or `None` when
    /// there was nothing to restore (which, like a 2D canvas, is a no-op).
    pub fn restore(&mut self) -> Option<usize> {
        let prev = self.saved.pop()?;
        let dropped = self.current.clip_depth.saturating_sub(prev.clip_depth);
        self.current = prev;
        Some(dropped)
    }

    /// Number of outstanding saves.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Drop every saved state and reset to defaults. Returns the clip depth that was active.
    pub fn reset(&mut self) -> usize {
        let clips = self.current.clip_depth;
        self.saved.clear();
        self.current = DrawState::default();
        clips
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/state.rs"]
mod tests;
