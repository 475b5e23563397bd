use std::path::Path;

use crate::foundation::error::{EaselError, EaselResult};
use crate::render::state::{FontSlant, FontSpec};

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

#[derive(Clone)]
struct FaceEntry {
    family: String,
    weight: f32,
    italic: bool,
    font: vello_cpu::peniko::FontData,
}

/// A laid-out single line of text plus the face its glyph ids refer to.
pub(crate) struct ShapedLine {
    pub(crate) layout: parley::Layout<TextBrushRgba8>,
    pub(crate) font: vello_cpu::peniko::FontData,
}

/// Font registry and Parley text layout for a surface.
///
/// Faces are registered from raw bytes. Family names in a [`FontSpec`] are matched
/// case-insensitively against registered families, trying each comma-separated candidate in
/// order and falling back to the first registered family.
pub struct FontBook {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    faces: Vec<FaceEntry>,
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("families", &self.families())
            .finish()
    }
}

impl FontBook {
    /// Empty font book.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            faces: Vec::new(),
        }
    }

    /// Register every face contained in `bytes` (TTF/OTF/TTC). Returns the family names added.
    pub fn register_font(&mut self, bytes: Vec<u8>) -> EaselResult<Vec<String>> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        if families.is_empty() {
            return Err(EaselError::validation(
                "no font families registered from font bytes",
            ));
        }

        let blob = vello_cpu::peniko::Blob::from(bytes);
        let mut names = Vec::new();
        for (family_id, infos) in families {
            let family = self
                .font_ctx
                .collection
                .family_name(family_id)
                .ok_or_else(|| EaselError::validation("registered font family has no name"))?
                .to_string();
            for info in infos {
                self.faces.push(FaceEntry {
                    family: family.clone(),
                    weight: info.weight().value(),
                    italic: !matches!(info.style(), parley::style::FontStyle::Normal),
                    font: vello_cpu::peniko::FontData::new(blob.clone(), info.index()),
                });
            }
            tracing::debug!(family = %family, "font family registered");
            names.push(family);
        }
        Ok(names)
    }

    /// Read and register a font file.
    pub fn register_font_file(&mut self, path: impl AsRef<Path>) -> EaselResult<Vec<String>> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            EaselError::validation(format!("failed to read font '{}': {e}", path.display()))
        })?;
        self.register_font(bytes)
    }

    /// Distinct registered family names, in registration order.
    pub fn families(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for face in &self.faces {
            if !out.contains(&face.family.as_str()) {
                out.push(face.family.as_str());
            }
        }
        out
    }

    /// `true` when no face has been registered.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    fn select_face(&self, spec: &FontSpec) -> Option<&FaceEntry> {
        let wanted_italic = !matches!(spec.slant, FontSlant::Normal);
        let family = spec
            .family
            .split(',')
            .map(|f| f.trim().trim_matches(['"', '\'']))
            .find_map(|want| {
                self.faces
                    .iter()
                    .find(|f| f.family.eq_ignore_ascii_case(want))
                    .map(|f| f.family.as_str())
            })
            .or_else(|| self.faces.first().map(|f| f.family.as_str()))?;

        self.faces
            .iter()
            .filter(|f| f.family == family)
            .min_by(|a, b| {
                let score = |f: &FaceEntry| {
                    let slant_penalty = if f.italic == wanted_italic { 0.0 } else { 1000.0 };
                    slant_penalty + (f.weight - spec.weight as f32).abs()
                };
                score(a).total_cmp(&score(b))
            })
    }

    /// Shape `text` as a single unbroken line. `None` when no font is registered.
    pub(crate) fn shape_line(
        &mut self,
        text: &str,
        spec: &FontSpec,
        brush: TextBrushRgba8,
    ) -> Option<ShapedLine> {
        let size = spec.size_px as f32;
        if !size.is_finite() || size <= 0.0 {
            return None;
        }
        let face = self.select_face(spec)?.clone();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(face.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(face.weight),
        ));
        if face.italic {
            builder.push_default(parley::style::StyleProperty::FontStyle(
                parley::style::FontStyle::Italic,
            ));
        }
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Some(ShapedLine {
            layout,
            font: face.font,
        })
    }

    /// Advance width of `text` as one line. Zero when no font is available.
    pub(crate) fn measure(&mut self, text: &str, spec: &FontSpec) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        self.shape_line(text, spec, TextBrushRgba8::default())
            .map(|s| f64::from(s.layout.width()))
            .unwrap_or(0.0)
    }
}

/// Locate a commonly installed system font, for hosts that do not ship their own.
pub fn find_system_font() -> Option<std::path::PathBuf> {
    const CANDIDATES: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];
    CANDIDATES
        .iter()
        .map(std::path::PathBuf::from)
        .find(|p| p.is_file())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
