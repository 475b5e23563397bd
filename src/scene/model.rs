use serde::{Deserialize, Serialize};

use crate::foundation::core::Color;
use crate::render::state::{DEFAULT_FONT_FAMILY, FontSlant, LineCap, TextAlign, TextBaseline};

fn default_one() -> f64 {
    1.0
}

fn default_font_size() -> f64 {
    16.0
}

fn default_font_family() -> String {
    DEFAULT_FONT_FAMILY.to_owned()
}

fn default_weight() -> u16 {
    400
}

fn default_black() -> Color {
    Color::BLACK
}

fn default_transparent() -> Color {
    Color::TRANSPARENT
}

fn default_line_num() -> u32 {
    1
}

/// CSS font weight given as a number or a keyword.
pub(crate) fn de_font_weight<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Num(f64),
        Str(String),
    }

    let clamp = |v: f64| -> Result<u16, D::Error> {
        if v.is_finite() && (1.0..=1000.0).contains(&v) {
            Ok(v.round() as u16)
        } else {
            Err(serde::de::Error::custom(format!("font weight out of range: {v}")))
        }
    };
    match Repr::deserialize(deserializer)? {
        Repr::Num(v) => clamp(v),
        Repr::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(400),
            "bold" => Ok(700),
            "lighter" => Ok(100),
            "bolder" => Ok(700),
            other => other
                .parse::<f64>()
                .map_err(|_| serde::de::Error::custom(format!("unknown font weight '{s}'")))
                .and_then(clamp),
        },
    }
}

/// An image blitted into a box, optionally rounded and bordered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageView {
    pub url: String,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub border_radius: f64,
    #[serde(default)]
    pub border_width: f64,
    #[serde(default = "default_transparent")]
    pub border_color: Color,
}

/// A text block with optional wrapping and ellipsis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextView {
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_black")]
    pub color: Color,
    /// `None` means `top` for a standalone text and `middle` inside a rect.
    #[serde(default)]
    pub base_line: Option<TextBaseline>,
    #[serde(default)]
    pub text_align: TextAlign,
    #[serde(default = "default_one")]
    pub opacity: f64,
    /// Maximum line width; no wrapping when absent.
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default = "default_line_num")]
    pub line_num: u32,
    /// Line advance; `0` means the font size.
    #[serde(default)]
    pub line_height: f64,
    #[serde(default = "default_weight", deserialize_with = "de_font_weight")]
    pub font_weight: u16,
    #[serde(default)]
    pub font_style: FontSlant,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default)]
    pub indent_width: f64,
}

impl Default for TextView {
    fn default() -> Self {
        Self {
            top: 0.0,
            left: 0.0,
            content: String::new(),
            font_size: default_font_size(),
            color: Color::BLACK,
            base_line: None,
            text_align: TextAlign::Left,
            opacity: 1.0,
            width: None,
            line_num: 1,
            line_height: 0.0,
            font_weight: 400,
            font_style: FontSlant::Normal,
            font_family: default_font_family(),
            indent_width: 0.0,
        }
    }
}

/// A straight segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineView {
    #[serde(default)]
    pub start_x: f64,
    #[serde(default)]
    pub start_y: f64,
    #[serde(default)]
    pub end_x: f64,
    #[serde(default)]
    pub end_y: f64,
    #[serde(default = "default_black")]
    pub color: Color,
    #[serde(default = "default_one")]
    pub width: f64,
    #[serde(default)]
    pub line_cap: LineCap,
}

/// Corner radius: a single number or a CSS-style shorthand string such as `"10 20"`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BorderRadius {
    Uniform(f64),
    Shorthand(String),
}

impl Default for BorderRadius {
    fn default() -> Self {
        Self::Uniform(0.0)
    }
}

impl BorderRadius {
    /// `true` when the radius asks for a rounded outline.
    pub fn is_rounded(&self) -> bool {
        match self {
            Self::Uniform(v) => v.is_finite() && *v > 0.0,
            Self::Shorthand(s) => !s.trim().is_empty() && s.trim() != "0",
        }
    }
}

impl<'de> Deserialize<'de> for BorderRadius {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(f64),
            Str(String),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Num(v) => Self::Uniform(v),
            Repr::Str(s) => Self::Shorthand(s),
        })
    }
}

/// A filled and/or stroked box with an optional text label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectView {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub text: Option<TextView>,
    #[serde(default)]
    pub padding_left: f64,
    #[serde(default)]
    pub padding_right: f64,
    #[serde(default)]
    pub border_width: f64,
    #[serde(default)]
    pub background_color: Option<Color>,
    #[serde(default = "default_black")]
    pub border_color: Color,
    #[serde(default)]
    pub border_radius: BorderRadius,
    #[serde(default = "default_one")]
    pub opacity: f64,
}

impl Default for RectView {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            x: 0.0,
            y: 0.0,
            text: None,
            padding_left: 0.0,
            padding_right: 0.0,
            border_width: 0.0,
            background_color: None,
            border_color: Color::BLACK,
            border_radius: BorderRadius::default(),
            opacity: 1.0,
        }
    }
}

/// Progress state of one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum StepStatus {
    Unfinished,
    InProgress,
    Finished,
}

impl TryFrom<u8> for StepStatus {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Self::Unfinished),
            1 => Ok(Self::InProgress),
            2 => Ok(Self::Finished),
            other => Err(format!("step status must be 0, 1 or 2, got {other}")),
        }
    }
}

impl From<StepStatus> for u8 {
    fn from(s: StepStatus) -> Self {
        match s {
            StepStatus::Unfinished => 0,
            StepStatus::InProgress => 1,
            StepStatus::Finished => 2,
        }
    }
}

/// How a step circle is colored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepsMode {
    #[default]
    Fill,
    Stroke,
    None,
}

/// Layout axis of a step indicator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepsDirection {
    #[default]
    Column,
    Row,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StepItem {
    #[serde(default)]
    pub status: Option<StepStatus>,
    #[serde(default)]
    pub spacing: Option<f64>,
}

/// Circles joined by connectors along one axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepsView {
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub top: f64,
    #[serde(default = "StepsView::default_r")]
    pub r: f64,
    #[serde(default = "default_one")]
    pub line_width: f64,
    #[serde(default)]
    pub start_angle: f64,
    #[serde(default = "StepsView::default_end_angle")]
    pub end_angle: f64,
    #[serde(default = "StepsView::default_stroke_color")]
    pub stroke_color: Color,
    #[serde(default)]
    pub mode: StepsMode,
    #[serde(default = "StepsView::default_unfinished_color")]
    pub unfinished_color: Color,
    #[serde(default = "StepsView::default_process_color")]
    pub process_color: Color,
    #[serde(default = "StepsView::default_finished_color")]
    pub finished_color: Color,
    #[serde(default = "StepsView::default_cable_color")]
    pub cable_color: Color,
    #[serde(default)]
    pub lists: Vec<StepItem>,
    #[serde(default)]
    pub direction: StepsDirection,
}

impl StepsView {
    /// Spacing used when neither an item nor the first item sets one.
    pub const FALLBACK_SPACING: f64 = 50.0;

    fn default_r() -> f64 {
        5.0
    }

    fn default_end_angle() -> f64 {
        std::f64::consts::TAU
    }

    fn default_stroke_color() -> Color {
        Color::rgb(0xCC, 0xCC, 0xCC)
    }

    fn default_unfinished_color() -> Color {
        Color::rgb(0xFF, 0x84, 0x78)
    }

    fn default_process_color() -> Color {
        Color::rgb(0x3D, 0xA8, 0xF5)
    }

    fn default_finished_color() -> Color {
        Color::rgb(0x9E, 0xD9, 0x79)
    }

    fn default_cable_color() -> Color {
        Color::rgb(0xEB, 0xEB, 0xEB)
    }

    /// Distance from item `i` to the next one.
    pub fn spacing_at(&self, i: usize) -> f64 {
        let usable = |s: Option<f64>| s.filter(|v| v.is_finite() && *v != 0.0);
        usable(self.lists.get(i).and_then(|it| it.spacing))
            .or_else(|| usable(self.lists.first().and_then(|it| it.spacing)))
            .unwrap_or(Self::FALLBACK_SPACING)
    }

    /// Color for a step in the given status.
    pub fn status_color(&self, status: StepStatus) -> Color {
        match status {
            StepStatus::Unfinished => self.unfinished_color,
            StepStatus::InProgress => self.process_color,
            StepStatus::Finished => self.finished_color,
        }
    }
}

impl Default for StepsView {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            r: Self::default_r(),
            line_width: 1.0,
            start_angle: 0.0,
            end_angle: Self::default_end_angle(),
            stroke_color: Self::default_stroke_color(),
            mode: StepsMode::Fill,
            unfinished_color: Self::default_unfinished_color(),
            process_color: Self::default_process_color(),
            finished_color: Self::default_finished_color(),
            cable_color: Self::default_cable_color(),
            lists: Vec::new(),
            direction: StepsDirection::Column,
        }
    }
}

/// A horizontal progress bar with a trailing label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressView {
    #[serde(default)]
    pub start_x: f64,
    #[serde(default)]
    pub start_y: f64,
    #[serde(default)]
    pub end_x: f64,
    #[serde(default)]
    pub end_y: f64,
    /// Completion in `0..=100`.
    #[serde(default)]
    pub percent: f64,
    #[serde(default = "ProgressView::default_line_width")]
    pub line_width: f64,
    #[serde(rename = "linecap", default = "ProgressView::default_line_cap")]
    pub line_cap: LineCap,
    #[serde(default = "ProgressView::default_from_color")]
    pub from_color: Color,
    #[serde(default = "ProgressView::default_to_color")]
    pub to_color: Color,
    #[serde(default = "default_one")]
    pub font_line_width: f64,
    #[serde(default = "ProgressView::default_font_color")]
    pub font_color: Color,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_weight", deserialize_with = "de_font_weight")]
    pub font_weight: u16,
    #[serde(default)]
    pub font_style: FontSlant,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    /// Label override; the rounded-down percent is shown when empty.
    #[serde(default)]
    pub info: String,
    #[serde(default = "ProgressView::default_info_margin_left")]
    pub info_margin_left: f64,
}

impl ProgressView {
    fn default_line_width() -> f64 {
        12.0
    }

    fn default_line_cap() -> LineCap {
        LineCap::Round
    }

    fn default_from_color() -> Color {
        Color::rgb(0xCC, 0xCC, 0xCC)
    }

    fn default_to_color() -> Color {
        Color::rgb(0x46, 0xB6, 0x84)
    }

    fn default_font_color() -> Color {
        Color::rgb(0x4A, 0x4A, 0x4A)
    }

    fn default_info_margin_left() -> f64 {
        10.0
    }
}

impl Default for ProgressView {
    fn default() -> Self {
        Self {
            start_x: 0.0,
            start_y: 0.0,
            end_x: 0.0,
            end_y: 0.0,
            percent: 0.0,
            line_width: Self::default_line_width(),
            line_cap: Self::default_line_cap(),
            from_color: Self::default_from_color(),
            to_color: Self::default_to_color(),
            font_line_width: 1.0,
            font_color: Self::default_font_color(),
            font_size: default_font_size(),
            font_weight: 400,
            font_style: FontSlant::Normal,
            font_family: default_font_family(),
            info: String::new(),
            info_margin_left: Self::default_info_margin_left(),
        }
    }
}

/// Primitive kinds in legacy numeric-tag order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Image,
    Text,
    Line,
    Rect,
    Steps,
    Progress,
}

impl PrimitiveKind {
    pub const ALL: [Self; 6] = [
        Self::Image,
        Self::Text,
        Self::Line,
        Self::Rect,
        Self::Steps,
        Self::Progress,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Text => "text",
            Self::Line => "line",
            Self::Rect => "rect",
            Self::Steps => "steps",
            Self::Progress => "progress",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    fn from_index(i: u64) -> Option<Self> {
        usize::try_from(i)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }
}

/// One drawing primitive. Serialized with a string `type` tag; numeric tags are accepted on input.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Primitive {
    Image(ImageView),
    Text(TextView),
    Line(LineView),
    Rect(RectView),
    Steps(StepsView),
    Progress(ProgressView),
}

impl Primitive {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Image(_) => PrimitiveKind::Image,
            Self::Text(_) => PrimitiveKind::Text,
            Self::Line(_) => PrimitiveKind::Line,
            Self::Rect(_) => PrimitiveKind::Rect,
            Self::Steps(_) => PrimitiveKind::Steps,
            Self::Progress(_) => PrimitiveKind::Progress,
        }
    }
}

impl<'de> Deserialize<'de> for Primitive {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Tag {
            Index(u64),
            Name(String),
        }

        let mut obj = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        let tag = obj
            .remove("type")
            .ok_or_else(|| D::Error::missing_field("type"))?;
        let kind = match Tag::deserialize(tag).map_err(D::Error::custom)? {
            Tag::Index(i) => PrimitiveKind::from_index(i)
                .ok_or_else(|| D::Error::custom(format!("unknown primitive type index {i}")))?,
            Tag::Name(n) => PrimitiveKind::from_name(&n)
                .ok_or_else(|| D::Error::custom(format!("unknown primitive type '{n}'")))?,
        };

        let body = serde_json::Value::Object(obj);
        let prim = match kind {
            PrimitiveKind::Image => serde_json::from_value(body).map(Self::Image),
            PrimitiveKind::Text => serde_json::from_value(body).map(Self::Text),
            PrimitiveKind::Line => serde_json::from_value(body).map(Self::Line),
            PrimitiveKind::Rect => serde_json::from_value(body).map(Self::Rect),
            PrimitiveKind::Steps => serde_json::from_value(body).map(Self::Steps),
            PrimitiveKind::Progress => serde_json::from_value(body).map(Self::Progress),
        };
        prim.map_err(|e| D::Error::custom(format!("{} primitive: {e}", kind.name())))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
