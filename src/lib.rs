//! Easel renders declarative posters and cards.
//!
//! A [`Composition`] is an ordered list of drawing primitives (images, text, lines, rects, step
//! indicators, progress bars). A [`Canvas`] owns a drawing [`Surface`], draws the primitives in
//! order, and emits one [`CompletionArtifact`] (raw frame plus PNG) per finished render:
//!
//! - Parse or build a [`Composition`]
//! - Create a [`Canvas`] over a surface ([`CpuSurface`] rasterizes, [`RecordingSurface`] records)
//! - `mount` it, then `replace` it whenever the composition changes
#![forbid(unsafe_code)]

mod assets;
mod foundation;

pub(crate) mod draw;
/// PNG encoding of rendered frames.
pub mod encode;
/// Drawing surfaces.
pub mod render;
/// Composition schema.
pub mod scene;
/// Render lifecycle and sequencing.
pub mod session;

pub use crate::foundation::core::{BezPath, Color, DisplaySize, Point, Rect, Rgba8Premul};
pub use crate::foundation::error::{EaselError, EaselResult};

pub use crate::assets::color::parse_css_color;
pub use crate::assets::decode::DecodedImage;
pub use crate::assets::fonts::{FontBook, find_system_font};
pub use crate::assets::loader::{FetchLoader, ImageLoader};
pub use crate::draw::rect::{RectLayout, RectPadding, layout_rect};
pub use crate::draw::rounded::{CornerRadii, trace_rounded_rect};
pub use crate::draw::text::wrap_lines;
pub use crate::encode::png::{encode_png, png_data_url, unpremultiply_rgba8};
pub use crate::render::cpu::CpuSurface;
pub use crate::render::frame::FrameRGBA;
pub use crate::render::recording::{DrawCall, RecordingSurface};
pub use crate::render::state::{
    DEFAULT_FONT_FAMILY, DrawState, FontSlant, FontSpec, LineCap, TextAlign, TextBaseline,
};
pub use crate::render::surface::{StyleScope, Surface};
pub use crate::scene::composition::Composition;
pub use crate::scene::model::{
    BorderRadius, ImageView, LineView, Primitive, PrimitiveKind, ProgressView, RectView,
    StepItem, StepStatus, StepsDirection, StepsMode, StepsView, TextView,
};
pub use crate::session::artifact::CompletionArtifact;
pub use crate::session::canvas::{Canvas, CanvasOpts, Completions, RenderOutcome};
pub use crate::session::sequencer::{ImageErrorPolicy, Sequenced, SettleMode};
pub use crate::session::ticket::RenderTicket;
