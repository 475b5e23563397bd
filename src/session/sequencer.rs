use std::time::Duration;

use crate::assets::loader::ImageLoader;
use crate::draw;
use crate::encode::png::encode_png;
use crate::foundation::core::{DisplaySize, Rect};
use crate::foundation::error::EaselResult;
use crate::render::surface::{StyleScope, Surface};
use crate::scene::composition::Composition;
use crate::scene::model::{Primitive, PrimitiveKind};
use crate::session::artifact::CompletionArtifact;
use crate::session::canvas::CanvasOpts;
use crate::session::ticket::RenderTicket;

/// What happens after each image is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SettleMode {
    /// Flush the surface through [`Surface::commit`].
    #[default]
    Commit,
    /// Wait a fixed time before moving on.
    Delay(Duration),
}

impl SettleMode {
    /// Delay used by older hosts that paced image draws with a timer.
    pub const LEGACY_DELAY: Duration = Duration::from_millis(100);

    /// `EASEL_SETTLE_MS=<n>` selects `Delay(n ms)`. Unset or unparsable means `Commit`.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var("EASEL_SETTLE_MS").ok().as_deref())
    }

    fn from_env_value(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::Commit;
        };
        match raw.parse::<u64>() {
            Ok(ms) => Self::Delay(Duration::from_millis(ms)),
            Err(_) => {
                tracing::warn!(value = raw, "ignoring unparsable EASEL_SETTLE_MS");
                Self::Commit
            }
        }
    }
}

/// How an image that cannot be loaded or decoded affects the render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageErrorPolicy {
    /// Abort the render with the load error.
    #[default]
    Fail,
    /// Warn and continue with the next primitive.
    Skip,
}

/// Outcome of [`render`].
#[derive(Debug)]
pub enum Sequenced {
    Completed(CompletionArtifact),
    /// A newer render started while this one was waiting.
    Superseded,
}

/// Draw every primitive of `comp` in order, then snapshot and encode the surface.
///
/// The surface must already be sized for `comp`. Image loads and settle waits are the only
/// suspension points; both are abandoned as soon as `ticket` goes stale.
#[tracing::instrument(
    name = "sequence",
    skip_all,
    fields(generation = ticket.generation(), views = comp.views.len())
)]
pub async fn render<S: Surface>(
    comp: &Composition,
    surface: &mut S,
    loader: &dyn ImageLoader,
    ticket: &mut RenderTicket,
    opts: &CanvasOpts,
    display: DisplaySize,
) -> EaselResult<Sequenced> {
    let debug = opts.debug_override.unwrap_or(comp.debug);

    if let Some(bg) = comp.background_color {
        let mut scope = StyleScope::new(&mut *surface);
        scope.set_fill_color(bg);
        scope.fill_rect(Rect::new(
            0.0,
            0.0,
            f64::from(comp.width),
            f64::from(comp.height),
        ));
    }

    for (index, view) in comp.views.iter().enumerate() {
        log_dispatch(debug, index, view.kind());
        match view {
            Primitive::Image(img) => {
                let Some(loaded) = ticket.guard(loader.load(&img.url)).await else {
                    return Ok(Sequenced::Superseded);
                };
                match loaded {
                    Ok(decoded) => draw::image::draw_image(&mut *surface, img, &decoded)?,
                    Err(err) if opts.image_errors == ImageErrorPolicy::Skip => {
                        tracing::warn!(index, url = %img.url, error = %err, "skipping image");
                        continue;
                    }
                    Err(err) => return Err(err),
                }
                match opts.settle {
                    SettleMode::Commit => surface.commit()?,
                    SettleMode::Delay(wait) => {
                        if ticket.guard(tokio::time::sleep(wait)).await.is_none() {
                            return Ok(Sequenced::Superseded);
                        }
                    }
                }
            }
            Primitive::Text(t) => draw::text::draw_text(&mut *surface, t),
            Primitive::Line(l) => draw::line::draw_line(&mut *surface, l),
            Primitive::Rect(r) => draw::rect::draw_rect(&mut *surface, r, opts.rect_padding),
            Primitive::Steps(s) => draw::steps::draw_steps(&mut *surface, s),
            Primitive::Progress(p) => draw::progress::draw_progress(&mut *surface, p),
        }
    }

    if !ticket.is_current() {
        return Ok(Sequenced::Superseded);
    }

    let frame = surface.snapshot()?;
    let png = encode_png(&frame)?;
    tracing::debug!(bytes = png.len(), "composition encoded");

    Ok(Sequenced::Completed(CompletionArtifact {
        width: comp.width,
        height: comp.height,
        frame,
        png,
        extra: comp.extra.clone(),
        generation: ticket.generation(),
        display,
        debug,
    }))
}

fn log_dispatch(debug: bool, index: usize, kind: PrimitiveKind) {
    if debug {
        tracing::info!(index, kind = kind.name(), "draw primitive");
    } else {
        tracing::trace!(index, kind = kind.name(), "draw primitive");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/sequencer.rs"]
mod tests;
