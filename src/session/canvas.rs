use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Mutex, MutexGuard, mpsc, watch};

use crate::assets::loader::ImageLoader;
use crate::draw::rect::RectPadding;
use crate::foundation::core::DisplaySize;
use crate::foundation::error::EaselResult;
use crate::render::surface::Surface;
use crate::scene::composition::Composition;
use crate::session::artifact::CompletionArtifact;
use crate::session::sequencer::{self, ImageErrorPolicy, Sequenced, SettleMode};
use crate::session::ticket::RenderTicket;

/// Receiving end of a canvas' completion events.
pub type Completions = mpsc::UnboundedReceiver<Arc<CompletionArtifact>>;

/// Knobs for a [`Canvas`].
#[derive(Clone, Debug, Default)]
pub struct CanvasOpts {
    pub settle: SettleMode,
    pub image_errors: ImageErrorPolicy,
    pub rect_padding: RectPadding,
    /// Forces the per-primitive logging level regardless of the composition's `debug` flag.
    pub debug_override: Option<bool>,
}

impl CanvasOpts {
    pub fn with_settle(mut self, settle: SettleMode) -> Self {
        self.settle = settle;
        self
    }

    pub fn with_image_errors(mut self, policy: ImageErrorPolicy) -> Self {
        self.image_errors = policy;
        self
    }

    pub fn with_rect_padding(mut self, padding: RectPadding) -> Self {
        self.rect_padding = padding;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug_override = Some(debug);
        self
    }
}

/// What a call to [`Canvas::mount`] or [`Canvas::replace`] ended with.
#[derive(Clone, Debug)]
pub enum RenderOutcome {
    /// Rendered and emitted.
    Completed(Arc<CompletionArtifact>),
    /// Zero dimensions, no primitives, or a torn-down canvas. Nothing drawn.
    Skipped,
    /// A newer render (or teardown) overtook this one before it could emit.
    Superseded,
    /// `replace` was handed the composition that is already mounted.
    Unchanged,
}

impl RenderOutcome {
    pub fn artifact(&self) -> Option<&Arc<CompletionArtifact>> {
        match self {
            Self::Completed(a) => Some(a),
            _ => None,
        }
    }
}

/// Owns a drawing surface and turns compositions into completion events.
///
/// Every render claims a new generation. Starting another render, or tearing the canvas down,
/// makes older generations stale: their pending image loads and settle waits resolve early and
/// they never emit.
pub struct Canvas<S> {
    surface: Mutex<S>,
    generation: watch::Sender<u64>,
    completions: mpsc::UnboundedSender<Arc<CompletionArtifact>>,
    loader: Arc<dyn ImageLoader>,
    opts: CanvasOpts,
    mounted: std::sync::Mutex<Option<Arc<Composition>>>,
    torn_down: AtomicBool,
}

impl<S: Surface> Canvas<S> {
    pub fn new(surface: S, loader: Arc<dyn ImageLoader>, opts: CanvasOpts) -> (Self, Completions) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (generation, _) = watch::channel(0);
        let canvas = Self {
            surface: Mutex::new(surface),
            generation,
            completions: tx,
            loader,
            opts,
            mounted: std::sync::Mutex::new(None),
            torn_down: AtomicBool::new(false),
        };
        (canvas, rx)
    }

    pub fn opts(&self) -> &CanvasOpts {
        &self.opts
    }

    /// First initialization.
    pub async fn mount(
        &self,
        comp: Arc<Composition>,
        display: DisplaySize,
    ) -> EaselResult<RenderOutcome> {
        self.run(comp, display).await
    }

    /// Re-render when `comp` is a different composition than the mounted one.
    pub async fn replace(
        &self,
        comp: Arc<Composition>,
        display: DisplaySize,
    ) -> EaselResult<RenderOutcome> {
        let same = self
            .mounted_slot()
            .as_ref()
            .is_some_and(|cur| Arc::ptr_eq(cur, &comp));
        if same {
            tracing::debug!("composition unchanged; not re-rendering");
            return Ok(RenderOutcome::Unchanged);
        }
        self.run(comp, display).await
    }

    /// Cancel outstanding waits and refuse every later render.
    pub fn teardown(&self) {
        if !self.torn_down.swap(true, Ordering::SeqCst) {
            self.generation.send_modify(|g| *g += 1);
            tracing::debug!("canvas torn down");
        }
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    /// Latest generation handed out.
    pub fn generation(&self) -> u64 {
        *self.generation.borrow()
    }

    /// Exclusive access to the surface. Waits for an in-flight render to release it.
    pub async fn surface(&self) -> MutexGuard<'_, S> {
        self.surface.lock().await
    }

    /// The composition most recently handed to `mount` or `replace`.
    pub fn mounted(&self) -> Option<Arc<Composition>> {
        self.mounted_slot().clone()
    }

    fn mounted_slot(&self) -> std::sync::MutexGuard<'_, Option<Arc<Composition>>> {
        self.mounted
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    async fn run(&self, comp: Arc<Composition>, display: DisplaySize) -> EaselResult<RenderOutcome> {
        if self.is_torn_down() {
            return Ok(RenderOutcome::Skipped);
        }
        *self.mounted_slot() = Some(Arc::clone(&comp));

        let mut generation = 0;
        self.generation.send_modify(|g| {
            *g += 1;
            generation = *g;
        });
        let mut ticket = RenderTicket::new(generation, self.generation.subscribe());

        if !comp.is_drawable() {
            tracing::debug!(
                generation,
                width = comp.width,
                height = comp.height,
                views = comp.views.len(),
                "composition not drawable; skipping"
            );
            return Ok(RenderOutcome::Skipped);
        }

        let Some(mut surface) = ticket.guard(self.surface.lock()).await else {
            return Ok(RenderOutcome::Superseded);
        };
        surface.resize(comp.width, comp.height)?;

        let sequenced = sequencer::render(
            &comp,
            &mut *surface,
            self.loader.as_ref(),
            &mut ticket,
            &self.opts,
            display,
        )
        .await?;

        match sequenced {
            Sequenced::Completed(artifact) => {
                let artifact = Arc::new(artifact);
                if self.emit(generation, &artifact) {
                    Ok(RenderOutcome::Completed(artifact))
                } else {
                    tracing::debug!(generation, "render superseded before emission");
                    Ok(RenderOutcome::Superseded)
                }
            }
            Sequenced::Superseded => {
                tracing::debug!(generation, "render superseded");
                Ok(RenderOutcome::Superseded)
            }
        }
    }

    /// Send `artifact` if `generation` is still current and the canvas is live.
    ///
    /// The counter's read guard is held across the check and the send, so a concurrent bump
    /// (newer render or teardown) cannot land in between.
    fn emit(&self, generation: u64, artifact: &Arc<CompletionArtifact>) -> bool {
        let current = self.generation.borrow();
        if *current != generation || self.is_torn_down() {
            return false;
        }
        if self.completions.send(Arc::clone(artifact)).is_err() {
            tracing::debug!(generation, "completion receiver dropped");
        }
        drop(current);
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/canvas.rs"]
mod tests;
