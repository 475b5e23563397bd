use std::future::Future;

use tokio::sync::watch;

/// Generation claimed by one render.
///
/// The owning [`Canvas`](crate::session::canvas::Canvas) bumps a shared counter whenever a newer
/// render starts (or the canvas is torn down). A ticket whose generation no longer matches the
/// counter is stale: its pending waits resolve early and it must not emit.
#[derive(Debug)]
pub struct RenderTicket {
    generation: u64,
    rx: watch::Receiver<u64>,
}

impl RenderTicket {
    pub(crate) fn new(generation: u64, rx: watch::Receiver<u64>) -> Self {
        Self { generation, rx }
    }

    /// A ticket with no controller behind it. It stays current forever.
    pub fn detached() -> Self {
        let (tx, rx) = watch::channel(0);
        drop(tx);
        Self { generation: 0, rx }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while no newer render has started.
    pub fn is_current(&self) -> bool {
        *self.rx.borrow() == self.generation
    }

    /// Resolves once this ticket is stale.
    ///
    /// A closed counter can never move again, so the future then stays pending.
    pub async fn superseded(&mut self) {
        loop {
            if !self.is_current() {
                return;
            }
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }

    /// Drive `fut` unless this ticket goes stale first. `None` means superseded.
    pub async fn guard<F: Future>(&mut self, fut: F) -> Option<F::Output> {
        if !self.is_current() {
            return None;
        }
        tokio::select! {
            biased;
            () = self.superseded() => None,
            out = fut => Some(out),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/ticket.rs"]
mod tests;
