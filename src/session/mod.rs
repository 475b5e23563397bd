//! Render lifecycle.
//!
//! [`canvas::Canvas`] owns the surface and hands out render generations; the
//! [`sequencer`] walks one composition; a [`ticket::RenderTicket`] lets a render notice that
//! it has been overtaken.

/// Immutable render results.
pub mod artifact;
/// Lifecycle controller.
pub mod canvas;
/// Ordered primitive dispatch.
pub mod sequencer;
/// Generation tickets.
pub mod ticket;
