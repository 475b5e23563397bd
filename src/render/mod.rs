//! Drawing surfaces.
//!
//! [`surface::Surface`] is the 2D context every renderer draws through. [`cpu::CpuSurface`]
//! rasterizes with `vello_cpu`; [`recording::RecordingSurface`] keeps a call log for tests and
//! dry runs.

/// `vello_cpu` surface.
pub mod cpu;
/// Raw RGBA frames.
pub mod frame;
/// Call-recording surface.
pub mod recording;
/// Style state and the save/restore stack.
pub mod state;
/// The surface trait and scoped style acquisition.
pub mod surface;
