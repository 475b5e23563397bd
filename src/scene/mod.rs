/// Top-level composition document.
pub mod composition;
/// Primitive views.
pub mod model;
