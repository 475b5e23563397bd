//! One renderer per primitive kind. Each scopes its style changes with a
//! [`StyleScope`](crate::render::surface::StyleScope), so the surface state is the same before
//! and after every call.

pub(crate) mod image;
pub(crate) mod line;
pub(crate) mod progress;
pub(crate) mod rect;
pub(crate) mod rounded;
pub(crate) mod steps;
pub(crate) mod text;
