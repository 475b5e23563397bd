use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Color;
use crate::foundation::error::{EaselError, EaselResult};
use crate::scene::model::{Primitive, PrimitiveKind};

/// A poster: target size, optional background, and primitives drawn in list order.
///
/// `extra` is opaque to the renderer and handed back unchanged on the completion artifact.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Composition {
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub views: Vec<Primitive>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<serde_json::Value>,
}

impl Composition {
    /// Parse a composition from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> EaselResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| EaselError::validation(format!("parse composition JSON: {e}")))
    }

    /// Parse a composition from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> EaselResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            EaselError::validation(format!("open composition JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn from_json_str(s: &str) -> EaselResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// `false` when there is nothing to render: a zero dimension or no primitives.
    pub fn is_drawable(&self) -> bool {
        self.width > 0 && self.height > 0 && !self.views.is_empty()
    }

    /// Number of primitives of each kind present.
    pub fn kind_counts(&self) -> BTreeMap<PrimitiveKind, usize> {
        let mut out = BTreeMap::new();
        for v in &self.views {
            *out.entry(v.kind()).or_insert(0) += 1;
        }
        out
    }

    /// URLs of every image primitive, in draw order.
    pub fn image_urls(&self) -> impl Iterator<Item = &str> {
        self.views.iter().filter_map(|v| match v {
            Primitive::Image(img) => Some(img.url.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/composition.rs"]
mod tests;
