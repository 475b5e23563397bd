use std::path::{Path, PathBuf};

use anyhow::{Context as _, anyhow};
use base64::Engine as _;
use futures::future::BoxFuture;

use crate::assets::decode::{DecodedImage, decode_image_bytes};
use crate::foundation::error::{EaselError, EaselResult};

/// Resolves an image URL from a composition into decoded pixels.
///
/// This is the only asynchronous resource the drawing engine touches. Implementations must not
/// retry on failure; a failed load is reported once as [`EaselError::ImageLoad`] (fetch) or
/// [`EaselError::Decode`] (payload).
pub trait ImageLoader: Send + Sync {
    /// Fetch and decode the image referenced by `url`.
    fn load<'a>(&'a self, url: &'a str) -> BoxFuture<'a, EaselResult<DecodedImage>>;
}

/// Default loader: `data:` URLs, `http(s)://` through `reqwest`, everything else from disk
/// relative to an assets root.
#[derive(Clone, Debug)]
pub struct FetchLoader {
    assets_root: PathBuf,
    client: reqwest::Client,
}

impl FetchLoader {
    /// Create a loader resolving relative paths against `assets_root`.
    pub fn new(assets_root: impl Into<PathBuf>) -> Self {
        Self {
            assets_root: assets_root.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Directory relative image paths are resolved against.
    pub fn assets_root(&self) -> &Path {
        &self.assets_root
    }

    async fn fetch(&self, url: &str) -> EaselResult<(Vec<u8>, Option<String>)> {
        match classify_url(url) {
            UrlKind::Data => {
                let (mime, bytes) =
                    decode_data_url(url).map_err(|e| EaselError::image_load(url, e))?;
                Ok((bytes, Some(mime)))
            }
            UrlKind::Http => {
                let res = self
                    .client
                    .get(url)
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| EaselError::image_load(url, e))?;
                let mime = res
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_owned);
                let body = res
                    .bytes()
                    .await
                    .map_err(|e| EaselError::image_load(url, e))?;
                Ok((body.to_vec(), mime))
            }
            UrlKind::File(rel) => {
                let norm = normalize_rel_path(rel).map_err(|e| EaselError::image_load(url, e))?;
                let p = self.assets_root.join(Path::new(&norm));
                let bytes = tokio::fs::read(&p)
                    .await
                    .with_context(|| format!("read '{}'", p.display()))
                    .map_err(|e| EaselError::image_load(url, e))?;
                let mime = norm.ends_with(".svg").then(|| "image/svg+xml".to_owned());
                Ok((bytes, mime))
            }
        }
    }
}

impl ImageLoader for FetchLoader {
    fn load<'a>(&'a self, url: &'a str) -> BoxFuture<'a, EaselResult<DecodedImage>> {
        Box::pin(async move {
            let (bytes, mime) = self.fetch(url).await?;
            tracing::debug!(url, bytes = bytes.len(), mime = ?mime, "image fetched");
            decode_image_bytes(&bytes, mime.as_deref())
        })
    }
}

#[derive(Debug, PartialEq, Eq)]
enum UrlKind<'a> {
    Data,
    Http,
    File(&'a str),
}

fn classify_url(url: &str) -> UrlKind<'_> {
    let trimmed = url.trim();
    let lower = trimmed.get(..8).unwrap_or(trimmed).to_ascii_lowercase();
    if lower.starts_with("data:") {
        UrlKind::Data
    } else if lower.starts_with("http://") || lower.starts_with("https://") {
        UrlKind::Http
    } else if lower.starts_with("file://") {
        UrlKind::File(&trimmed[7..])
    } else {
        UrlKind::File(trimmed)
    }
}

/// Split a `data:` URL into its MIME type and payload bytes.
pub(crate) fn decode_data_url(url: &str) -> anyhow::Result<(String, Vec<u8>)> {
    let rest = url
        .trim()
        .get(5..)
        .ok_or_else(|| anyhow!("data url is too short"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| anyhow!("data url has no ',' separator"))?;
    let (mime, is_base64) = match meta.strip_suffix(";base64") {
        Some(m) => (m, true),
        None => (meta, false),
    };
    let mime = if mime.is_empty() {
        "text/plain".to_owned()
    } else {
        mime.to_ascii_lowercase()
    };
    let bytes = if is_base64 {
        base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .context("invalid base64 payload in data url")?
    } else {
        payload.as_bytes().to_vec()
    };
    Ok((mime, bytes))
}

/// Normalize and validate asset-root-relative paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub(crate) fn normalize_rel_path(source: &str) -> EaselResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(EaselError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(EaselError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(EaselError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(EaselError::validation("asset path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
