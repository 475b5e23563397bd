//! Frame encoding.

/// PNG output and `data:` URLs.
pub mod png;
