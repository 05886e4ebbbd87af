//! Image URL resolution.
//!
//! The API stores images either as absolute URLs or as bare filenames to
//! be resolved against a fixed uploads base path. The client never uploads
//! raw bytes for display - only as multipart form fields when creating or
//! editing products and sliders.

use url::Url;

/// Which uploads directory a bare filename resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Product,
    Slider,
}

impl AssetKind {
    const fn uploads_dir(self) -> &'static str {
        match self {
            Self::Product => "uploads/products",
            Self::Slider => "uploads/sliders",
        }
    }
}

/// Resolve an image reference to a displayable URL.
///
/// - Empty references resolve to `None` (the caller shows a placeholder).
/// - Absolute `http(s)` and `data:` references pass through untouched.
/// - Anything else is treated as a bare filename under the uploads base.
#[must_use]
pub fn resolve_image(asset_base: &Url, kind: AssetKind, image: &str) -> Option<String> {
    if image.is_empty() {
        return None;
    }

    if image.starts_with("http") || image.starts_with("data:") {
        return Some(image.to_owned());
    }

    let base = asset_base.as_str().trim_end_matches('/');
    Some(format!("{base}/{}/{image}", kind.uploads_dir()))
}
