//! Default-variant selection for grouped images.
//!
//! The default variant supplies the `src`, `width` and `height` of a
//! responsive tag, and is the single URL returned by the URL filter.
//!
//! ## Tie-break
//!
//! Without an explicit width the widest variant wins. When several variants
//! share the maximum width, the one that comes **last** in index order is
//! chosen: the running best is only kept while it is strictly wider than the
//! next entry. Existing generated pages depend on this, so it must not be
//! "fixed" to first-wins.

use crate::error::{ImageError, ImageResult};
use crate::types::{Variant, Variants};

/// First variant, in index order, whose width is exactly `width`.
///
/// There is no nearest-width fallback; `src` is only used for the error.
pub fn select_by_width<'a>(
    variants: &'a Variants,
    width: u32,
    src: &str,
) -> ImageResult<(&'a str, &'a Variant)> {
    variants
        .iter()
        .find(|(_, v)| v.width == width)
        .ok_or_else(|| ImageError::WidthNotFound {
            width,
            src: src.to_string(),
        })
}

/// Widest variant, last one winning ties. `None` only for an empty set.
pub fn select_default(variants: &Variants) -> Option<(&str, &Variant)> {
    let selected = variants
        .iter()
        .reduce(|best, next| if best.1.width > next.1.width { best } else { next });
    if let Some((path, variant)) = selected {
        tracing::trace!(path, width = variant.width, "selected default variant");
    }
    selected
}
