//! `<img>` tag rendering.
//!
//! A single record renders as a plain tag:
//!
//! ```html
//! <img loading="lazy" width="120" height="40" src="/img/logo.png"  alt="Logo" />
//! ```
//!
//! A grouped record renders as a responsive tag, with every variant in the
//! `srcset` and the default variant as `src`:
//!
//! ```html
//! <img loading="lazy" sizes="auto" width="1400" height="933" srcset="/img/d-800.jpg 800w, /img/d-1400.jpg 1400w" src="/img/d-1400.jpg" class="hero" alt="Dawn" />
//! ```
//!
//! ## Byte-exact output
//!
//! Attribute order and spacing are fixed, including the doubled space left
//! behind when `loading` or `class` is omitted, so output matches pages
//! generated by earlier builds byte for byte.
//!
//! ## No escaping
//!
//! Values are written verbatim. `alt`, `class` and sources must already be
//! safe inside a double-quoted attribute; escaping them here would change
//! existing output.

use crate::error::{ImageError, ImageResult};
use crate::path::join_posix_path;
use crate::select::{select_by_width, select_default};
use crate::types::{ImageRecord, Variants};
use crate::zone::ResolvedImage;

/// Per-call rendering options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Required. `Some("")` marks a decorative image; `None` is an error.
    pub alt: Option<String>,
    /// Emitted as `class="…"` when present and non-empty.
    pub class_attr: Option<String>,
    /// Emit `loading="lazy"`. When false the attribute is left out entirely.
    pub lazy: bool,
    /// Value of the `sizes` attribute on responsive tags.
    pub sizes: String,
    /// Pick the variant with exactly this width as default instead of the
    /// widest one. Zero behaves like `None`.
    pub default_image_width: Option<u32>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            alt: None,
            class_attr: None,
            lazy: true,
            sizes: "auto".to_string(),
            default_image_width: None,
        }
    }
}

impl RenderOptions {
    pub fn with_alt(alt: impl Into<String>) -> Self {
        Self {
            alt: Some(alt.into()),
            ..Self::default()
        }
    }

    pub fn class(mut self, class_attr: impl Into<String>) -> Self {
        self.class_attr = Some(class_attr.into());
        self
    }

    pub fn lazy(mut self, lazy: bool) -> Self {
        self.lazy = lazy;
        self
    }

    pub fn sizes(mut self, sizes: impl Into<String>) -> Self {
        self.sizes = sizes.into();
        self
    }

    pub fn default_image_width(mut self, width: u32) -> Self {
        self.default_image_width = Some(width);
        self
    }

    fn loading_attr(&self) -> &'static str {
        if self.lazy { r#"loading="lazy""# } else { "" }
    }

    fn class_html(&self) -> String {
        match self.class_attr.as_deref() {
            Some(class) if !class.is_empty() => format!(r#"class="{class}""#),
            _ => String::new(),
        }
    }
}

/// Render the `<img>` tag for a resolved image.
///
/// Checks run in a fixed order, each with its own error: index present,
/// `alt` given, source non-empty, record present, then (for grouped
/// records with an explicit width) a variant of that width.
pub fn render_image_tag(image: &ResolvedImage<'_>, options: &RenderOptions) -> ImageResult<String> {
    let src = image.local_source;
    if image.zone.index.is_none() {
        return Err(ImageError::MissingIndex);
    }
    let Some(alt) = options.alt.as_deref() else {
        return Err(ImageError::MissingAlt {
            src: src.to_string(),
        });
    };
    if src.is_empty() {
        return Err(ImageError::MissingSrc);
    }
    let record = image.require_record()?;
    let base_url = image.zone.base_url.as_str();

    let tag = match record {
        ImageRecord::Single { width, height } => {
            let full_src = join_posix_path(base_url, src);
            format!(
                r#"<img {} width="{width}" height="{height}" src="{full_src}" {} alt="{alt}" />"#,
                options.loading_attr(),
                options.class_html(),
            )
        }
        ImageRecord::Grouped { variants, .. } => {
            let srcset = render_srcset(base_url, variants);
            let (default_path, default) = match options.default_image_width.filter(|w| *w != 0) {
                Some(width) => select_by_width(variants, width, src)?,
                None => select_default(variants).ok_or_else(|| ImageError::MissingImageData {
                    src: src.to_string(),
                })?,
            };
            let default_src = join_posix_path(base_url, default_path);
            format!(
                r#"<img {} sizes="{}" width="{}" height="{}" srcset="{srcset}" src="{default_src}" {} alt="{alt}" />"#,
                options.loading_attr(),
                options.sizes,
                default.width,
                default.height,
                options.class_html(),
            )
        }
    };
    tracing::debug!(src, grouped = record.is_grouped(), "rendered image tag");
    Ok(tag)
}

/// `"<url> <width>w"` for every variant in index order, comma separated.
fn render_srcset(base_url: &str, variants: &Variants) -> String {
    variants
        .iter()
        .map(|(path, v)| format!("{} {}w", join_posix_path(base_url, path), v.width))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{grouped, index_of, single};
    use crate::zone::{Zone, resolve_image};

    fn zones() -> Vec<Zone> {
        vec![Zone::new(
            index_of(&[
                ("x.png", single(10, 20)),
                (
                    "photo.jpg",
                    grouped(&[("p-100.jpg", 100, 50), ("p-200.jpg", 200, 100)]),
                ),
                (
                    "tie.jpg",
                    grouped(&[("t-a.jpg", 200, 1), ("t-b.jpg", 200, 2)]),
                ),
            ]),
            "/img",
        )]
    }

    fn render(src: &str, options: &RenderOptions) -> ImageResult<String> {
        let zones = zones();
        let resolved = resolve_image(src, &zones)?;
        render_image_tag(&resolved, options)
    }

    #[test]
    fn single_tag_exact_output() {
        let html = render("x.png", &RenderOptions::with_alt("")).unwrap();
        assert_eq!(
            html,
            r#"<img loading="lazy" width="10" height="20" src="/img/x.png"  alt="" />"#
        );
    }

    #[test]
    fn single_tag_with_class_and_eager() {
        let options = RenderOptions::with_alt("A cat").class("wide").lazy(false);
        let html = render("x.png", &options).unwrap();
        assert_eq!(
            html,
            r#"<img  width="10" height="20" src="/img/x.png" class="wide" alt="A cat" />"#
        );
    }

    #[test]
    fn empty_class_is_omitted() {
        let html = render("x.png", &RenderOptions::with_alt("a").class("")).unwrap();
        assert!(!html.contains("class="));
    }

    #[test]
    fn grouped_tag_exact_output() {
        let html = render("photo.jpg", &RenderOptions::with_alt("Photo")).unwrap();
        assert_eq!(
            html,
            r#"<img loading="lazy" sizes="auto" width="200" height="100" srcset="/img/p-100.jpg 100w, /img/p-200.jpg 200w" src="/img/p-200.jpg"  alt="Photo" />"#
        );
    }

    #[test]
    fn grouped_tag_uses_requested_default_width() {
        let options = RenderOptions::with_alt("").default_image_width(100).sizes("50vw");
        let html = render("photo.jpg", &options).unwrap();
        assert!(html.contains(r#"sizes="50vw""#));
        assert!(html.contains(r#"width="100" height="50""#));
        assert!(html.contains(r#"src="/img/p-100.jpg""#));
    }

    #[test]
    fn grouped_tag_zero_width_means_widest() {
        let options = RenderOptions::with_alt("").default_image_width(0);
        let html = render("photo.jpg", &options).unwrap();
        assert!(html.contains(r#"src="/img/p-200.jpg""#));
    }

    #[test]
    fn grouped_tag_unknown_width_fails() {
        let options = RenderOptions::with_alt("").default_image_width(150);
        assert_eq!(
            render("photo.jpg", &options).unwrap_err(),
            ImageError::WidthNotFound {
                width: 150,
                src: "photo.jpg".into()
            }
        );
    }

    #[test]
    fn grouped_tag_tie_uses_later_variant() {
        let html = render("tie.jpg", &RenderOptions::with_alt("")).unwrap();
        assert!(html.contains(r#"height="2""#));
        assert!(html.contains(r#"src="/img/t-b.jpg""#));
    }

    #[test]
    fn values_are_not_escaped() {
        let html = render("x.png", &RenderOptions::with_alt("Tom & \"Jerry\"")).unwrap();
        assert!(html.contains(r#"alt="Tom & "Jerry"""#));
    }

    #[test]
    fn missing_alt_fails_before_lookup() {
        let options = RenderOptions::default();
        assert_eq!(
            render("not-indexed.png", &options).unwrap_err(),
            ImageError::MissingAlt {
                src: "not-indexed.png".into()
            }
        );
    }

    #[test]
    fn missing_alt_fails_for_grouped_record() {
        assert_eq!(
            render("photo.jpg", &RenderOptions::default()).unwrap_err(),
            ImageError::MissingAlt {
                src: "photo.jpg".into()
            }
        );
    }

    #[test]
    fn empty_source_is_missing_src() {
        assert_eq!(
            render("", &RenderOptions::with_alt("")).unwrap_err(),
            ImageError::MissingSrc
        );
    }

    #[test]
    fn unindexed_source_is_missing_image_data() {
        assert_eq!(
            render("nope.png", &RenderOptions::with_alt("")).unwrap_err(),
            ImageError::MissingImageData {
                src: "nope.png".into()
            }
        );
    }

    #[test]
    fn zone_without_index_fails_first() {
        let zones = vec![Zone {
            base_url: "/img".into(),
            ..Zone::default()
        }];
        let resolved = resolve_image("x.png", &zones).unwrap();
        assert_eq!(
            render_image_tag(&resolved, &RenderOptions::default()).unwrap_err(),
            ImageError::MissingIndex
        );
    }

    #[test]
    fn empty_base_url_leaves_sources_relative() {
        let zones = vec![Zone::new(index_of(&[("x.png", single(1, 1))]), "")];
        let resolved = resolve_image("x.png", &zones).unwrap();
        let html = render_image_tag(&resolved, &RenderOptions::with_alt("")).unwrap();
        assert!(html.contains(r#"src="x.png""#));
    }
}
