//! Bare image URLs, for places a tag doesn't fit (`og:image`, CSS, feeds).
//!
//! Grouped images always resolve to their widest variant, using the same
//! selection (and tie-break) as the default `src` of a rendered tag.

use crate::error::{ImageError, ImageResult};
use crate::path::join_posix_path;
use crate::select::select_default;
use crate::types::ImageRecord;
use crate::zone::ResolvedImage;

/// URL of the image, or of its default variant when grouped.
///
/// A zone without an index and an index without the entry both surface as
/// `MissingImageData`; the filter has no separate missing-index failure.
pub fn image_url(image: &ResolvedImage<'_>) -> ImageResult<String> {
    let record = image.record.ok_or_else(|| ImageError::MissingImageData {
        src: image.local_source.to_string(),
    })?;
    let base_url = image.zone.base_url.as_str();
    match record {
        ImageRecord::Single { .. } => Ok(join_posix_path(base_url, image.local_source)),
        ImageRecord::Grouped { variants, .. } => {
            let (path, _) = select_default(variants).ok_or_else(|| ImageError::MissingImageData {
                src: image.local_source.to_string(),
            })?;
            Ok(join_posix_path(base_url, path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::{RenderOptions, render_image_tag};
    use crate::test_helpers::{grouped, index_of, single};
    use crate::zone::{Zone, resolve_image};

    fn zones() -> Vec<Zone> {
        vec![
            Zone::new(
                index_of(&[
                    ("logo.png", single(120, 40)),
                    (
                        "dawn.jpg",
                        grouped(&[("dawn-800.jpg", 800, 533), ("dawn-1400.jpg", 1400, 933)]),
                    ),
                ]),
                "https://cdn.example.com/img/",
            )
            .with_prefix("cdn/"),
            Zone::new(
                index_of(&[(
                    "tie.jpg",
                    grouped(&[("a.jpg", 100, 1), ("b.jpg", 200, 2), ("c.jpg", 200, 3)]),
                )]),
                "/local",
            )
            .with_prefix("local/"),
        ]
    }

    fn url(src: &str) -> ImageResult<String> {
        let zones = zones();
        image_url(&resolve_image(src, &zones)?)
    }

    #[test]
    fn single_url_joins_local_source() {
        assert_eq!(
            url("cdn/logo.png").unwrap(),
            "https://cdn.example.com/img/logo.png"
        );
    }

    #[test]
    fn grouped_url_is_widest_variant() {
        assert_eq!(
            url("cdn/dawn.jpg").unwrap(),
            "https://cdn.example.com/img/dawn-1400.jpg"
        );
    }

    #[test]
    fn grouped_url_tie_uses_later_variant() {
        assert_eq!(url("local/tie.jpg").unwrap(), "/local/c.jpg");
    }

    #[test]
    fn missing_record_is_missing_image_data() {
        assert_eq!(
            url("local/none.jpg").unwrap_err(),
            ImageError::MissingImageData {
                src: "none.jpg".into()
            }
        );
    }

    #[test]
    fn zone_without_index_is_missing_image_data() {
        let zones = vec![Zone {
            base_url: "/img".into(),
            ..Zone::default()
        }];
        let resolved = resolve_image("x.png", &zones).unwrap();
        assert_eq!(
            image_url(&resolved).unwrap_err(),
            ImageError::MissingImageData {
                src: "x.png".into()
            }
        );
    }

    #[test]
    fn unmatched_source_is_no_zone_match() {
        assert!(matches!(
            url("elsewhere/x.jpg"),
            Err(ImageError::NoZoneMatch { .. })
        ));
    }

    #[test]
    fn url_agrees_with_tag_default_src() {
        let zones = zones();
        for src in ["cdn/logo.png", "cdn/dawn.jpg", "local/tie.jpg"] {
            let resolved = resolve_image(src, &zones).unwrap();
            let url = image_url(&resolved).unwrap();
            let tag = render_image_tag(&resolved, &RenderOptions::with_alt("")).unwrap();
            assert!(
                tag.contains(&format!(r#"src="{url}""#)),
                "tag for {src} does not use {url}: {tag}"
            );
        }
    }
}
