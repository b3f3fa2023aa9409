//! Zones: partitions of image sources sharing one index and one base URL.
//!
//! A site with a single image tree configures one zone and every source
//! belongs to it. Sites with several trees (per-language images, a separate
//! CDN for photos) configure one zone per tree and select it by source
//! prefix:
//!
//! ```text
//! zones: [ {prefix: "en/", base_url: "/img/en"}, {prefix: "fr/", base_url: "/img/fr"} ]
//!
//! "fr/hero.jpg"  →  zone "fr/", local source "hero.jpg"
//! "de/hero.jpg"  →  no zone (error)
//! ```
//!
//! Matching is first-match in list order, not longest-prefix: if `"img/"`
//! is listed before `"img/icons/"`, the second zone is unreachable.

use crate::error::{ImageError, ImageResult};
use crate::types::{ImageIndex, ImageRecord};

/// One configured zone.
#[derive(Debug, Clone, Default)]
pub struct Zone {
    /// Source prefix that selects this zone. Ignored when it is the only zone.
    pub prefix: Option<String>,
    /// `None` when the host registered the zone without index data.
    pub index: Option<ImageIndex>,
    /// URL that zone-local paths are joined onto.
    pub base_url: String,
}

impl Zone {
    pub fn new(index: ImageIndex, base_url: impl Into<String>) -> Self {
        Self {
            prefix: None,
            index: Some(index),
            base_url: base_url.into(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Look up the record for a zone-local source.
    pub fn lookup(&self, local_source: &str) -> ImageResult<&ImageRecord> {
        let index = self.index.as_ref().ok_or(ImageError::MissingIndex)?;
        lookup_record(index, local_source)
    }
}

/// Result of matching a source against the zone list.
#[derive(Debug, Clone, Copy)]
pub enum ZoneMatch<'a> {
    Matched {
        zone: &'a Zone,
        /// The source with the zone's prefix removed once from the start.
        local_source: &'a str,
    },
    Unmatched,
}

/// Find the zone that owns `src`.
pub fn match_zone<'a>(src: &'a str, zones: &'a [Zone]) -> ZoneMatch<'a> {
    if let [zone] = zones {
        return ZoneMatch::Matched {
            zone,
            local_source: src,
        };
    }
    zones
        .iter()
        .find_map(|zone| {
            let prefix = zone.prefix.as_deref()?;
            src.strip_prefix(prefix)
                .map(|local_source| ZoneMatch::Matched { zone, local_source })
        })
        .unwrap_or(ZoneMatch::Unmatched)
}

/// Like [`match_zone`], but an unmatched source is an error.
pub fn resolve_zone<'a>(src: &'a str, zones: &'a [Zone]) -> ImageResult<(&'a Zone, &'a str)> {
    match match_zone(src, zones) {
        ZoneMatch::Matched { zone, local_source } => {
            tracing::trace!(src, local_source, base_url = %zone.base_url, "resolved zone");
            Ok((zone, local_source))
        }
        ZoneMatch::Unmatched => Err(ImageError::NoZoneMatch {
            src: src.to_string(),
        }),
    }
}

/// Exact-key lookup of an image record in an index.
pub fn lookup_record<'a>(index: &'a ImageIndex, local_source: &str) -> ImageResult<&'a ImageRecord> {
    index
        .get(local_source)
        .ok_or_else(|| ImageError::MissingImageData {
            src: local_source.to_string(),
        })
}

/// A source resolved to its zone, ready for rendering.
///
/// `record` is `None` when the zone has no index or the index has no entry
/// for `local_source`; renderers turn that into the matching error after
/// their own argument checks.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedImage<'a> {
    pub zone: &'a Zone,
    pub local_source: &'a str,
    pub record: Option<&'a ImageRecord>,
}

impl<'a> ResolvedImage<'a> {
    /// The record, or the error explaining why there is none.
    pub fn require_record(&self) -> ImageResult<&'a ImageRecord> {
        match self.record {
            Some(record) => Ok(record),
            None => self.zone.lookup(self.local_source),
        }
    }
}

/// Resolve `src` to its zone and look up its record.
pub fn resolve_image<'a>(src: &'a str, zones: &'a [Zone]) -> ImageResult<ResolvedImage<'a>> {
    let (zone, local_source) = resolve_zone(src, zones)?;
    let record = zone.index.as_ref().and_then(|index| index.get(local_source));
    Ok(ResolvedImage {
        zone,
        local_source,
        record,
    })
}
