//! Image index data: the records an external indexer ("imdexer") writes out.
//!
//! An index is a JSON object keyed by zone-local image path:
//!
//! ```json
//! {
//!   "logo.png": { "width": 120, "height": 40 },
//!   "photos/dawn.jpg": {
//!     "width": 2080, "height": 1387,
//!     "files": {
//!       "photos/dawn-800.jpg":  { "width": 800,  "height": 533 },
//!       "photos/dawn-1400.jpg": { "width": 1400, "height": 933 },
//!       "photos/dawn-2080.jpg": { "width": 2080, "height": 1387 }
//!     }
//!   }
//! }
//! ```
//!
//! A record with a non-empty `files` object is a grouped image and renders as
//! a responsive `srcset`; anything else is a single image. The order of the
//! `files` entries is kept exactly as written, since it drives both the
//! `srcset` order and which of two equally wide variants becomes the default.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid index JSON in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// Pixel dimensions of one generated variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Variant {
    pub width: u32,
    pub height: u32,
}

/// Width variants of a grouped image, in index order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variants(Vec<(String, Variant)>);

impl Variants {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Variant)> {
        self.0.iter().map(|(path, v)| (path.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Variant)> for Variants {
    fn from_iter<I: IntoIterator<Item = (S, Variant)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(p, v)| (p.into(), v)).collect())
    }
}

impl<'de> Deserialize<'de> for Variants {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVariants;

        impl<'de> Visitor<'de> for OrderedVariants {
            type Value = Variants;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of variant path to {width, height}")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Variants, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((path, variant)) = map.next_entry::<String, Variant>()? {
                    entries.push((path, variant));
                }
                Ok(Variants(entries))
            }
        }

        deserializer.deserialize_map(OrderedVariants)
    }
}

/// One index entry.
///
/// The top-level `width`/`height` of a grouped record describe the source
/// image; tag rendering only ever uses the dimensions of a chosen variant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawRecord")]
pub enum ImageRecord {
    Single {
        width: u32,
        height: u32,
    },
    Grouped {
        width: u32,
        height: u32,
        variants: Variants,
    },
}

impl ImageRecord {
    pub fn is_grouped(&self) -> bool {
        matches!(self, ImageRecord::Grouped { .. })
    }
}

/// On-disk shape of a record, before the single/grouped split.
#[derive(Deserialize)]
struct RawRecord {
    width: u32,
    height: u32,
    #[serde(default)]
    files: Variants,
}

impl From<RawRecord> for ImageRecord {
    fn from(raw: RawRecord) -> Self {
        if raw.files.is_empty() {
            ImageRecord::Single {
                width: raw.width,
                height: raw.height,
            }
        } else {
            ImageRecord::Grouped {
                width: raw.width,
                height: raw.height,
                variants: raw.files,
            }
        }
    }
}

/// Read-only mapping from zone-local image path to its record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ImageIndex {
    records: HashMap<String, ImageRecord>,
}

impl ImageIndex {
    /// Exact-key lookup. No normalisation of `path` is performed.
    pub fn get(&self, path: &str) -> Option<&ImageRecord> {
        self.records.get(path)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of grouped (responsive) records.
    pub fn grouped_count(&self) -> usize {
        self.records.values().filter(|r| r.is_grouped()).count()
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load an index JSON file written by the indexer.
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let content = fs::read_to_string(path).map_err(|source| IndexError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content).map_err(|source| IndexError::Json {
            path: path.display().to_string(),
            source,
        })
    }
}

impl<S: Into<String>> FromIterator<(S, ImageRecord)> for ImageIndex {
    fn from_iter<I: IntoIterator<Item = (S, ImageRecord)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().map(|(k, r)| (k.into(), r)).collect(),
        }
    }
}
