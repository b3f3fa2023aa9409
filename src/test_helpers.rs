//! Shared test utilities: compact builders for records, variants and indexes.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let index = index_of(&[
//!     ("logo.png", single(120, 40)),
//!     ("dawn.jpg", grouped(&[("dawn-800.jpg", 800, 533), ("dawn-1400.jpg", 1400, 933)])),
//! ]);
//! ```

use crate::types::{ImageIndex, ImageRecord, Variant, Variants};

/// Variants from `(path, width, height)` triples, order preserved.
pub fn variants(entries: &[(&str, u32, u32)]) -> Variants {
    entries
        .iter()
        .map(|&(path, width, height)| (path, Variant { width, height }))
        .collect()
}

pub fn single(width: u32, height: u32) -> ImageRecord {
    ImageRecord::Single { width, height }
}

/// Grouped record; top-level dimensions are taken from the widest variant.
pub fn grouped(entries: &[(&str, u32, u32)]) -> ImageRecord {
    let (width, height) = entries
        .iter()
        .map(|&(_, w, h)| (w, h))
        .max_by_key(|&(w, _)| w)
        .unwrap_or((0, 0));
    ImageRecord::Grouped {
        width,
        height,
        variants: variants(entries),
    }
}

pub fn index_of(entries: &[(&str, ImageRecord)]) -> ImageIndex {
    entries
        .iter()
        .map(|(path, record)| (*path, record.clone()))
        .collect()
}
