//! # imdex-img
//!
//! Turns a logical image source (`"en/photos/dawn.jpg"`) into a finished
//! `<img>` tag, or a bare URL, using indexes precomputed by an external
//! image indexer. Nothing here touches image files: every width, height and
//! variant path comes from the index.
//!
//! # Pipeline
//!
//! ```text
//! src + zones ──match_zone──▶ (zone, local source) ──lookup──▶ ImageRecord
//!                                                                   │
//!                         ┌─────────────────────────────────────────┤
//!                         ▼                                         ▼
//!               render_image_tag  (<img …>)                image_url  (URL)
//!                         └──── select_default / select_by_width ───┘
//! ```
//!
//! Every step is a pure function over read-only data. Zones and indexes can
//! be shared across threads freely; each render call is independent and
//! fails fast with an [`ImageError`](error::ImageError).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`path`] | Joins base URLs and image paths with exactly one `/` |
//! | [`types`] | Index records (`Single` / `Grouped`) and index JSON loading |
//! | [`zone`] | Zones, prefix matching, record lookup |
//! | [`select`] | Default-variant selection for grouped images |
//! | [`tag`] | `<img>` tag rendering |
//! | [`url`] | Bare URL resolution |
//! | [`error`] | Render-time failures |
//! | [`plugin`] | Shortcode/filter registration against host capabilities |
//! | [`config`] | TOML configuration of zones and helper names |
//! | [`batch`] | Parallel rendering of a list of shortcode calls |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Verbatim Output
//!
//! Tags are assembled as literal strings rather than through an HTML
//! builder. Attribute order and spacing are part of the output contract so
//! regenerated pages diff cleanly against earlier builds, and no escaping
//! is applied: callers pass attribute-safe `alt` and `class` values.
//!
//! ## Grouped vs Single
//!
//! The index marks a responsive image only by the presence of a non-empty
//! `files` object. That is decoded once, at load time, into
//! [`ImageRecord::Grouped`](types::ImageRecord::Grouped) or
//! [`ImageRecord::Single`](types::ImageRecord::Single); renderers match on
//! the enum and never probe fields.
//!
//! ## Widest-Last Default
//!
//! Without an explicit width the widest variant is the default, and among
//! equally wide variants the last one in index order wins. Tags and URLs
//! share [`select::select_default`] so they always agree.

pub mod batch;
pub mod config;
pub mod error;
pub mod output;
pub mod path;
pub mod plugin;
pub mod select;
pub mod tag;
pub mod types;
pub mod url;
pub mod zone;

pub use error::{ImageError, ImageResult};
pub use plugin::{FilterHost, PluginOptions, Registry, ShortcodeArgs, ShortcodeHost, register};
pub use tag::RenderOptions;
pub use types::{ImageIndex, ImageRecord, Variant, Variants};
pub use zone::{ResolvedImage, Zone, ZoneMatch};

#[cfg(test)]
pub(crate) mod test_helpers;
