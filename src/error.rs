//! Rendering failures.
//!
//! Every failure is terminal for the render call that hit it: nothing is
//! retried and nothing falls back to a default image. A missing index entry
//! means the indexer is out of sync with the templates, and a missing `alt`
//! means the template is wrong. Both should stop the site build rather than
//! ship broken markup.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("No zone found for image: {src}")]
    NoZoneMatch { src: String },
    #[error("Missing image data for image: {src}")]
    MissingImageData { src: String },
    #[error("an image index is required to render image tags")]
    MissingIndex,
    /// Decorative images must pass an empty `alt`, not omit it.
    #[error("Missing `alt` attribute for image: {src}")]
    MissingAlt { src: String },
    #[error("Missing `src` attribute for image")]
    MissingSrc,
    #[error("No image found with width {width} for image: {src}")]
    WidthNotFound { width: u32, src: String },
}

pub type ImageResult<T> = Result<T, ImageError>;
