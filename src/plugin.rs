//! Host integration: exposing the renderers as a shortcode and a filter.
//!
//! Template engines bind helpers by name. This crate does not know about any
//! particular engine; it depends on two narrow capabilities the host
//! provides, [`ShortcodeHost`] and [`FilterHost`], and registers plain
//! closures through them:
//!
//! ```text
//! {% image src="en/dawn.jpg", alt="Dawn over the bay", class="hero" %}
//!     → <img loading="lazy" sizes="auto" … />
//! {{ "en/dawn.jpg" | imageUrl }}
//!     → /img/en/dawn-2080.jpg
//! ```
//!
//! Registered closures own an `Arc<[Zone]>` and never mutate it, so a host
//! may call them from any number of threads at once.
//!
//! [`Registry`] is a minimal in-memory host, used by the CLI.

use crate::error::{ImageError, ImageResult};
use crate::tag::{RenderOptions, render_image_tag};
use crate::url::image_url;
use crate::zone::{Zone, resolve_image};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

pub type ShortcodeFn = Arc<dyn Fn(&ShortcodeArgs) -> ImageResult<String> + Send + Sync>;
pub type FilterFn = Arc<dyn Fn(&str) -> ImageResult<String> + Send + Sync>;

/// Capability to bind a named shortcode.
pub trait ShortcodeHost {
    fn add_shortcode(&mut self, name: &str, shortcode: ShortcodeFn);
}

/// Capability to bind a named filter.
pub trait FilterHost {
    fn add_filter(&mut self, name: &str, filter: FilterFn);
}

/// Arguments as a template passes them to the image shortcode.
///
/// Keys the shortcode doesn't use (engine bookkeeping such as `__keywords`)
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ShortcodeArgs {
    pub src: Option<String>,
    pub alt: Option<String>,
    pub class: Option<String>,
    pub lazy: Option<bool>,
    pub sizes: Option<String>,
    #[serde(rename = "defaultImageWidth", alias = "default_image_width")]
    pub default_image_width: Option<u32>,
}

impl ShortcodeArgs {
    /// Rendering options with the shortcode defaults applied.
    pub fn render_options(&self) -> RenderOptions {
        let defaults = RenderOptions::default();
        RenderOptions {
            alt: self.alt.clone(),
            class_attr: self.class.clone(),
            lazy: self.lazy.unwrap_or(defaults.lazy),
            sizes: self.sizes.clone().unwrap_or(defaults.sizes),
            default_image_width: self.default_image_width,
        }
    }
}

/// Render the shortcode output for `args` against `zones`.
pub fn image_shortcode(args: &ShortcodeArgs, zones: &[Zone]) -> ImageResult<String> {
    let src = args.src.as_deref().unwrap_or_default();
    let resolved = match resolve_image(src, zones) {
        Err(ImageError::NoZoneMatch { .. }) if src.is_empty() => return Err(ImageError::MissingSrc),
        other => other?,
    };
    render_image_tag(&resolved, &args.render_options())
}

/// Render the filter output (a bare URL) for `src` against `zones`.
pub fn image_url_filter(src: &str, zones: &[Zone]) -> ImageResult<String> {
    let resolved = resolve_image(src, zones)?;
    image_url(&resolved)
}

pub fn add_image_shortcode<H: ShortcodeHost + ?Sized>(host: &mut H, name: &str, zones: Arc<[Zone]>) {
    tracing::debug!(name, zones = zones.len(), "registering image shortcode");
    host.add_shortcode(
        name,
        Arc::new(move |args: &ShortcodeArgs| image_shortcode(args, &zones)),
    );
}

pub fn add_image_url_filter<H: FilterHost + ?Sized>(host: &mut H, name: &str, zones: Arc<[Zone]>) {
    tracing::debug!(name, zones = zones.len(), "registering image URL filter");
    host.add_filter(name, Arc::new(move |src: &str| image_url_filter(src, &zones)));
}

/// What to register, and under which names.
#[derive(Debug, Clone, Default)]
pub struct PluginOptions {
    /// Shortcode name; `None` skips the shortcode.
    pub img_shortcode: Option<String>,
    /// Filter name; `None` skips the filter.
    pub img_url_filter: Option<String>,
    pub zones: Vec<Zone>,
}

/// Register the shortcode and/or filter named in `options`.
pub fn register<H: ShortcodeHost + FilterHost + ?Sized>(host: &mut H, options: PluginOptions) {
    let zones: Arc<[Zone]> = options.zones.into();
    if let Some(name) = &options.img_shortcode {
        add_image_shortcode(host, name, Arc::clone(&zones));
    }
    if let Some(name) = &options.img_url_filter {
        add_image_url_filter(host, name, zones);
    }
}

#[derive(Error, Debug)]
pub enum HostError {
    #[error("no shortcode registered as `{0}`")]
    UnknownShortcode(String),
    #[error("no filter registered as `{0}`")]
    UnknownFilter(String),
    #[error(transparent)]
    Image(#[from] ImageError),
}

/// In-memory host: name → registered function.
#[derive(Default, Clone)]
pub struct Registry {
    shortcodes: HashMap<String, ShortcodeFn>,
    filters: HashMap<String, FilterFn>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shortcode_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.shortcodes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn filter_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.filters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn call_shortcode(&self, name: &str, args: &ShortcodeArgs) -> Result<String, HostError> {
        let shortcode = self
            .shortcodes
            .get(name)
            .ok_or_else(|| HostError::UnknownShortcode(name.to_string()))?;
        Ok(shortcode(args)?)
    }

    pub fn call_filter(&self, name: &str, input: &str) -> Result<String, HostError> {
        let filter = self
            .filters
            .get(name)
            .ok_or_else(|| HostError::UnknownFilter(name.to_string()))?;
        Ok(filter(input)?)
    }
}

impl ShortcodeHost for Registry {
    fn add_shortcode(&mut self, name: &str, shortcode: ShortcodeFn) {
        self.shortcodes.insert(name.to_string(), shortcode);
    }
}

impl FilterHost for Registry {
    fn add_filter(&mut self, name: &str, filter: FilterFn) {
        self.filters.insert(name.to_string(), filter);
    }
}
