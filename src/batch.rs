//! Batch rendering: one shortcode call per line of a source list.
//!
//! ```text
//! # hero images
//! en/photos/dawn.jpg
//! {"src": "en/logo.png", "alt": "Logo", "class": "brand"}
//! ```
//!
//! Blank lines and `#` comments are skipped. Lines starting with `{` are
//! JSON shortcode arguments; any other line is a source rendered with the
//! batch-wide `alt`. Lines render in parallel, results come back in input
//! order, and a failing batch reports the earliest failing line.

use crate::plugin::{HostError, Registry, ShortcodeArgs};
use rayon::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("line {line}: invalid shortcode arguments: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },
    #[error("line {line}: {source}")]
    Render { line: usize, source: HostError },
}

/// One parsed line, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    pub line: usize,
    pub args: ShortcodeArgs,
}

/// Parse a batch file. Stops at the first malformed JSON line.
pub fn parse_batch(content: &str, alt: Option<&str>) -> Result<Vec<BatchRequest>, BatchError> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| -> Result<BatchRequest, BatchError> {
            let args = if line.starts_with('{') {
                serde_json::from_str::<ShortcodeArgs>(line).map_err(|source| BatchError::Parse {
                    line: line_no,
                    source,
                })?
            } else {
                ShortcodeArgs {
                    src: Some(line.to_string()),
                    alt: alt.map(str::to_string),
                    ..ShortcodeArgs::default()
                }
            };
            Ok(BatchRequest {
                line: line_no,
                args,
            })
        })
        .collect()
}

/// Render every request through the shortcode registered as `name`.
///
/// Rendering runs on the rayon pool. Output order is input order, and on
/// failure the error of the earliest failing line is returned, whichever
/// worker finished first.
pub fn render_batch(
    registry: &Registry,
    name: &str,
    requests: &[BatchRequest],
) -> Result<Vec<String>, BatchError> {
    let results: Vec<Result<String, BatchError>> = requests
        .par_iter()
        .map(|request| {
            registry
                .call_shortcode(name, &request.args)
                .map_err(|source| BatchError::Render {
                    line: request.line,
                    source,
                })
        })
        .collect();
    let rendered = results.into_iter().collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(tags = rendered.len(), "rendered batch");
    Ok(rendered)
}
