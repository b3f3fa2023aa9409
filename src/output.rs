//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! ## Check
//!
//! ```text
//! Helpers
//!     Shortcode: image
//!     Filter: imageUrl
//!
//! Zones
//! 001 en/ → /img/en
//!     Index: imdexer/en.json
//!     Records: 12 (5 grouped, 7 single)
//! 002 fr/ → /img/fr
//!     Index: imdexer/fr.json
//!     Records: 3 (0 grouped, 3 single)
//! ```

use crate::config::PluginConfig;
use crate::zone::Zone;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Zone header: position, prefix (or `*` when it owns everything), base URL.
fn zone_header(pos: usize, prefix: Option<&str>, base_url: &str) -> String {
    let prefix = match prefix {
        Some(p) if !p.is_empty() => p,
        _ => "*",
    };
    let base_url = if base_url.is_empty() { "(relative)" } else { base_url };
    format!("{} {} → {}", format_index(pos), prefix, base_url)
}

pub fn format_check_output(config: &PluginConfig, zones: &[Zone]) -> Vec<String> {
    let mut lines = vec!["Helpers".to_string()];
    let helpers = [
        ("Shortcode", config.img_shortcode.as_deref()),
        ("Filter", config.img_url_filter.as_deref()),
    ];
    for (label, name) in helpers {
        lines.push(format!(
            "{}{}: {}",
            indent(1),
            label,
            name.unwrap_or("(not registered)")
        ));
    }

    lines.push(String::new());
    lines.push("Zones".to_string());
    // Single zone: prefix is ignored, show it as owning everything.
    let single = zones.len() == 1;
    for (i, (zone, zone_config)) in zones.iter().zip(&config.zones).enumerate() {
        let prefix = if single { None } else { zone.prefix.as_deref() };
        lines.push(zone_header(i + 1, prefix, &zone.base_url));
        lines.push(format!(
            "{}Index: {}",
            indent(1),
            zone_config.index.display()
        ));
        match &zone.index {
            Some(index) => {
                let grouped = index.grouped_count();
                lines.push(format!(
                    "{}Records: {} ({} grouped, {} single)",
                    indent(1),
                    index.len(),
                    grouped,
                    index.len() - grouped
                ));
            }
            None => lines.push(format!("{}Records: (no index)", indent(1))),
        }
    }
    lines
}

pub fn print_check_output(config: &PluginConfig, zones: &[Zone]) {
    for line in format_check_output(config, zones) {
        println!("{}", line);
    }
}

/// One line per rendered tag, in input order.
pub fn format_batch_output(rendered: &[String]) -> Vec<String> {
    let mut lines = rendered.to_vec();
    lines.push(format!("Rendered {} image tags", rendered.len()));
    lines
}

pub fn print_batch_output(rendered: &[String]) {
    for line in format_batch_output(rendered) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::test_helpers::{grouped, index_of, single};

    fn two_zone_config() -> PluginConfig {
        parse_config(
            r#"
img_shortcode = "image"

[[zones]]
prefix = "en/"
index = "imdexer/en.json"
base_url = "/img/en"

[[zones]]
prefix = "fr/"
index = "imdexer/fr.json"
base_url = ""
"#,
        )
        .unwrap()
    }

    #[test]
    fn check_output_lists_helpers_and_zones() {
        let config = two_zone_config();
        let zones = vec![
            Zone::new(
                index_of(&[
                    ("a.png", single(1, 1)),
                    ("b.jpg", grouped(&[("b-1.jpg", 1, 1)])),
                ]),
                "/img/en",
            )
            .with_prefix("en/"),
            Zone::new(index_of(&[("c.png", single(1, 1))]), "").with_prefix("fr/"),
        ];
        let lines = format_check_output(&config, &zones);
        assert_eq!(
            lines,
            vec![
                "Helpers",
                "    Shortcode: image",
                "    Filter: (not registered)",
                "",
                "Zones",
                "001 en/ → /img/en",
                "    Index: imdexer/en.json",
                "    Records: 2 (1 grouped, 1 single)",
                "002 fr/ → (relative)",
                "    Index: imdexer/fr.json",
                "    Records: 1 (0 grouped, 1 single)",
            ]
        );
    }

    #[test]
    fn single_zone_shown_as_catch_all() {
        let config = parse_config(
            r#"
[[zones]]
prefix = "ignored/"
index = "site.json"
base_url = "/img"
"#,
        )
        .unwrap();
        let zones = vec![Zone::new(index_of(&[]), "/img").with_prefix("ignored/")];
        let lines = format_check_output(&config, &zones);
        assert!(lines.contains(&"001 * → /img".to_string()));
        assert!(lines.contains(&"    Records: 0 (0 grouped, 0 single)".to_string()));
    }

    #[test]
    fn batch_output_ends_with_count() {
        let rendered = vec!["<img a />".to_string(), "<img b />".to_string()];
        let lines = format_batch_output(&rendered);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "<img a />");
        assert_eq!(lines[2], "Rendered 2 image tags");
    }
}
