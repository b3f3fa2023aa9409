//! URL path joining for image sources.
//!
//! Base URLs come from configuration (`/img`, `https://cdn.example.com/img/`)
//! and image sources come from the index (`photos/dawn.jpg`, `/dawn-800.jpg`).
//! Either side may or may not carry a slash at the seam, so joining has to
//! normalise exactly that one boundary and nothing else.

/// Join two URL path segments with exactly one `/` between them.
///
/// - `("/img/", "/x.png")` → `"/img/x.png"`
/// - `("/img", "x.png")` → `"/img/x.png"`
/// - `("", "x.png")` → `"x.png"` (empty operand: plain concatenation)
/// - `("/img", "")` → `"/img"`
///
/// Only a single trailing slash of `base` and a single leading slash of
/// `path` are removed; interior slashes are left alone.
pub fn join_posix_path(base: &str, path: &str) -> String {
    if base.is_empty() || path.is_empty() {
        return format!("{base}{path}");
    }
    let base = base.strip_suffix('/').unwrap_or(base);
    let path = path.strip_prefix('/').unwrap_or(path);
    format!("{base}/{path}")
}
