//! `#/<index>` location-hash codec for bookmarkable slides.

/// Parse a location hash of the form `#/<index>`. Anything else is `None`.
pub fn parse_location_hash(hash: &str) -> Option<usize> {
    let digits = hash.strip_prefix("#/")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Canonical hash string for a slide index.
pub fn format_location_hash(index: usize) -> String {
    format!("#/{index}")
}
