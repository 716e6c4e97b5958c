//! # Slug and Filename Rules
//!
//! Display names become repository filenames through [`slugify`], and
//! caller-supplied filenames are normalized to one canonical extension per
//! artifact kind through [`normalize_filename`]. Branch names reuse the
//! same slug rule, so a single definition keeps paths and refs consistent.

/// Convert a display name into a lowercase hyphenated slug.
///
/// Rules: ASCII alphanumerics are kept (lowercased); every other run of
/// characters collapses to a single `-`; leading and trailing hyphens are
/// trimmed. `"Home Credential"` becomes `"home-credential"`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Normalize a filename to exactly one canonical extension.
///
/// Strips a trailing `.json` or `.jsonld` (case-insensitive) if present,
/// then appends `extension` (which includes its leading dot). The stem
/// itself is passed through unchanged — slugging is the caller's decision,
/// since explicit filenames from an editor are preserved as typed.
pub fn normalize_filename(name: &str, extension: &str) -> String {
    let stem = strip_known_extension(name);
    format!("{stem}{extension}")
}

fn strip_known_extension(name: &str) -> &str {
    let lower = name.to_ascii_lowercase();
    for ext in [".jsonld", ".json"] {
        if lower.ends_with(ext) {
            return &name[..name.len() - ext.len()];
        }
    }
    name
}
