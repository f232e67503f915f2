//! Filename generation and sanitizing.

use std::sync::LazyLock;

use regex::Regex;

/// Characters kept by [`sanitize_component`].
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.\-]").expect("valid filename pattern"));

/// Base used when nothing but dots survives sanitizing.
const FALLBACK_BASE: &str = "file";

/// Replace whitespace with underscores and drop anything outside
/// `[A-Za-z0-9._-]`.
pub fn sanitize_component(name: &str) -> String {
    let underscored: String = name
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();

    DISALLOWED.replace_all(&underscored, "").into_owned()
}

/// Split a file name into base and extension (without the dot).
///
/// A leading dot starts the base, not an extension: `.bashrc` has none.
pub fn split_file_name(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(pos) if pos > 0 => (&name[..pos], Some(&name[pos + 1..])),
        _ => (name, None),
    }
}

/// A sanitized destination file name, kept split so a collision counter can
/// be placed before the extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileName {
    stem: String,
    ext: Option<String>,
}

impl FileName {
    /// Build the destination name for an attachment.
    ///
    /// With an artist name the result reads `[artist] - base.ext`.
    pub fn new(raw_name: &str, artist_name: Option<&str>) -> Self {
        let (base, ext) = split_file_name(raw_name);

        let mut base = sanitize_component(base);
        if base.chars().all(|c| c == '.') {
            base = FALLBACK_BASE.to_string();
        }

        let ext = ext.map(sanitize_component).filter(|e| !e.is_empty());

        let artist = artist_name
            .map(sanitize_component)
            .filter(|a| !a.is_empty());

        let stem = match artist {
            Some(artist) => format!("[{}] - {}", artist, base),
            None => base,
        };

        Self { stem, ext }
    }

    /// The plain name, `stem.ext`.
    pub fn render(&self) -> String {
        self.join(&self.stem)
    }

    /// The name with `_counter` appended to the stem: `stem_N.ext`.
    pub fn numbered(&self, counter: u32) -> String {
        self.join(&format!("{}_{}", self.stem, counter))
    }

    fn join(&self, stem: &str) -> String {
        match &self.ext {
            Some(ext) => format!("{}.{}", stem, ext),
            None => stem.to_string(),
        }
    }
}
