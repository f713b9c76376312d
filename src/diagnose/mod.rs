//! Diagnosis of captured compiler output.
//!
//! [`parse`] walks the pattern families in a fixed priority order (missing
//! file, then font, then babel) and returns the first match as a
//! [`MissingResource`]. The kind is carried explicitly so the installer
//! can pick the right package-name transformation without re-parsing the
//! log. A `None` means the failure is not repairable by installing
//! anything and the caller should surface the output as-is.

mod patterns;

use patterns::{RE_BABEL_UNKNOWN_OPTION, RE_FONT_SUBSTITUTION, RE_MISSING_FILE};

/// A resource the compiler needed but could not find on disk.
///
/// Invariant: `name()` is non-empty and contains no whitespace. The babel
/// variant already carries the `.ldf` suffix, since that is the file the
/// package managers index the language under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingResource {
    /// A file the compiler could not locate (`.cls`, `.sty`, or generic).
    File { name: String },

    /// A font identifier taken from a font-substitution error.
    Font { name: String },

    /// A babel language definition, named as `<language>.ldf`.
    BabelLanguage { name: String },
}

impl MissingResource {
    /// The installable resource name, extension included where one exists.
    pub fn name(&self) -> &str {
        match self {
            MissingResource::File { name }
            | MissingResource::Font { name }
            | MissingResource::BabelLanguage { name } => name,
        }
    }
}

impl std::fmt::Display for MissingResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingResource::File { name } => write!(f, "file '{}'", name),
            MissingResource::Font { name } => write!(f, "font '{}'", name),
            MissingResource::BabelLanguage { name } => write!(f, "babel language '{}'", name),
        }
    }
}

/// Scan captured compiler output for a recoverable failure.
///
/// Pure function of the buffer: repeated calls on the same input return
/// the same answer. The first family to match wins and the output is not
/// re-scanned for lower-priority families.
pub fn parse(output: &str) -> Option<MissingResource> {
    if let Some(caps) = RE_MISSING_FILE.captures(output) {
        // One group per error shape; exactly one of them captured.
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())?;
        return Some(MissingResource::File { name });
    }

    if let Some(caps) = RE_FONT_SUBSTITUTION.captures(output) {
        return Some(MissingResource::Font {
            name: caps.get(1)?.as_str().to_string(),
        });
    }

    if let Some(caps) = RE_BABEL_UNKNOWN_OPTION.captures(output) {
        return Some(MissingResource::BabelLanguage {
            name: format!("{}.ldf", caps.get(1)?.as_str()),
        });
    }

    None
}
