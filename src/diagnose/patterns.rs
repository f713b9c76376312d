//! Compiled regexes for recognizable TeX failure shapes.
//!
//! Three families are recognized, ordered by specificity: a file the
//! compiler could not locate, a font substitution error, and an unknown
//! babel language option. Anything else in a log is not repairable by
//! installing a package and is left to the caller to surface verbatim.

use regex::Regex;
use std::sync::LazyLock;

macro_rules! lazy_regex {
    ($name:ident, $pattern:expr) => {
        pub(super) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($pattern).unwrap());
    };
}

// Two shapes, one family: LaTeX reports missing packages/classes with the
// first form, plain TeX input files with the second. Group 1 or 2 holds
// the name depending on which alternative fired. Whitespace is excluded
// from the captures: a name containing it is not installable and must
// fall through to the unrecoverable path.
lazy_regex!(
    RE_MISSING_FILE,
    r"! LaTeX Error: File `([^`'\s]+)' not found|! I can't find file `([^`'\s]+)'\."
);

// `! Font \OT1/cmr/m/n/10=cmr10 at 10.0pt not loadable` and friends.
// Best-effort: depends on TeX's own formatting of the font spec.
lazy_regex!(RE_FONT_SUBSTITUTION, r"! Font \\[^=]*=(\S+)\s");

// babel's complaint about a language option it has no .ldf for.
lazy_regex!(
    RE_BABEL_UNKNOWN_OPTION,
    r"Unknown option `([^`'\s]+)'\. Either you misspelled"
);
