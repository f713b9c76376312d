//! Compiler selection and invocation construction.
//!
//! One invocation is built per compile attempt: the first compiler from
//! the preference list found on PATH, the user's passthrough arguments,
//! the fixed diagnostic flags, and the source filename last. The fixed
//! flags make the log machine-parseable (`-file-line-error`) and keep the
//! compiler from prompting (`-interaction=nonstopmode`).

use std::path::PathBuf;

use crate::error::{Result, TexmendError};
use crate::shell::command_exists;

/// Compilers tried in order of preference.
pub const COMPILER_PREFERENCE: &[&str] = &["latexmk", "pdflatex"];

/// Flags always appended immediately before the source filename.
pub const FIXED_ARGS: &[&str] = &[
    "-file-line-error",
    "-interaction=nonstopmode",
    "-synctex=1",
    "-output-format=pdf",
];

/// Default source when no positional argument was given.
pub const DEFAULT_SOURCE: &str = "main.tex";

/// One compile attempt's command line, immutable once built.
#[derive(Debug, Clone)]
pub struct CompilerInvocation {
    /// Compiler binary name.
    pub program: String,

    /// Full argument list: user extras, fixed flags, source filename.
    pub args: Vec<String>,

    /// The source filename (also the last element of `args`).
    pub source: String,
}

impl CompilerInvocation {
    /// Build an invocation for a known compiler.
    ///
    /// The last element of `user_args` is taken as the source filename
    /// if any were given, else `main.tex`; the rest precede the
    /// fixed-flag block verbatim.
    pub fn new(program: &str, user_args: &[String]) -> Self {
        let (extras, source) = match user_args.split_last() {
            Some((source, extras)) => (extras.to_vec(), source.clone()),
            None => (Vec::new(), DEFAULT_SOURCE.to_string()),
        };

        let mut args = extras;
        args.extend(FIXED_ARGS.iter().map(|s| s.to_string()));
        args.push(source.clone());

        Self {
            program: program.to_string(),
            args,
            source,
        }
    }

    /// Build an invocation with the compiler chosen from PATH.
    ///
    /// Fails with [`TexmendError::NoCompiler`] when nothing from the
    /// preference list is available.
    pub fn resolve(user_args: &[String]) -> Result<Self> {
        let program = select_compiler().ok_or_else(|| TexmendError::NoCompiler {
            candidates: COMPILER_PREFERENCE.join(", "),
        })?;
        Ok(Self::new(&program, user_args))
    }

    /// The auxiliary file the compiler consults across runs, derived
    /// from the source filename in the working directory.
    pub fn aux_file(&self) -> PathBuf {
        PathBuf::from(&self.source).with_extension("aux")
    }
}

/// First compiler from the preference list available on PATH.
pub fn select_compiler() -> Option<String> {
    COMPILER_PREFERENCE
        .iter()
        .find(|name| command_exists(name))
        .map(|name| name.to_string())
}
