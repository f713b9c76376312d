//! CLI argument definitions.
//!
//! texmend interprets no compiler flags of its own: everything positional
//! is forwarded to the TeX compiler verbatim, with the last positional
//! taken as the source filename. Only `--debug`/`--quiet` (and clap's
//! `--help`/`--version`) belong to texmend itself.

use clap::Parser;

/// texmend - self-healing LaTeX build driver.
///
/// Compiles a TeX document and, when the compiler fails over a missing
/// class, style, font, or babel language, installs the resource through
/// the system package manager and retries.
#[derive(Debug, Parser)]
#[command(name = "texmend")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Arguments forwarded to the TeX compiler verbatim; the last one is
    /// the source file (default: main.tex)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMPILER_ARGS")]
    pub compiler_args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_args_parses_empty_passthrough() {
        let cli = Cli::parse_from(["texmend"]);
        assert!(cli.compiler_args.is_empty());
        assert!(!cli.debug);
    }

    #[test]
    fn positionals_are_forwarded() {
        let cli = Cli::parse_from(["texmend", "thesis.tex"]);
        assert_eq!(cli.compiler_args, vec!["thesis.tex"]);
    }

    #[test]
    fn tex_style_flags_pass_through() {
        let cli = Cli::parse_from(["texmend", "-shell-escape", "paper.tex"]);
        assert_eq!(cli.compiler_args, vec!["-shell-escape", "paper.tex"]);
    }

    #[test]
    fn debug_flag_is_ours() {
        let cli = Cli::parse_from(["texmend", "--debug", "main.tex"]);
        assert!(cli.debug);
        assert_eq!(cli.compiler_args, vec!["main.tex"]);
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
