//! texmend - self-healing LaTeX build driver.
//!
//! texmend invokes a local TeX compiler to turn a source file into a PDF.
//! When compilation fails because a resource is missing (a class or style
//! file, a font, or a babel language definition), it identifies the
//! resource from the compiler's console output, installs it through the
//! host's TeX package manager, invalidates stale intermediate state, and
//! retries until the build succeeds or the failure turns out to be
//! unrecoverable.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`compiler`] - Compiler selection and invocation construction
//! - [`diagnose`] - Classification of compiler failures into missing resources
//! - [`error`] - Error types and result aliases
//! - [`install`] - Package-manager backends and install dispatch
//! - [`shell`] - Child-process execution and host probing
//! - [`supervisor`] - The compile/diagnose/install/retry loop
//!
//! # Example
//!
//! ```
//! use texmend::diagnose::{parse, MissingResource};
//!
//! let log = "! LaTeX Error: File `tikz.sty' not found.";
//! assert_eq!(
//!     parse(log),
//!     Some(MissingResource::File { name: "tikz.sty".into() })
//! );
//! ```

pub mod cli;
pub mod compiler;
pub mod diagnose;
pub mod error;
pub mod install;
pub mod shell;
pub mod supervisor;

pub use error::{Result, TexmendError};
