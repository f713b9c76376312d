//! The compile/diagnose/install/retry loop.
//!
//! Each iteration runs one compile attempt. A clean exit ends the loop;
//! a failure is handed to the diagnostic parser, and a recognized missing
//! resource triggers a privilege check, an install, and invalidation of
//! the compiler's auxiliary file so the next attempt cannot short-circuit
//! from stale intermediate state. Everything else is surfaced verbatim
//! and reported as unrecoverable. The loop is bounded two ways: a hard
//! attempt cap, and a check that the same resource is never installed
//! twice in a row (an install that "succeeds" without fixing anything
//! would otherwise loop forever).

use std::path::Path;

use console::style;

use crate::compiler::CompilerInvocation;
use crate::diagnose::{self, MissingResource};
use crate::error::{Result, TexmendError};
use crate::install;
use crate::shell::{self, run_captured, RunResult};

/// Hard cap on compile attempts.
pub const MAX_ATTEMPTS: usize = 32;

/// Mockable collaborators for the supervisor loop.
pub struct SupervisorContext<'a> {
    /// Run one compile attempt for the given passthrough args.
    pub compile: &'a dyn Fn(&[String]) -> Result<(CompilerInvocation, RunResult)>,
    /// Check for root privileges.
    pub is_elevated: &'a dyn Fn() -> Result<bool>,
    /// Install a diagnosed resource.
    pub install: &'a dyn Fn(&MissingResource) -> Result<()>,
    /// Remove an auxiliary file.
    pub invalidate: &'a dyn Fn(&Path) -> Result<()>,
}

/// Build the production `SupervisorContext`.
pub fn default_context() -> SupervisorContext<'static> {
    SupervisorContext {
        compile: &|user_args| {
            let invocation = CompilerInvocation::resolve(user_args)?;
            tracing::debug!(
                program = %invocation.program,
                source = %invocation.source,
                "compile attempt"
            );
            println!("Building:");
            let result = run_captured(&invocation.program, &invocation.args)?;
            Ok((invocation, result))
        },
        is_elevated: &shell::is_elevated,
        install: &install::install,
        invalidate: &invalidate_aux,
    }
}

/// Drives repeated compile attempts until success or a fatal error.
pub struct Supervisor {
    user_args: Vec<String>,
    max_attempts: usize,
    last_installed: Option<String>,
}

impl Supervisor {
    /// Create a supervisor for the given passthrough arguments.
    pub fn new(user_args: Vec<String>) -> Self {
        Self {
            user_args,
            max_attempts: MAX_ATTEMPTS,
            last_installed: None,
        }
    }

    /// Compile the document, installing missing resources and retrying
    /// as needed. Returns once the build succeeds; every fatal path is a
    /// typed error for `main` to report.
    pub fn compile_and_install(&mut self) -> Result<()> {
        self.run_loop(&default_context())
    }

    /// Loop body with injected collaborators.
    pub fn run_loop(&mut self, ctx: &SupervisorContext<'_>) -> Result<()> {
        for attempt in 1..=self.max_attempts {
            let (invocation, result) = (ctx.compile)(&self.user_args)?;

            if result.success {
                println!(
                    "{}",
                    style(format!("{} built successfully", invocation.source)).green()
                );
                return Ok(());
            }

            tracing::debug!(attempt, code = ?result.exit_code, "compile failed, diagnosing");
            let Some(resource) = diagnose::parse(&result.output) else {
                // Not something an install can repair; show the user
                // exactly what the compiler said.
                print!("{}", result.output);
                return Err(TexmendError::UnrecoverableBuild);
            };

            println!("We need to install: {}", resource);

            if self.last_installed.as_deref() == Some(resource.name()) {
                return Err(TexmendError::StuckResource {
                    resource: resource.name().to_string(),
                });
            }

            if !(ctx.is_elevated)()? {
                return Err(TexmendError::NotRoot {
                    resource: resource.name().to_string(),
                });
            }

            (ctx.install)(&resource)?;
            (ctx.invalidate)(&invocation.aux_file())?;
            self.last_installed = Some(resource.name().to_string());
        }

        Err(TexmendError::RetryLimit {
            attempts: self.max_attempts,
        })
    }
}

/// Remove the compiler's auxiliary file so the next attempt rebuilds
/// from scratch. A file that was never written is fine; any other
/// removal failure is a real IO error.
fn invalidate_aux(aux: &Path) -> Result<()> {
    match std::fs::remove_file(aux) {
        Ok(()) => {
            tracing::debug!(aux = %aux.display(), "removed auxiliary file");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Log which compilers the host offers, before the first attempt.
pub fn log_preflight() {
    for name in crate::compiler::COMPILER_PREFERENCE {
        tracing::debug!(compiler = name, available = shell::command_exists(name));
    }
    tracing::debug!(
        os = std::env::consts::OS,
        arch = std::env::consts::ARCH,
        "host"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    const MISSING_TIKZ: &str = "! LaTeX Error: File `tikz.sty' not found.";

    fn failing_compile(output: &str) -> (CompilerInvocation, RunResult) {
        (
            CompilerInvocation::new("latexmk", &[]),
            RunResult {
                output: output.to_string(),
                exit_code: Some(1),
                success: false,
            },
        )
    }

    fn passing_compile() -> (CompilerInvocation, RunResult) {
        (
            CompilerInvocation::new("latexmk", &[]),
            RunResult {
                output: String::new(),
                exit_code: Some(0),
                success: true,
            },
        )
    }

    #[test]
    fn clean_build_never_installs() {
        let installed = Cell::new(false);
        let ctx = SupervisorContext {
            compile: &|_| Ok(passing_compile()),
            is_elevated: &|| Ok(true),
            install: &|_| {
                installed.set(true);
                Ok(())
            },
            invalidate: &|_| Ok(()),
        };

        Supervisor::new(Vec::new()).run_loop(&ctx).unwrap();
        assert!(!installed.get());
    }

    #[test]
    fn diagnosed_failure_installs_then_retries_to_success() {
        let attempts = Cell::new(0usize);
        let installs = RefCell::new(Vec::new());
        let invalidated = Cell::new(false);

        let ctx = SupervisorContext {
            compile: &|_| {
                attempts.set(attempts.get() + 1);
                if attempts.get() == 1 {
                    Ok(failing_compile(MISSING_TIKZ))
                } else {
                    Ok(passing_compile())
                }
            },
            is_elevated: &|| Ok(true),
            install: &|resource| {
                installs.borrow_mut().push(resource.name().to_string());
                Ok(())
            },
            invalidate: &|_| {
                invalidated.set(true);
                Ok(())
            },
        };

        Supervisor::new(Vec::new()).run_loop(&ctx).unwrap();

        assert_eq!(attempts.get(), 2);
        assert_eq!(*installs.borrow(), vec!["tikz.sty".to_string()]);
        assert!(invalidated.get());
    }

    #[test]
    fn install_happens_only_after_privilege_probe_passes() {
        let installed = Cell::new(false);
        let ctx = SupervisorContext {
            compile: &|_| Ok(failing_compile(MISSING_TIKZ)),
            is_elevated: &|| Ok(false),
            install: &|_| {
                installed.set(true);
                Ok(())
            },
            invalidate: &|_| Ok(()),
        };

        let err = Supervisor::new(Vec::new()).run_loop(&ctx).unwrap_err();
        assert!(matches!(err, TexmendError::NotRoot { .. }));
        assert!(!installed.get());
    }

    #[test]
    fn aux_not_invalidated_when_install_fails() {
        let invalidated = Cell::new(false);
        let ctx = SupervisorContext {
            compile: &|_| Ok(failing_compile(MISSING_TIKZ)),
            is_elevated: &|| Ok(true),
            install: &|_| {
                Err(TexmendError::InstallFailed {
                    backend: "dnf".into(),
                    package: "tex(tikz.sty)".into(),
                    code: Some(1),
                })
            },
            invalidate: &|_| {
                invalidated.set(true);
                Ok(())
            },
        };

        let err = Supervisor::new(Vec::new()).run_loop(&ctx).unwrap_err();
        assert!(matches!(err, TexmendError::InstallFailed { .. }));
        assert!(!invalidated.get());
    }

    #[test]
    fn undiagnosable_failure_is_unrecoverable() {
        let installed = Cell::new(false);
        let ctx = SupervisorContext {
            compile: &|_| Ok(failing_compile("! Undefined control sequence.\nl.12 \\foo")),
            is_elevated: &|| Ok(true),
            install: &|_| {
                installed.set(true);
                Ok(())
            },
            invalidate: &|_| Ok(()),
        };

        let err = Supervisor::new(Vec::new()).run_loop(&ctx).unwrap_err();
        assert!(matches!(err, TexmendError::UnrecoverableBuild));
        assert!(!installed.get());
    }

    #[test]
    fn repeated_resource_terminates_instead_of_looping() {
        // Install always "succeeds" but the compiler keeps failing with
        // the same missing file.
        let attempts = Cell::new(0usize);
        let ctx = SupervisorContext {
            compile: &|_| {
                attempts.set(attempts.get() + 1);
                Ok(failing_compile(MISSING_TIKZ))
            },
            is_elevated: &|| Ok(true),
            install: &|_| Ok(()),
            invalidate: &|_| Ok(()),
        };

        let err = Supervisor::new(Vec::new()).run_loop(&ctx).unwrap_err();
        assert!(matches!(err, TexmendError::StuckResource { .. }));
        assert_eq!(attempts.get(), 2);
    }

    #[test]
    fn attempt_cap_stops_alternating_resources() {
        // Two resources alternating forever never trip the same-twice
        // check; the hard cap has to end the loop.
        let attempts = Cell::new(0usize);
        let ctx = SupervisorContext {
            compile: &|_| {
                attempts.set(attempts.get() + 1);
                if attempts.get() % 2 == 0 {
                    Ok(failing_compile(MISSING_TIKZ))
                } else {
                    Ok(failing_compile("! I can't find file `other.cls'."))
                }
            },
            is_elevated: &|| Ok(true),
            install: &|_| Ok(()),
            invalidate: &|_| Ok(()),
        };

        let err = Supervisor::new(Vec::new()).run_loop(&ctx).unwrap_err();
        assert!(matches!(err, TexmendError::RetryLimit { .. }));
        assert_eq!(attempts.get(), MAX_ATTEMPTS);
    }

    #[test]
    fn no_compiler_surfaces_immediately() {
        let ctx = SupervisorContext {
            compile: &|_| {
                Err(TexmendError::NoCompiler {
                    candidates: "latexmk, pdflatex".into(),
                })
            },
            is_elevated: &|| Ok(true),
            install: &|_| Ok(()),
            invalidate: &|_| Ok(()),
        };

        let err = Supervisor::new(Vec::new()).run_loop(&ctx).unwrap_err();
        assert!(matches!(err, TexmendError::NoCompiler { .. }));
    }

    #[test]
    fn invalidate_aux_removes_existing_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let aux = temp.path().join("main.aux");
        std::fs::write(&aux, "\\relax").unwrap();

        invalidate_aux(&aux).unwrap();

        assert!(!aux.exists());
    }

    #[test]
    fn invalidate_aux_tolerates_missing_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let aux = temp.path().join("never-written.aux");

        assert!(invalidate_aux(&aux).is_ok());
    }
}
