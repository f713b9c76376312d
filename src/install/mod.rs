//! Package-manager backends and install dispatch.
//!
//! Each backend knows two things: how to spell a [`MissingResource`] as a
//! package name, and what command line installs it. The supervisor only
//! ever calls [`install`]; adding another distribution's package manager
//! means implementing [`InstallerBackend`] and appending it to
//! [`backend_candidates`], nothing more.

use crate::diagnose::MissingResource;
use crate::error::{Result, TexmendError};
use crate::shell::{command_exists, run_streaming};

/// A system package manager that can install TeX resources.
pub trait InstallerBackend {
    /// Backend name as probed on PATH.
    fn name(&self) -> &'static str;

    /// Package name for the given resource, in this backend's dialect.
    fn package_name(&self, resource: &MissingResource) -> String;

    /// Full argv (program first) that installs the resource
    /// non-interactively.
    fn command(&self, resource: &MissingResource) -> Vec<String>;
}

/// Fedora/RHEL dnf. Queries packages through the `tex(...)` virtual
/// provides, so the resource keeps its extension.
pub struct DnfBackend;

impl InstallerBackend for DnfBackend {
    fn name(&self) -> &'static str {
        "dnf"
    }

    fn package_name(&self, resource: &MissingResource) -> String {
        format!("tex({})", resource.name())
    }

    fn command(&self, resource: &MissingResource) -> Vec<String> {
        vec![
            "dnf".to_string(),
            "-y".to_string(),
            "install".to_string(),
            self.package_name(resource),
        ]
    }
}

/// TeX Live's own tlmgr. Packages are named by resource stem, so any
/// trailing extension is stripped.
pub struct TlmgrBackend;

impl InstallerBackend for TlmgrBackend {
    fn name(&self) -> &'static str {
        "tlmgr"
    }

    fn package_name(&self, resource: &MissingResource) -> String {
        strip_extension(resource.name()).to_string()
    }

    fn command(&self, resource: &MissingResource) -> Vec<String> {
        vec![
            "tlmgr".to_string(),
            "install".to_string(),
            self.package_name(resource),
        ]
    }
}

/// Drop a single trailing `.ext`, if any. `tikz.sty` → `tikz`,
/// `cmr10` → `cmr10`.
fn strip_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => stem,
        _ => name,
    }
}

/// Backends in probe order. First one whose binary is on PATH wins.
pub fn backend_candidates() -> Vec<Box<dyn InstallerBackend>> {
    vec![Box::new(DnfBackend), Box::new(TlmgrBackend)]
}

/// Install a missing resource through the first available backend.
///
/// When a preferred backend is absent and a later candidate is used,
/// say so: the user should know why the command line about to be echoed
/// is a tlmgr one on a dnf-less host. Installer output is streamed
/// live: installs can take minutes and may print prompts, so buffering
/// here would look like a hang. Returns `Ok` iff the installer exits
/// zero; a missing backend and a non-zero exit are both errors, since
/// without the install nothing about the next compile attempt would
/// change.
pub fn install(resource: &MissingResource) -> Result<()> {
    let candidates = backend_candidates();
    let index = candidates
        .iter()
        .position(|backend| command_exists(backend.name()))
        .ok_or(TexmendError::NoInstaller)?;

    for absent in &candidates[..index] {
        println!(
            "{} not found -> trying to install with {}",
            absent.name(),
            candidates[index].name()
        );
    }
    let backend = &candidates[index];

    let argv = backend.command(resource);
    let (program, args) = argv.split_first().expect("backend argv is never empty");

    tracing::info!(backend = backend.name(), resource = %resource, "installing");
    println!("{}", argv.join(" "));

    let result = run_streaming(program, args)?;
    if result.success {
        Ok(())
    } else {
        Err(TexmendError::InstallFailed {
            backend: backend.name().to_string(),
            package: backend.package_name(resource),
            code: result.exit_code,
        })
    }
}
