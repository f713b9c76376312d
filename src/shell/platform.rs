//! Host probing: PATH lookup and the root-privilege check.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Result, TexmendError};

/// Look up an executable by name on the current PATH.
///
/// Returns the first matching entry. On Unix a candidate only counts if
/// its executable bit is set; a same-named plain file earlier on PATH
/// would not be runnable and must not shadow the real binary.
pub fn find_on_path(name: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

/// Check whether an executable is available on PATH.
pub fn command_exists(name: &str) -> bool {
    find_on_path(name).is_some()
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Check whether the current process runs as the superuser.
///
/// Runs `id -u` and parses the numeric uid from its stdout (trailing
/// newline stripped). A missing `id` binary or unparseable output is a
/// [`TexmendError::PrivilegeProbe`] error rather than a silent `false`:
/// without a working probe the supervisor cannot decide whether an
/// install is allowed to proceed.
pub fn is_elevated() -> Result<bool> {
    let output = Command::new("id")
        .arg("-u")
        .output()
        .map_err(|e| TexmendError::PrivilegeProbe {
            message: format!("could not run 'id -u': {}", e),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let uid: u32 = stdout
        .trim()
        .parse()
        .map_err(|_| TexmendError::PrivilegeProbe {
            message: format!("'id -u' printed {:?}, expected a numeric uid", stdout.trim()),
        })?;

    Ok(uid == 0)
}
