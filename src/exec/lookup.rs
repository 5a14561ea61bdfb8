// src/exec/lookup.rs

//! Executable resolution on `PATH`.

use std::env;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Full path to `executable`, or `None` if it cannot be found.
///
/// A name containing a path separator is checked directly; anything
/// else is searched for in each `PATH` entry in order.
pub fn which(executable: &str) -> Option<PathBuf> {
    if executable.contains(MAIN_SEPARATOR) {
        let candidate = Path::new(executable);
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    let path_var = env::var_os("PATH")?;
    env::split_paths(&path_var)
        .map(|dir| dir.join(executable))
        .find(|candidate| is_executable(candidate))
}

fn is_executable(path: &Path) -> bool {
    match path.metadata() {
        Ok(meta) if meta.is_file() => {
            #[cfg(unix)]
            {
                meta.permissions().mode() & 0o111 != 0
            }
            #[cfg(not(unix))]
            {
                true
            }
        }
        _ => false,
    }
}
