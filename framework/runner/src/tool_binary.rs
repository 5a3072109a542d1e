use std::env;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use anyhow::bail;
use anyhow::Context;

use crate::types::SweepResult;

/// Environment variable to override the path to the mapping tool binary.
pub const NAMAP_BIN_PATH_ENV: &str = "NAMAP_BIN_PATH";

/// Get the path to the mapping tool binary.
///
/// If the [`NAMAP_BIN_PATH_ENV`] environment variable is set, its value is used. Otherwise the
/// configured path is used. A bare name without any directory, such as `NaMain`, is looked up in
/// the user's `PATH`. Anything else must point to an existing file.
pub fn tool_binary_path(configured: &Path) -> SweepResult<PathBuf> {
    let from_env = env::var(NAMAP_BIN_PATH_ENV).ok();
    resolve_tool_binary(from_env.as_deref(), configured, env::var_os("PATH"))
}

fn resolve_tool_binary(
    from_env: Option<&str>,
    configured: &Path,
    search_path: Option<OsString>,
) -> SweepResult<PathBuf> {
    let candidate = match from_env {
        Some("") => {
            bail!("'{NAMAP_BIN_PATH_ENV}' set to empty string");
        }
        Some(path) => PathBuf::from(path),
        None => configured.to_path_buf(),
    };

    if is_bare_name(&candidate) {
        log::debug!(
            "'{}' is not a path so looking in user's 'PATH'",
            candidate.display()
        );
        let cwd = env::current_dir().context("Failed to get the current directory")?;
        return which::which_in(&candidate, search_path, cwd).with_context(|| {
            format!(
                "Mapping tool binary '{}' not found in PATH. Install it or set '{NAMAP_BIN_PATH_ENV}' to the correct path.",
                candidate.display()
            )
        });
    }

    if !candidate.exists() {
        bail!(
            "Mapping tool binary '{path}' doesn't exist",
            path = candidate.display()
        );
    }

    Ok(candidate)
}

fn is_bare_name(path: &Path) -> bool {
    let mut components = path.components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    #[cfg(unix)]
    use std::os::unix::fs::PermissionsExt as _;

    use tempfile::{NamedTempFile, TempDir};

    use super::*;

    #[test]
    fn test_should_not_get_tool_path_if_not_exist() {
        let result = resolve_tool_binary(
            Some("/non/existent/path/to/NaMain"),
            Path::new("./NaMain"),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_should_prefer_env_over_configured_path() {
        let temp = NamedTempFile::new().expect("failed to create temp file");
        let test_path = temp.path().to_str().expect("failed to get temp file path");

        let result = resolve_tool_binary(Some(test_path), Path::new("./missing/NaMain"), None)
            .expect("failed to get tool path");

        assert_eq!(result, PathBuf::from(test_path));
    }

    #[test]
    fn test_should_use_configured_path() {
        let temp = NamedTempFile::new().expect("failed to create temp file");

        let result = resolve_tool_binary(None, temp.path(), None).expect("failed to get tool path");

        assert_eq!(result, temp.path());
    }

    #[test]
    fn test_should_reject_empty_env() {
        assert!(resolve_tool_binary(Some(""), Path::new("./NaMain"), None).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_should_find_bare_name_in_path() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let tool_path = temp.path().join("NaMain");
        std::fs::write(&tool_path, "#!/bin/sh\n").expect("failed to create tool file");
        let mut perms = std::fs::metadata(&tool_path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&tool_path, perms).unwrap();

        let result = resolve_tool_binary(
            None,
            Path::new("NaMain"),
            Some(temp.path().as_os_str().to_owned()),
        )
        .expect("failed to get tool path");

        assert_eq!(result, tool_path);
    }

    #[test]
    fn test_should_not_find_bare_name_without_path() {
        let temp = TempDir::new().expect("failed to create temp dir");

        let result = resolve_tool_binary(
            None,
            Path::new("NaMain"),
            Some(temp.path().as_os_str().to_owned()),
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_should_treat_dot_slash_as_path() {
        assert!(!is_bare_name(Path::new("./NaMain")));
        assert!(!is_bare_name(Path::new("bin/NaMain")));
        assert!(is_bare_name(Path::new("NaMain")));
    }
}
