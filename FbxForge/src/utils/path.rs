//! Path utilities
//!
//! Container-side paths always use forward slashes, whatever the host's
//! separator is; these helpers keep the two namespaces straight.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Normalize path separators to forward slashes (for container-side paths)
pub fn normalize_path<P: AsRef<Path>>(path: P) -> String {
    path.as_ref().to_string_lossy().replace('\\', "/")
}

/// Join a container directory and a file name with a forward slash
pub fn container_join(dir: &str, name: &str) -> String {
    format!("{}/{}", dir.trim_end_matches('/'), name)
}

/// Expand a leading tilde and absolutize a user-supplied path.
///
/// Does not require the path to exist and does not resolve symlinks.
pub fn conform_path<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let expanded = shellexpand::tilde(&path.as_ref().to_string_lossy()).into_owned();
    Ok(std::path::absolute(expanded)?)
}

/// Check whether a path carries the given extension, case-insensitively
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalize_replaces_backslashes() {
        assert_eq!(normalize_path("a\\b\\c.glb"), "a/b/c.glb");
        assert_eq!(normalize_path("a/b/c.glb"), "a/b/c.glb");
    }

    #[test]
    fn container_join_handles_trailing_slash() {
        assert_eq!(container_join("/app/tmp", "in.glb"), "/app/tmp/in.glb");
        assert_eq!(container_join("/app/tmp/", "in.glb"), "/app/tmp/in.glb");
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(has_extension(Path::new("model.GLB"), "glb"));
        assert!(has_extension(Path::new("model.gltf"), "gltf"));
        assert!(!has_extension(Path::new("model.fbx"), "glb"));
        assert!(!has_extension(Path::new("model"), "glb"));
    }

    #[test]
    fn conform_path_absolutizes() {
        let conformed = conform_path("some/relative.glb").unwrap();
        assert!(conformed.is_absolute());
        assert!(conformed.ends_with("some/relative.glb"));
    }
}
