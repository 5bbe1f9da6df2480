//! The Blender-side conversion script
//!
//! The import/export script is embedded in the binary so the tool is
//! self-contained; it gets written into the mount at plan time. Callers can
//! substitute their own script through
//! [`ConvertOptions::with_script`](crate::convert::ConvertOptions::with_script).

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::utils::conform_path;

/// File name the script takes inside the container mount
pub const SCRIPT_FILE_NAME: &str = "script.py";

/// The embedded Blender import/export script
pub const BLENDER_GLB2FBX: &str = include_str!("../assets/blender_glb2fbx.py");

/// Write the embedded script into `dir`, returning its path
pub fn write_embedded(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(SCRIPT_FILE_NAME);
    fs::write(&path, BLENDER_GLB2FBX)?;
    Ok(path)
}

/// Validate a replacement script path supplied by the caller
pub fn resolve_override(path: &Path) -> Result<PathBuf> {
    let conformed = conform_path(path)?;
    if !conformed.is_file() {
        return Err(Error::ScriptNotFound { path: conformed });
    }
    Ok(conformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_script_drives_import_and_export() {
        assert!(BLENDER_GLB2FBX.contains("import_scene.gltf"));
        assert!(BLENDER_GLB2FBX.contains("export_scene.fbx"));
        assert!(BLENDER_GLB2FBX.contains("embed_textures=True"));
    }

    #[test]
    fn write_embedded_creates_script() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_embedded(dir.path()).unwrap();
        assert!(path.is_file());
        assert_eq!(path.file_name().unwrap(), SCRIPT_FILE_NAME);
    }

    #[test]
    fn missing_override_is_an_error() {
        let err = resolve_override(Path::new("/no/such/script.py")).unwrap_err();
        assert!(matches!(err, Error::ScriptNotFound { .. }));
    }
}
