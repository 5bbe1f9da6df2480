//! Input and output path validation
//!
//! The input must be an existing .glb/.gltf file. The output may be an
//! explicit .fbx path (its directory must already exist), an existing
//! directory (the file name is derived from the input), or omitted entirely
//! (the .fbx lands next to the input). Directories are never created
//! implicitly.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::utils::conform_path;
use crate::utils::path::has_extension;

/// Validate the input path: an existing .glb or .gltf file.
///
/// Returns the absolute, tilde-expanded path.
pub fn resolve_input(path: &Path) -> Result<PathBuf> {
    let input = conform_path(path)?;
    if !input.is_file() {
        return Err(Error::InputNotFound { path: input });
    }
    if !(has_extension(&input, "glb") || has_extension(&input, "gltf")) {
        return Err(Error::InputNotGltf { path: input });
    }
    Ok(input)
}

/// Resolve the output path against an already validated input path.
pub fn resolve_output(input: &Path, output: Option<&Path>) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .map_or_else(|| "output".to_string(), |s| s.to_string_lossy().into_owned());
    let fbx_name = format!("{stem}.fbx");

    let Some(output) = output else {
        return Ok(input.with_file_name(fbx_name));
    };

    let output = conform_path(output)?;
    match output.extension().and_then(|e| e.to_str()) {
        // Has a file extension: must be .fbx, in an existing directory
        Some(ext) => {
            if !ext.eq_ignore_ascii_case("fbx") {
                return Err(Error::OutputExtensionNotFbx {
                    extension: ext.to_lowercase(),
                });
            }
            let parent = output
                .parent()
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            if !parent.is_dir() {
                return Err(Error::OutputDirMissing { path: parent });
            }
            Ok(output)
        }
        // Extensionless: must be an existing directory
        None => {
            if !output.is_dir() {
                return Err(Error::OutputNotADirectory { path: output });
            }
            Ok(output.join(fbx_name))
        }
    }
}
