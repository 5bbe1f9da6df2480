//! Host-to-container path remapping
//!
//! The container only sees its own mount namespace, so every host path the
//! tool touches has to be rebound under a container directory and every
//! argument handed to the tool has to be rewritten in container terms. Two
//! layouts are supported:
//!
//! - [`MountStrategy::Staged`]: link (or copy) the input file, the output
//!   directory, and the conversion script into one temp dir and bind that
//!   single dir into the container. Survives hosts where bind-mounting the
//!   originals is undesirable; falls back to plain copies where symlinks
//!   are unavailable.
//! - [`MountStrategy::Direct`]: bind the input's and output's host dirs
//!   into the container as-is. No staging copy of the asset.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tempfile::TempDir;
use tracing::debug;

use crate::error::{Error, Result};
use crate::script;
use crate::utils::{container_join, normalize_path};

/// Container dir the staging temp dir is bound at (overridable via options)
pub const DEFAULT_CONTAINER_DIR: &str = "/app/tmp";
/// Container dir the input's host dir is bound at in direct mode
pub const DIRECT_INPUT_DIR: &str = "/app/tmp";
/// Container dir the output's host dir is bound at in direct mode
pub const DIRECT_OUTPUT_DIR: &str = "/app/tmp1";
/// Container dir the conversion script is bound at in direct mode
pub const DIRECT_SCRIPT_DIR: &str = "/app/tmp2";

/// Name the staged output directory link takes inside the staging dir
const STAGED_OUTPUT_DIR: &str = "output_dir";

/// How host paths are exposed to the container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MountStrategy {
    /// Stage everything into one temp dir bound at a single container path
    #[default]
    Staged,
    /// Bind the input and output host dirs into the container directly
    Direct,
}

impl MountStrategy {
    /// The strategy's canonical name
    pub fn as_str(self) -> &'static str {
        match self {
            MountStrategy::Staged => "staged",
            MountStrategy::Direct => "direct",
        }
    }
}

impl fmt::Display for MountStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MountStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "staged" => Ok(MountStrategy::Staged),
            "direct" => Ok(MountStrategy::Direct),
            _ => Err(Error::UnknownStrategy {
                name: s.to_string(),
            }),
        }
    }
}

/// A single host directory bound into the container
#[derive(Debug, Clone)]
pub struct BindMount {
    /// The host directory being exposed.
    pub host: PathBuf,
    /// Where it appears inside the container.
    pub container: String,
}

impl BindMount {
    pub fn new(host: impl Into<PathBuf>, container: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            container: container.into(),
        }
    }

    /// Render the docker `-v` argument: `host:container:rw`
    pub fn volume_arg(&self) -> String {
        format!("{}:{}:rw", normalize_path(&self.host), self.container)
    }
}

/// The complete host-to-container mapping for one conversion run.
///
/// Holds the bind mounts, the three container-side argument paths the tool
/// is invoked with, and the staging temp dir (kept alive for the duration of
/// the run; removed on drop unless explicitly kept).
#[derive(Debug)]
pub struct MountPlan {
    mounts: Vec<BindMount>,
    script_arg: String,
    input_arg: String,
    output_arg: String,
    copy_output: bool,
    staging: Option<TempDir>,
    warnings: Vec<String>,
}

impl MountPlan {
    /// Build a staged plan: one temp dir, one bind mount.
    ///
    /// The input file, the output's parent directory, and the conversion
    /// script are linked into a fresh temp dir which is bound at
    /// `container_dir`. Where symlinks are unavailable the input and script
    /// degrade to copies, and the output is copied back out of the staging
    /// dir after the run instead of being written through the linked dir.
    pub fn stage(
        input: &Path,
        output: &Path,
        script_override: Option<&Path>,
        container_dir: &str,
    ) -> Result<MountPlan> {
        let staging = tempfile::tempdir()?;
        let mut warnings = Vec::new();

        // Input file, extension preserved so the importer sees the right kind
        // TODO: stage sidecar buffers (.bin) next to a .gltf input as well
        let input_ext = input
            .extension()
            .and_then(|e| e.to_str())
            .map_or_else(|| "glb".to_string(), str::to_lowercase);
        let staged_input_name = format!("input_file.{input_ext}");
        if !link_or_copy_file(input, &staging.path().join(&staged_input_name))? {
            warnings.push(format!(
                "symlinks unavailable; copied {} into staging",
                input.display()
            ));
        }
        let input_arg = container_join(container_dir, &staged_input_name);

        // Output directory: linked in, or fall back to writing into the
        // staging dir itself and copying the result out afterwards
        let output_parent = parent_dir(output);
        let output_name = file_name(output);
        let staged_output_dir = staging.path().join(STAGED_OUTPUT_DIR);
        let (output_arg, copy_output) = match symlink_dir(&output_parent, &staged_output_dir) {
            Ok(()) => (
                container_join(&container_join(container_dir, STAGED_OUTPUT_DIR), &output_name),
                false,
            ),
            Err(err) => {
                debug!("cannot link output dir ({err}); will copy the result out of staging");
                warnings.push(
                    "cannot link the output directory; the result will be copied out of staging"
                        .to_string(),
                );
                (container_join(container_dir, &output_name), true)
            }
        };

        // Conversion script
        match script_override {
            Some(path) => {
                if !link_or_copy_file(path, &staging.path().join(script::SCRIPT_FILE_NAME))? {
                    warnings.push(format!(
                        "symlinks unavailable; copied {} into staging",
                        path.display()
                    ));
                }
            }
            None => {
                script::write_embedded(staging.path())?;
            }
        }
        let script_arg = container_join(container_dir, script::SCRIPT_FILE_NAME);

        Ok(MountPlan {
            mounts: vec![BindMount::new(staging.path(), container_dir)],
            script_arg,
            input_arg,
            output_arg,
            copy_output,
            staging: Some(staging),
            warnings,
        })
    }

    /// Build a direct plan: the input's and output's host dirs are bound
    /// into the container at fixed paths. The conversion script still needs
    /// a host dir of its own - the override's parent, or a small temp dir
    /// holding the embedded script.
    pub fn direct(
        input: &Path,
        output: &Path,
        script_override: Option<&Path>,
    ) -> Result<MountPlan> {
        let mut mounts = vec![
            BindMount::new(parent_dir(input), DIRECT_INPUT_DIR),
            BindMount::new(parent_dir(output), DIRECT_OUTPUT_DIR),
        ];

        let (staging, script_host_dir, script_name) = match script_override {
            Some(path) => (None, parent_dir(path), file_name(path)),
            None => {
                let staging = tempfile::tempdir()?;
                script::write_embedded(staging.path())?;
                let dir = staging.path().to_path_buf();
                (Some(staging), dir, script::SCRIPT_FILE_NAME.to_string())
            }
        };
        mounts.push(BindMount::new(script_host_dir, DIRECT_SCRIPT_DIR));

        Ok(MountPlan {
            mounts,
            script_arg: container_join(DIRECT_SCRIPT_DIR, &script_name),
            input_arg: container_join(DIRECT_INPUT_DIR, &file_name(input)),
            output_arg: container_join(DIRECT_OUTPUT_DIR, &file_name(output)),
            copy_output: false,
            staging,
            warnings: Vec::new(),
        })
    }

    /// The bind mounts the container must be started with
    pub fn mounts(&self) -> &[BindMount] {
        &self.mounts
    }

    /// Container-side path of the conversion script
    pub fn script_arg(&self) -> &str {
        &self.script_arg
    }

    /// Container-side path of the input file
    pub fn input_arg(&self) -> &str {
        &self.input_arg
    }

    /// Container-side path the tool writes the output to
    pub fn output_arg(&self) -> &str {
        &self.output_arg
    }

    /// Whether the output lands in the staging dir and must be copied out
    pub fn copy_output(&self) -> bool {
        self.copy_output
    }

    /// Warnings accumulated while building the plan
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Host path of the staging dir, if this plan has one
    pub fn staging_path(&self) -> Option<&Path> {
        self.staging.as_ref().map(TempDir::path)
    }

    /// Bring the output to its host destination after the container run.
    ///
    /// Copies it out of the staging dir when the plan requires that, and
    /// verifies it exists either way. Returns whether a copy happened.
    pub fn finalize(&self, output: &Path) -> Result<bool> {
        if self.copy_output {
            let staged = self
                .staging
                .as_ref()
                .map(|s| s.path().join(file_name(output)))
                .ok_or_else(|| Error::OutputMissing {
                    path: output.to_path_buf(),
                })?;
            if !staged.is_file() {
                return Err(Error::OutputMissing { path: staged });
            }
            fs::copy(&staged, output)?;
            Ok(true)
        } else {
            if !output.is_file() {
                return Err(Error::OutputMissing {
                    path: output.to_path_buf(),
                });
            }
            Ok(false)
        }
    }

    /// Persist the staging dir past the plan's lifetime (`--keep-temp`).
    ///
    /// Returns its path, or `None` when the plan has no staging dir.
    pub fn keep_staging(&mut self) -> Option<PathBuf> {
        self.staging.take().map(TempDir::keep)
    }
}

/// Parent directory of a path, falling back to `.` for bare file names
fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// File name component as an owned string (lossy)
fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(String::new, |n| n.to_string_lossy().into_owned())
}

/// Symlink `src` to `dst`, copying instead where symlinks are unavailable.
/// Returns whether a symlink was made.
fn link_or_copy_file(src: &Path, dst: &Path) -> Result<bool> {
    match symlink_file(src, dst) {
        Ok(()) => Ok(true),
        Err(err) => {
            debug!(
                "symlink {} -> {} failed ({err}); copying instead",
                src.display(),
                dst.display()
            );
            fs::copy(src, dst)?;
            Ok(false)
        }
    }
}

#[cfg(unix)]
fn symlink_file(src: &Path, dst: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

#[cfg(windows)]
fn symlink_file(src: &Path, dst: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}

#[cfg(not(any(unix, windows)))]
fn symlink_file(_src: &Path, _dst: &Path) -> std::io::Result<()> {
    Err(std::io::Error::from(std::io::ErrorKind::Unsupported))
}

#[cfg(unix)]
fn symlink_dir(src: &Path, dst: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

#[cfg(windows)]
fn symlink_dir(src: &Path, dst: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dst)
}

#[cfg(not(any(unix, windows)))]
fn symlink_dir(_src: &Path, _dst: &Path) -> std::io::Result<()> {
    Err(std::io::Error::from(std::io::ErrorKind::Unsupported))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn touch(path: &Path) {
        fs::write(path, b"glTF").unwrap();
    }

    #[test]
    fn strategy_parses_case_insensitively() {
        assert_eq!("staged".parse::<MountStrategy>().unwrap(), MountStrategy::Staged);
        assert_eq!("Direct".parse::<MountStrategy>().unwrap(), MountStrategy::Direct);
        assert!(matches!(
            "overlay".parse::<MountStrategy>(),
            Err(Error::UnknownStrategy { .. })
        ));
    }

    #[test]
    fn volume_arg_is_forward_slashed_rw() {
        let mount = BindMount::new("/host/dir", "/app/tmp");
        assert_eq!(mount.volume_arg(), "/host/dir:/app/tmp:rw");
    }

    #[test]
    fn staged_plan_uses_a_single_mount() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("model.glb");
        touch(&input);
        let output = dir.path().join("model.fbx");

        let plan = MountPlan::stage(&input, &output, None, "/app/tmp").unwrap();

        assert_eq!(plan.mounts().len(), 1);
        assert_eq!(plan.mounts()[0].container, "/app/tmp");
        assert_eq!(plan.input_arg(), "/app/tmp/input_file.glb");
        assert_eq!(plan.script_arg(), "/app/tmp/script.py");
        assert!(plan.staging_path().unwrap().join("script.py").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn staged_plan_links_and_writes_through_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("model.glb");
        touch(&input);
        let output = dir.path().join("model.fbx");

        let plan = MountPlan::stage(&input, &output, None, "/app/tmp").unwrap();

        // Symlinks work on unix: nothing to copy back out
        assert!(!plan.copy_output());
        assert_eq!(plan.output_arg(), "/app/tmp/output_dir/model.fbx");
        assert!(plan.warnings().is_empty());

        let staged_input = plan.staging_path().unwrap().join("input_file.glb");
        assert!(fs::symlink_metadata(&staged_input).unwrap().file_type().is_symlink());

        // A write through the staged output_dir link lands at the host path
        fs::write(
            plan.staging_path().unwrap().join("output_dir").join("model.fbx"),
            b"fbx",
        )
        .unwrap();
        assert!(!plan.finalize(&output).unwrap());
        assert!(output.is_file());
    }

    #[test]
    fn staged_plan_preserves_gltf_extension() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("scene.GLTF");
        touch(&input);
        let output = dir.path().join("scene.fbx");

        let plan = MountPlan::stage(&input, &output, None, "/app/tmp").unwrap();
        assert_eq!(plan.input_arg(), "/app/tmp/input_file.gltf");
    }

    #[test]
    fn direct_plan_binds_three_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("model.glb");
        touch(&input);
        let out_dir = dir.path().join("out");
        fs::create_dir(&out_dir).unwrap();
        let output = out_dir.join("model.fbx");

        let plan = MountPlan::direct(&input, &output, None).unwrap();

        assert_eq!(plan.mounts().len(), 3);
        assert_eq!(plan.mounts()[0].host, dir.path());
        assert_eq!(plan.mounts()[1].host, out_dir);
        assert_eq!(plan.input_arg(), "/app/tmp/model.glb");
        assert_eq!(plan.output_arg(), "/app/tmp1/model.fbx");
        assert_eq!(plan.script_arg(), "/app/tmp2/script.py");
        assert!(!plan.copy_output());
    }

    #[test]
    fn direct_plan_mounts_override_script_parent() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("model.glb");
        touch(&input);
        let output = dir.path().join("model.fbx");
        let custom = dir.path().join("custom.py");
        fs::write(&custom, "pass\n").unwrap();

        let plan = MountPlan::direct(&input, &output, Some(&custom)).unwrap();

        assert_eq!(plan.script_arg(), "/app/tmp2/custom.py");
        assert_eq!(plan.mounts()[2].host, dir.path());
        assert!(plan.staging_path().is_none());
    }

    #[test]
    fn finalize_copies_out_of_staging_when_required() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("model.fbx");

        let staging = tempfile::tempdir().unwrap();
        fs::write(staging.path().join("model.fbx"), b"fbx").unwrap();
        let plan = MountPlan {
            mounts: Vec::new(),
            script_arg: String::new(),
            input_arg: String::new(),
            output_arg: String::new(),
            copy_output: true,
            staging: Some(staging),
            warnings: Vec::new(),
        };

        assert!(plan.finalize(&output).unwrap());
        assert!(output.is_file());
    }

    #[test]
    fn finalize_reports_missing_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("model.glb");
        touch(&input);
        let output = dir.path().join("model.fbx");

        let plan = MountPlan::stage(&input, &output, None, "/app/tmp").unwrap();
        let err = plan.finalize(&output).unwrap_err();
        assert!(matches!(err, Error::OutputMissing { .. }));
    }

    #[test]
    fn keep_staging_persists_the_dir() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("model.glb");
        touch(&input);
        let output = dir.path().join("model.fbx");

        let mut plan = MountPlan::stage(&input, &output, None, "/app/tmp").unwrap();
        let kept = plan.keep_staging().unwrap();
        drop(plan);
        assert!(kept.is_dir());
        fs::remove_dir_all(&kept).unwrap();
    }
}
