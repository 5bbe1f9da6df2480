//! Conversion pipeline
//!
//! Ties the pieces together in the order the original workflow demands:
//! validate the arguments, probe docker, build the mount plan, run the
//! container while streaming its log, then bring the output to its host
//! destination and clean up the staging area.

pub mod validate;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::container::{ContainerRunner, docker_available};
use crate::error::Result;
use crate::mount::{DEFAULT_CONTAINER_DIR, MountPlan, MountStrategy};
use crate::script;

/// Default docker image providing headless Blender
pub const DEFAULT_IMAGE: &str = "daotmicrosoft/blender:2.8_ubuntu";

/// Options for a conversion run
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Docker image that provides the conversion tool.
    pub image: String,
    /// Container-side staging directory (staged strategy).
    pub container_dir: String,
    /// How host paths are exposed to the container.
    pub strategy: MountStrategy,
    /// Keep the staging directory after the run.
    pub keep_temp: bool,
    /// Replacement Blender-side conversion script.
    pub script: Option<PathBuf>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            image: DEFAULT_IMAGE.to_string(),
            container_dir: DEFAULT_CONTAINER_DIR.to_string(),
            strategy: MountStrategy::Staged,
            keep_temp: false,
            script: None,
        }
    }
}

impl ConvertOptions {
    /// Use a different docker image
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Use a different container-side staging directory
    pub fn with_container_dir(mut self, dir: impl Into<String>) -> Self {
        self.container_dir = dir.into();
        self
    }

    /// Use a different mount strategy
    #[must_use]
    pub fn with_strategy(mut self, strategy: MountStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Substitute the Blender-side conversion script
    pub fn with_script(mut self, path: impl Into<PathBuf>) -> Self {
        self.script = Some(path.into());
        self
    }

    /// Keep the staging directory after the run
    #[must_use]
    pub fn keep_temp(mut self) -> Self {
        self.keep_temp = true;
        self
    }
}

/// Result of a finished conversion
#[derive(Debug, Clone, Serialize)]
pub struct ConvertResult {
    /// Where the .fbx landed on the host.
    pub output_path: PathBuf,
    /// Whether the output had to be copied out of the staging dir.
    pub copied_from_staging: bool,
    /// Number of tool log lines streamed during the run.
    pub log_lines: usize,
    /// The staging dir, when kept past the run (`keep_temp`).
    pub staging_kept: Option<PathBuf>,
    /// Warnings collected along the way.
    pub warnings: Vec<String>,
}

/// A validated conversion, ready to run
#[derive(Debug)]
pub struct ConvertJob {
    input: PathBuf,
    output: PathBuf,
    options: ConvertOptions,
}

impl ConvertJob {
    /// Validate the arguments and capture the options.
    ///
    /// `output` follows the flag semantics of [`validate::resolve_output`].
    /// Nothing is staged and docker is not touched until [`run`](Self::run).
    pub fn new(input: &Path, output: Option<&Path>, options: ConvertOptions) -> Result<Self> {
        let input = validate::resolve_input(input)?;
        let output = validate::resolve_output(&input, output)?;
        Ok(Self {
            input,
            output,
            options,
        })
    }

    /// The validated, absolute input path
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// The resolved, absolute output path
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Run the conversion, streaming tool log lines into `sink`.
    pub fn run<F: Fn(&str)>(self, sink: F) -> Result<ConvertResult> {
        docker_available()?;

        let script_override = match &self.options.script {
            Some(path) => Some(script::resolve_override(path)?),
            None => None,
        };

        let mut plan = match self.options.strategy {
            MountStrategy::Staged => MountPlan::stage(
                &self.input,
                &self.output,
                script_override.as_deref(),
                &self.options.container_dir,
            )?,
            MountStrategy::Direct => {
                MountPlan::direct(&self.input, &self.output, script_override.as_deref())?
            }
        };
        let mut warnings = plan.warnings().to_vec();

        let runner = ContainerRunner::for_plan(&self.options.image, &plan);
        info!(
            "converting {} -> {} in {} ({})",
            self.input.display(),
            self.output.display(),
            self.options.image,
            runner.name()
        );
        let summary = runner.run(sink)?;

        let copied = plan.finalize(&self.output)?;
        info!("wrote {}", self.output.display());

        let staging_kept = if self.options.keep_temp {
            plan.keep_staging()
        } else {
            None
        };
        if let Some(kept) = &staging_kept {
            warnings.push(format!("staging directory kept at {}", kept.display()));
        }

        Ok(ConvertResult {
            output_path: self.output,
            copied_from_staging: copied,
            log_lines: summary.lines_streamed,
            staging_kept,
            warnings,
        })
    }
}

/// Convert a .glb/.gltf file to .fbx.
///
/// The one-call form of [`ConvertJob`]: validates, runs the container, and
/// finalizes the output. `sink` receives each cleaned tool log line as it
/// streams out of the container.
pub fn convert_glb_to_fbx<P: AsRef<Path>, F: Fn(&str)>(
    input: P,
    output: Option<&Path>,
    options: ConvertOptions,
    sink: F,
) -> Result<ConvertResult> {
    ConvertJob::new(input.as_ref(), output, options)?.run(sink)
}
