//! # FbxForge
//!
//! Converts glTF/GLB assets to FBX by driving a headless Blender inside a
//! Docker container. The library plans the host-to-container path mapping,
//! launches the container, streams the tool's log back to the caller, and
//! copies the result out of the staging area when the mount layout requires
//! it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use fbxforge::convert::{ConvertOptions, convert_glb_to_fbx};
//!
//! let options = ConvertOptions::default();
//! let result = convert_glb_to_fbx("model.glb", None, options, |line| {
//!     println!("{line}");
//! })?;
//! println!("Wrote: {}", result.output_path.display());
//! # Ok::<(), fbxforge::Error>(())
//! ```
//!
//! ## Mount Strategies
//!
//! - [`mount::MountStrategy::Staged`] (default) - links (or copies) the
//!   input, the output directory, and the conversion script into one temp
//!   dir and binds that single dir into the container.
//! - [`mount::MountStrategy::Direct`] - binds the input and output host
//!   dirs into the container as-is; no staging copy of the asset.

pub mod config;
pub mod container;
pub mod convert;
pub mod error;
pub mod mount;
pub mod script;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::PersistedConfig;
    pub use crate::container::{ContainerRunner, RunSummary, docker_available, format_tool_log};
    pub use crate::convert::{ConvertJob, ConvertOptions, ConvertResult, convert_glb_to_fbx};
    pub use crate::error::{Error, Result};
    pub use crate::mount::{BindMount, MountPlan, MountStrategy};
    pub use crate::utils::normalize_path;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
