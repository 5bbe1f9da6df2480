//! Container orchestration
//!
//! Everything that touches docker lives here: the availability probe, the
//! `docker run` invocation with the plan's bind mounts, and the line-by-line
//! streaming/cleanup of the tool's log.

pub mod log;
pub mod runner;

pub use log::format_tool_log;
pub use runner::{CONTAINER_BLENDER, ContainerRunner, RunSummary, blender_command, docker_available};
