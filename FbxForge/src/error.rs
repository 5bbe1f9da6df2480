//! Error types for `FbxForge`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `FbxForge` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Input Validation Errors ====================
    /// The input path does not exist or is not a regular file.
    #[error("input file not found: {path}")]
    InputNotFound {
        /// The path that was checked.
        path: PathBuf,
    },

    /// The input file does not carry a .glb or .gltf extension.
    #[error("input must be a .glb or .gltf file: {path}")]
    InputNotGltf {
        /// The rejected input path.
        path: PathBuf,
    },

    // ==================== Output Validation Errors ====================
    /// The output file extension is not .fbx.
    #[error("output file extension must be .fbx, found .{extension}")]
    OutputExtensionNotFbx {
        /// The extension that was supplied.
        extension: String,
    },

    /// The directory the output file should be written into does not exist.
    #[error("output directory does not exist: {path}")]
    OutputDirMissing {
        /// The missing directory.
        path: PathBuf,
    },

    /// An extensionless output path was given but is not an existing directory.
    #[error("output path is not a directory: {path}")]
    OutputNotADirectory {
        /// The rejected output path.
        path: PathBuf,
    },

    // ==================== Script Errors ====================
    /// A replacement conversion script was supplied but does not exist.
    #[error("conversion script not found: {path}")]
    ScriptNotFound {
        /// The missing script path.
        path: PathBuf,
    },

    // ==================== Container Errors ====================
    /// The docker binary is missing or the daemon is not reachable.
    #[error("docker is not available: {message}")]
    DockerNotAvailable {
        /// What the availability probe reported.
        message: String,
    },

    /// The containerized tool exited with a non-zero status.
    #[error("container exited with status {code}:\n{tail}")]
    ContainerFailed {
        /// The container's exit code (-1 if killed by a signal).
        code: i32,
        /// The last few lines of streamed tool output.
        tail: String,
    },

    /// An unknown mount strategy name was supplied.
    #[error("unknown mount strategy: {name} (expected 'staged' or 'direct')")]
    UnknownStrategy {
        /// The unrecognized name.
        name: String,
    },

    // ==================== Result Errors ====================
    /// The container ran to completion but the expected output file is missing.
    #[error("conversion produced no output at: {path}")]
    OutputMissing {
        /// Where the output was expected.
        path: PathBuf,
    },
}

/// A specialized Result type for `FbxForge` operations.
pub type Result<T> = std::result::Result<T, Error>;
