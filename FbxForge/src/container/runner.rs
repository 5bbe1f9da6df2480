//! Docker invocation and log streaming
//!
//! Drives the `docker` CLI directly: one `docker run --rm` per conversion,
//! the mount plan's volumes bound read-write, stdout and stderr piped and
//! streamed line-by-line while the tool works.

use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;

use tracing::debug;
use uuid::Uuid;

use super::log::format_tool_log;
use crate::error::{Error, Result};
use crate::mount::{BindMount, MountPlan};

/// Blender binary path inside the container image
pub const CONTAINER_BLENDER: &str = "./blender_app/blender";

/// How many trailing log lines are kept for error reporting
const TAIL_LINES: usize = 10;

/// Summary of a finished container run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Number of log lines streamed from the tool.
    pub lines_streamed: usize,
}

/// A single `docker run` invocation
#[derive(Debug, Clone)]
pub struct ContainerRunner {
    image: String,
    name: String,
    volume_args: Vec<String>,
    command: Vec<String>,
}

impl ContainerRunner {
    /// Build the runner for one conversion: the image's headless Blender
    /// invoked with the plan's container-side paths.
    pub fn for_plan(image: &str, plan: &MountPlan) -> Self {
        Self {
            image: image.to_string(),
            name: format!("fbxforge-{}", Uuid::new_v4()),
            volume_args: plan.mounts().iter().map(BindMount::volume_arg).collect(),
            command: blender_command(plan.script_arg(), plan.input_arg(), plan.output_arg()),
        }
    }

    /// The generated container name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full `docker run` argument list
    pub fn docker_args(&self) -> Vec<String> {
        let mut args = vec![
            "run".to_string(),
            "--rm".to_string(),
            "--name".to_string(),
            self.name.clone(),
        ];
        for volume in &self.volume_args {
            args.push("-v".to_string());
            args.push(volume.clone());
        }
        args.push(self.image.clone());
        args.extend(self.command.iter().cloned());
        args
    }

    /// Run the container to completion.
    ///
    /// stdout and stderr are merged and handed to `sink` line-by-line, after
    /// log cleanup, as they arrive. A non-zero exit fails with the exit code
    /// and the last streamed lines.
    pub fn run<F: Fn(&str)>(&self, sink: F) -> Result<RunSummary> {
        let args = self.docker_args();
        debug!("executing: docker {}", args.join(" "));

        let mut child = Command::new("docker")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let mut lines_streamed = 0usize;
        let mut tail: VecDeque<String> = VecDeque::with_capacity(TAIL_LINES);

        let (tx, rx) = mpsc::channel::<String>();
        thread::scope(|scope| {
            if let Some(stdout) = stdout {
                let tx = tx.clone();
                scope.spawn(move || forward_lines(stdout, &tx));
            }
            if let Some(stderr) = stderr {
                let tx = tx.clone();
                scope.spawn(move || forward_lines(stderr, &tx));
            }
            drop(tx);

            for line in rx {
                debug!(target: "fbxforge::tool", "{line}");
                sink(&line);
                if tail.len() == TAIL_LINES {
                    tail.pop_front();
                }
                tail.push_back(line);
                lines_streamed += 1;
            }
        });

        let status = child.wait()?;
        if !status.success() {
            return Err(Error::ContainerFailed {
                code: status.code().unwrap_or(-1),
                tail: tail.into_iter().collect::<Vec<_>>().join("\n"),
            });
        }

        Ok(RunSummary { lines_streamed })
    }
}

/// The in-container conversion command:
/// `blender -b -P <script> -- <input> <output>`
pub fn blender_command(script: &str, input: &str, output: &str) -> Vec<String> {
    vec![
        CONTAINER_BLENDER.to_string(),
        "-b".to_string(),
        "-P".to_string(),
        script.to_string(),
        "--".to_string(),
        input.to_string(),
        output.to_string(),
    ]
}

/// Probe that the docker binary exists and the daemon responds
pub fn docker_available() -> Result<()> {
    match Command::new("docker")
        .args(["version", "--format", "{{.Server.Version}}"])
        .output()
    {
        Ok(out) if out.status.success() => Ok(()),
        Ok(out) => Err(Error::DockerNotAvailable {
            message: String::from_utf8_lossy(&out.stderr).trim().to_string(),
        }),
        Err(err) => Err(spawn_error(err)),
    }
}

fn spawn_error(err: std::io::Error) -> Error {
    if err.kind() == std::io::ErrorKind::NotFound {
        Error::DockerNotAvailable {
            message: "docker binary not found on PATH".to_string(),
        }
    } else {
        Error::Io(err)
    }
}

// Not BufRead::lines: the tool occasionally emits non-UTF-8 bytes, which
// must degrade lossily instead of ending the stream.
fn forward_lines<R: Read>(reader: R, tx: &mpsc::Sender<String>) {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) | Err(_) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                if tx.send(format_tool_log(&line)).is_err() {
                    break;
                }
            }
        }
    }
}
