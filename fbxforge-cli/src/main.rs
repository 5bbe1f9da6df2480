use std::path::PathBuf;

use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(name = "fbxforge")]
#[command(version, about = "Convert .glb/.gltf assets to .fbx with Blender in Docker", long_about = None)]
struct Cli {
    /// Path to the .glb or .gltf file to convert
    input: PathBuf,

    /// Output .fbx file, or an existing directory to write into
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Docker image that provides Blender
    #[arg(long)]
    image: Option<String>,

    /// Container-side staging directory
    #[arg(long)]
    container_dir: Option<String>,

    /// Mount strategy: staged or direct
    #[arg(long)]
    strategy: Option<String>,

    /// Replacement Blender-side conversion script
    #[arg(long)]
    script: Option<PathBuf>,

    /// Keep the staging directory after the run
    #[arg(long)]
    keep_temp: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Suppress the streamed Blender log
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    commands::convert::execute(
        &cli.input,
        cli.output.as_deref(),
        cli.image.as_deref(),
        cli.container_dir.as_deref(),
        cli.strategy.as_deref(),
        cli.script.as_deref(),
        cli.keep_temp,
        cli.json,
        cli.quiet,
    )?;

    Ok(())
}
