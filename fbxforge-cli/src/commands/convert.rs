//! CLI interface for glb/gltf to fbx conversion

use std::path::Path;

use fbxforge::config::PersistedConfig;
use fbxforge::convert::{ConvertOptions, convert_glb_to_fbx};
use fbxforge::mount::MountStrategy;

pub fn execute(
    input: &Path,
    output: Option<&Path>,
    image: Option<&str>,
    container_dir: Option<&str>,
    strategy: Option<&str>,
    script: Option<&Path>,
    keep_temp: bool,
    json: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    // Built-ins, then persisted defaults, then flags
    let mut options = PersistedConfig::load().apply(ConvertOptions::default());
    if let Some(image) = image {
        options = options.with_image(image);
    }
    if let Some(dir) = container_dir {
        options = options.with_container_dir(dir);
    }
    if let Some(name) = strategy {
        options = options.with_strategy(name.parse::<MountStrategy>()?);
    }
    if let Some(script) = script {
        options = options.with_script(script);
    }
    if keep_temp {
        options = options.keep_temp();
    }

    if !quiet {
        println!("Converting {} with {}", input.display(), options.image);
    }

    let result = convert_glb_to_fbx(input, output, options, |line| {
        if !quiet {
            println!("{line}");
        }
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for warning in &result.warnings {
            println!("warning: {warning}");
        }
        println!("Wrote: {}", result.output_path.display());
    }

    Ok(())
}
