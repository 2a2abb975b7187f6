//! `tsgen generate`: write the generated files to a directory.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::{debug, info};
use tsgen_core::GenerationOutput;

use crate::common::GeneratorArgs;
use crate::run_command;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub generator: GeneratorArgs,

    /// Directory to write `types.ts` and the client files into
    #[arg(long, short, value_name = "DIR")]
    pub output: PathBuf,
}

pub fn run(args: GenerateArgs) -> i32 {
    run_command(|| {
        let output = args.generator.run_generator()?;
        let written = write_files(&args.output, &output)?;
        info!(
            files = written.len(),
            diagnostics = output.diagnostics.len(),
            "Generation finished."
        );
        println!(
            "Generated {} files in {}",
            written.len(),
            args.output.display()
        );
        Ok(())
    })
}

/// Write every generated file into `dir`, creating it if needed. Existing
/// files with the same names are overwritten.
pub fn write_files(dir: &Path, output: &GenerationOutput) -> Result<Vec<PathBuf>, String> {
    fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create output directory {}: {e}", dir.display()))?;

    let mut written = Vec::with_capacity(output.files.len());
    for (name, source) in &output.files {
        let path = dir.join(name);
        fs::write(&path, source).map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
        debug!(path = %path.display(), bytes = source.len(), "Wrote file.");
        written.push(path);
    }
    Ok(written)
}
