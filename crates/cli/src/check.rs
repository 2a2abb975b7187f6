//! `tsgen check`: run generation without writing and report the outcome.

use clap::Args;

use crate::common::GeneratorArgs;
use crate::run_command;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub generator: GeneratorArgs,

    /// Fail when generation produced any diagnostics
    #[arg(long)]
    pub deny_warnings: bool,
}

pub fn run(args: CheckArgs) -> i32 {
    run_command(|| {
        let output = args.generator.run_generator()?;
        let count = output.diagnostics.len();
        if args.deny_warnings && count > 0 {
            return Err(format!(
                "{}: {count} diagnostic(s) reported",
                args.generator.input.display()
            ));
        }
        println!(
            "{}: {} files, {} clients, {count} diagnostic(s)",
            args.generator.input.display(),
            output.files.len(),
            output.clients.len()
        );
        Ok(())
    })
}
