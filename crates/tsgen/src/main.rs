use clap::Parser;
use tsgen_cli::{Cli, logging, run};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    std::process::exit(run(cli));
}
