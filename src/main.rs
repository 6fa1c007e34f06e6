use clap::Parser;
use std::process::ExitCode;

use branchprep::cli::{Cli, Commands};
use branchprep::{color, commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Resolve color mode from CLI flag and environment variables
    let color_mode = color::ColorMode::resolve(cli.color);

    let result = match &cli.command {
        Commands::Prepare(args) => commands::prepare::cmd_prepare(args, &cli.workdir, color_mode),
        Commands::Validate { names } => commands::validate::cmd_validate(names, color_mode),
    };

    // Every failure, validation or operational, ends the process the same way
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", color::error(color_mode, format!("{err:#}")));
            ExitCode::FAILURE
        }
    }
}
