// sakpro/src/main.rs
//! sakpro entry point.

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use is_terminal::IsTerminal;
use log::LevelFilter;

use sakpro::cli::{Cli, Commands};
use sakpro::commands::clean::{run_clean, CleanOptions, OutputTarget};
use sakpro::commands::policy::print_policy;
use sakpro::logger;
use sakpro::ui::output_format;

fn run(args: Cli) -> Result<()> {
    match args.command {
        Commands::Clean(cmd) => {
            let output = if cmd.stdout {
                OutputTarget::Stdout
            } else if let Some(path) = cmd.output {
                OutputTarget::File(path)
            } else {
                OutputTarget::Derived { suffix: cmd.suffix }
            };
            run_clean(&CleanOptions {
                input: cmd.input,
                output,
                no_summary: cmd.no_summary,
                quiet: args.quiet,
            })
        }
        Commands::Policy => print_policy(),
    }
}

fn main() -> ExitCode {
    let args = Cli::parse();

    if args.quiet {
        logger::init_logger(Some(LevelFilter::Off));
    } else if args.debug {
        logger::init_logger(Some(LevelFilter::Debug));
    } else {
        logger::init_logger(None);
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let supports_color = io::stderr().is_terminal();
            let _ = output_format::print_error_message(&mut io::stderr(), &format!("{e:#}"), supports_color);
            ExitCode::FAILURE
        }
    }
}
