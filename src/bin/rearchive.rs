use clap::Parser;
use colored::Colorize;
use rearchive_core::cli::{self, Cli};
use rearchive_core::exit::RearchiveExit;

fn main() -> RearchiveExit {
    let cli = Cli::parse();

    match cli::dispatch::execute(cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            RearchiveExit::Error
        }
    }
}
