mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> miette::Result<()> {
    match Cli::parse().command {
        Commands::Generate { settings } => commands::generate::run(settings),
        Commands::Params { settings } => commands::params::run(settings),
    }
}
