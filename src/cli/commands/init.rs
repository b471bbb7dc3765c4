//! `sav init` command - Create an empty case file

use console::style;
use miette::Result;

use crate::cli::commands::open_repository;
use crate::cli::GlobalOpts;
use crate::core::{Config, InitOutcome};

#[derive(clap::Args, Debug)]
pub struct InitArgs {}

pub fn run(_args: InitArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let repo = open_repository(global, &config);

    match repo.init()? {
        InitOutcome::Created => {
            if !global.quiet {
                println!(
                    "{} Created case file {}",
                    style("✓").green(),
                    style(repo.path().display()).cyan()
                );
                println!();
                println!("Next steps:");
                println!("  {} Open your first case", style("sav add").yellow());
                println!("  {} List all cases", style("sav list").yellow());
            }
        }
        InitOutcome::AlreadyExists => {
            println!(
                "{} Case file already exists at {}",
                style("!").yellow(),
                style(repo.path().display()).cyan()
            );
        }
    }

    Ok(())
}
