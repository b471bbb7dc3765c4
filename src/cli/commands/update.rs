//! `sav update` command - Change the status of a case

use console::style;
use miette::Result;

use crate::cli::commands::open_repository;
use crate::cli::GlobalOpts;
use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Case ID
    pub case_id: u64,

    /// New status (e.g. open, in_progress, closed)
    pub status: String,

    /// Notes on the resolution or current state (replaces existing notes)
    #[arg(long)]
    pub resolution_notes: Option<String>,
}

/// An unknown ID is reported, not treated as a failure.
pub fn run(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let repo = open_repository(global, &config);

    match repo.update_status(args.case_id, &args.status, args.resolution_notes)? {
        Some(case) => {
            if !global.quiet {
                println!(
                    "{} Updated case {} (status: {})",
                    style("✓").green(),
                    style(format!("#{}", case.case_id())).cyan(),
                    case.status()
                );
            }
        }
        None => {
            println!(
                "{} No case with ID {} found.",
                style("!").yellow(),
                args.case_id
            );
        }
    }

    Ok(())
}
