//! `sav add` command - Open a new support case

use console::style;
use miette::Result;

use crate::cli::commands::open_repository;
use crate::cli::GlobalOpts;
use crate::core::Config;
use crate::entities::service_case::NewCase;

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Customer name
    pub customer_name: String,

    /// Contact email
    pub contact_email: String,

    /// Product model
    pub product_model: String,

    /// Product serial number
    pub serial_number: String,

    /// Short description of the problem
    pub issue_description: String,
}

impl From<AddArgs> for NewCase {
    fn from(args: AddArgs) -> Self {
        NewCase {
            customer_name: args.customer_name,
            contact_email: args.contact_email,
            product_model: args.product_model,
            serial_number: args.serial_number,
            issue_description: args.issue_description,
        }
    }
}

pub fn run(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let repo = open_repository(global, &config);

    let case = repo.add(args.into())?;

    if global.quiet {
        println!("{}", case.case_id());
    } else {
        println!(
            "{} Created case {}",
            style("✓").green(),
            style(format!("#{}", case.case_id())).cyan()
        );
    }

    Ok(())
}
