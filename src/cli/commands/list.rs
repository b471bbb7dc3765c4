//! `sav list` command - List cases with optional status filter

use console::Term;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::{open_repository, resolve_format};
use crate::cli::helpers::cases_label;
use crate::cli::table::{CellValue, ColumnDef, TableConfig, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::entities::service_case::ServiceCase;

/// Column definitions for case list output
const CASE_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 6),
    ColumnDef::new("status", "STATUS", 14),
    ColumnDef::new("customer", "CUSTOMER", 22),
    ColumnDef::new("product", "PRODUCT", 17),
    ColumnDef::new("updated", "UPDATED", 18),
];

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only show cases with this status (e.g. open, in_progress, closed)
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

pub fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let repo = open_repository(global, &config);

    let matching = repo.list(args.status.as_deref())?;

    if args.count {
        println!("{}", matching.len());
        return Ok(());
    }

    let format = match resolve_format(global, &config) {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    };

    if format == OutputFormat::Json {
        let json = serde_json::to_string_pretty(&matching).into_diagnostic()?;
        println!("{}", json);
        return Ok(());
    }

    if matching.is_empty() {
        if !global.quiet {
            let total = match args.status {
                Some(_) => repo.load()?.len(),
                None => 0,
            };
            println!("{}", empty_message(total, args.status.as_deref()));
        }
        return Ok(());
    }

    let rows: Vec<TableRow> = matching.iter().map(case_row).collect();
    let table_config = if global.quiet || !Term::stdout().is_term() {
        TableConfig::for_pipe()
    } else {
        TableConfig::default()
    };

    TableFormatter::new(CASE_COLUMNS)
        .with_config(table_config)
        .output(&rows, format);

    Ok(())
}

fn case_row(case: &ServiceCase) -> TableRow {
    TableRow::new(case.case_id())
        .cell("id", CellValue::Id(case.case_id()))
        .cell("status", CellValue::Status(case.status().to_string()))
        .cell("customer", CellValue::Text(case.customer_name().to_string()))
        .cell("product", CellValue::Text(case.product_model().to_string()))
        .cell("updated", CellValue::DateTime(case.updated_at()))
}

/// Message for an empty result, distinguishing an empty store from no match
fn empty_message(total: usize, status: Option<&str>) -> String {
    match status {
        Some(status) if total > 0 => format!(
            "No cases with status '{}' found ({} {} in total).",
            status,
            total,
            cases_label(total)
        ),
        Some(status) => format!("No cases with status '{}' found. The case file is empty.", status),
        None => "No cases found.".to_string(),
    }
}
