use clap::Parser;
use miette::Result;
use sav::cli::{Cli, Commands};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior so piping to `head` exits quietly.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    let default_level = if global.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .init();

    match cli.command {
        Commands::Init(args) => sav::cli::commands::init::run(args, &global),
        Commands::Add(args) => sav::cli::commands::add::run(args, &global),
        Commands::List(args) => sav::cli::commands::list::run(args, &global),
        Commands::Update(args) => sav::cli::commands::update::run(args, &global),
        Commands::Completions(args) => sav::cli::commands::completions::run(args),
    }
}
