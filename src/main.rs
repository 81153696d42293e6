use clap::Parser;
use tracing_subscriber::EnvFilter;

use rpl_screen::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("rpl_screen=debug,info")
    } else {
        EnvFilter::new("rpl_screen=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Screen(args) => {
            cli::screen::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Compare(args) => {
            cli::compare::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Columns(args) => {
            cli::columns::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
