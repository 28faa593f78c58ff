//! `svo` - classify terms against the SVO taxonomy and rank catalog variables for phrases
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        reason = "Allow for tests"
    )
)]

use anyhow::Result;
use clap::Parser as _;
use cli::{Cli, Commands};

mod cli;
mod handlers;
mod output;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    handlers::init_logging(cli.verbose);

    let config = handlers::load_config(&cli)?;
    let matcher = handlers::build_matcher(&config)?;

    let rendered = match &cli.command {
        Commands::Classify { term } => handlers::handle_classify(&matcher, term, cli.json)?,
        Commands::Is { term, category } => {
            handlers::handle_is(&matcher, term, category, cli.json)?
        }
        Commands::Search { phrase } => handlers::handle_search(&matcher, phrase).await?,
        Commands::Rank {
            phrase,
            max_results,
        } => handlers::handle_rank(&matcher, phrase, *max_results).await?,
        Commands::Categories { definitions } => {
            handlers::handle_categories(&matcher, *definitions, cli.json)?
        }
    };

    print_output(&rendered);
    Ok(())
}

#[allow(clippy::print_stdout, reason = "Command output")]
fn print_output(rendered: &str) {
    println!("{rendered}");
}
