use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the `svo` binary
#[derive(Parser)]
#[command(name = "svo")]
#[command(
    about = "Classify terms against the SVO taxonomy and match phrases to catalog variables",
    long_about = None
)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Configuration file (default: ~/.svo/config.toml)")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Lexicon JSON file (overrides config)")]
    pub lexicon: Option<PathBuf>,

    #[arg(long, global = true, help = "Taxonomy TOML file (overrides config)")]
    pub taxonomy: Option<PathBuf>,

    #[arg(long, global = true, help = "Offline variable catalog JSON file (overrides config)")]
    pub catalog: Option<PathBuf>,

    #[arg(long, global = true, help = "Print JSON instead of text")]
    pub json: bool,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Show the categories of every sense of a term")]
    Classify {
        #[arg(help = "Term to classify")]
        term: String,
    },

    #[command(about = "Show the senses of a term that belong to a category")]
    Is {
        #[arg(help = "Term to classify")]
        term: String,

        #[arg(help = "Category name")]
        category: String,
    },

    #[command(about = "Print the raw search tree of a phrase")]
    Search {
        #[arg(help = "Phrase whose words are joined by the separator, e.g. air_temperature")]
        phrase: String,
    },

    #[command(about = "Rank catalog variables matching a phrase")]
    Rank {
        #[arg(help = "Phrase whose words are joined by the separator, e.g. air_temperature")]
        phrase: String,

        #[arg(short = 'n', long, help = "Maximum number of results (overrides config)")]
        max_results: Option<usize>,
    },

    #[command(about = "List the categories of the taxonomy")]
    Categories {
        #[arg(long, help = "Also list the definitions of each category's reference senses")]
        definitions: bool,
    },
}
