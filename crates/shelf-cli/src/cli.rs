use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "shelf",
    about = "Shelf -- book catalogue service and form tooling",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the catalogue server
    Serve(ServeArgs),
    /// Flatten a JSON document into form fields
    Flatten(FlattenArgs),
    /// List the seed catalogue
    Seed(SeedArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on, e.g. 127.0.0.1:5000
    #[arg(short, long)]
    pub bind: Option<String>,
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Start with an empty catalogue
    #[arg(long)]
    pub no_seed: bool,
}

#[derive(Args)]
pub struct FlattenArgs {
    /// JSON text; reads stdin when omitted or `-`
    pub input: Option<String>,
    /// Keep single-field objects as `Outer.Inner` instead of collapsing them
    #[arg(long)]
    pub expand: bool,
    /// Print one url-encoded line instead of `key = value` pairs
    #[arg(long)]
    pub urlencoded: bool,
}

#[derive(Args)]
pub struct SeedArgs {}
