pub mod args;
pub mod commands;

pub use args::{GenerateArgs, RenderArgs};
use clap::{Parser, Subcommand};
use std::env;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
COMMANDS:\n{subcommands}\n";

#[derive(Parser, Debug)]
#[command(name = "ghaflow")]
#[command(version = crate::VERSION)]
#[command(about = "Generate CI workflow files from typed workflow definitions")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_long_help = "Typical flow: keep definitions in .github/workflows-src, run `ghaflow generate`, commit the generated files and run `ghaflow generate --check` in CI."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        about = "Generate workflow files from a definition directory",
        long_about = "Generate loads every definition in the source directory, validates it, and writes the canonical workflow file to the output directory.",
        after_help = "Examples:\n    ghaflow generate\n    ghaflow generate --src ci/defs --out .github/workflows --check"
    )]
    Generate(GenerateArgs),
    #[command(
        about = "Print one rendered workflow to stdout",
        long_about = "Render validates a single definition file and prints the generated workflow without touching the filesystem.",
        after_help = "Example:\n    ghaflow render .github/workflows-src/ci.yml --format json"
    )]
    Render(RenderArgs),
}

impl Command {
    /// Directory whose `ghaflow.toml` configures this invocation.
    pub fn project_root(&self) -> Option<PathBuf> {
        match self {
            Command::Generate(args) => args.root.clone().or_else(|| env::current_dir().ok()),
            Command::Render(_) => env::current_dir().ok(),
        }
    }
}

pub fn run(args: Args) -> crate::Result<()> {
    match args.command {
        Command::Generate(generate_args) => commands::generate(generate_args),
        Command::Render(render_args) => commands::render(render_args),
    }
}
