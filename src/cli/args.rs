use crate::core::render::OutputFormat;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Project root holding ghaflow.toml (defaults to current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Directory of workflow definitions, relative to the root
    #[arg(long, value_name = "DIR")]
    pub src: Option<PathBuf>,

    /// Directory generated workflows are written to, relative to the root
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Output encoding: yaml or json
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Fail instead of writing when a generated file is missing or out of date
    #[arg(long)]
    pub check: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Workflow definition file (YAML or JSON)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output encoding: yaml or json
    #[arg(long, value_name = "FORMAT", default_value = "yaml")]
    pub format: OutputFormat,

    /// Omit the generated-file header comment
    #[arg(long)]
    pub no_header: bool,
}
