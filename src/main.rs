use clap::Parser;
use ghaflow::cli::{self, Args};
use ghaflow::logging::{self, config::LoggingConfig};

fn main() -> ghaflow::Result<()> {
    let args = Args::parse();
    let logging_config = LoggingConfig::load(args.command.project_root().as_deref())?;
    logging::init(&logging_config)?;
    cli::run(args)
}
