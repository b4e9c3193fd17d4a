use crate::{
    cli::args::{GenerateArgs, RenderArgs},
    core::{
        config::{ConfigLoader, GeneratorConfig},
        generate::{check_workflow, generate_workflows, scan_workflows, write_workflow, CheckStatus},
        render::Serializer,
        workflow::Workflow,
    },
    Result,
};
use anyhow::{bail, Context};
use std::{env, io::Write, path::PathBuf};
use tracing::{debug, warn};

pub fn generate(args: GenerateArgs) -> Result<()> {
    let root = match args.root.clone() {
        Some(root) => root,
        None => env::current_dir().context("failed to resolve current directory")?,
    };
    let mut config = ConfigLoader::load_from_root(&root)?;
    apply_cli_overrides(&mut config, &args);

    let src_dir = config.source_dir(&root);
    let out_dir = config.output_dir(&root);
    debug!(
        src_dir = %src_dir.display(),
        out_dir = %out_dir.display(),
        check = args.check,
        "generating workflows"
    );

    let modules = scan_workflows(&src_dir, &out_dir, &config.suffix)
        .with_context(|| format!("failed to load workflow definitions from {}", src_dir.display()))?;

    let mut outdated: Vec<PathBuf> = Vec::new();
    generate_workflows(&modules, |module| {
        let text = Serializer::new(&module.workflow)
            .with_header(config.header.clone())
            .with_boxed_stringify(config.format.stringify())
            .with_indent(config.indent)
            .stringify_workflow()?;
        if !args.check {
            return write_workflow(&module.out_file, &text);
        }
        match check_workflow(&module.out_file, &text)? {
            CheckStatus::UpToDate => {}
            status => {
                warn!(path = %module.out_file.display(), ?status, "generated workflow is out of date");
                outdated.push(module.out_file.clone());
            }
        }
        Ok(())
    })?;

    if !outdated.is_empty() {
        let files: Vec<String> = outdated.iter().map(|p| p.display().to_string()).collect();
        bail!(
            "{} generated workflow(s) out of date, run `ghaflow generate`: {}",
            outdated.len(),
            files.join(", ")
        );
    }
    Ok(())
}

fn apply_cli_overrides(config: &mut GeneratorConfig, args: &GenerateArgs) {
    if let Some(src) = &args.src {
        config.src_dir = src.clone();
    }
    if let Some(out) = &args.out {
        config.out_dir = out.clone();
    }
    if let Some(format) = args.format {
        config.format = format;
    }
}

pub fn render(args: RenderArgs) -> Result<()> {
    let workflow = Workflow::load_from_file(&args.file)?;
    let mut serializer = Serializer::new(&workflow).with_boxed_stringify(args.format.stringify());
    if args.no_header {
        serializer = serializer.with_header("");
    }
    let text = serializer.stringify_workflow()?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .context("failed to write rendered workflow")?;
    stdout.flush().context("failed to flush stdout")?;
    Ok(())
}
