mod args;

use crate::args::Options;
use anyhow::{Context, Result};
use clap::{Command, CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io::{self, Write};
use tfdiff::{diff::diff, git::Repository, parse, render::render, Collection, Source};
use tracing_subscriber::EnvFilter;

fn load(source: &Source, pattern: &str, side: &str) -> Result<Collection> {
    let document = source
        .load(pattern)
        .with_context(|| format!("failed to load {side} document from {source}"))?;

    tracing::debug!(side, files = %document, "loaded document");

    parse::from_document(&document).with_context(|| format!("failed to parse {side} document"))
}

fn base_source(opts: &Options) -> Result<Source> {
    if let Some(dir) = &opts.base_dir {
        return Ok(Source::Dir(dir.clone()));
    }

    let rev = match &opts.base {
        Some(rev) => rev.clone(),
        None => Repository::discover(&opts.dir)
            .and_then(|repo| repo.default_branch())
            .context("unable to determine base revision, please provide it explicitly via -b")?,
    };

    Ok(Source::revision(&opts.dir, rev))
}

fn print_completions(cmd: &mut Command, shell: Shell) {
    generate(shell, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tfdiff=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let opts = Options::parse();

    if let Some(shell) = opts.generate_completion {
        let mut cmd = Options::command();
        print_completions(&mut cmd, shell);
        std::process::exit(0);
    }

    let base = base_source(&opts)?;
    let target = Source::Dir(opts.dir.clone());

    // Both sides are independent, so they can be loaded and parsed concurrently.
    let (base, target) = rayon::join(
        || load(&base, &opts.glob, "base"),
        || load(&target, &opts.glob, "target"),
    );

    let changes = diff(&base?, &target?);

    let mut output = render(&changes, opts.output).context("failed to render changes")?;

    if opts.newline {
        output.push('\n');
    }

    let mut stdout = io::stdout().lock();

    match stdout.write_all(output.as_bytes()).and_then(|_| stdout.flush()) {
        Err(err) if err.kind() != io::ErrorKind::BrokenPipe => {
            Err(err).context("failed to write output")
        }
        _ => Ok(()),
    }
}
