#![doc = include_str!("../README.md")]

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use contract_docx::{Engine, Format, Manifest, UnknownTokenPolicy};

/// Assembles the rendered sections named by a manifest into one document.
#[derive(Debug, Clone, Parser)]
#[clap(name = "contract-docx", version)]
pub struct Args {
    /// Path to the contract manifest
    #[clap(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Path to output file, `-` writes to stdout
    #[clap(value_name = "OUTPUT", default_value = None)]
    pub output: Option<String>,

    /// Output format, inferred from the output extension by default
    #[clap(long, value_enum, default_value = None)]
    pub format: Option<Format>,

    /// What to do with tokens that have no document element, overriding the
    /// manifest
    #[clap(long, value_enum, default_value = None, value_name = "POLICY")]
    pub unknown_tokens: Option<UnknownTokenPolicy>,

    /// Fails on tokens that have no document element, same as
    /// `--unknown-tokens error`
    #[clap(long, conflicts_with = "unknown_tokens")]
    pub strict: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let _ = env_logger::builder()
        .filter_module("contract_docx", log::LevelFilter::Info)
        .parse_default_env()
        .try_init();

    run(args)
}

fn run(args: Args) -> Result<()> {
    let is_stdout = args.output.as_deref() == Some("-");
    let output_path = args
        .output
        .map(PathBuf::from)
        .unwrap_or_else(|| args.manifest.with_extension("docx"));

    let format = match args.format {
        Some(format) => format,
        None => infer_format(&output_path),
    };

    let manifest = Manifest::load(&args.manifest)
        .with_context(|| format!("failed to load manifest {:?}", args.manifest))?;
    let policy = if args.strict {
        UnknownTokenPolicy::Error
    } else {
        args.unknown_tokens.unwrap_or(manifest.unknown_tokens)
    };

    let sections = manifest.read_sections()?;
    let result = Engine::new()
        .with_policy(policy)
        .render_to_vec(&sections, format)?;

    if is_stdout {
        std::io::stdout()
            .write_all(&result)
            .context("failed to write to stdout")?;
    } else if let Err(err) = std::fs::write(&output_path, &result) {
        bail!("failed to write file {output_path:?}: {err}");
    }

    Ok(())
}

fn infer_format(path: &Path) -> Format {
    match path.extension().and_then(std::ffi::OsStr::to_str) {
        Some("json") => Format::Json,
        _ => Format::Docx,
    }
}
