//! Resolve command - map assemblies to the packages that contain them.

use anyhow::{bail, Context, Result};
use clap::Args;
use console::style;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use nux_pm::{
    AggregateRepository, AssemblyResolver, FolderRepository, NuxConfig, PhysicalFileSystem,
    TermConsole, Verbosity,
};

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Assembly file names to look for (e.g. Newtonsoft.Json.dll)
    #[arg(required = true)]
    pub assemblies: Vec<String>,

    /// Package folder to scan (repeatable, scanned in the given order)
    #[arg(short = 's', long = "source")]
    pub sources: Vec<PathBuf>,

    /// Keep scanning after the first package containing the assembly
    #[arg(short = 'e', long, overrides_with = "no_exhaustive")]
    pub exhaustive: bool,

    /// Stop at the first match even if nux.toml sets exhaustive = true
    #[arg(long, overrides_with = "exhaustive")]
    pub no_exhaustive: bool,

    /// Print the mapping as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Write the preferred packages to a packages.config in this directory
    #[arg(long, value_name = "DIR")]
    pub write_packages_config: Option<PathBuf>,

    /// Only print warnings
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Working directory
    #[arg(short = 'd', long, default_value = ".")]
    pub working_dir: PathBuf,
}

pub fn execute(args: ResolveArgs) -> Result<i32> {
    let working_dir = args
        .working_dir
        .canonicalize()
        .context("Failed to resolve working directory")?;

    let config = NuxConfig::load(&working_dir)
        .context("Failed to load nux.toml")?
        .unwrap_or_default();

    let sources = if args.sources.is_empty() {
        config.source_paths()
    } else {
        args.sources
            .iter()
            .map(|path| absolute(&working_dir, path))
            .collect()
    };
    if sources.is_empty() {
        bail!("No package sources given. Pass --source or add [[sources]] to nux.toml.");
    }

    let mut repository = AggregateRepository::new();
    for source in &sources {
        let folder = FolderRepository::open(source)
            .with_context(|| format!("Failed to open package source {}", source.display()))?;
        repository.add_repository(Arc::new(folder));
    }
    log::debug!("Scanning {} package source(s)", sources.len());

    // JSON goes to stdout, so keep progress off stderr unless asked
    let verbosity = if args.quiet || args.json {
        Verbosity::Quiet
    } else {
        Verbosity::Normal
    };
    let console = Arc::new(TermConsole::new(verbosity));
    let output_dir = match &args.write_packages_config {
        Some(dir) => absolute(&working_dir, dir),
        None => working_dir.clone(),
    };

    let resolver = AssemblyResolver::new(
        &args.assemblies,
        Arc::new(repository),
        Arc::new(PhysicalFileSystem::new(output_dir)),
        console,
    )?;

    let exhaustive = exhaustive(&args, &config);
    let mapping = resolver
        .resolve(exhaustive)
        .context("Failed to scan package sources")?;

    if args.json {
        println!("{}", mapping.to_report().to_json()?);
    } else {
        mapping.output_to_console();
    }

    if args.write_packages_config.is_some() {
        mapping
            .write_packages_config(Path::new(&config.packages_config))
            .context("Failed to write packages.config")?;
    }

    let unresolved = mapping.unresolved();
    if unresolved.is_empty() {
        if !args.json && !args.quiet {
            eprintln!(
                "{} Resolved {} assembly(ies)",
                style("Success:").green().bold(),
                mapping.len()
            );
        }
        Ok(0)
    } else {
        Ok(1)
    }
}

/// The command line wins over nux.toml in both directions
fn exhaustive(args: &ResolveArgs, config: &NuxConfig) -> bool {
    if args.no_exhaustive {
        false
    } else {
        args.exhaustive || config.exhaustive
    }
}

fn absolute(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
