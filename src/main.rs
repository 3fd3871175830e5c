//! quicklint - replay CI lint steps locally

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use quicklint::checks::{CheckContext, LintTask};
use quicklint::config::{self, Jobs};
use quicklint::pipeline::{self, RunReport};
use quicklint::{vcs, workflow};

/// Some check or step reported problems.
const EXIT_FAILED: u8 = 1;
/// The run itself could not proceed.
const EXIT_FATAL: u8 = 2;

#[derive(Parser)]
#[command(name = "quicklint")]
#[command(about = "Run GitHub Actions lint steps and linters locally")]
#[command(version)]
struct Cli {
    /// Repository root (default: git top level of the current directory)
    #[arg(short = 'C', long, global = true)]
    root: Option<PathBuf>,

    /// Echo commands and keep `set -x` tracing in workflow scripts
    #[arg(long, global = true)]
    no_quiet: bool,

    /// When to color the pass/fail markers
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto, global = true)]
    color: ColorChoice,

    /// Print the report as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log more (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Re-run named steps of a workflow job, in job order
    Run {
        /// Workflow YAML file
        #[arg(long)]
        file: PathBuf,

        /// Job whose steps to run
        #[arg(long)]
        job: String,

        /// Step name to run (repeatable)
        #[arg(long = "step")]
        steps: Vec<String>,
    },

    /// Run lint tasks concurrently
    Lint {
        /// flake8 (or flake8-py3), shellcheck, mypy [default: flake8 shellcheck]
        tasks: Vec<LintTask>,

        /// Only lint files changed relative to the base ref
        #[arg(long)]
        changed_only: bool,

        /// Base ref for --changed-only [default: config `base_ref`]
        #[arg(long = "ref", env = "QUICKLINT_BASE_REF")]
        base_ref: Option<String>,

        /// Maximum concurrent linters
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Print files changed relative to the base ref
    Changed {
        /// Base ref [default: config `base_ref`]
        #[arg(long = "ref", env = "QUICKLINT_BASE_REF")]
        base_ref: Option<String>,
    },

    /// Write each workflow `run:` script to a file for ShellCheck
    Extract {
        /// Directory of workflow files [default: .github/workflows]
        #[arg(long)]
        workflows: Option<PathBuf>,

        /// Output directory [default: .extracted_scripts]
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_FAILED),
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("quicklint={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Returns whether everything passed.
async fn run(cli: Cli) -> Result<bool> {
    let Cli {
        root,
        no_quiet,
        color,
        json,
        command,
        ..
    } = cli;

    let color = color.enabled();
    colored::control::set_override(color);

    let cwd = std::env::current_dir().context("cannot read the current directory")?;
    let root = match root {
        Some(root) => root,
        None => vcs::repo_root(&cwd).await.unwrap_or(cwd),
    };
    let mut cfg = config::load(&root)?;

    match command {
        Commands::Run { file, job, steps } => {
            let ctx = CheckContext::new(&root, cfg).quiet(!no_quiet);
            let steps = pipeline::workflow_steps(&ctx, &file, &job, &steps)?;
            let report = pipeline::run_steps(&steps).await?;
            emit(&report, json, color)?;
            Ok(report.success())
        }
        Commands::Lint {
            tasks,
            changed_only,
            base_ref,
            jobs,
        } => {
            if let Some(jobs) = jobs {
                cfg.jobs = Jobs::Fixed(jobs.max(1));
            }
            let base_ref = base_ref.unwrap_or_else(|| cfg.base_ref.clone());
            let files = if changed_only {
                vcs::changed_files_or_all(&root, &base_ref).await
            } else {
                None
            };
            let concurrency = cfg.jobs.resolve();
            let ctx = CheckContext::new(&root, cfg).quiet(!no_quiet);
            let checks = pipeline::lint_checks(&ctx, &tasks, files)?;
            let report = pipeline::run_checks(&checks, concurrency).await?;
            emit(&report, json, color)?;
            Ok(report.success())
        }
        Commands::Changed { base_ref } => {
            let base_ref = base_ref.unwrap_or(cfg.base_ref);
            let files = vcs::find_changed_files(&root, &base_ref)
                .await
                .with_context(|| format!("could not list files changed since {base_ref}"))?;
            print_list(&files, json)?;
            Ok(true)
        }
        Commands::Extract { workflows, out } => {
            let dir = workflows.unwrap_or_else(|| root.join(&cfg.workflows_dir));
            let out = out.unwrap_or_else(|| root.join(&cfg.extracted_scripts_dir));
            let written = workflow::extract_scripts(&dir, &out)
                .with_context(|| format!("could not extract scripts from {}", dir.display()))?;
            let written: Vec<String> = written
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            print_list(&written, json)?;
            Ok(true)
        }
    }
}

fn emit(report: &RunReport, json: bool, color: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", report.render(color));
    }
    Ok(())
}

fn print_list(items: &[String], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        for item in items {
            println!("{item}");
        }
    }
    Ok(())
}
