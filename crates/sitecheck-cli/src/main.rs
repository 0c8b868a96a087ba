//! `sitecheck`: validate a generated static-site corpus.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sitecheck_analysis::assets::{scramble, unscramble, AssetChecks};
use sitecheck_analysis::enforcement::{all_passed, create_reporter, AssertionRunner, CheckResult, CheckSuite};
use sitecheck_analysis::external::ExternalChecks;
use sitecheck_analysis::predicates::{catalog, default_catalog, PredicateCategory};
use sitecheck_core::config::{CliOverrides, SitecheckConfig};
use sitecheck_core::errors::{CheckError, ConfigError, PipelineError, ScanError, SitecheckErrorCode};

/// Validation suite for a static site's generated HTML.
#[derive(Debug, Parser)]
#[command(name = "sitecheck", version)]
#[command(about = "Validate the generated HTML corpus of a static site")]
struct Cli {
    /// Project root holding sitecheck.toml and the corpus directory.
    #[arg(long, global = true, default_value = ".")]
    project: PathBuf,
    /// Corpus directory, relative to the project root unless absolute.
    #[arg(long, global = true)]
    corpus: Option<String>,
    /// Report format: console, json, or junit.
    #[arg(long, global = true)]
    format: Option<String>,
    /// Disable ANSI colors in console output.
    #[arg(long, global = true)]
    no_color: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the predicate catalog over the corpus, plus asset checks.
    Check {
        /// Only run predicates in this category (repeatable).
        #[arg(long = "category")]
        categories: Vec<String>,
        /// Only run the predicate with this id (repeatable).
        #[arg(long = "only")]
        ids: Vec<String>,
        /// Also run the external HTML validator, link checker, and ignore-list probes.
        #[arg(long)]
        external: bool,
        /// Skip the script/stylesheet asset checks.
        #[arg(long)]
        no_assets: bool,
        /// Treat advisory warnings as failures.
        #[arg(long)]
        fail_on_advisory: bool,
    },
    /// Run the external HTML validator over the corpus.
    ValidateHtml,
    /// Run the external link checker from the project root.
    Links,
    /// Probe the link checker's ignored URLs with browser and bot identities.
    ProbeIgnored,
    /// Check embedded scripts and the stylesheet, and the scramble round-trip.
    Assets,
    /// List every predicate with its mode, target, and exemptions.
    List,
    /// Scramble an email address for embedding in a page.
    Scramble {
        email: String,
        /// Unscramble instead.
        #[arg(long)]
        reverse: bool,
    },
}

fn main() -> ExitCode {
    sitecheck_core::tracing::init_tracing();
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", e.coded_string());
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, PipelineError> {
    // Commands that need no configuration.
    match &cli.command {
        Command::List => {
            print_catalog();
            return Ok(ExitCode::SUCCESS);
        }
        Command::Scramble { email, reverse } => {
            let out = if *reverse { unscramble(email) } else { scramble(email) };
            println!("{out}");
            return Ok(ExitCode::SUCCESS);
        }
        _ => {}
    }

    let fail_on_advisory = matches!(
        cli.command,
        Command::Check {
            fail_on_advisory: true,
            ..
        }
    );
    let overrides = CliOverrides {
        corpus_root: cli.corpus.clone(),
        report_format: cli.format.clone(),
        fail_on_advisory: fail_on_advisory.then_some(true),
        color: cli.no_color.then_some(false),
        ..Default::default()
    };
    let config = SitecheckConfig::load(&cli.project, Some(&overrides))?;
    let project = cli.project.as_path();
    tracing::debug!(
        project = %project.display(),
        corpus = %config.corpus_root(project).display(),
        format = config.report.effective_format(),
        "configuration loaded"
    );

    let results = match cli.command {
        Command::Check {
            categories,
            ids,
            external,
            no_assets,
            ..
        } => run_check(project, &config, &categories, &ids, external, !no_assets)?,
        Command::ValidateHtml => {
            require_corpus(project, &config)?;
            vec![ExternalChecks::new(project, &config).html_validator()]
        }
        Command::Links => {
            require_corpus(project, &config)?;
            vec![ExternalChecks::new(project, &config).link_checker()]
        }
        Command::ProbeIgnored => ExternalChecks::new(project, &config).ignored_urls(),
        Command::Assets => AssetChecks::new(project, &config.assets).run_all(),
        Command::List | Command::Scramble { .. } => Vec::new(),
    };

    report(&config, &results)?;
    Ok(if all_passed(&results) {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn run_check(
    project: &Path,
    config: &SitecheckConfig,
    categories: &[String],
    ids: &[String],
    external: bool,
    assets: bool,
) -> Result<Vec<CheckResult>, PipelineError> {
    let categories = categories
        .iter()
        .map(|c| {
            c.parse::<PredicateCategory>()
                .map_err(|message| ConfigError::InvalidValue {
                    field: "--category".to_string(),
                    message,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    for id in ids {
        if catalog::find(id).is_none() {
            return Err(CheckError::UnknownCheck { id: id.clone() }.into());
        }
    }

    let runner = AssertionRunner::from_config(project, config)?;
    let mut suite = CheckSuite::new(catalog::select(default_catalog(), &categories, ids));
    if assets {
        suite = suite.with_assets(AssetChecks::new(project, &config.assets));
    }
    if external {
        suite = suite.with_external(ExternalChecks::new(project, config));
    }
    Ok(suite.run(&runner))
}

fn require_corpus(project: &Path, config: &SitecheckConfig) -> Result<(), ScanError> {
    let root = config.corpus_root(project);
    if root.is_dir() {
        Ok(())
    } else {
        Err(ScanError::CorpusNotFound { path: root })
    }
}

fn report(config: &SitecheckConfig, results: &[CheckResult]) -> Result<(), ConfigError> {
    let format = config.report.effective_format();
    let reporter = create_reporter(format, config.report.effective_color()).ok_or_else(|| {
        ConfigError::InvalidValue {
            field: "report.format".to_string(),
            message: format!("unknown report format: {format}"),
        }
    })?;
    let output = reporter.generate(results).map_err(|message| ConfigError::InvalidValue {
        field: "report.format".to_string(),
        message,
    })?;
    print!("{output}");
    Ok(())
}

fn print_catalog() {
    for p in default_catalog() {
        let info = p.info();
        let exemptions = if info.exemptions.is_empty() {
            "-".to_string()
        } else {
            info.exemptions
                .iter()
                .map(|e| e.as_str())
                .collect::<Vec<_>>()
                .join(",")
        };
        println!(
            "{:<30} {:<9} {:<11} {:<32} {}",
            info.id,
            info.mode.to_string(),
            format!("{:?}", info.target),
            exemptions,
            info.name
        );
    }
}
