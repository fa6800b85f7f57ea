//! Planwright - guided business plan generator for your terminal.
//!
//! Runs the interactive section-by-section workflow, or generates a whole
//! plan in one go from a profile file.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use planwright::ai::{generator_from_config, DryRunGenerator, ProviderKind, TextGenerator};
use planwright::core::{Config, API_KEY_ENV};
use planwright::plan::{BusinessProfile, ExportFormat, SectionWorkflow};
use planwright::{tui, App};

/// Guided business plan generator
#[derive(Parser)]
#[command(name = "planwright")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Model to use (overrides config)
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Text-generation provider (overrides config)
    #[arg(long, global = true, value_enum)]
    provider: Option<ProviderKind>,

    /// API key for the provider
    #[arg(long, global = true, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive plan builder (default)
    Run,

    /// Generate a complete plan without the TUI
    Generate {
        /// Business profile file (TOML)
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Business name
        #[arg(long)]
        name: Option<String>,

        /// Industry
        #[arg(long)]
        industry: Option<String>,

        /// Core product or service
        #[arg(long)]
        core_product: Option<String>,

        /// Problem solved
        #[arg(long)]
        problem_solved: Option<String>,

        /// Additional information
        #[arg(long)]
        additional_info: Option<String>,

        /// Export format
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Produce placeholder sections without calling a provider
        #[arg(long)]
        dry_run: bool,
    },

    /// List the plan sections
    Sections,

    /// Show configuration
    Config {
        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // Setup logging (the TUI is silent unless verbose)
    let interactive = matches!(cli.command, None | Some(Commands::Run));
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else if interactive {
        EnvFilter::new("off")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();

    match cli.command {
        None | Some(Commands::Run) => {
            let config = load_config(&cli)?;
            cmd_run(config)?;
        }
        Some(Commands::Generate {
            ref profile,
            ref name,
            ref industry,
            ref core_product,
            ref problem_solved,
            ref additional_info,
            format,
            ref output,
            dry_run,
        }) => {
            let config = load_config(&cli)?;
            let flags = BusinessProfile {
                name: name.clone().unwrap_or_default(),
                industry: industry.clone().unwrap_or_default(),
                core_product: core_product.clone().unwrap_or_default(),
                problem_solved: problem_solved.clone().unwrap_or_default(),
                additional_info: additional_info.clone().unwrap_or_default(),
            };
            let options = GenerateOptions {
                profile: profile.clone(),
                flags,
                format,
                output: output.clone(),
                dry_run,
            };
            cmd_generate(config, options)?;
        }
        Some(Commands::Sections) => {
            let config = load_config(&cli)?;
            cmd_sections(&config)?;
        }
        Some(Commands::Config { path }) => {
            cmd_config(&cli, path)?;
        }
        Some(Commands::Completions { shell }) => {
            cmd_completions(shell);
        }
    }

    Ok(())
}

/// Load configuration and apply command-line overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load()?;

    if let Some(ref model) = cli.model {
        config.ai.model.clone_from(model);
    }
    if let Some(provider) = cli.provider {
        config.ai.provider = provider;
    }
    if let Some(ref key) = cli.api_key {
        if !key.trim().is_empty() {
            config.ai.api_key = Some(key.clone());
        }
    }

    Ok(config)
}

/// Open the interactive plan builder.
fn cmd_run(config: Config) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let mut app = App::new(config)?;
    tui::run_tui(&mut app, &rt)
}

struct GenerateOptions {
    profile: Option<PathBuf>,
    flags: BusinessProfile,
    format: Option<ExportFormat>,
    output: Option<PathBuf>,
    dry_run: bool,
}

/// Generate every section and export the result.
fn cmd_generate(config: Config, options: GenerateOptions) -> Result<()> {
    let base = match options.profile {
        Some(ref path) => BusinessProfile::load(path)?,
        None => BusinessProfile::default(),
    };
    let profile = base.merge(options.flags);
    profile.validate().context("Incomplete business profile")?;

    let generator: Box<dyn TextGenerator> = if options.dry_run {
        Box::new(DryRunGenerator::new())
    } else {
        config.validate()?;
        generator_from_config(&config.ai)?
    };

    let template = config.template().context("Invalid section template")?;
    let mut workflow = SectionWorkflow::new(template, generator, config.ai.model.clone())
        .with_timeout(config.timeout())
        .with_title(config.plan.title.clone())
        .with_profile(profile);

    let format = options.format.unwrap_or(config.plan.format);
    let output = options.output.unwrap_or_else(|| config.plan.output_dir.clone());
    let total = workflow.template().len();

    let rt = tokio::runtime::Runtime::new()?;
    let failed = rt.block_on(async {
        let mut failed = Vec::new();

        let mut outcome = workflow.start().await;
        loop {
            let section = workflow.current_section().unwrap_or_default().to_string();
            if let Some(failure) = outcome.failure() {
                eprintln!("  ✗ {failure}");
                failed.push(section);
            } else if outcome.is_applied() {
                eprintln!("  ✓ {section} ({})", workflow.caption().unwrap_or_default());
            }

            if !workflow.can_next() {
                break;
            }
            outcome = workflow.next().await;
        }

        failed
    });

    if let Some(reason) = workflow.complete().precondition() {
        anyhow::bail!("Could not complete the plan: {reason}");
    }

    let artifact = workflow.finalize(format)?;
    let path = artifact.write_to(&output)?;

    if !failed.is_empty() {
        eprintln!(
            "Warning: {} of {total} sections could not be generated: {}",
            failed.len(),
            failed.join(", ")
        );
    }
    println!("{}", path.display());

    Ok(())
}

/// List the configured plan sections.
fn cmd_sections(config: &Config) -> Result<()> {
    let template = config.template().context("Invalid section template")?;

    println!("{}", config.plan.title);
    for (i, name) in template.iter().enumerate() {
        println!("  {:>2}. {name}", i + 1);
    }

    Ok(())
}

/// Show configuration.
fn cmd_config(cli: &Cli, show_path: bool) -> Result<()> {
    if show_path {
        match Config::find_config_file().or_else(Config::global_config_path) {
            Some(path) => println!("{}", path.display()),
            None => anyhow::bail!("Could not determine config directory"),
        }
        return Ok(());
    }

    let config = load_config(cli)?;
    let toml = toml::to_string_pretty(&config.redacted())?;
    println!("{toml}");

    Ok(())
}

/// Generate shell completions.
fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "planwright", &mut io::stdout());
}
