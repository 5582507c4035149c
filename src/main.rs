//! aap-jobgen - create automation controller job templates from playbooks.
//!
//! Installed both as `aap-jobgen` and as `create_job_template`.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{generate, Shell};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use aap_jobgen::core::{Config, DEFAULT_INVENTORY};
use aap_jobgen::{load_playbook, JobTemplateDraft};

/// Create an AAP job template from an Ansible playbook, with a survey
/// generated from the playbook's variables
#[derive(Parser)]
#[command(name = "aap-jobgen")]
#[command(author, version, long_about = None)]
struct Cli {
    /// Path to the Ansible playbook file
    #[arg(required_unless_present = "completions")]
    playbook: Option<PathBuf>,

    /// AAP project name [default: from config, else ai-hacking]
    #[arg(long)]
    project: Option<String>,

    /// AAP inventory name (if not specified, uses first available)
    #[arg(long)]
    inventory: Option<String>,

    /// Update existing job template if it exists (always done; kept for compatibility)
    #[arg(long)]
    update: bool,

    /// Print the job template definition instead of submitting it
    #[arg(long)]
    dry_run: bool,

    /// Output format for --dry-run
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    format: OutputFormat,

    /// Read configuration from this file instead of the default locations
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL", exclusive = true)]
    completions: Option<Shell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();

    if let Some(shell) = cli.completions {
        cmd_completions(shell);
        return Ok(());
    }

    // Pick up AAP_* from a local .env; real environment variables win
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!(error = %e, "Ignoring unreadable .env file");
        }
    }

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };

    let playbook_path = cli.playbook.as_deref().context("Missing playbook path")?;
    if !playbook_path.exists() {
        anyhow::bail!("Playbook file '{}' not found", playbook_path.display());
    }

    let loaded = load_playbook(playbook_path)?;
    let playbook_file = playbook_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .context("Playbook path has no file name")?;
    let draft = JobTemplateDraft::from_playbook(&loaded, playbook_file);

    let project = cli.project.clone().unwrap_or_else(|| config.defaults.project.clone());
    let inventory = cli.inventory.clone().or_else(|| config.defaults.inventory.clone());

    if cli.dry_run {
        return cmd_render(&draft, &project, inventory.as_deref(), &config, cli.format);
    }

    if cli.update {
        tracing::debug!("--update given; existing templates are always updated");
    }

    cmd_submit(playbook_path, &draft, project, inventory, &config)
}

/// Print the job template definition without contacting the controller.
fn cmd_render(
    draft: &JobTemplateDraft,
    project: &str,
    inventory: Option<&str>,
    config: &Config,
    format: OutputFormat,
) -> Result<()> {
    let spec = draft.to_spec(
        project,
        inventory.unwrap_or(DEFAULT_INVENTORY),
        &config.survey.name,
        &config.survey.description,
    );

    match format {
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&spec)?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&spec)?),
    }

    Ok(())
}

/// Create or update the job template on the controller.
#[cfg(feature = "controller")]
fn cmd_submit(
    playbook_path: &Path,
    draft: &JobTemplateDraft,
    project: String,
    inventory: Option<String>,
    config: &Config,
) -> Result<()> {
    use aap_jobgen::{
        ControllerClient, ControllerConfig, JobTemplateSubmitter, SubmitTarget, UpsertOutcome,
    };

    println!("Parsing playbook: {}", playbook_path.display());
    println!("✓ Playbook name: {}", draft.name);
    println!("✓ Found {} variables", draft.variables.len());

    let controller = ControllerConfig::from_env(config.controller.hostname.as_deref())?;
    let client = ControllerClient::new(controller)?;

    let target = SubmitTarget {
        project,
        inventory,
        survey_name: config.survey.name.clone(),
        survey_description: config.survey.description.clone(),
    };

    println!("Creating job template '{}'...", draft.name);
    let report = JobTemplateSubmitter::new(&client).submit(draft, &target)?;

    if target.inventory.is_none() {
        println!("Using inventory: {}", report.inventory_name);
    }

    match report.outcome {
        UpsertOutcome::Created => {
            println!("✓ Job template created successfully (ID: {})", report.template_id);
        }
        UpsertOutcome::Updated => {
            println!("✓ Job template updated successfully (ID: {})", report.template_id);
        }
    }

    if report.survey_questions > 0 {
        println!("✓ Survey created with {} questions and enabled", report.survey_questions);
    }

    println!();
    println!("{}", "=".repeat(60));
    println!("SUCCESS!");
    println!("{}", "=".repeat(60));
    println!("Job template '{}' is ready to use", report.template_name);
    println!("View in AAP: {}", client.config().template_url(report.template_id));
    println!("{}", "=".repeat(60));

    Ok(())
}

#[cfg(not(feature = "controller"))]
fn cmd_submit(
    _playbook_path: &Path,
    _draft: &JobTemplateDraft,
    _project: String,
    _inventory: Option<String>,
    _config: &Config,
) -> Result<()> {
    anyhow::bail!("Built without controller support; use --dry-run to print the job template")
}

/// Generate shell completions.
fn cmd_completions(shell: Shell) {
    let bin_name = std::env::args()
        .next()
        .and_then(|arg0| {
            Path::new(&arg0).file_stem().map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| aap_jobgen::APP_NAME.to_string());

    let mut cmd = Cli::command();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
