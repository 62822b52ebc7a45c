//! compgen CLI - custom Langflow component generator
//!
//! Command-line interface for compgen: serves the generator form over HTTP,
//! runs it in the terminal, or generates a component from a request file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use compgen_core::config::DEFAULT_CONFIG_FILE;
use compgen_core::{CompgenConfig, CompgenError, ComponentRequest, ComponentRuntime};
use compgen_pm::{PromptEngine, TemplateManager};
use std::path::{Path, PathBuf};
use tracing::{error, info};

mod tui;
mod web;

/// compgen - custom Langflow component generator
///
/// Collects input descriptors, renders a Langflow component class and has a
/// text-generation service review the result.
#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./compgen.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Skip the refinement service and return the rendered draft
    #[arg(long, global = true)]
    no_refine: bool,
}

/// Available compgen commands
#[derive(Subcommand)]
enum Commands {
    /// Serve the generator form over HTTP
    ///
    /// Opens a two-page web UI: the component generator form and the
    /// generated code view.
    Serve {
        /// Address to listen on (overrides `server.bind_address`)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Fill in the generator form in the terminal
    Form,

    /// Generate a component from a TOML request file
    ///
    /// The file holds one `[[inputs]]` table per input with `name`,
    /// `display_name` and `description` keys.
    Generate {
        /// Request file to read
        file: PathBuf,

        /// Write the code to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the available component templates
    Templates,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(e) = run_command(cli).await {
        error!("Command failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Initialize tracing subscriber for structured logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = if verbose {
        EnvFilter::new("compgen=debug,compgen_core=debug,compgen_pm=debug,tower_http=debug")
    } else {
        EnvFilter::new("compgen=info,compgen_core=info,compgen_pm=info")
    };

    // Logs go to stderr so generated code on stdout stays clean.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();
}

/// Execute the specified command
async fn run_command(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    if cli.no_refine {
        config.refine.enabled = false;
    }

    match cli.command {
        Commands::Serve { bind } => {
            let bind_address = bind.unwrap_or_else(|| config.server.bind_address.clone());
            let runtime = create_runtime(config)?;
            web::serve(runtime, &bind_address).await
        }
        Commands::Form => {
            let runtime = create_runtime(config)?;
            tui::run_form_tui(&runtime)
                .await
                .context("Interactive form failed")
        }
        Commands::Generate { file, output } => {
            info!("Generating component from {}", file.display());
            let runtime = create_runtime(config)?;
            run_generate(&runtime, &file, output.as_deref()).await
        }
        Commands::Templates => run_templates(&config),
    }
}

/// Load configuration from an explicit path or the working directory.
fn load_config(path: Option<&Path>) -> Result<CompgenConfig> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            CompgenConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))
        }
        None => CompgenConfig::load(Path::new(DEFAULT_CONFIG_FILE))
            .context("Failed to load compgen configuration"),
    }
}

fn create_runtime(config: CompgenConfig) -> Result<ComponentRuntime> {
    ComponentRuntime::new(config).context("Failed to create component runtime")
}

/// Run the generate command
async fn run_generate(
    runtime: &ComponentRuntime,
    file: &Path,
    output: Option<&Path>,
) -> Result<()> {
    let request = ComponentRequest::from_toml_file(file)?;

    let component = match runtime.submit(request).await {
        Ok(component) => component,
        Err(CompgenError::Validation(errors)) => {
            for message in errors.messages() {
                eprintln!("{message}");
            }
            eprintln!("Please fix the errors above and resubmit.");
            anyhow::bail!("{} validation error(s) in {}", errors.len(), file.display());
        }
        Err(e) => return Err(e).context("Component generation failed"),
    };

    match output {
        Some(path) => {
            let mut code = component.code;
            if !code.ends_with('\n') {
                code.push('\n');
            }
            std::fs::write(path, code)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "✔ Generated component with {} input(s): {}",
                component.input_count,
                path.display()
            );
        }
        None => println!("{}", component.code),
    }

    Ok(())
}

/// Run the templates command
fn run_templates(config: &CompgenConfig) -> Result<()> {
    let pm = match &config.templates_dir {
        Some(dir) => TemplateManager::new(dir.clone())?,
        None => TemplateManager::bundled(),
    };

    let names = pm.list_templates().context("Failed to list templates")?;
    for name in names {
        println!("{name}");
    }
    Ok(())
}
