//! modgen CLI - Module generation for Fresh projects

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use modgen_core::generate::GenerateRequest;
use modgen_core::{
    Filters, FrameworkConfig, GenerationOutcome, Generator, ModuleKind, ModulePath, ModuleStore,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fresh framework configuration
#[derive(Clone)]
pub struct FreshConfig;

impl FrameworkConfig for FreshConfig {
    fn name(&self) -> &'static str {
        "fresh"
    }

    fn display_name(&self) -> &'static str {
        "Fresh"
    }

    fn docs_url(&self) -> &'static str {
        "https://fresh.deno.dev/docs/concepts/routing"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install modgen --force"
    }

    fn next_steps(&self, outcome: &GenerationOutcome) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();
        let root = std::fs::canonicalize(&outcome.project_root).ok();

        // Step 1: cd to the project if not current
        if root.is_none() || current != root {
            steps.push(format!("cd {}", outcome.project_root.display()));
        }

        // Step 2: start the dev server
        steps.push("deno task start".to_string());

        // Step 3: try the route
        match outcome.entry.kind {
            ModuleKind::Frontend => {
                steps.push(format!("Open http://localhost:8000{}", outcome.entry.route))
            }
            ModuleKind::Backend => steps.push(format!(
                "curl http://localhost:8000{}",
                outcome.entry.route
            )),
        }

        // Step 4: read the generated notes
        steps.push(format!(
            "Read {}/spec.md ({})",
            outcome.module_dir.display(),
            self.docs_url()
        ));

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "modgen")]
#[command(about = "CLI for generating Fresh modules and API routes")]
#[command(version)]
pub struct Args {
    /// Project root to generate into
    #[arg(long = "project-dir", env = "MODGEN_PROJECT_DIR", default_value = ".", global = true)]
    pub project_dir: PathBuf,

    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a page module (types, data, service, counter and page route)
    Create(CreateArgs),
    /// Generate an API module from a slash-delimited path, e.g. bands/linkinpark/song
    CreateServer(CreateServerArgs),
    /// List modules recorded in the project manifest
    List,
    /// Print the seed records a module would get, with the service filters applied
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Module name (free text, normalized to kebab-case)
    pub name: String,

    /// Page route to use instead of the module name
    #[arg(long)]
    pub route: Option<String>,
}

#[derive(Parser, Debug)]
pub struct CreateServerArgs {
    /// Module path; the last segment names the record type
    pub path: String,
}

#[derive(Parser, Debug)]
pub struct PreviewArgs {
    /// Module name or path
    pub name: String,

    /// Case-insensitive exact address match
    #[arg(long)]
    pub address: Option<String>,

    /// Exact age match (ignored when not a number)
    #[arg(long)]
    pub age: Option<String>,

    /// Case-insensitive substring match on name
    #[arg(long)]
    pub search: Option<String>,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("MODGEN_LOG")
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn parse_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // Usage errors exit with 1; --help and --version exit cleanly
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = parse_args();
    init_tracing(args.verbose);

    let config = FreshConfig;
    let generator = Generator::from_config(&config, &args.project_dir, CLI_VERSION)?;
    tracing::debug!(
        framework = config.name(),
        root = %generator.root().display(),
        layout = ?generator.layout(),
        "project loaded"
    );

    match args.command {
        Command::Create(create) => {
            let request = GenerateRequest::Frontend {
                name: create.name,
                route: create.route,
            };
            let result = modgen_core::run(&config, &generator, request).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result.map(|_| ())
        }
        Command::CreateServer(server) => {
            let request = GenerateRequest::Backend { path: server.path };
            let result = modgen_core::run(&config, &generator, request).await;

            let _ = console::Term::stderr().show_cursor();

            result.map(|_| ())
        }
        Command::List => {
            let modules = generator.recorded_modules().await?;
            modgen_core::report::print_modules(&modules);
            Ok(())
        }
        Command::Preview(preview) => {
            // Paths preview the leaf record type, as create-server would seed it
            let name = ModulePath::parse(&preview.name)
                .filter(|p| p.segments().len() > 1)
                .map(|p| p.leaf().to_string())
                .unwrap_or(preview.name);
            let store = ModuleStore::seeded(&name);
            let records = store.list(&Filters {
                address: preview.address,
                age: preview.age,
                search: preview.search,
            });
            let json =
                serde_json::to_string_pretty(&records).context("Failed to serialize records")?;
            println!("{}", json);
            Ok(())
        }
    }
}
