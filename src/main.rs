// ABOUTME: Main entry point for the slidev-deck program.
// ABOUTME: Provides CLI interface and executes commands from the library.

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::warn;
use slidev_deck::{schema, utils, validate, Config, DeckError, ExportFormat, InitOptions, SchemaKind};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a deck or slide patch JSON document against its schema
    Validate(ValidateArgs),

    /// Apply a slide patch to a project without touching other slides
    ApplyPatch(WriteArgs),

    /// Render a full deck into a project and regenerate slides.md
    RenderDeck(WriteArgs),

    /// Check slides.md references against the slides directory
    Audit(AuditArgs),

    /// Create a new Slidev project
    Init(InitArgs),

    /// Create the deck skeleton inside an existing project
    DeckInit(DeckInitArgs),

    /// Export a project with `slidev export`
    Export(ExportArgs),

    /// List the layouts, transitions and options of the installed Slidev
    Introspect(IntrospectArgs),

    /// List slide files with their titles
    ListSlides(ProjectArgs),

    /// Print one slide by number
    ReadSlide(ReadSlideArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Path to the JSON document
    file: Option<PathBuf>,

    /// Read the JSON document from stdin
    #[arg(long)]
    stdin: bool,
}

#[derive(Args)]
struct ProjectArgs {
    /// Path to the Slidev project directory
    #[arg(short, long)]
    project: PathBuf,
}

#[derive(Args)]
struct ValidateArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Force a specific schema instead of inferring it
    #[arg(long, value_enum)]
    schema: Option<SchemaKind>,
}

#[derive(Args)]
struct WriteArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    project: ProjectArgs,
}

#[derive(Args)]
struct AuditArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Deck document to compare the slide order against (defaults to <project>/deck.json)
    #[arg(long)]
    deck: Option<PathBuf>,
}

#[derive(Args)]
struct InitArgs {
    /// Project directory to create
    dir: PathBuf,

    /// Project name
    #[arg(long, default_value = "slidev-deck")]
    name: String,

    /// Slidev theme
    #[arg(long, default_value = "default")]
    theme: String,

    /// Run npm install after initialization
    #[arg(long)]
    install: bool,
}

#[derive(Args)]
struct DeckInitArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Overwrite slides.md and slides/001.md if they exist
    #[arg(long)]
    force: bool,
}

#[derive(Args)]
struct ExportArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Export format
    #[arg(long, value_enum, default_value_t = ExportFormat::Pptx)]
    format: ExportFormat,

    /// Output path, relative to the project (defaults to exports/deck-export.<format>)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ListingFormat {
    Markdown,
    Json,
}

#[derive(Args)]
struct IntrospectArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "markdown")]
    format: ListingFormat,
}

#[derive(Args)]
struct ReadSlideArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Slide number to read
    #[arg(long)]
    no: u32,
}

fn read_input(input: &InputArgs) -> anyhow::Result<String> {
    if input.stdin {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        return Ok(content);
    }
    match &input.file {
        Some(path) => {
            utils::validate_file_exists(path)?;
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
        }
        None => Err(DeckError::UsageError("Provide a JSON file path or use --stdin".to_string()).into()),
    }
}

fn run(command: &Commands, config: &Config) -> anyhow::Result<()> {
    match command {
        Commands::Validate(args) => {
            let content = read_input(&args.input)?;
            let value = serde_json::from_str(&content).map_err(DeckError::JsonError)?;
            let normalized = validate::normalize(value, args.schema)?;
            println!("Validating against {}...", normalized.kind);
            for warning in &normalized.warnings {
                println!("Warning: {}", warning);
            }
            schema::validate_against(normalized.kind, &normalized.envelope, config)?;
            println!("Validation successful.");
        }
        Commands::ApplyPatch(args) => {
            let project = utils::get_absolute_path(&args.project.project);
            utils::validate_project(&project)?;
            let content = read_input(&args.input)?;
            let outcome = slidev_deck::apply_patch_json(&project, &content)?;
            for asset in &outcome.assets {
                println!("  Wrote asset {}", asset.display());
            }
            println!("Patched slide {} -> {}", outcome.no, outcome.path.display());
        }
        Commands::RenderDeck(args) => {
            let project = utils::get_absolute_path(&args.project.project);
            utils::validate_project(&project)?;
            let content = read_input(&args.input)?;
            let deck = slidev_deck::Deck::from_json(&content)?;
            let outcome = slidev_deck::render_deck(&project, &deck)?;
            for slide in &outcome.slides {
                println!("  Wrote {}", slide.display());
            }
            println!(
                "Rendered {} slide(s) of '{}' -> {}",
                outcome.slides.len(),
                deck.title(),
                outcome.manifest.display()
            );
        }
        Commands::Audit(args) => {
            let project = utils::get_absolute_path(&args.project.project);
            let report = slidev_deck::audit_project(&project, args.deck.as_deref())?;
            for issue in &report.issues {
                println!("Error: {}", issue);
            }
            for warning in &report.warnings {
                println!("Warning: {}", warning);
            }
            if !report.passed() {
                return Err(DeckError::AuditFailed(report.issues.len()).into());
            }
            println!("Audit passed. Deck structure looks good.");
        }
        Commands::Init(args) => {
            let options = InitOptions {
                name: args.name.clone(),
                theme: args.theme.clone(),
            };
            println!("Initializing Slidev project: {}", args.dir.display());
            for entry in slidev_deck::init_project(&args.dir, &options)? {
                println!("  Created {}", entry.path.display());
            }
            if args.install {
                println!("Running npm install...");
                match slidev_deck::scaffold::install_dependencies(&args.dir, "npm") {
                    Ok(()) => println!("Dependencies installed."),
                    Err(e) => {
                        warn!("{}", e);
                        println!("npm install failed. Please run it manually.");
                    }
                }
            }
            println!("Project initialized. Next: cd {} && npm run dev", args.dir.display());
        }
        Commands::DeckInit(args) => {
            let project = &args.project.project;
            for entry in slidev_deck::init_deck(project, args.force)? {
                let state = if entry.created { "Created" } else { "Exists" };
                println!("{} {}", state, entry.path.display());
            }
            println!("Deck initialized.");
        }
        Commands::Export(args) => {
            let project = utils::get_absolute_path(&args.project.project);
            let export_config = config.get_export_config(Some(args.format), args.output.clone());
            println!("Exporting to {}...", export_config.format);
            let output = slidev_deck::export_deck(&project, &export_config)?;
            println!("Exported to {}", output.display());
        }
        Commands::Introspect(args) => {
            let introspection = slidev_deck::introspect_project(&args.project.project)?;
            match args.format {
                ListingFormat::Markdown => print!("{}", introspection.to_markdown()),
                ListingFormat::Json => println!("{}", introspection.to_json()?),
            }
        }
        Commands::ListSlides(args) => {
            let project = utils::get_absolute_path(&args.project);
            match slidev_deck::list_slides(&project)? {
                None => println!("No slides directory found."),
                Some(entries) if entries.is_empty() => println!("No slides found."),
                Some(entries) => {
                    println!("{:<5} {:<10} Title", "No", "File");
                    println!("{}", "-".repeat(40));
                    for entry in entries {
                        println!(
                            "{:<5} {:<10} {}",
                            entry.no,
                            entry.file_name,
                            entry.title.as_deref().unwrap_or(slidev_deck::listing::NO_TITLE)
                        );
                    }
                }
            }
        }
        Commands::ReadSlide(args) => {
            let project = utils::get_absolute_path(&args.project.project);
            let slide = slidev_deck::read_slide(&project, args.no)?;
            println!("--- Slide {} ({}) ---", slide.no, slide.file_name);
            print!("{}", slide.content);
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = Config::from_env();
    match run(&cli.command, &config) {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
