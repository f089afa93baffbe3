//! hexogen CLI entrypoint
//! Parses command-line arguments and dispatches to the application layer.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use hexogen::{
    application::{self, Application, GenerateOptions},
    core::{config::Settings, error::Error},
};
use std::path::PathBuf;
use std::process::ExitCode;

// External imports (alphabetized)
use clap::{CommandFactory, Parser};
use console::style;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hexogen")]
#[command(author, version, long_about = None)]
#[command(
    about = "A CLI tool for generating hexagonal architecture modules in NestJS applications"
)]
#[command(disable_help_subcommand = true, arg_required_else_help = true)]
struct Cli {
    /// Enable debug logging (overridden by HEXOGEN_LOG / RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by the generating commands
#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Path to schema JSON file (e.g. --schema ./schemas/user.json)
    #[arg(short, long, env = "SCHEMA_FILE")]
    schema: Option<PathBuf>,
    /// Skip Prettier formatting after generation
    #[arg(long = "no-prettier")]
    no_prettier: bool,
}

impl GenerateArgs {
    fn into_options(self, name: Option<String>) -> GenerateOptions {
        GenerateOptions {
            name,
            schema: self.schema,
            skip_format: self.no_prettier,
        }
    }
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate a main resource (e.g. hexogen resource User)
    Resource {
        /// Entity name
        name: Option<String>,
        #[command(flatten)]
        args: GenerateArgs,
    },
    /// Generate a sub-entity (e.g. hexogen subentity Address)
    Subentity {
        /// Sub-entity name
        name: Option<String>,
        #[command(flatten)]
        args: GenerateArgs,
    },
    /// Generate a versioned resource (e.g. hexogen versioned User)
    Versioned {
        /// Entity name
        name: Option<String>,
        #[command(flatten)]
        args: GenerateArgs,
    },
    /// Add a property to a module
    Property {
        /// Skip Prettier formatting after generation
        #[arg(long = "no-prettier")]
        no_prettier: bool,
    },
    /// Add something to an existing module
    Add {
        #[command(subcommand)]
        target: AddCommands,
    },
    /// Generate with any generator (e.g. hexogen g relational-resource)
    #[command(name = "g", visible_alias = "generate")]
    Generate {
        /// Generator identifier or alias (resource, subentity, versioned, custom:...)
        generator: String,
        /// Entity name
        name: Option<String>,
        #[command(flatten)]
        args: GenerateArgs,
    },
    /// Run a template from the project's templates/ directory
    Custom {
        /// Template as category/name (e.g. test/unit-test)
        template: String,
        /// Entity name passed to the template
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        args: GenerateArgs,
    },
    /// List the project's custom templates
    #[command(name = "custom:list")]
    CustomList,
    /// List available templates or template types
    List {
        #[command(subcommand)]
        target: ListCommands,
    },
    /// Show help and usage examples
    Help,
}

#[derive(clap::Subcommand, Debug)]
pub enum AddCommands {
    /// Add a property to a module (e.g. hexogen add property)
    Property {
        /// Skip Prettier formatting after generation
        #[arg(long = "no-prettier")]
        no_prettier: bool,
    },
}

#[derive(clap::Subcommand, Debug)]
pub enum ListCommands {
    /// List available generators and property templates
    Templates,
    /// List all available template types
    Types,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", style(format!("❌ {e}")).red());
            if let Some(Error::UnknownGenerator { .. }) = e.downcast_ref::<Error>() {
                eprintln!("{}", style("\n💡 You can also use simplified commands:").dim());
                for line in [
                    "   hexogen resource (instead of hexogen g resource)",
                    "   hexogen subentity (instead of hexogen g subentity)",
                    "   hexogen versioned (instead of hexogen g versioned)",
                ] {
                    eprintln!("{}", style(line).dim());
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("HEXOGEN_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::load()?;
    let app = Application::from_settings(settings)?;
    debug!(command = ?cli.command, "Dispatching command");

    match cli.command {
        Commands::Resource { name, args } => {
            app.generate("resource", args.into_options(name)).await?;
        }
        Commands::Subentity { name, args } => {
            app.generate("subentity", args.into_options(name)).await?;
        }
        Commands::Versioned { name, args } => {
            app.generate("versioned", args.into_options(name)).await?;
        }
        Commands::Property { no_prettier }
        | Commands::Add {
            target: AddCommands::Property { no_prettier },
        } => {
            app.add_property(no_prettier).await?;
        }
        Commands::Generate {
            generator,
            name,
            args,
        } => {
            app.generate(&generator, args.into_options(name)).await?;
        }
        Commands::Custom {
            template,
            name,
            args,
        } => {
            app.generate_custom(&template, args.into_options(name))
                .await?;
        }
        Commands::CustomList => print!("{}", application::list_custom(app.catalog())),
        Commands::List { target } => match target {
            ListCommands::Templates => print!("{}", application::list_templates(app.catalog())),
            ListCommands::Types => print!("{}", application::list_types(app.catalog())),
        },
        Commands::Help => {
            print!("{}", application::usage_examples());
            println!();
            Cli::command().print_help()?;
        }
    }
    Ok(())
}
