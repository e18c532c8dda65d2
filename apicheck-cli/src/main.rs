use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(
    name = "apicheck",
    about = "Schema validation plus model-backed quality review for API responses"
)]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the Anthropic API key
    Auth(commands::auth::AuthArgs),
    /// Validate a response and assess its quality
    Check(commands::check::CheckArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Run the built-in recruitment-system scenarios
    Demo(commands::demo::DemoArgs),
    /// Validate a response against its schema only
    Validate(commands::validate::ValidateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Auth(args) => commands::auth::run(args),
        Commands::Check(args) => commands::check::run(args).await,
        Commands::Config(args) => commands::config::run(args),
        Commands::Demo(args) => commands::demo::run(args).await,
        Commands::Validate(args) => commands::validate::run(args),
    }
}
