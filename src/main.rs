use clap::{Parser, Subcommand};
use faceit_scout::{
    command::{CliHost, CommandOrchestrator, CONSOLE_ID},
    config::Settings,
    faceit::FaceitClient,
    models::Subject,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "faceit-scout")]
#[clap(about = "Look up FACEIT Elo and stats for a roster of players", long_about = None)]
struct Cli {
    /// Config file overriding the default layered configuration.
    #[clap(short, long)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rate a whole roster, split by team
    Roster {
        /// Roster JSON file: [{"display_name", "local_id", "team", "bot"?}]
        #[clap(short, long)]
        file: PathBuf,
    },

    /// Detailed stats for a single player
    Player {
        /// Display name used in the report
        #[clap(short, long)]
        name: String,

        /// Steam id to look up
        #[clap(short, long)]
        steam_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::new().unwrap_or_else(|e| {
            eprintln!("Falling back to default settings: {e}");
            Settings::default()
        }),
    };
    if let Err(e) = settings.validate() {
        return Err(anyhow::anyhow!("Invalid settings: {e}"));
    }

    let default_level = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("faceit_scout={default_level}"))),
        )
        .init();

    let client = Arc::new(FaceitClient::from_settings(&settings)?);

    match cli.command {
        Commands::Roster { file } => {
            let host = Arc::new(CliHost::from_roster_file(&file)?);
            info!(roster = %file.display(), "rating roster");
            let orchestrator = CommandOrchestrator::new(host, client, settings);
            orchestrator.run_roster(CONSOLE_ID).await;
        }

        Commands::Player { name, steam_id } => {
            let subject = Subject::new(name, steam_id);
            let host = Arc::new(CliHost::single(subject.clone()));
            let orchestrator = CommandOrchestrator::new(host, client, settings);
            orchestrator.run_detail(CONSOLE_ID, &subject).await;
        }
    }

    Ok(())
}
