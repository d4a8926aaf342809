use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use cloudbox::{
    adapters::{
        controllers::{
            file_controller::FileController, folder_controller::FolderController,
            health_controller::HealthController,
        },
        terminal_host::TerminalHost,
    },
    services, AppState, ClientConfig, ClientError, FolderScope,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cloudbox", about = "CloudBox file storage client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the backend is reachable
    Ping,
    /// List files in a folder (root by default)
    List {
        /// Folder id
        #[arg(long)]
        folder: Option<String>,
    },
    /// Upload a local file through a presigned URL
    Upload {
        /// Path to the file to upload
        file: PathBuf,
        /// Folder id to upload into
        #[arg(long)]
        folder: Option<String>,
    },
    /// Print a presigned download URL for a file
    Download {
        /// File id
        file_id: String,
    },
    /// Delete a file
    Delete {
        /// File id
        file_id: String,
    },
    /// Create a public share link for a file
    Share {
        /// File id
        file_id: String,
        /// Hours until the link expires
        #[arg(long, default_value = "24")]
        hours: u32,
        /// Maximum number of downloads
        #[arg(long)]
        max_downloads: Option<u32>,
    },
    /// Resolve a share token to a download URL
    OpenShare {
        /// Share token
        token: String,
    },
    /// Folder operations
    Folder {
        #[command(subcommand)]
        sub: FolderCommands,
    },
}

#[derive(Subcommand)]
enum FolderCommands {
    /// Create a folder
    Create {
        /// Folder name
        name: String,
        /// Parent folder id
        #[arg(long)]
        parent: Option<String>,
    },
    /// Show the folders and files inside a folder (root by default)
    Contents {
        /// Folder id
        folder_id: Option<String>,
    },
    /// Delete a folder
    Delete {
        /// Folder id
        folder_id: String,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

async fn run(app_state: &AppState, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Ping => {
            let report = HealthController::ping(app_state).await?;
            print_json(&report)?;
        }
        Commands::List { folder } => {
            let files = FileController::list_files(app_state, FolderScope::from(folder)).await?;
            print_json(&files)?;
        }
        Commands::Upload { file, folder } => {
            let report =
                FileController::upload_file(app_state, &file, FolderScope::from(folder)).await?;
            print_json(&report)?;
        }
        Commands::Download { file_id } => {
            FileController::download_file(app_state, &file_id).await?;
        }
        Commands::Delete { file_id } => {
            let report = FileController::delete_file(app_state, &file_id).await?;
            print_json(&report)?;
        }
        Commands::Share {
            file_id,
            hours,
            max_downloads,
        } => {
            FileController::share_file(app_state, &file_id, hours, max_downloads).await?;
        }
        Commands::OpenShare { token } => {
            let url = FileController::open_share(app_state, &token).await?;
            println!("{}", url);
        }
        Commands::Folder { sub } => match sub {
            FolderCommands::Create { name, parent } => {
                let report =
                    FolderController::create_folder(app_state, &name, FolderScope::from(parent))
                        .await?;
                print_json(&report)?;
            }
            FolderCommands::Contents { folder_id } => {
                let contents =
                    FolderController::folder_contents(app_state, FolderScope::from(folder_id))
                        .await?;
                print_json(&contents)?;
            }
            FolderCommands::Delete { folder_id } => {
                FolderController::delete_folder(app_state, &folder_id).await?;
                print_json(&serde_json::json!({ "folderId": folder_id, "deleted": true }))?;
            }
        },
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let config = ClientConfig::from_env().context(
        "Failed to load configuration. Set CLOUDBOX_AUTH_TOKEN (and optionally CLOUDBOX_API_URL)",
    )?;

    tracing::info!("Using CloudBox API at {}", config.api_url);

    let (metadata, transfer) =
        services::create_services(&config).context("Failed to create HTTP services")?;
    let app_state = AppState::new(config, metadata, transfer, Arc::new(TerminalHost));

    if let Err(err) = run(&app_state, cli.command).await {
        if let Some(client_err) = err.downcast_ref::<ClientError>() {
            eprintln!("{}", client_err.report());
            std::process::exit(client_err.exit_code());
        }
        return Err(err);
    }

    Ok(())
}
