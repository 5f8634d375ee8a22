//! CloudShare command-line client

mod args;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cloudshare_client::auth::{CommandToken, NoToken, StaticToken, TokenSource};
use cloudshare_client::config::{Config, Settings};
use cloudshare_client::constants::MSG_FETCH_FAILED;
use cloudshare_client::credits::CreditsContext;
use cloudshare_client::dashboard::Dashboard;
use cloudshare_client::transport::{FileTransport, HttpTransport};
use cloudshare_client::types::{FileMetadata, PendingFile, StatusMessage};
use cloudshare_client::views::{
    render_credits, render_dashboard, render_file_details, render_file_table, render_message,
    render_pending,
};

use args::{Args, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(args.debug);

    let config_path = args.config.clone().or_else(Config::config_path);
    let mut config = match &config_path {
        Some(path) => match Config::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config from {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };
    apply_overrides(&mut config.settings, &args);
    tracing::debug!(settings = ?config.settings, "effective settings");

    let command = match args.command {
        Command::Config { save } => return show_config(&config, config_path, save),
        command => command,
    };

    let transport: Arc<dyn FileTransport> = match HttpTransport::new(
        &config.settings.api_url,
        Duration::from_secs(config.settings.request_timeout_secs),
    ) {
        Ok(transport) => Arc::new(transport),
        Err(e) => {
            eprintln!("Failed to create HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };
    let tokens = token_source(&config.settings);
    let credits = CreditsContext::new(transport.clone(), tokens.clone());
    let mut dashboard = Dashboard::new(transport, tokens, Arc::new(credits.clone()));

    match command {
        Command::Recent { json } => {
            dashboard.load_recent_files().await;
            if json {
                print_json(dashboard.recent_files())
            } else {
                print!("{}", render_dashboard(&dashboard));
                ExitCode::SUCCESS
            }
        }
        Command::Files { json } => match dashboard.all_files().await {
            Ok(files) if json => print_json(&files),
            Ok(files) => {
                print!("{}", render_file_table("All files", &files));
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!("Error fetching files: {e}");
                let text = e.server_message().unwrap_or(MSG_FETCH_FAILED);
                eprintln!("{}", render_message(&StatusMessage::error(text)));
                ExitCode::FAILURE
            }
        },
        Command::Upload { paths } => upload(&mut dashboard, &credits, paths).await,
        Command::Delete { id } => {
            let _ = dashboard.delete_file(&id).await;
            finish(&dashboard)
        }
        Command::TogglePublic { id } => {
            let _ = dashboard.toggle_public(&id).await;
            finish(&dashboard)
        }
        Command::Download { id, output } => {
            let _ = dashboard.download_file(&id, output.as_deref()).await;
            finish(&dashboard)
        }
        Command::Public { id } => match dashboard.public_file(&id).await {
            Ok(file) => {
                print!("{}", render_file_details(&file));
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Unable to get file {id}: {e}");
                ExitCode::FAILURE
            }
        },
        Command::Credits => match credits.fetch().await {
            Ok(balance) => {
                println!("{}", render_credits(&balance));
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error fetching user credits: {e}");
                ExitCode::FAILURE
            }
        },
        Command::Config { .. } => ExitCode::SUCCESS,
    }
}

/// Initialize tracing output on stderr
///
/// `RUST_LOG` takes precedence over the `--debug` flag.
fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Command-line flags (and their environment variables) win over the file
fn apply_overrides(settings: &mut Settings, args: &Args) {
    if let Some(api_url) = &args.api_url {
        settings.api_url = api_url.clone();
    }
    if let Some(token) = &args.token {
        settings.token = Some(token.clone());
    }
    if let Some(command) = &args.token_command {
        settings.token_command = Some(command.clone());
    }
}

/// Pick the token source: a token command first, then a static token
fn token_source(settings: &Settings) -> Arc<dyn TokenSource> {
    if let Some(command) = &settings.token_command {
        Arc::new(CommandToken::new(command.clone()))
    } else if let Some(token) = &settings.token {
        Arc::new(StaticToken::new(token.clone()))
    } else {
        Arc::new(NoToken)
    }
}

/// Select the given files and submit them as one batch
async fn upload(
    dashboard: &mut Dashboard,
    credits: &CreditsContext,
    paths: Vec<PathBuf>,
) -> ExitCode {
    let mut selected = Vec::with_capacity(paths.len());
    for path in &paths {
        match PendingFile::from_path(path).await {
            Ok(file) => selected.push(file),
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        }
    }

    if dashboard.select_files(selected).is_err() {
        return finish(dashboard);
    }
    print!("{}", render_pending(dashboard.pending_files()));

    let outcome = dashboard.upload().await;
    if outcome.is_success() {
        print!("\n{}", render_dashboard(dashboard));
        if let Some(balance) = credits.current() {
            println!("\n{}", render_credits(&balance));
        }
        ExitCode::SUCCESS
    } else {
        finish(dashboard)
    }
}

/// Print the status line and map its kind to the exit code
fn finish(dashboard: &Dashboard) -> ExitCode {
    match dashboard.message() {
        Some(message) if message.is_error() => {
            eprintln!("{}", render_message(message));
            ExitCode::FAILURE
        }
        Some(message) => {
            println!("{}", render_message(message));
            ExitCode::SUCCESS
        }
        None => ExitCode::SUCCESS,
    }
}

fn print_json(files: &[FileMetadata]) -> ExitCode {
    match serde_json::to_string_pretty(files) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to encode JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

fn show_config(config: &Config, path: Option<PathBuf>, save: bool) -> ExitCode {
    let Some(path) = path else {
        eprintln!("Could not determine config directory");
        return ExitCode::FAILURE;
    };

    if save {
        if let Err(e) = config.save_to(&path) {
            eprintln!("Failed to save config to {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
        println!("Saved {}", path.display());
    }

    println!("Config file: {}", path.display());
    println!("{:#?}", config.settings);
    ExitCode::SUCCESS
}
