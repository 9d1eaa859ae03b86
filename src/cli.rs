// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use crate::config::AppConfig;
use crate::controller::{JobBoard, ProfileForm};
use crate::core::service_client::{JobBackend, ServiceClient};
use crate::core::store::{JsonFileStore, LocalStore};
use crate::types::{Alert, AlertKind, JobId, PhotoUpload, SearchCriteria};

#[derive(Parser)]
#[command(name = "jobboard")]
#[command(about = "Search jobs, keep saved and hidden lists, edit your profile")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, default_value = crate::config::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the job board web UI
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Search jobs and print the visible results
    Search {
        skills: String,
        #[arg(long)]
        soft_skills: Option<String>,
        /// Include hidden jobs
        #[arg(long)]
        show_hidden: bool,
        /// Toggle saved state of these result ids after searching
        #[arg(long = "save")]
        save: Vec<String>,
        /// Write the rendered result cards to a file
        #[arg(long)]
        html: Option<PathBuf>,
    },
    /// List saved jobs
    Saved,
    /// Remove one job from the saved list
    Unsave { id: String },
    /// Hide a job id from future results
    Hide { id: String },
    /// Empty the saved list
    ClearSaved,
    /// Empty the hidden list
    UnhideAll,
    /// Mark a job as applied
    Apply {
        id: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Remove the applied mark from a job
    Unapply { id: String },
    /// Show or edit the profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    Show,
    Update {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        info: String,
        #[arg(long, default_value = "")]
        soft_skills: String,
    },
    /// Upload a PNG or JPEG profile photo
    Photo { path: PathBuf },
}

pub async fn handle_command(cli: Cli, mut config: AppConfig) -> Result<()> {
    if let Command::Serve { port } = cli.command {
        if let Some(port) = port {
            config.port = port;
        }
        return crate::web::start_web_server(config).await;
    }

    let store = LocalStore::new(JsonFileStore::open(&config.store_path));
    let mut board = JobBoard::from_config(&config, store);
    let backend = ServiceClient::new(config.clone())?;

    match cli.command {
        Command::Serve { .. } => {}

        Command::Search {
            skills,
            soft_skills,
            show_hidden,
            save,
            html,
        } => {
            let criteria =
                SearchCriteria::from_input(config.search_mode, &skills, soft_skills.as_deref());
            board.set_show_hidden(show_hidden);
            let frame = board.search(&backend, criteria).await;
            report(frame.alert.as_ref())?;

            let saved = save_results(&mut board, &save);
            print_results(&board);
            saved?;

            if let Some(path) = html {
                std::fs::write(&path, board.render_results())
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("Wrote results to {}", path.display());
            }
        }

        Command::Saved => {
            let saved = board.saved_jobs();
            if saved.is_empty() {
                println!("No saved jobs yet.");
            }
            for job in &saved {
                println!(
                    "{:<26} {} @ {}",
                    board.resolve(job).as_str(),
                    board.renderer().resolver().title(job),
                    job.company().unwrap_or_default()
                );
            }
        }

        Command::Unsave { id } => {
            let frame = board.unsave(&JobId::new(id));
            report(frame.alert.as_ref())?;
            println!("{} saved jobs", frame.saved_count);
        }

        Command::Hide { id } => {
            let frame = board.hide(&JobId::new(id));
            report(frame.alert.as_ref())?;
            println!("{} hidden jobs", board.hidden_ids().len());
        }

        Command::ClearSaved => report(board.clear_saved().alert.as_ref())?,

        Command::UnhideAll => report(board.unhide_all().alert.as_ref())?,

        Command::Apply { id, notes } => {
            let frame = board.apply(&backend, &JobId::new(id), notes.as_deref()).await;
            report(frame.alert.as_ref())?;
        }

        Command::Unapply { id } => {
            let frame = board.unapply(&backend, &JobId::new(id)).await;
            report(frame.alert.as_ref())?;
        }

        Command::Profile { command } => handle_profile(&backend, command).await?,
    }

    Ok(())
}

async fn handle_profile(backend: &dyn JobBackend, command: ProfileCommand) -> Result<()> {
    let mut form = ProfileForm::new();

    match command {
        ProfileCommand::Show => {
            form.load(backend).await;
            report(form.alert())?;
            let values = form.values();
            println!("Name:        {}", values.name.as_deref().unwrap_or_default());
            println!("Info:        {}", values.info.as_deref().unwrap_or_default());
            println!("Soft skills: {}", values.soft_skills.as_deref().unwrap_or_default());
            println!("Photo:       {}", values.photo_path.as_deref().unwrap_or("-"));
        }
        ProfileCommand::Update {
            name,
            info,
            soft_skills,
        } => {
            form.save(backend, &name, &info, &soft_skills).await;
            report(form.alert())?;
        }
        ProfileCommand::Photo { path } => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();
            form.upload(backend, Some(PhotoUpload::new(file_name, bytes))).await;
            report(form.alert())?;
        }
    }

    Ok(())
}

/// Toggles saved state for each id, stopping at the first id that is not in
/// the current results or whose change could not be stored.
fn save_results(board: &mut JobBoard, ids: &[String]) -> Result<()> {
    for id in ids {
        let id = JobId::new(id.as_str());
        if !board.current_jobs().iter().any(|job| board.resolve(job) == id) {
            anyhow::bail!("Job {} is not in the current results", id);
        }
        report(board.toggle_save(&id).alert.as_ref())?;
    }
    Ok(())
}

/// Prints success banners; turns warnings and errors into a failed command.
fn report(alert: Option<&Alert>) -> Result<()> {
    match alert {
        None => Ok(()),
        Some(alert) => match alert.kind {
            AlertKind::Success | AlertKind::Info => {
                println!("{}", alert.message);
                Ok(())
            }
            AlertKind::Warning | AlertKind::Danger => anyhow::bail!("{}", alert.message),
        },
    }
}

fn print_results(board: &JobBoard) {
    let hidden = board.hidden_ids();
    let saved: Vec<JobId> = board.saved_jobs().iter().map(|j| board.resolve(j)).collect();
    let show_hidden = board.state().show_hidden;

    let mut shown = 0;
    for job in board.current_jobs() {
        let id = board.resolve(job);
        let is_hidden = hidden.contains(&id);
        if is_hidden && !show_hidden {
            continue;
        }
        shown += 1;

        let mut flags = String::new();
        if saved.contains(&id) {
            flags.push_str(" [saved]");
        }
        if is_hidden {
            flags.push_str(" [hidden]");
        }

        println!(
            "{:<26} {} @ {} ({}){}",
            id.as_str(),
            board.renderer().resolver().title(job),
            job.company().unwrap_or_else(|| "Unknown Company".to_string()),
            job.location()
                .unwrap_or_else(|| "Remote/Unspecified".to_string()),
            flags
        );
    }

    if shown == 0 {
        println!("No jobs to display.");
    }
}
