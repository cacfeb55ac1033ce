use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use shortlist::analyze::submit::{run_analysis, DraftSource};
use shortlist::analyze::validation::{split_skills, ExistingJdSelection, NewJdForm};
use shortlist::api::{ApiClient, ResumeUpload};
use shortlist::config::Config;
use shortlist::render::{render_history, render_report};
use shortlist::session::SessionStore;

#[derive(Parser)]
#[command(name = "shortlist", about = "Resume screening client", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and persist the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Clear the persisted session.
    Logout,
    /// Show who is currently signed in.
    Whoami,
    /// List client names.
    Clients,
    /// List job-description titles for one client.
    Jds { client: String },
    /// Submit a resume against a job description and render the report.
    Analyze {
        /// Path to the resume (PDF, DOC or DOCX, max 1MB).
        resume: PathBuf,
        /// Existing-client mode: client to match against.
        #[arg(long, conflicts_with = "client_name")]
        client: Option<String>,
        /// Existing-client mode: stored JD title.
        #[arg(long, requires = "client")]
        jd: Option<String>,
        /// New-client mode: client name to create.
        #[arg(long)]
        client_name: Option<String>,
        /// New-client mode: JD title to create.
        #[arg(long)]
        jd_title: Option<String>,
        /// Required experience, e.g. "3-5" or "4+". Overrides the stored
        /// value in existing-client mode.
        #[arg(long)]
        experience: Option<String>,
        /// Comma-separated primary skills. Overrides in existing-client mode.
        #[arg(long)]
        primary_skills: Option<String>,
        /// Comma-separated secondary skills.
        #[arg(long)]
        secondary_skills: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        budget: Option<String>,
        #[arg(long)]
        positions: Option<u32>,
        #[arg(long)]
        work_mode: Option<String>,
    },
    /// Show past analyses.
    History,
    /// Download the originally uploaded resume for an analysis.
    Download {
        analysis_id: String,
        /// Output path; defaults to the server-provided file name.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let store = SessionStore::new(config.session_path.clone());
    let client = ApiClient::new(config.api_url.clone(), store.clone())?;

    match cli.command {
        Command::Login { email, password } => {
            let session = client.login(&email, &password).await?;
            println!("Logged in as {} ({})", session.email, session.role);
        }
        Command::Logout => {
            store.clear()?;
            println!("Logged out.");
        }
        Command::Whoami => {
            let session = store.require()?;
            println!("{} ({})", session.email, session.role);
            if !session.company_id.is_empty() {
                println!("Company: {}", session.company_id);
            }
        }
        Command::Clients => {
            for name in client.list_clients().await? {
                println!("{name}");
            }
        }
        Command::Jds { client: name } => {
            for title in client.list_client_jds(&name).await? {
                println!("{title}");
            }
        }
        Command::Analyze {
            resume,
            client: existing_client,
            jd,
            client_name,
            jd_title,
            experience,
            primary_skills,
            secondary_skills,
            location,
            budget,
            positions,
            work_mode,
        } => {
            let bytes = std::fs::read(&resume)
                .with_context(|| format!("Could not read resume {}", resume.display()))?;
            let file_name = resume
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let upload = ResumeUpload { file_name, bytes };

            let source = match (existing_client, jd) {
                (Some(client_sel), jd_sel) => {
                    let jd_sel = jd_sel.unwrap_or_default();
                    // Missing selections are reported by draft validation, so
                    // only fetch once both are present.
                    let mut detail = if jd_sel.is_empty() {
                        Default::default()
                    } else {
                        client.jd_detail(&client_sel, &jd_sel).await?
                    };
                    // The stored record is editable right up to submission.
                    if let Some(exp) = experience {
                        detail.required_experience = exp;
                    }
                    if let Some(raw) = primary_skills {
                        detail.primary_skills = split_skills(&raw);
                    }
                    if let Some(raw) = secondary_skills {
                        detail.secondary_skills = split_skills(&raw);
                    }
                    DraftSource::Existing(ExistingJdSelection {
                        client_name: client_sel,
                        jd_title: jd_sel,
                        detail,
                    })
                }
                (None, _) => DraftSource::New(NewJdForm {
                    client_name: client_name.unwrap_or_default(),
                    jd_title: jd_title.unwrap_or_default(),
                    required_experience: experience.unwrap_or_default(),
                    primary_skills: primary_skills.unwrap_or_default(),
                    secondary_skills: secondary_skills.unwrap_or_default(),
                    location: location.unwrap_or_default(),
                    budget: budget.unwrap_or_default(),
                    number_of_positions: positions,
                    work_mode: work_mode.unwrap_or_default(),
                }),
            };

            let spinner = spinner("Analyzing resume...");
            let result = run_analysis(&client, upload, source).await;
            spinner.finish_and_clear();

            let response = result?;
            print!("{}", render_report(&response.analysis));
            info!(
                "Stored as analysis {} ({} pages)",
                response.analysis_id, response.page_count
            );
        }
        Command::History => {
            let entries = client.history().await?;
            print!("{}", render_history(&entries));
        }
        Command::Download { analysis_id, out } => {
            let (file_name, body) = client.download(&analysis_id).await?;
            let path = out.unwrap_or_else(|| PathBuf::from(&file_name));
            std::fs::write(&path, &body)
                .with_context(|| format!("Could not write {}", path.display()))?;
            println!("Saved {} ({} bytes)", path.display(), body.len());
        }
    }

    Ok(())
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("spinner template"),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(std::time::Duration::from_millis(100));
    bar
}
