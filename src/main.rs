use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use session_lens::playback::FixedDurationHighlighter;
use session_lens::report::{render_session, render_session_list};
use session_lens::{
    ApiGateway, Config, ContentResolver, SessionDetail, SessionOperations, StaticToken,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "session-lens", version, about = "Audio session analysis client")]
struct Cli {
    /// Config file (extension optional)
    #[arg(short, long, default_value = "config/session-lens")]
    config: String,

    /// Bearer token; overrides `auth.token` from the config file
    #[arg(long, env = "SESSION_LENS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List your sessions
    List,

    /// Upload an audio file as a new session
    Upload {
        file: PathBuf,

        /// Session title (defaults to the file name)
        #[arg(long)]
        title: Option<String>,
    },

    /// Delete one or more sessions
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Show a session's summary, emotions and transcript
    Show {
        id: String,

        /// Playback position in seconds used for highlighting
        #[arg(long, default_value_t = 0.0)]
        at: f64,

        /// Keep polling until no resource is processing
        #[arg(long)]
        wait: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config))?;

    info!("Using API at {}", cfg.api.base_url);

    let token = cli.token.or_else(|| cfg.auth.token.clone());
    if token.is_none() {
        warn!("No access token configured; requests will be unauthenticated");
    }

    let gateway = ApiGateway::new(
        cfg.api.base_url.clone(),
        cfg.api.timeout(),
        Arc::new(StaticToken::from_option(token)),
    )
    .context("Failed to create HTTP client")?;

    match cli.command {
        Command::List => {
            let sessions = SessionOperations::new(gateway)
                .list()
                .await
                .context("Failed to list sessions")?;
            print!("{}", render_session_list(&sessions));
        }
        Command::Upload { file, title } => {
            let response = SessionOperations::new(gateway)
                .upload_file(&file, title.as_deref())
                .await
                .context("Upload failed")?;
            println!("Session created: {}", response.session_id);
        }
        Command::Delete { ids } => {
            let ops = SessionOperations::new(gateway);
            match ids.as_slice() {
                [id] => ops.delete(id).await.context("Failed to delete session")?,
                _ => ops
                    .delete_many(&ids)
                    .await
                    .context("Failed to delete sessions")?,
            }
            println!("Deleted {} session(s)", ids.len());
        }
        Command::Show { id, at, wait } => {
            let resolver =
                ContentResolver::new(gateway.http_client().clone(), cfg.resolve.on_failure);
            let detail =
                SessionDetail::open(gateway, resolver, id, cfg.polling.poll_config()).await;

            if wait {
                info!("Waiting for processing to finish");
                detail.wait_until_settled().await;
            }

            let snapshot = detail.snapshot().await;
            detail.close();

            let mut view = snapshot.playback().with_highlighter(FixedDurationHighlighter::new(
                cfg.playback.seconds_per_entry,
            ));
            view.on_time_update(at);

            print!("{}", render_session(&snapshot, &view));
        }
    }

    Ok(())
}
