//! callboard - Call-center operations dashboard

mod render;
mod watch;

use anyhow::{bail, Context, Result};
use callboard_core::view_model::{customer_rows, ticket_rows};
use callboard_core::{
    ApiClient, DashboardConfig, DashboardSettings, FetchStatus, Page, TabSession, ViewId,
    ViewSnapshot,
};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use render::RenderOptions;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "callboard",
    version,
    about = "Call-center operations dashboard",
    long_about = "Terminal dashboard for an AI call-center backend.\n\
                  \n\
                  Shows call history, analytics and local settings, with the summary view\n\
                  refreshed every 30 seconds while it is open.\n\
                  \n\
                  Examples:\n\
                    callboard                        # Live session (default)\n\
                    callboard watch --view calls     # Live session starting on calls\n\
                    callboard summary                # Print dashboard summary\n\
                    callboard calls --limit 20       # Print 20 most recent calls\n\
                    callboard call 42                # Call detail with transcript\n\
                    callboard analytics --days 30    # 30-day analytics\n\
                  \n\
                  Environment Variables:\n\
                    CALLBOARD_API_URL                # Backend base URL\n\
                    CALLBOARD_CONFIG                 # Config file (TOML)\n\
                    CALLBOARD_NO_COLOR               # Disable ANSI colors\n\
                    RUST_LOG                         # Log filter (default: warn)"
)]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,

    /// Backend base URL (default: http://localhost:8000)
    #[arg(long, env = "CALLBOARD_API_URL", global = true)]
    api_url: Option<String>,

    /// Path to config file
    #[arg(long, env = "CALLBOARD_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, env = "CALLBOARD_NO_COLOR", global = true)]
    no_color: bool,

    /// Debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Mode {
    /// Live session with tab switching (default)
    Watch {
        /// View to start on
        #[arg(long, default_value = "dashboard")]
        view: ViewId,
    },
    /// Print the dashboard summary
    Summary,
    /// Print call history
    Calls {
        #[arg(long, default_value = "0")]
        skip: u32,
        /// Max results (default: config page size)
        #[arg(long, short = 'n')]
        limit: Option<u32>,
    },
    /// Show one call with its transcript
    Call {
        /// Call ID
        id: i64,
    },
    /// Print daily and intent analytics
    Analytics {
        /// Day range (default: config)
        #[arg(long, short = 'd')]
        days: Option<u32>,
    },
    /// Print customers
    Customers {
        #[arg(long, default_value = "0")]
        skip: u32,
        #[arg(long, short = 'n', default_value = "100")]
        limit: u32,
    },
    /// Print support tickets
    Tickets {
        #[arg(long, default_value = "0")]
        skip: u32,
        #[arg(long, short = 'n', default_value = "100")]
        limit: u32,
    },
    /// Print or change local settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Change one setting, e.g. `settings set silence_timeout 15`
    Set { key: String, value: String },
    /// Restore defaults
    Reset,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(cli: &Cli) -> Result<DashboardConfig> {
    let mut config =
        DashboardConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.trim().to_string();
        config.validate().context("Invalid --api-url")?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let opts = RenderOptions {
        json: cli.json,
        no_color: cli.no_color,
    };

    let client = ApiClient::http(&config.api.base_url).context("Failed to create HTTP client")?;
    tracing::debug!(base_url = %config.api.base_url, "Using backend");

    let settings = DashboardSettings::default_dir()
        .map(|dir| DashboardSettings::load(&dir))
        .unwrap_or_default();
    let mut session = TabSession::new(client.clone(), config.clone()).with_settings(settings);

    match cli.mode.unwrap_or(Mode::Watch {
        view: ViewId::Dashboard,
    }) {
        Mode::Watch { view } => return watch::run(session, view, opts).await,
        Mode::Summary => {
            let snapshot = fetch_view(&mut session, ViewId::Dashboard, &opts).await?;
            println!("{}", render::render_snapshot(&snapshot, &opts));
        }
        Mode::Calls { skip, limit } => {
            let limit = limit.unwrap_or(config.views.page_size);
            session.set_calls_page(Page::new(skip, limit));
            let snapshot = fetch_view(&mut session, ViewId::Calls, &opts).await?;
            println!("{}", render::render_snapshot(&snapshot, &opts));
        }
        Mode::Call { id } => {
            let detail = with_spinner(&opts, "Loading call...", session.call_detail(id))
                .await
                .with_context(|| format!("Failed to load call {}", id))?;
            println!("{}", render::render_call_detail(&detail, &opts));
        }
        Mode::Analytics { days } => {
            if let Some(days) = days {
                session.set_analytics_days(days)?;
            }
            let snapshot = fetch_view(&mut session, ViewId::Analytics, &opts).await?;
            println!("{}", render::render_snapshot(&snapshot, &opts));
        }
        Mode::Customers { skip, limit } => {
            let customers = with_spinner(
                &opts,
                "Loading customers...",
                client.customers(Page::new(skip, limit)),
            )
            .await
            .context("Failed to load customers")?;
            println!("{}", render::render_customers(&customer_rows(&customers), &opts));
        }
        Mode::Tickets { skip, limit } => {
            let tickets = with_spinner(
                &opts,
                "Loading tickets...",
                client.tickets(Page::new(skip, limit)),
            )
            .await
            .context("Failed to load tickets")?;
            println!("{}", render::render_tickets(&ticket_rows(&tickets), &opts));
        }
        Mode::Settings { action } => {
            if let Some(action) = action {
                let settings = update_settings(session.settings().clone(), action)?;
                session = session.with_settings(settings);
            }
            session.switch_to(ViewId::Settings)?;
            if let Some(snapshot) = session.snapshot() {
                println!("{}", render::render_snapshot(&snapshot, &opts));
            }
        }
    }

    session.shutdown();
    Ok(())
}

fn update_settings(
    mut settings: DashboardSettings,
    action: SettingsAction,
) -> Result<DashboardSettings> {
    let dir = DashboardSettings::default_dir().context("No config directory on this platform")?;
    match action {
        SettingsAction::Set { key, value } => settings.set(&key, &value)?,
        SettingsAction::Reset => settings = DashboardSettings::default(),
    }
    settings.save(&dir)?;
    tracing::info!(dir = %dir.display(), "Settings saved");
    Ok(settings)
}

/// Activate `view`, wait for its first fetch, and return the snapshot
async fn fetch_view(
    session: &mut TabSession,
    view: ViewId,
    opts: &RenderOptions,
) -> Result<ViewSnapshot> {
    if let Some(pending) = session.switch_to(view)? {
        with_spinner(opts, &format!("Loading {}...", view), pending.settled()).await;
    }

    let snapshot = session
        .snapshot()
        .context("No active view after activation")?;
    if snapshot.status == FetchStatus::Error {
        bail!(
            "{}",
            snapshot
                .error
                .unwrap_or_else(|| format!("Failed to load {}", view))
        );
    }
    Ok(snapshot)
}

async fn with_spinner<F: std::future::Future>(
    opts: &RenderOptions,
    message: &str,
    fut: F,
) -> F::Output {
    let spinner = if opts.json {
        ProgressBar::hidden()
    } else {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        spinner
    };
    spinner.set_message(message.to_string());

    let output = fut.await;
    spinner.finish_and_clear();
    output
}
